use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI для каталога слотов сохранений
#[derive(Parser, Debug)]
#[command(name = "slotstore", version, about = "Save-slot directory tool")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// List slots with their mtimes (sorted by name)
    List {
        #[arg(long)]
        path: PathBuf,
        /// Print a JSON array instead of plain lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show slot metadata and screenshot presence
    Info {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        slot: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Read the raw log member of a slot
    Load {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        slot: String,
        /// Optional file to write raw log bytes into
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete a slot (no-op if absent)
    Rm {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        slot: String,
    },
    /// Rename a slot, overwriting the target
    Mv {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Copy a slot, overwriting the target
    Cp {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
    },
    /// Show the decoded persistent record (zlib+JSON)
    Persistent {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Location status: config, activity, slot count, metrics
    ///
    /// Пример:
    ///   slotstore status --path ./saves --json
    Status {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
