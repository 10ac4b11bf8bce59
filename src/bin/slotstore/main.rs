use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

mod cli;
mod util;
mod cmd_list;
mod cmd_info;
mod cmd_load;
mod cmd_rm;
mod cmd_mv;
mod cmd_persistent;
mod cmd_status;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug slotstore list --path ./saves
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::List { path, json } =>
            cmd_list::exec(path, json),

        cli::Cmd::Info { path, slot, json } =>
            cmd_info::exec(path, slot, json),

        cli::Cmd::Load { path, slot, out } =>
            cmd_load::exec(path, slot, out),

        cli::Cmd::Rm { path, slot } =>
            cmd_rm::exec(path, slot),

        cli::Cmd::Mv { path, from, to } =>
            cmd_mv::exec_rename(path, from, to),

        cli::Cmd::Cp { path, from, to } =>
            cmd_mv::exec_copy(path, from, to),

        cli::Cmd::Persistent { path, json } =>
            cmd_persistent::exec(path, json),

        cli::Cmd::Status { path, json } =>
            cmd_status::exec(path, json),
    }
}
