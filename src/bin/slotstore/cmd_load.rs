use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use super::util::{display_text, hex_dump, open_for_read};

pub fn exec(path: PathBuf, slot: String, out: Option<PathBuf>) -> Result<()> {
    let loc = open_for_read(&path)?;
    let log = loc.load(&slot)?;

    if let Some(out_path) = out {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut f = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&out_path)
            .with_context(|| format!("open {}", out_path.display()))?;
        f.write_all(&log)?;
        f.sync_all()?;
        println!(
            "LOADED '{}': {} B -> wrote to {}",
            slot,
            log.len(),
            out_path.display()
        );
    } else {
        println!("LOADED '{}': {} B", slot, log.len());
        println!("text: {}", display_text(&log));
        println!("hex:  {}", hex_dump(&log[..log.len().min(64)]));
    }
    Ok(())
}
