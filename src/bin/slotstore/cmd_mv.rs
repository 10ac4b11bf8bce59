use anyhow::Result;
use std::path::PathBuf;

use super::util::open_existing;

pub fn exec_rename(path: PathBuf, from: String, to: String) -> Result<()> {
    let loc = open_existing(&path)?;
    if loc.mtime(&from).is_none() {
        println!("NOT FOUND '{}' (nothing to rename)", from);
        return Ok(());
    }
    loc.rename(&from, &to)?;
    println!("RENAMED '{}' -> '{}'", from, to);
    Ok(())
}

pub fn exec_copy(path: PathBuf, from: String, to: String) -> Result<()> {
    let loc = open_existing(&path)?;
    if loc.mtime(&from).is_none() {
        println!("NOT FOUND '{}' (nothing to copy)", from);
        return Ok(());
    }
    loc.copy(&from, &to)?;
    println!("COPIED '{}' -> '{}'", from, to);
    Ok(())
}
