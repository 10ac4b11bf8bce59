use anyhow::{anyhow, Result};
use serde_json::json;
use std::path::PathBuf;

use super::util::{fmt_mtime, open_for_read};
use SlotStore::util::unix_secs_f64;

pub fn exec(path: PathBuf, slot: String, json: bool) -> Result<()> {
    let loc = open_for_read(&path)?;
    let mtime = loc
        .mtime(&slot)
        .ok_or_else(|| anyhow!("slot '{}' not found in {}", slot, path.display()))?;

    let meta = loc.json(&slot);
    let shot = loc.screenshot(&slot);

    if json {
        let v = json!({
            "slot": slot,
            "file": loc.filename(&slot).display().to_string(),
            "mtime": unix_secs_f64(mtime),
            "json": meta.as_ref().map(|m| m.to_json()),
            "screenshot": shot.as_ref().map(|s| s.member.clone()),
        });
        println!("{}", serde_json::to_string_pretty(&v)?);
        return Ok(());
    }

    println!("slot:       {}", slot);
    println!("file:       {}", loc.filename(&slot).display());
    println!("mtime:      {}", fmt_mtime(mtime));
    match &meta {
        Some(m) => {
            if let Some(name) = m.save_name() {
                println!("save_name:  {}", name);
            }
            println!("json:       {}", m.to_json());
        }
        None => println!("json:       (archive unreadable)"),
    }
    match &shot {
        Some(s) => println!("screenshot: {}", s.member),
        None => println!("screenshot: (none)"),
    }
    Ok(())
}
