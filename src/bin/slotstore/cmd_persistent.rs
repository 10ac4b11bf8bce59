use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

use super::util::{fmt_mtime, open_for_read};
use SlotStore::util::unix_secs_f64;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let loc = open_for_read(&path)?;
    let entries = loc.load_persistent();

    if json {
        let arr: Vec<_> = entries
            .iter()
            .map(|(mtime, value)| json!({ "mtime": unix_secs_f64(*mtime), "value": value }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&arr)?);
        return Ok(());
    }

    match entries.first() {
        Some((mtime, value)) => {
            println!("file:  {}", loc.persistent_path().display());
            println!("mtime: {}", fmt_mtime(*mtime));
            println!("value: {}", serde_json::to_string_pretty(value)?);
        }
        None => println!("(no persistent data)"),
    }
    Ok(())
}
