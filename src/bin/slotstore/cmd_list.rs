use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

use super::util::{fmt_mtime, open_for_read};
use SlotStore::util::unix_secs_f64;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let loc = open_for_read(&path)?;
    let mut slots = loc.slots();
    slots.sort_by(|a, b| a.0.cmp(&b.0));

    if json {
        let arr: Vec<_> = slots
            .iter()
            .map(|(slot, mtime)| json!({ "slot": slot, "mtime": unix_secs_f64(*mtime) }))
            .collect();
        println!("{}", serde_json::to_string(&arr)?);
        return Ok(());
    }

    if slots.is_empty() {
        println!("(no slots)");
    }
    for (slot, mtime) in &slots {
        println!("{}\t{}", slot, fmt_mtime(*mtime));
    }
    Ok(())
}
