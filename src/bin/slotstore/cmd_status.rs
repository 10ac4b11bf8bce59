use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

use super::util::open_for_read;
// metrics snapshot
use SlotStore::metrics;

pub fn exec(path: PathBuf, json: bool) -> Result<()> {
    let loc = open_for_read(&path)?;
    let slots = loc.list().len();
    let persistent = !loc.load_persistent().is_empty();
    let cfg = loc.config();
    let ms = metrics::snapshot();

    if json {
        let v = json!({
            "directory": loc.directory().display().to_string(),
            "active": loc.is_active(),
            "read_only": loc.is_read_only(),
            "config": {
                "slot_suffix": cfg.slot_suffix,
                "persistent_name": cfg.persistent_name,
                "fsync": cfg.fsync,
                "stale_tmp_secs": cfg.stale_tmp_secs,
            },
            "slots": slots,
            "persistent_loaded": persistent,
            "metrics": ms,
        });
        println!("{}", serde_json::to_string_pretty(&v)?);
        return Ok(());
    }

    println!("SlotStore status:");
    println!("  directory         = {}", loc.directory().display());
    println!("  active            = {}", loc.is_active());
    println!("  read_only         = {}", loc.is_read_only());
    println!("  config            = {}", cfg);
    println!("  slots             = {}", slots);
    println!("  persistent_loaded = {}", persistent);
    println!("  saves             = {} (avg {:.1} B)", ms.slot_saves, ms.avg_save_bytes());
    println!("  scans_total       = {}", ms.scans_total);
    println!("  scan_skipped      = {}", ms.scan_entries_skipped);
    println!("  stale_tmp_swept   = {}", ms.stale_tmp_swept);
    println!("  persistent_reload = {}", ms.persistent_reloads);
    println!("  persistent_failed = {}", ms.persistent_decode_failures);
    Ok(())
}
