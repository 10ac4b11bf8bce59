use anyhow::{anyhow, Result};
use std::path::Path;
use std::time::SystemTime;

use SlotStore::util::unix_secs_f64;
use SlotStore::Location;

/// Open an existing save directory for changes. The CLI never creates one.
pub fn open_existing(path: &Path) -> Result<Location> {
    if !path.is_dir() {
        return Err(anyhow!("no save directory at {}", path.display()));
    }
    Location::open(path)
}

/// Open an existing save directory for inspection only: no write probe, no
/// temp-file sweep.
pub fn open_for_read(path: &Path) -> Result<Location> {
    if !path.is_dir() {
        return Err(anyhow!("no save directory at {}", path.display()));
    }
    Location::builder(path).read_only(true).open()
}

pub fn display_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => format!("(binary {} B)", bytes.len()),
    }
}

pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            if i % 16 == 0 {
                out.push('\n');
            } else {
                out.push(' ');
            }
        }
        out.push_str(&format!("{:02x}", b));
    }
    out
}

pub fn fmt_mtime(t: SystemTime) -> String {
    format!("{:.3}", unix_secs_f64(t))
}
