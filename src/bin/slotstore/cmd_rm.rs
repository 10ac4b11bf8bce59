use anyhow::Result;
use std::path::PathBuf;

use super::util::open_existing;

pub fn exec(path: PathBuf, slot: String) -> Result<()> {
    let loc = open_existing(&path)?;
    let existed = loc.mtime(&slot).is_some();
    loc.unlink(&slot)?;
    if existed {
        println!("REMOVED '{}'", slot);
    } else {
        println!("NOT FOUND '{}' (nothing to remove)", slot);
    }
    Ok(())
}
