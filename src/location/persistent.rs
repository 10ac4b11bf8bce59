//! location/persistent — access to the shared persistent record.

use anyhow::{Context, Result};
use std::time::SystemTime;

use super::Location;
use crate::metrics;
use crate::persistent::PersistentLoader;
use crate::util::write_atomic;

impl<L: PersistentLoader> Location<L> {
    /// `[(mtime, value)]` from the last successful reload, or empty. Never
    /// touches the disk; reloading happens in `scan()`.
    pub fn load_persistent(&self) -> Vec<(SystemTime, L::Value)> {
        self.persistent.lock().entries()
    }

    /// Replace the persistent file with `data`. No-op when inactive, error when
    /// read-only. The cache is not updated here; the next `scan()` picks the
    /// new file up.
    pub fn save_persistent(&self, data: &[u8]) -> Result<()> {
        self.ensure_writable("save_persistent")?;
        let _g = self.lock.lock();

        if !self.is_active() {
            return Ok(());
        }

        write_atomic(&self.persistent_path, data, self.config.fsync, &self.tmp_suffix)
            .with_context(|| format!("save persistent {}", self.persistent_path.display()))?;
        metrics::record_persistent_write();
        Ok(())
    }
}
