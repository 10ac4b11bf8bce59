//! location/slots — slot mutations: save, unlink, rename, copy.
//!
//! Each operation holds the disk lock for its filesystem work and re-runs
//! `scan()` (reentrant) before returning. Absent sources are silent no-ops.
//! On a read-only Location every mutation is an error.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;

use super::Location;
use crate::archive::SaveRecord;
use crate::metrics;
use crate::persistent::PersistentLoader;
use crate::util::{fsync_parent_dir, tmp_path_for, write_atomic};

impl<L: PersistentLoader> Location<L> {
    /// Write `record` as the archive of `slot`, replacing any existing one
    /// atomically (tmp + rename).
    pub fn save(&self, slot: &str, record: &SaveRecord) -> Result<()> {
        self.ensure_writable("save")?;
        let path = self.filename(slot);
        let _g = self.lock.lock();

        let bytes = record
            .to_archive_bytes()
            .with_context(|| format!("serialize slot '{}'", slot))?;
        write_atomic(&path, &bytes, self.config.fsync, &self.tmp_suffix)
            .with_context(|| format!("save slot '{}' to {}", slot, path.display()))?;
        metrics::record_save(bytes.len());
        log::debug!("save: slot '{}' ({} B) -> {}", slot, bytes.len(), path.display());

        self.scan();
        Ok(())
    }

    /// Delete the archive of `slot` if present.
    pub fn unlink(&self, slot: &str) -> Result<()> {
        self.ensure_writable("unlink")?;
        let path = self.filename(slot);
        let _g = self.lock.lock();

        match fs::remove_file(&path) {
            Ok(()) => {
                metrics::record_unlink();
                log::debug!("unlink: slot '{}'", slot);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("unlink {}", path.display()));
            }
        }

        self.scan();
        Ok(())
    }

    /// Move `old` to `new`, overwriting `new`. No-op when `old` does not exist.
    pub fn rename(&self, old: &str, new: &str) -> Result<()> {
        self.ensure_writable("rename")?;
        let old_path = self.filename(old);
        let new_path = self.filename(new);
        let _g = self.lock.lock();

        if !old_path.exists() || old_path == new_path {
            return Ok(());
        }

        match fs::remove_file(&new_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("remove {}", new_path.display()));
            }
        }

        fs::rename(&old_path, &new_path).with_context(|| {
            format!("rename {} -> {}", old_path.display(), new_path.display())
        })?;
        if self.config.fsync {
            let _ = fsync_parent_dir(&new_path);
        }
        metrics::record_rename();
        log::debug!("rename: slot '{}' -> '{}'", old, new);

        self.scan();
        Ok(())
    }

    /// Byte-copy `old` to `new`, overwriting `new`. No-op when `old` does not exist.
    pub fn copy(&self, old: &str, new: &str) -> Result<()> {
        self.ensure_writable("copy")?;
        let old_path = self.filename(old);
        let new_path = self.filename(new);
        let _g = self.lock.lock();

        if !old_path.exists() || old_path == new_path {
            return Ok(());
        }

        // Копия через tmp+rename: читатель никогда не увидит половину архива.
        let tmp = tmp_path_for(&new_path, &self.tmp_suffix);
        let res = fs::copy(&old_path, &tmp)
            .with_context(|| format!("copy {} -> {}", old_path.display(), tmp.display()))
            .and_then(|_| {
                fs::rename(&tmp, &new_path).with_context(|| {
                    format!("rename {} -> {}", tmp.display(), new_path.display())
                })
            });
        if let Err(e) = res {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        if self.config.fsync {
            let _ = fsync_parent_dir(&new_path);
        }
        metrics::record_copy();
        log::debug!("copy: slot '{}' -> '{}'", old, new);

        self.scan();
        Ok(())
    }
}
