//! location/scan — reconcile the in-memory state with the directory.
//!
//! One pass, under the disk lock:
//! 1) list the directory; every regular file ending in the slot suffix whose
//!    stem the name encoder can decode yields (slot, mtime). Entries whose
//!    metadata cannot be read (removed mid-listing, permissions) are skipped;
//! 2) swap in the fresh index and notify the listener once per created,
//!    modified or removed slot (after the swap);
//! 3) reload the persistent file if its mtime moved; decode failures keep the
//!    previous value;
//! 4) remove foreign temp files older than `stale_tmp_secs` (not when read-only).
//!
//! Если сам каталог не читается, индекс остаётся прежним: временный сбой
//! листинга не должен выглядеть как удаление всех слотов.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use super::Location;
use crate::consts::TMP_EXT;
use crate::index::SlotIndex;
use crate::metrics;
use crate::persistent::PersistentLoader;
use crate::util::mtime_of;

impl<L: PersistentLoader> Location<L> {
    /// Refresh the slot index and persistent cache. No-op when inactive.
    /// Never fails; safe to call from any thread, as often as wanted.
    pub fn scan(&self) {
        if !self.is_active() {
            return;
        }

        let _g = self.lock.lock();
        metrics::record_scan();

        if let Some((fresh, stale_tmps)) = self.list_directory() {
            let changes = self.index.lock().reconcile(fresh);
            if !changes.is_empty() {
                log::debug!(
                    "scan: {} slot change(s) in {}",
                    changes.len(),
                    self.directory.display()
                );
                metrics::record_slot_notifications(changes.len());
            }
            for change in &changes {
                self.listener.slot_changed(&change.slot);
            }
            self.sweep_tmp(stale_tmps);
        }

        self.refresh_persistent();
    }

    /// Fresh index + foreign temp files eligible for removal. None if the
    /// directory itself could not be listed.
    fn list_directory(&self) -> Option<(SlotIndex, Vec<PathBuf>)> {
        let rd = match fs::read_dir(&self.directory) {
            Ok(rd) => rd,
            Err(e) => {
                log::warn!(
                    "scan: cannot list {}: {} (index kept)",
                    self.directory.display(),
                    e
                );
                return None;
            }
        };

        let suffix = self.config.slot_suffix.as_str();
        let stale_age = self.config.stale_tmp_age();
        let now = SystemTime::now();

        let mut fresh = SlotIndex::new();
        let mut stale = Vec::new();

        for entry in rd {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    log::debug!("scan: skip unreadable entry: {}", e);
                    metrics::record_scan_skip();
                    continue;
                }
            };
            let file_name = entry.file_name();
            let name = match file_name.to_str() {
                Some(s) => s,
                None => continue, // не-UTF-8 имена не могут быть слотами
            };

            if let Some(stem) = name.strip_suffix(suffix) {
                if stem.is_empty() {
                    continue;
                }
                let slot = match self.encoder.decode(stem) {
                    Some(s) => s,
                    None => {
                        log::debug!("scan: skip {}: stem does not decode to a slot name", name);
                        metrics::record_scan_skip();
                        continue;
                    }
                };
                // как getmtime: по симлинку к целевому файлу
                let md = match fs::metadata(entry.path()) {
                    Ok(md) => md,
                    Err(e) => {
                        log::debug!("scan: skip {}: {}", name, e);
                        metrics::record_scan_skip();
                        continue;
                    }
                };
                if !md.is_file() {
                    continue;
                }
                match md.modified() {
                    Ok(mtime) => fresh.insert(slot, mtime),
                    Err(e) => {
                        log::debug!("scan: no mtime for {}: {}", name, e);
                        metrics::record_scan_skip();
                    }
                }
                continue;
            }

            if self.read_only {
                continue;
            }
            if let Some(age) = stale_age {
                if self.is_foreign_tmp(name) {
                    let path = entry.path();
                    let old_enough = mtime_of(&path)
                        .and_then(|m| now.duration_since(m).ok())
                        .map(|d| d >= age)
                        .unwrap_or(false);
                    if old_enough {
                        stale.push(path);
                    }
                }
            }
        }

        Some((fresh, stale))
    }

    /// Temp file left by another writer for one of our files.
    fn is_foreign_tmp(&self, name: &str) -> bool {
        if !name.ends_with(TMP_EXT) || name.ends_with(&self.tmp_suffix) {
            return false;
        }
        let slot_tmp = format!("{}.", self.config.slot_suffix);
        let persistent_tmp = format!("{}.", self.config.persistent_name);
        name.contains(&slot_tmp) || name.starts_with(&persistent_tmp)
    }

    fn sweep_tmp(&self, stale: Vec<PathBuf>) {
        for path in stale {
            match fs::remove_file(&path) {
                Ok(()) => {
                    log::debug!("scan: removed stale temp file {}", path.display());
                    metrics::record_stale_tmp_swept();
                }
                Err(e) => log::debug!("scan: cannot remove {}: {}", path.display(), e),
            }
        }
    }

    fn refresh_persistent(&self) {
        let mtime = match mtime_of(&self.persistent_path) {
            Some(m) => m,
            None => return,
        };
        if !self.persistent.lock().is_stale(mtime) {
            return;
        }

        let bytes = match fs::read(&self.persistent_path) {
            Ok(b) => b,
            Err(e) => {
                log::debug!(
                    "scan: cannot read {}: {}",
                    self.persistent_path.display(),
                    e
                );
                return;
            }
        };

        let mut cache = self.persistent.lock();
        match cache.refresh(&self.loader, mtime, &bytes) {
            Ok(true) => {
                log::debug!("scan: persistent reloaded from {}", self.persistent_path.display());
                metrics::record_persistent_reload();
            }
            Ok(false) => {}
            Err(e) => {
                log::warn!(
                    "scan: persistent {} failed to decode, keeping previous value: {:#}",
                    self.persistent_path.display(),
                    e
                );
                metrics::record_persistent_decode_failure();
            }
        }
    }
}
