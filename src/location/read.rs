//! location/read — read paths. None of these rescan.

use anyhow::{Context, Result};
use std::time::SystemTime;

use super::Location;
use crate::archive::ArchiveReader;
use crate::consts::{MEMBER_LOG, SCREENSHOT_MEMBERS};
use crate::metadata::SlotMetadata;
use crate::metrics;
use crate::persistent::PersistentLoader;
use crate::screenshot::ScreenshotRef;

impl<L: PersistentLoader> Location<L> {
    /// Slot names from the last scan, arbitrary order.
    pub fn list(&self) -> Vec<String> {
        self.index.lock().names()
    }

    /// (slot, mtime) pairs from the last scan, arbitrary order.
    pub fn slots(&self) -> Vec<(String, SystemTime)> {
        self.index
            .lock()
            .iter()
            .map(|(s, m)| (s.to_string(), m))
            .collect()
    }

    /// mtime recorded by the last scan; None means the slot is empty.
    pub fn mtime(&self, slot: &str) -> Option<SystemTime> {
        self.index.lock().get(slot)
    }

    /// Raw `log` member of the slot archive. A missing archive or member is an
    /// error: callers are expected to check `mtime`/`list` first.
    pub fn load(&self, slot: &str) -> Result<Vec<u8>> {
        let path = self.filename(slot);
        let _g = self.lock.lock();

        let archive =
            ArchiveReader::open(&path).with_context(|| format!("load slot '{}'", slot))?;
        let log = archive
            .read_required(MEMBER_LOG)
            .with_context(|| format!("load slot '{}'", slot))?;
        metrics::record_load();
        Ok(log)
    }

    /// Metadata of `slot`, or None when its archive cannot be opened.
    pub fn json(&self, slot: &str) -> Option<SlotMetadata> {
        let path = self.filename(slot);
        let _g = self.lock.lock();

        match ArchiveReader::open(&path) {
            Ok(archive) => Some(SlotMetadata::from_archive(&archive)),
            Err(e) => {
                log::debug!("json: slot '{}' unavailable: {:#}", slot, e);
                None
            }
        }
    }

    /// Lazy handle to the slot screenshot (tga probed before png). None when
    /// the slot is unknown to the index, its archive cannot be opened or it has
    /// no screenshot member.
    pub fn screenshot(&self, slot: &str) -> Option<ScreenshotRef> {
        let _g = self.lock.lock();

        let mtime = self.mtime(slot)?;
        let path = self.filename(slot);
        let archive = match ArchiveReader::open(&path) {
            Ok(a) => a,
            Err(e) => {
                log::debug!("screenshot: slot '{}' unavailable: {:#}", slot, e);
                return None;
            }
        };

        let member = archive.probe(&SCREENSHOT_MEMBERS)?;
        Some(ScreenshotRef::new(&path, member, mtime))
    }
}
