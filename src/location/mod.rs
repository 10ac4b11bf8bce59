//! location — directory-backed save location (high-level API).
//!
//! A Location owns:
//! - the save directory path and the active flag (inactive => scan and
//!   persistent writes are no-ops; set when the directory is not writable);
//! - the slot index (slot name -> mtime), rebuilt only by `scan()`;
//! - the persistent cache (mtime + decoded value), refreshed only by `scan()`;
//! - a DiskLock serializing every filesystem/archive access it performs;
//! - its own temp-file suffix, so two Locations on one directory never share
//!   a temp path;
//! - a read-only flag: no write probe, no temp sweep, mutations fail.
//!
//! Layout on disk: `<dir>/<encoded slot><suffix>` archives plus one
//! `<dir>/<persistent_name>` file, all siblings.
//!
//! Mutations (save/unlink/rename/copy) take the lock, touch the disk and then
//! re-run `scan()` before returning, so callers always observe a consistent
//! index and downstream caches get their notifications.

mod open;
mod persistent;
mod read;
mod scan;
mod slots;

pub use open::LocationBuilder;

use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::index::SlotIndex;
use crate::listener::{SharedListener, SlotNameEncoder};
use crate::lock::DiskLock;
use crate::persistent::{PersistentCache, PersistentLoader, ZlibJson};

pub struct Location<L: PersistentLoader = ZlibJson> {
    directory: PathBuf,
    persistent_path: PathBuf,
    config: StoreConfig,
    active: AtomicBool,
    read_only: bool,
    tmp_suffix: String,
    lock: DiskLock,
    listener: SharedListener,
    encoder: Arc<dyn SlotNameEncoder>,
    loader: L,
    index: Mutex<SlotIndex>,
    persistent: Mutex<PersistentCache<L::Value>>,
}

impl Location<ZlibJson> {
    /// Builder with env config, a private lock, no listener, plain names and
    /// the zlib+JSON persistent format.
    pub fn builder<P: AsRef<Path>>(directory: P) -> LocationBuilder<ZlibJson> {
        LocationBuilder::new(directory)
    }

    /// Shortcut for `Location::builder(dir).open()`.
    pub fn open<P: AsRef<Path>>(directory: P) -> anyhow::Result<Self> {
        Self::builder(directory).open()
    }
}

impl<L: PersistentLoader> Location<L> {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn disk_lock(&self) -> &DiskLock {
        &self.lock
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Suffix appended to a target's file name while it is being replaced.
    pub fn tmp_suffix(&self) -> &str {
        &self.tmp_suffix
    }

    pub(crate) fn ensure_writable(&self, op: &str) -> anyhow::Result<()> {
        if self.read_only {
            return Err(anyhow::anyhow!(
                "{}: location {} is opened read-only",
                op,
                self.directory.display()
            ));
        }
        Ok(())
    }

    pub fn set_active(&self, on: bool) {
        let was = self.active.swap(on, Ordering::AcqRel);
        if was != on {
            log::info!(
                "location {}: active {} -> {}",
                self.directory.display(),
                was,
                on
            );
        }
    }

    /// Archive path of `slot` (whether or not it exists).
    pub fn filename(&self, slot: &str) -> PathBuf {
        let mut name = self.encoder.encode(slot);
        name.push_str(&self.config.slot_suffix);
        self.directory.join(name)
    }

    pub fn persistent_path(&self) -> &Path {
        &self.persistent_path
    }
}

impl<L: PersistentLoader> PartialEq for Location<L> {
    fn eq(&self, other: &Self) -> bool {
        self.directory == other.directory
    }
}

impl<L: PersistentLoader> Eq for Location<L> {}

impl<L: PersistentLoader> std::fmt::Debug for Location<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Location")
            .field("directory", &self.directory)
            .field("active", &self.is_active())
            .field("read_only", &self.read_only)
            .field("slots", &self.index.lock().len())
            .finish()
    }
}
