//! location/open — builder and construction of a Location.
//!
//! open():
//! - validates the config (bad suffix/persistent name is the only hard error);
//! - creates the directory and probes writability; on failure the Location is
//!   built inactive instead of failing;
//! - read-only: nothing is created or probed, a missing directory gives an
//!   inactive Location;
//! - runs one scan before returning.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::Location;
use crate::config::StoreConfig;
use crate::consts::WRITE_PROBE_FILE;
use crate::index::SlotIndex;
use crate::listener::{ChangeListener, NoopListener, PlainNames, SharedListener, SlotNameEncoder};
use crate::lock::DiskLock;
use crate::persistent::{PersistentCache, PersistentLoader, ZlibJson};
use crate::util::tmp_suffix;

pub struct LocationBuilder<L: PersistentLoader = ZlibJson> {
    directory: PathBuf,
    config: StoreConfig,
    lock: Option<DiskLock>,
    listener: SharedListener,
    encoder: Arc<dyn SlotNameEncoder>,
    loader: L,
    read_only: bool,
}

impl LocationBuilder<ZlibJson> {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            config: StoreConfig::from_env(),
            lock: None,
            listener: Arc::new(NoopListener),
            encoder: Arc::new(PlainNames),
            loader: ZlibJson,
            read_only: false,
        }
    }
}

impl<L: PersistentLoader> LocationBuilder<L> {
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Share a lock with other stores (default: a private one).
    pub fn disk_lock(mut self, lock: DiskLock) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Inspect without touching the directory (CLI read commands).
    pub fn read_only(mut self, on: bool) -> Self {
        self.read_only = on;
        self
    }

    pub fn listener<C: ChangeListener + 'static>(mut self, listener: C) -> Self {
        self.listener = Arc::new(listener);
        self
    }

    pub fn shared_listener(mut self, listener: SharedListener) -> Self {
        self.listener = listener;
        self
    }

    pub fn encoder<E: SlotNameEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Arc::new(encoder);
        self
    }

    /// Swap the persistent decoder (and thus the persistent value type).
    pub fn loader<M: PersistentLoader>(self, loader: M) -> LocationBuilder<M> {
        LocationBuilder {
            directory: self.directory,
            config: self.config,
            lock: self.lock,
            listener: self.listener,
            encoder: self.encoder,
            loader,
            read_only: self.read_only,
        }
    }

    pub fn open(self) -> Result<Location<L>> {
        self.config
            .validate()
            .with_context(|| format!("invalid config for {}", self.directory.display()))?;

        let active = if self.read_only {
            let present = self.directory.is_dir();
            if !present {
                log::info!(
                    "location {}: no such directory, opening inactive",
                    self.directory.display()
                );
            }
            present
        } else {
            match probe_writable(&self.directory) {
                Ok(()) => true,
                Err(e) => {
                    log::info!(
                        "location {}: not writable, opening inactive: {:#}",
                        self.directory.display(),
                        e
                    );
                    false
                }
            }
        };

        let persistent_path = self.directory.join(&self.config.persistent_name);
        let loc = Location {
            directory: self.directory,
            persistent_path,
            config: self.config,
            active: AtomicBool::new(active),
            read_only: self.read_only,
            tmp_suffix: tmp_suffix(),
            lock: self.lock.unwrap_or_default(),
            listener: self.listener,
            encoder: self.encoder,
            loader: self.loader,
            index: Mutex::new(SlotIndex::new()),
            persistent: Mutex::new(PersistentCache::new()),
        };

        log::info!("location open: {} ({})", loc.directory.display(), loc.config);
        loc.scan();
        Ok(loc)
    }
}

fn probe_writable(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let probe = dir.join(WRITE_PROBE_FILE);
    fs::write(&probe, b"ok").with_context(|| format!("write probe {}", probe.display()))?;
    fs::remove_file(&probe).with_context(|| format!("remove probe {}", probe.display()))?;
    Ok(())
}
