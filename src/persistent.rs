//! Persistent record: decoder seam and the (mtime, value) cache.
//!
//! Политика кэша:
//! - значение заменяется только если файл существует, его mtime отличается от
//!   закэшированного и декодирование прошло успешно;
//! - неудачное декодирование оставляет прошлое значение (может быть устаревшим,
//!   но никогда не битым).

use anyhow::{Context, Result};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};
use std::time::SystemTime;

/// Turns raw persistent-file bytes into a value.
pub trait PersistentLoader: Send + Sync {
    type Value: Clone + Send + Sync;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Value>;
}

/// Default format: a zlib-compressed JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZlibJson;

impl ZlibJson {
    /// Bytes suitable for `Location::save_persistent`.
    pub fn encode(value: &serde_json::Value) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(value).context("serialize persistent json")?;
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&json).context("zlib compress persistent")?;
        enc.finish().context("zlib finish persistent")
    }
}

impl PersistentLoader for ZlibJson {
    type Value = serde_json::Value;

    fn decode(&self, bytes: &[u8]) -> Result<serde_json::Value> {
        let mut dec = ZlibDecoder::new(bytes);
        let mut json = Vec::new();
        dec.read_to_end(&mut json)
            .context("zlib decompress persistent")?;
        let value = serde_json::from_slice(&json).context("parse persistent json")?;
        Ok(value)
    }
}

/// Last successfully decoded persistent value and the mtime it was read at.
#[derive(Debug, Clone)]
pub struct PersistentCache<V> {
    mtime: Option<SystemTime>,
    value: Option<V>,
}

impl<V> Default for PersistentCache<V> {
    fn default() -> Self {
        Self {
            mtime: None,
            value: None,
        }
    }
}

impl<V: Clone> PersistentCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a file with `mtime` should be (re)decoded.
    pub fn is_stale(&self, mtime: SystemTime) -> bool {
        self.mtime != Some(mtime)
    }

    /// Record a successful decode.
    pub fn store(&mut self, mtime: SystemTime, value: V) {
        self.mtime = Some(mtime);
        self.value = Some(value);
    }

    pub fn mtime(&self) -> Option<SystemTime> {
        self.mtime
    }

    /// `[(mtime, value)]` when a value was ever loaded, else empty.
    pub fn entries(&self) -> Vec<(SystemTime, V)> {
        match (self.mtime, &self.value) {
            (Some(m), Some(v)) => vec![(m, v.clone())],
            _ => Vec::new(),
        }
    }

    /// Decode `bytes` read at `mtime`; on failure the cache is left as-is.
    pub fn refresh<L>(&mut self, loader: &L, mtime: SystemTime, bytes: &[u8]) -> Result<bool>
    where
        L: PersistentLoader<Value = V> + ?Sized,
    {
        if !self.is_stale(mtime) {
            return Ok(false);
        }
        let value = loader.decode(bytes)?;
        self.store(mtime, value);
        Ok(true)
    }
}
