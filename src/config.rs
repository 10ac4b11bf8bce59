//! Centralized configuration for a slot store.
//!
//! Goals:
//! - Single place to collect tunables instead of scattering env lookups.
//! - StoreConfig::from_env() reads SLOTSTORE_* variables on top of the defaults.
//! - Fluent `with_*` setters for tests and embedding code.
//!
//! Env:
//! - SLOTSTORE_SUFFIX          — slot file suffix (default "-LT1.save")
//! - SLOTSTORE_PERSISTENT      — persistent file name (default "persistent")
//! - SLOTSTORE_FSYNC           — fsync temp files + directory on replace (default true)
//! - SLOTSTORE_STALE_TMP_SECS  — age of foreign temp files swept by scan (default 3600, 0=off)

use anyhow::{anyhow, Result};
use std::fmt;
use std::time::Duration;

use crate::consts::{DEFAULT_PERSISTENT_FILE, DEFAULT_SLOT_SUFFIX, DEFAULT_STALE_TMP_SECS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Suffix appended to the encoded slot name to form the archive file name.
    /// Env: SLOTSTORE_SUFFIX
    pub slot_suffix: String,

    /// File name of the persistent record, sibling of the slot archives.
    /// Env: SLOTSTORE_PERSISTENT
    pub persistent_name: String,

    /// fsync temp files before rename and the directory after it.
    /// Env: SLOTSTORE_FSYNC = 0|1|true|false|on|off|yes|no
    pub fsync: bool,

    /// Foreign temp files older than this are removed by scan. 0 disables the sweep.
    /// Env: SLOTSTORE_STALE_TMP_SECS
    pub stale_tmp_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_suffix: DEFAULT_SLOT_SUFFIX.to_string(),
            persistent_name: DEFAULT_PERSISTENT_FILE.to_string(),
            fsync: true,
            stale_tmp_secs: DEFAULT_STALE_TMP_SECS,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl StoreConfig {
    /// Defaults overridden by SLOTSTORE_* env vars. Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SLOTSTORE_SUFFIX") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.slot_suffix = s.to_string();
            }
        }

        if let Ok(v) = std::env::var("SLOTSTORE_PERSISTENT") {
            let s = v.trim();
            if !s.is_empty() {
                cfg.persistent_name = s.to_string();
            }
        }

        if let Ok(v) = std::env::var("SLOTSTORE_FSYNC") {
            if let Some(on) = parse_flag(&v) {
                cfg.fsync = on;
            }
        }

        if let Ok(v) = std::env::var("SLOTSTORE_STALE_TMP_SECS") {
            if let Ok(n) = v.trim().parse::<u64>() {
                cfg.stale_tmp_secs = n;
            }
        }

        cfg
    }

    pub fn with_slot_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.slot_suffix = suffix.into();
        self
    }

    pub fn with_persistent_name<S: Into<String>>(mut self, name: S) -> Self {
        self.persistent_name = name.into();
        self
    }

    pub fn with_fsync(mut self, on: bool) -> Self {
        self.fsync = on;
        self
    }

    pub fn with_stale_tmp_secs(mut self, secs: u64) -> Self {
        self.stale_tmp_secs = secs;
        self
    }

    /// None when the sweep is disabled.
    pub fn stale_tmp_age(&self) -> Option<Duration> {
        if self.stale_tmp_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.stale_tmp_secs))
        }
    }

    /// Rejects configs that would make the directory listing ambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.slot_suffix.is_empty() {
            return Err(anyhow!("slot_suffix must not be empty"));
        }
        if self.persistent_name.is_empty() {
            return Err(anyhow!("persistent_name must not be empty"));
        }
        if self.persistent_name.ends_with(&self.slot_suffix) {
            return Err(anyhow!(
                "persistent_name '{}' must not end with slot_suffix '{}'",
                self.persistent_name,
                self.slot_suffix
            ));
        }
        if self.slot_suffix.contains('/') || self.persistent_name.contains('/') {
            return Err(anyhow!("slot_suffix/persistent_name must not contain '/'"));
        }
        Ok(())
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreConfig {{ slot_suffix: {:?}, persistent_name: {:?}, fsync: {}, stale_tmp_secs: {} }}",
            self.slot_suffix,
            self.persistent_name,
            self.fsync,
            if self.stale_tmp_secs == 0 {
                "off".to_string()
            } else {
                self.stale_tmp_secs.to_string()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.slot_suffix, "-LT1.save");
        assert_eq!(cfg.persistent_name, "persistent");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.stale_tmp_age(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn flag_parsing() {
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn validate_rejects_bad_names() {
        assert!(StoreConfig::default().with_slot_suffix("").validate().is_err());
        assert!(StoreConfig::default()
            .with_persistent_name("x-LT1.save")
            .validate()
            .is_err());
        assert!(StoreConfig::default()
            .with_slot_suffix("a/b")
            .validate()
            .is_err());
    }

    #[test]
    fn zero_disables_sweep() {
        let cfg = StoreConfig::default().with_stale_tmp_secs(0);
        assert_eq!(cfg.stale_tmp_age(), None);
        assert!(cfg.to_string().contains("stale_tmp_secs: off"));
    }
}
