//! Slot metadata as read from an archive, with legacy fallback.

use serde_json::{Map, Value};

use crate::archive::ArchiveReader;
use crate::consts::{LEGACY_SAVE_NAME_KEY, MEMBER_EXTRA_INFO, MEMBER_JSON};

/// Metadata of an existing slot. A slot that does not exist has no metadata
/// at all (`Option::None` at the store level), which is distinct from `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotMetadata {
    /// Archive has neither `json` nor `extra_info`.
    Empty,
    /// Legacy `extra_info` text (display name).
    LegacyName(String),
    /// Parsed `json` member. Usually an object, but any valid JSON document is
    /// kept as written.
    Structured(Value),
}

impl SlotMetadata {
    /// `json` wins over `extra_info`; a `json` member that does not parse
    /// falls through to the legacy member.
    pub fn from_archive(archive: &ArchiveReader) -> Self {
        match archive.read(MEMBER_JSON) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(value) => return SlotMetadata::Structured(value),
                Err(e) => log::debug!(
                    "json: member of {} does not parse: {}",
                    archive.path().display(),
                    e
                ),
            },
            Ok(None) => {}
            Err(e) => log::debug!("json: read failed for {}: {:#}", archive.path().display(), e),
        }

        if let Ok(Some(bytes)) = archive.read(MEMBER_EXTRA_INFO) {
            match String::from_utf8(bytes) {
                Ok(text) => return SlotMetadata::LegacyName(text),
                Err(_) => log::debug!(
                    "json: extra_info of {} is not UTF-8",
                    archive.path().display()
                ),
            }
        }

        SlotMetadata::Empty
    }

    /// Display name: legacy text, or the `_save_name` string of structured data.
    pub fn save_name(&self) -> Option<&str> {
        match self {
            SlotMetadata::Empty => None,
            SlotMetadata::LegacyName(s) => Some(s.as_str()),
            SlotMetadata::Structured(v) => v.get(LEGACY_SAVE_NAME_KEY).and_then(Value::as_str),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SlotMetadata::Empty)
    }

    /// JSON view: `{}`, `{"_save_name": text}` or the parsed document.
    pub fn to_json(&self) -> Value {
        match self {
            SlotMetadata::Empty => Value::Object(Map::new()),
            SlotMetadata::LegacyName(s) => {
                let mut map = Map::new();
                map.insert(LEGACY_SAVE_NAME_KEY.to_string(), Value::String(s.clone()));
                Value::Object(map)
            }
            SlotMetadata::Structured(v) => v.clone(),
        }
    }
}
