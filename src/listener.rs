//! Change notification seam between the scanner and slot caches.
//!
//! Notes:
//! - Callbacks run synchronously on the scanning thread, with the disk lock
//!   held and after the slot index has been replaced, so a listener that calls
//!   back into the store (mtime/json/screenshot/scan) sees the new state.
//! - Keep callbacks fast; if you need heavy work, hand it to another thread.

use std::sync::Arc;

/// Receives the name of every slot observed created, modified or removed.
pub trait ChangeListener: Send + Sync {
    fn slot_changed(&self, slot: &str);
}

/// Ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl ChangeListener for NoopListener {
    fn slot_changed(&self, _slot: &str) {}
}

impl<F> ChangeListener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn slot_changed(&self, slot: &str) {
        self(slot)
    }
}

/// Shared listener handle as stored by the Location.
pub type SharedListener = Arc<dyn ChangeListener>;

/// Maps slot names to the file-name stem used on disk and back.
///
/// `decode(encode(s)) == Some(s)` must hold for every slot name; the scanner
/// keys the index by decoded names. Stems that do not decode (None) are not
/// slots.
pub trait SlotNameEncoder: Send + Sync {
    fn encode(&self, slot: &str) -> String;

    fn decode(&self, stem: &str) -> Option<String>;
}

/// Slot names are used verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNames;

impl SlotNameEncoder for PlainNames {
    fn encode(&self, slot: &str) -> String {
        slot.to_string()
    }

    fn decode(&self, stem: &str) -> Option<String> {
        Some(stem.to_string())
    }
}
