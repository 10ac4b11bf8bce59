//! Slot index: slot name -> last observed mtime, and the diff between two
//! observations of the directory.
//!
//! Diff rules (by slot name):
//! - present now, absent before         -> changed (created)
//! - present in both, mtime differs     -> changed (modified, even if bytes equal)
//! - present before, absent now         -> changed (removed)
//! - present in both, same mtime        -> not reported

use std::collections::HashMap;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotChange {
    pub slot: String,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotIndex {
    mtimes: HashMap<String, SystemTime>,
}

impl SlotIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: String, mtime: SystemTime) {
        self.mtimes.insert(slot, mtime);
    }

    pub fn get(&self, slot: &str) -> Option<SystemTime> {
        self.mtimes.get(slot).copied()
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.mtimes.contains_key(slot)
    }

    pub fn len(&self) -> usize {
        self.mtimes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mtimes.is_empty()
    }

    /// Slot names in arbitrary order.
    pub fn names(&self) -> Vec<String> {
        self.mtimes.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SystemTime)> {
        self.mtimes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Changes that turn `self` into `fresh`. Each slot name appears at most once.
    pub fn diff(&self, fresh: &SlotIndex) -> Vec<SlotChange> {
        let mut out = Vec::new();

        for (slot, mtime) in &fresh.mtimes {
            match self.mtimes.get(slot) {
                None => out.push(SlotChange {
                    slot: slot.clone(),
                    kind: ChangeKind::Created,
                }),
                Some(old) if old != mtime => out.push(SlotChange {
                    slot: slot.clone(),
                    kind: ChangeKind::Modified,
                }),
                Some(_) => {}
            }
        }

        for slot in self.mtimes.keys() {
            if !fresh.mtimes.contains_key(slot) {
                out.push(SlotChange {
                    slot: slot.clone(),
                    kind: ChangeKind::Removed,
                });
            }
        }

        out
    }

    /// Replace contents with `fresh`, returning what changed.
    pub fn reconcile(&mut self, fresh: SlotIndex) -> Vec<SlotChange> {
        let changes = self.diff(&fresh);
        *self = fresh;
        changes
    }
}

impl FromIterator<(String, SystemTime)> for SlotIndex {
    fn from_iter<I: IntoIterator<Item = (String, SystemTime)>>(iter: I) -> Self {
        Self {
            mtimes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn t(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn idx(items: &[(&str, u64)]) -> SlotIndex {
        items.iter().map(|(s, m)| (s.to_string(), t(*m))).collect()
    }

    fn kinds(changes: &[SlotChange], slot: &str) -> Vec<ChangeKind> {
        changes
            .iter()
            .filter(|c| c.slot == slot)
            .map(|c| c.kind)
            .collect()
    }

    #[test]
    fn created_detected() {
        let changes = idx(&[]).diff(&idx(&[("1-1", 10)]));
        assert_eq!(changes.len(), 1);
        assert_eq!(kinds(&changes, "1-1"), vec![ChangeKind::Created]);
    }

    #[test]
    fn removed_detected() {
        let changes = idx(&[("1-1", 10)]).diff(&idx(&[]));
        assert_eq!(kinds(&changes, "1-1"), vec![ChangeKind::Removed]);
    }

    #[test]
    fn modified_detected() {
        let changes = idx(&[("1-1", 10)]).diff(&idx(&[("1-1", 11)]));
        assert_eq!(kinds(&changes, "1-1"), vec![ChangeKind::Modified]);
    }

    #[test]
    fn older_mtime_is_still_a_change() {
        let changes = idx(&[("auto-1", 50)]).diff(&idx(&[("auto-1", 40)]));
        assert_eq!(kinds(&changes, "auto-1"), vec![ChangeKind::Modified]);
    }

    #[test]
    fn unchanged_not_reported() {
        let changes = idx(&[("1-1", 10), ("1-2", 20)]).diff(&idx(&[("1-1", 10), ("1-2", 20)]));
        assert!(changes.is_empty());
    }

    #[test]
    fn mixed_changes_each_once() {
        let old = idx(&[("a", 1), ("b", 2), ("c", 3)]);
        let new = idx(&[("a", 1), ("b", 5), ("d", 4)]);
        let changes = old.diff(&new);
        assert_eq!(changes.len(), 3);
        assert_eq!(kinds(&changes, "b"), vec![ChangeKind::Modified]);
        assert_eq!(kinds(&changes, "c"), vec![ChangeKind::Removed]);
        assert_eq!(kinds(&changes, "d"), vec![ChangeKind::Created]);
        assert!(kinds(&changes, "a").is_empty());
    }

    #[test]
    fn reconcile_replaces_contents() {
        let mut cur = idx(&[("a", 1)]);
        let changes = cur.reconcile(idx(&[("b", 2)]));
        assert_eq!(changes.len(), 2);
        assert!(!cur.contains("a"));
        assert_eq!(cur.get("b"), Some(t(2)));
        assert!(cur.reconcile(idx(&[("b", 2)])).is_empty());
    }
}
