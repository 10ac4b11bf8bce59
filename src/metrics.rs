//! Lightweight global metrics for the slot store.
//!
//! Потокобезопасные атомарные счётчики:
//! - Scan (проходы, уведомления об изменениях, подчистка tmp)
//! - Slots (save/load/unlink/rename/copy)
//! - Persistent (перезагрузки, ошибки декодирования, записи)

use std::sync::atomic::{AtomicU64, Ordering};

// ----- Scan -----
static SCANS_TOTAL: AtomicU64 = AtomicU64::new(0);
static SCAN_ENTRIES_SKIPPED: AtomicU64 = AtomicU64::new(0);
static SLOT_NOTIFICATIONS: AtomicU64 = AtomicU64::new(0);
static STALE_TMP_SWEPT: AtomicU64 = AtomicU64::new(0);

// ----- Slots -----
static SLOT_SAVES: AtomicU64 = AtomicU64::new(0);
static SLOT_SAVE_BYTES: AtomicU64 = AtomicU64::new(0);
static SLOT_LOADS: AtomicU64 = AtomicU64::new(0);
static SLOT_UNLINKS: AtomicU64 = AtomicU64::new(0);
static SLOT_RENAMES: AtomicU64 = AtomicU64::new(0);
static SLOT_COPIES: AtomicU64 = AtomicU64::new(0);

// ----- Persistent -----
static PERSISTENT_RELOADS: AtomicU64 = AtomicU64::new(0);
static PERSISTENT_DECODE_FAILURES: AtomicU64 = AtomicU64::new(0);
static PERSISTENT_WRITES: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MetricsSnapshot {
    pub scans_total: u64,
    pub scan_entries_skipped: u64,
    pub slot_notifications: u64,
    pub stale_tmp_swept: u64,

    pub slot_saves: u64,
    pub slot_save_bytes: u64,
    pub slot_loads: u64,
    pub slot_unlinks: u64,
    pub slot_renames: u64,
    pub slot_copies: u64,

    pub persistent_reloads: u64,
    pub persistent_decode_failures: u64,
    pub persistent_writes: u64,
}

impl MetricsSnapshot {
    pub fn avg_save_bytes(&self) -> f64 {
        if self.slot_saves == 0 {
            0.0
        } else {
            self.slot_save_bytes as f64 / self.slot_saves as f64
        }
    }
}

// ----- Recorders (Scan) -----
pub fn record_scan() {
    SCANS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub fn record_scan_skip() {
    SCAN_ENTRIES_SKIPPED.fetch_add(1, Ordering::Relaxed);
}

pub fn record_slot_notifications(n: usize) {
    SLOT_NOTIFICATIONS.fetch_add(n as u64, Ordering::Relaxed);
}

pub fn record_stale_tmp_swept() {
    STALE_TMP_SWEPT.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Slots) -----
pub fn record_save(bytes: usize) {
    SLOT_SAVES.fetch_add(1, Ordering::Relaxed);
    SLOT_SAVE_BYTES.fetch_add(bytes as u64, Ordering::Relaxed);
}

pub fn record_load() {
    SLOT_LOADS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_unlink() {
    SLOT_UNLINKS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_rename() {
    SLOT_RENAMES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_copy() {
    SLOT_COPIES.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Persistent) -----
pub fn record_persistent_reload() {
    PERSISTENT_RELOADS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_persistent_decode_failure() {
    PERSISTENT_DECODE_FAILURES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_persistent_write() {
    PERSISTENT_WRITES.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        scans_total: SCANS_TOTAL.load(Ordering::Relaxed),
        scan_entries_skipped: SCAN_ENTRIES_SKIPPED.load(Ordering::Relaxed),
        slot_notifications: SLOT_NOTIFICATIONS.load(Ordering::Relaxed),
        stale_tmp_swept: STALE_TMP_SWEPT.load(Ordering::Relaxed),

        slot_saves: SLOT_SAVES.load(Ordering::Relaxed),
        slot_save_bytes: SLOT_SAVE_BYTES.load(Ordering::Relaxed),
        slot_loads: SLOT_LOADS.load(Ordering::Relaxed),
        slot_unlinks: SLOT_UNLINKS.load(Ordering::Relaxed),
        slot_renames: SLOT_RENAMES.load(Ordering::Relaxed),
        slot_copies: SLOT_COPIES.load(Ordering::Relaxed),

        persistent_reloads: PERSISTENT_RELOADS.load(Ordering::Relaxed),
        persistent_decode_failures: PERSISTENT_DECODE_FAILURES.load(Ordering::Relaxed),
        persistent_writes: PERSISTENT_WRITES.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    SCANS_TOTAL.store(0, Ordering::Relaxed);
    SCAN_ENTRIES_SKIPPED.store(0, Ordering::Relaxed);
    SLOT_NOTIFICATIONS.store(0, Ordering::Relaxed);
    STALE_TMP_SWEPT.store(0, Ordering::Relaxed);

    SLOT_SAVES.store(0, Ordering::Relaxed);
    SLOT_SAVE_BYTES.store(0, Ordering::Relaxed);
    SLOT_LOADS.store(0, Ordering::Relaxed);
    SLOT_UNLINKS.store(0, Ordering::Relaxed);
    SLOT_RENAMES.store(0, Ordering::Relaxed);
    SLOT_COPIES.store(0, Ordering::Relaxed);

    PERSISTENT_RELOADS.store(0, Ordering::Relaxed);
    PERSISTENT_DECODE_FAILURES.store(0, Ordering::Relaxed);
    PERSISTENT_WRITES.store(0, Ordering::Relaxed);
}
