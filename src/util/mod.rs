//! util — файловые хелперы, общие для слотов и persistent.
//!
//! Содержит:
//! - tmp_suffix(): суффикс временных файлов, уникальный на каждый вызов
//!   (launch secs + pid + счётчик); Location берёт свой при открытии.
//! - write_atomic(): tmp + (fsync) + rename + best-effort fsync каталога.
//! - mtime_of(): mtime файла или None (никогда не паникует).

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::consts::TMP_EXT;

static LAUNCH_SECS: OnceLock<u64> = OnceLock::new();
static NEXT_TMP_ID: AtomicU64 = AtomicU64::new(1);

/// ".<launch-secs>-<pid>-<n>.tmp"; every call yields a new `n`.
pub fn tmp_suffix() -> String {
    let secs = *LAUNCH_SECS.get_or_init(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    });
    let n = NEXT_TMP_ID.fetch_add(1, Ordering::Relaxed);
    format!(".{}-{}-{}{}", secs, std::process::id(), n, TMP_EXT)
}

/// Temp path used while replacing `target`.
pub fn tmp_path_for(target: &Path, suffix: &str) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    target.with_file_name(name)
}

/// Replace `target` with `bytes` via tmp+rename. The temp file is removed on failure.
pub fn write_atomic(target: &Path, bytes: &[u8], fsync: bool, suffix: &str) -> Result<()> {
    let tmp = tmp_path_for(target, suffix);
    let _ = fs::remove_file(&tmp); // best-effort: остаток прошлой попытки

    let res = (|| -> Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)
            .with_context(|| format!("open tmp {}", tmp.display()))?;
        f.write_all(bytes)
            .with_context(|| format!("write tmp {}", tmp.display()))?;
        if fsync {
            f.sync_all()
                .with_context(|| format!("fsync tmp {}", tmp.display()))?;
        }
        drop(f);
        fs::rename(&tmp, target)
            .with_context(|| format!("rename {} -> {}", tmp.display(), target.display()))?;
        Ok(())
    })();

    if res.is_err() {
        let _ = fs::remove_file(&tmp);
        return res;
    }

    if fsync {
        let _ = fsync_parent_dir(target);
    }
    Ok(())
}

/// Modification time, or None if the file vanished or is unreadable.
pub fn mtime_of(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Seconds since the Unix epoch as f64 (for display/JSON).
pub fn unix_secs_f64(t: SystemTime) -> f64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}

// Best-effort fsync parent directory after rename (Unix only).
#[cfg(unix)]
pub fn fsync_parent_dir(p: &Path) -> std::io::Result<()> {
    use std::fs::File;
    if let Some(parent) = p.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
    }
    Ok(())
}
#[cfg(not(unix))]
pub fn fsync_parent_dir(_p: &Path) -> std::io::Result<()> {
    Ok(())
}
