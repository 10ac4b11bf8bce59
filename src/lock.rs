//! In-process disk lock.
//!
//! One reentrant mutex serializes every filesystem and archive operation of a
//! Location. Reentrant because mutations call `scan()` while already holding it.
//!
//! The lock is a value owned by the store (cloned handles share one mutex), so
//! independent stores do not serialize against each other unless they are
//! handed the same DiskLock.
//!
//! Lock is released on Drop of the guard.

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct DiskLock {
    inner: Arc<ReentrantMutex<()>>,
}

pub struct DiskGuard<'a> {
    _guard: ReentrantMutexGuard<'a, ()>,
}

impl DiskLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until acquired. Re-acquiring on the same thread does not deadlock.
    pub fn lock(&self) -> DiskGuard<'_> {
        DiskGuard {
            _guard: self.inner.lock(),
        }
    }

    /// Returns None if another thread holds the lock.
    pub fn try_lock(&self) -> Option<DiskGuard<'_>> {
        self.inner.try_lock().map(|g| DiskGuard { _guard: g })
    }

    /// True when both handles guard the same mutex.
    pub fn shares_with(&self, other: &DiskLock) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for DiskLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskLock")
            .field("locked", &self.inner.is_locked())
            .finish()
    }
}
