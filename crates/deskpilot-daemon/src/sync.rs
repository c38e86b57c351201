use std::sync::Mutex;
use std::sync::MutexGuard;

use tracing::warn;

/// Locks `lock`, taking the inner value over if a previous holder panicked.
pub fn mutex_lock_or_recover<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(|poisoned| {
        warn!("Recovering from poisoned mutex");
        poisoned.into_inner()
    })
}
