//! Test-only helpers shared across the workspace.
//!
//! Compiled for this crate's own tests and for dependents that enable the
//! `test-support` feature.

use std::env;
use std::sync::{Mutex, OnceLock};

/// Return the global lock used to serialize environment mutations in tests.
///
/// # Returns
/// A process-wide mutex; hold its guard for as long as any [`EnvGuard`] lives.
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

#[allow(unused_unsafe)]
fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: callers hold `env_lock` while test threads may run in parallel.
    unsafe {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}

/// Scoped override of one environment variable.
///
/// The previous value, or its absence, comes back when the guard drops.
pub struct EnvGuard {
    key: String,
    previous: Option<String>,
}

impl EnvGuard {
    /// Override `key` with `value`, or unset it when `value` is `None`.
    ///
    /// # Arguments
    /// - `key`: Environment variable name.
    /// - `value`: Replacement value; `None` removes the variable.
    ///
    /// # Returns
    /// Guard that undoes the override on drop.
    pub fn scoped(key: &str, value: Option<&str>) -> Self {
        let previous = env::var(key).ok();
        write_var(key, value);
        Self {
            key: key.to_string(),
            previous,
        }
    }

    pub fn set(key: &str, value: &str) -> Self {
        Self::scoped(key, Some(value))
    }

    pub fn remove(key: &str) -> Self {
        Self::scoped(key, None)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_var(&self.key, self.previous.as_deref());
    }
}
