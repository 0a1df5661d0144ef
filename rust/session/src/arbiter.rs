use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Per-game mutual exclusion for the buzz race: one mutex per join code,
/// created lazily on first use and retained for the life of the process.
/// Sessions are few and short-lived relative to the process, so the registry
/// never needs expiry.
#[derive(Debug, Default)]
pub struct BuzzArbiter {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl BuzzArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock serializing buzz registration for `code`. The mutex guards no
    /// data of its own, so a poisoned entry is recovered, not propagated.
    pub fn lock_for(&self, code: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(locks.entry(code.to_string()).or_default())
    }
}
