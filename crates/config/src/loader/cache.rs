//! Process-wide cache of the merged configuration.
//!
//! Invariants:
//! - The slot is written at most once between resets.
//! - The lock is held across check, compute and store, so concurrent loads
//!   compute the tree exactly once.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::tree::ConfigTree;

/// Single slot holding the last merged configuration.
#[derive(Debug, Default)]
pub struct ConfigCache {
    slot: Mutex<Option<Arc<ConfigTree>>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by every load that does not name its own.
    pub fn global() -> Arc<ConfigCache> {
        static GLOBAL: OnceLock<Arc<ConfigCache>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(ConfigCache::new())).clone()
    }

    /// The cached configuration, if a load already completed.
    pub fn get(&self) -> Option<Arc<ConfigTree>> {
        self.lock().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// Clear the slot so the next load recomputes. Intended for tests.
    pub fn reset(&self) {
        *self.lock() = None;
    }

    /// Return the cached tree, or compute, store and return a new one.
    ///
    /// `on_hit` runs when the cached value is returned. A failing `compute`
    /// leaves the slot empty.
    pub(crate) fn get_or_try_init<E>(
        &self,
        on_hit: impl FnOnce(),
        compute: impl FnOnce() -> Result<ConfigTree, E>,
    ) -> Result<Arc<ConfigTree>, E> {
        let mut slot = self.lock();
        if let Some(cached) = slot.as_ref() {
            on_hit();
            return Ok(cached.clone());
        }

        let computed = Arc::new(compute()?);
        *slot = Some(computed.clone());
        Ok(computed)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<ConfigTree>>> {
        // The slot only ever holds a complete value, so a poisoned lock is still usable.
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
