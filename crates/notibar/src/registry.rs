//! Keyed store for pre-registered bars.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::bar::BarSpec;

/// Lookup table letting callers register a bar under an id and show it
/// later by id. Purely storage; no scheduling logic.
#[derive(Debug, Default)]
pub struct BarStore {
    inner: Mutex<HashMap<u32, BarSpec>>,
}

impl BarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a bar under `store_id`, overwriting any previous bar with
    /// the same id.
    pub fn put(&self, spec: &BarSpec, store_id: u32) {
        self.inner
            .lock()
            .expect("bar store lock poisoned")
            .insert(store_id, spec.clone());
    }

    /// Retrieve a copy of the bar stored under `store_id`.
    pub fn get(&self, store_id: u32) -> Option<BarSpec> {
        self.inner
            .lock()
            .expect("bar store lock poisoned")
            .get(&store_id)
            .cloned()
    }
}
