//! In-memory store for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde_json::Value;

use super::KeyValueStore;
use crate::error::{HockeyError, HockeyResult};

#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a store error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Raw lookup that bypasses failure injection.
    pub fn raw(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    fn check(&self) -> HockeyResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(HockeyError::StoreError("injected failure".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> HockeyResult<Option<Value>> {
        self.check()?;
        Ok(self.values.read().get(key).filter(|v| !v.is_null()).cloned())
    }

    fn set(&self, key: &str, value: Value) -> HockeyResult<()> {
        self.check()?;
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> HockeyResult<bool> {
        self.check()?;
        Ok(self.values.write().remove(key).is_some())
    }
}
