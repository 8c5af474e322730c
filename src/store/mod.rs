//! Key-value store collaborator.
//!
//! Persistence is delegated to `tauri-plugin-store`; the rest of the crate
//! only sees the `KeyValueStore` trait so the window manager and IPC bridge
//! can be exercised against an in-memory store.

#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use serde_json::Value;
use tauri::{AppHandle, Runtime, Wry};
use tauri_plugin_store::{Store, StoreExt};

use crate::error::{HockeyError, HockeyResult};

/// Last persisted window rectangle.
pub const WINDOW_BOUNDS_KEY: &str = "windowBounds";

/// Third-party API access token.
pub const GITHUB_TOKEN_KEY: &str = "githubToken";

/// String-keyed persistent storage.
///
/// A stored JSON `null` reads back as absent.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> HockeyResult<Option<Value>>;

    fn set(&self, key: &str, value: Value) -> HockeyResult<()>;

    /// Returns whether the key existed.
    fn delete(&self, key: &str) -> HockeyResult<bool>;
}

/// `tauri-plugin-store` backed store, flushed to disk after every mutation.
pub struct TauriStore<R: Runtime = Wry> {
    inner: Arc<Store<R>>,
}

impl<R: Runtime> TauriStore<R> {
    pub fn open(app: &AppHandle<R>, file: &str) -> HockeyResult<Self> {
        let inner = app
            .store(file)
            .map_err(|e| HockeyError::StoreError(format!("Failed to open {}: {}", file, e)))?;
        log::info!("[STORE] Opened {}", file);
        Ok(Self { inner })
    }

    fn flush(&self) -> HockeyResult<()> {
        self.inner
            .save()
            .map_err(|e| HockeyError::StoreError(format!("Failed to save store: {}", e)))
    }
}

impl<R: Runtime> KeyValueStore for TauriStore<R> {
    fn get(&self, key: &str) -> HockeyResult<Option<Value>> {
        Ok(self.inner.get(key).filter(|v| !v.is_null()))
    }

    fn set(&self, key: &str, value: Value) -> HockeyResult<()> {
        self.inner.set(key, value);
        self.flush()
    }

    fn delete(&self, key: &str) -> HockeyResult<bool> {
        let existed = self.inner.delete(key);
        self.flush()?;
        Ok(existed)
    }
}
