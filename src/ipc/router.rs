//! Named-channel request/response routing.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use super::reply::{IpcArgs, Reply};
use crate::error::{HockeyError, HockeyResult};

pub type Handler = Arc<dyn Fn(&IpcArgs) -> Reply + Send + Sync>;

#[derive(Default)]
pub struct IpcRouter {
    handlers: RwLock<HashMap<String, Handler>>,
}

impl IpcRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any existing one for the channel.
    pub fn register<F>(&self, channel: &str, handler: F)
    where
        F: Fn(&IpcArgs) -> Reply + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write();
        if handlers.remove(channel).is_some() {
            log::debug!("[IPC] Removed existing handler for {}", channel);
        }
        handlers.insert(channel.to_string(), Arc::new(handler));
    }

    pub fn remove(&self, channel: &str) -> bool {
        self.handlers.write().remove(channel).is_some()
    }

    #[cfg(test)]
    pub fn is_registered(&self, channel: &str) -> bool {
        self.handlers.read().contains_key(channel)
    }

    /// Registered channel names, sorted.
    pub fn channels(&self) -> Vec<String> {
        let mut channels: Vec<String> = self.handlers.read().keys().cloned().collect();
        channels.sort();
        channels
    }

    pub fn invoke(&self, channel: &str, args: Vec<Value>) -> HockeyResult<Reply> {
        // Release the lock before running the handler.
        let handler = self
            .handlers
            .read()
            .get(channel)
            .cloned()
            .ok_or_else(|| HockeyError::UnknownChannel(channel.to_string()))?;
        Ok(handler(&IpcArgs::new(args)))
    }
}
