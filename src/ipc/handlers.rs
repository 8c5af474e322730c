//! Bridge operations behind each IPC channel.

use std::sync::Arc;

use serde_json::Value;

use super::channels;
use super::opener::UrlOpener;
use super::reply::{IpcArgs, Reply};
use super::router::IpcRouter;
use crate::error::{HockeyError, HockeyResult};
use crate::store::{KeyValueStore, GITHUB_TOKEN_KEY};
use crate::window::{WindowHost, WindowManager};

/// Window control, storage and external navigation for the webview.
pub struct Bridge<H: WindowHost> {
    windows: Arc<WindowManager<H>>,
    store: Arc<dyn KeyValueStore>,
    opener: Arc<dyn UrlOpener>,
}

impl<H: WindowHost> Bridge<H> {
    pub fn new(
        windows: Arc<WindowManager<H>>,
        store: Arc<dyn KeyValueStore>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        Self {
            windows,
            store,
            opener,
        }
    }

    pub fn window_close(&self) -> HockeyResult<bool> {
        self.windows.close_window()
    }

    pub fn window_minimize(&self) -> HockeyResult<bool> {
        self.windows.minimize_window()
    }

    pub fn window_maximize(&self) -> HockeyResult<bool> {
        self.windows.toggle_maximize_window()
    }

    pub fn window_restore(&self) -> HockeyResult<bool> {
        self.windows.restore_window()
    }

    pub fn open_external(&self, url: &str) -> HockeyResult<bool> {
        if url.trim().is_empty() {
            return Err(HockeyError::InvalidArgument("url is empty".to_string()));
        }
        log::info!("[IPC] Opening external URL {}", url);
        self.opener.open_url(url)?;
        Ok(true)
    }

    /// Stored value, or `null` when the key is missing.
    pub fn storage_get(&self, key: &str) -> HockeyResult<Value> {
        let value = self.store.get(key)?;
        log::debug!(
            "[IPC] storage:get {} -> {}",
            key,
            if value.is_some() { "found" } else { "missing" }
        );
        Ok(value.unwrap_or(Value::Null))
    }

    /// `None` is an undefined value and is refused; `null` deletes the key.
    pub fn storage_set(&self, key: &str, value: Option<&Value>) -> HockeyResult<bool> {
        match value {
            None => Err(HockeyError::InvalidArgument(format!(
                "value for {} is undefined",
                key
            ))),
            Some(Value::Null) => {
                self.store.delete(key)?;
                Ok(true)
            },
            Some(value) => {
                self.store.set(key, value.clone())?;
                Ok(true)
            },
        }
    }

    pub fn storage_remove(&self, key: &str) -> HockeyResult<bool> {
        self.store.delete(key)?;
        Ok(true)
    }

    /// The access token, or `""` when not configured.
    pub fn token_get(&self) -> HockeyResult<String> {
        match self.store.get(GITHUB_TOKEN_KEY)? {
            Some(Value::String(token)) => {
                log::debug!("[IPC] Token present");
                Ok(token)
            },
            Some(other) => {
                log::warn!("[IPC] Ignoring non-string token of type {}", json_type(&other));
                Ok(String::new())
            },
            None => {
                log::debug!("[IPC] No token configured");
                Ok(String::new())
            },
        }
    }

    /// Store the token; `null` or `""` delete it instead. A missing argument
    /// is refused and leaves the stored token untouched.
    pub fn token_set(&self, token: Option<&Value>) -> HockeyResult<bool> {
        match token {
            None => Err(HockeyError::InvalidArgument("token is undefined".to_string())),
            Some(Value::Null) => self.clear_token(),
            Some(Value::String(token)) if token.is_empty() => self.clear_token(),
            Some(Value::String(token)) => {
                self.store
                    .set(GITHUB_TOKEN_KEY, Value::String(token.clone()))?;
                log::info!("[IPC] Token saved");
                Ok(true)
            },
            Some(other) => Err(HockeyError::InvalidArgument(format!(
                "token must be a string or null, got {}",
                json_type(other)
            ))),
        }
    }

    fn clear_token(&self) -> HockeyResult<bool> {
        self.store.delete(GITHUB_TOKEN_KEY)?;
        log::info!("[IPC] Token cleared");
        Ok(true)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Register one channel whose handler result is folded into a `Reply`.
fn route<H, T, F>(
    router: &IpcRouter,
    bridge: &Arc<Bridge<H>>,
    channel: &'static str,
    fallback: Value,
    op: F,
) where
    H: WindowHost,
    T: Into<Value>,
    F: Fn(&Bridge<H>, &IpcArgs) -> HockeyResult<T> + Send + Sync + 'static,
{
    let bridge = Arc::clone(bridge);
    router.register(channel, move |args| {
        log::debug!("[IPC] {}", channel);
        Reply::from_result(channel, op(&bridge, args), fallback.clone())
    });
}

/// Register every bridge channel, replacing any handlers already present.
pub fn register_ipc_handlers<H: WindowHost>(router: &IpcRouter, bridge: &Arc<Bridge<H>>) {
    for channel in channels::ALL {
        if router.remove(channel) {
            log::debug!("[IPC] Removed existing handler for {}", channel);
        }
    }

    let no = || Value::Bool(false);

    route(router, bridge, channels::WINDOW_CLOSE, no(), |b, _| b.window_close());
    route(router, bridge, channels::WINDOW_MINIMIZE, no(), |b, _| b.window_minimize());
    route(router, bridge, channels::WINDOW_MAXIMIZE, no(), |b, _| b.window_maximize());
    route(router, bridge, channels::WINDOW_RESTORE, no(), |b, _| b.window_restore());
    route(router, bridge, channels::SYSTEM_OPEN_EXTERNAL, no(), |b, args| {
        b.open_external(&args.string(0, "url")?)
    });
    route(router, bridge, channels::STORAGE_GET, Value::Null, |b, args| {
        b.storage_get(&args.string(0, "key")?)
    });
    route(router, bridge, channels::STORAGE_SET, no(), |b, args| {
        b.storage_set(&args.string(0, "key")?, args.get(1))
    });
    route(router, bridge, channels::STORAGE_REMOVE, no(), |b, args| {
        b.storage_remove(&args.string(0, "key")?)
    });
    route(router, bridge, channels::GITHUB_GET_TOKEN, Value::from(""), |b, _| b.token_get());
    route(router, bridge, channels::GITHUB_SET_TOKEN, no(), |b, args| b.token_set(args.get(0)));

    log::info!("[IPC] Registered {} channels", router.channels().len());
}
