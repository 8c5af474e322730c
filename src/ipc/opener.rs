//! Hands URLs to the OS default handler.

use tauri::{AppHandle, Runtime, Wry};
use tauri_plugin_opener::OpenerExt;

use crate::error::{HockeyError, HockeyResult};

pub trait UrlOpener: Send + Sync {
    fn open_url(&self, url: &str) -> HockeyResult<()>;
}

/// `tauri-plugin-opener` backed opener.
pub struct TauriOpener<R: Runtime = Wry> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriOpener<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> UrlOpener for TauriOpener<R> {
    fn open_url(&self, url: &str) -> HockeyResult<()> {
        self.app
            .opener()
            .open_url(url, None::<&str>)
            .map_err(|e| HockeyError::OpenerError(e.to_string()))
    }
}
