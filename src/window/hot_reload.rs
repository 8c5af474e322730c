//! Development hot reload.
//!
//! Polls the UI bundle's modification time once per second and reloads the
//! tracked window when it changes. Only started in development mode.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;
use tauri::async_runtime::JoinHandle;

use super::{WindowHost, WindowManager};
use crate::error::{HockeyResult, ResultExt};

pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Renderer bundle watched for changes, relative to `root`.
pub fn default_artifact(root: &Path) -> PathBuf {
    root.join("dist").join("app").join("hockey.js")
}

/// Tracks the last modification time that triggered a reload.
pub struct ArtifactWatch {
    path: PathBuf,
    last_seen: SystemTime,
}

impl ArtifactWatch {
    /// Changes older than now are ignored.
    pub fn new(path: PathBuf) -> Self {
        Self::since(path, SystemTime::now())
    }

    pub fn since(path: PathBuf, last_seen: SystemTime) -> Self {
        Self { path, last_seen }
    }

    /// Modification time newer than the last one seen, if any.
    pub fn poll(&self) -> HockeyResult<Option<SystemTime>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let modified = std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .with_context(|| format!("failed to stat {}", self.path.display()))?;
        Ok((modified > self.last_seen).then_some(modified))
    }

    pub fn mark(&mut self, modified: SystemTime) {
        self.last_seen = modified;
    }
}

/// Slot for the running polling task, aborted when the app exits.
#[derive(Default)]
pub struct ReloadTask {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ReloadTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a task, aborting any previous one.
    pub fn set(&self, handle: JoinHandle<()>) {
        if let Some(previous) = self.handle.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Abort the task. Returns false when none was running.
    pub fn stop(&self) -> bool {
        match self.handle.lock().take() {
            Some(handle) => {
                handle.abort();
                log::debug!("[HOT_RELOAD] Stopped");
                true
            },
            None => false,
        }
    }
}

/// Spawn the polling task. A change only counts as seen once a live window
/// has been reloaded.
pub fn spawn<H: WindowHost>(manager: Arc<WindowManager<H>>, artifact: PathBuf) -> JoinHandle<()> {
    log::info!(
        "[HOT_RELOAD] Watching {} every {:?}",
        artifact.display(),
        POLL_INTERVAL
    );

    tauri::async_runtime::spawn(async move {
        let mut watch = ArtifactWatch::new(artifact);
        let mut ticker = tokio::time::interval(POLL_INTERVAL);

        loop {
            ticker.tick().await;
            match watch.poll() {
                Ok(Some(modified)) => {
                    if manager.reload_window() {
                        log::info!("[HOT_RELOAD] UI bundle changed, reloaded window");
                        watch.mark(modified);
                    }
                },
                Ok(None) => {},
                Err(e) => log::warn!("[HOT_RELOAD] {}", e),
            }
        }
    })
}
