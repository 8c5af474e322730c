//! The single tracked floating window and its lifecycle.
//!
//! States: `absent -> created -> visible <-> hidden -> destroyed -> absent`.
//! Destructive calls on the toolkit (hide, destroy) never propagate out of
//! lifecycle paths; failures are logged and the handle is cleared when it can
//! no longer be trusted.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::document::{self, DocumentCandidate};
use super::{Bounds, FloatingWindow, WindowHost, WindowSpec, WINDOW_LABEL};
use crate::config::{ClosePolicy, HockeyConfig};
use crate::error::{HockeyError, HockeyResult};
use crate::store::{KeyValueStore, WINDOW_BOUNDS_KEY};

/// Outcome of a native close request on a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Close was intercepted; the window is hidden instead.
    Hide,
    /// Let the toolkit close and destroy the window.
    Allow,
}

/// Held while a window is being constructed.
struct ConstructionGuard<'a>(&'a AtomicBool);

impl<'a> ConstructionGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for ConstructionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct WindowManager<H: WindowHost> {
    host: H,
    store: Arc<dyn KeyValueStore>,
    config: Arc<HockeyConfig>,
    documents: Vec<DocumentCandidate>,
    handle: Mutex<Option<H::Window>>,
    constructing: AtomicBool,
    generation: AtomicU32,
}

impl<H: WindowHost> WindowManager<H> {
    pub fn new(
        host: H,
        store: Arc<dyn KeyValueStore>,
        config: Arc<HockeyConfig>,
        documents: Vec<DocumentCandidate>,
    ) -> Self {
        Self {
            host,
            store,
            config,
            documents,
            handle: Mutex::new(None),
            constructing: AtomicBool::new(false),
            generation: AtomicU32::new(0),
        }
    }

    /// The live tracked window, if any.
    ///
    /// A tracked window the toolkit has already destroyed is dropped here.
    pub fn handle(&self) -> Option<H::Window> {
        let mut slot = self.handle.lock();
        match slot.as_ref() {
            Some(window) if window.is_alive() => Some(window.clone()),
            Some(window) => {
                log::debug!("[WINDOW] Clearing stale handle {}", window.label());
                *slot = None;
                None
            },
            None => None,
        }
    }

    pub fn is_constructing(&self) -> bool {
        self.constructing.load(Ordering::SeqCst)
    }

    fn is_tracked(&self, label: &str) -> bool {
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|window| window.label() == label)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Show the existing window or construct a new one.
    pub fn create_window(&self) -> HockeyResult<H::Window> {
        self.close_all_duplicate_windows();

        if let Some(window) = self.handle() {
            self.reveal(&window);
            return Ok(window);
        }

        let _guard =
            ConstructionGuard::acquire(&self.constructing).ok_or(HockeyError::ConstructionInProgress)?;

        // Another caller may have finished constructing before we took the guard.
        if let Some(window) = self.handle() {
            self.reveal(&window);
            return Ok(window);
        }

        let spec = self.window_spec();
        log::info!(
            "[WINDOW] Creating {} ({}x{} at {},{})",
            spec.label,
            spec.bounds.width,
            spec.bounds.height,
            spec.bounds.x,
            spec.bounds.y
        );
        let window = self.host.build(&spec)?;

        if let Some(saved) = self.load_bounds() {
            let restored = self.restored_bounds(saved);
            log::debug!("[WINDOW] Restoring saved bounds {:?}", restored);
            if let Err(e) = window.set_bounds(restored) {
                log::warn!("[WINDOW] Failed to restore saved bounds: {}", e);
            }
        }

        *self.handle.lock() = Some(window.clone());
        Ok(window)
    }

    /// Persist bounds and hide the window without destroying it.
    ///
    /// Returns false when there was no live window.
    pub fn hide_window(&self) -> bool {
        let Some(window) = self.handle() else {
            return false;
        };

        log::debug!("[WINDOW] Hiding {}", window.label());
        self.persist_bounds(&window);
        if let Err(e) = window.hide() {
            log::error!("[WINDOW] Failed to hide window: {}", e);
        }
        self.close_all_duplicate_windows();
        true
    }

    /// Show and focus the live window. Returns false when there is none.
    pub fn show_window(&self) -> bool {
        let Some(window) = self.handle() else {
            return false;
        };
        self.reveal(&window);
        self.close_all_duplicate_windows();
        true
    }

    /// Global shortcut behavior: hide if visible, show if hidden, create if absent.
    pub fn toggle_window(&self) -> HockeyResult<()> {
        self.close_all_duplicate_windows();

        let Some(window) = self.handle() else {
            self.create_window()?;
            return Ok(());
        };

        match window.is_visible() {
            Ok(true) => {
                self.hide_window();
            },
            Ok(false) => {
                self.show_window();
            },
            Err(e) => {
                log::warn!("[WINDOW] Could not read visibility, showing: {}", e);
                self.show_window();
            },
        }
        Ok(())
    }

    /// Second-instance behavior: bring the existing window to front.
    pub fn focus_existing(&self) -> HockeyResult<()> {
        let Some(window) = self.handle() else {
            self.create_window()?;
            return Ok(());
        };

        if window.is_minimized().unwrap_or(false) {
            if let Err(e) = window.unminimize() {
                log::warn!("[WINDOW] Failed to restore minimized window: {}", e);
            }
        }
        self.reveal(&window);
        Ok(())
    }

    /// Re-activation (dock click): recreate if absent, show if hidden.
    pub fn activate(&self) -> HockeyResult<()> {
        self.close_all_duplicate_windows();

        match self.handle() {
            None => {
                self.create_window()?;
            },
            Some(window) => {
                if !window.is_visible().unwrap_or(false) {
                    self.show_window();
                }
            },
        }
        Ok(())
    }

    /// Destroy every toolkit window that is not the tracked handle.
    ///
    /// Skipped while a window is under construction, since the new window is
    /// not tracked yet. Returns the number of windows destroyed.
    pub fn close_all_duplicate_windows(&self) -> usize {
        if self.is_constructing() {
            log::debug!("[WINDOW] Construction in progress, skipping duplicate sweep");
            return 0;
        }

        let tracked = self.handle().map(|window| window.label());
        let mut closed = 0;

        for window in self.host.windows() {
            let label = window.label();
            if tracked.as_deref() == Some(label.as_str()) || !window.is_alive() {
                continue;
            }
            match window.destroy() {
                Ok(()) => closed += 1,
                Err(e) => log::error!("[WINDOW] Failed to destroy duplicate {}: {}", label, e),
            }
        }

        if closed > 0 {
            log::info!("[WINDOW] Destroyed {} duplicate window(s)", closed);
        }
        closed
    }

    /// Destroy the tracked window and clear the handle.
    pub fn destroy_window(&self) -> HockeyResult<bool> {
        let Some(window) = self.handle.lock().take() else {
            return Ok(false);
        };

        log::info!("[WINDOW] Destroying {}", window.label());
        self.persist_bounds(&window);
        window.destroy()?;
        Ok(true)
    }

    // ========================================================================
    // Window controls (IPC)
    // ========================================================================

    /// Close request from the UI: hides or destroys according to the close policy.
    pub fn close_window(&self) -> HockeyResult<bool> {
        if self.handle().is_none() {
            return Ok(false);
        }
        match self.config.close_policy {
            ClosePolicy::Hide => Ok(self.hide_window()),
            ClosePolicy::Destroy => self.destroy_window(),
        }
    }

    pub fn minimize_window(&self) -> HockeyResult<bool> {
        let Some(window) = self.handle() else {
            return Ok(false);
        };
        window.minimize()?;
        Ok(true)
    }

    /// Maximize, or unmaximize when already maximized.
    pub fn toggle_maximize_window(&self) -> HockeyResult<bool> {
        let Some(window) = self.handle() else {
            return Ok(false);
        };
        if window.is_maximized()? {
            window.unmaximize()?;
        } else {
            window.maximize()?;
        }
        Ok(true)
    }

    /// Restore from minimized; a no-op success when not minimized.
    pub fn restore_window(&self) -> HockeyResult<bool> {
        let Some(window) = self.handle() else {
            return Ok(false);
        };
        if window.is_minimized()? {
            window.unminimize()?;
        }
        Ok(true)
    }

    /// Reload the document in the live window. Returns false when there is none.
    pub fn reload_window(&self) -> bool {
        let Some(window) = self.handle() else {
            return false;
        };
        match window.reload() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[WINDOW] Reload failed: {}", e);
                false
            },
        }
    }

    // ========================================================================
    // Toolkit events
    // ========================================================================

    pub fn on_moved(&self, label: &str) {
        if let Some(window) = self.handle().filter(|w| w.label() == label) {
            self.persist_bounds(&window);
        }
    }

    pub fn on_resized(&self, label: &str) {
        if self.is_tracked(label) {
            self.close_all_duplicate_windows();
        }
    }

    /// Document finished loading.
    pub fn on_ready(&self, label: &str) {
        let Some(window) = self.handle().filter(|w| w.label() == label) else {
            return;
        };

        self.close_all_duplicate_windows();

        if !self.config.is_development() {
            if let Err(e) = window.set_size(self.config.width, self.config.height) {
                log::warn!("[WINDOW] Failed to enforce production size: {}", e);
            }
        }
        if self.config.devtools_enabled() {
            log::debug!("[WINDOW] Opening devtools");
            window.open_devtools();
        }
    }

    pub fn on_close_requested(&self, label: &str) -> CloseAction {
        if !self.is_tracked(label) {
            return CloseAction::Allow;
        }
        match self.config.close_policy {
            ClosePolicy::Destroy => {
                log::debug!("[WINDOW] Allowing native close of {}", label);
                CloseAction::Allow
            },
            ClosePolicy::Hide => {
                self.hide_window();
                CloseAction::Hide
            },
        }
    }

    pub fn on_destroyed(&self, label: &str) {
        let mut slot = self.handle.lock();
        if slot.as_ref().is_some_and(|window| window.label() == label) {
            log::info!("[WINDOW] {} destroyed, clearing handle", label);
            *slot = None;
        }
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn reveal(&self, window: &H::Window) {
        if let Err(e) = window.show() {
            log::error!("[WINDOW] Failed to show window: {}", e);
        }
        if let Err(e) = window.focus() {
            log::warn!("[WINDOW] Failed to focus window: {}", e);
        }
    }

    fn next_label(&self) -> String {
        match self.generation.fetch_add(1, Ordering::SeqCst) {
            0 => WINDOW_LABEL.to_string(),
            n => format!("{}-{}", WINDOW_LABEL, n),
        }
    }

    fn window_spec(&self) -> WindowSpec {
        let width = self.config.initial_width();
        let height = self.config.height;
        let bounds = match self.host.work_area() {
            Some(area) => Bounds::centered_in(area, width, height),
            None => Bounds {
                x: 0,
                y: 0,
                width,
                height,
            },
        };

        WindowSpec {
            label: self.next_label(),
            title: self.config.title.clone(),
            bounds,
            transparent: self.config.transparent,
            always_on_top: self.config.always_on_top,
            decorations: self.config.decorations,
            visible_on_all_workspaces: self.config.visible_on_all_workspaces,
            devtools: self.config.devtools_enabled(),
            document: document::resolve(&self.documents, |c| self.host.document_exists(c)),
        }
    }

    /// Persisted bounds win, except that production keeps its fixed width.
    fn restored_bounds(&self, saved: Bounds) -> Bounds {
        if self.config.is_development() {
            saved
        } else {
            saved.with_width(self.config.width)
        }
    }

    fn load_bounds(&self) -> Option<Bounds> {
        match self.store.get(WINDOW_BOUNDS_KEY) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(bounds) => Some(bounds),
                Err(e) => {
                    log::warn!("[WINDOW] Ignoring malformed saved bounds: {}", e);
                    None
                },
            },
            Ok(None) => None,
            Err(e) => {
                log::error!("[WINDOW] Failed to read saved bounds: {}", e);
                None
            },
        }
    }

    fn persist_bounds(&self, window: &H::Window) {
        let bounds = match window.bounds() {
            Ok(bounds) => bounds,
            Err(e) => {
                log::warn!("[WINDOW] Failed to read bounds: {}", e);
                return;
            },
        };

        let result = serde_json::to_value(bounds)
            .map_err(HockeyError::from)
            .and_then(|value| self.store.set(WINDOW_BOUNDS_KEY, value));
        if let Err(e) = result {
            log::error!("[WINDOW] Failed to persist bounds: {}", e);
        }
    }
}
