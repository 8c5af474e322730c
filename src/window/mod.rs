//! Floating window management.
//!
//! ## Architecture
//!
//! ```text
//! window/
//!   mod.rs        - Bounds, WindowSpec, toolkit traits
//!   manager.rs    - WindowManager: the single tracked window and its lifecycle
//!   tauri_host.rs - Tauri implementation of the toolkit traits
//!   document.rs   - UI document resolution with fallbacks
//!   hot_reload.rs - Development reload when the UI bundle changes
//! ```
//!
//! The manager never touches Tauri directly. It drives a `WindowHost`, which
//! keeps lifecycle rules testable without a display server.

pub mod document;
pub mod hot_reload;
pub mod manager;
pub mod tauri_host;


pub use document::{DocumentCandidate, DocumentSource};
pub use manager::{CloseAction, WindowManager};
pub use tauri_host::TauriHost;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::HockeyResult;

/// Label of the first tracked window; later generations get a numeric suffix.
pub(crate) const WINDOW_LABEL: &str = "hockey";

/// Window rectangle in logical pixels.
///
/// Persisted as-is under `windowBounds`; no on-screen validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../ui/src/types/generated/")]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Center a `width` x `height` window in the given work area.
    pub fn centered_in(area: WorkArea, width: u32, height: u32) -> Self {
        let x = (area.width as f64 / 2.0 - width as f64 / 2.0).floor() as i32;
        let y = (area.height as f64 / 2.0 - height as f64 / 2.0).floor() as i32;
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn with_width(self, width: u32) -> Self {
        Self { width, ..self }
    }
}

/// Primary display size in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkArea {
    pub width: u32,
    pub height: u32,
}

/// Everything a host needs to construct the floating window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub label: String,
    pub title: String,
    pub bounds: Bounds,
    pub transparent: bool,
    pub always_on_top: bool,
    pub decorations: bool,
    pub visible_on_all_workspaces: bool,
    pub devtools: bool,
    pub document: DocumentSource,
}

/// A toolkit window the manager can drive.
pub trait FloatingWindow: Clone + Send + Sync + 'static {
    fn label(&self) -> String;

    /// False once the toolkit has destroyed the window.
    fn is_alive(&self) -> bool;

    fn is_visible(&self) -> HockeyResult<bool>;
    fn is_minimized(&self) -> HockeyResult<bool>;
    fn is_maximized(&self) -> HockeyResult<bool>;

    fn show(&self) -> HockeyResult<()>;
    fn hide(&self) -> HockeyResult<()>;
    fn focus(&self) -> HockeyResult<()>;
    fn minimize(&self) -> HockeyResult<()>;
    fn unminimize(&self) -> HockeyResult<()>;
    fn maximize(&self) -> HockeyResult<()>;
    fn unmaximize(&self) -> HockeyResult<()>;
    fn destroy(&self) -> HockeyResult<()>;

    fn bounds(&self) -> HockeyResult<Bounds>;
    fn set_bounds(&self, bounds: Bounds) -> HockeyResult<()>;
    fn set_size(&self, width: u32, height: u32) -> HockeyResult<()>;

    /// Reload the document, bypassing caches.
    fn reload(&self) -> HockeyResult<()>;
    fn open_devtools(&self);
}

/// The GUI toolkit, as seen by the window manager.
pub trait WindowHost: Send + Sync + 'static {
    type Window: FloatingWindow;

    fn work_area(&self) -> Option<WorkArea>;

    fn build(&self, spec: &WindowSpec) -> HockeyResult<Self::Window>;

    /// Every window the toolkit currently knows about.
    fn windows(&self) -> Vec<Self::Window>;

    fn document_exists(&self, candidate: &DocumentCandidate) -> bool;
}
