//! Tauri commands exposed to the webview.

pub mod ipc;
pub mod logging;
