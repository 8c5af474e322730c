//! IPC bridge between the webview and the control process.
//!
//! The webview calls a single Tauri command, `ipc_invoke(channel, args)`.
//! The router maps the channel name to a handler, and every handler answers
//! with a `Reply` instead of rejecting, so the UI always gets a usable value.

pub mod channels;
pub mod handlers;
pub mod opener;
pub mod reply;
pub mod router;


pub use handlers::{register_ipc_handlers, Bridge};
pub use opener::{TauriOpener, UrlOpener};
pub use reply::{IpcArgs, Reply};
pub use router::IpcRouter;
