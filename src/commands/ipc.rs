//! Webview entry point for the IPC bridge.

use serde_json::Value;
use tauri::{command, State};

use crate::app::AppState;
use crate::error::HockeyError;
use crate::ipc::Reply;

/// Dispatch a channel call from the webview.
///
/// Handler failures come back as a `Reply` with `ok == false`; only an
/// unknown channel rejects the promise.
#[command]
pub async fn ipc_invoke(
    state: State<'_, AppState>,
    channel: String,
    args: Option<Vec<Value>>,
) -> Result<Reply, HockeyError> {
    state.router.invoke(&channel, args.unwrap_or_default())
}

/// Registered channel names, for UI diagnostics.
#[command]
pub fn list_ipc_channels(state: State<'_, AppState>) -> Vec<String> {
    state.router.channels()
}
