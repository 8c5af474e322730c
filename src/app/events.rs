//! Window, page-load and run-loop event handlers.
//!
//! These translate toolkit events into `WindowManager` calls.

use tauri::webview::{PageLoadEvent, PageLoadPayload};
use tauri::{AppHandle, Runtime, RunEvent, WebviewWindow, Window, WindowEvent};

use super::app_state;
use crate::config::HockeyConfig;
use crate::window::CloseAction;

/// Handle window events for the application.
///
/// This is called from the Tauri builder's `on_window_event` hook.
pub fn handle_window_event(window: &Window, event: &WindowEvent) {
    let Ok(state) = app_state(window) else {
        return;
    };
    let label = window.label();

    match event {
        WindowEvent::Moved(_) => state.windows.on_moved(label),

        WindowEvent::Resized(_) => {
            // Fix Windows resize lag by adding small delay
            // See: https://github.com/tauri-apps/tauri/issues/6322#issuecomment-2495685888
            #[cfg(target_os = "windows")]
            std::thread::sleep(std::time::Duration::from_millis(1));

            state.windows.on_resized(label);
        },

        WindowEvent::CloseRequested { api, .. } => {
            if state.windows.on_close_requested(label) == CloseAction::Hide {
                api.prevent_close();
            }
        },

        WindowEvent::Destroyed => state.windows.on_destroyed(label),

        _ => {},
    }
}

/// Document finished loading in a webview.
pub fn handle_page_load<R: Runtime>(window: &WebviewWindow<R>, payload: &PageLoadPayload<'_>) {
    if !matches!(payload.event(), PageLoadEvent::Finished) {
        return;
    }
    log::debug!("[WINDOW] {} loaded {}", window.label(), payload.url());
    match app_state(window) {
        Ok(state) => state.windows.on_ready(window.label()),
        Err(e) => log::warn!("[WINDOW] Page loaded before setup: {}", e),
    }
}

/// Whether the process survives an exit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    Exit,
    KeepRunning,
}

/// An explicit exit code always exits. Without one the last window closed,
/// which only ends the process where apps do not outlive their windows.
pub fn exit_decision(config: &HockeyConfig, code: Option<i32>) -> ExitDecision {
    match code {
        None if config.keep_running_without_windows => ExitDecision::KeepRunning,
        _ => ExitDecision::Exit,
    }
}

/// Run-loop hook passed to `App::run`.
pub fn handle_run_event(app: &AppHandle, event: RunEvent) {
    match event {
        RunEvent::ExitRequested { api, code, .. } => {
            let Ok(state) = app_state(app) else {
                return;
            };
            if exit_decision(&state.config, code) == ExitDecision::KeepRunning {
                log::debug!("[APP] All windows closed, staying resident");
                api.prevent_exit();
            } else {
                log::info!("[APP] Exiting");
            }
        },

        RunEvent::Exit => {
            if let Ok(state) = app_state(app) {
                state.hot_reload.stop();
            }
        },

        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            let result = app_state(app).and_then(|state| state.windows.activate());
            if let Err(e) = result {
                log::error!("[APP] Failed to reactivate window: {}", e);
            }
        },

        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(keep_running: bool) -> HockeyConfig {
        HockeyConfig {
            keep_running_without_windows: keep_running,
            ..HockeyConfig::default()
        }
    }

    #[test]
    fn test_last_window_closed_exits_by_default() {
        assert_eq!(exit_decision(&config(false), None), ExitDecision::Exit);
    }

    #[test]
    fn test_last_window_closed_stays_resident() {
        assert_eq!(exit_decision(&config(true), None), ExitDecision::KeepRunning);
    }

    #[test]
    fn test_explicit_exit_code_always_exits() {
        assert_eq!(exit_decision(&config(true), Some(0)), ExitDecision::Exit);
        assert_eq!(exit_decision(&config(false), Some(1)), ExitDecision::Exit);
    }
}
