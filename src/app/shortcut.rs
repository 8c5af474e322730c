//! Global shortcut that toggles the window.

use tauri::plugin::TauriPlugin;
use tauri::{AppHandle, Wry};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

use crate::error::{HockeyError, HockeyResult};

/// Plugin whose handler toggles the window on key press.
pub fn plugin() -> TauriPlugin<Wry> {
    tauri_plugin_global_shortcut::Builder::new()
        .with_handler(|app, shortcut, event| {
            if event.state() != ShortcutState::Pressed {
                return;
            }
            log::debug!("[SHORTCUT] {:?} pressed", shortcut);
            let result = super::app_state(app).and_then(|state| state.windows.toggle_window());
            if let Err(e) = result {
                log::error!("[SHORTCUT] Failed to toggle window: {}", e);
            }
        })
        .build()
}

pub fn parse(chord: &str) -> HockeyResult<Shortcut> {
    chord
        .parse::<Shortcut>()
        .map_err(|e| HockeyError::ShortcutError(format!("Invalid shortcut '{}': {}", chord, e)))
}

pub fn register(app: &AppHandle, chord: &str) -> HockeyResult<()> {
    let shortcut = parse(chord)?;
    app.global_shortcut().register(shortcut).map_err(|e| {
        HockeyError::ShortcutError(format!("Failed to register shortcut '{}': {}", chord, e))
    })?;
    log::info!("[SHORTCUT] Registered {}", chord);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::app::DEFAULT_SHORTCUT;

    #[test]
    fn test_default_shortcut_parses() {
        assert!(parse(DEFAULT_SHORTCUT).is_ok());
    }

    #[test]
    fn test_invalid_shortcut() {
        assert!(matches!(
            parse("Shift+NotAKey"),
            Err(HockeyError::ShortcutError(_))
        ));
    }
}
