//! Application-level configuration.
//!
//! Resolved once at startup from the environment and shared read-only as
//! `Arc<HockeyConfig>`. Nothing re-reads the environment after `from_env()`.

use serde::{Deserialize, Serialize};
use tauri::State;
use ts_rs::TS;

use crate::app::AppState;

/// Selects development vs production behavior.
pub const MODE_ENV_VAR: &str = "HOCKEY_ENV";

/// Overrides the global shortcut chord.
pub const SHORTCUT_ENV_VAR: &str = "HOCKEY_SHORTCUT";

/// Opens devtools even in production when set to `1` or `true`.
pub const DEVTOOLS_ENV_VAR: &str = "HOCKEY_DEVTOOLS";

/// Default chord that toggles the window.
pub const DEFAULT_SHORTCUT: &str = "CommandOrControl+Shift+H";

/// Store file backing window bounds and the access token.
pub const DEFAULT_STORE_FILE: &str = "hockey-app-storage.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/src/types/generated/")]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    /// Only an explicit `development` selects development mode.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("development") => RunMode::Development,
            _ => RunMode::Production,
        }
    }
}

/// What happens when the user closes the tracked window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/src/types/generated/")]
pub enum ClosePolicy {
    /// Intercept the close and hide the window (Windows, Linux).
    Hide,
    /// Let the native close destroy the window (macOS).
    Destroy,
}

impl ClosePolicy {
    pub fn for_current_platform() -> Self {
        if cfg!(target_os = "macos") {
            ClosePolicy::Destroy
        } else {
            ClosePolicy::Hide
        }
    }
}

/// Immutable runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/src/types/generated/")]
pub struct HockeyConfig {
    pub mode: RunMode,
    pub title: String,
    /// Production window width; persisted bounds are clamped to it.
    pub width: u32,
    pub height: u32,
    /// Wider window used in development.
    pub dev_width: u32,
    pub transparent: bool,
    pub always_on_top: bool,
    pub decorations: bool,
    pub shortcut: String,
    /// Open devtools in production too.
    pub devtools: bool,
    pub close_policy: ClosePolicy,
    /// Keep the process alive after the last window closes (macOS convention).
    pub keep_running_without_windows: bool,
    pub visible_on_all_workspaces: bool,
    pub store_file: String,
}

impl Default for HockeyConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Production,
            title: "Hockey PR".to_string(),
            width: 400,
            height: 600,
            dev_width: 1200,
            transparent: true,
            always_on_top: true,
            decorations: false,
            shortcut: DEFAULT_SHORTCUT.to_string(),
            devtools: false,
            close_policy: ClosePolicy::for_current_platform(),
            keep_running_without_windows: cfg!(target_os = "macos"),
            visible_on_all_workspaces: cfg!(target_os = "macos"),
            store_file: DEFAULT_STORE_FILE.to_string(),
        }
    }
}

impl HockeyConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            mode: RunMode::from_env_value(lookup(MODE_ENV_VAR).as_deref()),
            ..Self::default()
        };

        if let Some(shortcut) = lookup(SHORTCUT_ENV_VAR).filter(|s| !s.trim().is_empty()) {
            config.shortcut = shortcut.trim().to_string();
        }

        config.devtools = matches!(
            lookup(DEVTOOLS_ENV_VAR).as_deref().map(str::trim),
            Some("1") | Some("true")
        );

        config
    }

    pub fn is_development(&self) -> bool {
        self.mode == RunMode::Development
    }

    /// Width used for the screen-centered default bounds.
    pub fn initial_width(&self) -> u32 {
        if self.is_development() {
            self.dev_width
        } else {
            self.width
        }
    }

    pub fn devtools_enabled(&self) -> bool {
        self.is_development() || self.devtools
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_development() {
            "debug"
        } else {
            "info"
        }
    }
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Get the resolved app configuration.
#[tauri::command]
pub fn get_app_config(state: State<'_, AppState>) -> HockeyConfig {
    state.config.as_ref().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_is_production() {
        let config = HockeyConfig::from_lookup(|_| None);
        assert_eq!(config.mode, RunMode::Production);
        assert_eq!(config.initial_width(), 400);
        assert_eq!(config.height, 600);
        assert_eq!(config.shortcut, DEFAULT_SHORTCUT);
        assert!(!config.devtools_enabled());
    }

    #[test]
    fn test_development_mode() {
        let config = HockeyConfig::from_lookup(lookup_from(&[(MODE_ENV_VAR, "development")]));
        assert!(config.is_development());
        assert_eq!(config.initial_width(), 1200);
        assert!(config.devtools_enabled());
        assert_eq!(config.default_log_filter(), "debug");
    }

    #[test]
    fn test_unknown_mode_falls_back_to_production() {
        for value in ["production", "dev", "", "test"] {
            assert_eq!(RunMode::from_env_value(Some(value)), RunMode::Production);
        }
        assert_eq!(
            RunMode::from_env_value(Some(" Development ")),
            RunMode::Development
        );
    }

    #[test]
    fn test_shortcut_override() {
        let config = HockeyConfig::from_lookup(lookup_from(&[(SHORTCUT_ENV_VAR, "Alt+Space")]));
        assert_eq!(config.shortcut, "Alt+Space");

        let blank = HockeyConfig::from_lookup(lookup_from(&[(SHORTCUT_ENV_VAR, "   ")]));
        assert_eq!(blank.shortcut, DEFAULT_SHORTCUT);
    }

    #[test]
    fn test_devtools_in_production() {
        let config = HockeyConfig::from_lookup(lookup_from(&[(DEVTOOLS_ENV_VAR, "1")]));
        assert!(!config.is_development());
        assert!(config.devtools_enabled());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(HockeyConfig::default()).unwrap();
        assert_eq!(json["devWidth"], 1200);
        assert_eq!(json["alwaysOnTop"], true);
        assert_eq!(json["mode"], "production");
    }
}
