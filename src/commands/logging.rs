//! Logging setup and the frontend log bridge.
//!
//! Backend and webview lines go through the same `log` facade; `env_logger`
//! writes them to stderr with `RUST_LOG` taking precedence over the default
//! filter chosen from the run mode.

use tauri::command;

use crate::config::HockeyConfig;

/// Log levels matching frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a frontend level name. Unknown names log at info.
    pub fn parse(level: &str) -> Self {
        match level.to_lowercase().as_str() {
            "debug" | "trace" => LogLevel::Debug,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Initialize the logging system. Safe to call more than once.
pub fn init_logging(config: &HockeyConfig) {
    let env = env_logger::Env::default().default_filter_or(config.default_log_filter());
    let result = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();

    if result.is_ok() {
        log::info!(
            "[LOG] Logging initialized ({:?} mode, default filter {})",
            config.mode,
            config.default_log_filter()
        );
    }
}

/// Forward one line into the backend logger.
pub fn log_internal(level: LogLevel, source: &str, message: &str) {
    log::log!(target: "webview", log::Level::from(level), "[{}] {}", source, message);
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Write a log message from the frontend
#[command]
pub fn write_log(level: String, source: String, message: String) {
    log_internal(LogLevel::parse(&level), &source, &message);
}

/// Write multiple log messages from the frontend (batch)
#[command]
pub fn write_logs(logs: Vec<(String, String, String)>) {
    for (level, source, message) in logs {
        write_log(level, source, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!(LogLevel::parse("debug"), LogLevel::Debug);
        assert_eq!(LogLevel::parse("WARNING"), LogLevel::Warn);
        assert_eq!(LogLevel::parse("error"), LogLevel::Error);
        assert_eq!(LogLevel::parse("verbose"), LogLevel::Info);
    }

    #[test]
    fn test_level_maps_to_log_facade() {
        assert_eq!(log::Level::from(LogLevel::Warn), log::Level::Warn);
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = HockeyConfig::default();
        init_logging(&config);
        init_logging(&config);
        write_log("info".into(), "test".into(), "hello".into());
    }
}
