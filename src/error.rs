//! Central error types for Hockey PR.
//!
//! All errors implement `Serialize` for Tauri IPC compatibility. The IPC
//! bridge never hands these to the webview as a rejected promise; they are
//! folded into a `Reply` with a safe default value instead.

use serde::Serialize;
use thiserror::Error;

/// Main error type for Hockey PR operations.
#[derive(Error, Debug)]
pub enum HockeyError {
    /// Key-value store read/write/delete failed
    #[error("Store error: {0}")]
    StoreError(String),

    /// Window management error
    #[error("Window error: {0}")]
    WindowError(String),

    /// The tracked window handle is absent or already destroyed
    #[error("No live window")]
    WindowGone,

    /// Another window construction is still running
    #[error("Window construction already in progress")]
    ConstructionInProgress,

    /// Global shortcut could not be parsed or registered
    #[error("Shortcut error: {0}")]
    ShortcutError(String),

    /// Handing a URL to the OS default handler failed
    #[error("Failed to open external URL: {0}")]
    OpenerError(String),

    /// IPC argument was missing or had the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No handler is registered for the requested channel
    #[error("Unknown IPC channel: {0}")]
    UnknownChannel(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error surfaced by the Tauri runtime
    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Tauri requires errors to be serializable to send to the frontend.
impl Serialize for HockeyError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<String> for HockeyError {
    fn from(msg: String) -> Self {
        HockeyError::Other(msg)
    }
}

impl From<&str> for HockeyError {
    fn from(msg: &str) -> Self {
        HockeyError::Other(msg.to_string())
    }
}

/// Extension trait for adding context to Results.
///
/// # Example
/// ```ignore
/// use crate::error::{HockeyResult, ResultExt};
///
/// fn read_artifact(path: &Path) -> HockeyResult<Metadata> {
///     std::fs::metadata(path).context("failed to stat artifact")
/// }
/// ```
pub trait ResultExt<T> {
    /// Add context to an error, converting it to HockeyError::Other.
    fn context(self, msg: &str) -> HockeyResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> HockeyResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> HockeyResult<T> {
        self.map_err(|e| HockeyError::Other(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> HockeyResult<T> {
        self.map_err(|e| HockeyError::Other(format!("{}: {}", f(), e)))
    }
}

/// Extension trait for adding context to Option types.
pub trait OptionExt<T> {
    /// Convert None to HockeyError::Other with the given message.
    fn context(self, msg: &str) -> HockeyResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, msg: &str) -> HockeyResult<T> {
        self.ok_or_else(|| HockeyError::Other(msg.to_string()))
    }
}

/// Convert a toolkit error on a window call into `HockeyError::WindowError`.
pub(crate) fn window_err(action: &str) -> impl FnOnce(tauri::Error) -> HockeyError + '_ {
    move |e| HockeyError::WindowError(format!("Failed to {}: {}", action, e))
}

/// Type alias for Results using HockeyError.
pub type HockeyResult<T> = Result<T, HockeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HockeyError::StoreError("disk full".to_string());
        assert_eq!(err.to_string(), "Store error: disk full");
    }

    #[test]
    fn test_error_serialization() {
        let err = HockeyError::UnknownChannel("window:explode".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Unknown IPC channel: window:explode\"");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HockeyError = io_err.into();
        assert!(matches!(err, HockeyError::Io(_)));
    }

    #[test]
    fn test_from_string() {
        let err: HockeyError = "test error".into();
        assert!(matches!(err, HockeyError::Other(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<(), &str> = Err("original error");
        let msg = result.context("operation failed").unwrap_err().to_string();

        assert!(msg.contains("operation failed"));
        assert!(msg.contains("original error"));
    }

    #[test]
    fn test_result_ext_with_context() {
        let result: Result<(), &str> = Err("inner");
        let msg = result
            .with_context(|| format!("ctx-{}", 42))
            .unwrap_err()
            .to_string();

        assert!(msg.contains("ctx-42"));
        assert!(msg.contains("inner"));
    }

    #[test]
    fn test_result_ext_ok_passthrough() {
        let result: Result<i32, &str> = Ok(42);
        assert_eq!(result.context("should not appear").unwrap(), 42);
    }

    #[test]
    fn test_option_ext_context() {
        let opt: Option<i32> = None;
        let result = opt.context("value was missing");

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("value was missing"));
    }
}
