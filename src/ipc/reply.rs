//! Typed IPC replies and positional arguments.

use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use crate::error::{HockeyError, HockeyResult};

/// Result of an IPC call as seen by the webview.
///
/// `value` always holds the contract result: the real value on success, the
/// channel's safe default (`false`, `null` or `""`) on failure.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../ui/src/types/generated/")]
pub struct Reply {
    pub ok: bool,
    #[ts(type = "unknown")]
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl Reply {
    pub fn success(value: impl Into<Value>) -> Self {
        Self {
            ok: true,
            value: value.into(),
            error: None,
        }
    }

    pub fn failure(fallback: Value, error: &HockeyError) -> Self {
        Self {
            ok: false,
            value: fallback,
            error: Some(error.to_string()),
        }
    }

    /// Fold a handler result into a reply, logging the failure.
    pub fn from_result<T: Into<Value>>(
        channel: &str,
        result: HockeyResult<T>,
        fallback: Value,
    ) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(e) => {
                log::error!("[IPC] {} failed: {}", channel, e);
                Self::failure(fallback, &e)
            },
        }
    }
}

/// Positional IPC arguments.
///
/// A missing position is JavaScript `undefined`; an explicit `null` is
/// `Some(Value::Null)`.
#[derive(Debug, Clone, Default)]
pub struct IpcArgs(Vec<Value>);

impl IpcArgs {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn string(&self, index: usize, name: &str) -> HockeyResult<String> {
        match self.get(index) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(HockeyError::InvalidArgument(format!(
                "{} must be a string, got {}",
                name, other
            ))),
            None => Err(HockeyError::InvalidArgument(format!("missing {}", name))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serialization() {
        let json = serde_json::to_value(Reply::success(true)).unwrap();
        assert_eq!(json, json!({"ok": true, "value": true}));
    }

    #[test]
    fn test_failure_carries_reason_and_default() {
        let reply = Reply::from_result::<bool>(
            "storage:set",
            Err(HockeyError::StoreError("disk full".to_string())),
            Value::Bool(false),
        );
        assert!(!reply.ok);
        assert_eq!(reply.value, Value::Bool(false));
        assert_eq!(reply.error.as_deref(), Some("Store error: disk full"));
    }

    #[test]
    fn test_args_distinguish_undefined_and_null() {
        let args = IpcArgs::new(vec![json!("key"), Value::Null]);
        assert_eq!(args.get(1), Some(&Value::Null));
        assert_eq!(args.get(2), None);
    }

    #[test]
    fn test_string_arg_errors() {
        let args = IpcArgs::new(vec![json!(42)]);
        assert!(matches!(
            args.string(0, "key"),
            Err(HockeyError::InvalidArgument(_))
        ));
        assert!(matches!(
            args.string(1, "url"),
            Err(HockeyError::InvalidArgument(_))
        ));
    }
}
