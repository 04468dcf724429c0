//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// Variants follow where a failure came from: the network, the backend,
/// the user's own input, or the identity scan.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("{}", join_messages(.messages))]
    Api { status: u16, messages: Vec<String> },

    #[error("Unauthorized: {}", join_messages(.messages))]
    Unauthorized { messages: Vec<String> },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Identity scan failed: {0}")]
    IdentityScan(String),

    #[error("GraphQL error: {}", join_messages(.0))]
    GraphQl(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

fn join_messages(messages: &[String]) -> String {
    if messages.is_empty() {
        "request failed".to_string()
    } else {
        messages.join("; ")
    }
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an identity scan error
    pub fn identity_scan(msg: impl Into<String>) -> Self {
        Self::IdentityScan(msg.into())
    }

    /// Messages reported by the backend, if this error carries any
    pub fn server_messages(&self) -> Option<&[String]> {
        match self {
            Self::Api { messages, .. } | Self::Unauthorized { messages } | Self::GraphQl(messages)
                if !messages.is_empty() =>
            {
                Some(messages.as_slice())
            }
            _ => None,
        }
    }

    /// Messages to show the user: the backend's own messages when present,
    /// otherwise the given fallback.
    pub fn user_messages(&self, fallback: &str) -> Vec<String> {
        match self {
            Self::Validation(msg) | Self::IdentityScan(msg) => vec![msg.clone()],
            _ => self
                .server_messages()
                .map(|m| m.to_vec())
                .unwrap_or_else(|| vec![fallback.to_string()]),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for JSON output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Attach a context entry
    pub fn with_context(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_result_ok() {
        let result: OperationResult<i32> = OperationResult::ok(42);
        assert!(result.success);
        assert_eq!(result.data, Some(42));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_from_result() {
        let err: Result<i32> = Err(Error::validation("bad input"));
        let result: OperationResult<i32> = err.into();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Validation error"));
    }

    #[test]
    fn test_api_error_display_joins_messages() {
        let err = Error::Api {
            status: 400,
            messages: vec!["amount must be positive".into(), "accountNb is required".into()],
        };
        assert_eq!(err.to_string(), "amount must be positive; accountNb is required");
    }

    #[test]
    fn test_user_messages_prefers_server_messages() {
        let err = Error::Api { status: 400, messages: vec!["Insufficient funds".into()] };
        assert_eq!(err.user_messages("Withdrawal failed"), vec!["Insufficient funds"]);

        let err = Error::Transport("connection refused".into());
        assert_eq!(err.user_messages("Withdrawal failed"), vec!["Withdrawal failed"]);

        let err = Error::Api { status: 500, messages: vec![] };
        assert_eq!(err.user_messages("Withdrawal failed"), vec!["Withdrawal failed"]);
    }

    #[test]
    fn test_with_context() {
        let result = OperationResult::ok(1).with_context("route", serde_json::json!("/login"));
        assert_eq!(result.context.unwrap()["route"], "/login");
    }
}
