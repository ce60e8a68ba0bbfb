use std::path::PathBuf;
use std::time::Duration;

/// Error name the host attaches to responses for unregistered operations.
pub const UNKNOWN_OPERATION_NAME: &str = "UnknownOperation";

/// Name assumed when a failure response carries no `error.name`.
pub const DEFAULT_ERROR_NAME: &str = "EasyAdminError";

/// Message assumed when a failure response carries no `error.message`.
pub const DEFAULT_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failure of a single RPC call, as seen by the caller.
///
/// Failures raised inside a host operation cross the frame boundary as
/// `{ message, name }` data and are rebuilt into one of these kinds on the
/// client. `TransportRejected` never crosses the boundary; the host only
/// logs it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("message rejected: {reason}")]
    TransportRejected { reason: String },

    #[error("Unknown operation: {operation}")]
    UnknownOperation { operation: String },

    #[error("{message}")]
    HandlerFailure { name: String, message: String },

    #[error("{operation} timed out after {}ms", .after.as_millis())]
    Timeout { operation: String, after: Duration },

    #[error("channel to host closed")]
    ChannelClosed,

    #[error("failed to decode result: {0}")]
    Decode(String),
}

impl RpcError {
    /// The error message as the remote side would report it.
    pub fn message(&self) -> String {
        match self {
            RpcError::HandlerFailure { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// The error name carried by (or implied for) this failure.
    pub fn name(&self) -> &str {
        match self {
            RpcError::TransportRejected { .. } => "TransportRejected",
            RpcError::UnknownOperation { .. } => UNKNOWN_OPERATION_NAME,
            RpcError::HandlerFailure { name, .. } => name,
            RpcError::Timeout { .. } => "Timeout",
            RpcError::ChannelClosed => "ChannelClosed",
            RpcError::Decode(_) => "DecodeError",
        }
    }

    /// Rebuild a caller-side error from the structured failure of a response.
    ///
    /// Missing fields fall back to [`DEFAULT_ERROR_NAME`] and
    /// [`DEFAULT_ERROR_MESSAGE`]. Only an `UnknownOperation` failure whose
    /// message names the operation becomes [`RpcError::UnknownOperation`].
    pub fn from_remote(name: Option<&str>, message: Option<&str>) -> Self {
        let name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_ERROR_NAME);
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_ERROR_MESSAGE);

        if name == UNKNOWN_OPERATION_NAME {
            if let Some(missing) = message.strip_prefix("Unknown operation: ") {
                return RpcError::UnknownOperation {
                    operation: missing.to_string(),
                };
            }
        }

        RpcError::HandlerFailure {
            name: name.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("host.allowed_origins is empty".into());
        assert_eq!(
            err.to_string(),
            "config validation error: host.allowed_origins is empty"
        );
    }

    #[test]
    fn unknown_operation_message() {
        let err = RpcError::UnknownOperation {
            operation: "deleteEverything".into(),
        };
        assert_eq!(err.message(), "Unknown operation: deleteEverything");
        assert_eq!(err.name(), "UnknownOperation");
    }

    #[test]
    fn handler_failure_displays_message_only() {
        let err = RpcError::HandlerFailure {
            name: "Error".into(),
            message: "invalid".into(),
        };
        assert_eq!(err.to_string(), "invalid");
        assert_eq!(err.message(), "invalid");
        assert_eq!(err.name(), "Error");
    }

    #[test]
    fn timeout_display() {
        let err = RpcError::Timeout {
            operation: "listUsers".into(),
            after: Duration::from_millis(250),
        };
        assert_eq!(err.to_string(), "listUsers timed out after 250ms");
    }

    #[test]
    fn from_remote_defaults() {
        let err = RpcError::from_remote(None, None);
        assert_eq!(
            err,
            RpcError::HandlerFailure {
                name: "EasyAdminError".into(),
                message: "Unknown error".into(),
            }
        );
    }

    #[test]
    fn from_remote_unknown_operation() {
        let err = RpcError::from_remote(
            Some("UnknownOperation"),
            Some("Unknown operation: fooBar"),
        );
        assert_eq!(
            err,
            RpcError::UnknownOperation {
                operation: "fooBar".into()
            }
        );
        assert_eq!(err.message(), "Unknown operation: fooBar");
    }

    #[test]
    fn from_remote_keeps_custom_name() {
        let err = RpcError::from_remote(Some("TypeError"), Some("bad arg"));
        assert_eq!(err.name(), "TypeError");
        assert_eq!(err.message(), "bad arg");
    }

    #[test]
    fn from_remote_unknown_operation_name_without_prefix() {
        let err = RpcError::from_remote(Some("UnknownOperation"), Some("feature disabled"));
        assert_eq!(
            err,
            RpcError::HandlerFailure {
                name: "UnknownOperation".into(),
                message: "feature disabled".into(),
            }
        );
        assert_eq!(err.to_string(), "feature disabled");
    }
}
