//! Wire envelopes exchanged between the client frame and the host window.
//!
//! Field names are part of the wire format and must stay as they are:
//! requests carry `id`, `operation`, `payload`; responses echo `id` and
//! `operation` and carry exactly one of `payload` or `error`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RpcError;

/// Error name used when a request's payload breaks the configured limits.
pub const INVALID_PAYLOAD_NAME: &str = "InvalidPayload";

/// A call from the client to a named host operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub id: String,
    pub operation: String,
    #[serde(default)]
    pub payload: Vec<Value>,
}

impl RequestEnvelope {
    pub fn new(id: impl Into<String>, operation: impl Into<String>, payload: Vec<Value>) -> Self {
        Self {
            id: id.into(),
            operation: operation.into(),
            payload,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "operation": self.operation,
            "payload": self.payload,
        })
    }
}

/// Structured failure carried by a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub name: String,
}

impl ErrorPayload {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: name.into(),
        }
    }
}

/// The host's answer to one [`RequestEnvelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub id: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl ResponseEnvelope {
    pub fn success(id: impl Into<String>, operation: impl Into<String>, payload: Value) -> Self {
        Self {
            id: id.into(),
            operation: operation.into(),
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failure(
        id: impl Into<String>,
        operation: impl Into<String>,
        error: ErrorPayload,
    ) -> Self {
        Self {
            id: id.into(),
            operation: operation.into(),
            payload: None,
            error: Some(error),
        }
    }

    /// Parse a response from an inbound message body.
    ///
    /// Anything that is not an object with a string `id` yields `None`.
    /// Every other field is read leniently: a non-string `operation` is
    /// treated as absent, and any truthy `error` marks a failure, keeping
    /// its `message` and `name` only when they are strings.
    pub fn from_value(data: &Value) -> Option<Self> {
        let obj = data.as_object()?;
        let id = obj.get("id")?.as_str()?;

        let operation = obj
            .get("operation")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let payload = obj.get("payload").filter(|v| !v.is_null()).cloned();
        let error = obj.get("error").filter(|e| is_truthy(e)).map(|e| {
            let field = |key: &str| {
                e.get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            ErrorPayload {
                message: field("message"),
                name: field("name"),
            }
        });

        Some(Self {
            id: id.to_string(),
            operation: operation.to_string(),
            payload,
            error,
        })
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Turn the response into the caller's result. An absent payload
    /// resolves to `null`.
    pub fn into_result(self) -> Result<Value, RpcError> {
        match self.error {
            Some(err) => Err(RpcError::from_remote(
                Some(err.name.as_str()),
                Some(err.message.as_str()),
            )),
            None => Ok(self.payload.unwrap_or(Value::Null)),
        }
    }
}

/// Bounds applied to a request payload before its handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadLimits {
    /// Maximum number of positional arguments.
    pub max_args: usize,
    /// Maximum nesting depth of any argument (a scalar has depth 0).
    pub max_depth: usize,
    /// Maximum size of the payload serialized as JSON.
    pub max_bytes: usize,
}

impl Default for PayloadLimits {
    fn default() -> Self {
        Self {
            max_args: 32,
            max_depth: 32,
            max_bytes: 1024 * 1024,
        }
    }
}

/// Why an inbound request could not be turned into a [`RequestEnvelope`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnvelopeError {
    /// The message does not look like a request at all. Dropped silently.
    #[error("malformed request: {0}")]
    Malformed(&'static str),

    /// The header is valid but the payload is not. Answered with an error.
    #[error("invalid payload for {operation}: {reason}")]
    InvalidPayload {
        id: String,
        operation: String,
        reason: String,
    },
}

impl EnvelopeError {
    /// The error response owed to the sender, if any.
    pub fn to_response(&self) -> Option<ResponseEnvelope> {
        match self {
            EnvelopeError::Malformed(_) => None,
            EnvelopeError::InvalidPayload {
                id,
                operation,
                reason,
            } => Some(ResponseEnvelope::failure(
                id.clone(),
                operation.clone(),
                ErrorPayload::new(INVALID_PAYLOAD_NAME, reason.clone()),
            )),
        }
    }
}

/// Validate the shape of an inbound request and extract its arguments.
///
/// The message must be an object with non-empty string `id` and `operation`
/// fields. A missing or `null` payload is an empty argument list; any other
/// non-array payload, or one that breaks `limits`, is reported as
/// [`EnvelopeError::InvalidPayload`].
pub fn parse_request(data: &Value, limits: &PayloadLimits) -> Result<RequestEnvelope, EnvelopeError> {
    let obj = data
        .as_object()
        .ok_or(EnvelopeError::Malformed("not an object"))?;

    let id = non_empty_str(obj.get("id")).ok_or(EnvelopeError::Malformed("missing id"))?;
    let operation = non_empty_str(obj.get("operation"))
        .ok_or(EnvelopeError::Malformed("missing operation"))?;

    let invalid = |reason: String| EnvelopeError::InvalidPayload {
        id: id.to_string(),
        operation: operation.to_string(),
        reason,
    };

    let payload = match obj.get("payload") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(args)) => args.clone(),
        Some(_) => return Err(invalid("payload must be an array".into())),
    };

    if payload.len() > limits.max_args {
        return Err(invalid(format!(
            "too many arguments: {} (max {})",
            payload.len(),
            limits.max_args
        )));
    }

    if payload.iter().any(|arg| exceeds_depth(arg, limits.max_depth)) {
        return Err(invalid(format!(
            "argument nesting exceeds depth {}",
            limits.max_depth
        )));
    }

    let size = serde_json::to_vec(&payload).map(|b| b.len()).unwrap_or(0);
    if size > limits.max_bytes {
        return Err(invalid(format!(
            "payload too large: {size} bytes (max {})",
            limits.max_bytes
        )));
    }

    Ok(RequestEnvelope::new(id, operation, payload))
}

/// JavaScript truthiness: everything except `null`, `false`, `0` and `""`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Whether `value` nests deeper than `max`. Stops descending once the
/// bound is crossed.
fn exceeds_depth(value: &Value, max: usize) -> bool {
    match value {
        Value::Array(items) => max == 0 || items.iter().any(|v| exceeds_depth(v, max - 1)),
        Value::Object(map) => max == 0 || map.values().any(|v| exceeds_depth(v, max - 1)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn limits() -> PayloadLimits {
        PayloadLimits::default()
    }

    #[test]
    fn request_wire_fields() {
        let req = RequestEnvelope::new("req-1", "listUsers", vec![]);
        assert_eq!(
            req.to_value(),
            json!({"id": "req-1", "operation": "listUsers", "payload": []})
        );
    }

    #[test]
    fn success_response_omits_error() {
        let res = ResponseEnvelope::success("req-1", "listUsers", json!([1, 2]));
        assert_eq!(
            res.to_value(),
            json!({"id": "req-1", "operation": "listUsers", "payload": [1, 2]})
        );
    }

    #[test]
    fn failure_response_omits_payload() {
        let res = ResponseEnvelope::failure(
            "req-2",
            "createUser",
            ErrorPayload::new("Error", "invalid"),
        );
        assert_eq!(
            res.to_value(),
            json!({
                "id": "req-2",
                "operation": "createUser",
                "error": {"message": "invalid", "name": "Error"}
            })
        );
    }

    #[test]
    fn parse_accepts_well_formed_request() {
        let data = json!({"id": "req-1", "operation": "createUser", "payload": [{"name": "X"}]});
        let req = parse_request(&data, &limits()).unwrap();
        assert_eq!(req.id, "req-1");
        assert_eq!(req.operation, "createUser");
        assert_eq!(req.payload, vec![json!({"name": "X"})]);
    }

    #[test]
    fn parse_treats_missing_payload_as_empty() {
        let data = json!({"id": "req-1", "operation": "listUsers"});
        assert!(parse_request(&data, &limits()).unwrap().payload.is_empty());

        let data = json!({"id": "req-1", "operation": "listUsers", "payload": null});
        assert!(parse_request(&data, &limits()).unwrap().payload.is_empty());
    }

    #[test]
    fn parse_rejects_malformed_shapes() {
        let cases = [
            json!("listUsers"),
            json!(42),
            json!(null),
            json!([1, 2, 3]),
            json!({"operation": "listUsers"}),
            json!({"id": "req-1"}),
            json!({"id": "", "operation": "listUsers"}),
            json!({"id": "req-1", "operation": ""}),
            json!({"id": 7, "operation": "listUsers"}),
        ];
        for data in cases {
            let err = parse_request(&data, &limits()).unwrap_err();
            assert!(
                matches!(err, EnvelopeError::Malformed(_)),
                "expected malformed for {data}"
            );
            assert!(err.to_response().is_none());
        }
    }

    #[test]
    fn parse_rejects_non_array_payload_with_response() {
        let data = json!({"id": "req-1", "operation": "createUser", "payload": {"name": "X"}});
        let err = parse_request(&data, &limits()).unwrap_err();
        let res = err.to_response().unwrap();
        assert_eq!(res.id, "req-1");
        assert_eq!(res.operation, "createUser");
        let error = res.error.unwrap();
        assert_eq!(error.name, "InvalidPayload");
        assert_eq!(error.message, "payload must be an array");
    }

    #[test]
    fn parse_enforces_arg_count() {
        let limits = PayloadLimits {
            max_args: 2,
            ..PayloadLimits::default()
        };
        let data = json!({"id": "r", "operation": "op", "payload": [1, 2, 3]});
        let err = parse_request(&data, &limits).unwrap_err();
        assert!(err.to_string().contains("too many arguments: 3 (max 2)"));
    }

    #[test]
    fn parse_enforces_depth() {
        let limits = PayloadLimits {
            max_depth: 2,
            ..PayloadLimits::default()
        };
        let ok = json!({"id": "r", "operation": "op", "payload": [{"a": {"b": 1}}]});
        assert!(parse_request(&ok, &limits).is_ok());

        let deep = json!({"id": "r", "operation": "op", "payload": [{"a": {"b": [1]}}]});
        let err = parse_request(&deep, &limits).unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidPayload { .. }));
    }

    #[test]
    fn parse_enforces_size() {
        let limits = PayloadLimits {
            max_bytes: 16,
            ..PayloadLimits::default()
        };
        let data = json!({"id": "r", "operation": "op", "payload": ["a long string argument"]});
        let err = parse_request(&data, &limits).unwrap_err();
        assert!(err.to_string().contains("payload too large"));
    }

    #[test]
    fn response_from_value_requires_string_id() {
        assert!(ResponseEnvelope::from_value(&json!({"operation": "x"})).is_none());
        assert!(ResponseEnvelope::from_value(&json!({"id": 1})).is_none());
        assert!(ResponseEnvelope::from_value(&json!("hello")).is_none());

        let res = ResponseEnvelope::from_value(&json!({"id": "req-9", "payload": 5})).unwrap();
        assert_eq!(res.id, "req-9");
        assert_eq!(res.into_result().unwrap(), json!(5));
    }

    #[test]
    fn into_result_rebuilds_error() {
        let res = ResponseEnvelope::from_value(&json!({
            "id": "req-3",
            "operation": "createUser",
            "error": {"message": "invalid", "name": "Error"}
        }))
        .unwrap();
        let err = res.into_result().unwrap_err();
        assert_eq!(err.message(), "invalid");
        assert_eq!(err.name(), "Error");
    }

    #[test]
    fn response_fields_are_read_leniently() {
        let res = ResponseEnvelope::from_value(&json!({"id": "req-5", "error": "boom"})).unwrap();
        let err = res.into_result().unwrap_err();
        assert_eq!(err.name(), "EasyAdminError");
        assert_eq!(err.message(), "Unknown error");

        let res = ResponseEnvelope::from_value(&json!({
            "id": "req-6",
            "error": {"message": 5, "name": "Error"}
        }))
        .unwrap();
        let err = res.into_result().unwrap_err();
        assert_eq!(err.name(), "Error");
        assert_eq!(err.message(), "Unknown error");

        let res =
            ResponseEnvelope::from_value(&json!({"id": "req-7", "operation": 5, "payload": [1]}))
                .unwrap();
        assert_eq!(res.operation, "");
        assert_eq!(res.into_result().unwrap(), json!([1]));
    }

    #[test]
    fn falsy_error_is_not_a_failure() {
        for error in [json!(null), json!(false), json!(0), json!("")] {
            let res = ResponseEnvelope::from_value(&json!({
                "id": "req-8",
                "payload": "ok",
                "error": error
            }))
            .unwrap();
            assert_eq!(res.into_result().unwrap(), json!("ok"), "error = {error}");
        }
    }

    #[test]
    fn into_result_defaults_missing_payload_to_null() {
        let res = ResponseEnvelope::from_value(&json!({"id": "req-4", "operation": "ping"})).unwrap();
        assert_eq!(res.into_result().unwrap(), Value::Null);
    }
}
