//! Host operations and their arguments.
//!
//! An operation receives the request's positional arguments and resolves
//! to a JSON value or fails with an [`OperationError`], which is sent back
//! to the caller as `{ message, name }`.

use std::future::Future;

use async_trait::async_trait;
use easyadmin_common::ErrorPayload;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Failure raised by an operation handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{name}: {message}")]
pub struct OperationError {
    pub name: String,
    pub message: String,
}

impl OperationError {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// A plain failure, named `Error`.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    /// A bad argument, named `TypeError`.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new("TypeError", message)
    }

    /// Wrap any error using its string representation as the message.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::msg(err.to_string())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload::new(self.name.clone(), self.message.clone())
    }
}

impl From<serde_json::Error> for OperationError {
    fn from(err: serde_json::Error) -> Self {
        Self::type_error(err.to_string())
    }
}

/// Positional arguments of one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Value>);

impl Args {
    pub fn new(args: Vec<Value>) -> Self {
        Self(args)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw argument at `index`.
    pub fn raw(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Decode the required argument at `index`.
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Result<T, OperationError> {
        let value = self
            .0
            .get(index)
            .ok_or_else(|| OperationError::type_error(format!("missing argument {index}")))?;
        serde_json::from_value(value.clone()).map_err(|e| {
            OperationError::type_error(format!("argument {index}: {e}"))
        })
    }

    /// Decode the argument at `index`, treating absent and `null` as `None`.
    pub fn optional<T: DeserializeOwned>(&self, index: usize) -> Result<Option<T>, OperationError> {
        match self.0.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.get(index).map(Some),
        }
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Args {
    fn from(args: Vec<Value>) -> Self {
        Self(args)
    }
}

/// A named asynchronous operation exposed to the client frame.
#[async_trait]
pub trait Operation: Send + Sync {
    async fn call(&self, args: Args) -> Result<Value, OperationError>;
}

#[async_trait]
impl<F, Fut> Operation for F
where
    F: Fn(Args) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, OperationError>> + Send + 'static,
{
    async fn call(&self, args: Args) -> Result<Value, OperationError> {
        (self)(args).await
    }
}
