//! Operation registry: the single source of truth for what the client frame
//! may call.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use easyadmin_common::errors::UNKNOWN_OPERATION_NAME;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::operation::{Args, Operation, OperationError};

/// Maps operation names to handlers.
///
/// Populated before the dispatcher starts and shared read-only afterwards.
#[derive(Clone, Default)]
pub struct OperationRegistry {
    operations: HashMap<String, Arc<dyn Operation>>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `operation` under `name`, replacing any existing entry.
    /// Returns `true` if an entry was replaced.
    pub fn register<O>(&mut self, name: impl Into<String>, operation: O) -> bool
    where
        O: Operation + 'static,
    {
        let name = name.into();
        let replaced = self
            .operations
            .insert(name.clone(), Arc::new(operation))
            .is_some();
        debug!(operation = %name, replaced, "operation registered");
        replaced
    }

    /// Register a handler whose result is any serializable type.
    pub fn register_typed<F, Fut, T>(&mut self, name: impl Into<String>, handler: F) -> bool
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, OperationError>> + Send + 'static,
        T: Serialize,
    {
        self.register(name, move |args: Args| {
            let fut = handler(args);
            async move {
                let value = fut.await?;
                serde_json::to_value(value).map_err(|e| OperationError::from_error(&e))
            }
        })
    }

    /// Remove the operation registered under `name`.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.operations.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Operation>> {
        self.operations.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Registered operation names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.operations.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Run the operation registered under `name`.
    ///
    /// An unregistered name fails with `Unknown operation: <name>`.
    pub async fn invoke(&self, name: &str, args: Args) -> Result<Value, OperationError> {
        let operation = self.get(name).ok_or_else(|| {
            OperationError::new(UNKNOWN_OPERATION_NAME, format!("Unknown operation: {name}"))
        })?;
        operation.call(args).await
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("operations", &self.names())
            .finish()
    }
}
