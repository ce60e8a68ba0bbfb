//! Outstanding-call bookkeeping.
//!
//! Each call registers its id before the request is sent. The first
//! response carrying that id removes the entry and completes the call;
//! anything else is ignored.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use easyadmin_common::{ResponseEnvelope, RpcError};
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::debug;

pub type CallResult = Result<Value, RpcError>;

/// Receives the outcome of one registered call.
pub type CallReceiver = oneshot::Receiver<CallResult>;

struct PendingCall {
    operation: String,
    tx: oneshot::Sender<CallResult>,
    registered_at: Instant,
}

/// Map of correlation id to the call waiting on it.
#[derive(Default)]
pub struct Correlator {
    pending: Mutex<HashMap<String, PendingCall>>,
}

impl Correlator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, PendingCall>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a call under `id`. Returns `None` if `id` is already
    /// outstanding; the existing call is left untouched.
    pub fn register(&self, id: &str, operation: &str) -> Option<CallReceiver> {
        let mut pending = self.lock();
        if pending.contains_key(id) {
            return None;
        }

        let (tx, rx) = oneshot::channel();
        pending.insert(
            id.to_string(),
            PendingCall {
                operation: operation.to_string(),
                tx,
                registered_at: Instant::now(),
            },
        );
        debug!(%id, %operation, outstanding = pending.len(), "call registered");
        Some(rx)
    }

    /// Complete the call matching `response.id`.
    ///
    /// Returns `false` when no call is waiting on that id.
    pub fn resolve(&self, response: ResponseEnvelope) -> bool {
        let Some(call) = self.lock().remove(&response.id) else {
            debug!(id = %response.id, "response for unknown call ignored");
            return false;
        };

        debug!(
            id = %response.id,
            operation = %call.operation,
            elapsed_ms = call.registered_at.elapsed().as_millis() as u64,
            error = response.is_error(),
            "call completed"
        );
        // The caller may have stopped waiting; nothing to do then.
        let _ = call.tx.send(response.into_result());
        true
    }

    /// Drop the call registered under `id` without completing it.
    pub fn remove(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Fail every outstanding call with `error`. Returns how many there were.
    pub fn fail_all(&self, error: RpcError) -> usize {
        let drained: Vec<_> = self.lock().drain().collect();
        let count = drained.len();
        for (id, call) in drained {
            debug!(%id, operation = %call.operation, %error, "call failed");
            let _ = call.tx.send(Err(error.clone()));
        }
        count
    }
}

impl std::fmt::Debug for Correlator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Correlator")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easyadmin_common::ErrorPayload;
    use serde_json::json;

    #[tokio::test]
    async fn resolves_matching_call() {
        let correlator = Correlator::new();
        let rx = correlator.register("req-1", "listUsers").unwrap();

        assert!(correlator.resolve(ResponseEnvelope::success("req-1", "listUsers", json!([]))));
        assert_eq!(rx.await.unwrap(), Ok(json!([])));
        assert!(correlator.is_empty());
    }

    #[tokio::test]
    async fn calls_are_isolated_by_id() {
        let correlator = Correlator::new();
        let a = correlator.register("req-a", "getCurrentUser").unwrap();
        let b = correlator.register("req-b", "listUsers").unwrap();

        correlator.resolve(ResponseEnvelope::success("req-b", "listUsers", json!("b")));
        correlator.resolve(ResponseEnvelope::success("req-a", "getCurrentUser", json!("a")));

        assert_eq!(a.await.unwrap(), Ok(json!("a")));
        assert_eq!(b.await.unwrap(), Ok(json!("b")));
    }

    #[test]
    fn unmatched_id_is_ignored() {
        let correlator = Correlator::new();
        let _rx = correlator.register("req-1", "listUsers").unwrap();

        assert!(!correlator.resolve(ResponseEnvelope::success("req-2", "listUsers", json!(1))));
        assert!(correlator.contains("req-1"));
        assert_eq!(correlator.len(), 1);
    }

    #[test]
    fn entry_is_completed_once() {
        let correlator = Correlator::new();
        let _rx = correlator.register("req-1", "listUsers").unwrap();

        assert!(correlator.resolve(ResponseEnvelope::success("req-1", "listUsers", json!(1))));
        assert!(!correlator.resolve(ResponseEnvelope::success("req-1", "listUsers", json!(2))));
    }

    #[test]
    fn duplicate_id_is_refused() {
        let correlator = Correlator::new();
        let _rx = correlator.register("req-1", "listUsers").unwrap();
        assert!(correlator.register("req-1", "createUser").is_none());
        assert_eq!(correlator.len(), 1);
    }

    #[tokio::test]
    async fn error_response_rejects_call() {
        let correlator = Correlator::new();
        let rx = correlator.register("req-1", "createUser").unwrap();

        correlator.resolve(ResponseEnvelope::failure(
            "req-1",
            "createUser",
            ErrorPayload::new("Error", "invalid"),
        ));
        let err = rx.await.unwrap().unwrap_err();
        assert_eq!(err.to_string(), "invalid");
    }

    #[tokio::test]
    async fn fail_all_drains_entries() {
        let correlator = Correlator::new();
        let a = correlator.register("req-a", "listUsers").unwrap();
        let b = correlator.register("req-b", "listUsers").unwrap();

        assert_eq!(correlator.fail_all(RpcError::ChannelClosed), 2);
        assert!(correlator.is_empty());
        assert_eq!(a.await.unwrap(), Err(RpcError::ChannelClosed));
        assert_eq!(b.await.unwrap(), Err(RpcError::ChannelClosed));
    }

    #[test]
    fn resolve_after_caller_gave_up() {
        let correlator = Correlator::new();
        drop(correlator.register("req-1", "listUsers"));
        assert!(correlator.resolve(ResponseEnvelope::success("req-1", "listUsers", json!(1))));
        assert!(correlator.is_empty());
    }
}
