//! Call proxy: remote host operations as local async calls.
//!
//! Requests go to the parent window, addressed to the single trusted host
//! origin. A pump task reads the frame's inbox and hands every response
//! from that origin to the [`Correlator`].

use std::sync::Arc;
use std::time::Duration;

use easyadmin_bridge::{Inbox, MessageEvent, Window, WindowHandle, WindowParts};
use easyadmin_common::{new_request_id, Origin, RequestEnvelope, ResponseEnvelope, RpcError};
use easyadmin_config::ClientConfig;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::correlator::{CallReceiver, Correlator};


struct ProxyInner {
    window: WindowHandle,
    parent: WindowHandle,
    host_origin: Origin,
    call_timeout: Option<Duration>,
    correlator: Arc<Correlator>,
    pump: JoinHandle<()>,
}

impl Drop for ProxyInner {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Client end of the channel. Cheap to clone; all clones share one
/// correlator and one pump task.
#[derive(Clone)]
pub struct CallProxy {
    inner: Arc<ProxyInner>,
}

impl CallProxy {
    /// Take over `window`, the frame's own window, and start routing the
    /// host's responses.
    ///
    /// Fails with [`RpcError::ChannelClosed`] if the window is not embedded
    /// in a parent.
    pub fn connect(config: &ClientConfig, window: Window) -> Result<Self, RpcError> {
        let WindowParts {
            handle,
            parent,
            inbox,
        } = window.into_parts();
        let parent = parent.ok_or(RpcError::ChannelClosed)?;

        let correlator = Arc::new(Correlator::new());
        let pump = tokio::spawn(pump(
            inbox,
            parent.clone(),
            config.host_origin.clone(),
            Arc::clone(&correlator),
        ));

        info!(
            window = %handle.id(),
            host_origin = %config.host_origin,
            timeout_ms = config.call_timeout_ms,
            "call proxy connected"
        );

        Ok(Self {
            inner: Arc::new(ProxyInner {
                window: handle,
                parent,
                host_origin: config.host_origin.clone(),
                call_timeout: config.call_timeout(),
                correlator,
                pump,
            }),
        })
    }

    /// Call the host operation `operation` with positional `args`.
    pub async fn invoke(&self, operation: &str, args: Vec<Value>) -> Result<Value, RpcError> {
        if operation.is_empty() {
            return Err(RpcError::UnknownOperation {
                operation: String::new(),
            });
        }

        let inner = &self.inner;
        let (id, rx) = self.register(operation);
        let request = RequestEnvelope::new(id.clone(), operation, args);

        if let Err(e) = inner
            .parent
            .post_message(&inner.window, request.to_value(), &inner.host_origin)
        {
            inner.correlator.remove(&id);
            warn!(%id, %operation, error = %e, "failed to send call");
            return Err(e.into());
        }
        debug!(%id, %operation, "call sent");

        let received = match inner.call_timeout {
            Some(after) => match tokio::time::timeout(after, rx).await {
                Ok(received) => received,
                Err(_) => {
                    inner.correlator.remove(&id);
                    warn!(%id, %operation, timeout_ms = after.as_millis() as u64, "call timed out");
                    return Err(RpcError::Timeout {
                        operation: operation.to_string(),
                        after,
                    });
                }
            },
            None => rx.await,
        };

        received.unwrap_or(Err(RpcError::ChannelClosed))
    }

    /// Like [`CallProxy::invoke`], decoding the result into `T`.
    pub async fn invoke_typed<T: DeserializeOwned>(
        &self,
        operation: &str,
        args: Vec<Value>,
    ) -> Result<T, RpcError> {
        let value = self.invoke(operation, args).await?;
        serde_json::from_value(value).map_err(|e| RpcError::Decode(e.to_string()))
    }

    /// A callable handle bound to one operation name.
    pub fn operation(&self, name: impl Into<String>) -> RemoteOperation {
        RemoteOperation {
            proxy: self.clone(),
            name: name.into(),
        }
    }

    /// Number of calls still waiting for a response.
    pub fn pending_calls(&self) -> usize {
        self.inner.correlator.len()
    }

    pub fn host_origin(&self) -> &Origin {
        &self.inner.host_origin
    }

    fn register(&self, operation: &str) -> (String, CallReceiver) {
        loop {
            let id = new_request_id();
            if let Some(rx) = self.inner.correlator.register(&id, operation) {
                return (id, rx);
            }
            debug!(%id, "request id already outstanding, regenerating");
        }
    }
}

impl std::fmt::Debug for CallProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallProxy")
            .field("window", self.inner.window.id())
            .field("host_origin", &self.inner.host_origin)
            .field("pending", &self.pending_calls())
            .finish()
    }
}

/// One host operation, callable repeatedly.
#[derive(Debug, Clone)]
pub struct RemoteOperation {
    proxy: CallProxy,
    name: String,
}

impl RemoteOperation {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn call(&self, args: Vec<Value>) -> Result<Value, RpcError> {
        self.proxy.invoke(&self.name, args).await
    }

    pub async fn call_typed<T: DeserializeOwned>(&self, args: Vec<Value>) -> Result<T, RpcError> {
        self.proxy.invoke_typed(&self.name, args).await
    }
}

/// Route responses until the host window goes away, then fail whatever is
/// still outstanding.
///
/// Responses already queued when the host closes are routed first.
async fn pump(
    mut inbox: Inbox,
    parent: WindowHandle,
    host_origin: Origin,
    correlator: Arc<Correlator>,
) {
    loop {
        tokio::select! {
            biased;
            Some(event) = inbox.recv() => {
                route(&event, &host_origin, &correlator);
            }
            _ = parent.closed() => {
                while let Some(event) = inbox.try_recv() {
                    route(&event, &host_origin, &correlator);
                }
                let failed = correlator.fail_all(RpcError::ChannelClosed);
                warn!(failed, "host window closed");
                break;
            }
        }
    }
}

/// Hand one inbound message to the correlator if it is a response from the
/// host origin. Returns whether it completed a call.
fn route(event: &MessageEvent, host_origin: &Origin, correlator: &Correlator) -> bool {
    if &event.origin != host_origin {
        debug!(origin = %event.origin, "message from untrusted origin ignored");
        return false;
    }

    match ResponseEnvelope::from_value(&event.data) {
        Some(response) => correlator.resolve(response),
        None => {
            debug!(source = %event.source, "non-response message ignored");
            false
        }
    }
}
