//! Inbound call dispatch.
//!
//! Every message reaching the host window goes through three checks before
//! an operation runs:
//! 1. the sender must be the embedded frame's content window,
//! 2. the sender's origin must be on the allow-list,
//! 3. the body must be a request envelope with non-empty `id` and `operation`.
//!
//! Messages failing any check are dropped without an answer. Accepted calls
//! run on their own task and are always answered, with either the
//! operation's result or its failure.

use std::any::Any;
use std::sync::Arc;

use easyadmin_bridge::{FrameElement, MessageEvent, Window, WindowHandle, WindowParts};
use easyadmin_common::{
    parse_request, EnvelopeError, ErrorPayload, Origin, PayloadLimits, RequestEnvelope,
    ResponseEnvelope, RpcError,
};
use easyadmin_config::HostConfig;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::operation::Args;
use crate::registry::OperationRegistry;


/// Error name attached to responses whose handler panicked.
pub const PANIC_ERROR_NAME: &str = "Panic";

/// Why an inbound message did not reach an operation.
#[derive(Debug)]
pub enum Rejection {
    /// Dropped without an answer.
    Dropped(RpcError),
    /// Answered with an error response; the operation is not run.
    Answered(ResponseEnvelope),
}

/// Where the response to one call goes.
#[derive(Debug, Clone)]
pub struct ReplyTo {
    /// The host window the response is posted from.
    pub host: WindowHandle,
    /// The window that sent the call.
    pub target: WindowHandle,
    /// The origin the call arrived from. Responses are only delivered to a
    /// window still at this origin.
    pub origin: Origin,
}

impl ReplyTo {
    fn send(&self, response: &ResponseEnvelope) {
        if let Err(e) = self
            .target
            .post_message(&self.host, response.to_value(), &self.origin)
        {
            warn!(
                id = %response.id,
                operation = %response.operation,
                error = %e,
                "failed to deliver response"
            );
        }
    }
}

/// Routes validated calls from the embedded frame to the operation registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<OperationRegistry>,
    frame: FrameElement,
    config: Arc<HostConfig>,
    limits: PayloadLimits,
}

impl Dispatcher {
    pub fn new(config: &HostConfig, frame: FrameElement, registry: OperationRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            frame,
            config: Arc::new(config.clone()),
            limits: config.payload_limits(),
        }
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Run the validation sequence on one inbound message.
    pub fn validate(&self, event: &MessageEvent) -> Result<RequestEnvelope, Rejection> {
        let frame_window = self.frame.content_window();
        if !event.is_from(frame_window.id()) {
            return Err(Rejection::Dropped(RpcError::TransportRejected {
                reason: format!("sender {} is not the embedded frame", event.source),
            }));
        }

        if !self.config.is_origin_allowed(&event.origin) {
            return Err(Rejection::Dropped(RpcError::TransportRejected {
                reason: format!("origin {} is not allowed", event.origin),
            }));
        }

        parse_request(&event.data, &self.limits).map_err(Rejection::from)
    }

    /// Validate one inbound message and, if accepted, dispatch it on its
    /// own task. Returns the task handle for accepted calls.
    pub fn handle_event(&self, event: MessageEvent, host: &WindowHandle) -> Option<JoinHandle<()>> {
        let reply_to = ReplyTo {
            host: host.clone(),
            target: self.frame.content_window().clone(),
            origin: event.origin.clone(),
        };

        match self.validate(&event) {
            Ok(request) => {
                let dispatcher = self.clone();
                Some(tokio::spawn(async move {
                    dispatcher.dispatch(request, reply_to).await;
                }))
            }
            Err(Rejection::Answered(response)) => {
                warn!(
                    id = %response.id,
                    operation = %response.operation,
                    "request rejected: invalid payload"
                );
                reply_to.send(&response);
                None
            }
            Err(Rejection::Dropped(reason)) => {
                warn!(source = %event.source, origin = %event.origin, "{reason}");
                None
            }
        }
    }

    /// Run `request` against the registry and post the response.
    pub async fn dispatch(&self, request: RequestEnvelope, reply_to: ReplyTo) {
        let response = self.execute(request).await;
        reply_to.send(&response);
    }

    /// Run `request` against the registry.
    ///
    /// The operation runs on its own task; a panic inside it becomes a
    /// `Panic` error response.
    pub async fn execute(&self, request: RequestEnvelope) -> ResponseEnvelope {
        let RequestEnvelope {
            id,
            operation,
            payload,
        } = request;
        debug!(%id, %operation, args = payload.len(), "dispatching call");

        let registry = Arc::clone(&self.registry);
        let name = operation.clone();
        let task = tokio::spawn(async move { registry.invoke(&name, Args::new(payload)).await });

        let outcome = match task.await {
            Ok(result) => result.map_err(|e| e.to_payload()),
            Err(e) if e.is_panic() => Err(ErrorPayload::new(
                PANIC_ERROR_NAME,
                panic_message(e.into_panic()),
            )),
            Err(_) => Err(ErrorPayload::new("Error", "operation was cancelled")),
        };

        match outcome {
            Ok(value) => {
                debug!(%id, %operation, "call succeeded");
                ResponseEnvelope::success(id, operation, value)
            }
            Err(error) => {
                debug!(%id, %operation, name = %error.name, message = %error.message, "call failed");
                ResponseEnvelope::failure(id, operation, error)
            }
        }
    }

    /// The host message loop: handle every message the host window
    /// receives until the embedded frame's window is dropped. Messages
    /// queued before that are still handled.
    pub async fn run(self, window: Window) {
        let WindowParts {
            handle: host,
            mut inbox,
            ..
        } = window.into_parts();
        let frame_window = self.frame.content_window().clone();
        info!(
            window = %host.id(),
            operations = self.registry.len(),
            "dispatcher listening"
        );

        loop {
            tokio::select! {
                biased;
                Some(event) = inbox.recv() => {
                    self.handle_event(event, &host);
                }
                _ = frame_window.closed() => {
                    while let Some(event) = inbox.try_recv() {
                        self.handle_event(event, &host);
                    }
                    break;
                }
            }
        }

        info!(window = %host.id(), "dispatcher stopped: frame closed");
    }

    /// Start [`Dispatcher::run`] on a new task.
    pub fn spawn(self, window: Window) -> JoinHandle<()> {
        tokio::spawn(self.run(window))
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

impl From<EnvelopeError> for Rejection {
    fn from(err: EnvelopeError) -> Self {
        match err.to_response() {
            Some(response) => Rejection::Answered(response),
            None => Rejection::Dropped(RpcError::TransportRejected {
                reason: err.to_string(),
            }),
        }
    }
}
