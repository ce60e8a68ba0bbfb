//! Cross-window message channel.
//!
//! Models the `postMessage` primitive between a host document and a frame
//! it embeds:
//! - Windows with an origin and a private inbox
//! - Parent/child relation between a host window and its embedded frame
//! - Delivery gated on the target window's origin
//! - Receivers see the sender's window id and origin as stamped by the bridge

pub mod events;
pub mod window;

use easyadmin_common::{Origin, RpcError, WindowId};

pub use events::MessageEvent;
pub use window::{FrameElement, Inbox, Window, WindowHandle, WindowParts};

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("window {0} is closed")]
    WindowClosed(WindowId),

    #[error("target origin mismatch: expected {expected}, window is {actual}")]
    TargetOriginMismatch { expected: Origin, actual: Origin },
}

impl From<BridgeError> for RpcError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::WindowClosed(_) => RpcError::ChannelClosed,
            other => RpcError::TransportRejected {
                reason: other.to_string(),
            },
        }
    }
}
