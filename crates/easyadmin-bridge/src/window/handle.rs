use easyadmin_common::{Origin, WindowId};
use tokio::sync::mpsc;
use tracing::debug;

use crate::events::MessageEvent;
use crate::BridgeError;

/// Cloneable reference to a window. Anyone holding a handle can post
/// messages to the window; only the window itself can read them.
#[derive(Debug, Clone)]
pub struct WindowHandle {
    pub(super) id: WindowId,
    pub(super) origin: Origin,
    pub(super) tx: mpsc::UnboundedSender<MessageEvent>,
}

impl WindowHandle {
    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Whether the window behind this handle has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Resolves once the window behind this handle has been dropped.
    pub async fn closed(&self) {
        self.tx.closed().await
    }

    /// Whether two handles refer to the same window.
    pub fn same_window(&self, other: &WindowHandle) -> bool {
        self.id == other.id
    }

    /// Post `data` to this window on behalf of `source`.
    ///
    /// The message is only delivered when this window's origin equals
    /// `target_origin`; otherwise it is discarded and
    /// [`BridgeError::TargetOriginMismatch`] is returned so the sender can
    /// log it. The receiving window sees `source`'s id and origin, never
    /// values chosen by the sender.
    pub fn post_message(
        &self,
        source: &WindowHandle,
        data: serde_json::Value,
        target_origin: &Origin,
    ) -> Result<(), BridgeError> {
        if &self.origin != target_origin {
            debug!(
                target = %self.id,
                expected = %target_origin,
                actual = %self.origin,
                "message discarded: target origin mismatch"
            );
            return Err(BridgeError::TargetOriginMismatch {
                expected: target_origin.clone(),
                actual: self.origin.clone(),
            });
        }

        let event = MessageEvent {
            source: source.id.clone(),
            origin: source.origin.clone(),
            data,
        };

        self.tx
            .send(event)
            .map_err(|_| BridgeError::WindowClosed(self.id.clone()))
    }
}
