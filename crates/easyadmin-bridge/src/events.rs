//! Message events delivered to a window.

use easyadmin_common::{Origin, WindowId};
use serde::{Deserialize, Serialize};

/// A message delivered to a window by `post_message`.
///
/// `source` and `origin` are stamped by the bridge from the sending window,
/// so receivers can trust them; `data` is whatever the sender posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// The window that posted the message.
    pub source: WindowId,
    /// Origin of the sending window.
    pub origin: Origin,
    /// The posted message body.
    pub data: serde_json::Value,
}

impl MessageEvent {
    /// Whether the message was posted by the window with id `window`.
    pub fn is_from(&self, window: &WindowId) -> bool {
        &self.source == window
    }
}
