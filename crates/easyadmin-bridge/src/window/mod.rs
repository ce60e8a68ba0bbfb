//! In-process windows connected by `post_message`.
//!
//! A [`Window`] owns its inbox; [`WindowHandle`]s are the cloneable
//! references other windows post through. [`Window::embed`] creates a child
//! frame whose parent is the embedding window, mirroring a host document and
//! the frame it embeds.

use easyadmin_common::{Origin, WindowId};
use tokio::sync::mpsc;
use tracing::debug;

use crate::events::MessageEvent;

mod frame;
mod handle;

pub use frame::FrameElement;
pub use handle::WindowHandle;

/// Receiving end of a window's message queue.
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<MessageEvent>,
}

impl Inbox {
    /// Wait for the next message. Returns `None` only once every handle to
    /// the window, including its own, has been dropped; while the owner
    /// keeps its handle this waits indefinitely.
    pub async fn recv(&mut self) -> Option<MessageEvent> {
        self.rx.recv().await
    }

    /// Take a queued message without waiting.
    pub fn try_recv(&mut self) -> Option<MessageEvent> {
        self.rx.try_recv().ok()
    }
}

/// The pieces of a window, for moving its inbox into a task.
#[derive(Debug)]
pub struct WindowParts {
    pub handle: WindowHandle,
    pub parent: Option<WindowHandle>,
    pub inbox: Inbox,
}

/// A window participating in the message channel.
#[derive(Debug)]
pub struct Window {
    handle: WindowHandle,
    parent: Option<WindowHandle>,
    inbox: Inbox,
}

impl Window {
    /// Create a top-level window served from `origin`.
    pub fn new(origin: impl Into<Origin>) -> Self {
        Self::with_parent(origin.into(), None)
    }

    fn with_parent(origin: Origin, parent: Option<WindowHandle>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = WindowHandle {
            id: WindowId::new(),
            origin,
            tx,
        };
        debug!(window = %handle.id, origin = %handle.origin, "window created");
        Self {
            handle,
            parent,
            inbox: Inbox { rx },
        }
    }

    /// Embed a child frame served from `origin`.
    ///
    /// Returns the frame element the embedding document keeps and the
    /// frame's own window, whose parent is this window.
    pub fn embed(&self, origin: impl Into<Origin>) -> (FrameElement, Window) {
        let child = Self::with_parent(origin.into(), Some(self.handle.clone()));
        let element = FrameElement {
            content_window: child.handle.clone(),
        };
        (element, child)
    }

    pub fn handle(&self) -> &WindowHandle {
        &self.handle
    }

    pub fn id(&self) -> &WindowId {
        &self.handle.id
    }

    pub fn origin(&self) -> &Origin {
        &self.handle.origin
    }

    /// The embedding window, if this window is a frame.
    pub fn parent(&self) -> Option<&WindowHandle> {
        self.parent.as_ref()
    }

    pub async fn recv(&mut self) -> Option<MessageEvent> {
        self.inbox.recv().await
    }

    pub fn try_recv(&mut self) -> Option<MessageEvent> {
        self.inbox.try_recv()
    }

    pub fn into_parts(self) -> WindowParts {
        WindowParts {
            handle: self.handle,
            parent: self.parent,
            inbox: self.inbox,
        }
    }
}
