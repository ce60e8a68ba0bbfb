use super::handle::WindowHandle;

/// The host document's reference to an embedded frame.
///
/// Its content window is the only sender a host dispatcher accepts calls
/// from.
#[derive(Debug, Clone)]
pub struct FrameElement {
    pub(super) content_window: WindowHandle,
}

impl FrameElement {
    pub fn content_window(&self) -> &WindowHandle {
        &self.content_window
    }
}
