//! Best-effort platform capabilities
//!
//! Clipboard, speech synthesis, the share sheet, warnings and scrolling are
//! all fire-and-forget: a host that cannot perform one simply ignores the
//! call. Nothing here may block or fail the conversation flow.

/// Capabilities the hosting platform may provide
pub trait Platform: Send + Sync {
    /// Surface a user-facing warning (e.g. an empty-prompt submission)
    fn warn(&self, _message: &str) {}

    /// Scroll the conversation display to the newest turn
    fn scroll_to_bottom(&self) {}

    /// Copy a message to the clipboard
    fn copy_to_clipboard(&self, _text: &str) {}

    /// Read a message aloud
    fn speak(&self, _text: &str) {}

    /// Open the native share sheet for a message
    fn share(&self, _text: &str) {}
}

/// Platform with no capabilities; every call is a silent no-op
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessPlatform;

impl Platform for HeadlessPlatform {}
