//! Clipboard copy.

use log::warn;

use crate::error::{MeridianError, Result};

/// Message shown to the visitor when a copy fails.
pub const COPY_FAILED_MESSAGE: &str = "Unable to copy text to your clipboard.";

/// Something text can be copied to.
pub trait Clipboard {
    /// Writes `text`, or explains why it could not.
    fn write_text(&mut self, text: &str) -> std::result::Result<(), String>;
}

/// An in-process clipboard.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    denied: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write, like a browser without
    /// clipboard permission.
    pub fn denied() -> Self {
        Self {
            contents: None,
            denied: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> std::result::Result<(), String> {
        if self.denied {
            return Err("clipboard access denied".to_string());
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Copies `text`; on failure the error carries [`COPY_FAILED_MESSAGE`].
pub fn copy_to_clipboard(clipboard: &mut dyn Clipboard, text: &str) -> Result<()> {
    clipboard.write_text(text).map_err(|reason| {
        warn!("clipboard write failed: {reason}");
        MeridianError::ClipboardUnavailable {
            message: COPY_FAILED_MESSAGE.to_string(),
        }
    })
}
