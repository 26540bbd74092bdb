//! Clipboard capability.

use anyhow::Result;

/// Writes text to the environment's clipboard.
///
/// The controller treats a failed write the same as a missing capability:
/// the error is logged and the copy button's visual state stays unchanged.
/// No retry is attempted.
pub trait ClipboardWriter {
    /// Write `text` to the clipboard, replacing its previous content.
    fn write_text(&self, text: &str) -> Result<()>;
}

/// System clipboard backed by `clipboard-rs`.
pub struct SystemClipboard {
    ctx: clipboard_rs::ClipboardContext,
}

impl SystemClipboard {
    /// Connect to the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error when no clipboard is reachable (e.g. a headless
    /// session).
    pub fn new() -> Result<Self> {
        let ctx = clipboard_rs::ClipboardContext::new()
            .map_err(|e| anyhow::anyhow!("clipboard access failed: {e}"))?;
        Ok(Self { ctx })
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        use clipboard_rs::Clipboard as _;
        self.ctx
            .set_text(text.to_string())
            .map_err(|e| anyhow::anyhow!("clipboard write failed: {e}"))
    }
}
