//! Injected capabilities.
//!
//! Everything the controller needs from its environment beyond the page
//! model is an explicit, optional dependency handed over at construction.
//! There is no ambient lookup: a capability the host did not provide simply
//! degrades that one sub-behavior (logged, never fatal).

mod analytics;
mod clipboard;
mod storage;

pub use analytics::{AnalyticsSink, EventProps};
pub use clipboard::{ClipboardWriter, SystemClipboard};
pub use storage::{JsonFileStore, MemoryStore, PreferenceStore};

/// Capability bundle injected into the controller.
///
/// `Default` yields a fully degraded environment: no clipboard, no
/// persistence, no analytics, but visibility observation assumed available.
pub struct Capabilities {
    /// Clipboard writer for copy-to-clipboard buttons.
    pub clipboard: Option<Box<dyn ClipboardWriter>>,
    /// Durable key-value store for the theme preference.
    pub preferences: Option<Box<dyn PreferenceStore>>,
    /// External event-reporting sink.
    pub analytics: Option<Box<dyn AnalyticsSink>>,
    /// Whether the host supports visibility observation. When false, the
    /// intersection-driven sub-behaviors (section highlighting, lazy
    /// loading, reveal) are skipped entirely at setup time.
    pub visibility: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            clipboard: None,
            preferences: None,
            analytics: None,
            visibility: true,
        }
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("clipboard", &self.clipboard.is_some())
            .field("preferences", &self.preferences.is_some())
            .field("analytics", &self.analytics.is_some())
            .field("visibility", &self.visibility)
            .finish()
    }
}
