//! sitelift - client-side enhancement runtime for static documentation sites.
//!
//! A rendered page gets scanned into a lightweight [`Page`] model, a
//! [`SiteEnhancer`] wires independent sub-behaviors against it (anchor
//! navigation, section highlighting, reading progress, copy buttons, lazy
//! images, reveal animations, theme persistence, mobile menu, telemetry),
//! and the embedding host then drives the controller with [`UiEvent`]s and
//! executes the [`Effect`]s it returns.
//!
//! ```no_run
//! use sitelift::{Capabilities, EnhanceConfig, Page, SiteEnhancer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let html = std::fs::read_to_string("site/index.html")?;
//! let page = Page::parse(&html, Some("https://docs.example.org/"))?;
//! let mut enhancer = SiteEnhancer::initialize(
//!     page,
//!     EnhanceConfig::default(),
//!     Capabilities::default(),
//! );
//!
//! // ... translate host events into enhancer.handle_event(...) calls
//! enhancer.set_theme("slate");
//! # Ok(())
//! # }
//! ```

pub mod caps;
pub mod config;
pub mod error;
pub mod event;
pub mod logger;
pub mod observe;
pub mod page;
pub mod utils;

mod enhancer;

pub use caps::{
    AnalyticsSink, Capabilities, ClipboardWriter, EventProps, JsonFileStore, MemoryStore,
    PreferenceStore, SystemClipboard,
};
pub use config::EnhanceConfig;
pub use error::EnhanceError;
pub use event::{Effect, ScrollMetrics, TimerToken, UiEvent};
pub use observe::{SubscriptionHandle, VisibilityRegistry, Watcher};
pub use page::{ElementNode, NodeId, Page, PageNode};

pub use enhancer::SiteEnhancer;
