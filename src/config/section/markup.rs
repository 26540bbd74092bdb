//! `[markup]` section configuration.
//!
//! Names the class and attribute conventions the site generator emits.
//! The enhancer does not validate them: an absent convention simply means
//! the matching sub-behavior finds nothing to attach to.
//!
//! # Example
//!
//! ```toml
//! [markup]
//! code_block_class = "highlight"
//! lazy_attr = "data-src"
//! ```

use serde::{Deserialize, Serialize};

/// Markup conventions section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Class marking highlighted code-block containers.
    pub code_block_class: String,
    /// Class marking in-page navigation links.
    pub nav_link_class: String,
    /// Deferred-source attribute on lazily loaded images.
    pub lazy_attr: String,
    /// "Not yet loaded" marker class removed on promotion.
    pub lazy_class: String,
    /// Classes whose elements are revealed on first intersection.
    pub reveal_classes: Vec<String>,
    /// `id` of the mobile menu container.
    pub menu_id: String,
    /// Class given to the injected reading-progress indicator.
    pub progress_class: String,
    /// Class given to injected copy buttons.
    pub copy_button_class: String,
    /// Class marking the active navigation link.
    pub active_class: String,
    /// Class marking a copy button in its transient "copied" state.
    pub copied_class: String,
    /// Class hiding the mobile menu.
    pub hidden_class: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            code_block_class: "highlight".into(),
            nav_link_class: "md-nav__link".into(),
            lazy_attr: "data-src".into(),
            lazy_class: "lazy".into(),
            reveal_classes: vec!["custom-card".into(), "admonition".into()],
            menu_id: "mobileMenu".into(),
            progress_class: "reading-progress".into(),
            copy_button_class: "copy-code-button".into(),
            active_class: "active".into(),
            copied_class: "copied".into(),
            hidden_class: "hidden".into(),
        }
    }
}
