//! `[theme]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [theme]
//! default_scheme = "default"
//! dark_scheme = "slate"
//!
//! [theme.colors]
//! default = "#0066cc"
//! slate = "#1e293b"
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Theme section configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Key of the persisted preference entry.
    pub storage_key: String,
    /// Color-scheme attribute on the document root.
    pub root_attr: String,
    /// Scheme applied when nothing is persisted.
    pub default_scheme: String,
    /// Scheme the theme toggle switches to.
    pub dark_scheme: String,
    /// Scheme name to `meta[name=theme-color]` content.
    ///
    /// Schemes are an open vocabulary; an unmapped scheme falls back to the
    /// default scheme's color.
    pub colors: FxHashMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let mut colors = FxHashMap::default();
        colors.insert("default".to_string(), "#0066cc".to_string());
        colors.insert("slate".to_string(), "#1e293b".to_string());
        Self {
            storage_key: "md-theme".into(),
            root_attr: "data-md-color-scheme".into(),
            default_scheme: "default".into(),
            dark_scheme: "slate".into(),
            colors,
        }
    }
}

impl ThemeConfig {
    /// Meta color for `scheme`, falling back to the default scheme's color.
    pub fn meta_color(&self, scheme: &str) -> Option<&str> {
        self.colors
            .get(scheme)
            .or_else(|| self.colors.get(&self.default_scheme))
            .map(String::as_str)
    }
}
