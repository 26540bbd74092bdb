//! Enhancement configuration for `sitelift.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                            |
//! |---------------|----------------------------------------------------|
//! | `[markup]`    | Class/attribute conventions of the rendered site   |
//! | `[theme]`     | Scheme storage key, root attribute, color mapping  |
//! | `[behavior]`  | Copy-button labels and timing                      |
//! | `[telemetry]` | Event reporting switch                             |
//!
//! Every field has a default reproducing the conventions of the site
//! generator this crate grew up with, so an empty (or absent) file is a
//! valid configuration.

pub mod section;

pub use section::{BehaviorConfig, MarkupConfig, TelemetryConfig, ThemeConfig};

use crate::error::EnhanceError;
use crate::log;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Root configuration structure representing sitelift.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Markup conventions consumed from the rendered site
    pub markup: MarkupConfig,

    /// Theme persistence and meta-color settings
    pub theme: ThemeConfig,

    /// Interactive behavior settings
    pub behavior: BehaviorConfig,

    /// Telemetry settings
    pub telemetry: TelemetryConfig,
}

impl EnhanceConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, EnhanceError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    pub fn load(path: &Path) -> Result<Self, EnhanceError> {
        let content =
            fs::read_to_string(path).map_err(|err| EnhanceError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), EnhanceError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }
}
