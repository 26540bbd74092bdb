//! `[behavior]` section configuration.

use serde::{Deserialize, Serialize};

/// Interactive behavior section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// How long the "copied" state lasts before reverting, in milliseconds.
    pub copied_reset_ms: u64,
    /// Copy button label in its idle state.
    pub copy_label: String,
    /// Copy button label after a successful write.
    pub copied_label: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            copied_reset_ms: 2000,
            copy_label: "Copy".into(),
            copied_label: "Copied!".into(),
        }
    }
}
