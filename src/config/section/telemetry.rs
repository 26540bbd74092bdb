//! `[telemetry]` section configuration.

use serde::{Deserialize, Serialize};

/// Telemetry section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Master switch: when false neither outbound-click nor scroll-depth
    /// events are produced.
    pub enable: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { enable: true }
    }
}
