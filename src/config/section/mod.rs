//! Configuration section definitions.

mod behavior;
mod markup;
mod telemetry;
mod theme;

pub use behavior::BehaviorConfig;
pub use markup::MarkupConfig;
pub use telemetry::TelemetryConfig;
pub use theme::ThemeConfig;
