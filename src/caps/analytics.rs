//! Analytics capability.

use serde_json::{Map, Value};

/// Flat mapping of property names to string/number values attached to an
/// event.
pub type EventProps = Map<String, Value>;

/// External event-reporting sink.
///
/// Emission is fire-and-forget: the controller never inspects a result, and
/// absence of a sink is not an error (events still reach the diagnostic
/// log).
pub trait AnalyticsSink {
    /// Report `event` with its properties.
    fn track(&self, event: &str, props: &EventProps);
}
