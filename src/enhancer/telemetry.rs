//! Outbound-link and scroll-depth telemetry.
//!
//! Events are fire-and-forget: forwarded to the analytics sink when one was
//! injected, and always written to the diagnostic log.

use serde_json::Value;
use smallvec::SmallVec;

use crate::caps::{Capabilities, EventProps};
use crate::event::ScrollMetrics;
use crate::log;
use crate::page::{NodeId, Page};

/// Scroll-depth thresholds, in percent of the scrollable distance.
const DEPTH_THRESHOLDS: [u8; 4] = [25, 50, 75, 100];

/// Ordered threshold table with monotonic fire-once flags.
///
/// Flags only ever go false -> true within one page view.
#[derive(Debug)]
pub(crate) struct ScrollDepthTracker {
    thresholds: [(u8, bool); 4],
}

impl Default for ScrollDepthTracker {
    fn default() -> Self {
        Self {
            thresholds: DEPTH_THRESHOLDS.map(|t| (t, false)),
        }
    }
}

impl ScrollDepthTracker {
    /// Mark `percent` reached; returns the thresholds newly crossed,
    /// in ascending order.
    pub(crate) fn mark(&mut self, percent: u8) -> SmallVec<[u8; 4]> {
        let mut fired = SmallVec::new();
        for (threshold, done) in &mut self.thresholds {
            if percent >= *threshold && !*done {
                *done = true;
                fired.push(*threshold);
            }
        }
        fired
    }
}

#[derive(Debug, Default)]
pub(crate) struct Telemetry {
    enabled: bool,
    depth: ScrollDepthTracker,
}

impl Telemetry {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            depth: ScrollDepthTracker::default(),
        }
    }

    /// Emit `outbound_click` when the activated link leaves the page's host.
    ///
    /// Links without a host (`mailto:`, fragments, relative paths resolving
    /// onto the page host) never count as outbound.
    pub(crate) fn on_click(&self, anchor: NodeId, page: &Page, caps: &Capabilities) {
        if !self.enabled {
            return;
        }
        let Some(base) = page.base_url() else {
            return;
        };
        let Some(href) = page.element(anchor).and_then(|e| e.attr("href")) else {
            return;
        };
        let Ok(resolved) = base.join(href) else {
            return;
        };
        let (Some(link_host), Some(page_host)) = (resolved.host_str(), base.host_str()) else {
            return;
        };
        if link_host == page_host {
            return;
        }

        let mut props = EventProps::new();
        props.insert("url".to_string(), Value::String(resolved.to_string()));
        props.insert(
            "text".to_string(),
            Value::String(page.text_content(anchor).trim().to_string()),
        );
        emit(caps, "outbound_click", &props);
    }

    /// Emit `scroll_depth` for each threshold first reached by this event.
    pub(crate) fn on_scroll(&mut self, metrics: &ScrollMetrics, caps: &Capabilities) {
        if !self.enabled {
            return;
        }
        for threshold in self.depth.mark(metrics.percent()) {
            let mut props = EventProps::new();
            props.insert("depth".to_string(), Value::String(format!("{threshold}%")));
            emit(caps, "scroll_depth", &props);
        }
    }
}

fn emit(caps: &Capabilities, event: &str, props: &EventProps) {
    if let Some(sink) = caps.analytics.as_ref() {
        sink.track(event, props);
    }
    log!("telemetry"; "{} {}", event, Value::Object(props.clone()));
}
