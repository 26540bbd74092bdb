//! Event and Effect Definitions
//!
//! Message types crossing the host boundary.
//!
//! ```text
//! host --UiEvent--> SiteEnhancer --Vec<Effect>--> host
//! ```
//!
//! The host (browser glue, webview shell, test harness) translates native
//! events into [`UiEvent`] values and executes the returned [`Effect`]s.
//! Document mutation is never an effect: the enhancer edits its own
//! [`Page`](crate::page::Page) model directly.

use crate::page::NodeId;

// =============================================================================
// Inbound Events
// =============================================================================

/// Geometry sampled by the host on every scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top of the document, in pixels.
    pub scroll_top: f64,
    /// Height of the visible viewport, in pixels.
    pub viewport_height: f64,
    /// Total height of the document, in pixels.
    pub document_height: f64,
}

impl ScrollMetrics {
    /// Fraction of the scrollable distance traversed, clamped to `[0, 1]`.
    ///
    /// A document no taller than the viewport has nothing to scroll:
    /// a non-positive denominator yields 0, never `NaN` or a negative value.
    pub fn progress(&self) -> f64 {
        let scrollable = self.document_height - self.viewport_height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scroll_top / scrollable).clamp(0.0, 1.0)
    }

    /// Scroll depth as a rounded percentage in `0..=100`.
    pub fn percent(&self) -> u8 {
        (self.progress() * 100.0).round() as u8
    }
}

/// Handle for a timer requested via [`Effect::StartTimer`].
///
/// The host echoes it back in [`UiEvent::TimerFired`] once the delay has
/// elapsed. Tokens are never reused within one page view; stale tokens are
/// ignored on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub(crate) u32);

/// Events delivered by the host to the enhancer.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Pointer activation on an element (or one of its descendants).
    Click { target: NodeId },
    /// The document scrolled; carries freshly sampled geometry.
    Scroll { metrics: ScrollMetrics },
    /// A watched element's visible area crossed into the viewport.
    ///
    /// `ratio` is the intersection ratio in `[0, 1]`. Delivery order between
    /// independently watched elements is the host's dispatch order.
    Intersection { target: NodeId, ratio: f64 },
    /// The document root's attribute changed from outside the enhancer
    /// (the mutation-observer analog).
    RootAttrChanged { name: String, value: Option<String> },
    /// The user operated the theme toggle control.
    ThemeToggled { dark: bool },
    /// The user operated the mobile menu toggle control.
    MenuToggled { open: bool },
    /// A previously requested timer elapsed.
    TimerFired { timer: TimerToken },
}

// =============================================================================
// Outbound Effects
// =============================================================================

/// Host-executed side effects produced while handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Smoothly scroll the given element into view.
    ScrollIntoView { target: NodeId },
    /// Update the history entry's fragment without navigation
    /// (includes the leading `#`).
    PushHistory { fragment: String },
    /// Deliver [`UiEvent::TimerFired`] for `timer` after `delay_ms`.
    StartTimer { timer: TimerToken, delay_ms: u64 },
    /// Lock or unlock document scrolling (open mobile menu).
    SetScrollLock { locked: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_matches_ratio_in_range() {
        let m = ScrollMetrics {
            scroll_top: 300.0,
            viewport_height: 600.0,
            document_height: 1800.0,
        };
        assert!((m.progress() - 0.25).abs() < f64::EPSILON);
        assert_eq!(m.percent(), 25);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut last = 0.0;
        for top in [0.0, 100.0, 350.0, 720.0, 1200.0] {
            let m = ScrollMetrics {
                scroll_top: top,
                viewport_height: 600.0,
                document_height: 1800.0,
            };
            assert!(m.progress() >= last);
            last = m.progress();
        }
    }

    #[test]
    fn test_progress_clamps_overshoot() {
        let m = ScrollMetrics {
            scroll_top: 1300.5,
            viewport_height: 600.0,
            document_height: 1800.0,
        };
        assert_eq!(m.progress(), 1.0);
    }

    #[test]
    fn test_short_document_yields_zero() {
        let m = ScrollMetrics {
            scroll_top: 0.0,
            viewport_height: 900.0,
            document_height: 500.0,
        };
        assert_eq!(m.progress(), 0.0);
        assert_eq!(m.percent(), 0);
        assert!(!m.progress().is_nan());
    }

    #[test]
    fn test_equal_heights_yield_zero() {
        let m = ScrollMetrics {
            scroll_top: 10.0,
            viewport_height: 700.0,
            document_height: 700.0,
        };
        assert_eq!(m.progress(), 0.0);
    }
}
