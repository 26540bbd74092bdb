//! Controller-level tests exercising full event round-trips.

use anyhow::bail;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::caps::{AnalyticsSink, Capabilities, ClipboardWriter, EventProps, JsonFileStore};
use crate::config::EnhanceConfig;
use crate::event::{Effect, ScrollMetrics, UiEvent};
use crate::page::{NodeId, Page};

use super::SiteEnhancer;

const DOC: &str = r##"<html><head><meta name="theme-color" content="#0066cc"></head>
<body>
<nav>
<a class="md-nav__link" href="#install">Install</a>
<a class="md-nav__link" href="#usage">Usage</a>
</nav>
<div id="mobileMenu" class="hidden"><a href="#install">Install</a></div>
<h2 id="install">Install</h2>
<div class="highlight"><pre><code>cargo add sitelift</code></pre></div>
<h2 id="usage">Usage</h2>
<img data-src="diagram.webp" class="lazy">
<div class="custom-card">card</div>
<a href="https://example.org/changelog">changelog</a>
</body></html>"##;

// =============================================================================
// Test capabilities
// =============================================================================

#[derive(Clone, Default)]
struct MockClipboard {
    written: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl ClipboardWriter for MockClipboard {
    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        if self.fail {
            bail!("permission denied");
        }
        self.written.lock().push(text.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<(String, EventProps)>>>,
}

impl AnalyticsSink for RecordingSink {
    fn track(&self, event: &str, props: &EventProps) {
        self.events.lock().push((event.to_string(), props.clone()));
    }
}

fn enhancer_with(caps: Capabilities) -> SiteEnhancer {
    SiteEnhancer::from_html(DOC, Some("https://docs.dev/guide/"), EnhanceConfig::default(), caps)
        .unwrap()
}

fn metrics(percent: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: percent * 12.0,
        viewport_height: 600.0,
        document_height: 1800.0,
    }
}

fn find_anchor(enhancer: &SiteEnhancer, href: &str, nav: bool) -> NodeId {
    enhancer
        .page()
        .elements()
        .find(|(_, e)| {
            e.tag == "a" && e.attr("href") == Some(href) && e.has_class("md-nav__link") == nav
        })
        .map(|(id, _)| id)
        .unwrap()
}

fn find_button(page: &Page) -> NodeId {
    page.elements()
        .find(|(_, e)| e.has_class("copy-code-button"))
        .map(|(id, _)| id)
        .unwrap()
}

// =============================================================================
// Anchor navigation
// =============================================================================

#[test]
fn test_fragment_click_scrolls_and_updates_history() {
    let mut enhancer = enhancer_with(Capabilities::default());
    let link = find_anchor(&enhancer, "#install", true);
    let target = enhancer.page().find_by_html_id("install").unwrap();

    let fx = enhancer.handle_event(UiEvent::Click { target: link });
    assert_eq!(
        fx,
        vec![
            Effect::ScrollIntoView { target },
            Effect::PushHistory {
                fragment: "#install".into()
            },
        ]
    );
}

#[test]
fn test_missing_fragment_click_is_inert() {
    let mut enhancer = SiteEnhancer::from_html(
        r##"<body><a href="#nowhere">gone</a></body>"##,
        None,
        EnhanceConfig::default(),
        Capabilities::default(),
    )
    .unwrap();
    let link = enhancer
        .page()
        .elements()
        .find(|(_, e)| e.tag == "a")
        .map(|(id, _)| id)
        .unwrap();

    let fx = enhancer.handle_event(UiEvent::Click { target: link });
    assert!(fx.is_empty());
}

#[test]
fn test_heading_intersection_moves_active_marker() {
    let mut enhancer = enhancer_with(Capabilities::default());
    let install = enhancer.page().find_by_html_id("install").unwrap();
    let usage = enhancer.page().find_by_html_id("usage").unwrap();

    // Below the threshold nothing happens
    enhancer.handle_event(UiEvent::Intersection {
        target: install,
        ratio: 0.4,
    });
    let nav_install = find_anchor(&enhancer, "#install", true);
    assert!(!enhancer.page().element(nav_install).unwrap().has_class("active"));

    enhancer.handle_event(UiEvent::Intersection {
        target: install,
        ratio: 0.7,
    });
    assert!(enhancer.page().element(nav_install).unwrap().has_class("active"));

    // Last event wins
    enhancer.handle_event(UiEvent::Intersection {
        target: usage,
        ratio: 0.9,
    });
    let nav_usage = find_anchor(&enhancer, "#usage", true);
    assert!(!enhancer.page().element(nav_install).unwrap().has_class("active"));
    assert!(enhancer.page().element(nav_usage).unwrap().has_class("active"));
}

// =============================================================================
// Scroll: progress + depth telemetry
// =============================================================================

#[test]
fn test_scroll_updates_progress_and_fires_depth_once() {
    let sink = RecordingSink::default();
    let events = Arc::clone(&sink.events);
    let caps = Capabilities {
        analytics: Some(Box::new(sink)),
        ..Capabilities::default()
    };
    let mut enhancer = enhancer_with(caps);

    enhancer.handle_event(UiEvent::Scroll {
        metrics: metrics(60.0),
    });
    enhancer.handle_event(UiEvent::Scroll {
        metrics: metrics(60.0),
    });

    let depths: Vec<String> = events
        .lock()
        .iter()
        .map(|(_, props)| props.get("depth").unwrap().as_str().unwrap().to_string())
        .collect();
    assert_eq!(depths, vec!["25%", "50%"]);

    let bar = enhancer
        .page()
        .elements()
        .find(|(_, e)| e.has_class("reading-progress"))
        .map(|(id, _)| id)
        .unwrap();
    assert_eq!(
        enhancer.page().element(bar).unwrap().style("transform"),
        Some("scaleX(0.6)")
    );

    enhancer.handle_event(UiEvent::Scroll {
        metrics: metrics(100.0),
    });
    let depths: Vec<String> = events
        .lock()
        .iter()
        .map(|(_, props)| props.get("depth").unwrap().as_str().unwrap().to_string())
        .collect();
    assert_eq!(depths, vec!["25%", "50%", "75%", "100%"]);
}

#[test]
fn test_outbound_click_reports_url_and_text() {
    let sink = RecordingSink::default();
    let events = Arc::clone(&sink.events);
    let caps = Capabilities {
        analytics: Some(Box::new(sink)),
        ..Capabilities::default()
    };
    let mut enhancer = enhancer_with(caps);

    let external = find_anchor(&enhancer, "https://example.org/changelog", false);
    enhancer.handle_event(UiEvent::Click { target: external });

    // Same-page navigation is not outbound
    let nav = find_anchor(&enhancer, "#install", true);
    enhancer.handle_event(UiEvent::Click { target: nav });

    let events = events.lock();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "outbound_click");
    assert_eq!(
        events[0].1.get("url").unwrap().as_str().unwrap(),
        "https://example.org/changelog"
    );
    assert_eq!(events[0].1.get("text").unwrap().as_str().unwrap(), "changelog");
}

// =============================================================================
// Copy buttons
// =============================================================================

#[test]
fn test_copy_click_sets_state_and_schedules_reset() {
    let clipboard = MockClipboard::default();
    let written = Arc::clone(&clipboard.written);
    let caps = Capabilities {
        clipboard: Some(Box::new(clipboard)),
        ..Capabilities::default()
    };
    let mut enhancer = enhancer_with(caps);
    let button = find_button(enhancer.page());

    let fx = enhancer.handle_event(UiEvent::Click { target: button });
    assert_eq!(written.lock().as_slice(), &["cargo add sitelift".to_string()]);
    assert!(enhancer.page().element(button).unwrap().has_class("copied"));

    let [Effect::StartTimer { timer, delay_ms }] = fx.as_slice() else {
        panic!("expected a single reset timer, got {fx:?}");
    };
    assert_eq!(*delay_ms, 2000);

    let fx = enhancer.handle_event(UiEvent::TimerFired { timer: *timer });
    assert!(fx.is_empty());
    assert!(!enhancer.page().element(button).unwrap().has_class("copied"));
}

#[test]
fn test_clipboard_failure_is_silent_and_stateless() {
    let caps = Capabilities {
        clipboard: Some(Box::new(MockClipboard {
            fail: true,
            ..MockClipboard::default()
        })),
        ..Capabilities::default()
    };
    let mut enhancer = enhancer_with(caps);
    let button = find_button(enhancer.page());

    let fx = enhancer.handle_event(UiEvent::Click { target: button });
    assert!(fx.is_empty());
    assert!(!enhancer.page().element(button).unwrap().has_class("copied"));
}

#[test]
fn test_refresh_attaches_exactly_one_button_to_new_block() {
    let mut enhancer = enhancer_with(Capabilities::default());

    enhancer
        .inject_html(r#"<div class="highlight"><pre><code>second</code></pre></div>"#)
        .unwrap();
    enhancer.refresh();
    enhancer.refresh();

    let page = enhancer.page();
    for (block, _) in page.elements().filter(|(_, e)| e.has_class("highlight")) {
        let buttons = page
            .element(block)
            .unwrap()
            .children
            .iter()
            .filter(|id| page.element(**id).is_some_and(|e| e.has_class("copy-code-button")))
            .count();
        assert_eq!(buttons, 1);
    }
}

// =============================================================================
// Lazy images & reveal
// =============================================================================

#[test]
fn test_image_promotion_is_one_shot() {
    let mut enhancer = enhancer_with(Capabilities::default());
    let img = enhancer
        .page()
        .elements()
        .find(|(_, e)| e.tag == "img")
        .map(|(id, _)| id)
        .unwrap();

    enhancer.handle_event(UiEvent::Intersection {
        target: img,
        ratio: 0.05,
    });
    let elem = enhancer.page().element(img).unwrap();
    assert_eq!(elem.attr("src"), Some("diagram.webp"));
    assert!(!elem.has_class("lazy"));
}

#[test]
fn test_reveal_hides_then_shows() {
    let mut enhancer = enhancer_with(Capabilities::default());
    let card = enhancer
        .page()
        .elements()
        .find(|(_, e)| e.has_class("custom-card"))
        .map(|(id, _)| id)
        .unwrap();

    assert_eq!(enhancer.page().element(card).unwrap().style("opacity"), Some("0"));
    enhancer.handle_event(UiEvent::Intersection {
        target: card,
        ratio: 0.2,
    });
    assert_eq!(enhancer.page().element(card).unwrap().style("opacity"), Some("1"));
}

#[test]
fn test_missing_visibility_capability_degrades_gracefully() {
    let caps = Capabilities {
        visibility: false,
        ..Capabilities::default()
    };
    let mut enhancer = enhancer_with(caps);

    let img = enhancer
        .page()
        .elements()
        .find(|(_, e)| e.tag == "img")
        .map(|(id, _)| id)
        .unwrap();
    let heading = enhancer.page().find_by_html_id("install").unwrap();

    enhancer.handle_event(UiEvent::Intersection {
        target: img,
        ratio: 1.0,
    });
    enhancer.handle_event(UiEvent::Intersection {
        target: heading,
        ratio: 1.0,
    });

    // Nothing promoted, nothing highlighted
    assert_eq!(enhancer.page().element(img).unwrap().attr("src"), None);
    let nav = find_anchor(&enhancer, "#install", true);
    assert!(!enhancer.page().element(nav).unwrap().has_class("active"));

    // The remaining behaviors still initialized
    let link = find_anchor(&enhancer, "#install", true);
    let fx = enhancer.handle_event(UiEvent::Click { target: link });
    assert!(!fx.is_empty());
}

// =============================================================================
// Theme
// =============================================================================

#[test]
fn test_theme_round_trip_and_simulated_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    let caps = Capabilities {
        preferences: Some(Box::new(JsonFileStore::new(&path))),
        ..Capabilities::default()
    };
    let mut enhancer = enhancer_with(caps);
    assert_eq!(enhancer.get_theme(), "default");

    enhancer.set_theme("slate");
    assert_eq!(enhancer.get_theme(), "slate");
    drop(enhancer);

    // Fresh controller instance reads the persisted value back
    let caps = Capabilities {
        preferences: Some(Box::new(JsonFileStore::new(&path))),
        ..Capabilities::default()
    };
    let enhancer = enhancer_with(caps);
    assert_eq!(enhancer.get_theme(), "slate");
}

#[test]
fn test_toggle_syncs_meta_color() {
    let mut enhancer = enhancer_with(Capabilities::default());
    enhancer.handle_event(UiEvent::ThemeToggled { dark: true });

    let meta = enhancer
        .page()
        .elements()
        .find(|(_, e)| e.tag == "meta" && e.attr("name") == Some("theme-color"))
        .map(|(id, _)| id)
        .unwrap();
    assert_eq!(
        enhancer.page().element(meta).unwrap().attr("content"),
        Some("#1e293b")
    );
    assert_eq!(enhancer.get_theme(), "slate");
}

// =============================================================================
// Mobile menu
// =============================================================================

#[test]
fn test_menu_open_locks_scroll_and_menu_link_closes() {
    let mut enhancer = enhancer_with(Capabilities::default());

    let fx = enhancer.handle_event(UiEvent::MenuToggled { open: true });
    assert_eq!(fx, vec![Effect::SetScrollLock { locked: true }]);

    let menu_link = {
        let page = enhancer.page();
        let container = page.find_by_html_id("mobileMenu").unwrap();
        page.elements()
            .find(|(id, e)| e.tag == "a" && page.is_within(*id, container))
            .map(|(id, _)| id)
            .unwrap()
    };

    let fx = enhancer.handle_event(UiEvent::Click { target: menu_link });
    // Fragment navigation still happens, then the menu closes and unlocks
    assert!(fx.contains(&Effect::SetScrollLock { locked: false }));
    assert!(fx.iter().any(|e| matches!(e, Effect::ScrollIntoView { .. })));

    let container = enhancer.page().find_by_html_id("mobileMenu").unwrap();
    assert!(enhancer.page().element(container).unwrap().has_class("hidden"));
}
