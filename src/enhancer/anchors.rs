//! Anchor navigation and active-section highlighting.
//!
//! Fragment links (`href="#..."`, not the bare `#`) are intercepted: when
//! the referenced element exists the host is told to scroll it into view and
//! update the history fragment, otherwise the click falls through untouched.
//!
//! Identified headings are watched at a 50% visibility threshold; the last
//! delivered intersection wins and moves the `active` marker to the
//! navigation link whose raw `href` equals `#<id>` exactly.

use percent_encoding::percent_decode_str;
use rustc_hash::FxHashMap;

use crate::config::MarkupConfig;
use crate::event::Effect;
use crate::observe::{VisibilityRegistry, Watcher};
use crate::page::{NodeId, Page};

/// Threshold at which a heading counts as the dominant visible content.
const SECTION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Default)]
pub(crate) struct AnchorNav {
    /// Fragment link -> raw `href` (including the leading `#`).
    fragment_links: FxHashMap<NodeId, String>,
    /// Navigation links eligible for the active marker.
    nav_links: Vec<NodeId>,
    /// Identified heading -> its `id` value.
    headings: FxHashMap<NodeId, String>,
}

impl AnchorNav {
    pub(crate) fn scan(page: &Page, markup: &MarkupConfig) -> Self {
        let mut nav = Self::default();
        for (id, elem) in page.elements() {
            if elem.tag == "a"
                && let Some(href) = elem.attr("href")
                && href.starts_with('#')
                && href.len() > 1
            {
                nav.fragment_links.insert(id, href.to_string());
            }
            if elem.has_class(&markup.nav_link_class) {
                nav.nav_links.push(id);
            }
            if matches!(elem.tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
                && let Some(heading_id) = elem.attr("id")
            {
                nav.headings.insert(id, heading_id.to_string());
            }
        }
        nav
    }

    /// Register visibility subscriptions for every identified heading.
    pub(crate) fn watch_headings(&self, observer: &mut VisibilityRegistry) {
        for heading in self.headings.keys() {
            observer.observe(*heading, SECTION_THRESHOLD, Watcher::Section);
        }
    }

    /// Handle activation of a scanned fragment link.
    ///
    /// The fragment is percent-decoded before the id lookup; a miss produces
    /// no effects and no error.
    pub(crate) fn on_link_click(&self, anchor: NodeId, page: &Page, fx: &mut Vec<Effect>) {
        let Some(href) = self.fragment_links.get(&anchor) else {
            return;
        };

        let fragment = &href[1..];
        let decoded = percent_decode_str(fragment)
            .decode_utf8()
            .map(|cow| cow.into_owned())
            .unwrap_or_else(|_| fragment.to_string());

        if let Some(target) = page.find_by_html_id(&decoded) {
            fx.push(Effect::ScrollIntoView { target });
            fx.push(Effect::PushHistory {
                fragment: href.clone(),
            });
        }
    }

    /// Move the active marker to the link matching the intersecting heading.
    pub(crate) fn on_heading_intersect(
        &self,
        heading: NodeId,
        page: &mut Page,
        markup: &MarkupConfig,
    ) {
        let Some(heading_id) = self.headings.get(&heading) else {
            return;
        };
        let wanted = format!("#{heading_id}");

        for link in &self.nav_links {
            let Some(elem) = page.element_mut(*link) else {
                continue;
            };
            elem.remove_class(&markup.active_class);
            if elem.attr("href") == Some(wanted.as_str()) {
                elem.add_class(&markup.active_class);
            }
        }
    }
}
