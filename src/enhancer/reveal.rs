//! Reveal-on-scroll animation.
//!
//! Elements carrying a configured reveal class start hidden (shifted down,
//! transparent) and are revealed on intersection. The subscription stays
//! active; re-revealing is idempotent.

use rustc_hash::FxHashSet;

use crate::config::MarkupConfig;
use crate::observe::{VisibilityRegistry, Watcher};
use crate::page::{NodeId, Page};

#[derive(Debug, Default)]
pub(crate) struct RevealOnScroll {
    watched: FxHashSet<NodeId>,
}

impl RevealOnScroll {
    /// Hide and watch every element carrying a reveal class.
    pub(crate) fn watch_all(
        &mut self,
        page: &mut Page,
        observer: &mut VisibilityRegistry,
        markup: &MarkupConfig,
    ) {
        let targets: Vec<NodeId> = page
            .elements()
            .filter(|(id, e)| {
                markup.reveal_classes.iter().any(|class| e.has_class(class))
                    && !self.watched.contains(id)
            })
            .map(|(id, _)| id)
            .collect();

        for id in targets {
            if let Some(elem) = page.element_mut(id) {
                elem.set_style("opacity", "0");
                elem.set_style("transform", "translateY(30px)");
                elem.set_style("transition", "all 0.6s ease-out");
            }
            observer.observe(id, 0.0, Watcher::Reveal);
            self.watched.insert(id);
        }
    }

    /// Reveal an element; safe to deliver repeatedly.
    pub(crate) fn on_intersect(&self, id: NodeId, page: &mut Page) {
        if let Some(elem) = page.element_mut(id) {
            elem.set_style("opacity", "1");
            elem.set_style("transform", "translateY(0)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_cycle() {
        let markup = MarkupConfig::default();
        let mut page = Page::parse(
            r#"<body><div class="admonition">note</div><p>plain</p></body>"#,
            None,
        )
        .unwrap();
        let mut observer = VisibilityRegistry::new();
        let mut reveal = RevealOnScroll::default();
        reveal.watch_all(&mut page, &mut observer, &markup);

        let (card, _) = page
            .elements()
            .find(|(_, e)| e.has_class("admonition"))
            .unwrap();
        assert_eq!(page.element(card).unwrap().style("opacity"), Some("0"));
        assert!(observer.is_watched(card));

        reveal.on_intersect(card, &mut page);
        assert_eq!(page.element(card).unwrap().style("opacity"), Some("1"));
        assert_eq!(
            page.element(card).unwrap().style("transform"),
            Some("translateY(0)")
        );

        // Plain elements are untouched
        let (p, _) = page.elements().find(|(_, e)| e.tag == "p").unwrap();
        assert_eq!(page.element(p).unwrap().style("opacity"), None);
        assert!(!observer.is_watched(p));
    }
}
