//! Deferred image loading.
//!
//! Images carrying the deferred-source attribute are watched until their
//! first intersection, then promoted (deferred source becomes the active
//! source, the marker class is dropped) and unwatched. The whole behavior
//! is skipped when the host lacks visibility observation; eager fallback is
//! the markup's concern, not ours.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::MarkupConfig;
use crate::observe::{SubscriptionHandle, VisibilityRegistry, Watcher};
use crate::page::{NodeId, Page};

#[derive(Debug, Default)]
pub(crate) struct LazyImages {
    watched: FxHashMap<NodeId, SubscriptionHandle>,
    /// Everything ever watched (the handled-state marker for `refresh`).
    processed: FxHashSet<NodeId>,
}

impl LazyImages {
    /// Watch every unprocessed image with a deferred source.
    ///
    /// Idempotent per element; returns how many images were added.
    pub(crate) fn watch_all(
        &mut self,
        page: &Page,
        observer: &mut VisibilityRegistry,
        markup: &MarkupConfig,
    ) -> usize {
        let pending: Vec<NodeId> = page
            .elements()
            .filter(|(id, e)| {
                e.tag == "img" && e.attr(&markup.lazy_attr).is_some() && !self.processed.contains(id)
            })
            .map(|(id, _)| id)
            .collect();

        for img in &pending {
            let handle = observer.observe(*img, 0.0, Watcher::LazyImage);
            self.watched.insert(*img, handle);
            self.processed.insert(*img);
        }
        pending.len()
    }

    /// Promote a watched image on its first intersection (one-shot).
    ///
    /// An empty or missing deferred source promotes nothing but still stops
    /// the watch.
    pub(crate) fn on_intersect(
        &mut self,
        img: NodeId,
        page: &mut Page,
        observer: &mut VisibilityRegistry,
        markup: &MarkupConfig,
    ) {
        let Some(handle) = self.watched.remove(&img) else {
            return;
        };
        observer.cancel(handle);

        let Some(elem) = page.element_mut(img) else {
            return;
        };
        let Some(src) = elem.attr(&markup.lazy_attr).map(str::to_string) else {
            return;
        };
        if src.is_empty() {
            return;
        }

        elem.set_attr("src", &src);
        elem.remove_class(&markup.lazy_class);
    }
}
