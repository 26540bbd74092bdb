//! Visibility-subscription registry.
//!
//! The browser's intersection observer becomes an explicit registration:
//! a sub-behavior calls [`VisibilityRegistry::observe`] with a target, a
//! threshold and a watcher tag, and receives a cancellable
//! [`SubscriptionHandle`]. When the host delivers an intersection event for
//! a node, [`VisibilityRegistry::deliver`] yields the subscriptions whose
//! threshold the reported ratio satisfies.
//!
//! Section highlighting, lazy loading and reveal animations each hold
//! independent subscriptions with independent thresholds; nothing orders
//! their callbacks relative to each other.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::page::NodeId;

/// Which sub-behavior a subscription belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watcher {
    /// Active-section highlighting over identified headings.
    Section,
    /// One-shot deferred-image promotion.
    LazyImage,
    /// Reveal-on-scroll animation.
    Reveal,
}

/// Cancellable handle returned by [`VisibilityRegistry::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u32);

#[derive(Debug)]
struct Subscription {
    target: NodeId,
    threshold: f64,
    watcher: Watcher,
}

/// Registry of active visibility subscriptions.
#[derive(Debug, Default)]
pub struct VisibilityRegistry {
    subs: FxHashMap<u32, Subscription>,
    by_target: FxHashMap<NodeId, SmallVec<[u32; 2]>>,
    next_id: u32,
}

impl VisibilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `target`; the subscription fires whenever a delivered ratio is
    /// positive and reaches `threshold`.
    pub fn observe(
        &mut self,
        target: NodeId,
        threshold: f64,
        watcher: Watcher,
    ) -> SubscriptionHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.subs.insert(
            id,
            Subscription {
                target,
                threshold,
                watcher,
            },
        );
        self.by_target.entry(target).or_default().push(id);
        SubscriptionHandle(id)
    }

    /// Cancel a subscription. Cancelling twice is a no-op.
    pub fn cancel(&mut self, handle: SubscriptionHandle) {
        if let Some(sub) = self.subs.remove(&handle.0)
            && let Some(ids) = self.by_target.get_mut(&sub.target)
        {
            ids.retain(|id| *id != handle.0);
            if ids.is_empty() {
                self.by_target.remove(&sub.target);
            }
        }
    }

    /// Whether any subscription watches `target`.
    pub fn is_watched(&self, target: NodeId) -> bool {
        self.by_target.contains_key(&target)
    }

    /// Subscriptions satisfied by an intersection of `target` at `ratio`,
    /// in registration order.
    pub fn deliver(&self, target: NodeId, ratio: f64) -> SmallVec<[(SubscriptionHandle, Watcher); 2]> {
        let mut fired = SmallVec::new();
        if ratio <= 0.0 {
            return fired;
        }
        if let Some(ids) = self.by_target.get(&target) {
            for id in ids {
                if let Some(sub) = self.subs.get(id)
                    && ratio >= sub.threshold
                {
                    fired.push((SubscriptionHandle(*id), sub.watcher));
                }
            }
        }
        fired
    }
}
