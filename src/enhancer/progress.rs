//! Reading-progress indicator.

use crate::config::MarkupConfig;
use crate::event::ScrollMetrics;
use crate::page::{NodeId, Page};

/// Fixed-position indicator scaled horizontally with scroll progress.
#[derive(Debug, Default)]
pub(crate) struct ReadingProgress {
    bar: Option<NodeId>,
}

impl ReadingProgress {
    /// Inject the indicator element at the end of `<body>`.
    pub(crate) fn install(page: &mut Page, markup: &MarkupConfig) -> Self {
        let body = page.body();
        let bar = page.create_element(body, "div");
        if let Some(elem) = page.element_mut(bar) {
            elem.add_class(&markup.progress_class);
        }
        Self { bar: Some(bar) }
    }

    /// Update the indicator's horizontal scale from fresh scroll geometry.
    pub(crate) fn on_scroll(&self, metrics: &ScrollMetrics, page: &mut Page) {
        let Some(bar) = self.bar else {
            return;
        };
        if let Some(elem) = page.element_mut(bar) {
            elem.set_style("transform", &format!("scaleX({})", metrics.progress()));
        }
    }

    #[cfg(test)]
    pub(crate) fn bar(&self) -> Option<NodeId> {
        self.bar
    }
}
