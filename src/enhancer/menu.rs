//! Mobile menu behavior.
//!
//! The menu container toggles a hidden class; an open menu locks document
//! scrolling, and activating any link inside the menu closes it again.

use crate::config::MarkupConfig;
use crate::event::Effect;
use crate::page::{NodeId, Page};

#[derive(Debug, Default)]
pub(crate) struct MobileMenu {
    container: Option<NodeId>,
    open: bool,
}

impl MobileMenu {
    pub(crate) fn scan(page: &Page, markup: &MarkupConfig) -> Self {
        Self {
            container: page.find_by_html_id(&markup.menu_id),
            open: false,
        }
    }

    /// Handle the menu toggle control.
    pub(crate) fn on_toggle(
        &mut self,
        open: bool,
        page: &mut Page,
        markup: &MarkupConfig,
        fx: &mut Vec<Effect>,
    ) {
        let Some(container) = self.container else {
            return;
        };
        if let Some(elem) = page.element_mut(container) {
            if open {
                elem.remove_class(&markup.hidden_class);
            } else {
                elem.add_class(&markup.hidden_class);
            }
        }
        self.open = open;
        fx.push(Effect::SetScrollLock { locked: open });
    }

    /// Close the menu when a link inside it is activated.
    pub(crate) fn on_link_click(
        &mut self,
        anchor: NodeId,
        page: &mut Page,
        markup: &MarkupConfig,
        fx: &mut Vec<Effect>,
    ) {
        if !self.open {
            return;
        }
        let Some(container) = self.container else {
            return;
        };
        if page.is_within(anchor, container) {
            self.on_toggle(false, page, markup, fx);
        }
    }
}
