//! Copy-to-clipboard buttons on code blocks.
//!
//! Each code-block container gets exactly one injected button. Activation
//! reads the block's `<code>` text, writes it through the clipboard
//! capability and, on success, shows a transient "copied" state that a
//! host-driven timer reverts. Write failures are logged and the visual
//! state is left unchanged.

use rustc_hash::FxHashMap;

use crate::caps::Capabilities;
use crate::config::EnhanceConfig;
use crate::event::Effect;
use crate::{debug, log};
use crate::page::{NodeId, Page};
use crate::utils::html::unescape;

use super::{PendingTimer, TimerTable};

/// Presentation for the injected buttons, installed once per page view.
const BUTTON_CSS: &str = "\
.copy-code-button{position:absolute;top:8px;right:8px;border:none;\
border-radius:4px;padding:6px 12px;font-size:12px;cursor:pointer;opacity:0;\
transition:all .3s ease}\
.highlight:hover .copy-code-button{opacity:1}\
.copy-code-button.copied{background:#00a651}";

#[derive(Debug, Default)]
pub(crate) struct CopyButtons {
    /// Injected button -> its code-block container.
    buttons: FxHashMap<NodeId, NodeId>,
    /// Processed container -> its button (the handled-state marker).
    blocks: FxHashMap<NodeId, NodeId>,
    /// Button -> its label text node.
    labels: FxHashMap<NodeId, NodeId>,
    styles_injected: bool,
}

impl CopyButtons {
    /// Attach a button to every unprocessed code-block container.
    ///
    /// Idempotent per element; returns how many buttons were added.
    pub(crate) fn attach_all(&mut self, page: &mut Page, config: &EnhanceConfig) -> usize {
        let pending: Vec<NodeId> = page
            .elements()
            .filter(|(id, e)| {
                e.has_class(&config.markup.code_block_class) && !self.blocks.contains_key(id)
            })
            .map(|(id, _)| id)
            .collect();

        if !pending.is_empty() && !self.styles_injected {
            inject_style(page, BUTTON_CSS);
            self.styles_injected = true;
        }

        for block in &pending {
            self.attach(*block, page, config);
        }
        pending.len()
    }

    fn attach(&mut self, block: NodeId, page: &mut Page, config: &EnhanceConfig) {
        if let Some(elem) = page.element_mut(block) {
            elem.set_style("position", "relative");
        }

        let button = page.create_element(Some(block), "button");
        if let Some(elem) = page.element_mut(button) {
            elem.add_class(&config.markup.copy_button_class);
            elem.set_attr("type", "button");
        }
        let label = page.append_text(Some(button), &config.behavior.copy_label);

        self.buttons.insert(button, block);
        self.blocks.insert(block, button);
        self.labels.insert(button, label);
    }

    /// The injected button at or above `target`, if any.
    pub(crate) fn button_at(&self, target: NodeId, page: &Page) -> Option<NodeId> {
        page.closest(target, |e| e.tag == "button")
            .filter(|id| self.buttons.contains_key(id))
    }

    /// Handle a click on an injected button.
    pub(crate) fn on_click(
        &mut self,
        button: NodeId,
        page: &mut Page,
        caps: &Capabilities,
        config: &EnhanceConfig,
        timers: &mut TimerTable,
        fx: &mut Vec<Effect>,
    ) {
        let Some(block) = self.buttons.get(&button).copied() else {
            return;
        };

        let text = page
            .find_descendant(block, "code")
            .map(|code| page.text_content(code))
            .unwrap_or_default();
        let text = unescape(&text);

        let Some(clipboard) = caps.clipboard.as_ref() else {
            debug!("copy"; "clipboard capability unavailable, ignoring copy");
            return;
        };

        match clipboard.write_text(&text) {
            Ok(()) => {
                if let Some(elem) = page.element_mut(button) {
                    elem.add_class(&config.markup.copied_class);
                }
                if let Some(label) = self.labels.get(&button) {
                    page.set_text(*label, &config.behavior.copied_label);
                }
                timers.schedule(
                    PendingTimer::ResetCopied { button },
                    config.behavior.copied_reset_ms,
                    fx,
                );
            }
            Err(err) => {
                log!("copy"; "clipboard write failed: {err:#}");
            }
        }
    }

    /// Revert a button's transient "copied" state (timer expiry).
    pub(crate) fn reset(&self, button: NodeId, page: &mut Page, config: &EnhanceConfig) {
        if let Some(elem) = page.element_mut(button) {
            elem.remove_class(&config.markup.copied_class);
        }
        if let Some(label) = self.labels.get(&button) {
            page.set_text(*label, &config.behavior.copy_label);
        }
    }

    /// Button attached to `block`, if processed.
    #[cfg(test)]
    pub(crate) fn button_for(&self, block: NodeId) -> Option<NodeId> {
        self.blocks.get(&block).copied()
    }
}

/// Append a `<style>` node to `<head>` (or `<body>` when headless).
fn inject_style(page: &mut Page, css: &str) {
    let head = page
        .elements()
        .find(|(_, e)| e.tag == "head")
        .map(|(id, _)| id)
        .or_else(|| page.body());
    let style = page.create_element(head, "style");
    page.append_text(Some(style), css);
}
