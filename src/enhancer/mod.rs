//! The site-enhancement controller.
//!
//! One [`SiteEnhancer`] is constructed per page view and owns every
//! page-lifetime behavior:
//!
//! - anchor navigation and active-section highlighting ([`anchors`])
//! - the reading-progress indicator ([`progress`])
//! - copy-to-clipboard buttons on code blocks ([`copy`])
//! - deferred image loading ([`lazy`])
//! - reveal-on-scroll animation ([`reveal`])
//! - theme persistence and meta-color sync ([`theme`])
//! - the mobile menu ([`menu`])
//! - outbound-click and scroll-depth telemetry ([`telemetry`])
//!
//! Each sub-behavior's setup is independent: a missing capability or a
//! failing preference store degrades that one behavior and never prevents
//! the others from initializing.

mod anchors;
mod copy;
mod lazy;
mod menu;
mod progress;
mod reveal;
mod telemetry;
mod theme;

#[cfg(test)]
mod tests;

use rustc_hash::FxHashMap;

use crate::caps::Capabilities;
use crate::config::EnhanceConfig;
use crate::debug;
use crate::error::EnhanceError;
use crate::event::{Effect, TimerToken, UiEvent};
use crate::observe::{VisibilityRegistry, Watcher};
use crate::page::{NodeId, Page};

use anchors::AnchorNav;
use copy::CopyButtons;
use lazy::LazyImages;
use menu::MobileMenu;
use progress::ReadingProgress;
use reveal::RevealOnScroll;
use telemetry::Telemetry;
use theme::ThemeSync;

// =============================================================================
// Timer table
// =============================================================================

/// Action to perform when a requested timer fires.
#[derive(Debug, Clone, Copy)]
enum PendingTimer {
    /// Revert a copy button's transient "copied" state.
    ResetCopied { button: NodeId },
}

/// Allocates timer tokens and remembers what each one is for.
///
/// Tokens are never reused; a fired token not found in the table (already
/// consumed, or never issued) is silently dropped.
#[derive(Debug, Default)]
struct TimerTable {
    next: u32,
    pending: FxHashMap<TimerToken, PendingTimer>,
}

impl TimerTable {
    fn schedule(&mut self, action: PendingTimer, delay_ms: u64, fx: &mut Vec<Effect>) {
        let timer = TimerToken(self.next);
        self.next += 1;
        self.pending.insert(timer, action);
        fx.push(Effect::StartTimer { timer, delay_ms });
    }

    fn take(&mut self, timer: TimerToken) -> Option<PendingTimer> {
        self.pending.remove(&timer)
    }
}

// =============================================================================
// Controller
// =============================================================================

/// All page-lifetime behaviors, attached exactly once per page view.
#[derive(Debug)]
pub struct SiteEnhancer {
    config: EnhanceConfig,
    caps: Capabilities,
    page: Page,
    observer: VisibilityRegistry,
    anchors: AnchorNav,
    progress: ReadingProgress,
    copy: CopyButtons,
    lazy: LazyImages,
    reveal: RevealOnScroll,
    theme: ThemeSync,
    menu: MobileMenu,
    telemetry: Telemetry,
    timers: TimerTable,
}

impl SiteEnhancer {
    /// Wire up every sub-behavior against a freshly parsed page.
    ///
    /// Consuming the [`Page`] makes double initialization unrepresentable;
    /// construct once, after the document is parsed, and keep the instance
    /// for the lifetime of the page view.
    pub fn initialize(page: Page, config: EnhanceConfig, caps: Capabilities) -> Self {
        let mut page = page;
        let mut observer = VisibilityRegistry::new();

        let anchors = AnchorNav::scan(&page, &config.markup);
        let progress = ReadingProgress::install(&mut page, &config.markup);

        let mut copy = CopyButtons::default();
        copy.attach_all(&mut page, &config);

        let mut lazy = LazyImages::default();
        let mut reveal = RevealOnScroll::default();
        if caps.visibility {
            anchors.watch_headings(&mut observer);
            lazy.watch_all(&page, &mut observer, &config.markup);
            reveal.watch_all(&mut page, &mut observer, &config.markup);
        } else {
            debug!("enhance"; "visibility observation unavailable; skipping section highlighting, lazy loading and reveal");
        }

        let theme = ThemeSync::setup(&mut page, &caps, &config.theme);
        let menu = MobileMenu::scan(&page, &config.markup);
        let telemetry = Telemetry::new(config.telemetry.enable);

        Self {
            config,
            caps,
            page,
            observer,
            anchors,
            progress,
            copy,
            lazy,
            reveal,
            theme,
            menu,
            telemetry,
            timers: TimerTable::default(),
        }
    }

    /// Parse `html` and initialize in one step.
    pub fn from_html(
        html: &str,
        page_url: Option<&str>,
        config: EnhanceConfig,
        caps: Capabilities,
    ) -> Result<Self, EnhanceError> {
        Ok(Self::initialize(Page::parse(html, page_url)?, config, caps))
    }

    /// Dispatch one host event; returns the effects the host must execute.
    pub fn handle_event(&mut self, event: UiEvent) -> Vec<Effect> {
        let mut fx = Vec::new();
        match event {
            UiEvent::Click { target } => self.on_click(target, &mut fx),
            UiEvent::Scroll { metrics } => {
                self.progress.on_scroll(&metrics, &mut self.page);
                self.telemetry.on_scroll(&metrics, &self.caps);
            }
            UiEvent::Intersection { target, ratio } => {
                for (_, watcher) in self.observer.deliver(target, ratio) {
                    match watcher {
                        Watcher::Section => self.anchors.on_heading_intersect(
                            target,
                            &mut self.page,
                            &self.config.markup,
                        ),
                        Watcher::LazyImage => self.lazy.on_intersect(
                            target,
                            &mut self.page,
                            &mut self.observer,
                            &self.config.markup,
                        ),
                        Watcher::Reveal => self.reveal.on_intersect(target, &mut self.page),
                    }
                }
            }
            UiEvent::RootAttrChanged { name, value } => self.theme.on_root_attr_changed(
                &name,
                value.as_deref(),
                &mut self.page,
                &self.caps,
                &self.config.theme,
            ),
            UiEvent::ThemeToggled { dark } => {
                self.theme
                    .on_toggle(dark, &mut self.page, &self.caps, &self.config.theme);
            }
            UiEvent::MenuToggled { open } => {
                self.menu
                    .on_toggle(open, &mut self.page, &self.config.markup, &mut fx);
            }
            UiEvent::TimerFired { timer } => {
                if let Some(PendingTimer::ResetCopied { button }) = self.timers.take(timer) {
                    self.copy.reset(button, &mut self.page, &self.config);
                }
            }
        }
        fx
    }

    fn on_click(&mut self, target: NodeId, fx: &mut Vec<Effect>) {
        if let Some(button) = self.copy.button_at(target, &self.page) {
            self.copy.on_click(
                button,
                &mut self.page,
                &self.caps,
                &self.config,
                &mut self.timers,
                fx,
            );
            return;
        }

        if let Some(anchor) = self.page.closest(target, |e| e.tag == "a") {
            self.anchors.on_link_click(anchor, &self.page, fx);
            self.telemetry.on_click(anchor, &self.page, &self.caps);
            self.menu
                .on_link_click(anchor, &mut self.page, &self.config.markup, fx);
        }
    }

    /// Re-scan for code blocks and deferred images added after the initial
    /// attachment; already-processed elements are left untouched.
    pub fn refresh(&mut self) {
        let buttons = self.copy.attach_all(&mut self.page, &self.config);
        let images = if self.caps.visibility {
            self.lazy
                .watch_all(&self.page, &mut self.observer, &self.config.markup)
        } else {
            0
        };
        debug!("enhance"; "refresh attached {buttons} copy buttons, watching {images} new images");
    }

    /// Append dynamic content to the page model; follow with
    /// [`refresh`](Self::refresh) to attach behaviors to it.
    pub fn inject_html(&mut self, html: &str) -> Result<Vec<NodeId>, EnhanceError> {
        self.page.append_html(html)
    }

    /// Apply a theme identifier verbatim, persist it and sync the meta
    /// color.
    pub fn set_theme(&mut self, name: &str) {
        self.theme
            .apply(name, &mut self.page, &self.caps, &self.config.theme);
    }

    /// The currently applied theme identifier, or the configured default.
    pub fn get_theme(&self) -> String {
        ThemeSync::scheme(&self.page, &self.config.theme)
    }

    /// Read access to the page model.
    pub fn page(&self) -> &Page {
        &self.page
    }
}
