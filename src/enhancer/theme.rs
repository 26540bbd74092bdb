//! Theme persistence and meta-color synchronization.
//!
//! The persisted preference is applied at construction; afterwards toggle
//! events, external root-attribute mutations and the `set_theme` API all
//! funnel through [`ThemeSync::apply`]: root attribute, persisted value and
//! `meta[name=theme-color]` stay in sync. Scheme names are an open
//! vocabulary; anything is accepted and stored verbatim.

use crate::caps::Capabilities;
use crate::config::ThemeConfig;
use crate::log;
use crate::page::{NodeId, Page};

#[derive(Debug, Default)]
pub(crate) struct ThemeSync {
    meta: Option<NodeId>,
}

impl ThemeSync {
    /// Apply any persisted preference and bring the meta color in sync.
    pub(crate) fn setup(page: &mut Page, caps: &Capabilities, theme: &ThemeConfig) -> Self {
        let meta = page
            .elements()
            .find(|(_, e)| e.tag == "meta" && e.attr("name") == Some("theme-color"))
            .map(|(id, _)| id);
        let sync = Self { meta };

        if let Some(store) = caps.preferences.as_ref() {
            match store.load(&theme.storage_key) {
                Ok(Some(saved)) => {
                    set_root_attr(page, theme, Some(&saved));
                }
                Ok(None) => {}
                Err(err) => log!("theme"; "failed to read preference: {err:#}"),
            }
        }

        let scheme = Self::scheme(page, theme);
        sync.sync_meta(&scheme, page, theme);
        sync
    }

    /// The currently applied scheme, falling back to the configured default.
    pub(crate) fn scheme(page: &Page, theme: &ThemeConfig) -> String {
        page.body()
            .and_then(|body| page.element(body))
            .and_then(|elem| elem.attr(&theme.root_attr))
            .unwrap_or(&theme.default_scheme)
            .to_string()
    }

    /// Apply `scheme` to the root attribute, persist it and sync the meta
    /// color.
    pub(crate) fn apply(
        &self,
        scheme: &str,
        page: &mut Page,
        caps: &Capabilities,
        theme: &ThemeConfig,
    ) {
        set_root_attr(page, theme, Some(scheme));
        self.sync_meta(scheme, page, theme);
        self.persist(scheme, caps, theme);
    }

    /// Theme toggle flips between the configured dark and default schemes.
    pub(crate) fn on_toggle(
        &self,
        dark: bool,
        page: &mut Page,
        caps: &Capabilities,
        theme: &ThemeConfig,
    ) {
        let scheme = if dark {
            theme.dark_scheme.clone()
        } else {
            theme.default_scheme.clone()
        };
        self.apply(&scheme, page, caps, theme);
    }

    /// React to an external mutation of the root color-scheme attribute.
    pub(crate) fn on_root_attr_changed(
        &self,
        name: &str,
        value: Option<&str>,
        page: &mut Page,
        caps: &Capabilities,
        theme: &ThemeConfig,
    ) {
        if name != theme.root_attr {
            return;
        }
        set_root_attr(page, theme, value);

        let effective = Self::scheme(page, theme);
        self.sync_meta(&effective, page, theme);
        self.persist(&effective, caps, theme);
    }

    fn sync_meta(&self, scheme: &str, page: &mut Page, theme: &ThemeConfig) {
        if let Some(meta) = self.meta
            && let Some(color) = theme.meta_color(scheme)
        {
            let color = color.to_string();
            if let Some(elem) = page.element_mut(meta) {
                elem.set_attr("content", &color);
            }
        }
    }

    fn persist(&self, scheme: &str, caps: &Capabilities, theme: &ThemeConfig) {
        if let Some(store) = caps.preferences.as_ref()
            && let Err(err) = store.save(&theme.storage_key, scheme)
        {
            log!("theme"; "failed to persist preference: {err:#}");
        }
    }
}

fn set_root_attr(page: &mut Page, theme: &ThemeConfig, value: Option<&str>) {
    let Some(body) = page.body() else {
        return;
    };
    if let Some(elem) = page.element_mut(body) {
        match value {
            Some(v) => elem.set_attr(&theme.root_attr, v),
            None => {
                elem.remove_attr(&theme.root_attr);
            }
        }
    }
}
