//! Page bootstrap
//!
//! Scans markup for `data-module` markers and mounts one widget per match.
//! Widgets whose markup is incomplete are skipped and the page keeps its
//! server-rendered behaviour.

use chrono::Duration;
use std::sync::Arc;

use unfurl_accordion::Accordion;
use unfurl_controls::{
    Button, CharacterCount, Checkboxes, Details, ErrorSummary, Header, NotificationBanner, Radios,
    SkipLink,
};
use unfurl_dom::{Document, Location, NodeId, Page, Widget};
use unfurl_storage::{PersistenceChannel, SessionStore};
use unfurl_tabs::{Breakpoint, MinWidth, Tabs};

use crate::config::Config;
use crate::Result;

/// Markers in mount order. `true` means only the first match on the page is
/// enhanced.
pub const MODULE_ORDER: [(&str, bool); 11] = [
    ("button", false),
    ("accordion", false),
    ("details", false),
    ("character-count", false),
    ("checkboxes", false),
    ("error-summary", true),
    ("header", true),
    ("notification-banner", false),
    ("radios", false),
    ("skip-link", true),
    ("tabs", false),
];

/// Capabilities shared by every widget on a page.
#[derive(Clone)]
pub struct Modules {
    pub channel: PersistenceChannel,
    pub breakpoint: Arc<dyn Breakpoint>,
    pub double_click_window: Duration,
    pub character_count_poll: Duration,
    pub character_count_idle: Duration,
}

impl Modules {
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let channel = match config.open_store()? {
            Some(store) => PersistenceChannel::probe(store),
            None => PersistenceChannel::disabled(),
        };

        Ok(Self {
            channel,
            breakpoint: Arc::new(MinWidth::from_em(
                config.tabs_breakpoint_em,
                config.root_font_size_px,
            )),
            double_click_window: Duration::milliseconds(config.double_click_window_ms),
            character_count_poll: Duration::milliseconds(config.character_count_poll_ms),
            character_count_idle: Duration::milliseconds(config.character_count_idle_ms),
        })
    }

    /// Swap in a store, probing it first.
    pub fn with_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.channel = PersistenceChannel::probe(store);
        self
    }

    pub fn with_breakpoint(mut self, breakpoint: Arc<dyn Breakpoint>) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    fn build(&self, module: &str, root: NodeId) -> Option<Box<dyn Widget>> {
        let widget: Box<dyn Widget> = match module {
            "button" => Box::new(Button::new(root).with_debounce(self.double_click_window)),
            "accordion" => Box::new(Accordion::new(root, self.channel.clone())),
            "details" => Box::new(Details::new(root)),
            "character-count" => Box::new(
                CharacterCount::new(root)
                    .with_timing(self.character_count_poll, self.character_count_idle),
            ),
            "checkboxes" => Box::new(Checkboxes::new(root)),
            "error-summary" => Box::new(ErrorSummary::new(root)),
            "header" => Box::new(Header::new(root)),
            "notification-banner" => Box::new(NotificationBanner::new(root)),
            "radios" => Box::new(Radios::new(root)),
            "skip-link" => Box::new(SkipLink::new(root)),
            "tabs" => Box::new(Tabs::new(root, Arc::clone(&self.breakpoint))),
            _ => return None,
        };
        Some(widget)
    }
}

impl Default for Modules {
    fn default() -> Self {
        Self {
            channel: PersistenceChannel::disabled(),
            breakpoint: Arc::new(MinWidth::default()),
            double_click_window: Duration::milliseconds(1000),
            character_count_poll: Duration::milliseconds(1000),
            character_count_idle: Duration::milliseconds(500),
        }
    }
}

impl std::fmt::Debug for Modules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modules")
            .field("persistence", &self.channel.is_available())
            .field("double_click_window", &self.double_click_window)
            .field("character_count_poll", &self.character_count_poll)
            .field("character_count_idle", &self.character_count_idle)
            .finish_non_exhaustive()
    }
}

/// Parse markup and its URL into a page with nothing mounted yet.
pub fn load_page(html: &str, url: &str) -> Result<Page> {
    let location = Location::parse(url)?;
    Ok(Page::new(Document::parse(html), location))
}

/// Enhance every marker on the page.
pub fn init_all(page: &mut Page, modules: &Modules) -> Vec<(&'static str, NodeId)> {
    let root = page.document().root();
    init_within(page, root, modules)
}

/// Enhance markers inside `scope`, including `scope` itself. Roots that
/// already carry a widget of the same kind are left alone, so running this
/// again after inserting content only picks up the new markup.
pub fn init_within(
    page: &mut Page,
    scope: NodeId,
    modules: &Modules,
) -> Vec<(&'static str, NodeId)> {
    let mut mounted = Vec::new();
    let mut skipped = 0usize;

    for (module, first_only) in MODULE_ORDER {
        let mut roots = markers(page.document(), scope, module);
        if first_only {
            roots.truncate(1);
        }

        for root in roots {
            if page.is_mounted(module, root) {
                continue;
            }
            let Some(widget) = modules.build(module, root) else {
                continue;
            };
            match page.mount(widget) {
                Ok(()) => mounted.push((module, root)),
                Err(e) => {
                    skipped += 1;
                    tracing::debug!(module, root = %root, error = %e, "Skipped widget");
                }
            }
        }
    }

    tracing::info!(mounted = mounted.len(), skipped, "Page enhanced");
    mounted
}

fn markers(doc: &Document, scope: NodeId, module: &str) -> Vec<NodeId> {
    let is_marker = |el: &unfurl_dom::Element| el.attr("data-module") == Some(module);
    let mut roots = Vec::new();
    if doc.element(scope).is_some_and(is_marker) {
        roots.push(scope);
    }
    roots.extend(doc.query_all(scope, is_marker));
    roots
}
