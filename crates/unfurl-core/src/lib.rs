//! Unfurl Core
//!
//! Coordination layer: configuration, store selection and the bootstrap that
//! turns `data-module` markers into mounted widgets.

mod bootstrap;
mod config;
mod error;

#[cfg(test)]
mod scenarios;

pub use bootstrap::{init_all, init_within, load_page, Modules, MODULE_ORDER};
pub use config::{Config, StoreConfig};
pub use error::CoreError;

// Re-export the widget layer
pub use unfurl_accordion::{Accordion, AccordionError, Section};
pub use unfurl_controls::{
    Button, CharacterCount, Checkboxes, ControlError, CountMode, Details, ErrorSummary, Header,
    NotificationBanner, Radios, SkipLink,
};
pub use unfurl_dom::{
    Clock, Document, Event, Key, Location, ManualClock, NodeId, Outcome, Page, SystemClock,
    Viewport, Widget, WidgetError,
};
pub use unfurl_storage::{MemoryStore, PersistenceChannel, SessionStore, SqliteStore, StorageError};
pub use unfurl_tabs::{Breakpoint, MinWidth, Tab, Tabs, TabsError, TabsMode};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
