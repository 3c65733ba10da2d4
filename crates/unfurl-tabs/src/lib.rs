//! Unfurl Tabs
//!
//! Single-selection panels driven by the URL fragment. Below a viewport
//! breakpoint the widget tears itself down and the panels fall back to plain
//! stacked content.

mod breakpoint;
mod error;
mod state;
mod tab;
mod tabs;

pub use breakpoint::{Breakpoint, MinWidth};
pub use error::TabsError;
pub use state::TabsMode;
pub use tab::Tab;
pub use tabs::Tabs;

pub type Result<T> = std::result::Result<T, TabsError>;

/// `data-module` marker.
pub const MODULE: &str = "tabs";
