//! Unfurl Accordion
//!
//! A set of independently expandable sections with one "show/hide all"
//! control. Section state is remembered for the browsing session through a
//! [`unfurl_storage::PersistenceChannel`].

mod accordion;
mod error;
mod section;

pub use accordion::Accordion;
pub use error::AccordionError;
pub use section::Section;

pub type Result<T> = std::result::Result<T, AccordionError>;

/// `data-module` marker.
pub const MODULE: &str = "accordion";
