//! Accordion error types

use thiserror::Error;
use unfurl_dom::WidgetError;

#[derive(Error, Debug)]
pub enum AccordionError {
    #[error("Root node is not an element")]
    MissingRoot,

    #[error("No sections found")]
    NoSections,

    #[error("Section {section} has no {part}")]
    MissingPart { section: usize, part: &'static str },

    #[error("Section not found: {0}")]
    NotFound(usize),
}

impl From<AccordionError> for WidgetError {
    fn from(e: AccordionError) -> Self {
        WidgetError::missing(crate::MODULE, e.to_string())
    }
}
