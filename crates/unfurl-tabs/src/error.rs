//! Tabs error types

use thiserror::Error;
use unfurl_dom::WidgetError;

#[derive(Error, Debug)]
pub enum TabsError {
    #[error("Root node is not an element")]
    MissingRoot,

    #[error("No tab list found")]
    NoList,

    #[error("No tab links with a matching panel")]
    NoTabs,

    #[error("Tab not found: {0}")]
    NotFound(usize),

    #[error("Tabs are not active")]
    NotActive,
}

impl From<TabsError> for WidgetError {
    fn from(e: TabsError) -> Self {
        WidgetError::missing(crate::MODULE, e.to_string())
    }
}
