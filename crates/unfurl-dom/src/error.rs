//! Visual tree error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("Invalid location: {0}")]
    InvalidLocation(#[from] url::ParseError),
}

/// Returned by [`crate::Widget::init`] when a widget cannot enhance its markup.
///
/// The page treats this as a silent degradation: the widget is not mounted and
/// the server-rendered markup stays as it was.
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("{module}: missing markup: {detail}")]
    MissingMarkup { module: &'static str, detail: String },
}

impl WidgetError {
    pub fn missing(module: &'static str, detail: impl Into<String>) -> Self {
        WidgetError::MissingMarkup {
            module,
            detail: detail.into(),
        }
    }
}
