//! Control error types

use thiserror::Error;
use unfurl_dom::{Document, NodeId, WidgetError};

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("{module}: root node is not an element")]
    MissingRoot { module: &'static str },

    #[error("{module}: missing {part}")]
    MissingPart {
        module: &'static str,
        part: &'static str,
    },
}

impl ControlError {
    pub fn module(&self) -> &'static str {
        match self {
            ControlError::MissingRoot { module } | ControlError::MissingPart { module, .. } => {
                *module
            }
        }
    }

    pub(crate) fn missing(module: &'static str, part: &'static str) -> Self {
        ControlError::MissingPart { module, part }
    }

    pub(crate) fn require_root(doc: &Document, root: NodeId, module: &'static str) -> crate::Result<()> {
        if doc.is_element(root) {
            Ok(())
        } else {
            Err(ControlError::MissingRoot { module })
        }
    }
}

impl From<ControlError> for WidgetError {
    fn from(e: ControlError) -> Self {
        WidgetError::missing(e.module(), e.to_string())
    }
}
