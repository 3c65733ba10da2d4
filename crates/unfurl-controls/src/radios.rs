//! Radio group with conditional reveals

use unfurl_dom::{Context, Document, Event, NodeId, Outcome, Widget, WidgetError};

use crate::conditional::{self, Reveal};
use crate::error::ControlError;
use crate::Result;

const MODULE: &str = "radios";
const REVEAL: Reveal = Reveal {
    conditional: "radios__conditional",
    hidden: "radios__conditional--hidden",
};

pub struct Radios {
    root: NodeId,
    inputs: Vec<NodeId>,
}

impl Radios {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            inputs: Vec::new(),
        }
    }

    pub fn enhance(&mut self, doc: &mut Document) -> Result<()> {
        ControlError::require_root(doc, self.root, MODULE)?;
        self.inputs = doc.query_all(self.root, |el| el.is_input("radio"));
        conditional::link_controls(doc, &self.inputs);
        self.sync_all(doc);
        Ok(())
    }

    pub fn sync_all(&self, doc: &mut Document) {
        for input in &self.inputs {
            conditional::sync(doc, *input, REVEAL);
        }
    }

    /// Checking one radio unchecks its siblings, possibly in another group
    /// root, so the whole named set is re-synced.
    fn on_click(&self, doc: &mut Document, input: NodeId) {
        let group: Vec<NodeId> = conditional::same_group(doc, input, "radio")
            .into_iter()
            .filter(|r| doc.has_attribute(*r, "aria-controls"))
            .collect();
        for radio in group {
            conditional::sync(doc, radio, REVEAL);
        }
    }
}

impl Widget for Radios {
    fn module(&self) -> &'static str {
        MODULE
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn init(&mut self, cx: &mut Context<'_>) -> std::result::Result<(), WidgetError> {
        self.enhance(cx.doc)?;
        Ok(())
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &Event) -> Outcome {
        match *event {
            Event::PageShow => self.sync_all(cx.doc),
            Event::Click { target }
                if cx.doc.contains(self.root, target)
                    && cx.doc.element(target).is_some_and(|el| el.is_input("radio")) =>
            {
                self.on_click(cx.doc, target)
            }
            _ => {}
        }
        Outcome::Continue
    }
}
