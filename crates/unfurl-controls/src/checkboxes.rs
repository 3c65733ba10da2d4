//! Checkbox group with conditional reveals and exclusive options

use unfurl_dom::{Context, Document, Event, NodeId, Outcome, Widget, WidgetError};

use crate::conditional::{self, Reveal};
use crate::error::ControlError;
use crate::Result;

const MODULE: &str = "checkboxes";
const REVEAL: Reveal = Reveal {
    conditional: "checkboxes__conditional",
    hidden: "checkboxes__conditional--hidden",
};

pub struct Checkboxes {
    root: NodeId,
    inputs: Vec<NodeId>,
}

impl Checkboxes {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            inputs: Vec::new(),
        }
    }

    pub fn enhance(&mut self, doc: &mut Document) -> Result<()> {
        ControlError::require_root(doc, self.root, MODULE)?;
        self.inputs = doc.query_all(self.root, |el| el.is_input("checkbox"));
        conditional::link_controls(doc, &self.inputs);
        self.sync_all(doc);
        Ok(())
    }

    pub fn sync_all(&self, doc: &mut Document) {
        for input in &self.inputs {
            conditional::sync(doc, *input, REVEAL);
        }
    }

    fn on_click(&self, doc: &mut Document, input: NodeId) {
        conditional::sync(doc, input, REVEAL);
        if !doc.checked(input) {
            return;
        }

        let exclusive = is_exclusive(doc, input);
        let to_uncheck: Vec<NodeId> = conditional::same_group(doc, input, "checkbox")
            .into_iter()
            .filter(|other| *other != input)
            .filter(|other| exclusive || is_exclusive(doc, *other))
            .collect();

        for other in to_uncheck {
            doc.set_checked(other, false);
            conditional::sync(doc, other, REVEAL);
        }
        if exclusive {
            tracing::debug!(input = %input, "Exclusive checkbox cleared its group");
        }
    }
}

fn is_exclusive(doc: &Document, input: NodeId) -> bool {
    doc.attribute(input, "data-behaviour") == Some("exclusive")
}

impl Widget for Checkboxes {
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
                    && cx.doc.element(target).is_some_and(|el| el.is_input("checkbox")) =>
            {
                self.on_click(cx.doc, target)
            }
            _ => {}
        }
        Outcome::Continue
    }
}
