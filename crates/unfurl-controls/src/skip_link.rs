//! Skip link that moves focus to the main content

use unfurl_dom::{fragment_of, Context, Document, Event, NodeId, Outcome, Widget, WidgetError};

use crate::error::ControlError;
use crate::Result;

const MODULE: &str = "skip-link";
const FOCUSED: &str = "skip-link-focused-element";

pub struct SkipLink {
    root: NodeId,
    linked: Option<NodeId>,
    /// Set while the target carries the temporary focus attributes.
    decorated: bool,
}

impl SkipLink {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            linked: None,
            decorated: false,
        }
    }

    pub fn enhance(&mut self, doc: &Document) -> Result<()> {
        ControlError::require_root(doc, self.root, MODULE)?;
        let linked = doc
            .attribute(self.root, "href")
            .and_then(fragment_of)
            .and_then(|f| doc.element_by_id(&f))
            .ok_or_else(|| ControlError::missing(MODULE, "linked element"))?;
        self.linked = Some(linked);
        Ok(())
    }

    fn focus_linked(&mut self, cx: &mut Context<'_>, linked: NodeId) {
        if !cx.doc.has_attribute(linked, "tabindex") {
            cx.doc.set_attribute(linked, "tabindex", "-1");
            cx.doc.add_class(linked, FOCUSED);
            self.decorated = true;
        }
        cx.focus(linked);
    }
}

impl Widget for SkipLink {
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
        let Some(linked) = self.linked else {
            return Outcome::Continue;
        };
        match *event {
            Event::Click { target } if cx.doc.contains(self.root, target) => {
                self.focus_linked(cx, linked);
            }
            Event::Blur { target } if target == linked && self.decorated => {
                cx.doc.remove_attribute(linked, "tabindex");
                cx.doc.remove_class(linked, FOCUSED);
                self.decorated = false;
            }
            _ => {}
        }
        Outcome::Continue
    }
}
