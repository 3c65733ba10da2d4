//! Collapsible details

use uuid::Uuid;

use unfurl_dom::{AttributeSync, Context, Document, Event, Key, NodeId, Outcome, Polarity, Widget, WidgetError};

use crate::error::ControlError;
use crate::Result;

const MODULE: &str = "details";

/// `<details>` whose open state lives in the `open` attribute.
pub struct Details {
    root: NodeId,
    summary: Option<NodeId>,
    sync: AttributeSync,
}

impl Details {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            summary: None,
            sync: AttributeSync::new(),
        }
    }

    pub fn enhance(&mut self, doc: &mut Document) -> Result<()> {
        ControlError::require_root(doc, self.root, MODULE)?;
        let summary = doc
            .query_first(self.root, |el| el.is("summary"))
            .ok_or_else(|| ControlError::missing(MODULE, "summary"))?;
        let content = doc
            .query_first(self.root, |el| el.is("div"))
            .ok_or_else(|| ControlError::missing(MODULE, "content"))?;

        let content_id = match doc.element(content).and_then(|el| el.id()) {
            Some(id) => id.to_string(),
            None => format!("details-content-{}", Uuid::new_v4()),
        };
        doc.set_attribute(content, "id", &content_id);
        doc.set_attribute(self.root, "role", "group");
        doc.set_attribute(summary, "role", "button");
        doc.set_attribute(summary, "aria-controls", &content_id);
        doc.set_attribute(summary, "tabindex", "0");

        self.summary = Some(summary);
        self.sync = AttributeSync::new()
            .attribute(summary, "aria-expanded")
            .attribute_inverted(content, "aria-hidden")
            .flag(content, "hidden", Polarity::Inverted);
        self.sync.apply(doc, self.is_open(doc));
        Ok(())
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_attribute(self.root, "open")
    }

    pub fn toggle(&self, doc: &mut Document) {
        let open = !self.is_open(doc);
        if open {
            doc.set_attribute(self.root, "open", "open");
        } else {
            doc.remove_attribute(self.root, "open");
        }
        self.sync.apply(doc, open);
        tracing::debug!(root = %self.root, open, "Details toggled");
    }
}

impl Widget for Details {
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
        let Some(summary) = self.summary else {
            return Outcome::Continue;
        };

        match *event {
            Event::Click { target } if cx.doc.contains(summary, target) => {
                self.toggle(cx.doc);
                Outcome::Continue
            }
            Event::KeyDown {
                target,
                key: Key::Enter | Key::Space,
            } if target == summary => {
                cx.click(summary);
                Outcome::PreventDefault
            }
            Event::KeyUp {
                target,
                key: Key::Space,
            } if target == summary => Outcome::PreventDefault,
            _ => Outcome::Continue,
        }
    }
}
