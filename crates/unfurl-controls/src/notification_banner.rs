//! Alert banners that take focus on arrival

use unfurl_dom::{Context, Document, Event, NodeId, Outcome, Widget, WidgetError};

use crate::error::ControlError;
use crate::Result;

const MODULE: &str = "notification-banner";

pub struct NotificationBanner {
    root: NodeId,
    focus_on_init: bool,
    added_tabindex: bool,
}

impl NotificationBanner {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            focus_on_init: false,
            added_tabindex: false,
        }
    }

    pub fn enhance(&mut self, doc: &mut Document) -> Result<()> {
        ControlError::require_root(doc, self.root, MODULE)?;
        let opted_out = doc.attribute(self.root, "data-disable-auto-focus") == Some("true");
        if opted_out || doc.attribute(self.root, "role") != Some("alert") {
            return Ok(());
        }

        if !doc.has_attribute(self.root, "tabindex") {
            doc.set_attribute(self.root, "tabindex", "-1");
            self.added_tabindex = true;
        }
        self.focus_on_init = true;
        Ok(())
    }
}

impl Widget for NotificationBanner {
    fn module(&self) -> &'static str {
        MODULE
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn init(&mut self, cx: &mut Context<'_>) -> std::result::Result<(), WidgetError> {
        self.enhance(cx.doc)?;
        if self.focus_on_init {
            cx.focus(self.root);
        }
        Ok(())
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &Event) -> Outcome {
        if let Event::Blur { target } = *event {
            if target == self.root && self.added_tabindex {
                cx.doc.remove_attribute(self.root, "tabindex");
            }
        }
        Outcome::Continue
    }
}
