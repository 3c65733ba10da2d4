//! Header navigation menu toggle

use unfurl_dom::{AttributeSync, Context, Document, Event, NodeId, Outcome, Widget, WidgetError};

use crate::error::ControlError;
use crate::Result;

const MODULE: &str = "header";
const TOGGLE: &str = "js-header-toggle";
const MENU_OPEN: &str = "header__navigation-list--open";
const BUTTON_OPEN: &str = "header__menu-button--open";

pub struct Header {
    root: NodeId,
    parts: Option<(NodeId, NodeId)>,
    sync: AttributeSync,
}

impl Header {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            parts: None,
            sync: AttributeSync::new(),
        }
    }

    pub fn enhance(&mut self, doc: &mut Document) -> Result<()> {
        ControlError::require_root(doc, self.root, MODULE)?;
        let button = doc
            .first_by_class(self.root, TOGGLE)
            .ok_or_else(|| ControlError::missing(MODULE, "menu button"))?;
        let menu = doc
            .attribute(button, "aria-controls")
            .and_then(|id| doc.query_first(self.root, |el| el.id() == Some(id)))
            .ok_or_else(|| ControlError::missing(MODULE, "menu"))?;

        self.parts = Some((button, menu));
        self.sync = AttributeSync::new()
            .class_when_true(button, BUTTON_OPEN)
            .attribute(button, "aria-expanded");
        self.sync.apply(doc, doc.has_class(menu, MENU_OPEN));
        Ok(())
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        self.parts.is_some_and(|(_, menu)| doc.has_class(menu, MENU_OPEN))
    }

    fn toggle(&self, doc: &mut Document, menu: NodeId) {
        let open = !doc.has_class(menu, MENU_OPEN);
        doc.toggle_class(menu, MENU_OPEN, open);
        self.sync.apply(doc, open);
    }
}

impl Widget for Header {
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
        let Some((button, menu)) = self.parts else {
            return Outcome::Continue;
        };
        if let Event::Click { target } = *event {
            if cx.doc.contains(button, target) {
                self.toggle(cx.doc, menu);
            }
        }
        Outcome::Continue
    }
}
