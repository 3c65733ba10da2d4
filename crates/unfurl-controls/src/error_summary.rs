//! Error summary focus and field links

use unfurl_dom::{fragment_of, Context, Document, Event, NodeId, Outcome, Widget, WidgetError};

use crate::error::ControlError;
use crate::Result;

const MODULE: &str = "error-summary";

pub struct ErrorSummary {
    root: NodeId,
    /// Whether init added the temporary `tabindex`.
    focus_managed: bool,
}

impl ErrorSummary {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            focus_managed: false,
        }
    }

    pub fn enhance(&mut self, doc: &mut Document) -> Result<()> {
        ControlError::require_root(doc, self.root, MODULE)?;
        if doc.attribute(self.root, "data-disable-auto-focus") != Some("true") {
            doc.set_attribute(self.root, "tabindex", "-1");
            self.focus_managed = true;
        }
        Ok(())
    }

    /// Focus the field a summary link points at. Returns false when the link
    /// should be followed normally.
    fn focus_target(&self, cx: &mut Context<'_>, link: NodeId) -> bool {
        let Some(input) = cx
            .doc
            .attribute(link, "href")
            .and_then(fragment_of)
            .and_then(|id| cx.doc.element_by_id(&id))
        else {
            return false;
        };
        if associated_legend_or_label(cx.doc, input).is_none() {
            return false;
        }
        cx.focus(input);
        true
    }
}

/// The legend or label that describes `input`.
fn associated_legend_or_label(doc: &Document, input: NodeId) -> Option<NodeId> {
    let legend = doc
        .closest(input, |el| el.is("fieldset"))
        .and_then(|fieldset| doc.query_first(fieldset, |el| el.is("legend")));

    let is_choice = doc
        .element(input)
        .is_some_and(|el| el.is_input("checkbox") || el.is_input("radio"));
    if is_choice && legend.is_some() {
        return legend;
    }

    let label_for = doc.element(input).and_then(|el| el.id()).and_then(|id| {
        doc.query_first(doc.root(), |el| el.is("label") && el.attr("for") == Some(id))
    });
    label_for
        .or_else(|| doc.closest(input, |el| el.is("label")))
        .or(legend)
}

impl Widget for ErrorSummary {
    fn module(&self) -> &'static str {
        MODULE
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn init(&mut self, cx: &mut Context<'_>) -> std::result::Result<(), WidgetError> {
        self.enhance(cx.doc)?;
        if self.focus_managed {
            cx.focus(self.root);
        }
        Ok(())
    }

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &Event) -> Outcome {
        match *event {
            Event::Blur { target } if target == self.root && self.focus_managed => {
                cx.doc.remove_attribute(self.root, "tabindex");
                Outcome::Continue
            }
            Event::Click { target }
                if cx.doc.contains(self.root, target)
                    && cx.doc.element(target).is_some_and(|el| el.is("a")) =>
            {
                if self.focus_target(cx, target) {
                    Outcome::PreventDefault
                } else {
                    Outcome::Continue
                }
            }
            _ => Outcome::Continue,
        }
    }
}
