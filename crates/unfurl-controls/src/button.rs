//! Link-styled buttons and double-submit protection

use chrono::{DateTime, Duration, Utc};

use unfurl_dom::{Context, Document, Event, Key, NodeId, Outcome, Widget, WidgetError};

use crate::error::ControlError;
use crate::Result;

const MODULE: &str = "button";

pub struct Button {
    root: NodeId,
    debounce: Duration,
    /// End of the current debounce window, if one is open.
    blocked_until: Option<DateTime<Utc>>,
}

impl Button {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            debounce: Duration::milliseconds(1000),
            blocked_until: None,
        }
    }

    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    pub fn enhance(&mut self, doc: &Document) -> Result<()> {
        ControlError::require_root(doc, self.root, MODULE)
    }

    fn on_click(&mut self, doc: &Document, target: NodeId, now: DateTime<Utc>) -> Outcome {
        if doc.attribute(target, "data-prevent-double-click") != Some("true") {
            return Outcome::Continue;
        }
        match self.blocked_until {
            Some(until) if now < until => {
                tracing::debug!(target = %target, "Suppressed repeated submit");
                Outcome::PreventDefault
            }
            _ => {
                self.blocked_until = Some(now + self.debounce);
                Outcome::Continue
            }
        }
    }
}

impl Widget for Button {
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
            Event::KeyDown {
                target,
                key: Key::Space,
            } if cx.doc.contains(self.root, target)
                && cx.doc.attribute(target, "role") == Some("button") =>
            {
                cx.click(target);
                Outcome::PreventDefault
            }
            Event::Click { target } if cx.doc.contains(self.root, target) => {
                let now = cx.now();
                self.on_click(cx.doc, target, now)
            }
            _ => Outcome::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use unfurl_dom::{Location, ManualClock, Page};

    fn page(html: &str) -> (Page, ManualClock) {
        let doc = Document::parse(html);
        let clock = ManualClock::default();
        let mut page = Page::new(doc, Location::parse("https://example.com/").unwrap())
            .with_clock(Arc::new(clock.clone()));
        let roots = page
            .document()
            .query_all(page.document().root(), |el| el.attr("data-module") == Some(MODULE));
        for root in roots {
            page.mount(Box::new(Button::new(root))).unwrap();
        }
        (page, clock)
    }

    #[test]
    fn test_space_activates_role_button() {
        let (mut page, _) = page(
            r#"<a id="start" href="/start" role="button" data-module="button">Start</a>
               <a id="plain" href="/plain" data-module="button">Plain</a>"#,
        );
        let start = page.document().element_by_id("start").unwrap();
        let plain = page.document().element_by_id("plain").unwrap();

        assert_eq!(page.key_down(start, Key::Space), Outcome::PreventDefault);
        assert_eq!(page.key_down(start, Key::Enter), Outcome::Continue);
        assert_eq!(page.key_down(plain, Key::Space), Outcome::Continue);
    }

    #[test]
    fn test_double_click_prevented_within_window() {
        let (mut page, clock) = page(
            r#"<form><button id="save" data-module="button" data-prevent-double-click="true">Save</button></form>"#,
        );
        let save = page.document().element_by_id("save").unwrap();

        assert_eq!(page.click(save), Outcome::Continue);
        clock.advance(Duration::milliseconds(400));
        assert_eq!(page.click(save), Outcome::PreventDefault);
        clock.advance(Duration::milliseconds(600));
        assert_eq!(page.click(save), Outcome::Continue);
    }

    #[test]
    fn test_unmarked_button_never_debounced() {
        let (mut page, _) = page(r#"<button id="go" data-module="button">Go</button>"#);
        let go = page.document().element_by_id("go").unwrap();
        assert_eq!(page.click(go), Outcome::Continue);
        assert_eq!(page.click(go), Outcome::Continue);
    }
}
