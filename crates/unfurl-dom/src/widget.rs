//! Widget contract and the context handlers run in

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

use crate::document::{Document, NodeId};
use crate::error::WidgetError;
use crate::event::{Event, Outcome};
use crate::location::Location;
use crate::viewport::Viewport;

/// A behaviour unit bound to one root node.
///
/// Widgets see every event dispatched on the page and decide for themselves
/// whether it concerns their subtree.
pub trait Widget {
    /// The `data-module` marker this widget is instantiated for.
    fn module(&self) -> &'static str;

    fn root(&self) -> NodeId;

    /// Enhance the markup. An error leaves the markup untouched.
    fn init(&mut self, cx: &mut Context<'_>) -> Result<(), WidgetError>;

    fn handle_event(&mut self, cx: &mut Context<'_>, event: &Event) -> Outcome;
}

/// Everything a handler may touch while it runs.
///
/// Follow-up events (fragment changes, focus moves, synthetic clicks) are
/// queued and delivered after the current handler returns.
pub struct Context<'a> {
    pub doc: &'a mut Document,
    location: &'a mut Location,
    viewport: Viewport,
    now: DateTime<Utc>,
    queue: &'a mut VecDeque<Event>,
}

impl<'a> Context<'a> {
    pub fn new(
        doc: &'a mut Document,
        location: &'a mut Location,
        viewport: Viewport,
        now: DateTime<Utc>,
        queue: &'a mut VecDeque<Event>,
    ) -> Self {
        Self {
            doc,
            location,
            viewport,
            now,
            queue,
        }
    }

    pub fn location(&self) -> &Location {
        &*self.location
    }

    /// Update the URL fragment, queueing a `HashChange` only if it changed.
    pub fn set_fragment(&mut self, fragment: &str) -> bool {
        let changed = self.location.set_fragment(fragment);
        if changed {
            self.queue.push_back(Event::HashChange);
        }
        changed
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn focus(&mut self, node: NodeId) {
        move_focus(self.doc, self.queue, Some(node));
    }

    pub fn blur(&mut self) {
        move_focus(self.doc, self.queue, None);
    }

    /// Queue a synthetic click, as `element.click()` would.
    pub fn click(&mut self, node: NodeId) {
        self.queue.push_back(Event::Click { target: node });
    }
}

pub(crate) fn move_focus(doc: &mut Document, queue: &mut VecDeque<Event>, next: Option<NodeId>) {
    let previous = doc.focused();
    if previous == next {
        return;
    }
    doc.set_focused(next);
    if let Some(target) = previous {
        queue.push_back(Event::Blur { target });
    }
    if let Some(target) = next {
        queue.push_back(Event::Focus { target });
    }
}
