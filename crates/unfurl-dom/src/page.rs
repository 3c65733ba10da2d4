//! Single-threaded page event loop
//!
//! Every event runs to completion against all mounted widgets before the next
//! queued event is looked at, so a handler never observes another handler's
//! half-applied state.

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::document::{Document, NodeId};
use crate::error::WidgetError;
use crate::event::{Event, Key, Outcome};
use crate::location::{fragment_of, Location};
use crate::viewport::Viewport;
use crate::widget::{move_focus, Context, Widget};

/// Upper bound on follow-up events drained after a single dispatch.
const MAX_CASCADE: usize = 1024;

/// Checked-state changes made before handlers ran, undone if a handler
/// prevents the click's default action.
#[derive(Debug, Default)]
struct Activation {
    previous: Vec<(NodeId, bool)>,
}

impl Activation {
    fn revert(self, doc: &mut Document) {
        for (node, checked) in self.previous {
            doc.set_checked(node, checked);
        }
    }
}

pub struct Page {
    doc: Document,
    location: Location,
    viewport: Viewport,
    clock: Arc<dyn Clock>,
    queue: VecDeque<Event>,
    widgets: Vec<Box<dyn Widget>>,
}

impl Page {
    pub fn new(doc: Document, location: Location) -> Self {
        Self {
            doc,
            location,
            viewport: Viewport::default(),
            clock: Arc::new(SystemClock),
            queue: VecDeque::new(),
            widgets: Vec::new(),
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Direct access for external callers that write form fields without
    /// raising events (autofill, page glue).
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// `(module, root)` for every mounted widget, in mount order.
    pub fn mounted(&self) -> impl Iterator<Item = (&'static str, NodeId)> + '_ {
        self.widgets.iter().map(|w| (w.module(), w.root()))
    }

    pub fn is_mounted(&self, module: &str, root: NodeId) -> bool {
        self.mounted().any(|(m, r)| m == module && r == root)
    }

    /// Initialise a widget and start routing events to it.
    pub fn mount(&mut self, mut widget: Box<dyn Widget>) -> Result<(), WidgetError> {
        let now = self.clock.now();
        let result = {
            let mut cx = Context::new(
                &mut self.doc,
                &mut self.location,
                self.viewport,
                now,
                &mut self.queue,
            );
            widget.init(&mut cx)
        };

        match result {
            Ok(()) => {
                tracing::debug!(module = widget.module(), root = %widget.root(), "Mounted widget");
                self.widgets.push(widget);
                self.drain();
                Ok(())
            }
            Err(e) => {
                tracing::debug!(module = widget.module(), error = %e, "Widget left unenhanced");
                self.drain();
                Err(e)
            }
        }
    }

    /// Deliver an event and everything it causes.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        let outcome = self.deliver(event);
        self.drain();
        outcome
    }

    fn drain(&mut self) {
        let mut delivered = 0;
        while let Some(event) = self.queue.pop_front() {
            delivered += 1;
            if delivered > MAX_CASCADE {
                tracing::warn!(
                    pending = self.queue.len() + 1,
                    "Event cascade limit reached, dropping queued events"
                );
                self.queue.clear();
                break;
            }
            self.deliver(event);
        }
    }

    fn deliver(&mut self, event: Event) -> Outcome {
        let activation = match event {
            Event::Click { target } => Some(self.pre_activate(target)),
            _ => None,
        };

        let now = self.clock.now();
        let mut outcome = Outcome::Continue;
        {
            let mut cx = Context::new(
                &mut self.doc,
                &mut self.location,
                self.viewport,
                now,
                &mut self.queue,
            );
            for widget in self.widgets.iter_mut() {
                outcome = outcome.merge(widget.handle_event(&mut cx, &event));
            }
        }

        if let Event::Click { target } = event {
            if outcome.is_prevented() {
                if let Some(activation) = activation {
                    activation.revert(&mut self.doc);
                }
            } else {
                self.follow_link(target);
            }
        }

        outcome
    }

    /// Checkbox and radio state flips before click handlers run.
    fn pre_activate(&mut self, target: NodeId) -> Activation {
        let mut activation = Activation::default();
        let Some(el) = self.doc.element(target) else {
            return activation;
        };

        if el.is_input("checkbox") {
            let was = el.checked();
            activation.previous.push((target, was));
            self.doc.set_checked(target, !was);
        } else if el.is_input("radio") && !el.checked() {
            let name = el.attr("name").map(str::to_string);
            let form = self.doc.form_owner(target);

            if let Some(name) = name {
                let group = self.doc.query_all(self.doc.root(), |other| {
                    other.is_input("radio") && other.attr("name") == Some(name.as_str())
                });
                for other in group {
                    if other != target
                        && self.doc.form_owner(other) == form
                        && self.doc.checked(other)
                    {
                        activation.previous.push((other, true));
                        self.doc.set_checked(other, false);
                    }
                }
            }
            activation.previous.push((target, false));
            self.doc.set_checked(target, true);
        }

        activation
    }

    /// Default action of an in-page link: move to its fragment.
    fn follow_link(&mut self, target: NodeId) {
        let Some(anchor) = self
            .doc
            .closest(target, |el| el.is("a") && el.has_attr("href"))
        else {
            return;
        };
        let Some(href) = self.doc.attribute(anchor, "href") else {
            return;
        };
        if !href.starts_with('#') {
            return;
        }
        let fragment = fragment_of(href).map(Cow::into_owned).unwrap_or_default();
        if self.location.set_fragment(&fragment) {
            self.queue.push_back(Event::HashChange);
        }
    }

    // === Convenience drivers ===

    pub fn click(&mut self, target: NodeId) -> Outcome {
        self.dispatch(Event::Click { target })
    }

    pub fn key_down(&mut self, target: NodeId, key: Key) -> Outcome {
        self.dispatch(Event::KeyDown { target, key })
    }

    pub fn key_up(&mut self, target: NodeId, key: Key) -> Outcome {
        self.dispatch(Event::KeyUp { target, key })
    }

    /// Replace a field's value as typing would, then raise the keyup.
    pub fn type_into(&mut self, target: NodeId, value: &str) -> Outcome {
        self.doc.set_value(target, value);
        let key = value.chars().last().map(Key::Character).unwrap_or(Key::Other);
        self.key_up(target, key)
    }

    pub fn focus(&mut self, target: NodeId) {
        move_focus(&mut self.doc, &mut self.queue, Some(target));
        self.drain();
    }

    pub fn blur(&mut self) {
        move_focus(&mut self.doc, &mut self.queue, None);
        self.drain();
    }

    /// External navigation to a fragment (address bar, history, in-page link
    /// outside any widget).
    pub fn navigate(&mut self, fragment: &str) {
        if self.location.set_fragment(fragment) {
            self.dispatch(Event::HashChange);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.dispatch(Event::ViewportChanged);
    }

    pub fn page_show(&mut self) {
        self.dispatch(Event::PageShow);
    }

    pub fn tick(&mut self) {
        self.dispatch(Event::Tick);
    }
}
