//! Live character and word counter
//!
//! Typing updates the visible status right away. The screen-reader status is
//! only refreshed by the focus poll, once the user pauses, so that assistive
//! technology is not flooded with announcements.

use chrono::{DateTime, Duration, Utc};

use unfurl_dom::{Context, Document, Event, NodeId, Outcome, Widget, WidgetError};

use crate::error::ControlError;
use crate::Result;

const MODULE: &str = "character-count";
const TEXTAREA: &str = "js-character-count";
const STATUS: &str = "character-count__status";
const SR_STATUS: &str = "character-count__sr-status";
const MESSAGE_DISABLED: &str = "character-count__message--disabled";
const VISUALLY_HIDDEN: &str = "visually-hidden";
const TEXTAREA_ERROR: &str = "textarea--error";
const HINT: &str = "hint";
const ERROR_MESSAGE: &str = "error-message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    Characters,
    Words,
}

impl CountMode {
    pub fn count(self, text: &str) -> usize {
        match self {
            CountMode::Characters => text.chars().count(),
            CountMode::Words => text.split_whitespace().count(),
        }
    }

    fn unit(self) -> &'static str {
        match self {
            CountMode::Characters => "character",
            CountMode::Words => "word",
        }
    }
}

/// Counting limits read from the root's data attributes.
#[derive(Debug, Clone, Copy)]
struct Limit {
    mode: CountMode,
    max: i64,
    /// Percent of `max` at which the count starts being shown.
    threshold: f64,
}

impl Limit {
    fn from_root(doc: &Document, root: NodeId) -> Option<Self> {
        let words = doc.attribute(root, "data-maxwords");
        let (mode, raw) = match words {
            Some(raw) => (CountMode::Words, raw),
            None => (CountMode::Characters, doc.attribute(root, "data-maxlength")?),
        };
        let max = raw.trim().parse().ok()?;
        let threshold = doc
            .attribute(root, "data-threshold")
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(0.0);
        Some(Self {
            mode,
            max,
            threshold,
        })
    }

    fn remaining(&self, text: &str) -> i64 {
        let count = i64::try_from(self.mode.count(text)).unwrap_or(i64::MAX);
        self.max.saturating_sub(count)
    }

    fn over_threshold(&self, text: &str) -> bool {
        self.max as f64 * self.threshold / 100.0 <= self.mode.count(text) as f64
    }

    fn message(&self, text: &str) -> String {
        let remaining = self.remaining(text);
        let plural = if remaining.abs() == 1 { "" } else { "s" };
        let state = if remaining < 0 { "too many" } else { "remaining" };
        format!(
            "You have {} {}{} {}",
            remaining.abs(),
            self.mode.unit(),
            plural,
            state
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct Parts {
    textarea: NodeId,
    status: NodeId,
    sr_status: NodeId,
}

pub struct CharacterCount {
    root: NodeId,
    poll_interval: Duration,
    idle_window: Duration,
    parts: Option<Parts>,
    limit: Option<Limit>,
    last_input: Option<DateTime<Utc>>,
    next_poll: Option<DateTime<Utc>>,
    last_value: String,
}

impl CharacterCount {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            poll_interval: Duration::milliseconds(1000),
            idle_window: Duration::milliseconds(500),
            parts: None,
            limit: None,
            last_input: None,
            next_poll: None,
            last_value: String::new(),
        }
    }

    /// Poll cadence while focused, and how long typing must pause before a
    /// poll may refresh the messages.
    pub fn with_timing(mut self, poll_interval: Duration, idle_window: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.idle_window = idle_window;
        self
    }

    pub fn enhance(&mut self, doc: &mut Document) -> Result<()> {
        ControlError::require_root(doc, self.root, MODULE)?;
        let textarea = doc
            .first_by_class(self.root, TEXTAREA)
            .ok_or_else(|| ControlError::missing(MODULE, "textarea"))?;
        let info = doc
            .element(textarea)
            .and_then(|el| el.id())
            .and_then(|id| doc.element_by_id(&format!("{id}-info")))
            .ok_or_else(|| ControlError::missing(MODULE, "count message"))?;

        doc.insert_after(textarea, info);

        let sr_status = doc.create_element_with_class("div", &[SR_STATUS, VISUALLY_HIDDEN]);
        doc.set_attribute(sr_status, "aria-live", "polite");
        doc.insert_after(info, sr_status);

        let status = doc.create_element("div");
        if let Some(class) = doc.attribute(info, "class").map(str::to_string) {
            doc.set_attribute(status, "class", &class);
        }
        doc.add_class(status, STATUS);
        doc.set_attribute(status, "aria-hidden", "true");
        doc.insert_after(info, status);
        doc.add_class(info, VISUALLY_HIDDEN);

        self.parts = Some(Parts {
            textarea,
            status,
            sr_status,
        });
        self.limit = Limit::from_root(doc, self.root);
        self.last_value = doc.value(textarea).to_string();

        match self.limit {
            Some(limit) => {
                doc.remove_attribute(textarea, "maxlength");
                self.update(doc);
                tracing::debug!(root = %self.root, max = limit.max, mode = ?limit.mode, "Character count enabled");
            }
            None => tracing::debug!(root = %self.root, "Character count has no limit"),
        }
        Ok(())
    }

    pub fn mode(&self) -> Option<CountMode> {
        self.limit.map(|l| l.mode)
    }

    pub fn is_polling(&self) -> bool {
        self.next_poll.is_some()
    }

    /// Refresh both status messages.
    pub fn update(&self, doc: &mut Document) {
        self.update_visible(doc);
        self.update_screen_reader(doc);
    }

    fn update_visible(&self, doc: &mut Document) {
        let (Some(parts), Some(limit)) = (self.parts, self.limit) else {
            return;
        };
        let text = doc.value(parts.textarea).to_string();

        doc.toggle_class(parts.status, MESSAGE_DISABLED, !limit.over_threshold(&text));
        let over = limit.remaining(&text) < 0;
        doc.toggle_class(parts.textarea, TEXTAREA_ERROR, over);
        doc.toggle_class(parts.status, HINT, !over);
        doc.toggle_class(parts.status, ERROR_MESSAGE, over);
        doc.set_text(parts.status, &limit.message(&text));
    }

    fn update_screen_reader(&self, doc: &mut Document) {
        let (Some(parts), Some(limit)) = (self.parts, self.limit) else {
            return;
        };
        let text = doc.value(parts.textarea).to_string();

        if limit.over_threshold(&text) {
            doc.remove_attribute(parts.sr_status, "aria-hidden");
        } else {
            doc.set_attribute(parts.sr_status, "aria-hidden", "true");
        }
        doc.set_text(parts.sr_status, &limit.message(&text));
    }

    fn poll(&mut self, doc: &mut Document, now: DateTime<Utc>) {
        let Some(due) = self.next_poll else {
            return;
        };
        if now < due {
            return;
        }
        self.next_poll = Some(now + self.poll_interval);

        let idle = self
            .last_input
            .map_or(true, |last| now - self.idle_window >= last);
        if !idle {
            return;
        }
        let Some(parts) = self.parts else {
            return;
        };
        let value = doc.value(parts.textarea);
        if value != self.last_value {
            self.last_value = value.to_string();
            self.update(doc);
        }
    }
}

impl Widget for CharacterCount {
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
        let (Some(parts), Some(_)) = (self.parts, self.limit) else {
            return Outcome::Continue;
        };

        match *event {
            Event::KeyUp { target, .. } if target == parts.textarea => {
                self.update_visible(cx.doc);
                self.last_input = Some(cx.now());
            }
            Event::Focus { target } if target == parts.textarea => {
                self.next_poll = Some(cx.now() + self.poll_interval);
            }
            Event::Blur { target } if target == parts.textarea => {
                self.next_poll = None;
            }
            Event::Tick => {
                let now = cx.now();
                self.poll(cx.doc, now);
            }
            Event::PageShow => self.update(cx.doc),
            _ => {}
        }
        Outcome::Continue
    }
}
