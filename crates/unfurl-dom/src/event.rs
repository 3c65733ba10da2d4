//! Discrete UI events

use serde::{Deserialize, Serialize};

use crate::document::NodeId;

/// Keys widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Enter,
    Space,
    Tab,
    Escape,
    Character(char),
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value, including the legacy arrow names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Other,
                }
            }
        }
    }

    pub fn is_previous(self) -> bool {
        matches!(self, Key::ArrowLeft | Key::ArrowUp)
    }

    pub fn is_next(self) -> bool {
        matches!(self, Key::ArrowRight | Key::ArrowDown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Click { target: NodeId },
    KeyDown { target: NodeId, key: Key },
    KeyUp { target: NodeId, key: Key },
    Focus { target: NodeId },
    Blur { target: NodeId },
    /// The URL fragment changed.
    HashChange,
    /// The viewport was resized; breakpoints need re-evaluating.
    ViewportChanged,
    /// The page was shown, including restores from the back/forward cache.
    PageShow,
    /// Timer heartbeat; widgets with pending intervals compare against `now`.
    Tick,
}

impl Event {
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Event::Click { target }
            | Event::KeyDown { target, .. }
            | Event::KeyUp { target, .. }
            | Event::Focus { target }
            | Event::Blur { target } => Some(*target),
            Event::HashChange | Event::ViewportChanged | Event::PageShow | Event::Tick => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Click { .. } => "click",
            Event::KeyDown { .. } => "keydown",
            Event::KeyUp { .. } => "keyup",
            Event::Focus { .. } => "focus",
            Event::Blur { .. } => "blur",
            Event::HashChange => "hashchange",
            Event::ViewportChanged => "resize",
            Event::PageShow => "pageshow",
            Event::Tick => "tick",
        }
    }
}

/// What a handler decided about the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Continue,
    PreventDefault,
}

impl Outcome {
    pub fn is_prevented(self) -> bool {
        self == Outcome::PreventDefault
    }

    /// Once any handler prevents the default, it stays prevented.
    pub fn merge(self, other: Outcome) -> Outcome {
        if self.is_prevented() || other.is_prevented() {
            Outcome::PreventDefault
        } else {
            Outcome::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_name("Down"), Key::ArrowDown);
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("a"), Key::Character('a'));
        assert_eq!(Key::from_name("Shift"), Key::Other);

        assert!(Key::ArrowUp.is_previous());
        assert!(Key::ArrowRight.is_next());
        assert!(!Key::Enter.is_next());
    }

    #[test]
    fn test_outcome_merge() {
        assert_eq!(
            Outcome::Continue.merge(Outcome::PreventDefault),
            Outcome::PreventDefault
        );
        assert_eq!(Outcome::Continue.merge(Outcome::Continue), Outcome::Continue);
    }
}
