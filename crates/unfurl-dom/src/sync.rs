//! Attribute synchronisation
//!
//! Widget state is stored redundantly: once as ARIA attributes for assistive
//! technology and once as state classes for styling. An [`AttributeSync`]
//! describes every place a boolean is mirrored so that the whole set is
//! rewritten in one call after each mutation.

use crate::document::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Mirrors the state as-is.
    Direct,
    /// Mirrors the negation of the state.
    Inverted,
}

impl Polarity {
    fn resolve(self, state: bool) -> bool {
        match self {
            Polarity::Direct => state,
            Polarity::Inverted => !state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Binding {
    /// `name="true"` / `name="false"`.
    Attribute {
        node: NodeId,
        name: &'static str,
        polarity: Polarity,
    },
    /// One of two fixed values.
    Value {
        node: NodeId,
        name: &'static str,
        on: &'static str,
        off: &'static str,
    },
    /// Boolean attribute: present or absent.
    Flag {
        node: NodeId,
        name: &'static str,
        polarity: Polarity,
    },
    Class {
        node: NodeId,
        class: &'static str,
        polarity: Polarity,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSync {
    bindings: Vec<Binding>,
}

impl AttributeSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, node: NodeId, name: &'static str) -> Self {
        self.bindings.push(Binding::Attribute {
            node,
            name,
            polarity: Polarity::Direct,
        });
        self
    }

    pub fn attribute_inverted(mut self, node: NodeId, name: &'static str) -> Self {
        self.bindings.push(Binding::Attribute {
            node,
            name,
            polarity: Polarity::Inverted,
        });
        self
    }

    /// `name` takes `on` when the state holds and `off` otherwise.
    pub fn values(
        mut self,
        node: NodeId,
        name: &'static str,
        on: &'static str,
        off: &'static str,
    ) -> Self {
        self.bindings.push(Binding::Value {
            node,
            name,
            on,
            off,
        });
        self
    }

    pub fn flag(mut self, node: NodeId, name: &'static str, polarity: Polarity) -> Self {
        self.bindings.push(Binding::Flag {
            node,
            name,
            polarity,
        });
        self
    }

    pub fn class_when_true(mut self, node: NodeId, class: &'static str) -> Self {
        self.bindings.push(Binding::Class {
            node,
            class,
            polarity: Polarity::Direct,
        });
        self
    }

    pub fn class_when_false(mut self, node: NodeId, class: &'static str) -> Self {
        self.bindings.push(Binding::Class {
            node,
            class,
            polarity: Polarity::Inverted,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Write `state` to every binding.
    pub fn apply(&self, doc: &mut Document, state: bool) {
        for binding in &self.bindings {
            match *binding {
                Binding::Attribute {
                    node,
                    name,
                    polarity,
                } => doc.set_attribute(node, name, bool_attr(polarity.resolve(state))),
                Binding::Value {
                    node,
                    name,
                    on,
                    off,
                } => doc.set_attribute(node, name, if state { on } else { off }),
                Binding::Flag {
                    node,
                    name,
                    polarity,
                } => {
                    if polarity.resolve(state) {
                        doc.set_attribute(node, name, "");
                    } else {
                        doc.remove_attribute(node, name);
                    }
                }
                Binding::Class {
                    node,
                    class,
                    polarity,
                } => doc.toggle_class(node, class, polarity.resolve(state)),
            }
        }
    }
}

pub fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
