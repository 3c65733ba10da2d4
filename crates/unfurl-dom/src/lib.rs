//! Unfurl Visual Tree
//!
//! Widgets never own markup. They attach to server-rendered nodes and mutate
//! attributes and classes in place, reacting to discrete events delivered by a
//! single-threaded [`Page`] loop.

mod clock;
mod document;
mod error;
mod event;
mod html;
mod location;
mod page;
mod sync;
mod viewport;
mod widget;

pub use clock::{Clock, ManualClock, SystemClock};
pub use document::{Document, Element, NodeData, NodeId};
pub use error::{DomError, WidgetError};
pub use event::{Event, Key, Outcome};
pub use location::{fragment_of, Location};
pub use page::Page;
pub use sync::{bool_attr, AttributeSync, Polarity};
pub use viewport::Viewport;
pub use widget::{Context, Widget};

pub type Result<T> = std::result::Result<T, DomError>;
