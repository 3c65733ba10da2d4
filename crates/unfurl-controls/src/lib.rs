//! Unfurl Controls
//!
//! Lightweight widgets built on the same attribute-sync pattern as the
//! disclosure widgets: conditional reveals for checkbox and radio groups, and
//! the small helpers a form page needs.

mod button;
mod character_count;
mod checkboxes;
mod conditional;
mod details;
mod error;
mod error_summary;
mod header;
mod notification_banner;
mod radios;
mod skip_link;

pub use button::Button;
pub use character_count::{CharacterCount, CountMode};
pub use checkboxes::Checkboxes;
pub use details::Details;
pub use error::ControlError;
pub use error_summary::ErrorSummary;
pub use header::Header;
pub use notification_banner::NotificationBanner;
pub use radios::Radios;
pub use skip_link::SkipLink;

pub type Result<T> = std::result::Result<T, ControlError>;
