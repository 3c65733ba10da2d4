//! Viewport dimensions

use serde::{Deserialize, Serialize};

/// Layout viewport, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
}

impl Viewport {
    pub fn new(width: f64) -> Self {
        Self { width }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0)
    }
}
