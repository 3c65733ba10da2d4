//! Responsive breakpoint capability

use unfurl_dom::Viewport;

/// Decides whether the viewport is wide enough for the enhanced layout.
pub trait Breakpoint: Send + Sync {
    fn matches(&self, viewport: &Viewport) -> bool;
}

/// `(min-width: ...)`, inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinWidth {
    px: f64,
}

impl MinWidth {
    pub fn from_px(px: f64) -> Self {
        Self { px }
    }

    pub fn from_em(em: f64, root_font_size_px: f64) -> Self {
        Self::from_px(em * root_font_size_px)
    }

    pub fn px(&self) -> f64 {
        self.px
    }
}

impl Default for MinWidth {
    fn default() -> Self {
        Self::from_em(40.0625, 16.0)
    }
}

impl Breakpoint for MinWidth {
    fn matches(&self, viewport: &Viewport) -> bool {
        viewport.width >= self.px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_breakpoint() {
        let bp = MinWidth::default();
        assert_eq!(bp.px(), 641.0);
        assert!(bp.matches(&Viewport::new(641.0)));
        assert!(!bp.matches(&Viewport::new(640.0)));
    }
}
