pub(crate) mod rounded_rect;
pub(crate) mod text;

pub use rounded_rect::RoundedRectCmd;
pub use text::TextCmd;

use crate::paint::Color;

/// Stroke drawn inside the outer edge of a shape.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}
