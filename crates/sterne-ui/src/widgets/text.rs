use sterne_engine::coords::{Rect, Vec2};
use sterne_engine::paint::Color;
use sterne_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// Single run of text; wraps at the parent's width.
pub struct Text {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
}

impl Text {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self { text: text.into(), font, size, color }
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let max_w = constraints.max.x.is_finite().then_some(constraints.max.x);
        constraints.constrain(ctx.measure_text(&self.text, self.font, self.size, max_w))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let max_w = (rect.size.x > 0.0).then_some(rect.size.x);
        painter.text(self.text.as_str(), self.font, self.size, self.color, rect.origin, max_w);
    }
}
