use sterne_engine::coords::{Rect, Vec2};
use sterne_engine::text::{FontId, FontSystem};

/// Insets on four sides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    #[inline]
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self { top: vertical, bottom: vertical, left: horizontal, right: horizontal }
    }

    /// Left + right.
    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    /// Top + bottom.
    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }
}

/// Size bounds passed from parent to child during measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    #[inline]
    pub fn tight(size: Vec2) -> Self {
        Self { min: size, max: size }
    }

    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.max(self.min.x).min(self.max.x),
            size.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Max shrunk by `edges`, min reset to zero.
    #[inline]
    #[must_use]
    pub fn shrink(self, edges: Edges) -> Self {
        Self {
            min: Vec2::zero(),
            max: Vec2::new((self.max.x - edges.h()).max(0.0), (self.max.y - edges.v()).max(0.0)),
        }
    }

    #[inline]
    pub fn with_infinite_height(self) -> Self {
        Self { max: Vec2::new(self.max.x, f32::INFINITY), ..self }
    }
}

/// Resources available while measuring and routing events.
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
    /// Physical pixels per logical pixel; text is measured at this scale so
    /// widths agree with what the text renderer draws.
    pub scale: f32,
}

impl LayoutCtx<'_> {
    #[inline]
    pub fn measure_text(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.fonts.measure_text_scaled(text, font, size, max_width, self.scale)
    }
}

#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.origin.x + edges.left,
        rect.origin.y + edges.top,
        (rect.size.x - edges.h()).max(0.0),
        (rect.size.y - edges.v()).max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_clamps_into_range() {
        let c = Constraints { min: Vec2::new(10.0, 10.0), max: Vec2::new(100.0, 40.0) };
        assert_eq!(c.constrain(Vec2::new(5.0, 80.0)), Vec2::new(10.0, 40.0));
        assert_eq!(c.constrain(Vec2::new(50.0, 20.0)), Vec2::new(50.0, 20.0));
    }

    #[test]
    fn tight_forces_size() {
        let c = Constraints::tight(Vec2::new(30.0, 12.0));
        assert_eq!(c.constrain(Vec2::new(1000.0, 0.0)), Vec2::new(30.0, 12.0));
    }

    #[test]
    fn shrink_subtracts_padding_and_floors_at_zero() {
        let c = Constraints::loose(Vec2::new(100.0, 15.0)).shrink(Edges::symmetric(10.0, 4.0));
        assert_eq!(c.max, Vec2::new(92.0, 0.0));
        assert_eq!(c.min, Vec2::zero());
    }

    #[test]
    fn infinite_height_keeps_width() {
        let c = Constraints::loose(Vec2::new(200.0, 50.0)).with_infinite_height();
        assert_eq!(c.max.x, 200.0);
        assert!(c.max.y.is_infinite());
    }

    #[test]
    fn inset_rect_moves_origin_and_shrinks() {
        let edges = Edges { top: 2.0, right: 3.0, bottom: 4.0, left: 5.0 };
        let inner = inset_rect(Rect::new(10.0, 10.0, 50.0, 20.0), edges);
        assert_eq!(inner, Rect::new(15.0, 12.0, 42.0, 14.0));
    }

    #[test]
    fn inset_rect_never_negative() {
        let inner = inset_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Edges::all(8.0));
        assert_eq!(inner.size, Vec2::zero());
    }
}
