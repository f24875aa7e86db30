use sterne_engine::coords::{Rect, Vec2};
use sterne_engine::paint::Color;
use sterne_engine::scene::shapes::Border;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// One child with padding and an optional background panel.
///
/// With a fixed width the container keeps that width regardless of its child;
/// otherwise it wraps the child.
#[derive(Default)]
pub struct Container {
    child: Option<Element>,
    padding: Edges,
    background: Option<Color>,
    border: Option<Border>,
    corner_radius: f32,
    width: Option<f32>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.child = Some(child.into());
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn padding_all(self, v: f32) -> Self {
        self.padding(Edges::all(v))
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = r;
        self
    }

    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }

    fn outer_constraints(&self, constraints: Constraints) -> Constraints {
        match self.width {
            Some(w) => {
                let w = w.min(constraints.max.x);
                Constraints {
                    min: Vec2::new(w, constraints.min.y),
                    max: Vec2::new(w, constraints.max.y),
                }
            }
            None => constraints,
        }
    }
}

impl Widget for Container {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let outer = self.outer_constraints(constraints);
        let inner = outer.shrink(self.padding);
        let child = self.child.as_ref().map_or(Vec2::zero(), |c| c.measure(inner, ctx));
        outer.constrain(Vec2::new(child.x + self.padding.h(), child.y + self.padding.v()))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        if self.background.is_some() || self.border.is_some() {
            let fill = self.background.unwrap_or_else(Color::transparent);
            painter.fill_rounded_rect(rect, self.corner_radius, fill, self.border);
        }
        if let Some(child) = &self.child {
            child.paint(painter, inset_rect(rect, self.padding));
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        match &mut self.child {
            Some(child) => child.on_event(event, inset_rect(rect, self.padding), ctx),
            None => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sterne_engine::text::FontSystem;

    struct Fixed(Vec2);

    impl Widget for Fixed {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(self.0)
        }
        fn paint(&self, _painter: &mut Painter, _rect: Rect) {}
    }

    #[test]
    fn wraps_child_plus_padding() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let c = Container::new().padding_all(6.0).child(Fixed(Vec2::new(40.0, 10.0)));
        let size = c.measure(Constraints::loose(Vec2::new(640.0, 480.0)), &ctx);
        assert_eq!(size, Vec2::new(52.0, 22.0));
    }

    #[test]
    fn fixed_width_wins_over_child() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let c = Container::new().width(300.0).padding_all(4.0).child(Fixed(Vec2::new(40.0, 10.0)));
        let size = c.measure(Constraints::loose(Vec2::new(640.0, 480.0)), &ctx);
        assert_eq!(size, Vec2::new(300.0, 18.0));
    }

    #[test]
    fn fixed_width_limited_by_viewport() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let c = Container::new().width(300.0);
        let size = c.measure(Constraints::loose(Vec2::new(200.0, 480.0)), &ctx);
        assert_eq!(size.x, 200.0);
    }
}
