use sterne_engine::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// Horizontal placement of column children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Children take the full inner width.
    #[default]
    Stretch,
    Start,
}

/// Stacks children top to bottom.
#[derive(Default)]
pub struct Column {
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    align: Align,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    fn child_constraints(&self, inner_w: f32) -> Constraints {
        match self.align {
            Align::Stretch if inner_w.is_finite() => Constraints {
                min: Vec2::new(inner_w, 0.0),
                max: Vec2::new(inner_w, f32::INFINITY),
            },
            _ => Constraints::loose(Vec2::new(inner_w, f32::INFINITY)),
        }
    }

    /// Child rects for a column occupying `rect`.
    fn layout(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = self.child_constraints(inner.size.x);
        let mut y = inner.origin.y;
        self.children
            .iter()
            .map(|child| {
                let s = child.measure(child_c, ctx);
                let r = Rect::new(inner.origin.x, y, s.x, s.y);
                y += s.y + self.spacing;
                r
            })
            .collect()
    }
}

impl Widget for Column {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_w = (constraints.max.x - self.padding.h()).max(0.0);
        let child_c = self.child_constraints(inner_w);

        let mut h = self.padding.v();
        let mut w: f32 = 0.0;
        for (i, child) in self.children.iter().enumerate() {
            let s = child.measure(child_c, ctx);
            h += s.y;
            if i > 0 {
                h += self.spacing;
            }
            w = w.max(s.x);
        }
        constraints.constrain(Vec2::new(w + self.padding.h(), h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.layout(rect, &ctx)) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let rects = self.layout(rect, ctx);
        for (child, r) in self.children.iter_mut().zip(rects) {
            if child.on_event(event, r, ctx).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}
