use sterne_engine::coords::{CornerRadii, Rect, Vec2};
use sterne_engine::paint::Color;
use sterne_engine::scene::shapes::Border;
use sterne_engine::scene::{DrawList, ZIndex};
use sterne_engine::text::{FontId, FontSystem};

use crate::constraints::LayoutCtx;

/// Drawing surface handed to [`Widget::paint`](crate::Widget::paint).
///
/// Wraps the scene's `DrawList`, assigns increasing z so later calls paint on
/// top, and exposes the pointer state so widgets can draw hover and active
/// visuals.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    pub(crate) fonts: &'a FontSystem,
    pub scale: f32,
    z: ZIndex,
    pub mouse_pos: Option<Vec2>,
    /// Where the current drag began, while the primary button is held.
    pub drag_start: Option<Vec2>,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(
        draw_list: &'a mut DrawList,
        fonts: &'a FontSystem,
        scale: f32,
        mouse_pos: Option<Vec2>,
        drag_start: Option<Vec2>,
    ) -> Self {
        Self { draw_list, fonts, scale, z: ZIndex::default(), mouse_pos, drag_start }
    }

    #[inline]
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.mouse_pos.is_some_and(|p| rect.contains(p))
    }

    /// `true` while a drag that started inside `rect` is in progress.
    #[inline]
    pub fn is_active(&self, rect: Rect) -> bool {
        self.drag_start.is_some_and(|p| rect.contains(p))
    }

    #[inline]
    pub fn layout_ctx(&self) -> LayoutCtx<'a> {
        LayoutCtx { fonts: self.fonts, scale: self.scale }
    }

    pub fn measure_text(&self, text: &str, font: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.fonts.measure_text_scaled(text, font, size, max_width, self.scale)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_rounded_rect(rect, 0.0, color, None);
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, border: Option<Border>) {
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, rect, CornerRadii::all(radius), color, border);
    }

    /// Text with its top-left at `origin`.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        max_width: Option<f32>,
    ) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin, max_width);
    }

    /// Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = self.z;
        self.z = z.above();
        z
    }
}
