use sterne_engine::coords::{Rect, Vec2};
use sterne_engine::paint::Color;
use sterne_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::Widget;

const LABEL_GAP: f32 = 6.0;

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font: FontId,
    size: f32,
    color: Color,
}

/// Horizontal slider: a frame with a grab, the current value printed in the
/// middle and an optional label on the right.
///
/// `on_change` fires on every drag frame that moves the value, so the
/// owner sees the change live rather than on release.
///
/// ```rust,ignore
/// Slider::new(100.0, 40_000.0)
///     .value(8000.0)
///     .step(1.0)
///     .text_style(font, 13.0, white)
///     .label("number of stars")
///     .format(|v| format!("{v:.0}"))
///     .on_change(|v| println!("{v}"))
/// ```
pub struct Slider {
    value: f32,
    min: f32,
    max: f32,
    step: Option<f32>,

    label: Option<String>,
    text: Option<TextStyle>,
    format: Box<dyn Fn(f32) -> String>,

    height: f32,
    grab_width: f32,
    frame_color: Color,
    frame_hover_color: Color,
    grab_color: Color,
    grab_active_color: Color,

    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    /// `min > max` is accepted and swapped.
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            value: min,
            min,
            max,
            step: None,
            label: None,
            text: None,
            format: Box::new(|v| format!("{v:.3}")),
            height: 20.0,
            grab_width: 10.0,
            frame_color: Color::from_srgb_u8(0x29, 0x4a, 0x7a, 0x8a),
            frame_hover_color: Color::from_srgb_u8(0x42, 0x96, 0xfa, 0x66),
            grab_color: Color::from_srgb_u8(0x3d, 0x85, 0xe0, 0xff),
            grab_active_color: Color::from_srgb_u8(0x42, 0x96, 0xfa, 0xff),
            on_change: None,
        }
    }

    pub fn value(mut self, v: f32) -> Self {
        self.value = self.snap(v);
        self
    }

    /// Values snap to `min + k * step`. Non-positive steps are ignored.
    pub fn step(mut self, step: f32) -> Self {
        self.step = (step > 0.0 && step.is_finite()).then_some(step);
        self.value = self.snap(self.value);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Font for the value readout and the label. Without it no text is drawn.
    pub fn text_style(mut self, font: FontId, size: f32, color: Color) -> Self {
        self.text = Some(TextStyle { font, size, color });
        self
    }

    pub fn format(mut self, f: impl Fn(f32) -> String + 'static) -> Self {
        self.format = Box::new(f);
        self
    }

    pub fn height(mut self, h: f32) -> Self {
        self.height = h;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn current(&self) -> f32 {
        self.value
    }

    fn snap(&self, v: f32) -> f32 {
        if v.is_nan() {
            return self.min;
        }
        let v = v.clamp(self.min, self.max);
        match self.step {
            Some(step) => (self.min + ((v - self.min) / step).round() * step).clamp(self.min, self.max),
            None => v,
        }
    }

    /// Position of the value in `[0, 1]`.
    fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span <= f32::EPSILON { 0.0 } else { ((self.value - self.min) / span).clamp(0.0, 1.0) }
    }

    /// Value under `x` for a frame rect; the grab centre tracks the cursor.
    fn value_at(&self, frame: Rect, x: f32) -> f32 {
        let travel = (frame.size.x - self.grab_width).max(1.0);
        let t = ((x - frame.origin.x - self.grab_width * 0.5) / travel).clamp(0.0, 1.0);
        self.snap(self.min + t * (self.max - self.min))
    }

    fn grab_rect(&self, frame: Rect) -> Rect {
        let travel = (frame.size.x - self.grab_width).max(0.0);
        let x = frame.origin.x + self.fraction() * travel;
        Rect::new(x, frame.origin.y + 2.0, self.grab_width, (frame.size.y - 4.0).max(0.0))
    }

    fn label_width(&self, measure: impl Fn(&str, TextStyle) -> Vec2) -> f32 {
        match (&self.label, self.text) {
            (Some(label), Some(style)) => measure(label, style).x + LABEL_GAP,
            _ => 0.0,
        }
    }

    /// The interactive part of `rect`, i.e. everything left of the label.
    fn frame_rect(&self, rect: Rect, label_w: f32) -> Rect {
        Rect::new(rect.origin.x, rect.origin.y, (rect.size.x - label_w).max(0.0), rect.size.y)
    }

    fn set_from(&mut self, frame: Rect, x: f32) {
        let v = self.value_at(frame, x);
        if v != self.value {
            self.value = v;
            if let Some(f) = &mut self.on_change {
                f(v);
            }
        }
    }
}

impl Widget for Slider {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let text_h = self.text.map_or(0.0, |s| ctx.measure_text("0", s.font, s.size, None).y);
        let w = if constraints.max.x.is_finite() { constraints.max.x } else { 200.0 };
        constraints.constrain(Vec2::new(w, self.height.max(text_h + 4.0)))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let label_w = self.label_width(|t, s| painter.measure_text(t, s.font, s.size, None));
        let frame = self.frame_rect(rect, label_w);

        let active = painter.is_active(frame);
        let bg = if active || painter.is_hovered(frame) { self.frame_hover_color } else { self.frame_color };
        painter.fill_rounded_rect(frame, 3.0, bg, None);

        let grab = if active { self.grab_active_color } else { self.grab_color };
        painter.fill_rounded_rect(self.grab_rect(frame), 2.0, grab, None);

        let Some(style) = self.text else { return };

        let readout = (self.format)(self.value);
        let size = painter.measure_text(&readout, style.font, style.size, None);
        let origin = Vec2::new(
            frame.origin.x + (frame.size.x - size.x) * 0.5,
            frame.origin.y + (frame.size.y - size.y) * 0.5,
        );
        painter.push_clip(frame);
        painter.text(readout, style.font, style.size, style.color, origin, None);
        painter.pop_clip();

        if let Some(label) = &self.label {
            let size = painter.measure_text(label, style.font, style.size, None);
            let origin = Vec2::new(
                frame.max().x + LABEL_GAP,
                rect.origin.y + (rect.size.y - size.y) * 0.5,
            );
            painter.text(label.as_str(), style.font, style.size, style.color, origin, None);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &LayoutCtx) -> EventResult {
        let label_w = self.label_width(|t, s| ctx.measure_text(t, s.font, s.size, None));
        let frame = self.frame_rect(rect, label_w);
        match event {
            UiEvent::Drag { pos, start } | UiEvent::DragEnd { pos, start } if frame.contains(*start) => {
                self.set_from(frame, pos.x);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use sterne_engine::text::FontSystem;

    // Frame 0..110 wide: with a 10px grab, x = 5 maps to min and x = 105 to max.
    const FRAME: Rect = Rect::new(0.0, 0.0, 110.0, 20.0);

    fn drag(x: f32, start_x: f32) -> UiEvent {
        UiEvent::Drag { pos: Vec2::new(x, 10.0), start: Vec2::new(start_x, 10.0) }
    }

    #[test]
    fn value_is_clamped_and_nan_goes_to_min() {
        assert_eq!(Slider::new(-1.0, 1.0).value(3.0).current(), 1.0);
        assert_eq!(Slider::new(-1.0, 1.0).value(-3.0).current(), -1.0);
        assert_eq!(Slider::new(-1.0, 1.0).value(f32::NAN).current(), -1.0);
    }

    #[test]
    fn reversed_range_is_swapped() {
        let s = Slider::new(5.0, -5.0).value(0.0);
        assert_eq!((s.min, s.max), (-5.0, 5.0));
    }

    #[test]
    fn step_snaps_to_grid_from_min() {
        let s = Slider::new(100.0, 40_000.0).step(1.0).value(8000.4);
        assert_eq!(s.current(), 8000.0);
        let s = Slider::new(0.0, 1.0).step(0.25).value(0.6);
        assert_eq!(s.current(), 0.5);
    }

    #[test]
    fn non_positive_step_is_ignored() {
        let s = Slider::new(0.0, 1.0).step(0.0).value(0.3);
        assert_eq!(s.current(), 0.3);
    }

    #[test]
    fn cursor_maps_linearly_across_travel() {
        let s = Slider::new(-1.0, 1.0);
        assert_eq!(s.value_at(FRAME, 5.0), -1.0);
        assert_eq!(s.value_at(FRAME, 55.0), 0.0);
        assert_eq!(s.value_at(FRAME, 105.0), 1.0);
        assert_eq!(s.value_at(FRAME, -50.0), -1.0);
        assert_eq!(s.value_at(FRAME, 500.0), 1.0);
    }

    #[test]
    fn grab_follows_fraction() {
        let s = Slider::new(0.0, 10.0).value(5.0);
        assert_eq!(s.grab_rect(FRAME).origin.x, 50.0);
        let s = Slider::new(0.0, 10.0).value(10.0);
        assert_eq!(s.grab_rect(FRAME).max().x, 110.0);
    }

    #[test]
    fn drag_inside_reports_every_change() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut s = Slider::new(-1.0, 1.0).on_change(move |v| sink.borrow_mut().push(v));

        assert!(s.on_event(&drag(55.0, 55.0), FRAME, &ctx).is_consumed());
        assert!(s.on_event(&drag(105.0, 55.0), FRAME, &ctx).is_consumed());
        // Same position again: no new change.
        s.on_event(&drag(105.0, 55.0), FRAME, &ctx);

        assert_eq!(*seen.borrow(), vec![0.0, 1.0]);
    }

    #[test]
    fn drag_started_elsewhere_is_ignored() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let mut s = Slider::new(-1.0, 1.0).value(0.5);
        assert_eq!(s.on_event(&drag(5.0, 300.0), FRAME, &ctx), EventResult::Ignored);
        assert_eq!(s.current(), 0.5);
    }

    #[test]
    fn release_outside_still_commits() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let mut s = Slider::new(0.0, 1.0);
        let end = UiEvent::DragEnd { pos: Vec2::new(900.0, 400.0), start: Vec2::new(20.0, 5.0) };
        assert!(s.on_event(&end, FRAME, &ctx).is_consumed());
        assert_eq!(s.current(), 1.0);
    }

    #[test]
    fn measure_fills_available_width() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let size = Slider::new(0.0, 1.0).measure(Constraints::loose(Vec2::new(240.0, 100.0)), &ctx);
        assert_eq!(size, Vec2::new(240.0, 20.0));
    }
}
