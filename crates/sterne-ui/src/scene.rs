use sterne_engine::coords::{Rect, Vec2};
use sterne_engine::input::{InputState, MouseButton};
use sterne_engine::scene::DrawList;
use sterne_engine::text::FontSystem;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Element;

/// Pointer snapshot for one UI frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UiInput {
    /// Logical pixels; `None` while the cursor is outside the window.
    pub mouse_pos: Option<Vec2>,
    /// Primary button held.
    pub mouse_pressed: bool,
}

impl UiInput {
    pub fn from_input(state: &InputState) -> Self {
        Self {
            mouse_pos: state.pointer_pos.map(|(x, y)| Vec2::new(x, y)),
            mouse_pressed: state.button_down(MouseButton::Left),
        }
    }
}

/// Owns the fonts and the draw list the overlay paints into, plus the drag
/// state that has to outlive a single frame's tree.
#[derive(Default)]
pub struct UiScene {
    pub font_system: FontSystem,
    pub draw_list: DrawList,

    drag_start: Option<Vec2>,
    last_pos: Vec2,
}

impl UiScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one UI frame on a freshly built tree.
    ///
    /// The root is laid out at the top-left corner with its natural size.
    /// Events are routed before painting so the painted frame already shows
    /// this frame's slider positions.
    pub fn frame(
        &mut self,
        mut root: Element,
        viewport: Vec2,
        scale: f32,
        input: &UiInput,
    ) -> &mut DrawList {
        self.draw_list.clear();
        let events = self.pointer_events(input);

        let ctx = LayoutCtx { fonts: &self.font_system, scale };
        let size = root.measure(Constraints::loose(viewport), &ctx);
        let rect = Rect::new(0.0, 0.0, size.x, size.y);

        for event in &events {
            root.on_event(event, rect, &ctx);
        }

        let mut painter = Painter::new(
            &mut self.draw_list,
            &self.font_system,
            scale,
            input.mouse_pos,
            self.drag_start,
        );
        root.paint(&mut painter, rect);

        &mut self.draw_list
    }

    /// Turns the pointer snapshot into this frame's events and advances the
    /// drag state.
    fn pointer_events(&mut self, input: &UiInput) -> Vec<UiEvent> {
        let mut events = Vec::with_capacity(2);
        if let Some(pos) = input.mouse_pos {
            self.last_pos = pos;
            events.push(UiEvent::Hover { pos });
        }
        let pos = self.last_pos;

        match (self.drag_start, input.mouse_pressed) {
            (None, true) => {
                log::debug!("ui: drag start at ({:.1}, {:.1})", pos.x, pos.y);
                self.drag_start = Some(pos);
                events.push(UiEvent::Drag { pos, start: pos });
            }
            (Some(start), true) => events.push(UiEvent::Drag { pos, start }),
            (Some(start), false) => {
                log::debug!("ui: drag end at ({:.1}, {:.1})", pos.x, pos.y);
                self.drag_start = None;
                events.push(UiEvent::DragEnd { pos, start });
            }
            (None, false) => {}
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f32, y: f32, pressed: bool) -> UiInput {
        UiInput { mouse_pos: Some(Vec2::new(x, y)), mouse_pressed: pressed }
    }

    #[test]
    fn idle_pointer_only_hovers() {
        let mut ui = UiScene::new();
        let ev = ui.pointer_events(&at(3.0, 4.0, false));
        assert_eq!(ev, vec![UiEvent::Hover { pos: Vec2::new(3.0, 4.0) }]);
    }

    #[test]
    fn press_drag_release_sequence() {
        let mut ui = UiScene::new();
        let start = Vec2::new(10.0, 10.0);

        let ev = ui.pointer_events(&at(10.0, 10.0, true));
        assert_eq!(ev[1], UiEvent::Drag { pos: start, start });

        let ev = ui.pointer_events(&at(40.0, 12.0, true));
        assert_eq!(ev[1], UiEvent::Drag { pos: Vec2::new(40.0, 12.0), start });

        let ev = ui.pointer_events(&at(55.0, 12.0, false));
        assert_eq!(ev[1], UiEvent::DragEnd { pos: Vec2::new(55.0, 12.0), start });

        let ev = ui.pointer_events(&at(55.0, 12.0, false));
        assert_eq!(ev.len(), 1);
    }

    #[test]
    fn release_clears_drag_state() {
        let mut ui = UiScene::new();
        ui.pointer_events(&at(10.0, 10.0, true));
        assert_eq!(ui.drag_start, Some(Vec2::new(10.0, 10.0)));
        ui.pointer_events(&at(12.0, 10.0, false));
        assert_eq!(ui.drag_start, None);
    }

    #[test]
    fn drag_continues_outside_window_at_last_position() {
        let mut ui = UiScene::new();
        ui.pointer_events(&at(20.0, 5.0, true));
        let ev = ui.pointer_events(&UiInput { mouse_pos: None, mouse_pressed: true });
        assert_eq!(
            ev,
            vec![UiEvent::Drag { pos: Vec2::new(20.0, 5.0), start: Vec2::new(20.0, 5.0) }]
        );
        let ev = ui.pointer_events(&UiInput { mouse_pos: None, mouse_pressed: false });
        assert!(matches!(ev[0], UiEvent::DragEnd { .. }));
    }

    #[test]
    fn from_input_reads_pointer_and_left_button() {
        let state = InputState { pointer_pos: Some((7.0, 8.0)), ..Default::default() };
        let input = UiInput::from_input(&state);
        assert_eq!(input.mouse_pos, Some(Vec2::new(7.0, 8.0)));
        assert!(!input.mouse_pressed);
    }
}
