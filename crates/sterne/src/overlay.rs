//! The "Settings" panel: two sliders and a frame-time readout.
//!
//! The tree is rebuilt from [`SimParams`] every frame. Slider callbacks only
//! record [`ParamChange`]s; the app drains them with [`Overlay::take_changes`]
//! after the UI pass and applies them itself.

use std::cell::RefCell;
use std::rc::Rc;

use sterne_field::{FieldConfig, ParamChange, SimParams};
use sterne_ui::prelude::*;

const PANEL_WIDTH: f32 = 300.0;
const MARGIN: f32 = 8.0;

/// Status line under the sliders, e.g. `deltaTime 0.016 (60.0 FPS)`.
pub fn status_line(dt: f32, fps: f32) -> String {
    format!("deltaTime {dt:.3} ({fps:.1} FPS)")
}

pub struct Overlay {
    font: Option<FontId>,
    font_size: f32,
    changes: Rc<RefCell<Vec<ParamChange>>>,
}

impl Overlay {
    /// Without a font the panel still shows both sliders, just no text.
    pub fn new(font: Option<FontId>, font_size: f32) -> Self {
        Self { font, font_size, changes: Rc::default() }
    }

    pub fn build(&self, params: &SimParams, config: &FieldConfig, status: &str) -> Element {
        let text_color = Color::from_srgb_u8(0xe6, 0xe6, 0xe6, 0xff);
        let mut column = Column::new().spacing(6.0).align(Align::Stretch);

        if let Some(font) = self.font {
            column = column.child(Text::new("Settings", font, self.font_size + 1.0, text_color));
        }

        let changes = self.changes.clone();
        let mut speed = Slider::new(*config.speed_range.start(), *config.speed_range.end())
            .value(params.speed)
            .format(|v| format!("{v:.3}"))
            .on_change(move |v| changes.borrow_mut().push(ParamChange::Speed(v)));

        let changes = self.changes.clone();
        let mut count = Slider::new(
            *config.count_range.start() as f32,
            *config.count_range.end() as f32,
        )
        .step(1.0)
        .value(params.target_count as f32)
        .format(|v| format!("{v:.0}"))
        .on_change(move |v| {
            changes.borrow_mut().push(ParamChange::TargetCount(v.round().max(0.0) as usize))
        });

        if let Some(font) = self.font {
            speed = speed.text_style(font, self.font_size, text_color).label("speed");
            count = count.text_style(font, self.font_size, text_color).label("number of stars");
        }
        column = column.child(speed).child(count);

        if let Some(font) = self.font {
            column = column.child(Text::new(status, font, self.font_size, text_color));
        }

        let panel = Container::new()
            .width(PANEL_WIDTH)
            .padding_all(10.0)
            .background(Color::from_srgb_u8(0x0f, 0x0f, 0x0f, 0xf0))
            .border(Border::new(1.0, Color::from_srgb_u8(0x6e, 0x6e, 0x80, 0x80)))
            .corner_radius(4.0)
            .child(column);

        Container::new().padding_all(MARGIN).child(panel).into()
    }

    /// Slider movements recorded since the last call, oldest first.
    pub fn take_changes(&self) -> Vec<ParamChange> {
        std::mem::take(&mut *self.changes.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Without a font the first slider sits right under the panel padding:
    // frame x in [18, 298), y in [18, 38). The second one starts at y = 44.
    const SPEED_Y: f32 = 28.0;
    const COUNT_Y: f32 = 54.0;

    fn press(x: f32, y: f32) -> UiInput {
        UiInput { mouse_pos: Some(Vec2::new(x, y)), mouse_pressed: true }
    }

    fn run(ui: &mut UiScene, overlay: &Overlay, params: &SimParams, input: UiInput) {
        let root = overlay.build(params, &FieldConfig::default(), "");
        ui.frame(root, Vec2::new(640.0, 480.0), 1.0, &input);
    }

    #[test]
    fn status_line_format() {
        assert_eq!(status_line(0.016_67, 59.98), "deltaTime 0.017 (60.0 FPS)");
        assert_eq!(status_line(0.0, 0.0), "deltaTime 0.000 (0.0 FPS)");
    }

    #[test]
    fn idle_frame_records_nothing() {
        let overlay = Overlay::new(None, 13.0);
        let mut ui = UiScene::new();
        let params = SimParams::from_config(&FieldConfig::default());
        run(&mut ui, &overlay, &params, UiInput::default());
        assert!(overlay.take_changes().is_empty());
        assert!(!ui.draw_list.is_empty());
    }

    #[test]
    fn dragging_speed_records_live_changes() {
        let overlay = Overlay::new(None, 13.0);
        let mut ui = UiScene::new();
        let mut params = SimParams::from_config(&FieldConfig::default());

        // Centre of the travel is speed 0.
        run(&mut ui, &overlay, &params, press(158.0, SPEED_Y));
        assert_eq!(overlay.take_changes(), vec![ParamChange::Speed(0.0)]);
        params.speed = 0.0;

        // Still held, pulled past the right edge.
        run(&mut ui, &overlay, &params, press(600.0, SPEED_Y));
        assert_eq!(overlay.take_changes(), vec![ParamChange::Speed(1.0)]);
    }

    #[test]
    fn dragging_count_records_whole_stars() {
        let overlay = Overlay::new(None, 13.0);
        let mut ui = UiScene::new();
        let params = SimParams::from_config(&FieldConfig::default());

        run(&mut ui, &overlay, &params, press(20.0, COUNT_Y));
        assert_eq!(overlay.take_changes(), vec![ParamChange::TargetCount(100)]);
    }

    #[test]
    fn press_outside_panel_changes_nothing() {
        let overlay = Overlay::new(None, 13.0);
        let mut ui = UiScene::new();
        let params = SimParams::from_config(&FieldConfig::default());
        run(&mut ui, &overlay, &params, press(500.0, 400.0));
        run(&mut ui, &overlay, &params, press(158.0, SPEED_Y));
        assert!(overlay.take_changes().is_empty());
    }

    #[test]
    fn take_changes_drains() {
        let overlay = Overlay::new(None, 13.0);
        overlay.changes.borrow_mut().push(ParamChange::Speed(0.5));
        assert_eq!(overlay.take_changes().len(), 1);
        assert!(overlay.take_changes().is_empty());
    }
}
