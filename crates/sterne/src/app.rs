use sterne_engine::coords::Vec2;
use sterne_engine::core::{App, AppControl, FrameCtx};
use sterne_engine::input::{InputFrame, Key};
use sterne_engine::paint::Color;
use sterne_engine::render::shapes::{RoundedRectRenderer, TextRenderer};
use sterne_engine::render::streaks::StreakRenderer;
use sterne_engine::text::FontId;
use sterne_engine::time::FrameRateMeter;
use sterne_field::{FieldConfig, ParamChange, SimParams, Simulation};
use sterne_ui::{UiInput, UiScene};

use crate::overlay::{status_line, Overlay};

/// Application state: the simulation, its live parameters, and the overlay.
pub struct StarfieldApp {
    config: FieldConfig,
    sim: Simulation,
    params: SimParams,

    ui: UiScene,
    overlay: Overlay,
    meter: FrameRateMeter,
    clear: Color,

    streaks: StreakRenderer,
    rects: RoundedRectRenderer,
    text: TextRenderer,
}

impl StarfieldApp {
    /// `ui` carries the fonts already loaded into it; `font` selects the
    /// overlay face among them.
    pub fn new(config: FieldConfig, ui: UiScene, font: Option<FontId>, font_size: f32, clear: Color) -> Self {
        let params = SimParams::from_config(&config);
        log::info!(
            "starfield: {} stars, speed {:.2}",
            params.target_count,
            params.speed
        );
        Self {
            sim: Simulation::new(config.clone()),
            config,
            params,
            ui,
            overlay: Overlay::new(font, font_size),
            meter: FrameRateMeter::new(),
            clear,
            streaks: StreakRenderer::new(),
            rects: RoundedRectRenderer::new(),
            text: TextRenderer::new(),
        }
    }

    fn apply_changes(&mut self, changes: Vec<ParamChange>) {
        apply_changes(&mut self.params, &self.config, changes);
    }
}

/// Applies overlay changes in order. Star-count changes are logged.
fn apply_changes(params: &mut SimParams, config: &FieldConfig, changes: Vec<ParamChange>) {
    let before = params.target_count;
    for change in changes {
        params.apply(change, config);
    }
    if params.target_count != before {
        log::debug!("target star count {} -> {}", before, params.target_count);
    }
}

fn wants_exit(frame: &InputFrame) -> bool {
    frame.keys_pressed.contains(&Key::Escape)
}

impl App for StarfieldApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if wants_exit(ctx.input_frame) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        let dt = ctx.time.dt;
        self.meter.record(dt);

        // UI pass, then apply what the sliders recorded.
        let (w, h) = ctx.window.logical_size();
        let status = status_line(self.meter.last_dt(), self.meter.fps());
        let root = self.overlay.build(&self.params, &self.config, &status);
        self.ui.frame(
            root,
            Vec2::new(w, h),
            ctx.window.scale_factor(),
            &UiInput::from_input(ctx.input),
        );
        let changes = self.overlay.take_changes();
        self.apply_changes(changes);

        let endpoints = self.sim.update(&self.params, dt);

        let streaks = &mut self.streaks;
        let rects = &mut self.rects;
        let text = &mut self.text;
        let draw_list = &mut self.ui.draw_list;
        let fonts = &self.ui.font_system;

        ctx.render(self.clear, |rctx, target| {
            streaks.render(rctx, target, endpoints);
            rects.render(rctx, target, draw_list);
            text.render(rctx, target, draw_list, fonts);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_requests_exit() {
        let mut frame = InputFrame::default();
        assert!(!wants_exit(&frame));
        frame.keys_pressed.insert(Key::Space);
        assert!(!wants_exit(&frame));
        frame.keys_pressed.insert(Key::Escape);
        assert!(wants_exit(&frame));
    }

    #[test]
    fn changes_apply_in_order_and_clamp() {
        let config = FieldConfig::default();
        let mut params = SimParams::from_config(&config);
        apply_changes(
            &mut params,
            &config,
            vec![
                ParamChange::Speed(0.4),
                ParamChange::TargetCount(500),
                ParamChange::Speed(7.0),
                ParamChange::TargetCount(2),
            ],
        );
        assert_eq!(params, SimParams { speed: 1.0, target_count: 100 });
    }

    #[test]
    fn no_changes_keeps_params() {
        let config = FieldConfig::default();
        let mut params = SimParams::from_config(&config);
        let before = params;
        apply_changes(&mut params, &config, Vec::new());
        assert_eq!(params, before);
    }
}
