//! Sterne: a warp-speed starfield with a small settings overlay.
//!
//! Drag the sliders to change speed and star count; Escape or closing the
//! window quits. Set `RUST_LOG=debug` to see star-count changes.

mod app;
mod config;
mod overlay;

use anyhow::Context;

use sterne_engine::logging::init_logging;
use sterne_engine::window::Runtime;
use sterne_ui::UiScene;

use app::StarfieldApp;
use config::AppConfig;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::default();
    init_logging(config.logging.clone());

    config.field.validate().context("invalid starfield configuration")?;

    let mut ui = UiScene::new();
    let font = ui.font_system.load_first_available(config.font_paths.as_slice());
    if font.is_none() {
        log::warn!("no overlay font found; settings panel will have no text");
    }

    let app = StarfieldApp::new(config.field, ui, font, config.font_size, config.clear);
    Runtime::run(config.runtime, config.gpu, app)
}
