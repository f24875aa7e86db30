use std::path::PathBuf;

use sterne_engine::device::GpuInit;
use sterne_engine::logging::LoggingConfig;
use sterne_engine::paint::Color;
use sterne_engine::window::RuntimeConfig;
use sterne_field::FieldConfig;

/// Overlay font candidates, tried in order. The first one that loads wins.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub runtime: RuntimeConfig,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,
    pub field: FieldConfig,

    /// Background behind the streaks.
    pub clear: Color,

    pub font_paths: Vec<PathBuf>,
    pub font_size: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
            field: FieldConfig::default(),
            clear: Color::BLACK,
            font_paths: FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
            font_size: 13.0,
        }
    }
}
