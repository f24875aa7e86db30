use std::fmt;
use std::path::Path;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Line height used when a string has no glyphs, as a multiple of the size.
const EMPTY_LINE_HEIGHT: f32 = 1.2;

#[derive(Debug, Clone)]
pub enum FontLoadError {
    Io { path: String, message: String },
    Parse(String),
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontLoadError::Io { path, message } => write!(f, "cannot read font {path}: {message}"),
            FontLoadError::Parse(message) => write!(f, "cannot parse font: {message}"),
        }
    }
}

impl std::error::Error for FontLoadError {}

/// Handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Loaded fonts, shared by the overlay (for layout) and the text renderer
/// (for rasterization).
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError::Parse(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub fn load_font_file(&mut self, path: impl AsRef<Path>) -> Result<FontId, FontLoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| FontLoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let id = self.load_font(&bytes)?;
        log::info!("loaded font {}", path.display());
        Ok(id)
    }

    /// Loads the first candidate that reads and parses. Failures are logged at
    /// debug level; `None` means no candidate worked.
    pub fn load_first_available<P: AsRef<Path>>(&mut self, candidates: &[P]) -> Option<FontId> {
        candidates.iter().find_map(|p| match self.load_font_file(p) {
            Ok(id) => Some(id),
            Err(e) => {
                log::debug!("{e}");
                None
            }
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// `(width, height)` of the laid-out string in logical pixels.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        self.measure_text_scaled(text, id, size, max_width, 1.0)
    }

    /// Lays out at `size * scale` and divides back, so the result matches
    /// what the text renderer places in physical pixels.
    #[must_use]
    pub fn measure_text_scaled(
        &self,
        text: &str,
        id: FontId,
        size: f32,
        max_width: Option<f32>,
        scale: f32,
    ) -> Vec2 {
        let empty = Vec2::new(0.0, size * EMPTY_LINE_HEIGHT);
        let Some(font) = self.get(id) else {
            return empty;
        };

        let scale = scale.max(0.01);
        let phys_size = size * scale;

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings {
            max_width: max_width.map(|w| w * scale),
            ..LayoutSettings::default()
        });
        layout.append(&[font], &TextStyle::new(text, phys_size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return empty;
        }

        // Pen position after each glyph, not the bitmap edge, so a measured
        // width fed back as max_width never wraps.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, phys_size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = glyphs.iter().map(|g| g.y + g.height as f32).fold(phys_size, f32::max);
        Vec2::new(w / scale, h / scale)
    }
}
