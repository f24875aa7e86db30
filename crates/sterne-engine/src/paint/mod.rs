//! Colour model shared between the overlay widgets and the renderers.

mod color;

pub use color::Color;
