//! Sterne engine crate.
//!
//! Owns the platform + GPU runtime pieces the starfield app is built on:
//! the winit event loop, the wgpu device/surface, input tracking, frame
//! timing, the 2D draw list used by the overlay, and the renderers that
//! consume it (plus the 3D streak renderer for the field itself).

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
