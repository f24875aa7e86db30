//! Input subsystem.
//!
//! Nothing here exposes winit types; `platform::winit` does the translation.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, MouseButton, Transition};
