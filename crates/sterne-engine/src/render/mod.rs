//! GPU renderers.
//!
//! `shapes` draws the overlay's [`DrawList`](crate::scene::DrawList) in
//! logical pixels (top-left origin, +Y down). `streaks` draws the 3D field as
//! a depth-tested line list. Every renderer owns its pipelines and buffers and
//! builds them lazily on first use.

mod ctx;
pub mod shapes;
pub mod streaks;

pub use ctx::{RenderCtx, RenderTarget};
