//! Time subsystem.
//!
//! - `FrameClock`: one per window; `tick()` once per presented frame
//! - `FrameRateMeter`: rolling average for the on-screen FPS readout

mod frame_clock;
mod frame_rate;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_rate::FrameRateMeter;
