use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds (clamped).
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stall (window drag, debugger, minimized
/// window) cannot move the field by more than `dt_max` worth of travel.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Default clamps: `[100 µs, 250 ms]`.
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self { last: Instant::now(), frame_index: 0, dt_min, dt_max }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last).clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime { dt: dt.as_secs_f32(), now, frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_long_stall() {
        let mut c = FrameClock::new();
        let start = c.last;
        let ft = c.tick_at(start + Duration::from_secs(3));
        assert!((ft.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn clamps_zero_delta() {
        let mut c = FrameClock::new();
        let start = c.last;
        let ft = c.tick_at(start);
        assert!((ft.dt - 0.0001).abs() < 1e-7);
    }

    #[test]
    fn passes_normal_delta_and_counts_frames() {
        let mut c = FrameClock::new();
        let start = c.last;
        let a = c.tick_at(start + Duration::from_millis(16));
        let b = c.tick_at(start + Duration::from_millis(32));
        assert!((a.dt - 0.016).abs() < 1e-6);
        assert!((b.dt - 0.016).abs() < 1e-6);
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
    }
}
