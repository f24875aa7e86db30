use std::collections::VecDeque;

/// Rolling average of frame deltas.
///
/// Keeps the last `window` samples; `fps()` is `1 / mean(dt)`.
#[derive(Debug, Clone)]
pub struct FrameRateMeter {
    samples: VecDeque<f32>,
    window: usize,
    last_dt: f32,
}

impl FrameRateMeter {
    pub const DEFAULT_WINDOW: usize = 60;

    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// `window` is clamped to at least one sample.
    pub fn with_window(window: usize) -> Self {
        let window = window.max(1);
        Self { samples: VecDeque::with_capacity(window), window, last_dt: 0.0 }
    }

    /// Records one frame delta in seconds. Non-finite or negative values are dropped.
    pub fn record(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            return;
        }
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(dt);
        self.last_dt = dt;
    }

    /// Most recent recorded delta, in seconds.
    #[inline]
    pub fn last_dt(&self) -> f32 {
        self.last_dt
    }

    /// Mean delta over the window, or `0.0` before the first sample.
    pub fn average_dt(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    /// Frames per second from the rolling average, or `0.0` with no data.
    pub fn fps(&self) -> f32 {
        let avg = self.average_dt();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for FrameRateMeter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_meter_reports_zero() {
        let m = FrameRateMeter::new();
        assert_eq!(m.fps(), 0.0);
        assert_eq!(m.average_dt(), 0.0);
        assert!(m.is_empty());
    }

    #[test]
    fn steady_sixty_hz() {
        let mut m = FrameRateMeter::new();
        for _ in 0..120 {
            m.record(1.0 / 60.0);
        }
        assert_eq!(m.len(), 60);
        assert!((m.fps() - 60.0).abs() < 0.01);
    }

    #[test]
    fn window_drops_old_samples() {
        let mut m = FrameRateMeter::with_window(4);
        for _ in 0..4 {
            m.record(0.1);
        }
        for _ in 0..4 {
            m.record(0.025);
        }
        assert!((m.average_dt() - 0.025).abs() < 1e-6);
        assert!((m.fps() - 40.0).abs() < 0.01);
    }

    #[test]
    fn last_dt_tracks_latest_sample() {
        let mut m = FrameRateMeter::with_window(3);
        m.record(0.02);
        m.record(0.05);
        assert_eq!(m.last_dt(), 0.05);
    }

    #[test]
    fn ignores_bad_samples() {
        let mut m = FrameRateMeter::with_window(3);
        m.record(f32::NAN);
        m.record(-1.0);
        m.record(f32::INFINITY);
        assert!(m.is_empty());
    }

    #[test]
    fn zero_window_is_clamped() {
        let mut m = FrameRateMeter::with_window(0);
        m.record(0.5);
        m.record(0.25);
        assert_eq!(m.len(), 1);
        assert!((m.fps() - 4.0).abs() < 1e-4);
    }
}
