use crate::config::FieldConfig;

/// Live-tunable parameters, owned by the application and passed into
/// [`Simulation::update`](crate::Simulation::update) every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SimParams {
    /// Depth units per `time_normalization` seconds. Negative flies towards
    /// the viewer; the sign also flips the streak direction.
    pub speed: f32,

    /// Number of stars the field is resized to at the start of each update.
    pub target_count: usize,
}

impl SimParams {
    /// Initial parameters from a config, already clamped to its ranges.
    pub fn from_config(config: &FieldConfig) -> Self {
        Self { speed: config.initial_speed, target_count: config.initial_count }.clamped(config)
    }

    /// Returns a copy with both values forced into the config's slider ranges.
    ///
    /// A NaN speed collapses to the lower bound of the speed range.
    pub fn clamped(self, config: &FieldConfig) -> Self {
        let (lo, hi) = (*config.speed_range.start(), *config.speed_range.end());
        let speed = if self.speed.is_nan() { lo } else { self.speed.clamp(lo, hi) };
        let target_count = self
            .target_count
            .clamp(*config.count_range.start(), *config.count_range.end());
        Self { speed, target_count }
    }

    /// Applies one change and re-clamps. Returns `true` if anything changed.
    pub fn apply(&mut self, change: ParamChange, config: &FieldConfig) -> bool {
        let before = *self;
        match change {
            ParamChange::Speed(v) => self.speed = v,
            ParamChange::TargetCount(n) => self.target_count = n,
        }
        *self = self.clamped(config);
        *self != before
    }
}

/// One slider movement recorded by the overlay.
///
/// The overlay only produces these; the application drains them after the UI
/// pass and feeds them into [`SimParams::apply`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamChange {
    Speed(f32),
    TargetCount(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> FieldConfig {
        FieldConfig::default()
    }

    #[test]
    fn from_config_uses_initial_values() {
        let p = SimParams::from_config(&cfg());
        assert_eq!(p, SimParams { speed: -0.1, target_count: 8000 });
    }

    #[test]
    fn from_config_clamps_out_of_range_initials() {
        let c = FieldConfig { initial_count: 5, initial_speed: 3.0, ..cfg() };
        let p = SimParams::from_config(&c);
        assert_eq!(p, SimParams { speed: 1.0, target_count: 100 });
    }

    #[test]
    fn clamped_speed_bounds() {
        let c = cfg();
        assert_eq!(SimParams { speed: -4.0, target_count: 500 }.clamped(&c).speed, -1.0);
        assert_eq!(SimParams { speed: 4.0, target_count: 500 }.clamped(&c).speed, 1.0);
        assert_eq!(SimParams { speed: 0.25, target_count: 500 }.clamped(&c).speed, 0.25);
    }

    #[test]
    fn clamped_count_bounds() {
        let c = cfg();
        assert_eq!(SimParams { speed: 0.0, target_count: 0 }.clamped(&c).target_count, 100);
        assert_eq!(
            SimParams { speed: 0.0, target_count: 1_000_000 }.clamped(&c).target_count,
            40_000
        );
    }

    #[test]
    fn clamped_nan_speed() {
        let p = SimParams { speed: f32::NAN, target_count: 500 }.clamped(&cfg());
        assert_eq!(p.speed, -1.0);
    }

    #[test]
    fn apply_reports_change() {
        let c = cfg();
        let mut p = SimParams::from_config(&c);
        assert!(p.apply(ParamChange::Speed(0.5), &c));
        assert_eq!(p.speed, 0.5);
        assert!(!p.apply(ParamChange::Speed(0.5), &c));
        assert!(p.apply(ParamChange::TargetCount(1234), &c));
        assert_eq!(p.target_count, 1234);
    }

    #[test]
    fn apply_clamps() {
        let c = cfg();
        let mut p = SimParams { speed: 1.0, target_count: 40_000 };
        assert!(!p.apply(ParamChange::Speed(9.0), &c));
        assert!(!p.apply(ParamChange::TargetCount(90_000), &c));
        assert_eq!(p, SimParams { speed: 1.0, target_count: 40_000 });
    }
}
