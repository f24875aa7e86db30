use std::fmt;
use std::ops::RangeInclusive;

/// Error returned by [`FieldConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `depth_max` must be finite and strictly positive.
    DepthMax(f32),
    /// `radius` must be finite and non-negative.
    Radius(f32),
    /// `time_normalization` must be finite and strictly positive.
    TimeNormalization(f32),
    /// A slider range has `start > end`.
    EmptyRange(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DepthMax(v) => write!(f, "depth_max must be > 0 (got {v})"),
            ConfigError::Radius(v) => write!(f, "radius must be >= 0 (got {v})"),
            ConfigError::TimeNormalization(v) => {
                write!(f, "time_normalization must be > 0 (got {v})")
            }
            ConfigError::EmptyRange(name) => write!(f, "{name} range is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Static parameters of the field.
///
/// Everything here is fixed for the lifetime of a [`Simulation`](crate::Simulation);
/// the live-tunable values live in [`SimParams`](crate::SimParams).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Half-extent of the viewing plane. New stars get `x, y ∈ [-radius, radius]`.
    pub radius: f32,

    /// Depth period. Star depth always lies in `[0, depth_max)`.
    pub depth_max: f32,

    /// Divisor applied to `speed × dt` to get the per-frame depth delta.
    pub time_normalization: f32,

    /// Star count used for the first frame.
    pub initial_count: usize,

    /// Speed used for the first frame. Negative values fly towards the viewer.
    pub initial_speed: f32,

    /// Range accepted for `SimParams::speed`.
    pub speed_range: RangeInclusive<f32>,

    /// Range accepted for `SimParams::target_count`.
    pub count_range: RangeInclusive<usize>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            radius: 6.0,
            depth_max: 10.0,
            time_normalization: 0.2,
            initial_count: 8000,
            initial_speed: -0.1,
            speed_range: -1.0..=1.0,
            count_range: 100..=40_000,
        }
    }
}

impl FieldConfig {
    /// Checks the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.depth_max.is_finite() && self.depth_max > 0.0) {
            return Err(ConfigError::DepthMax(self.depth_max));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(ConfigError::Radius(self.radius));
        }
        if !(self.time_normalization.is_finite() && self.time_normalization > 0.0) {
            return Err(ConfigError::TimeNormalization(self.time_normalization));
        }
        if self.speed_range.is_empty() {
            return Err(ConfigError::EmptyRange("speed"));
        }
        if self.count_range.is_empty() {
            return Err(ConfigError::EmptyRange("count"));
        }
        Ok(())
    }

    /// Depth delta for one frame: `speed × dt / time_normalization`.
    #[inline]
    pub fn depth_delta(&self, speed: f32, dt: f32) -> f32 {
        speed * dt / self.time_normalization
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_depth() {
        let c = FieldConfig { depth_max: 0.0, ..FieldConfig::default() };
        assert_eq!(c.validate(), Err(ConfigError::DepthMax(0.0)));
    }

    #[test]
    fn rejects_nan_depth() {
        let c = FieldConfig { depth_max: f32::NAN, ..FieldConfig::default() };
        assert!(matches!(c.validate(), Err(ConfigError::DepthMax(_))));
    }

    #[test]
    fn rejects_negative_radius() {
        let c = FieldConfig { radius: -1.0, ..FieldConfig::default() };
        assert_eq!(c.validate(), Err(ConfigError::Radius(-1.0)));
    }

    #[test]
    fn zero_radius_is_allowed() {
        let c = FieldConfig { radius: 0.0, ..FieldConfig::default() };
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_normalization() {
        let c = FieldConfig { time_normalization: 0.0, ..FieldConfig::default() };
        assert_eq!(c.validate(), Err(ConfigError::TimeNormalization(0.0)));
    }

    #[test]
    fn rejects_empty_count_range() {
        #[allow(clippy::reversed_empty_ranges)]
        let c = FieldConfig { count_range: 10..=5, ..FieldConfig::default() };
        assert_eq!(c.validate(), Err(ConfigError::EmptyRange("count")));
    }

    #[test]
    fn depth_delta_scales_with_time() {
        let c = FieldConfig::default();
        // speed 1.0 for 0.2 s travels exactly one depth unit
        assert!((c.depth_delta(1.0, 0.2) - 1.0).abs() < 1e-6);
        assert!((c.depth_delta(-0.5, 0.1) + 0.25).abs() < 1e-6);
        assert_eq!(c.depth_delta(0.0, 0.5), 0.0);
    }

    #[test]
    fn error_messages_name_the_field() {
        assert_eq!(
            ConfigError::DepthMax(-2.0).to_string(),
            "depth_max must be > 0 (got -2)"
        );
        assert_eq!(ConfigError::EmptyRange("speed").to_string(), "speed range is empty");
    }
}
