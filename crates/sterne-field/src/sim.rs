use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::FieldConfig;
use crate::field::Starfield;
use crate::params::SimParams;

/// Per-frame driver: owns the field, its RNG, and the reusable streak buffer.
pub struct Simulation {
    config: FieldConfig,
    field: Starfield,
    rng: StdRng,
    streaks: Vec<[f32; 3]>,
}

impl Simulation {
    /// Creates an empty simulation seeded from the OS.
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates an empty simulation with a deterministic seed.
    pub fn with_seed(config: FieldConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, rng: StdRng) -> Self {
        Self { config, field: Starfield::new(), rng, streaks: Vec::new() }
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn field(&self) -> &Starfield {
        &self.field
    }

    /// Runs one frame and returns the line-list endpoints for it.
    ///
    /// Order:
    /// 1. resize the field to `params.target_count`
    /// 2. emit each star as `(star, star - speed along z)`
    /// 3. advance depth by `speed × dt / time_normalization`
    ///
    /// The returned slice therefore shows the positions the stars had when
    /// the frame began. Its length is always `2 × target_count`.
    pub fn update(&mut self, params: &SimParams, dt: f32) -> &[[f32; 3]] {
        let before = self.field.len();
        self.field.resize_to(
            &mut self.rng,
            params.target_count,
            self.config.radius,
            self.config.depth_max,
        );
        if self.field.len() != before {
            log::debug!("starfield: {} -> {} stars", before, self.field.len());
        }

        self.streaks.clear();
        self.streaks.reserve(self.field.len() * 2);
        for star in self.field.stars() {
            self.streaks.push(star.to_array());
            self.streaks.push(star.offset_z(-params.speed).to_array());
        }

        let delta = self.config.depth_delta(params.speed, dt);
        self.field.advance(self.config.depth_max, delta);

        &self.streaks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::wrap_depth;

    fn params(speed: f32, target_count: usize) -> SimParams {
        SimParams { speed, target_count }
    }

    #[test]
    fn starts_empty() {
        let sim = Simulation::with_seed(FieldConfig::default(), 1);
        assert!(sim.field().is_empty());
    }

    #[test]
    fn update_resizes_to_target() {
        let mut sim = Simulation::with_seed(FieldConfig::default(), 1);
        sim.update(&params(-0.1, 500), 0.016);
        assert_eq!(sim.field().len(), 500);
        sim.update(&params(-0.1, 120), 0.016);
        assert_eq!(sim.field().len(), 120);
        sim.update(&params(-0.1, 0), 0.016);
        assert!(sim.field().is_empty());
    }

    #[test]
    fn update_emits_two_endpoints_per_star() {
        let mut sim = Simulation::with_seed(FieldConfig::default(), 2);
        assert_eq!(sim.update(&params(0.3, 250), 0.016).len(), 500);
        assert_eq!(sim.update(&params(0.3, 10), 0.016).len(), 20);
        assert!(sim.update(&params(0.3, 0), 0.016).is_empty());
    }

    #[test]
    fn streak_tail_is_offset_by_negative_speed() {
        let mut sim = Simulation::with_seed(FieldConfig::default(), 3);
        let speed = -0.4;
        let streaks = sim.update(&params(speed, 64), 0.016).to_vec();
        for pair in streaks.chunks_exact(2) {
            let (head, tail) = (pair[0], pair[1]);
            assert_eq!(head[0], tail[0]);
            assert_eq!(head[1], tail[1]);
            assert!((tail[2] - (head[2] - speed)).abs() < 1e-6);
        }
    }

    #[test]
    fn streaks_show_pre_advance_positions() {
        let mut sim = Simulation::with_seed(FieldConfig::default(), 4);
        let p = params(0.5, 32);

        // First update populates; snapshot the positions it left behind.
        sim.update(&p, 0.016);
        let before: Vec<[f32; 3]> = sim.field().stars().iter().map(|s| s.to_array()).collect();

        let dt = 0.1;
        let streaks = sim.update(&p, dt).to_vec();
        let heads: Vec<[f32; 3]> = streaks.iter().step_by(2).copied().collect();
        assert_eq!(heads, before);

        let delta = sim.config().depth_delta(p.speed, dt);
        for (b, s) in before.iter().zip(sim.field().stars()) {
            assert!((s.z - wrap_depth(b[2] + delta, 10.0)).abs() < 1e-5);
        }
    }

    #[test]
    fn zero_speed_freezes_depth() {
        let mut sim = Simulation::with_seed(FieldConfig::default(), 5);
        sim.update(&params(0.0, 100), 0.016);
        let snap = sim.field().stars().to_vec();
        sim.update(&params(0.0, 100), 0.25);
        assert_eq!(sim.field().stars(), &snap[..]);
    }

    #[test]
    fn field_stays_in_bounds_over_many_frames() {
        let mut sim = Simulation::with_seed(FieldConfig::default(), 6);
        for i in 0..200 {
            let speed = if i % 2 == 0 { 1.0 } else { -0.7 };
            sim.update(&params(speed, 300), 0.25);
        }
        for s in sim.field().stars() {
            assert!(s.z >= 0.0 && s.z < 10.0);
            assert!(s.x.abs() <= 6.0 && s.y.abs() <= 6.0);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let mut a = Simulation::with_seed(FieldConfig::default(), 42);
        let mut b = Simulation::with_seed(FieldConfig::default(), 42);
        let sa = a.update(&params(-0.1, 50), 0.016).to_vec();
        let sb = b.update(&params(-0.1, 50), 0.016).to_vec();
        assert_eq!(sa, sb);
    }
}
