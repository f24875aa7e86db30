use rand::Rng;

use crate::star::Star;

/// Resizable, ordered collection of stars.
///
/// The collection is created empty and driven towards a target length every
/// frame with [`resize_to`](Self::resize_to). Growth appends freshly sampled
/// stars; shrinking truncates from the end.
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    #[inline]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Appends exactly `n` stars.
    ///
    /// Each star gets independent uniform samples `x, y ∈ [-radius, radius]`
    /// and `z ∈ [0, depth_max)`.
    pub fn append_stars<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        n: usize,
        radius: f32,
        depth_max: f32,
    ) {
        debug_assert!(radius >= 0.0, "radius must be non-negative");
        debug_assert!(depth_max > 0.0, "depth_max must be positive");

        self.stars.reserve(n);
        for _ in 0..n {
            let x = rng.random_range(-radius..=radius);
            let y = rng.random_range(-radius..=radius);
            let z = rng.random_range(0.0..depth_max);
            self.stars.push(Star::new(x, y, z));
        }
    }

    /// Truncates to the first `n` stars. No-op when `len() <= n`.
    #[inline]
    pub fn resize_down(&mut self, n: usize) {
        self.stars.truncate(n);
    }

    /// Grows or shrinks the field so that `len() == target`.
    pub fn resize_to<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        target: usize,
        radius: f32,
        depth_max: f32,
    ) {
        let len = self.stars.len();
        if target > len {
            self.append_stars(rng, target - len, radius, depth_max);
        } else {
            self.resize_down(target);
        }
    }

    /// Moves every star by `delta` along z and wraps depth into `[0, depth_max)`.
    ///
    /// A negative `delta` moves stars away from the viewer. Non-finite deltas
    /// are ignored so a bad frame time cannot poison the whole field.
    pub fn advance(&mut self, depth_max: f32, delta: f32) {
        if !delta.is_finite() {
            log::debug!("starfield: ignoring non-finite depth delta {delta}");
            return;
        }
        if delta == 0.0 {
            return;
        }
        for star in &mut self.stars {
            star.z = wrap_depth(star.z + delta, depth_max);
        }
    }
}

/// Wraps `z` into `[0, depth_max)`.
///
/// `rem_euclid` can round up to exactly `depth_max` for tiny negative inputs;
/// that value is congruent to zero and is folded back.
#[inline]
pub fn wrap_depth(z: f32, depth_max: f32) -> f32 {
    let r = z.rem_euclid(depth_max);
    if r >= depth_max { 0.0 } else { r }
}
