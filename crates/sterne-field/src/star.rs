/// A single point of the field.
///
/// `x` and `y` lie on the viewing plane and never change after creation.
/// `z` is the depth coordinate, kept in `[0, depth_max)` by [`Starfield::advance`].
///
/// [`Starfield::advance`]: crate::Starfield::advance
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Star {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Position as a vertex attribute.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Same plane position, depth shifted by `dz`. No wrap is applied.
    #[inline]
    pub const fn offset_z(self, dz: f32) -> Self {
        Self { z: self.z + dz, ..self }
    }
}
