// Re-export glam for convenience
pub use glam::*;

// Ivar math types
mod interval;
mod sampling;

pub use interval::Interval;
pub use sampling::{
    random_color, random_color_range, random_f32, random_in_unit_disk, random_in_unit_sphere,
    random_range,
};

/// Threshold below which a vector component counts as zero.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Extra vector queries used by the scattering code.
pub trait Vec3Ext {
    /// True if every component is within [`NEAR_ZERO_EPSILON`] of zero.
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.abs().max_element() < NEAR_ZERO_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!Vec3::new(1e-9, 1e-3, 0.0).near_zero());
        assert!(!Vec3::new(0.0, 0.0, -1e-7).near_zero());
    }
}
