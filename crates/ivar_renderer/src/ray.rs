//! Ray type for path tracing.
//!
//! A ray is defined by an origin point, a direction vector, and a time value
//! sampled from the camera shutter.

use ivar_math::Vec3;

/// A ray with origin, direction, and time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray
    origin: Vec3,
    /// Direction vector (not normalized; `t` is a parametric fraction of it)
    direction: Vec3,
    /// Shutter time the ray was sampled at
    time: f32,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// Create a ray at time 0.
    #[inline]
    pub fn new_simple(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, 0.0)
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at_unnormalized() {
        let ray = Ray::new_simple(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -2.0));

        assert_eq!(ray.at(0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ray.at(0.5), Vec3::new(1.0, 0.0, -1.0));
        assert_eq!(ray.at(2.0), Vec3::new(1.0, 0.0, -4.0));
    }

    #[test]
    fn test_ray_keeps_time() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y, 0.25);
        assert_eq!(ray.time(), 0.25);
        assert_eq!(Ray::new_simple(Vec3::ZERO, Vec3::Y).time(), 0.0);
    }
}
