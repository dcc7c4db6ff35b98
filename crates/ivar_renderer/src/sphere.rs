//! Sphere primitive for ray tracing.

use crate::{HitRecord, MaterialId, Ray};
use ivar_math::{Interval, Vec3};

/// A sphere primitive.
///
/// A negative radius keeps the same surface but flips the outward normal
/// inward, which is how a hollow glass shell is modelled.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        debug_assert!(radius != 0.0, "sphere radius must be nonzero");
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Intersect `ray` with the sphere, keeping only roots strictly inside `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_interval() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialId::default());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, unit_interval()).expect("should hit");
        assert!((rec.t - 0.5).abs() < 1e-4); // Should hit at t=0.5
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_hit_unnormalized_direction() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialId::default());
        // Direction of length 4: t is a fraction of the direction vector
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0));

        let rec = sphere.hit(&ray, unit_interval()).expect("should hit");
        assert!((rec.t - 0.125).abs() < 1e-4);
        assert!((rec.p - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-4);
    }

    #[test]
    fn test_sphere_secant_root() {
        // Offset 0.3 from the axis: entry at z = -1 + sqrt(0.25 - 0.09) = -0.6
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialId::default());
        let ray = Ray::new_simple(Vec3::new(0.3, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, unit_interval()).expect("should hit");
        assert!((rec.t - 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_far_root_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, MaterialId::default());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, unit_interval()).expect("should hit");
        assert!((rec.t - 2.0).abs() < 1e-4);
        assert!(!rec.front_face);
        assert!((rec.normal + Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialId::default());

        // Perpendicular offset larger than the radius
        let ray = Ray::new_simple(Vec3::new(0.6, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, unit_interval()).is_none());

        // Ray pointing away from sphere
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, unit_interval()).is_none());
    }

    #[test]
    fn test_sphere_outside_interval() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialId::default());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(sphere.hit(&ray, Interval::new(0.001, 0.4)).is_none());
        // Near root excluded, far root accepted
        let rec = sphere.hit(&ray, Interval::new(0.6, 10.0)).expect("far root");
        assert!((rec.t - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_negative_radius_flips_outward_normal() {
        let solid = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialId::default());
        let hollow = Sphere::new(Vec3::new(0.0, 0.0, -1.0), -0.5, MaterialId::default());
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let a = solid.hit(&ray, unit_interval()).expect("should hit");
        let b = hollow.hit(&ray, unit_interval()).expect("should hit");

        assert!((a.t - b.t).abs() < 1e-6);
        assert!(a.front_face);
        assert!(!b.front_face);
        // Stored normal still opposes the ray
        assert!(ray.direction().dot(b.normal) <= 0.0);
    }

    #[test]
    fn test_normal_always_opposes_ray() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut hits = 0;

        for _ in 0..2000 {
            let center = Vec3::new(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
            );
            let radius: f32 = rng.gen_range(0.2..1.5) * if rng.gen::<bool>() { 1.0 } else { -1.0 };
            let origin = Vec3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
            );
            // Aim at a point inside the sphere so the line always crosses it
            let jitter = Vec3::new(
                rng.gen_range(-0.5..0.5),
                rng.gen_range(-0.5..0.5),
                rng.gen_range(-0.5..0.5),
            );
            let direction = (center - origin) + jitter * radius.abs();
            if direction.length_squared() < 1e-4 {
                continue;
            }

            let sphere = Sphere::new(center, radius, MaterialId::default());
            let ray = Ray::new_simple(origin, direction);
            if let Some(rec) = sphere.hit(&ray, unit_interval()) {
                hits += 1;
                assert!(ray.direction().dot(rec.normal) <= 0.0);
                assert!((rec.normal.length() - 1.0).abs() < 1e-3);
                assert!(rec.t > 0.001);
            }
        }

        assert!(hits > 1500, "only {hits} hits");
    }
}
