//! Camera for ray generation.

use crate::Ray;
use ivar_math::{random_in_unit_disk, random_range, Vec3};
use rand::RngCore;

/// Thin-lens perspective camera.
///
/// Configure with the `with_*` setters, then call [`Camera::initialize`]
/// before generating rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32,         // Vertical field of view in degrees
    aspect_ratio: f32, // Viewport width / height
    aperture: f32,     // Lens diameter, 0 = pinhole
    focus_dist: f32,   // Distance from camera to plane of perfect focus

    // Shutter window
    time0: f32,
    time1: f32,

    // Cached computed values (set by initialize())
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
            time0: 0.0,
            time1: 0.0,
            // Cached values (initialized to defaults)
            origin: Vec3::ZERO,
            lower_left_corner: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set viewport aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the shutter window rays are time-stamped within.
    pub fn with_shutter(mut self, time0: f32, time1: f32) -> Self {
        self.time0 = time0;
        self.time1 = time1;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        debug_assert!(
            self.look_from != self.look_at,
            "camera look_from and look_at must differ"
        );

        self.origin = self.look_from;
        self.lens_radius = self.aperture / 2.0;

        // Calculate viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Viewport lives on the focus plane
        self.horizontal = self.focus_dist * viewport_width * self.u;
        self.vertical = self.focus_dist * viewport_height * self.v;
        self.lower_left_corner =
            self.origin - self.horizontal / 2.0 - self.vertical / 2.0 - self.focus_dist * self.w;
    }

    /// Generate a ray through image-plane coordinates `(s, t)`.
    ///
    /// `s` and `t` run over [0, 1] from the bottom-left corner. Randomness is
    /// only drawn for a finite aperture or a non-empty shutter window.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let ray_origin = self.origin + offset;
        let ray_direction =
            self.lower_left_corner + s * self.horizontal + t * self.vertical - ray_origin;

        let ray_time = if self.time1 > self.time0 {
            random_range(rng, self.time0, self.time1)
        } else {
            self.time0
        };

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pinhole() -> Camera {
        let mut camera = Camera::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .with_aspect_ratio(2.0);
        camera.initialize();
        camera
    }

    #[test]
    fn test_camera_initialize() {
        let camera = pinhole();

        assert_eq!(camera.origin, Vec3::ZERO);
        assert!((camera.w - Vec3::Z).length() < 0.001);
        // 90 degree vfov: viewport is 2 high, 4 wide at distance 1
        assert!((camera.vertical - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        assert!((camera.horizontal - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-5);
        assert!((camera.lower_left_corner - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_camera_ray_direction() {
        let camera = pinhole();
        let mut rng = StdRng::seed_from_u64(42);

        let center = camera.get_ray(0.5, 0.5, &mut rng);
        assert!((center.direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        let corner = camera.get_ray(0.0, 0.0, &mut rng);
        assert!((corner.direction() - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-5);
        assert_eq!(corner.origin(), Vec3::ZERO);
        assert_eq!(corner.time(), 0.0);
    }

    #[test]
    fn test_focus_distance_scales_viewport() {
        let mut camera = Camera::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 10.0)
            .with_aspect_ratio(1.0);
        camera.initialize();
        let mut rng = StdRng::seed_from_u64(1);

        let ray = camera.get_ray(1.0, 1.0, &mut rng);
        assert!((ray.direction() - Vec3::new(10.0, 10.0, -10.0)).length() < 1e-3);
    }

    #[test]
    fn test_lens_offset_within_radius() {
        let mut camera = Camera::new()
            .with_position(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_lens(40.0, 0.5, 4.0);
        camera.initialize();
        let mut rng = StdRng::seed_from_u64(3);

        // Every ray through the same (s, t) converges on the focus plane
        let focus_point = camera.lower_left_corner + 0.3 * camera.horizontal + 0.6 * camera.vertical;
        let mut moved = false;
        for _ in 0..200 {
            let ray = camera.get_ray(0.3, 0.6, &mut rng);
            let offset = ray.origin() - camera.origin();
            assert!(offset.length() <= camera.lens_radius() + 1e-5);
            assert!(offset.dot(camera.w).abs() < 1e-5);
            assert!((ray.at(1.0) - focus_point).length() < 1e-4);
            moved |= offset.length() > 1e-3;
        }
        assert!(moved);
    }

    #[test]
    fn test_shutter_time_sampling() {
        let mut camera = Camera::new().with_shutter(0.25, 0.75);
        camera.initialize();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..200 {
            let time = camera.get_ray(0.5, 0.5, &mut rng).time();
            assert!((0.25..0.75).contains(&time));
        }
    }

    #[test]
    fn test_pinhole_draws_no_randomness() {
        let camera = pinhole();
        let mut a = StdRng::seed_from_u64(8);
        let mut b = StdRng::seed_from_u64(8);

        camera.get_ray(0.1, 0.9, &mut a);
        assert_eq!(
            ivar_math::random_f32(&mut a),
            ivar_math::random_f32(&mut b)
        );
    }
}
