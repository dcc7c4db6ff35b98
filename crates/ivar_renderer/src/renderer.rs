//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a fixed bounce budget
//! - Gamma correction
//! - Anti-aliasing via jittered multi-sampling

use crate::{Camera, Color, Ray, Scene};
use ivar_math::{random_f32, Interval};
use rand::RngCore;

/// Lower bound on hit distance; avoids re-hitting the surface a bounce left from.
pub const SHADOW_EPSILON: f32 = 0.001;

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Background {
    /// Vertical gradient from white at the horizon to sky blue at the zenith
    #[default]
    Sky,
    /// Constant color
    Solid(Color),
}

impl Background {
    /// Radiance arriving along an escaping ray.
    pub fn radiance(&self, ray: &Ray) -> Color {
        match *self {
            Background::Sky => sky_gradient(ray),
            Background::Solid(color) => color,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Worker thread count; `None` picks one from the hardware
    pub workers: Option<usize>,
    /// Base seed; worker `i` draws from `seed ^ i`
    pub seed: u64,
    /// Background seen by rays that miss everything
    pub background: Background,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            samples_per_pixel: 100,
            max_depth: 16,
            workers: None,
            seed: 13575,
            background: Background::Sky,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Width over height of the output image.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Compute the color seen by a ray.
///
/// Single-sample radiance estimate: follows scatter events until the ray
/// escapes, is absorbed, or `depth` bounces are spent.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(SHADOW_EPSILON, f32::INFINITY)) else {
        return background.radiance(ray);
    };

    match scene.material(rec.material).scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, scene, depth - 1, background, rng)
        }
        // Ray was absorbed
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let unit = Interval::new(0.0, 1.0);
    let to_byte = |x: f32| (255.99 * unit.clamp(linear_to_gamma(x))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Average `samples_per_pixel` jittered estimates for pixel `(col, row)`.
///
/// `row` counts from the bottom of the image, matching the camera's `t`.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    col: u32,
    row: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let s = (col as f32 + random_f32(rng)) / config.width as f32;
        let t = (row as f32 + random_f32(rng)) / config.height as f32;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, &config.background, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}
