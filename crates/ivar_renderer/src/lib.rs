//! Ivar - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes made of spheres with diffuse,
//! metal and glass materials.
//!
//! Rendering is split into row stripes, one per worker thread; every
//! worker owns its stripe's framebuffer rows and its own seeded generator.

mod ray;
mod hittable;
mod material;
mod sphere;
mod scene;
mod camera;
mod renderer;
mod scheduler;
mod framebuffer;

pub use ray::Ray;
pub use hittable::{HitRecord, Primitive};
pub use material::{reflect, reflectance, refract, Color, Material, MaterialId, Scatter};
pub use sphere::Sphere;
pub use scene::{Scene, SceneError};
pub use camera::Camera;
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render_pixel, sky_gradient, Background,
    RenderConfig, SHADOW_EPSILON,
};
pub use scheduler::{default_worker_count, render, stripe_rows, worker_seed, RenderError};
pub use framebuffer::{Framebuffer, ImageError, BYTES_PER_PIXEL};

/// Re-export Vec3 and common math types from ivar_math
pub use ivar_math::{Interval, Vec3};
