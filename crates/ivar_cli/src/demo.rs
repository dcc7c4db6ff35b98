//! Built-in procedural scenes.

use ivar_math::{random_color, random_color_range, random_f32, random_range};
use ivar_renderer::{Camera, Color, Material, Scene, SceneError, Vec3};
use rand::RngCore;

use crate::scene_file::SceneSetup;

/// Radius of the small spheres scattered over the ground.
const SMALL_RADIUS: f32 = 0.2;

/// The classic cover scene: a field of small random spheres around three
/// large ones (glass, diffuse and metal).
pub fn book_cover(rng: &mut dyn RngCore) -> Result<SceneSetup, SceneError> {
    let mut scene = Scene::new();

    let ground = scene.add_material(Material::lambertian(Color::new(0.5, 0.5, 0.5)))?;
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground)?;

    let glass = scene.add_material(Material::dielectric(1.5))?;

    // Generate 22x22 grid of small spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * random_f32(rng),
                SMALL_RADIUS,
                b as f32 + 0.9 * random_f32(rng),
            );

            // Keep clear of the large metal sphere
            if (center - Vec3::new(4.0, SMALL_RADIUS, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_color(rng) * random_color(rng);
                scene.add_material(Material::lambertian(albedo))?
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_color_range(rng, 0.5, 1.0);
                let fuzz = random_range(rng, 0.0, 0.5);
                scene.add_material(Material::metal(albedo, fuzz))?
            } else {
                glass
            };
            scene.add_sphere(center, SMALL_RADIUS, material)?;
        }
    }

    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)?;

    let brown = scene.add_material(Material::lambertian(Color::new(0.4, 0.2, 0.1)))?;
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, brown)?;

    let steel = scene.add_material(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0))?;
    scene.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, steel)?;

    let camera = Camera::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0);

    Ok(SceneSetup { scene, camera })
}

/// Three spheres on a ground plane; the left one is a hollow glass bubble
/// made of a sphere and a slightly smaller negative-radius sphere.
pub fn bubble() -> Result<SceneSetup, SceneError> {
    let mut scene = Scene::new();

    let ground = scene.add_material(Material::lambertian(Color::new(0.8, 0.8, 0.0)))?;
    let center = scene.add_material(Material::lambertian(Color::new(0.1, 0.2, 0.5)))?;
    let glass = scene.add_material(Material::dielectric(1.5))?;
    let gold = scene.add_material(Material::metal(Color::new(0.8, 0.6, 0.2), 0.0))?;

    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)?;
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, center)?;
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)?;
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), -0.45, glass)?;
    scene.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, gold)?;

    let look_from = Vec3::new(3.0, 3.0, 2.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    let camera = Camera::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(20.0, 0.5, (look_from - look_at).length());

    Ok(SceneSetup { scene, camera })
}
