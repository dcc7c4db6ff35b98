//! JSON scene files.
//!
//! A scene file names its materials once and lets any number of spheres
//! refer to them by name:
//!
//! ```json
//! {
//!   "camera": { "look_from": [13, 2, 3], "look_at": [0, 0, 0], "vfov": 20 },
//!   "materials": {
//!     "ground": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] },
//!     "glass": { "type": "dielectric", "refraction_index": 1.5 }
//!   },
//!   "spheres": [
//!     { "center": [0, -1000, 0], "radius": 1000, "material": "ground" },
//!     { "center": [0, 1, 0], "radius": 1, "material": "glass" }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use ivar_renderer::{Camera, Color, Material, MaterialId, Scene, SceneError, Vec3};
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {index} uses unknown material {name:?}")]
    UnknownMaterial { index: usize, name: String },

    #[error("Scene has no spheres")]
    NoSpheres,

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// A scene plus the camera it was authored for.
///
/// The camera is configured but not initialized; the driver sets the
/// aspect ratio from the output resolution first.
#[derive(Debug, Clone)]
pub struct SceneSetup {
    pub scene: Scene,
    pub camera: Camera,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    camera: CameraDesc,
    materials: BTreeMap<String, MaterialDesc>,
    spheres: Vec<SphereDesc>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CameraDesc {
    look_from: [f32; 3],
    look_at: [f32; 3],
    up: [f32; 3],
    vfov: f32,
    aperture: f32,
    focus_dist: f32,
    shutter: [f32; 2],
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
            shutter: [0.0, 0.0],
        }
    }
}

impl CameraDesc {
    fn to_camera(&self) -> Camera {
        Camera::new()
            .with_position(
                Vec3::from(self.look_from),
                Vec3::from(self.look_at),
                Vec3::from(self.up),
            )
            .with_lens(self.vfov, self.aperture, self.focus_dist)
            .with_shutter(self.shutter[0], self.shutter[1])
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
enum MaterialDesc {
    Lambertian {
        albedo: [f32; 3],
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        refraction_index: f32,
    },
}

impl MaterialDesc {
    fn to_material(&self) -> Material {
        match *self {
            MaterialDesc::Lambertian { albedo } => Material::lambertian(Color::from(albedo)),
            MaterialDesc::Metal { albedo, fuzz } => Material::metal(Color::from(albedo), fuzz),
            MaterialDesc::Dielectric { refraction_index } => Material::dielectric(refraction_index),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SphereDesc {
    center: [f32; 3],
    radius: f32,
    material: String,
}

/// Load a scene file from disk.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneSetup> {
    let path = path.as_ref();
    info!("Loading scene {}", path.display());
    let source = std::fs::read_to_string(path)?;
    load_scene_from_str(&source)
}

/// Parse a scene from JSON text.
pub fn load_scene_from_str(source: &str) -> LoadResult<SceneSetup> {
    let file: SceneFile = serde_json::from_str(source)?;
    if file.spheres.is_empty() {
        return Err(LoadError::NoSpheres);
    }

    let mut scene = Scene::new();
    let mut handles: HashMap<&str, MaterialId> = HashMap::with_capacity(file.materials.len());
    for (name, desc) in &file.materials {
        let id = scene.add_material(desc.to_material())?;
        handles.insert(name.as_str(), id);
    }

    for (index, sphere) in file.spheres.iter().enumerate() {
        let Some(&material) = handles.get(sphere.material.as_str()) else {
            return Err(LoadError::UnknownMaterial {
                index,
                name: sphere.material.clone(),
            });
        };
        scene.add_sphere(Vec3::from(sphere.center), sphere.radius, material)?;
    }

    debug!(
        "Scene has {} spheres sharing {} materials",
        scene.len(),
        scene.materials().len()
    );

    Ok(SceneSetup {
        scene,
        camera: file.camera.to_camera(),
    })
}
