//! Scene aggregate: material arena plus an ordered primitive list.

use crate::{HitRecord, Material, MaterialId, Primitive, Ray, Sphere};
use ivar_math::{Interval, Vec3};
use thiserror::Error;

/// Errors that can occur while building a scene.
#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("Unknown material handle {0:?}")]
    UnknownMaterial(MaterialId),

    #[error("Material arena is full")]
    TooManyMaterials,
}

/// Spheres and the materials they share.
///
/// Both lists are append-only; the scene is read-only while rendering and
/// shared by every worker.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    materials: Vec<Material>,
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material to the arena and return its handle.
    pub fn add_material(&mut self, material: Material) -> Result<MaterialId, SceneError> {
        let id = u32::try_from(self.materials.len()).map_err(|_| SceneError::TooManyMaterials)?;
        self.materials.push(material);
        Ok(MaterialId(id))
    }

    /// Add a primitive. Its material handle must come from this scene.
    pub fn add(&mut self, primitive: impl Into<Primitive>) -> Result<(), SceneError> {
        let primitive = primitive.into();
        let material = primitive.material();
        if material.index() >= self.materials.len() {
            return Err(SceneError::UnknownMaterial(material));
        }
        self.primitives.push(primitive);
        Ok(())
    }

    /// Convenience for `add(Sphere::new(..))`.
    pub fn add_sphere(
        &mut self,
        center: Vec3,
        radius: f32,
        material: MaterialId,
    ) -> Result<(), SceneError> {
        self.add(Sphere::new(center, radius, material))
    }

    /// Look up a material by handle.
    ///
    /// Handles are validated on insertion, so every handle stored in a
    /// primitive of this scene resolves.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Nearest hit strictly inside `ray_t`, testing primitives in insertion order.
    ///
    /// Each test only searches nearer than the best hit so far, so a later
    /// primitive replaces the result only when it is strictly closer.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for primitive in &self.primitives {
            if let Some(rec) = primitive.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
