//! Immutable scene description: a sphere table and a material table.
//!
//! Material 0 is the background. It is what a ray that escapes every sphere
//! returns, and no sphere may reference it.

use glint_math::{Color, Vec3};
use thiserror::Error;

use crate::{Material, ScatterKind, Sphere};

/// Index of the background material.
pub const BACKGROUND: usize = 0;

/// Errors raised while assembling a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Scene has no materials; material 0 must be the background")]
    MissingBackground,

    #[error("Sphere {sphere} references material {material}, but only {count} materials exist")]
    InvalidMaterial {
        sphere: usize,
        material: usize,
        count: usize,
    },

    #[error("Sphere {0} references the background material")]
    BackgroundGeometry(usize),

    #[error("Sphere {sphere} has invalid radius {radius}")]
    InvalidRadius { sphere: usize, radius: f32 },

    #[error("Material {0} has negative emission")]
    NegativeEmission(usize),

    #[error("Unknown scattering kind tag: {0}")]
    UnknownScatterKind(u32),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Read-only scene shared by all render workers.
#[derive(Debug, Clone)]
pub struct Scene {
    materials: Vec<Material>,
    spheres: Vec<Sphere>,
}

impl Scene {
    /// Build and validate a scene. `materials[0]` is the background.
    pub fn new(materials: Vec<Material>, spheres: Vec<Sphere>) -> SceneResult<Self> {
        if materials.is_empty() {
            return Err(SceneError::MissingBackground);
        }

        for (index, material) in materials.iter().enumerate() {
            if material.emit_color.min_element() < 0.0 {
                return Err(SceneError::NegativeEmission(index));
            }
        }

        for (index, sphere) in spheres.iter().enumerate() {
            if !(sphere.radius().is_finite() && sphere.radius() > 0.0) {
                return Err(SceneError::InvalidRadius {
                    sphere: index,
                    radius: sphere.radius(),
                });
            }
            if sphere.material() == BACKGROUND {
                return Err(SceneError::BackgroundGeometry(index));
            }
            if sphere.material() >= materials.len() {
                return Err(SceneError::InvalidMaterial {
                    sphere: index,
                    material: sphere.material(),
                    count: materials.len(),
                });
            }
        }

        log::debug!(
            "Scene built: {} spheres, {} materials",
            spheres.len(),
            materials.len()
        );

        Ok(Self { materials, spheres })
    }

    /// The reference scene: a sky, a large diffuse ground sphere, a glowing
    /// mirror in the middle and three smaller mirrors around it.
    pub fn reference() -> Self {
        let materials = vec![
            // background
            Material::emissive(Color::new(0.3, 0.4, 0.8)),
            // ground
            Material::diffuse(Color::new(0.5, 0.5, 0.5)),
            // center
            Material::new(
                Color::new(0.4, 0.8, 0.9),
                Color::new(0.8, 0.8, 0.8),
                ScatterKind::Specular,
            ),
            // red left
            Material::specular(Color::new(1.0, 0.0, 0.0)),
            // right
            Material::specular(Color::new(0.95, 0.95, 0.95)),
        ];

        let spheres = vec![
            Sphere::new(Vec3::new(0.0, 0.0, -100.0), 100.0, 1),
            Sphere::new(Vec3::new(0.0, 0.0, 1.0), 1.0, 2),
            Sphere::new(Vec3::new(-2.0, -3.0, 1.5), 0.3, 4),
            Sphere::new(Vec3::new(-3.0, -6.0, 0.0), 0.3, 4),
            Sphere::new(Vec3::new(-3.0, -5.0, 2.0), 0.5, 3),
            Sphere::new(Vec3::new(3.0, -3.0, 0.8), 1.0, 4),
        ];

        Self { materials, spheres }
    }

    pub fn background(&self) -> &Material {
        &self.materials[BACKGROUND]
    }

    /// Material by index. Indices stored in spheres are validated at construction.
    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn sphere(&self, index: usize) -> &Sphere {
        &self.spheres[index]
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }
}
