//! Materials and surface scattering.
//!
//! A material both emits light and scales the light arriving along a single
//! scattered direction. There are two scattering lobes: a diffuse lobe that
//! picks a direction uniformly over the whole unit sphere, and a perfect
//! mirror.

use std::f32::consts::PI;

use glint_math::{reflect, Color, Vec3};
use rand::RngCore;

use crate::random::gen_range_f32;
use crate::scene::SceneError;
use crate::Sphere;

/// How a material picks the outgoing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterKind {
    /// Uniform over the full unit sphere, independent of the normal.
    Diffuse,
    /// Perfect mirror reflection about the surface normal.
    Specular,
}

impl TryFrom<u32> for ScatterKind {
    type Error = SceneError;

    /// Decode a raw scattering tag (0 = diffuse, 1 = specular).
    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(ScatterKind::Diffuse),
            1 => Ok(ScatterKind::Specular),
            other => Err(SceneError::UnknownScatterKind(other)),
        }
    }
}

/// Surface material: emission, reflectance and a scattering lobe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Radiance emitted regardless of incoming light
    pub emit_color: Color,
    /// Scales the recursively estimated incoming radiance (not clamped)
    pub reflect_color: Color,
    pub kind: ScatterKind,
}

impl Material {
    pub fn new(emit_color: Color, reflect_color: Color, kind: ScatterKind) -> Self {
        Self {
            emit_color,
            reflect_color,
            kind,
        }
    }

    /// A material that only emits. The scattering lobe is irrelevant because
    /// the reflectance zeroes the recursive term.
    pub fn emissive(emit_color: Color) -> Self {
        Self::new(emit_color, Color::ZERO, ScatterKind::Specular)
    }

    pub fn diffuse(reflect_color: Color) -> Self {
        Self::new(Color::ZERO, reflect_color, ScatterKind::Diffuse)
    }

    pub fn specular(reflect_color: Color) -> Self {
        Self::new(Color::ZERO, reflect_color, ScatterKind::Specular)
    }

    /// Builder-style emission override.
    pub fn with_emission(mut self, emit_color: Color) -> Self {
        self.emit_color = emit_color;
        self
    }

    /// Outgoing direction for a ray arriving along `dir` at `hit_point` on
    /// `sphere`.
    pub fn scatter(
        &self,
        dir: Vec3,
        hit_point: Vec3,
        sphere: &Sphere,
        rng: &mut dyn RngCore,
    ) -> Vec3 {
        match self.kind {
            ScatterKind::Diffuse => random_unit_vector(rng),
            ScatterKind::Specular => reflect(dir, sphere.normal_at(hit_point)),
        }
    }
}

/// Uniform direction on the unit sphere (Archimedes' cylinder projection).
///
/// Draws the azimuth first, then z. The z draw is half-open, [-1, 1).
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let a = gen_range_f32(rng, 0.0, 2.0 * PI);
    let z = gen_range_f32(rng, -1.0, 1.0);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * a.cos(), r * a.sin(), z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Xorshift32;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scatter_kind_from_tag() {
        assert_eq!(ScatterKind::try_from(0).unwrap(), ScatterKind::Diffuse);
        assert_eq!(ScatterKind::try_from(1).unwrap(), ScatterKind::Specular);
        assert!(matches!(
            ScatterKind::try_from(7),
            Err(SceneError::UnknownScatterKind(7))
        ));
    }

    #[test]
    fn test_specular_mirrors_about_normal() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, 1);
        let material = Material::specular(Color::ONE);
        let mut rng = Xorshift32::new(1);

        // Hit the top of the sphere coming down at 45 degrees
        let dir = Vec3::new(1.0, 0.0, -1.0).normalize();
        let hit_point = Vec3::new(0.0, 0.0, 2.0);
        let out = material.scatter(dir, hit_point, &sphere, &mut rng);

        assert!((out - Vec3::new(1.0, 0.0, 1.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_specular_preserves_magnitude() {
        let sphere = Sphere::new(Vec3::new(3.0, -3.0, 0.8), 1.0, 4);
        let material = Material::specular(Color::splat(0.95));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..256 {
            let n = random_unit_vector(&mut rng);
            let hit_point = sphere.center() + n * sphere.radius();
            let dir = random_unit_vector(&mut rng);
            let out = material.scatter(dir, hit_point, &sphere, &mut rng);
            assert!((out.length() - dir.length()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_specular_consumes_no_randomness() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 1);
        let material = Material::specular(Color::ONE);
        let mut rng = Xorshift32::new(5);

        material.scatter(-Vec3::Z, Vec3::Z, &sphere, &mut rng);
        assert_eq!(rng, Xorshift32::new(5));
    }

    #[test]
    fn test_diffuse_directions_are_unit() {
        let mut rng = Xorshift32::new(77);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_diffuse_is_isotropic() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 1);
        let material = Material::diffuse(Color::splat(0.5));
        let mut rng = Xorshift32::new(2024);

        let n = 200_000;
        let mut sum = Vec3::ZERO;
        let mut sum_sq = 0.0f64;
        for _ in 0..n {
            // Normal and incoming direction must not matter
            let v = material.scatter(Vec3::X, Vec3::Z, &sphere, &mut rng);
            sum += v;
            sum_sq += v.length_squared() as f64;
        }

        let mean = sum / n as f32;
        let mean_sq = sum_sq / n as f64;
        assert!(mean.length() < 0.01, "mean = {mean}");
        assert!((mean_sq - 1.0).abs() < 1e-3, "mean_sq = {mean_sq}");
    }

    #[test]
    fn test_diffuse_covers_both_hemispheres() {
        let mut rng = Xorshift32::new(3);
        let below = (0..1000)
            .filter(|_| random_unit_vector(&mut rng).z < 0.0)
            .count();
        assert!(below > 400 && below < 600, "below = {below}");
    }
}
