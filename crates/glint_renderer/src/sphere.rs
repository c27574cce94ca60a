//! Sphere primitive for ray tracing.

use glint_math::{Interval, Ray, Vec3};

/// A sphere primitive referencing a material by index.
///
/// The reciprocal radius is cached at construction for normal computation.
/// Spheres are immutable, so `inv_radius == 1 / radius` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    inv_radius: f32,
    material: usize,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: usize) -> Self {
        Self {
            center,
            radius,
            inv_radius: 1.0 / radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn inv_radius(&self) -> f32 {
        self.inv_radius
    }

    /// Index into the scene's material table.
    pub fn material(&self) -> usize {
        self.material
    }

    /// Outward unit normal at a point on the surface.
    #[inline]
    pub fn normal_at(&self, p: Vec3) -> Vec3 {
        (p - self.center) * self.inv_radius
    }

    /// Nearest ray parameter strictly inside `ray_t`, if any.
    ///
    /// Uses the reduced quadratic, which is only exact for a unit-length
    /// ray direction. The near root `-b - sqrt(discr)` is always tried before
    /// the far one so a hit in front of the origin wins over one behind it.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let sphere_relative_origin = ray.origin() - self.center;
        let b = ray.direction().dot(sphere_relative_origin);
        let c = sphere_relative_origin.length_squared() - self.radius * self.radius;

        let discr = b * b - c;
        if discr <= 0.0 {
            return None;
        }

        let root_term = discr.sqrt();

        let near = -b - root_term;
        if ray_t.surrounds(near) {
            return Some(near);
        }

        // Origin inside the sphere or near root behind the tolerance
        let far = -b + root_term;
        if ray_t.surrounds(far) {
            return Some(far);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Interval = Interval::new(0.0001, f32::MAX);

    #[test]
    fn test_inv_radius_cached() {
        let sphere = Sphere::new(Vec3::ZERO, 0.3, 1);
        assert_eq!(sphere.inv_radius(), 1.0 / 0.3);
    }

    #[test]
    fn test_sphere_hit_head_on() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5, 1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = sphere.hit(&ray, WINDOW).unwrap();
        // |origin - center| - radius
        assert!((t - 4.5).abs() < 1e-5, "t = {t}");
    }

    #[test]
    fn test_sphere_hit_distance_off_axis() {
        let center = Vec3::new(3.0, -2.0, 7.0);
        let origin = Vec3::new(-1.0, 4.0, 0.5);
        let sphere = Sphere::new(center, 1.25, 1);
        let ray = Ray::new(origin, (center - origin).normalize());

        let t = sphere.hit(&ray, WINDOW).unwrap();
        let expected = (origin - center).length() - 1.25;
        assert!((t - expected).abs() < 1e-4, "t = {t}, expected = {expected}");
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, 1);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, WINDOW).is_none());
    }

    #[test]
    fn test_sphere_behind_origin() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, WINDOW).is_none());
    }

    #[test]
    fn test_origin_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, 1);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let t = sphere.hit(&ray, WINDOW).unwrap();
        assert!((t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_on_surface_skips_self_hit() {
        // Leaving the surface outward: near root ~0 is rejected, far root is behind
        let sphere = Sphere::new(Vec3::ZERO, 1.0, 1);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);
        assert!(sphere.hit(&ray, WINDOW).is_none());

        // Heading back through the sphere: near root rejected, far root accepted
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z);
        let t = sphere.hit(&ray, WINDOW).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_hit_respects_window_max() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 0.5, 1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Closer hit already found at t = 3
        assert!(sphere.hit(&ray, WINDOW.with_max(3.0)).is_none());
    }

    #[test]
    fn test_grazing_ray_misses() {
        // Tangent ray has discr == 0 and counts as a miss
        let sphere = Sphere::new(Vec3::new(0.0, 1.0, -5.0), 1.0, 1);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, WINDOW).is_none());
    }

    #[test]
    fn test_normal_at_is_unit() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.3, 1);
        let p = sphere.center() + Vec3::new(0.0, 0.3, 0.0);
        let n = sphere.normal_at(p);
        assert!((n - Vec3::Y).length() < 1e-5);
    }
}
