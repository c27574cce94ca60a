// Re-export glam for convenience
pub use glam::*;

// glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Linear RGB color. Components are radiance, not display values.
pub type Color = Vec3;

/// Mirror `v` about the unit normal `n`.
///
/// `v - 2 * dot(v, n) * n`. If `n` is not unit length the result is scaled
/// along `n` accordingly; callers are expected to pass a unit normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}
