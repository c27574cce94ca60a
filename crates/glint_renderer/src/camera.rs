//! Pinhole camera for ray generation.
//!
//! The camera looks down its local -z axis with world +Z as up. The viewport
//! plate sits one unit in front of the origin, one unit tall and `aspect`
//! units wide.

use glint_math::{Ray, Vec3};
use thiserror::Error;

/// World up vector used to build the camera basis.
const WORLD_UP: Vec3 = Vec3::Z;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Aspect ratio must be greater than 1 (width > height), got {0}")]
    InvalidAspect(f32),

    #[error("Look-from and look-at points coincide")]
    ZeroViewDirection,

    #[error("View direction is parallel to the world up axis")]
    DegenerateBasis,
}

pub type CameraResult<T> = Result<T, CameraError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    x: Vec3,
    y: Vec3,
    z: Vec3,
    viewport_lower_left: Vec3,
    viewport_width: f32,
    viewport_height: f32,
}

impl Camera {
    /// Build a camera at `look_from` aimed at `look_at`.
    pub fn new(look_from: Vec3, look_at: Vec3, aspect: f32) -> CameraResult<Self> {
        if !(aspect.is_finite() && aspect > 1.0) {
            return Err(CameraError::InvalidAspect(aspect));
        }

        let view = look_from - look_at;
        if view.length_squared() == 0.0 {
            return Err(CameraError::ZeroViewDirection);
        }

        // z points from the target back to the camera; we look down -z
        let z = view.normalize();
        let side = WORLD_UP.cross(z);
        if side.length_squared() < 1e-12 {
            return Err(CameraError::DegenerateBasis);
        }
        let x = side.normalize();
        let y = z.cross(x).normalize();

        let viewport_height = 1.0;
        let viewport_width = viewport_height * aspect;

        let origin = look_from;
        let viewport_center = origin - z;
        let viewport_lower_left =
            viewport_center - x * (0.5 * viewport_width) - y * (0.5 * viewport_height);

        Ok(Self {
            origin,
            x,
            y,
            z,
            viewport_lower_left,
            viewport_width,
            viewport_height,
        })
    }

    /// The reference camera: ten units back along -Y, slightly raised,
    /// looking at the world origin.
    pub fn reference(aspect: f32) -> CameraResult<Self> {
        Self::new(Vec3::new(0.0, -10.0, 1.0), Vec3::ZERO, aspect)
    }

    /// Unit-direction ray through viewport fractions `u` (left to right) and
    /// `v` (bottom to top).
    pub fn ray(&self, u: f32, v: f32) -> Ray {
        let viewport_p = self.viewport_lower_left
            + self.y * (self.viewport_height * v)
            + self.x * (self.viewport_width * u);

        Ray::new(self.origin, (viewport_p - self.origin).normalize())
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Camera basis (right, up, backward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.x, self.y, self.z)
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.viewport_width, self.viewport_height)
    }
}
