//! Nearest-hit search over the scene's sphere table.

use glint_math::{Interval, Ray};

use crate::scene::{Scene, BACKGROUND};

/// Minimum accepted hit distance. Keeps scattered rays from re-hitting the
/// surface they just left.
pub const HIT_TOLERANCE: f32 = 0.0001;

/// Result of an intersection query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Ray parameter of the hit, `f32::MAX` for the background
    pub distance: f32,
    /// Material index; `BACKGROUND` when nothing was hit
    pub material: usize,
    /// Sphere index, `None` when nothing was hit
    pub sphere: Option<usize>,
}

impl Hit {
    /// A miss: the ray escaped to the background.
    pub const BACKGROUND: Hit = Hit {
        distance: f32::MAX,
        material: BACKGROUND,
        sphere: None,
    };

    pub fn is_background(&self) -> bool {
        self.sphere.is_none()
    }
}

/// Find the nearest hit strictly beyond [`HIT_TOLERANCE`].
///
/// Spheres are scanned in table order and each one only has to beat the
/// closest hit so far, so on an exact tie the earlier sphere wins.
pub fn intersect(scene: &Scene, ray: &Ray) -> Hit {
    let mut hit = Hit::BACKGROUND;
    let mut window = Interval::new(HIT_TOLERANCE, f32::MAX);

    for (index, sphere) in scene.spheres().iter().enumerate() {
        if let Some(t) = sphere.hit(ray, window) {
            hit = Hit {
                distance: t,
                material: sphere.material(),
                sphere: Some(index),
            };
            window = window.with_max(t);
        }
    }

    hit
}
