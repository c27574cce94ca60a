//! glint renderer - CPU path tracing over a fixed table of spheres.
//!
//! A Monte Carlo estimator with two scattering lobes (uniform-sphere diffuse
//! and perfect mirror), implicit emission on every material, and a
//! row-parallel render loop where each worker owns its random stream.

mod camera;
mod dispatch;
mod intersect;
mod material;
mod output;
mod random;
mod renderer;
mod scene;
mod sphere;
mod tone;

pub use camera::{Camera, CameraError, CameraResult};
pub use dispatch::{guided_chunk_rows, RowChunk, RowDispatcher, WorkerStats};
pub use intersect::{intersect, Hit, HIT_TOLERANCE};
pub use material::{random_unit_vector, Material, ScatterKind};
pub use output::{ImageBuffer, OutputError, OutputResult};
pub use random::{gen_f32, gen_range_f32, Xorshift32};
pub use renderer::{
    cast, render, render_pixel, render_row, ConfigError, RenderConfig, RenderError, RenderResult,
};
pub use scene::{Scene, SceneError, SceneResult, BACKGROUND};
pub use sphere::Sphere;
pub use tone::{encode_channel, linear_to_srgb, pack_argb, unpack_argb};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{reflect, Color, Interval, Ray, Vec3};
