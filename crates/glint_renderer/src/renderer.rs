//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive radiance estimation with a bounce budget
//! - Jittered multi-sampling per pixel
//! - sRGB encoding into packed ARGB pixels
//! - Row-parallel rendering on a rayon thread pool

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use glint_math::{Color, Ray};
use rand::RngCore;
use thiserror::Error;

use crate::dispatch::RowDispatcher;
use crate::intersect::intersect;
use crate::output::{ImageBuffer, OutputError};
use crate::random::gen_f32;
use crate::tone::pack_argb;
use crate::{Camera, Scene};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Image must be wider than it is tall, got {width}x{height}")]
    NotLandscape { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    NoSamples,

    #[error("Worker count must be at least 1")]
    NoWorkers,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Jittered camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Scattering events allowed before a path is cut off
    pub max_bounces: u32,
    /// Worker count; `None` uses one per available core
    pub workers: Option<usize>,
    /// Where the binary writes the image
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            samples_per_pixel: 100,
            max_bounces: 8,
            workers: None,
            output: PathBuf::from("out.bmp"),
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_bounces: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_bounces = max_bounces;
        self
    }

    /// Pin the number of render workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyImage { width, height });
        }
        if width <= height {
            return Err(ConfigError::NotLandscape { width, height });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::NoSamples);
        }
        if self.workers == Some(0) {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Resolved worker count.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }
}

/// Estimate the radiance arriving along `ray`.
///
/// A background hit or an exhausted bounce budget returns the hit
/// material's emission. Otherwise the path continues from the hit point:
/// `emit + reflect * cast(scattered, bounces - 1)`.
pub fn cast(scene: &Scene, ray: &Ray, bounces: u32, rng: &mut dyn RngCore) -> Color {
    let hit = intersect(scene, ray);
    let material = scene.material(hit.material);

    let sphere = match hit.sphere {
        Some(sphere) if bounces > 0 => scene.sphere(sphere),
        _ => return material.emit_color,
    };

    let hit_point = ray.at(hit.distance);
    let direction = material.scatter(ray.direction(), hit_point, sphere, rng);
    let incoming = cast(scene, &Ray::new(hit_point, direction), bounces - 1, rng);

    material.emit_color + material.reflect_color * incoming
}

/// Average `samples_per_pixel` jittered estimates for pixel (x, row).
///
/// `row` counts from the top of the image; the camera's v axis counts from
/// the bottom.
pub fn render_pixel(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    x: u32,
    row: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let inverse_width = 1.0 / (config.width.saturating_sub(1).max(1)) as f32;
    let inverse_height = 1.0 / (config.height.saturating_sub(1).max(1)) as f32;
    let image_y = config.height.saturating_sub(1).saturating_sub(row) as f32;

    let mut color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let jitter_x = gen_f32(rng);
        let jitter_y = gen_f32(rng);
        let ray = camera.ray(
            (x as f32 + jitter_x) * inverse_width,
            (image_y + jitter_y) * inverse_height,
        );
        color += cast(scene, &ray, config.max_bounces, rng);
    }

    color / config.samples_per_pixel as f32
}

/// Render and encode one image row into `pixels`.
pub fn render_row(
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    row: u32,
    pixels: &mut [u32],
    rng: &mut dyn RngCore,
) {
    for (x, pixel) in pixels.iter_mut().enumerate() {
        *pixel = pack_argb(render_pixel(scene, camera, config, x as u32, row, rng));
    }
}

/// Render the entire scene to a packed image buffer.
pub fn render(scene: &Scene, camera: &Camera, config: &RenderConfig) -> RenderResult<ImageBuffer> {
    config.validate()?;

    let workers = config.worker_count();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("glint-worker-{}", i))
        .build()?;

    let mut image = ImageBuffer::try_new(config.width, config.height)?;

    log::info!(
        "Rendering {}x{} @ {} spp, {} bounces, {} workers",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_bounces,
        workers
    );

    let start = Instant::now();
    let stats = {
        let dispatcher = RowDispatcher::new(&mut image.pixels, config.width as usize, workers);
        dispatcher.run(&pool, |row, pixels, rng| {
            render_row(scene, camera, config, row, pixels, rng)
        })
    };

    for s in &stats {
        log::debug!("Worker {}: {} rows in {} chunks", s.worker, s.rows, s.chunks);
    }
    log::info!("Rendered in {:?}", start.elapsed());

    Ok(image)
}
