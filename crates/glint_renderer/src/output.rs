//! Packed pixel buffer and the image file sink.

use std::path::Path;

use thiserror::Error;

use crate::tone::unpack_argb;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to allocate a {width}x{height} pixel buffer")]
    Allocation { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Packed `0xAARRGGBB` pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl ImageBuffer {
    /// Allocate a zeroed buffer, reporting allocation failure instead of
    /// aborting.
    pub fn try_new(width: u32, height: u32) -> OutputResult<Self> {
        let allocation = OutputError::Allocation { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(allocation)?;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| OutputError::Allocation { width, height })?;
        pixels.resize(len, 0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Get the packed pixel at (x, y), y counted from the top.
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&unpack_argb(*pixel));
        }
        bytes
    }

    /// Write the image to `path`; the format follows the file extension.
    ///
    /// Alpha is always opaque, so the file is written as 8-bit RGB.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> OutputResult<()> {
        let expected = self.width as usize * self.height as usize;
        let rgba = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba()).ok_or(
            OutputError::BufferSize {
                expected,
                actual: self.pixels.len(),
            },
        )?;

        image::DynamicImage::ImageRgba8(rgba)
            .into_rgb8()
            .save(path.as_ref())?;

        log::info!(
            "Wrote {}x{} image to {}",
            self.width,
            self.height,
            path.as_ref().display()
        );
        Ok(())
    }
}
