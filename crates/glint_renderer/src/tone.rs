//! Linear radiance to display-encoded 8-bit pixels.

use glint_math::{Color, Interval};

/// sRGB transfer function on a linear value clamped to [0, 1].
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    let x = Interval::UNIT.clamp(linear);
    if x <= 0.003_130_8 {
        12.92 * x
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

/// Encode one linear channel to 0..=255.
#[inline]
pub fn encode_channel(linear: f32) -> u8 {
    (255.0 * linear_to_srgb(linear)).round() as u8
}

/// Pack a linear color as opaque `0xAARRGGBB`.
pub fn pack_argb(color: Color) -> u32 {
    (0xFF << 24)
        | (encode_channel(color.x) as u32) << 16
        | (encode_channel(color.y) as u32) << 8
        | encode_channel(color.z) as u32
}

/// Split a packed `0xAARRGGBB` pixel into `[r, g, b, a]` bytes.
#[inline]
pub fn unpack_argb(pixel: u32) -> [u8; 4] {
    let [a, r, g, b] = pixel.to_be_bytes();
    [r, g, b, a]
}
