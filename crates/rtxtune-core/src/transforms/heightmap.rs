//! Heightmap synthesis from color textures ("butchering").
//!
//! The color texture is reduced to luma, stretched to the full 0-255 range
//! and alpha-blended over the existing heightmap. Higher alpha gives the
//! crisp, pixel-edged relief of the color texture more weight.

use thiserror::Error;

use crate::raster::{Raster, B, G, R};

/// Luma weights (ITU-R BT.601).
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Value used when the color texture has no luma variation.
pub const FLAT_HEIGHT: u8 = 128;

/// Error when the color texture and heightmap cannot be blended.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "color is {}x{} but heightmap is {}x{}",
    color.0,
    color.1,
    heightmap.0,
    heightmap.1
)]
pub struct DimensionMismatch {
    pub color: (u32, u32),
    pub heightmap: (u32, u32),
}

/// Luma of one RGBA pixel.
#[inline]
pub fn luma(p: &[u8]) -> f64 {
    LUMA_WEIGHTS[0] * p[R] as f64 + LUMA_WEIGHTS[1] * p[G] as f64 + LUMA_WEIGHTS[2] * p[B] as f64
}

/// Greyscale heightmap values derived from a color texture, stretched to
/// fill 0-255.
pub fn synthesize_heights(color: &Raster) -> Vec<u8> {
    let lumas: Vec<f64> = color.pixels().map(luma).collect();
    let (min, max) = lumas
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;
    if lumas.is_empty() || range <= 0.0 {
        return vec![FLAT_HEIGHT; lumas.len()];
    }
    lumas
        .iter()
        .map(|&v| ((v - min) / range * 255.0).round().clamp(0.0, 255.0) as u8)
        .collect()
}

/// Blend the color-derived heights into `heightmap` with weight `alpha`.
///
/// The existing height is read from R; R, G and B all receive the blend.
pub fn apply_butchered_heightmap(
    color: &Raster,
    heightmap: &mut Raster,
    alpha: u8,
) -> Result<(), DimensionMismatch> {
    if (color.width, color.height) != (heightmap.width, heightmap.height) {
        return Err(DimensionMismatch {
            color: (color.width, color.height),
            heightmap: (heightmap.width, heightmap.height),
        });
    }

    let synthetic = synthesize_heights(color);
    let a = alpha as f64;
    for (p, &s) in heightmap.pixels_mut().zip(synthetic.iter()) {
        let blended = ((a * s as f64 + (255.0 - a) * p[R] as f64) / 255.0).round() as u8;
        p[R] = blended;
        p[G] = blended;
        p[B] = blended;
    }
    Ok(())
}
