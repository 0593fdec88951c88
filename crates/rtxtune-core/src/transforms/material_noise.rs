//! Random per-pixel variation on MER textures.
//!
//! Each of R, G and B receives an integer offset in `[-N, N]`, weighted by
//! how far the value sits from the extremes. Flipbooks share one offset
//! field across all frames so animations do not shimmer.

use crate::raster::{Raster, B, CHANNELS, G, R};
use crate::rng::DeterministicRng;

/// Effectiveness at a value of 255.
pub const HIGH_END_EFFECTIVENESS: f64 = 0.33;

/// Extra weight on the emissive channel.
pub const EMISSIVE_NOISE_WEIGHT: f64 = 0.25;

/// How strongly noise applies at a channel value.
///
/// 1.0 at 128, falling linearly to 0.0 at 0 and to
/// [`HIGH_END_EFFECTIVENESS`] at 255.
pub fn effectiveness(value: u8) -> f64 {
    let v = value as f64;
    if value <= 128 {
        v / 128.0
    } else {
        1.0 - (v - 128.0) / 127.0 * (1.0 - HIGH_END_EFFECTIVENESS)
    }
}

fn channel_weight(channel: usize) -> f64 {
    if channel == G {
        EMISSIVE_NOISE_WEIGHT
    } else {
        1.0
    }
}

/// Perturb one value; out-of-range results keep the original value.
#[inline]
fn perturb(value: u8, offset: i32, weight: f64) -> u8 {
    let shifted = (value as f64 + offset as f64 * effectiveness(value) * weight).round();
    if (0.0..=255.0).contains(&shifted) {
        shifted as u8
    } else {
        value
    }
}

/// Add weighted integer noise of magnitude `offset` to R, G and B.
pub fn apply_material_noise(raster: &mut Raster, offset: u32, rng: &mut DeterministicRng) {
    if offset == 0 || raster.pixel_count() == 0 {
        return;
    }
    let magnitude = i32::try_from(offset).unwrap_or(i32::MAX);

    let frame_pixels = match raster.flipbook_frames() {
        Some(_) => raster.width as usize * raster.width as usize,
        None => raster.pixel_count(),
    };
    let mut field = Vec::with_capacity(frame_pixels * 3);
    for _ in 0..frame_pixels * 3 {
        field.push(rng.gen_offset(magnitude));
    }

    for (i, p) in raster.data.chunks_exact_mut(CHANNELS).enumerate() {
        let base = (i % frame_pixels) * 3;
        for (k, c) in [R, G, B].into_iter().enumerate() {
            p[c] = perturb(p[c], field[base + k], channel_weight(c));
        }
    }
}
