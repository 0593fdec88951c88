//! Roughness boost on the blue channel of MER textures.

use crate::raster::{clamp_u8, Raster, B};

/// Boost applied at full intensity 10 to a perfectly smooth pixel.
pub const MAX_BOOST_PER_TEN: f64 = 20.0;

/// Roughness increase for a pixel of blue value `value`.
///
/// Smooth (low) values receive the largest boost, falling off with the cube
/// of the normalized roughness down to zero at 255.
pub fn roughness_boost(value: u8, amount: u32) -> f64 {
    let normalized = value as f64 / 255.0;
    (amount as f64 / 10.0) * MAX_BOOST_PER_TEN * (1.0 - normalized.powi(3))
}

/// Raise roughness across the raster.
pub fn apply_roughen_up(raster: &mut Raster, amount: u32) {
    if amount == 0 {
        return;
    }
    for p in raster.pixels_mut() {
        let boosted = p[B] as f64 + roughness_boost(p[B], amount);
        p[B] = clamp_u8(boosted.round());
    }
}
