//! Emissive strength scaling on the green channel of MER textures.

use crate::raster::{clamp_u8, Raster, G};

/// Fraction of the unapplied multiplier still added on top of a clipped-free scale.
pub const EMISSIVE_EXCESS_DAMPEN: f64 = 0.1;

/// Round mid-range emissive values up and bright ones down.
///
/// Values below 127.5 are rounded up, values from 127.5 on are rounded down.
#[inline]
pub fn round_emissive(value: f64) -> f64 {
    if value < 127.5 {
        value.ceil()
    } else {
        value.floor()
    }
}

/// Scale emissive values, and optionally lift every pixel by an ambient floor.
///
/// The scale never pushes the brightest pixel past 255: the multiplier is
/// capped at `255 / max_green` and the remainder is added back at
/// [`EMISSIVE_EXCESS_DAMPEN`]. Pixels with no emission stay dark unless
/// `ambient_light` is set, which adds `ceil(multiplier) + 1` to every pixel.
pub fn apply_emissivity(raster: &mut Raster, multiplier: f64, ambient_light: bool) {
    if multiplier != 1.0 {
        scale_emissive(raster, multiplier);
    }
    if ambient_light {
        let floor = multiplier.ceil() + 1.0;
        for p in raster.pixels_mut() {
            p[G] = clamp_u8(p[G] as f64 + floor);
        }
    }
}

fn scale_emissive(raster: &mut Raster, multiplier: f64) {
    let Some((_, max_green)) = raster.channel_range(G) else {
        return;
    };
    if max_green == 0 {
        return;
    }

    let needed = 255.0 / max_green as f64;
    let effective = multiplier.min(needed);
    let excess = (multiplier - effective).max(0.0);

    for p in raster.pixels_mut() {
        if p[G] == 0 {
            continue;
        }
        let green = p[G] as f64;
        let mut scaled = green * effective;
        if excess > 0.0 {
            scaled += green * excess * EMISSIVE_EXCESS_DAMPEN;
        }
        p[G] = clamp_u8(round_emissive(scaled));
    }
}
