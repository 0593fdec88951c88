//! Normal map and heightmap strength adjustment.
//!
//! Normal maps store tangent X/Y in R/G around a neutral 128. Scaling the
//! deviation from 128 strengthens or flattens the surface detail. When
//! strengthening, the whole image is rescaled by one factor so that the
//! largest deviation still fits, keeping relative detail intact instead of
//! clipping the strongest slopes.

use std::path::{Path, PathBuf};

use crate::raster::{clamp_u8, Raster, B, G, R};

/// Neutral tangent value.
pub const NORMAL_NEUTRAL: f64 = 128.0;

/// Largest deviation from neutral that still fits in a byte.
pub const NORMAL_MAX_DEVIATION: f64 = 127.0;

/// Center heightmaps are rescaled around.
pub const HEIGHT_CENTER: f64 = 127.5;

/// Suffix marking the true normal map when a color texture shares its base name.
pub const NORMAL_SUFFIX: &str = "_normal";

/// Convert a percentage parameter into a scale factor.
#[inline]
pub fn intensity_factor(percent: u32) -> f64 {
    percent as f64 / 100.0
}

/// Pick the file to adjust for a resolved normal channel.
///
/// Some packs point the normal channel at a name that a diffuse texture also
/// uses; when `<stem>_normal<ext>` exists beside the resolved file, that one
/// is the real normal map.
pub fn select_normal_file(resolved: &Path) -> PathBuf {
    let (Some(stem), Some(parent)) = (resolved.file_stem(), resolved.parent()) else {
        return resolved.to_path_buf();
    };
    let mut name = stem.to_os_string();
    name.push(NORMAL_SUFFIX);
    if let Some(ext) = resolved.extension() {
        name.push(".");
        name.push(ext);
    }
    let candidate = parent.join(name);
    if candidate.is_file() {
        candidate
    } else {
        resolved.to_path_buf()
    }
}

/// Scale the R/G deviation of a normal map.
pub fn apply_normal_intensity(raster: &mut Raster, intensity: f64) {
    let compression = if intensity > 1.0 {
        let max_deviation = raster
            .pixels()
            .map(|p| {
                let dr = (p[R] as f64 - NORMAL_NEUTRAL).abs();
                let dg = (p[G] as f64 - NORMAL_NEUTRAL).abs();
                dr.max(dg)
            })
            .fold(0.0_f64, f64::max);
        let ideal_max = max_deviation * intensity;
        if ideal_max > NORMAL_MAX_DEVIATION {
            NORMAL_MAX_DEVIATION / ideal_max
        } else {
            1.0
        }
    } else {
        1.0
    };

    let scale = intensity * compression;
    for p in raster.pixels_mut() {
        for c in [R, G] {
            let value = NORMAL_NEUTRAL + (p[c] as f64 - NORMAL_NEUTRAL) * scale;
            p[c] = clamp_u8(value.round());
        }
    }
}

/// Scale the contrast of a heightmap around its own center.
///
/// R is read as the height; the result is written to R, G and B. The span is
/// compressed so the stretched heights never exceed 255 levels.
pub fn apply_heightmap_intensity(raster: &mut Raster, intensity: f64) {
    let Some((min, max)) = raster.channel_range(R) else {
        return;
    };
    let span = (max - min) as f64;
    let ideal_span = span * intensity;
    let actual_span = ideal_span.min(255.0);
    let compression = if ideal_span > 0.0 {
        actual_span / ideal_span.max(actual_span)
    } else {
        1.0
    };
    let center = (max as f64 + min as f64) / 2.0;
    let scale = intensity * compression;

    for p in raster.pixels_mut() {
        let value = clamp_u8((HEIGHT_CENTER + (p[R] as f64 - center) * scale).round());
        p[R] = value;
        p[G] = value;
        p[B] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn normal(pixels: &[(u8, u8)]) -> Raster {
        let mut r = Raster::new(pixels.len() as u32, 1, [128, 128, 255, 255]);
        for (x, (nr, ng)) in pixels.iter().enumerate() {
            r.set(x as u32, 0, [*nr, *ng, 255, 255]);
        }
        r
    }

    #[test]
    fn test_flatten() {
        let mut r = normal(&[(28, 228), (128, 128), (255, 0)]);
        apply_normal_intensity(&mut r, 0.5);
        assert_eq!(r.get(0, 0), [78, 178, 255, 255]);
        assert_eq!(r.get(1, 0), [128, 128, 255, 255]);
        // 128 + 127 * 0.5 = 191.5 -> 192; 128 - 64 = 64
        assert_eq!(r.get(2, 0), [192, 64, 255, 255]);
    }

    #[test]
    fn test_strengthen_without_compression() {
        let mut r = normal(&[(118, 148)]);
        apply_normal_intensity(&mut r, 2.0);
        assert_eq!(r.get(0, 0), [108, 168, 255, 255]);
    }

    #[test]
    fn test_strengthen_compresses_to_fit() {
        // max deviation 100 -> ideal 300 -> compression 127/300
        let mut r = normal(&[(28, 128), (168, 128)]);
        apply_normal_intensity(&mut r, 3.0);
        assert_eq!(r.get(0, 0)[R], 1);
        // 128 + 40 * 1.27 = 178.8
        assert_eq!(r.get(1, 0)[R], 179);
    }

    #[test]
    fn test_strengthen_never_clips() {
        let pixels: Vec<(u8, u8)> = (0..=255u8).map(|v| (v, 255 - v)).collect();
        let mut r = normal(&pixels);
        apply_normal_intensity(&mut r, 5.0);
        for p in r.pixels() {
            assert!(p[R] >= 1, "deviation must stay within 127");
            assert!(p[G] >= 1);
        }
        assert_eq!(r.get(0, 0)[R], 1);
        // 128 + 127 * 127 / 128
        assert_eq!(r.get(255, 0)[R], 254);
    }

    #[test]
    fn test_unit_intensity_is_identity() {
        let pixels: Vec<(u8, u8)> = (0..=255u8).map(|v| (v, v / 2)).collect();
        let mut r = normal(&pixels);
        let before = r.clone();
        apply_normal_intensity(&mut r, 1.0);
        assert_eq!(r, before);
    }

    #[test]
    fn test_heightmap_stretch_and_compress() {
        let mut r = Raster::new(3, 1, [0, 0, 0, 255]);
        r.set(0, 0, [100, 100, 100, 255]);
        r.set(1, 0, [120, 120, 120, 255]);
        r.set(2, 0, [140, 140, 140, 255]);
        apply_heightmap_intensity(&mut r, 2.0);
        // center 120, span 40 -> 80
        assert_eq!(r.get(0, 0), [88, 88, 88, 255]);
        assert_eq!(r.get(1, 0), [128, 128, 128, 255]);
        assert_eq!(r.get(2, 0), [168, 168, 168, 255]);

        let mut r = Raster::new(2, 1, [0, 0, 0, 255]);
        r.set(1, 0, [200, 200, 200, 255]);
        apply_heightmap_intensity(&mut r, 4.0);
        // ideal span 800 capped at 255
        assert_eq!(r.get(0, 0)[R], 0);
        assert_eq!(r.get(1, 0)[R], 255);
    }

    #[test]
    fn test_flat_heightmap() {
        let mut r = Raster::new(2, 2, [90, 90, 90, 255]);
        apply_heightmap_intensity(&mut r, 3.0);
        assert!(r.pixels().all(|p| p[R] == 128));
    }

    #[test]
    fn test_select_normal_file() {
        let dir = TempDir::new().unwrap();
        let resolved = dir.path().join("lantern.png");
        std::fs::write(&resolved, b"x").unwrap();
        assert_eq!(select_normal_file(&resolved), resolved);

        let real = dir.path().join("lantern_normal.png");
        std::fs::write(&real, b"x").unwrap();
        assert_eq!(select_normal_file(&resolved), real);
    }
}
