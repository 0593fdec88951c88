//! Fog density rewriting for `fogs/*.json` fog-setting files.
//!
//! Two density sections are tuned, `air` and `weather`, under
//! `minecraft:fog_settings.volumetric.density`. Non-zero densities are
//! scaled jointly so that the densest section reaches at most 1.0; whatever
//! part of the multiplier could not be applied (the excess) is fed, heavily
//! dampened, into the remaining headroom and into the air scattering
//! coefficients. A zero density is set to an absolute value derived from the
//! multiplier because scaling zero would never change it.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Number, Value};
use thiserror::Error;
use walkdir::WalkDir;

/// Top-level fog document key.
pub const FOG_SETTINGS_KEY: &str = "minecraft:fog_settings";

/// Density sections tuned, in processing order.
pub const DENSITY_SECTIONS: [&str; 2] = ["air", "weather"];

/// Densities below this magnitude count as zero.
pub const ZERO_DENSITY_EPSILON: f64 = 1e-4;

/// Fraction of the excess added to sections that still have headroom.
pub const DENSITY_EXCESS_DAMPEN: f64 = 0.001;

/// Fraction of the excess added to each scattering channel.
pub const SCATTERING_EXCESS_DAMPEN: f64 = 0.005;

/// Fraction of a clipped scattering channel's overflow passed on to the others.
pub const SCATTERING_OVERFLOW_DAMPEN: f64 = 0.005;

/// Decimal places kept on every written number.
pub const DECIMALS: i32 = 7;

/// Errors from reading or writing a fog-setting file.
#[derive(Debug, Error)]
pub enum FogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document has no \"{key}\" object", key = FOG_SETTINGS_KEY)]
    MissingFogSettings,
}

impl FogError {
    /// Stable error code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            FogError::Io(_) => "FOG_001",
            FogError::Json(_) => "FOG_002",
            FogError::MissingFogSettings => "FOG_003",
        }
    }
}

/// A density value rewritten by [`apply_fog`].
#[derive(Debug, Clone, PartialEq)]
pub struct DensityChange {
    pub section: &'static str,
    pub before: f64,
    pub after: f64,
}

/// Everything [`apply_fog`] changed in one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FogEdit {
    pub densities: Vec<DensityChange>,
    /// Scattering triplet before and after, when it changed.
    pub scattering: Option<([f64; 3], [f64; 3])>,
    /// Sections converted from height-based to uniform density.
    pub made_uniform: Vec<&'static str>,
}

impl FogEdit {
    pub fn is_changed(&self) -> bool {
        !self.densities.is_empty() || self.scattering.is_some() || !self.made_uniform.is_empty()
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .densities
            .iter()
            .map(|d| format!("{} {} -> {}", d.section, d.before, d.after))
            .collect();
        if let Some((before, after)) = &self.scattering {
            parts.push(format!("scattering {before:?} -> {after:?}"));
        }
        for section in &self.made_uniform {
            parts.push(format!("{section} uniform"));
        }
        parts.join(", ")
    }
}

/// Round to [`DECIMALS`] places.
pub fn round7(value: f64) -> f64 {
    let multiplier = 10_f64.powi(DECIMALS);
    (value * multiplier).round() / multiplier
}

/// Density a zero section is set to: the multiplier taken as an absolute
/// value, divided by ten when it exceeds 1.
pub fn zero_density_target(multiplier: f64) -> f64 {
    if multiplier <= 1.0 {
        multiplier.clamp(0.0, 1.0)
    } else {
        (multiplier / 10.0).clamp(0.0, 1.0)
    }
}

/// A parsed `max_density` and the JSON form it was stored in.
#[derive(Debug, Clone, Copy)]
struct Density {
    value: f64,
    as_string: bool,
}

fn read_density(section: &Map<String, Value>) -> Option<Density> {
    match section.get("max_density")? {
        Value::Number(n) => n.as_f64().map(|value| Density {
            value,
            as_string: false,
        }),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|value| Density {
            value,
            as_string: true,
        }),
        _ => None,
    }
}

fn number(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}

fn density_value(value: f64, as_string: bool) -> Value {
    if as_string {
        Value::String(value.to_string())
    } else {
        number(value)
    }
}

fn fog_settings_mut(doc: &mut Value) -> Result<&mut Map<String, Value>, FogError> {
    doc.get_mut(FOG_SETTINGS_KEY)
        .and_then(Value::as_object_mut)
        .ok_or(FogError::MissingFogSettings)
}

/// Apply the fog multiplier and the optional uniform conversion to a parsed
/// fog-setting document.
///
/// A multiplier of exactly 1.0 leaves densities and scattering alone.
pub fn apply_fog(doc: &mut Value, multiplier: f64, make_uniform: bool) -> Result<FogEdit, FogError> {
    let settings = fog_settings_mut(doc)?;
    let mut edit = FogEdit::default();

    if multiplier != 1.0 {
        if let Some(excess) = scale_densities(settings, multiplier, &mut edit) {
            raise_scattering(settings, excess, &mut edit);
        }
    }
    if make_uniform {
        make_densities_uniform(settings, &mut edit);
    }

    Ok(edit)
}

fn density_sections_mut(settings: &mut Map<String, Value>) -> Option<&mut Map<String, Value>> {
    settings
        .get_mut("volumetric")?
        .get_mut("density")?
        .as_object_mut()
}

/// Scale both density sections. Returns the excess multiplier when part of
/// it could not be applied.
fn scale_densities(
    settings: &mut Map<String, Value>,
    multiplier: f64,
    edit: &mut FogEdit,
) -> Option<f64> {
    let density = density_sections_mut(settings)?;

    let current: Vec<(&'static str, Density)> = DENSITY_SECTIONS
        .iter()
        .filter_map(|name| {
            let section = density.get(*name)?.as_object()?;
            Some((*name, read_density(section)?))
        })
        .collect();

    let non_zero: Vec<f64> = current
        .iter()
        .map(|(_, d)| d.value)
        .filter(|v| v.abs() >= ZERO_DENSITY_EPSILON)
        .collect();
    let max_current = non_zero.iter().copied().fold(0.0_f64, f64::max);

    let mut applied = multiplier;
    let mut excess = None;
    if max_current > 0.0 {
        applied = multiplier.min(1.0 / max_current);
        if multiplier > applied && applied > 0.0 {
            excess = Some(multiplier / applied - 1.0);
        }
    }

    let mut targets: Vec<(&'static str, Density, f64)> = current
        .iter()
        .map(|(name, d)| {
            let target = if d.value.abs() < ZERO_DENSITY_EPSILON {
                zero_density_target(multiplier)
            } else {
                (d.value * applied).clamp(0.0, 1.0)
            };
            (*name, *d, target)
        })
        .collect();

    if let Some(excess) = excess {
        if non_zero.len() >= 2 {
            for (_, d, target) in targets.iter_mut() {
                if d.value.abs() >= ZERO_DENSITY_EPSILON && *target < 1.0 {
                    *target = (*target + excess * DENSITY_EXCESS_DAMPEN).clamp(0.0, 1.0);
                }
            }
        }
    }

    for (name, d, target) in targets {
        let after = round7(target);
        if after == d.value {
            continue;
        }
        if let Some(section) = density.get_mut(name).and_then(Value::as_object_mut) {
            section.insert("max_density".to_string(), density_value(after, d.as_string));
            edit.densities.push(DensityChange {
                section: name,
                before: d.value,
                after,
            });
        }
    }

    excess
}

/// Raise the air scattering triplet by a dampened share of the excess.
///
/// Channels already at or above 1.0 are left alone. A channel pushed past
/// 1.0 is clamped and a dampened share of its overflow is split equally
/// among the channels still below 1.0.
fn raise_scattering(settings: &mut Map<String, Value>, excess: f64, edit: &mut FogEdit) {
    let Some(scattering) = settings
        .get_mut("volumetric")
        .and_then(|v| v.get_mut("media_coefficients"))
        .and_then(|v| v.get_mut("air"))
        .and_then(|v| v.get_mut("scattering"))
        .and_then(Value::as_array_mut)
    else {
        return;
    };
    if scattering.len() != 3 {
        return;
    }
    let mut before = [0.0; 3];
    for (slot, value) in before.iter_mut().zip(scattering.iter()) {
        match value.as_f64() {
            Some(v) => *slot = v,
            None => return,
        }
    }

    let add = excess * SCATTERING_EXCESS_DAMPEN;
    let mut after = before;
    let mut overflow = 0.0;
    for value in after.iter_mut() {
        if *value >= 1.0 {
            continue;
        }
        *value += add;
        if *value > 1.0 {
            overflow += *value - 1.0;
            *value = 1.0;
        }
    }
    if overflow > 0.0 {
        let open: Vec<usize> = (0..3).filter(|&i| after[i] < 1.0).collect();
        if !open.is_empty() {
            let share = overflow * SCATTERING_OVERFLOW_DAMPEN / open.len() as f64;
            for i in open {
                after[i] = (after[i] + share).min(1.0);
            }
        }
    }
    for value in after.iter_mut() {
        *value = round7(*value);
    }

    if after != before {
        for (slot, value) in scattering.iter_mut().zip(after.iter()) {
            *slot = number(*value);
        }
        edit.scattering = Some((before, after));
    }
}

/// Replace height-based density curves with uniform density.
fn make_densities_uniform(settings: &mut Map<String, Value>, edit: &mut FogEdit) {
    let Some(density) = density_sections_mut(settings) else {
        return;
    };
    for name in DENSITY_SECTIONS {
        let Some(section) = density.get_mut(name).and_then(Value::as_object_mut) else {
            continue;
        };
        let height_based = section.contains_key("max_density_height")
            || section.contains_key("zero_density_height");
        let uniform = section.get("uniform").and_then(Value::as_bool) == Some(true);
        if height_based && !uniform {
            section.shift_remove("max_density_height");
            section.shift_remove("zero_density_height");
            section.insert("uniform".to_string(), Value::Bool(true));
            edit.made_uniform.push(name);
        }
    }
}

/// Tune one fog file in place, rewriting it only when something changed.
pub fn tune_fog_file(path: &Path, multiplier: f64, make_uniform: bool) -> Result<FogEdit, FogError> {
    let text = fs::read_to_string(path)?;
    let mut doc: Value = serde_json::from_str(&text)?;
    let edit = apply_fog(&mut doc, multiplier, make_uniform)?;
    if edit.is_changed() {
        let mut out = serde_json::to_string_pretty(&doc)?;
        out.push('\n');
        fs::write(path, out)?;
    }
    Ok(edit)
}

/// Every `.json` file below `root` that sits inside a `fogs` directory,
/// sorted by path.
pub fn find_fog_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            let is_json = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            let in_fogs = path
                .strip_prefix(root)
                .ok()
                .and_then(Path::parent)
                .is_some_and(|dir| {
                    dir.components()
                        .any(|c| c.as_os_str().eq_ignore_ascii_case("fogs"))
                });
            is_json && in_fogs
        })
        .collect();
    files.sort();
    files
}
