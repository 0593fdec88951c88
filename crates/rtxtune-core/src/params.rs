//! Tuning parameters, pack selection and run configuration.
//!
//! Every parameter has a neutral value. A transform whose parameter sits at
//! its neutral value is never invoked, so untouched parameters never touch
//! disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of packs tuned in one run.
pub const MAX_PACKS: usize = 3;

/// Errors from loading or validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Too many packs: {0} selected, at most {max} allowed", max = MAX_PACKS)]
    TooManyPacks(usize),
}

impl ConfigError {
    /// Stable error code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Io(_) => "CONFIG_001",
            ConfigError::Json(_) => "CONFIG_002",
            ConfigError::InvalidParameter { .. } => "CONFIG_003",
            ConfigError::TooManyPacks(_) => "CONFIG_004",
        }
    }
}

/// Immutable snapshot of the tuning values for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningParameters {
    /// Fog density multiplier (neutral 1.0).
    pub fog_multiplier: f64,
    /// Convert height-based fog density curves to uniform density.
    pub make_fog_uniform: bool,
    /// Emissive (MER green) multiplier (neutral 1.0).
    pub emissivity_multiplier: f64,
    /// Add a flat emissive floor to every MER pixel.
    pub add_emissivity_ambient_light: bool,
    /// Normal map strength in percent (neutral 100).
    pub normal_intensity: u32,
    /// Maximum random offset added to MER channels (neutral 0).
    pub material_noise_offset: u32,
    /// Roughness boost strength (neutral 0).
    pub roughen_up_intensity: u32,
    /// Blend weight of the color-derived heightmap, 0-255 (neutral 0).
    pub butchered_heightmap_alpha: u8,
}

impl Default for TuningParameters {
    fn default() -> Self {
        Self {
            fog_multiplier: 1.0,
            make_fog_uniform: false,
            emissivity_multiplier: 1.0,
            add_emissivity_ambient_light: false,
            normal_intensity: 100,
            material_noise_offset: 0,
            roughen_up_intensity: 0,
            butchered_heightmap_alpha: 0,
        }
    }
}

impl TuningParameters {
    /// Check float parameters are finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_multiplier("fog_multiplier", self.fog_multiplier)?;
        check_multiplier("emissivity_multiplier", self.emissivity_multiplier)?;
        Ok(())
    }

    pub fn fog_active(&self) -> bool {
        self.fog_multiplier != 1.0 || self.make_fog_uniform
    }

    pub fn emissivity_active(&self) -> bool {
        self.emissivity_multiplier != 1.0 || self.add_emissivity_ambient_light
    }

    pub fn normal_intensity_active(&self) -> bool {
        self.normal_intensity != 100
    }

    pub fn material_noise_active(&self) -> bool {
        self.material_noise_offset != 0
    }

    pub fn roughen_up_active(&self) -> bool {
        self.roughen_up_intensity != 0
    }

    pub fn heightmap_active(&self) -> bool {
        self.butchered_heightmap_alpha != 0
    }

    /// Whether every parameter sits at its neutral value.
    pub fn is_neutral(&self) -> bool {
        !(self.fog_active()
            || self.emissivity_active()
            || self.normal_intensity_active()
            || self.material_noise_active()
            || self.roughen_up_active()
            || self.heightmap_active())
    }
}

fn check_multiplier(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("{value} is not a finite number"),
        });
    }
    if value < 0.0 {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("{value} is negative"),
        });
    }
    Ok(())
}

/// A resource pack selected for tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSelection {
    /// Name shown in log lines.
    pub name: String,
    /// Pack root directory.
    pub path: PathBuf,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl PackSelection {
    /// Enabled selection named after the final path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path,
            enabled: true,
        }
    }
}

/// Everything a tuning run needs, as read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TuneConfig {
    #[serde(default)]
    pub packs: Vec<PackSelection>,
    #[serde(default)]
    pub parameters: TuningParameters,
    /// Seed for randomized transforms; chosen by the caller when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl TuneConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: TuneConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.packs.len() > MAX_PACKS {
            return Err(ConfigError::TooManyPacks(self.packs.len()));
        }
        self.parameters.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_neutral() {
        assert!(TuningParameters::default().is_neutral());
    }

    #[test]
    fn test_each_parameter_activates_its_transform() {
        let p = TuningParameters {
            fog_multiplier: 2.0,
            ..Default::default()
        };
        assert!(p.fog_active() && !p.emissivity_active());

        let p = TuningParameters {
            make_fog_uniform: true,
            ..Default::default()
        };
        assert!(p.fog_active());

        let p = TuningParameters {
            add_emissivity_ambient_light: true,
            ..Default::default()
        };
        assert!(p.emissivity_active());

        let p = TuningParameters {
            normal_intensity: 150,
            material_noise_offset: 3,
            roughen_up_intensity: 4,
            butchered_heightmap_alpha: 10,
            ..Default::default()
        };
        assert!(p.normal_intensity_active());
        assert!(p.material_noise_active());
        assert!(p.roughen_up_active());
        assert!(p.heightmap_active());
        assert!(!p.fog_active());
    }

    #[test]
    fn test_partial_config() {
        let config = TuneConfig::from_json(
            r#"{
                "packs": [{"name": "Vanilla RTX", "path": "/packs/vanilla"}],
                "parameters": {"fog_multiplier": 0.5},
                "seed": 7
            }"#,
        )
        .unwrap();
        assert_eq!(config.packs[0].enabled, true);
        assert_eq!(config.parameters.fog_multiplier, 0.5);
        assert_eq!(config.parameters.normal_intensity, 100);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_rejects_negative_multiplier() {
        let err = TuneConfig::from_json(r#"{"parameters": {"emissivity_multiplier": -1.0}}"#)
            .unwrap_err();
        assert_eq!(err.code(), "CONFIG_003");
    }

    #[test]
    fn test_rejects_out_of_range_alpha() {
        let err = TuneConfig::from_json(r#"{"parameters": {"butchered_heightmap_alpha": 300}}"#)
            .unwrap_err();
        assert_eq!(err.code(), "CONFIG_002");
    }

    #[test]
    fn test_rejects_too_many_packs() {
        let config = TuneConfig {
            packs: (0..4)
                .map(|i| PackSelection::from_path(format!("/packs/{i}")))
                .collect(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TooManyPacks(4))));
    }

    #[test]
    fn test_pack_from_path() {
        let pack = PackSelection::from_path("/packs/Vanilla-RTX");
        assert_eq!(pack.name, "Vanilla-RTX");
        assert!(pack.enabled);
    }
}
