//! The six tuning transforms.
//!
//! Pixel transforms mutate a [`Raster`](crate::raster::Raster) in place and
//! never touch disk; the pipeline decides what is read and written. The fog
//! transform edits a parsed JSON document the same way.

pub mod emissivity;
pub mod fog;
pub mod heightmap;
pub mod material_noise;
pub mod normal_intensity;
pub mod roughen_up;

use crate::params::TuningParameters;

/// A transform, in the fixed order the pipeline applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    Fog,
    Emissivity,
    NormalIntensity,
    MaterialNoise,
    RoughenUp,
    Heightmap,
}

impl Transform {
    /// Every transform in application order.
    pub const ALL: [Transform; 6] = [
        Transform::Fog,
        Transform::Emissivity,
        Transform::NormalIntensity,
        Transform::MaterialNoise,
        Transform::RoughenUp,
        Transform::Heightmap,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Transform::Fog => "Fog",
            Transform::Emissivity => "Emissivity",
            Transform::NormalIntensity => "Normal intensity",
            Transform::MaterialNoise => "Material noise",
            Transform::RoughenUp => "Roughen up",
            Transform::Heightmap => "Butchered heightmaps",
        }
    }

    /// Whether the parameters move this transform off its neutral value.
    pub fn is_active(self, params: &TuningParameters) -> bool {
        match self {
            Transform::Fog => params.fog_active(),
            Transform::Emissivity => params.emissivity_active(),
            Transform::NormalIntensity => params.normal_intensity_active(),
            Transform::MaterialNoise => params.material_noise_active(),
            Transform::RoughenUp => params.roughen_up_active(),
            Transform::Heightmap => params.heightmap_active(),
        }
    }

    /// Active transforms in application order.
    pub fn active(params: &TuningParameters) -> Vec<Transform> {
        Self::ALL
            .into_iter()
            .filter(|t| t.is_active(params))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_parameters_activate_nothing() {
        assert!(Transform::active(&TuningParameters::default()).is_empty());
    }

    #[test]
    fn test_active_order_is_fixed() {
        let params = TuningParameters {
            butchered_heightmap_alpha: 20,
            fog_multiplier: 0.5,
            roughen_up_intensity: 3,
            ..Default::default()
        };
        assert_eq!(
            Transform::active(&params),
            vec![Transform::Fog, Transform::RoughenUp, Transform::Heightmap]
        );
    }
}
