//! Tune command implementation
//!
//! Builds a run configuration from an optional config file and command-line
//! overrides, runs the tuning pipeline and prints its report.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use rtxtune_core::{PackSelection, TuneConfig, TuningPipeline};
use std::path::Path;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use super::reporting;

/// Arguments of the tune command, as parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct TuneArgs {
    pub config: Option<String>,
    pub packs: Vec<String>,
    pub fog: Option<f64>,
    pub uniform_fog: bool,
    pub emissivity: Option<f64>,
    pub ambient_light: bool,
    pub normal_intensity: Option<u32>,
    pub material_noise: Option<u32>,
    pub roughen_up: Option<u32>,
    pub butcher_heightmaps: Option<u8>,
    pub seed: Option<u32>,
    pub json: bool,
}

/// Run the tune command
///
/// # Returns
/// Exit code: 0 if the run logged no errors, 1 otherwise
pub fn run(args: &TuneArgs) -> Result<ExitCode> {
    let config = build_config(args)?;
    let seed = config.seed.unwrap_or_else(clock_seed);

    if !args.json {
        for pack in &config.packs {
            println!("{} {}", "Pack:".cyan().bold(), pack.path.display());
        }
        println!("{} {}", "Seed:".dimmed(), seed);
    }

    let report = TuningPipeline::new(config.parameters.clone(), seed).run(&config.packs);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        let roots: Vec<&Path> = config.packs.iter().map(|p| p.path.as_path()).collect();
        reporting::print_report(&report, &roots);
    }

    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Merge the config file (if any) with command-line overrides and validate.
pub fn build_config(args: &TuneArgs) -> Result<TuneConfig> {
    let mut config = match &args.config {
        Some(path) => TuneConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => TuneConfig::default(),
    };

    if !args.packs.is_empty() {
        config.packs = args.packs.iter().map(PackSelection::from_path).collect();
    }

    let params = &mut config.parameters;
    if let Some(fog) = args.fog {
        params.fog_multiplier = fog;
    }
    if args.uniform_fog {
        params.make_fog_uniform = true;
    }
    if let Some(emissivity) = args.emissivity {
        params.emissivity_multiplier = emissivity;
    }
    if args.ambient_light {
        params.add_emissivity_ambient_light = true;
    }
    if let Some(intensity) = args.normal_intensity {
        params.normal_intensity = intensity;
    }
    if let Some(offset) = args.material_noise {
        params.material_noise_offset = offset;
    }
    if let Some(intensity) = args.roughen_up {
        params.roughen_up_intensity = intensity;
    }
    if let Some(alpha) = args.butcher_heightmaps {
        params.butchered_heightmap_alpha = alpha;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate().context("Invalid tuning configuration")?;
    if config.packs.is_empty() {
        bail!("No packs selected; pass --pack <dir> or a config with packs");
    }
    Ok(config)
}

/// Seed derived from the current time, for runs without an explicit seed.
fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rtxtune_core::TuningParameters;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_neutral_defaults() {
        let args = TuneArgs {
            packs: vec!["packs/a".to_string()],
            fog: Some(0.5),
            ambient_light: true,
            roughen_up: Some(7),
            seed: Some(3),
            ..Default::default()
        };
        let config = build_config(&args).unwrap();
        assert_eq!(config.packs, vec![PackSelection::from_path("packs/a")]);
        assert_eq!(config.seed, Some(3));
        assert_eq!(
            config.parameters,
            TuningParameters {
                fog_multiplier: 0.5,
                add_emissivity_ambient_light: true,
                roughen_up_intensity: 7,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_config_file_with_overrides() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tune.json");
        fs::write(
            &path,
            r#"{
                "packs": [{"name": "Vanilla RTX", "path": "packs/vanilla"}],
                "parameters": {"fog_multiplier": 2.0, "normal_intensity": 150},
                "seed": 11
            }"#,
        )
        .unwrap();

        let args = TuneArgs {
            config: Some(path.to_string_lossy().into_owned()),
            normal_intensity: Some(80),
            ..Default::default()
        };
        let config = build_config(&args).unwrap();
        assert_eq!(config.packs[0].name, "Vanilla RTX");
        assert_eq!(config.parameters.fog_multiplier, 2.0);
        assert_eq!(config.parameters.normal_intensity, 80);
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn test_no_packs_is_an_error() {
        let err = build_config(&TuneArgs::default()).unwrap_err();
        assert!(err.to_string().contains("No packs selected"));
    }

    #[test]
    fn test_too_many_packs_rejected() {
        let args = TuneArgs {
            packs: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            ..Default::default()
        };
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_negative_multiplier_rejected() {
        let args = TuneArgs {
            packs: vec!["a".into()],
            emissivity: Some(-1.0),
            ..Default::default()
        };
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn test_run_tunes_pack() {
        let tmp = TempDir::new().unwrap();
        let fogs = tmp.path().join("fogs");
        fs::create_dir_all(&fogs).unwrap();
        let fog = fogs.join("default.json");
        fs::write(
            &fog,
            r#"{"minecraft:fog_settings": {"volumetric": {"density": {"air": {"max_density": 0.2}}}}}"#,
        )
        .unwrap();

        let args = TuneArgs {
            packs: vec![tmp.path().to_string_lossy().into_owned()],
            fog: Some(2.0),
            seed: Some(1),
            json: true,
            ..Default::default()
        };
        let code = run(&args).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&fog).unwrap()).unwrap();
        assert_eq!(
            doc["minecraft:fog_settings"]["volumetric"]["density"]["air"]["max_density"].as_f64(),
            Some(0.4)
        );
    }
}
