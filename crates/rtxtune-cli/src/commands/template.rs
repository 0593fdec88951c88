//! Template command implementation.

use anyhow::{Context, Result};
use colored::Colorize;
use rtxtune_core::{PackSelection, TuneConfig, TuningParameters};
use std::fs;
use std::process::ExitCode;

/// A run configuration with every parameter at its neutral value and one
/// placeholder pack entry.
pub fn template_config() -> TuneConfig {
    TuneConfig {
        packs: vec![PackSelection {
            name: "My RTX pack".to_string(),
            path: "path/to/resource_pack".into(),
            enabled: true,
        }],
        parameters: TuningParameters::default(),
        seed: None,
    }
}

/// Run the template command
pub fn run(output: Option<&str>) -> Result<ExitCode> {
    let mut json =
        serde_json::to_string_pretty(&template_config()).context("Failed to serialize template")?;
    json.push('\n');

    match output {
        Some(path) => {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write template: {}", path))?;
            println!("{} {}", "Wrote".green().bold(), path);
        }
        None => print!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_round_trips_as_neutral_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tune.json");
        run(Some(path.to_str().unwrap())).unwrap();

        let config = TuneConfig::load(&path).unwrap();
        assert!(config.parameters.is_neutral());
        assert_eq!(config.packs.len(), 1);
        assert_eq!(config.seed, None);
    }
}
