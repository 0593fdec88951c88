//! Inspect command implementation
//!
//! Shows how a pack's texture sets resolve to files without modifying
//! anything.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use rtxtune_core::texture_set::find_manifests;
use rtxtune_core::transforms::fog::find_fog_files;
use rtxtune_core::{TextureChannel, TextureSet};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// One channel of a texture set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelEntry {
    pub channel: &'static str,
    pub name: String,
    /// Resolved file, relative to the pack root; `None` when no file matches.
    pub file: Option<PathBuf>,
}

/// One texture-set manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureSetEntry {
    pub manifest: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub channels: Vec<ChannelEntry>,
}

/// Everything the inspect command reports for a pack.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    pub pack: PathBuf,
    pub texture_sets: Vec<TextureSetEntry>,
    pub fog_files: Vec<PathBuf>,
}

impl InspectOutput {
    /// Channels that name a file which does not exist.
    pub fn unresolved_count(&self) -> usize {
        self.texture_sets
            .iter()
            .flat_map(|set| &set.channels)
            .filter(|c| c.file.is_none())
            .count()
    }
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 (unresolved channels are reported, not treated as failures)
pub fn run(pack: &str, json_output: bool) -> Result<ExitCode> {
    let output = inspect_pack(Path::new(pack))?;

    if json_output {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        print_human(&output);
    }
    Ok(ExitCode::SUCCESS)
}

/// Collect texture sets and fog files below a pack root.
pub fn inspect_pack(root: &Path) -> Result<InspectOutput> {
    if !root.is_dir() {
        bail!("Pack directory not found: {}", root.display());
    }

    let relative = |path: &Path| path.strip_prefix(root).unwrap_or(path).to_path_buf();

    let texture_sets = find_manifests(root)
        .into_iter()
        .map(|manifest| match TextureSet::load(&manifest) {
            Ok(set) => TextureSetEntry {
                manifest: relative(manifest.as_path()),
                error: None,
                channels: TextureChannel::all()
                    .into_iter()
                    .filter_map(|channel| {
                        let name = set.channel_name(channel)?;
                        Some(ChannelEntry {
                            channel: channel.label(),
                            name: name.to_string(),
                            file: set.resolve(channel).map(|file| relative(file.as_path())),
                        })
                    })
                    .collect(),
            },
            Err(e) => TextureSetEntry {
                manifest: relative(manifest.as_path()),
                error: Some(format!("[{}] {}", e.code(), e)),
                channels: Vec::new(),
            },
        })
        .collect();

    let fog_files = find_fog_files(root)
        .iter()
        .map(|path| relative(path.as_path()))
        .collect();

    Ok(InspectOutput {
        pack: root.to_path_buf(),
        texture_sets,
        fog_files,
    })
}

fn print_human(output: &InspectOutput) {
    println!("{} {}", "Inspecting:".cyan().bold(), output.pack.display());

    for set in &output.texture_sets {
        println!("\n{}", set.manifest.display().to_string().bold());
        if let Some(error) = &set.error {
            println!("  {} {}", "!".yellow(), error);
            continue;
        }
        for channel in &set.channels {
            match &channel.file {
                Some(file) => println!(
                    "  {} {:<10} {}",
                    "+".green(),
                    channel.channel,
                    file.display()
                ),
                None => println!(
                    "  {} {:<10} {} {}",
                    "x".red(),
                    channel.channel,
                    channel.name,
                    "(not found)".dimmed()
                ),
            }
        }
    }

    if !output.fog_files.is_empty() {
        println!("\n{}", "Fog files".bold());
        for fog in &output.fog_files {
            println!("  {}", fog.display());
        }
    }

    println!(
        "\n{} {} texture set(s), {} unresolved channel(s), {} fog file(s)",
        "Summary:".dimmed(),
        output.texture_sets.len(),
        output.unresolved_count(),
        output.fog_files.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_inspect_lists_resolved_channels() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(
            root,
            "textures/blocks/stone.texture_set.json",
            r#"{"minecraft:texture_set": {
                "color": "stone",
                "metalness_emissive_roughness": "stone_mer",
                "heightmap": "stone_height"
            }}"#,
        );
        write(root, "textures/blocks/stone.png", "x");
        write(root, "textures/blocks/stone_mer.tga", "x");
        write(root, "fogs/default.json", "{}");

        let output = inspect_pack(root).unwrap();
        assert_eq!(output.texture_sets.len(), 1);
        let set = &output.texture_sets[0];
        assert_eq!(set.manifest, Path::new("textures/blocks/stone.texture_set.json"));
        assert_eq!(
            set.channels,
            vec![
                ChannelEntry {
                    channel: "color",
                    name: "stone".to_string(),
                    file: Some(PathBuf::from("textures/blocks/stone.png")),
                },
                ChannelEntry {
                    channel: "MER",
                    name: "stone_mer".to_string(),
                    file: Some(PathBuf::from("textures/blocks/stone_mer.tga")),
                },
                ChannelEntry {
                    channel: "heightmap",
                    name: "stone_height".to_string(),
                    file: None,
                },
            ]
        );
        assert_eq!(output.unresolved_count(), 1);
        assert_eq!(output.fog_files, vec![PathBuf::from("fogs/default.json")]);
    }

    #[test]
    fn test_inspect_reports_broken_manifest() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.texture_set.json", r#"{"format_version": "1.16.100"}"#);

        let output = inspect_pack(tmp.path()).unwrap();
        let error = output.texture_sets[0].error.as_deref().unwrap();
        assert!(error.starts_with("[TEXSET_003]"));
    }

    #[test]
    fn test_inspect_missing_pack() {
        let tmp = TempDir::new().unwrap();
        assert!(inspect_pack(&tmp.path().join("nope")).is_err());
    }
}
