//! The tuning orchestrator.
//!
//! Packs are processed one after another in selection order; within a pack
//! the active transforms run in [`Transform::ALL`] order and each transform
//! visits its files in sorted path order. A failure on one file is logged
//! and the run moves on to the next file.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::codec::{self, DecodeOptions};
use crate::error::TuneError;
use crate::params::{PackSelection, TuningParameters, MAX_PACKS};
use crate::raster::Raster;
use crate::report::{FileCounts, LogLevel, TuneLog, TuneReport};
use crate::rng::DeterministicRng;
use crate::texture_set::{scan_channel, scan_pairs, TextureChannel, Unresolved};
use crate::transforms::emissivity::apply_emissivity;
use crate::transforms::fog::{find_fog_files, tune_fog_file};
use crate::transforms::heightmap::apply_butchered_heightmap;
use crate::transforms::material_noise::apply_material_noise;
use crate::transforms::normal_intensity::{
    apply_heightmap_intensity, apply_normal_intensity, intensity_factor, select_normal_file,
};
use crate::transforms::roughen_up::apply_roughen_up;
use crate::transforms::Transform;

/// Applies one parameter snapshot to a set of packs.
#[derive(Debug, Clone)]
pub struct TuningPipeline {
    params: TuningParameters,
    seed: u32,
}

/// Mutable state threaded through one run.
struct RunState {
    log: TuneLog,
    counts: FileCounts,
}

impl TuningPipeline {
    /// Create a pipeline for one run.
    pub fn new(params: TuningParameters, seed: u32) -> Self {
        Self { params, seed }
    }

    /// Tune every enabled pack and report what happened.
    ///
    /// At most [`MAX_PACKS`] packs are tuned; later selections are logged as
    /// skipped. Never fails: per-file problems become report entries.
    pub fn run(&self, packs: &[PackSelection]) -> TuneReport {
        let mut state = RunState {
            log: TuneLog::new(),
            counts: FileCounts::default(),
        };

        let active = Transform::active(&self.params);
        if active.is_empty() {
            state
                .log
                .info("All parameters are at their neutral values; nothing to tune");
            return TuneReport::new(self.seed, state.counts, state.log);
        }

        for (index, pack) in packs.iter().enumerate() {
            if index >= MAX_PACKS {
                state.log.info(format!(
                    "Skipping pack '{}': at most {} packs per run",
                    pack.name, MAX_PACKS
                ));
                continue;
            }
            if !pack.enabled {
                state
                    .log
                    .info(format!("Skipping pack '{}': not enabled", pack.name));
                continue;
            }
            if !pack.path.is_dir() {
                state.log.info(format!(
                    "Skipping pack '{}': directory {} not found",
                    pack.name,
                    pack.path.display()
                ));
                continue;
            }

            state.log.info(format!(
                "Tuning pack '{}' at {}",
                pack.name,
                pack.path.display()
            ));
            for transform in &active {
                self.run_transform(*transform, &pack.path, &mut state);
            }
        }

        state.log.info(format!(
            "Done: {} written, {} unchanged, {} skipped",
            state.counts.written, state.counts.unchanged, state.counts.failed
        ));
        TuneReport::new(self.seed, state.counts, state.log)
    }

    fn run_transform(&self, transform: Transform, root: &Path, state: &mut RunState) {
        match transform {
            Transform::Fog => self.run_fog(root, state),
            Transform::Emissivity => self.run_emissivity(root, state),
            Transform::NormalIntensity => self.run_normal_intensity(root, state),
            Transform::MaterialNoise => self.run_material_noise(root, state),
            Transform::RoughenUp => self.run_roughen_up(root, state),
            Transform::Heightmap => self.run_heightmap(root, state),
        }
    }

    fn run_fog(&self, root: &Path, state: &mut RunState) {
        let files = find_fog_files(root);
        state.log.info(format!(
            "{}: {} fog files",
            Transform::Fog.label(),
            files.len()
        ));
        for path in files {
            match tune_fog_file(
                &path,
                self.params.fog_multiplier,
                self.params.make_fog_uniform,
            ) {
                Ok(edit) if edit.is_changed() => {
                    state.counts.written += 1;
                    state
                        .log
                        .push_file(LogLevel::Info, &path, edit.summary());
                }
                Ok(_) => state.counts.unchanged += 1,
                Err(e) => record_failure(state, &path, &TuneError::from(e)),
            }
        }
    }

    fn run_emissivity(&self, root: &Path, state: &mut RunState) {
        let files = resolve_channel(
            state,
            Transform::Emissivity,
            root,
            TextureChannel::MetalnessEmissiveRoughness,
        );
        log_file_count(state, Transform::Emissivity, files.len(), "MER textures");
        let multiplier = self.params.emissivity_multiplier;
        let ambient = self.params.add_emissivity_ambient_light;
        for path in files {
            tune_image(state, &path, DecodeOptions::default(), |raster| {
                apply_emissivity(raster, multiplier, ambient);
                Ok(())
            });
        }
    }

    fn run_normal_intensity(&self, root: &Path, state: &mut RunState) {
        let intensity = intensity_factor(self.params.normal_intensity);

        let normals: BTreeSet<PathBuf> =
            resolve_channel(state, Transform::NormalIntensity, root, TextureChannel::Normal)
                .iter()
                .map(|path| select_normal_file(path))
                .collect();
        log_file_count(state, Transform::NormalIntensity, normals.len(), "normal maps");
        for path in normals {
            tune_image(state, &path, DecodeOptions::default(), |raster| {
                apply_normal_intensity(raster, intensity);
                Ok(())
            });
        }

        let heightmaps = resolve_channel(
            state,
            Transform::NormalIntensity,
            root,
            TextureChannel::Heightmap,
        );
        log_file_count(state, Transform::NormalIntensity, heightmaps.len(), "heightmaps");
        for path in heightmaps {
            tune_image(state, &path, DecodeOptions::default(), |raster| {
                apply_heightmap_intensity(raster, intensity);
                Ok(())
            });
        }
    }

    fn run_material_noise(&self, root: &Path, state: &mut RunState) {
        let files = resolve_channel(
            state,
            Transform::MaterialNoise,
            root,
            TextureChannel::MetalnessEmissiveRoughness,
        );
        log_file_count(state, Transform::MaterialNoise, files.len(), "MER textures");
        let offset = self.params.material_noise_offset;
        for path in files {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            let mut rng = DeterministicRng::new(DeterministicRng::derive_file_seed(
                self.seed, relative,
            ));
            tune_image(state, &path, DecodeOptions::default(), |raster| {
                apply_material_noise(raster, offset, &mut rng);
                Ok(())
            });
        }
    }

    fn run_roughen_up(&self, root: &Path, state: &mut RunState) {
        let files = resolve_channel(
            state,
            Transform::RoughenUp,
            root,
            TextureChannel::MetalnessEmissiveRoughness,
        );
        log_file_count(state, Transform::RoughenUp, files.len(), "MER textures");
        let amount = self.params.roughen_up_intensity;
        for path in files {
            tune_image(state, &path, DecodeOptions::default(), |raster| {
                apply_roughen_up(raster, amount);
                Ok(())
            });
        }
    }

    fn run_heightmap(&self, root: &Path, state: &mut RunState) {
        let scan = scan_pairs(root, TextureChannel::Color, TextureChannel::Heightmap);
        for missing in &scan.unresolved {
            record_unresolved(state, Transform::Heightmap, missing);
        }
        let pairs: Vec<(PathBuf, PathBuf)> = scan
            .pairs
            .into_iter()
            .filter_map(|(color, height)| Some((color, height?)))
            .collect();
        log_file_count(state, Transform::Heightmap, pairs.len(), "color/heightmap pairs");
        let alpha = self.params.butchered_heightmap_alpha;
        for (color_path, height_path) in pairs {
            let color = match codec::try_decode(&color_path, DecodeOptions::opaque()) {
                Ok(color) => color,
                Err(e) => {
                    record_failure(state, &color_path, &TuneError::from(e));
                    continue;
                }
            };
            tune_image(state, &height_path, DecodeOptions::default(), |raster| {
                apply_butchered_heightmap(&color, raster, alpha)?;
                Ok(())
            });
        }
    }
}

/// Resolve one channel, logging every manifest entry that names a missing
/// file.
fn resolve_channel(
    state: &mut RunState,
    transform: Transform,
    root: &Path,
    channel: TextureChannel,
) -> BTreeSet<PathBuf> {
    let scan = scan_channel(root, channel);
    for missing in &scan.unresolved {
        record_unresolved(state, transform, missing);
    }
    scan.files
}

fn log_file_count(state: &mut RunState, transform: Transform, count: usize, what: &str) {
    state
        .log
        .info(format!("{}: {} {}", transform.label(), count, what));
}

fn record_failure(state: &mut RunState, path: &Path, error: &TuneError) {
    state.counts.failed += 1;
    state
        .log
        .push_file(error.level(), path, format!("[{}] {}", error.code(), error));
}

fn record_unresolved(state: &mut RunState, transform: Transform, missing: &Unresolved) {
    state.counts.failed += 1;
    state.log.push_file(
        LogLevel::Warning,
        &missing.manifest,
        format!(
            "{}: {} texture '{}' not found",
            transform.label(),
            missing.channel.label(),
            missing.name
        ),
    );
}

/// Decode, transform and write back one image, recording the outcome.
fn tune_image<F>(state: &mut RunState, path: &Path, options: DecodeOptions, transform: F)
where
    F: FnOnce(&mut Raster) -> Result<(), TuneError>,
{
    match rewrite_image(path, options, transform) {
        Ok(Some(written)) => {
            state.counts.written += 1;
            state.log.push_file(LogLevel::Info, &written, "updated");
        }
        Ok(None) => state.counts.unchanged += 1,
        Err(e) => record_failure(state, path, &e),
    }
}

/// Returns the written path, or `None` when the transform changed nothing.
fn rewrite_image<F>(
    path: &Path,
    options: DecodeOptions,
    transform: F,
) -> Result<Option<PathBuf>, TuneError>
where
    F: FnOnce(&mut Raster) -> Result<(), TuneError>,
{
    let mut raster = codec::try_decode(path, options)?;
    let original = raster.clone();
    transform(&mut raster)?;
    if raster == original {
        return Ok(None);
    }
    Ok(Some(codec::write_back(&raster, path)?))
}
