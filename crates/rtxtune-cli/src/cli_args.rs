//! CLI argument definitions for the rtxtune command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// rtxtune - Minecraft RTX resource pack tuner
#[derive(Parser)]
#[command(name = "rtxtune")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Tune fog and textures of up to three resource packs in place
    Tune {
        /// Path to a JSON run configuration (see `rtxtune template`)
        #[arg(short, long)]
        config: Option<String>,

        /// Pack root directory (repeatable; replaces the config's packs)
        #[arg(short, long)]
        pack: Vec<String>,

        /// Fog density multiplier (neutral 1.0)
        #[arg(long)]
        fog: Option<f64>,

        /// Convert height-based fog densities to uniform density
        #[arg(long)]
        uniform_fog: bool,

        /// Emissivity multiplier (neutral 1.0)
        #[arg(long)]
        emissivity: Option<f64>,

        /// Add a flat emissive floor to every MER pixel
        #[arg(long)]
        ambient_light: bool,

        /// Normal map intensity in percent (neutral 100)
        #[arg(long)]
        normal_intensity: Option<u32>,

        /// Maximum material noise offset (neutral 0)
        #[arg(long)]
        material_noise: Option<u32>,

        /// Roughen-up intensity (neutral 0)
        #[arg(long)]
        roughen_up: Option<u32>,

        /// Blend weight of color-derived heightmaps, 0-255 (neutral 0)
        #[arg(long)]
        butcher_heightmaps: Option<u8>,

        /// Seed for material noise (default: derived from the clock)
        #[arg(long)]
        seed: Option<u32>,

        /// Output the run report as JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List texture sets, their resolved channel files and fog files of a pack
    Inspect {
        /// Pack root directory
        #[arg(short, long)]
        pack: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print a neutral run configuration to start from
    Template {
        /// Write the template to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}
