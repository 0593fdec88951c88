//! rtxtune core engine
//!
//! Tunes Minecraft ray-tracing resource packs in place: fog density and
//! scattering in fog JSON files, and emissive, roughness, normal and height
//! data in the textures referenced by `*.texture_set.json` manifests.
//!
//! # Features
//!
//! - **Codec**: decodes PNG, JPEG, TGA and BMP into RGBA rasters; writes
//!   uncompressed 32-bit TGA
//! - **Texture sets**: resolves the color, normal, MER and heightmap files a
//!   manifest names, including extension and case fallbacks
//! - **Transforms**: fog, emissivity, normal intensity, material noise,
//!   roughen-up and butchered heightmaps
//! - **Pipeline**: applies the active transforms to up to three packs and
//!   returns a [`TuneReport`]
//!
//! # Example
//!
//! ```no_run
//! use rtxtune_core::{PackSelection, TuningParameters, TuningPipeline};
//!
//! let params = TuningParameters {
//!     fog_multiplier: 0.5,
//!     roughen_up_intensity: 10,
//!     ..Default::default()
//! };
//! let packs = vec![PackSelection::from_path("packs/my_rtx_pack")];
//!
//! let report = TuningPipeline::new(params, 42).run(&packs);
//! println!("{} files written", report.files.written);
//! ```
//!
//! # Determinism
//!
//! Material noise is the only randomized transform. Each file draws from a
//! PCG32 stream seeded from the run seed and the file's pack-relative path,
//! so the same seed reproduces the same output regardless of which other
//! files are present.

pub mod codec;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod raster;
pub mod report;
pub mod rng;
pub mod texture_set;
pub mod transforms;

// Re-export main types for convenience
pub use codec::{decode, encode, try_decode, write_back, CodecError, DecodeOptions};
pub use error::TuneError;
pub use params::{ConfigError, PackSelection, TuneConfig, TuningParameters, MAX_PACKS};
pub use pipeline::TuningPipeline;
pub use raster::Raster;
pub use report::{FileCounts, LogEntry, LogLevel, TuneLog, TuneReport};
pub use rng::DeterministicRng;
pub use texture_set::{TextureChannel, TextureSet, TextureSetError};
pub use transforms::Transform;
