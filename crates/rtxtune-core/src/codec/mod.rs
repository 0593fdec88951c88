//! Image decoding into [`Raster`] and TGA write-back.
//!
//! Decoding accepts anything the `image` crate can read for the enabled
//! formats (PNG in every color type including palette, JPEG, TGA, BMP) and
//! always yields RGBA8. Encoding always produces the uncompressed 32-bit TGA
//! profile from [`tga`].

pub mod tga;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::raster::Raster;

pub use tga::{write_tga, write_tga_to_writer};

/// Side length of the placeholder raster returned for unreadable images.
pub const PLACEHOLDER_SIZE: u32 = 512;

/// Side length of one placeholder checker cell.
pub const PLACEHOLDER_CELL: u32 = 32;

const PLACEHOLDER_LIGHT: [u8; 4] = [255, 0, 255, 255];
const PLACEHOLDER_DARK: [u8; 4] = [0, 0, 0, 255];

/// Errors from image decoding and encoding.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

impl CodecError {
    /// Stable error code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::Io(_) => "CODEC_001",
            CodecError::Image(_) => "CODEC_002",
            CodecError::InvalidDimensions(_) => "CODEC_003",
        }
    }
}

/// Options applied while decoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Force every alpha sample to 255 regardless of the source.
    pub max_opacity: bool,
}

impl DecodeOptions {
    /// Options that force a fully opaque result.
    pub fn opaque() -> Self {
        Self { max_opacity: true }
    }
}

/// Decode an image file into an RGBA8 raster.
///
/// The format is picked from the file extension first and from the file's
/// magic bytes when they identify one; TGA has no magic, so `.tga` files
/// rely on their extension.
pub fn try_decode(path: &Path, options: DecodeOptions) -> Result<Raster, CodecError> {
    let image = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();
    let mut raster = Raster::from_rgba8(width, height, rgba.into_raw()).ok_or_else(|| {
        CodecError::InvalidDimensions(format!("decoded buffer does not match {width}x{height}"))
    })?;
    if options.max_opacity {
        raster.make_opaque();
    }
    Ok(raster)
}

/// Decode an image file, substituting the checkerboard placeholder when the
/// file cannot be read or decoded.
pub fn decode(path: &Path, options: DecodeOptions) -> Raster {
    try_decode(path, options).unwrap_or_else(|_| placeholder())
}

/// Encode a raster as an uncompressed 32-bit TGA at `path`.
pub fn encode(raster: &Raster, path: &Path) -> Result<(), CodecError> {
    write_tga(raster, path)
}

/// The 512x512 two-tone checkerboard used in place of unreadable images.
pub fn placeholder() -> Raster {
    let mut raster = Raster::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, PLACEHOLDER_DARK);
    for y in 0..PLACEHOLDER_SIZE {
        for x in 0..PLACEHOLDER_SIZE {
            if (x / PLACEHOLDER_CELL + y / PLACEHOLDER_CELL) % 2 == 0 {
                raster.set(x, y, PLACEHOLDER_LIGHT);
            }
        }
    }
    raster
}

/// Path a tuned raster is written to: the source path with a `.tga` extension.
pub fn write_back_target(source: &Path) -> PathBuf {
    let is_tga = source
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tga"));
    if is_tga {
        source.to_path_buf()
    } else {
        source.with_extension("tga")
    }
}

/// Write a tuned raster back next to its source and return the written path.
///
/// When the source was not a TGA it is removed once the TGA has been
/// written, so the texture-set name keeps resolving to a single file.
pub fn write_back(raster: &Raster, source: &Path) -> Result<PathBuf, CodecError> {
    let target = write_back_target(source);
    write_tga(raster, &target)?;
    if target != source && source.exists() {
        std::fs::remove_file(source)?;
    }
    Ok(target)
}
