//! Synthetic resource-pack trees for pipeline tests.

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use rtxtune_core::codec::write_tga;
use rtxtune_core::{PackSelection, Raster};
use serde_json::{json, Value};
use tempfile::TempDir;

/// A temporary resource pack.
pub struct PackFixture {
    pub root: TempDir,
}

impl PackFixture {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn selection(&self) -> PackSelection {
        PackSelection::from_path(self.path())
    }

    fn prepare(&self, relative: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create dir");
        }
        path
    }

    /// Write a texture-set manifest naming the given channel files.
    pub fn add_manifest(&self, relative: &str, channels: Value) -> PathBuf {
        let path = self.prepare(relative);
        let doc = json!({
            "format_version": "1.16.100",
            "minecraft:texture_set": channels,
        });
        fs::write(&path, serde_json::to_string_pretty(&doc).unwrap())
            .expect("Failed to write manifest");
        path
    }

    pub fn add_text(&self, relative: &str, text: &str) -> PathBuf {
        let path = self.prepare(relative);
        fs::write(&path, text).expect("Failed to write file");
        path
    }

    pub fn add_tga(&self, relative: &str, raster: &Raster) -> PathBuf {
        let path = self.prepare(relative);
        write_tga(raster, &path).expect("Failed to write TGA");
        path
    }

    pub fn add_png_rgba(&self, relative: &str, raster: &Raster) -> PathBuf {
        let path = self.prepare(relative);
        write_png(
            &path,
            raster.width,
            raster.height,
            png::ColorType::Rgba,
            &raster.data,
            None,
        );
        path
    }

    pub fn add_png_grey(&self, relative: &str, width: u32, height: u32, data: &[u8]) -> PathBuf {
        let path = self.prepare(relative);
        write_png(&path, width, height, png::ColorType::Grayscale, data, None);
        path
    }

    pub fn add_png_grey_alpha(
        &self,
        relative: &str,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> PathBuf {
        let path = self.prepare(relative);
        write_png(&path, width, height, png::ColorType::GrayscaleAlpha, data, None);
        path
    }

    pub fn add_png_rgb(&self, relative: &str, width: u32, height: u32, data: &[u8]) -> PathBuf {
        let path = self.prepare(relative);
        write_png(&path, width, height, png::ColorType::Rgb, data, None);
        path
    }

    /// Palette PNG with one index byte per pixel.
    pub fn add_png_palette(
        &self,
        relative: &str,
        width: u32,
        height: u32,
        palette: &[[u8; 3]],
        indices: &[u8],
    ) -> PathBuf {
        let path = self.prepare(relative);
        let flat: Vec<u8> = palette.iter().flatten().copied().collect();
        write_png(
            &path,
            width,
            height,
            png::ColorType::Indexed,
            indices,
            Some(flat),
        );
        path
    }

    /// Fog file under `fogs/` with the given densities and air scattering.
    pub fn add_fog(&self, name: &str, air: f64, weather: f64, scattering: [f64; 3]) -> PathBuf {
        let path = self.prepare(&format!("fogs/{name}.json"));
        let doc = json!({
            "format_version": "1.16.100",
            "minecraft:fog_settings": {
                "description": {"identifier": format!("test:{name}")},
                "volumetric": {
                    "density": {
                        "air": {"max_density": air, "uniform": true},
                        "weather": {"max_density": weather, "uniform": true}
                    },
                    "media_coefficients": {
                        "air": {"scattering": scattering, "absorption": [0.0, 0.0, 0.0]}
                    }
                }
            }
        });
        fs::write(&path, serde_json::to_string_pretty(&doc).unwrap())
            .expect("Failed to write fog file");
        path
    }
}

fn write_png(
    path: &Path,
    width: u32,
    height: u32,
    color: png::ColorType,
    data: &[u8],
    palette: Option<Vec<u8>>,
) {
    let file = File::create(path).expect("Failed to create PNG");
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    if let Some(palette) = palette {
        encoder.set_palette(palette);
    }
    let mut writer = encoder.write_header().expect("Failed to write PNG header");
    writer
        .write_image_data(data)
        .expect("Failed to write PNG data");
}

/// Raster with every pixel set to `rgba`.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Raster {
    Raster::new(width, height, rgba)
}

/// Read a fog file back as JSON.
pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("Failed to read JSON"))
        .expect("Failed to parse JSON")
}
