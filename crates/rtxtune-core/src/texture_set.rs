//! Texture-set manifest parsing and channel file resolution.
//!
//! A `*.texture_set.json` manifest names the sibling files that hold each
//! logical channel of a block or item texture:
//!
//! ```json
//! {
//!   "format_version": "1.16.100",
//!   "minecraft:texture_set": {
//!     "color": "stone",
//!     "metalness_emissive_roughness": "stone_mer",
//!     "heightmap": "stone_heightmap"
//!   }
//! }
//! ```
//!
//! Names carry no extension; [`resolve_image`] finds the file using
//! [`IMAGE_EXTENSIONS`] in priority order.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use walkdir::WalkDir;

/// Top-level manifest key.
pub const TEXTURE_SET_KEY: &str = "minecraft:texture_set";

/// Manifest file name suffix (matched case-insensitively).
pub const MANIFEST_SUFFIX: &str = ".texture_set.json";

/// Image extensions tried when resolving a channel name, highest priority first.
pub const IMAGE_EXTENSIONS: [&str; 4] = [".tga", ".png", ".jpg", ".jpeg"];

/// Errors from reading a texture-set manifest.
#[derive(Debug, Error)]
pub enum TextureSetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manifest has no \"{key}\" object", key = TEXTURE_SET_KEY)]
    MissingTextureSet,
}

impl TextureSetError {
    /// Stable error code for reports.
    pub fn code(&self) -> &'static str {
        match self {
            TextureSetError::Io(_) => "TEXSET_001",
            TextureSetError::Json(_) => "TEXSET_002",
            TextureSetError::MissingTextureSet => "TEXSET_003",
        }
    }
}

/// Logical channel of a texture set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureChannel {
    /// Albedo color.
    Color,
    /// Tangent-space normal map.
    Normal,
    /// Metalness (R), emissive (G), roughness (B), optional subsurface (A).
    MetalnessEmissiveRoughness,
    /// Greyscale heightmap.
    Heightmap,
}

impl TextureChannel {
    /// Manifest keys for this channel, in lookup order.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            TextureChannel::Color => &["color"],
            TextureChannel::Normal => &["normal"],
            TextureChannel::MetalnessEmissiveRoughness => &[
                "metalness_emissive_roughness_subsurface",
                "metalness_emissive_roughness",
            ],
            TextureChannel::Heightmap => &["heightmap"],
        }
    }

    /// Short label used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            TextureChannel::Color => "color",
            TextureChannel::Normal => "normal",
            TextureChannel::MetalnessEmissiveRoughness => "MER",
            TextureChannel::Heightmap => "heightmap",
        }
    }

    /// Every channel, in display order.
    pub fn all() -> [TextureChannel; 4] {
        [
            TextureChannel::Color,
            TextureChannel::Normal,
            TextureChannel::MetalnessEmissiveRoughness,
            TextureChannel::Heightmap,
        ]
    }
}

/// A parsed texture-set manifest.
#[derive(Debug, Clone)]
pub struct TextureSet {
    /// Path of the manifest file.
    pub manifest: PathBuf,
    entries: serde_json::Map<String, Value>,
}

impl TextureSet {
    /// Read and parse a manifest.
    pub fn load(manifest: &Path) -> Result<Self, TextureSetError> {
        let text = fs::read_to_string(manifest)?;
        Self::parse(manifest, &text)
    }

    /// Parse manifest text that was read from `manifest`.
    pub fn parse(manifest: &Path, text: &str) -> Result<Self, TextureSetError> {
        let root: Value = serde_json::from_str(text)?;
        let entries = match root.get(TEXTURE_SET_KEY) {
            Some(Value::Object(map)) => map.clone(),
            _ => return Err(TextureSetError::MissingTextureSet),
        };
        Ok(Self {
            manifest: manifest.to_path_buf(),
            entries,
        })
    }

    /// Directory holding the manifest and its channel files.
    pub fn dir(&self) -> &Path {
        self.manifest.parent().unwrap_or_else(|| Path::new("."))
    }

    /// File base name recorded for a channel.
    ///
    /// Non-string values (uniform colors given as arrays) and hex color
    /// strings are not file references and yield `None`.
    pub fn channel_name(&self, channel: TextureChannel) -> Option<&str> {
        channel.keys().iter().find_map(|key| match self.entries.get(*key) {
            Some(Value::String(name)) if !name.is_empty() && !name.starts_with('#') => {
                Some(name.as_str())
            }
            _ => None,
        })
    }

    /// Resolve a channel to an existing image file.
    pub fn resolve(&self, channel: TextureChannel) -> Option<PathBuf> {
        let name = self.channel_name(channel)?;
        resolve_image(self.dir(), name)
    }
}

/// Resolve one channel of the manifest at `manifest`.
///
/// Unreadable or malformed manifests resolve to `None`.
pub fn resolve(manifest: &Path, channel: TextureChannel) -> Option<PathBuf> {
    TextureSet::load(manifest).ok()?.resolve(channel)
}

/// Find the image file for a base name inside `dir`.
///
/// Extensions from [`IMAGE_EXTENSIONS`] are tried in order with the exact
/// case first; if none exists the directory listing is searched
/// case-insensitively with the same priority. Several case-insensitive
/// matches for one extension resolve to the lexicographically first name.
pub fn resolve_image(dir: &Path, base_name: &str) -> Option<PathBuf> {
    for ext in IMAGE_EXTENSIONS {
        let candidate = dir.join(format!("{base_name}{ext}"));
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    let base_path = dir.join(base_name);
    let search_dir = base_path.parent().unwrap_or(dir);
    let stem = base_path.file_name()?.to_string_lossy().to_lowercase();

    let mut names: Vec<(String, PathBuf)> = fs::read_dir(search_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().to_lowercase();
            Some((name, path))
        })
        .collect();
    names.sort_by(|a, b| a.1.cmp(&b.1));

    IMAGE_EXTENSIONS.iter().find_map(|ext| {
        let wanted = format!("{stem}{ext}");
        names
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, path)| path.clone())
    })
}

/// Whether a path names a texture-set manifest.
pub fn is_manifest(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(MANIFEST_SUFFIX))
        .unwrap_or(false)
}

/// All texture-set manifests below `root`, sorted by path.
pub fn find_manifests(root: &Path) -> Vec<PathBuf> {
    let mut manifests: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_manifest(e.path()))
        .map(|e| e.into_path())
        .collect();
    manifests.sort();
    manifests
}

/// A manifest entry that names a file which does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    /// Manifest that names the file.
    pub manifest: PathBuf,
    pub channel: TextureChannel,
    /// Base name as written in the manifest.
    pub name: String,
}

/// Files one channel resolves to below a pack root, plus the entries that
/// did not resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelScan {
    pub files: BTreeSet<PathBuf>,
    pub unresolved: Vec<Unresolved>,
}

/// Paired files resolved from the same manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairScan {
    /// `(primary, secondary)`, ordered by primary path.
    pub pairs: Vec<(PathBuf, Option<PathBuf>)>,
    pub unresolved: Vec<Unresolved>,
}

fn lookup(set: &TextureSet, channel: TextureChannel) -> Option<Result<PathBuf, Unresolved>> {
    let name = set.channel_name(channel)?;
    Some(resolve_image(set.dir(), name).ok_or_else(|| Unresolved {
        manifest: set.manifest.clone(),
        channel,
        name: name.to_string(),
    }))
}

fn load_all(root: &Path) -> impl Iterator<Item = TextureSet> {
    find_manifests(root)
        .into_iter()
        .filter_map(|manifest| TextureSet::load(&manifest).ok())
}

/// Resolve one channel across all manifests below `root`.
///
/// Manifests that cannot be read or parsed are skipped silently; manifests
/// without the channel contribute nothing.
pub fn scan_channel(root: &Path, channel: TextureChannel) -> ChannelScan {
    let mut scan = ChannelScan::default();
    for set in load_all(root) {
        match lookup(&set, channel) {
            Some(Ok(path)) => {
                scan.files.insert(path);
            }
            Some(Err(missing)) => scan.unresolved.push(missing),
            None => {}
        }
    }
    scan
}

/// Every file a channel resolves to across all manifests below `root`.
pub fn retrieve_files(root: &Path, channel: TextureChannel) -> BTreeSet<PathBuf> {
    scan_channel(root, channel).files
}

/// Resolve `(primary, secondary)` pairs across all manifests below `root`.
///
/// Only manifests whose primary channel resolves produce a pair; the
/// secondary is `None` when the manifest does not name it or it does not
/// resolve. Pairs are deduplicated. Unresolved entries of either channel
/// are collected in manifest order.
pub fn scan_pairs(root: &Path, primary: TextureChannel, secondary: TextureChannel) -> PairScan {
    let mut pairs = BTreeSet::new();
    let mut unresolved = Vec::new();
    for set in load_all(root) {
        let first = match lookup(&set, primary) {
            Some(Ok(path)) => path,
            Some(Err(missing)) => {
                unresolved.push(missing);
                continue;
            }
            None => continue,
        };
        let second = match lookup(&set, secondary) {
            Some(Ok(path)) => Some(path),
            Some(Err(missing)) => {
                unresolved.push(missing);
                None
            }
            None => None,
        };
        pairs.insert((first, second));
    }
    PairScan {
        pairs: pairs.into_iter().collect(),
        unresolved,
    }
}

/// Pairs of `(primary, secondary)` files resolved from the same manifest.
pub fn retrieve_pairs(
    root: &Path,
    primary: TextureChannel,
    secondary: TextureChannel,
) -> Vec<(PathBuf, Option<PathBuf>)> {
    scan_pairs(root, primary, secondary).pairs
}
