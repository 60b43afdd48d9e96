//! Contents.json data model for an Xcode app icon set
//!
//! Mirrors the subset of Apple's asset catalog schema used by single-size
//! (1024pt) iOS app icons with dark and tinted appearances, so the output
//! directory can be dropped into `Assets.xcassets` as `AppIcon.appiconset`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Root structure of a Contents.json file
#[derive(Serialize, Debug, Clone)]
pub struct ContentsFile {
    /// One entry per appearance slot
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within an app icon set
#[derive(Serialize, Debug, Clone)]
pub struct ImageEntry {
    /// Appearance qualifiers (e.g. luminosity = dark); absent for the default slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearances: Option<Vec<Appearance>>,

    /// The image file name, relative to the Contents.json
    pub filename: String,

    /// The device type; single-size icons are "universal"
    pub idiom: String,

    /// Target platform (e.g. "ios")
    pub platform: String,

    /// The size of the image in points (e.g. "1024x1024")
    pub size: String,
}

/// A single appearance qualifier
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    /// The appearance kind; app icons only use "luminosity"
    pub appearance: String,

    /// The value for the kind (e.g. "dark", "tinted")
    pub value: String,
}

/// Versioning and authorship information
#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// The format version of the asset catalog (always 1)
    pub version: u8,

    /// The tool that authored the asset catalog
    pub author: String,
}

impl ContentsFile {
    pub fn new(author: String) -> Self {
        Self {
            images: Vec::new(),
            info: Info { version: 1, author },
        }
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }

    /// Serialize and write the file as `Contents.json` inside `dir`
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join("Contents.json");
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize Contents.json")?;

        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

impl ImageEntry {
    /// Creates a universal iOS icon entry of `size` points
    pub fn ios_universal(filename: String, size: u32) -> Self {
        Self {
            appearances: None,
            filename,
            idiom: "universal".to_string(),
            platform: "ios".to_string(),
            size: format!("{size}x{size}"),
        }
    }

    /// Tags the entry with a luminosity appearance (e.g. "dark", "tinted")
    pub fn with_luminosity(mut self, value: &str) -> Self {
        self.appearances
            .get_or_insert_with(Vec::new)
            .push(Appearance {
                appearance: "luminosity".to_string(),
                value: value.to_string(),
            });
        self
    }
}
