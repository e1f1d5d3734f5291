//! Export options - flags, output encoding and font size mapping
//!
//! Options are plain serde records and can be kept in a JSON file next to
//! other application settings.

use crate::{ExportError, ExportResult};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

bitflags! {
    /// Behaviour switches for the HTML exporter
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ExportFlags: u32 {
        /// Register images with an in-memory sink
        const SAVE_IMAGES_TO_MEMORY = 0x0010;
        /// Write images into a directory and reference them by file URL
        const SAVE_IMAGES_TO_FILES = 0x0020;
        /// Omit the `<html>`/`<body>` wrapper
        const NO_HEADER_FOOTER = 0x0080;
        /// Indent with CSS margins instead of layout tables
        const USE_CSS = 0x1000;
    }
}

/// Upper point size of each of the seven HTML font sizes
pub const DEFAULT_FONT_SIZE_MAPPING: [u32; 7] = [8, 10, 13, 17, 22, 30, 100];

/// Where embedded images end up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMode {
    /// Base64 data URLs in the document itself
    Inline,
    /// Registered with an in-memory sink
    Memory,
    /// Written to a directory
    Files,
}

/// HTML export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlExportOptions {
    pub flags: ExportFlags,
    /// Output encoding name, e.g. "utf-8" or "iso-8859-1"
    pub encoding: String,
    #[serde(deserialize_with = "deserialize_font_size_mapping")]
    font_size_mapping: [u32; 7],
    /// Directory for file-mode images; the system temp dir when unset
    pub temp_dir: Option<PathBuf>,
}

impl Default for HtmlExportOptions {
    fn default() -> Self {
        Self {
            flags: ExportFlags::empty(),
            encoding: "utf-8".to_string(),
            font_size_mapping: DEFAULT_FONT_SIZE_MAPPING,
            temp_dir: None,
        }
    }
}

impl HtmlExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(mut self, flags: ExportFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn has_flag(&self, flag: ExportFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn uses_css(&self) -> bool {
        self.has_flag(ExportFlags::USE_CSS)
    }

    /// Image handling selected by the flags. Memory wins over files.
    pub fn image_mode(&self) -> ImageMode {
        if self.has_flag(ExportFlags::SAVE_IMAGES_TO_MEMORY) {
            ImageMode::Memory
        } else if self.has_flag(ExportFlags::SAVE_IMAGES_TO_FILES) {
            ImageMode::Files
        } else {
            ImageMode::Inline
        }
    }

    pub fn font_size_mapping(&self) -> &[u32; 7] {
        &self.font_size_mapping
    }

    /// Replace the point thresholds of the seven HTML font sizes
    pub fn set_font_size_mapping(&mut self, mapping: &[u32]) -> ExportResult<()> {
        let mapping: [u32; 7] = mapping.try_into().map_err(|_| {
            ExportError::InvalidFontSizeMapping(format!("expected 7 sizes, got {}", mapping.len()))
        })?;
        check_ascending(&mapping)?;
        self.font_size_mapping = mapping;
        Ok(())
    }

    /// HTML font size (1-7) for a point size: the first threshold not
    /// smaller than `size`, or 7 when all are smaller
    pub fn pt_to_size(&self, size: f32) -> u32 {
        self.font_size_mapping
            .iter()
            .position(|&threshold| size <= threshold as f32)
            .map_or(7, |index| index as u32 + 1)
    }

    /// Load options from a JSON file.
    ///
    /// A missing file or one that fails to parse yields the defaults. A font
    /// size mapping that is not strictly ascending counts as a parse failure.
    pub fn from_json_file(path: &Path) -> ExportResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(options) => Ok(options),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to parse export options, using defaults: {}", e);
                Ok(Self::default())
            }
        }
    }

    pub fn to_json_file(&self, path: &Path) -> ExportResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn check_ascending(mapping: &[u32; 7]) -> ExportResult<()> {
    if mapping.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(ExportError::InvalidFontSizeMapping(format!(
            "sizes must be strictly ascending: {mapping:?}"
        )));
    }
    Ok(())
}

fn deserialize_font_size_mapping<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u32; 7], D::Error> {
    let mapping = <[u32; 7]>::deserialize(deserializer)?;
    check_ascending(&mapping).map_err(<D::Error as serde::de::Error>::custom)?;
    Ok(mapping)
}
