//! Engine configuration (pxpaint.yaml).
//!
//! Every field has a default, so an empty file or a missing file behaves
//! the same as `EngineConfig::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colour::Colour;
use crate::error::{PaintError, Result};
use crate::history::DEFAULT_CAPACITY;
use crate::selection::Tolerance;

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "pxpaint.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Undo steps kept before the oldest is dropped.
    pub history_capacity: usize,

    /// Bands used by bucket fill and the magic wand.
    pub tolerance: Tolerance,

    /// Bucket fill follows connectivity unless shift is held.
    pub contiguous_fill: bool,

    /// How far the pipette looks for a non-transparent pixel. 0 samples exactly.
    pub pipette_search_radius: u32,

    /// Colour used to preview eraser and selection shapes.
    pub preview_marker: Colour,

    /// Written by the eraser on buffers without an alpha channel.
    pub eraser_background: Colour,

    pub primary: Colour,
    pub secondary: Colour,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            tolerance: Tolerance::default(),
            contiguous_fill: true,
            pipette_search_radius: 0,
            preview_marker: Colour::new(0, 120, 215, 128),
            eraser_background: Colour::WHITE,
            primary: Colour::BLACK,
            secondary: Colour::WHITE,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PaintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PaintError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILE)),
        })
    }

    /// Load `explicit` if given, else `pxpaint.yaml` in `dir` if present, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial() {
        let yaml = r##"
history_capacity: 5
contiguous_fill: false
primary: "#ff0000"
tolerance:
  hue: 0.1
"##;
        let config = EngineConfig::parse(yaml).unwrap();
        assert_eq!(config.history_capacity, 5);
        assert!(!config.contiguous_fill);
        assert_eq!(config.primary, Colour::rgb(255, 0, 0));
        assert_eq!(config.tolerance.hue, Some(0.1));
        assert_eq!(config.tolerance.red, None);
        assert_eq!(config.secondary, Colour::WHITE);
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(EngineConfig::parse("").unwrap(), EngineConfig::default());
        assert_eq!(EngineConfig::default().history_capacity, 50);
    }

    #[test]
    fn test_parse_error_has_help() {
        let err = EngineConfig::parse("history_capacity: [1, 2").unwrap_err();
        assert!(matches!(err, PaintError::Parse { help: Some(_), .. }));
    }

    #[test]
    fn test_named_colour() {
        let config = EngineConfig::parse("secondary: teal").unwrap();
        assert_eq!(config.secondary, Colour::rgb(0, 128, 128));
    }

    #[test]
    fn test_discover_falls_back_to_default() {
        let dir = std::env::temp_dir().join("pxpaint-config-missing");
        let config = EngineConfig::discover(None, &dir).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
