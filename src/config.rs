//! Configuration persistence for overlay appearance and interaction

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::RED
    }
}

impl ShapeColor {
    pub const RED: ShapeColor = ShapeColor {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };

    /// Convert to RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]
    }
}

/// Overlay configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Name shown to the user when choosing between overlays
    #[serde(default = "default_name")]
    pub name: String,
    /// Color given to newly drawn lines
    #[serde(default)]
    pub line_color: ShapeColor,
    /// Line stroke width in pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    /// Distance in pixels within which a press grabs an element
    #[serde(default = "default_handle_proximity")]
    pub handle_proximity: f32,
    /// Whether lines are drawn anti-aliased
    #[serde(default)]
    pub anti_alias: bool,
}

fn default_name() -> String {
    "Drawing".to_string()
}

fn default_stroke_width() -> f32 {
    1.0
}

fn default_handle_proximity() -> f32 {
    crate::domain::HANDLE_PROXIMITY
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            line_color: ShapeColor::default(),
            stroke_width: default_stroke_width(),
            handle_proximity: default_handle_proximity(),
            // Crisp lines keep rasters comparable pixel for pixel
            anti_alias: false,
        }
    }
}

impl OverlayConfig {
    /// Directory name under the user config dir
    pub const ID: &'static str = "canvas-overlay";

    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: OverlayConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Save configuration to the default location
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            log::error!("Could not determine config directory for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Replace unusable numeric values with defaults
    fn sanitized(mut self) -> Self {
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            log::warn!("Ignoring invalid stroke width {}", self.stroke_width);
            self.stroke_width = default_stroke_width();
        }
        if !(self.handle_proximity.is_finite() && self.handle_proximity > 0.0) {
            log::warn!("Ignoring invalid handle proximity {}", self.handle_proximity);
            self.handle_proximity = default_handle_proximity();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color_is_red() {
        assert_eq!(ShapeColor::default().to_rgba_u8(), [255, 0, 0, 255]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: OverlayConfig = serde_json::from_str(r#"{"stroke_width": 3.0}"#).unwrap();
        assert_eq!(config.stroke_width, 3.0);
        assert_eq!(config.name, "Drawing");
        assert_eq!(config.handle_proximity, 8.0);
        assert_eq!(config.line_color, ShapeColor::RED);
        assert!(!config.anti_alias);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = OverlayConfig {
            name: "Sketch".to_string(),
            line_color: ShapeColor {
                r: 0.0,
                g: 0.5,
                b: 1.0,
            },
            stroke_width: 2.5,
            handle_proximity: 12.0,
            anti_alias: true,
        };
        config.save_to(&path).unwrap();

        assert_eq!(OverlayConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"stroke_width": -1.0, "handle_proximity": 0.0}"#).unwrap();

        let config = OverlayConfig::load_from(&path).unwrap();
        assert_eq!(config.stroke_width, 1.0);
        assert_eq!(config.handle_proximity, 8.0);
    }

    #[test]
    fn test_load_from_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = OverlayConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
