//! Codec settings persisted as JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{CodecError, Result};
use crate::logging::{log, LogCategory, LogConfig, LogLevel};
use crate::planar::{PlanarCodec, TileFormat};
use crate::transform::{Rotation, TileOrientation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecSettings {
    pub format: TileFormat,
    pub orientation: TileOrientation,
    /// Tiles per sheet row; `None` uses the format's default view width.
    pub tiles_per_row: Option<usize>,
    /// Global log level name, e.g. `"warn"`.
    pub log_level: String,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            format: TileFormat::Snes8Bpp,
            orientation: TileOrientation::default(),
            tiles_per_row: None,
            log_level: "off".to_string(),
        }
    }
}

impl CodecSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| CodecError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CodecError::Settings(e.to_string()))
    }

    /// Load settings from `path`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).map_err(|err| {
                log(LogCategory::Settings, LogLevel::Error, || {
                    format!("failed to parse {}: {}", path.display(), err)
                });
                err
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log(LogCategory::Settings, LogLevel::Info, || {
                    format!("{} not found, using defaults", path.display())
                });
                Ok(Self::default())
            }
            Err(e) => Err(CodecError::Settings(format!("{}: {}", path.display(), e))),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_json()?;
        fs::write(path, contents)
            .map_err(|e| CodecError::Settings(format!("{}: {}", path.display(), e)))
    }

    /// Reject orientations the selected format cannot display and unknown
    /// log levels.
    pub fn validate(&self) -> Result<()> {
        let format = self.format.descriptor();
        let o = &self.orientation;
        if (o.mirror_horizontal || o.mirror_vertical) && !format.supports_mirror {
            return Err(CodecError::Settings(format!(
                "{} does not support mirroring",
                format.name
            )));
        }
        if o.rotation != Rotation::None && !format.supports_rotate {
            return Err(CodecError::Settings(format!(
                "{} does not support rotation",
                format.name
            )));
        }
        self.log_level().map(|_| ())
    }

    pub fn codec(&self) -> PlanarCodec {
        PlanarCodec::for_format(self.format)
    }

    pub fn tiles_per_row(&self) -> usize {
        let format = self.format.descriptor();
        self.tiles_per_row
            .filter(|&n| n > 0)
            .unwrap_or(format.default_view_width / format.tile_width)
    }

    pub fn log_level(&self) -> Result<LogLevel> {
        LogLevel::from_str(&self.log_level)
            .ok_or_else(|| CodecError::Settings(format!("unknown log level '{}'", self.log_level)))
    }

    /// Apply the configured level to the global logger.
    pub fn apply_logging(&self) -> Result<()> {
        LogConfig::global().set_global_level(self.log_level()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("chr_core_{}_{}.json", std::process::id(), name))
    }

    #[test]
    fn test_default_settings() {
        let settings = CodecSettings::default();
        assert_eq!(settings.format, TileFormat::Snes8Bpp);
        assert!(settings.orientation.is_identity());
        assert_eq!(settings.tiles_per_row(), 16);
        assert_eq!(settings.log_level(), Ok(LogLevel::Off));
        assert_eq!(settings.codec().format().color_bits, 8);
    }

    #[test]
    fn test_settings_serialization() {
        let settings = CodecSettings {
            format: TileFormat::Snes4Bpp,
            orientation: TileOrientation {
                mirror_horizontal: true,
                mirror_vertical: false,
                rotation: Rotation::Cw270,
            },
            tiles_per_row: Some(32),
            log_level: "debug".to_string(),
        };
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"snes-4bpp\""));
        assert!(json.contains("\"cw270\""));
        assert_eq!(CodecSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = CodecSettings::from_json(r#"{ "format": "nes-2bpp" }"#).unwrap();
        assert_eq!(settings.format, TileFormat::Nes2Bpp);
        assert_eq!(settings.log_level, "off");

        let settings =
            CodecSettings::from_json(r#"{ "orientation": { "mirror_vertical": true } }"#).unwrap();
        assert!(settings.orientation.mirror_vertical);
        assert_eq!(settings.orientation.rotation, Rotation::None);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            CodecSettings::from_json(r#"{ "format": "genesis" }"#),
            Err(CodecError::Settings(_))
        ));
        assert!(matches!(
            CodecSettings::from_json(r#"{ "log_level": "loud" }"#),
            Err(CodecError::Settings(_))
        ));
    }

    #[test]
    fn test_zero_tiles_per_row_falls_back() {
        let settings = CodecSettings {
            tiles_per_row: Some(0),
            ..Default::default()
        };
        assert_eq!(settings.tiles_per_row(), 16);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(CodecSettings::load(&path), Ok(CodecSettings::default()));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save_load");
        let settings = CodecSettings {
            format: TileFormat::GameBoy2Bpp,
            tiles_per_row: Some(20),
            ..Default::default()
        };

        settings.save(&path).unwrap();
        let loaded = CodecSettings::load(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, Ok(settings));
    }
}
