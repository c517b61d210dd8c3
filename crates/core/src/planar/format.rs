//! Planar tile format descriptors.
//!
//! Every supported layout is plain data: a list of byte offsets (one per
//! bitplane, least significant plane first) and the distance between two
//! consecutive rows of the same plane. The codec runs one loop over that
//! data, so adding a sibling layout means adding a table entry.
//!
//! # Layouts
//!
//! - **SNES 2/4/8bpp**: planes are stored in pairs. Each pair interleaves
//!   its two planes row by row (2 bytes per row), and pairs follow each
//!   other every 16 bytes.
//! - **Game Boy 2bpp**: identical to SNES 2bpp.
//! - **NES 2bpp**: 8 bytes of plane 0 followed by 8 bytes of plane 1.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::logging::{log, LogCategory, LogLevel};

/// Tag selecting one of the registered formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileFormat {
    /// SNES 8 bits per pixel (Mode 3/4 backgrounds, Mode 7 excluded).
    #[default]
    #[serde(rename = "snes-8bpp")]
    Snes8Bpp,
    /// SNES 4 bits per pixel (sprites, most backgrounds).
    #[serde(rename = "snes-4bpp")]
    Snes4Bpp,
    /// SNES 2 bits per pixel (Mode 0 backgrounds).
    #[serde(rename = "snes-2bpp")]
    Snes2Bpp,
    /// Game Boy 2 bits per pixel, row-interleaved planes.
    #[serde(rename = "gb-2bpp")]
    GameBoy2Bpp,
    /// NES/Famicom 2 bits per pixel, sequential planes.
    #[serde(rename = "nes-2bpp")]
    Nes2Bpp,
}

/// Byte layout and capabilities of one planar format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub id: TileFormat,
    /// Short identifier, also used in settings files.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Compact layout description as shown by tile editors.
    pub format_text: &'static str,
    /// ROM image extensions this format is usually found in.
    pub extensions: &'static [&'static str],
    pub color_bits: usize,
    /// Offset of each bitplane relative to the tile base; index = bit of the pixel.
    pub plane_offsets: &'static [usize],
    /// Bytes between row `y` and row `y + 1` of one plane.
    pub row_stride: usize,
    pub tile_width: usize,
    pub tile_height: usize,
    pub default_view_width: usize,
    pub default_view_height: usize,
    pub read_only: bool,
    pub supports_mirror: bool,
    pub supports_rotate: bool,
    pub compressed: bool,
    pub author: &'static str,
    pub url: &'static str,
}

/// Plane offsets of SNES 8bpp tiles.
pub const SNES_8BPP_PLANES: [usize; 8] = [0x00, 0x01, 0x10, 0x11, 0x20, 0x21, 0x30, 0x31];

const SNES_EXTENSIONS: &[&str] = &["smc", "sfc", "fig"];

/// Every registered format, in registry order.
pub static FORMATS: [FormatDescriptor; 5] = [
    FormatDescriptor {
        id: TileFormat::Snes8Bpp,
        key: "snes-8bpp",
        name: "8BPP SNES Planar",
        format_text: "[8][8]",
        extensions: SNES_EXTENSIONS,
        color_bits: 8,
        plane_offsets: &SNES_8BPP_PLANES,
        row_stride: 2,
        tile_width: 8,
        tile_height: 8,
        default_view_width: 128,
        default_view_height: 128,
        read_only: false,
        supports_mirror: true,
        supports_rotate: true,
        compressed: false,
        author: "ikari_01",
        url: "https://sd2snes.de",
    },
    FormatDescriptor {
        id: TileFormat::Snes4Bpp,
        key: "snes-4bpp",
        name: "4BPP SNES Planar",
        format_text: "[4][8]",
        extensions: SNES_EXTENSIONS,
        color_bits: 4,
        plane_offsets: &[0x00, 0x01, 0x10, 0x11],
        row_stride: 2,
        tile_width: 8,
        tile_height: 8,
        default_view_width: 128,
        default_view_height: 128,
        read_only: false,
        supports_mirror: true,
        supports_rotate: true,
        compressed: false,
        author: "",
        url: "",
    },
    FormatDescriptor {
        id: TileFormat::Snes2Bpp,
        key: "snes-2bpp",
        name: "2BPP SNES Planar",
        format_text: "[2][8]",
        extensions: SNES_EXTENSIONS,
        color_bits: 2,
        plane_offsets: &[0x00, 0x01],
        row_stride: 2,
        tile_width: 8,
        tile_height: 8,
        default_view_width: 128,
        default_view_height: 128,
        read_only: false,
        supports_mirror: true,
        supports_rotate: true,
        compressed: false,
        author: "",
        url: "",
    },
    FormatDescriptor {
        id: TileFormat::GameBoy2Bpp,
        key: "gb-2bpp",
        name: "2BPP GB Planar",
        format_text: "[2][8]",
        extensions: &["gb", "gbc"],
        color_bits: 2,
        plane_offsets: &[0x00, 0x01],
        row_stride: 2,
        tile_width: 8,
        tile_height: 8,
        default_view_width: 128,
        default_view_height: 128,
        read_only: false,
        supports_mirror: true,
        supports_rotate: true,
        compressed: false,
        author: "",
        url: "",
    },
    FormatDescriptor {
        id: TileFormat::Nes2Bpp,
        key: "nes-2bpp",
        name: "2BPP NES Planar",
        format_text: "[2][8]",
        extensions: &["nes", "chr"],
        color_bits: 2,
        plane_offsets: &[0x00, 0x08],
        row_stride: 1,
        tile_width: 8,
        tile_height: 8,
        default_view_width: 128,
        default_view_height: 128,
        read_only: false,
        supports_mirror: true,
        supports_rotate: true,
        compressed: false,
        author: "",
        url: "",
    },
];

impl TileFormat {
    pub fn descriptor(self) -> &'static FormatDescriptor {
        let index = match self {
            TileFormat::Snes8Bpp => 0,
            TileFormat::Snes4Bpp => 1,
            TileFormat::Snes2Bpp => 2,
            TileFormat::GameBoy2Bpp => 3,
            TileFormat::Nes2Bpp => 4,
        };
        &FORMATS[index]
    }

    pub fn key(self) -> &'static str {
        self.descriptor().key
    }

    /// Look a format up by key (`snes-8bpp`) or display name
    /// (`8BPP SNES Planar`), ignoring case.
    pub fn from_name(name: &str) -> Result<Self> {
        let name = name.trim();
        FORMATS
            .iter()
            .find(|f| f.key.eq_ignore_ascii_case(name) || f.name.eq_ignore_ascii_case(name))
            .map(|f| f.id)
            .ok_or_else(|| {
                log(LogCategory::Format, LogLevel::Warn, || {
                    format!("no tile format named '{}'", name)
                });
                CodecError::UnknownFormat(name.to_string())
            })
    }
}

impl std::fmt::Display for TileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for TileFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl FormatDescriptor {
    /// Number of palette entries a pixel can address.
    pub fn color_count(&self) -> usize {
        1 << self.color_bits
    }

    pub fn pixels_per_tile(&self) -> usize {
        self.tile_width * self.tile_height
    }

    /// Bytes spanned by one tile: from the base up to the last row of the
    /// highest plane.
    pub fn tile_size(&self) -> usize {
        let last_plane = self.plane_offsets.iter().copied().max().unwrap_or(0);
        last_plane + self.row_stride * (self.tile_height - 1) + 1
    }

    /// Whether files with `extension` (with or without the dot) usually
    /// carry this format.
    pub fn matches_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Fails with `InvalidDimensions` unless `width`x`height` is this
    /// format's tile size.
    pub fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if width != self.tile_width || height != self.tile_height {
            log(LogCategory::Format, LogLevel::Error, || {
                format!(
                    "{}: requested {}x{} tiles, format is fixed at {}x{}",
                    self.name, width, height, self.tile_width, self.tile_height
                )
            });
            return Err(CodecError::InvalidDimensions {
                width,
                height,
                expected_width: self.tile_width,
                expected_height: self.tile_height,
            });
        }
        Ok(())
    }
}

/// Formats usually found in files with `extension`, in registry order.
pub fn formats_for_extension(extension: &str) -> Vec<&'static FormatDescriptor> {
    FORMATS
        .iter()
        .filter(|f| f.matches_extension(extension))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snes_8bpp_metadata() {
        let f = TileFormat::Snes8Bpp.descriptor();
        assert_eq!(f.name, "8BPP SNES Planar");
        assert_eq!(f.format_text, "[8][8]");
        assert_eq!(f.color_bits, 8);
        assert_eq!(f.color_count(), 256);
        assert_eq!((f.tile_width, f.tile_height), (8, 8));
        assert_eq!((f.default_view_width, f.default_view_height), (128, 128));
        assert_eq!(f.extensions, &["smc", "sfc", "fig"]);
        assert!(!f.read_only);
        assert!(f.supports_mirror && f.supports_rotate);
        assert!(!f.compressed);
    }

    #[test]
    fn test_tile_sizes() {
        assert_eq!(TileFormat::Snes8Bpp.descriptor().tile_size(), 64);
        assert_eq!(TileFormat::Snes4Bpp.descriptor().tile_size(), 32);
        assert_eq!(TileFormat::Snes2Bpp.descriptor().tile_size(), 16);
        assert_eq!(TileFormat::GameBoy2Bpp.descriptor().tile_size(), 16);
        assert_eq!(TileFormat::Nes2Bpp.descriptor().tile_size(), 16);
    }

    #[test]
    fn test_descriptor_table_is_consistent() {
        for f in FORMATS.iter() {
            assert_eq!(f.id.descriptor(), f, "{} is registered out of order", f.key);
            assert_eq!(f.plane_offsets.len(), f.color_bits, "{}", f.key);
            assert!(f.tile_width <= 8, "plane rows are single bytes");
            assert_eq!(
                f.format_text,
                format!("[{}][{}]", f.color_bits, f.tile_height),
                "{}",
                f.key
            );
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(TileFormat::from_name("snes-4bpp"), Ok(TileFormat::Snes4Bpp));
        assert_eq!(TileFormat::from_name("8bpp snes planar"), Ok(TileFormat::Snes8Bpp));
        assert_eq!("NES-2BPP".parse::<TileFormat>(), Ok(TileFormat::Nes2Bpp));
        assert_eq!(
            TileFormat::from_name("genesis-4bpp"),
            Err(CodecError::UnknownFormat("genesis-4bpp".to_string()))
        );
    }

    #[test]
    fn test_display_uses_key() {
        assert_eq!(TileFormat::GameBoy2Bpp.to_string(), "gb-2bpp");
    }

    #[test]
    fn test_formats_for_extension() {
        let snes: Vec<_> = formats_for_extension(".SFC").iter().map(|f| f.id).collect();
        assert_eq!(
            snes,
            vec![TileFormat::Snes8Bpp, TileFormat::Snes4Bpp, TileFormat::Snes2Bpp]
        );
        assert_eq!(formats_for_extension("chr")[0].id, TileFormat::Nes2Bpp);
        assert!(formats_for_extension("bin").is_empty());
    }

    #[test]
    fn test_validate_dimensions() {
        let f = TileFormat::Snes8Bpp.descriptor();
        assert!(f.validate_dimensions(8, 8).is_ok());
        assert_eq!(
            f.validate_dimensions(16, 8),
            Err(CodecError::InvalidDimensions {
                width: 16,
                height: 8,
                expected_width: 8,
                expected_height: 8,
            })
        );
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&TileFormat::Snes8Bpp).unwrap();
        assert_eq!(json, "\"snes-8bpp\"");
        let parsed: TileFormat = serde_json::from_str("\"nes-2bpp\"").unwrap();
        assert_eq!(parsed, TileFormat::Nes2Bpp);
    }
}
