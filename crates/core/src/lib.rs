//! Planar tile graphics codec.
//!
//! Converts console tile data between its bitplane layout and a flat
//! one-byte-per-pixel bytemap, in both directions and without loss.
//!
//! ```rust
//! use chr_core::planar::{PlanarCodec, TileFormat};
//!
//! let mut rom = vec![0u8; 64];
//! rom[0x00] = 0xFF; // plane 0, row 0
//!
//! let codec = PlanarCodec::for_format(TileFormat::Snes8Bpp);
//! let tile = codec.decode_tile(&rom, 0).unwrap();
//! assert_eq!(tile.row(0), Some(&[1u8; 8][..]));
//! ```

pub mod error;
pub mod logging;
pub mod planar;
pub mod settings;
pub mod surface;
pub mod transform;

pub use error::{CodecError, Result};
pub use planar::{FormatDescriptor, PlanarCodec, TileFormat};
pub use settings::CodecSettings;
pub use surface::{Bytemap, PixelSurface, TileBuffer};
pub use transform::{Identity, PixelTransform, Rotation, TileOrientation};
