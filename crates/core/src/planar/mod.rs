//! Planar tile formats and the codec that converts them to bytemaps.
//!
//! Each format is a [`FormatDescriptor`] in the static [`FORMATS`] table,
//! selected by its [`TileFormat`] tag. [`PlanarCodec`] runs the same bit
//! loop over whichever descriptor it is given.

pub mod codec;
pub mod format;
pub mod sheet;

pub use codec::PlanarCodec;
pub use format::{formats_for_extension, FormatDescriptor, TileFormat, FORMATS};
pub use sheet::{decode_sheet, encode_sheet, sheet_dimensions};
