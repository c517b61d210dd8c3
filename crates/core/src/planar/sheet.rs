//! Runs of consecutive tiles laid out as a sheet.
//!
//! Tile editors show a ROM region as a grid: tile `i` of the run is drawn at
//! column `i % tiles_per_row`, row `i / tiles_per_row`. These helpers walk
//! such a run and hand each tile to the codec.

use crate::error::{CodecError, Result};
use crate::logging::{log, LogCategory, LogLevel};
use crate::surface::{Bytemap, PixelSurface};
use crate::transform::PixelTransform;

use super::codec::PlanarCodec;

fn check_tiles_per_row(codec: &PlanarCodec, tiles_per_row: usize) -> Result<()> {
    if tiles_per_row == 0 {
        let format = codec.format();
        log(LogCategory::Codec, LogLevel::Error, || {
            format!("{}: a sheet needs at least one tile per row", format.name)
        });
        return Err(CodecError::InvalidDimensions {
            width: 0,
            height: format.tile_height,
            expected_width: format.tile_width,
            expected_height: format.tile_height,
        });
    }
    Ok(())
}

/// Surface origin of tile `index` in the sheet.
pub fn tile_origin(codec: &PlanarCodec, index: usize, tiles_per_row: usize) -> (usize, usize) {
    let format = codec.format();
    (
        (index % tiles_per_row) * format.tile_width,
        (index / tiles_per_row) * format.tile_height,
    )
}

/// Pixel size of a sheet holding `tile_count` tiles.
///
/// A run shorter than one row is only as wide as its tiles.
pub fn sheet_dimensions(
    codec: &PlanarCodec,
    tile_count: usize,
    tiles_per_row: usize,
) -> Result<(usize, usize)> {
    check_tiles_per_row(codec, tiles_per_row)?;
    let format = codec.format();
    let columns = tile_count.min(tiles_per_row);
    let rows = tile_count.div_ceil(tiles_per_row);
    Ok((columns * format.tile_width, rows * format.tile_height))
}

impl Bytemap {
    /// Blank bytemap sized for [`decode_sheet`].
    pub fn for_sheet(codec: &PlanarCodec, tile_count: usize, tiles_per_row: usize) -> Result<Self> {
        let (width, height) = sheet_dimensions(codec, tile_count, tiles_per_row)?;
        Ok(Bytemap::new(width, height))
    }
}

/// Decode `tile_count` tiles starting at `base` onto `surface`.
///
/// The whole run is bounds checked first; on error nothing is written.
pub fn decode_sheet<S, T>(
    codec: &PlanarCodec,
    source: &[u8],
    base: usize,
    tile_count: usize,
    tiles_per_row: usize,
    surface: &mut S,
    transform: &T,
) -> Result<()>
where
    S: PixelSurface + ?Sized,
    T: PixelTransform + ?Sized,
{
    check_run(codec, source.len(), base, tile_count, tiles_per_row, &*surface)?;

    for index in 0..tile_count {
        let origin = tile_origin(codec, index, tiles_per_row);
        let address = codec.tile_address(base, index)?;
        codec.decode(source, address, surface, origin, transform)?;
    }

    log(LogCategory::Codec, LogLevel::Debug, || {
        format!(
            "{}: decoded {} tile(s) from 0x{:06X}",
            codec.format().name,
            tile_count,
            base
        )
    });
    Ok(())
}

/// Encode `tile_count` tiles from `surface` back into `target` at `base`.
pub fn encode_sheet<S, T>(
    codec: &PlanarCodec,
    target: &mut [u8],
    base: usize,
    tile_count: usize,
    tiles_per_row: usize,
    surface: &S,
    transform: &T,
) -> Result<()>
where
    S: PixelSurface + ?Sized,
    T: PixelTransform + ?Sized,
{
    check_run(codec, target.len(), base, tile_count, tiles_per_row, surface)?;

    for index in 0..tile_count {
        let origin = tile_origin(codec, index, tiles_per_row);
        let address = codec.tile_address(base, index)?;
        codec.encode(target, address, surface, origin, transform)?;
    }

    log(LogCategory::Codec, LogLevel::Debug, || {
        format!(
            "{}: encoded {} tile(s) to 0x{:06X}",
            codec.format().name,
            tile_count,
            base
        )
    });
    Ok(())
}

/// Validate the byte range and the far corner of the sheet before any tile
/// is converted.
fn check_run<S>(
    codec: &PlanarCodec,
    len: usize,
    base: usize,
    tile_count: usize,
    tiles_per_row: usize,
    surface: &S,
) -> Result<()>
where
    S: PixelSurface + ?Sized,
{
    let (width, height) = sheet_dimensions(codec, tile_count, tiles_per_row)?;
    if tile_count == 0 {
        return Ok(());
    }

    let footprint = tile_count
        .checked_mul(codec.format().tile_size())
        .unwrap_or(usize::MAX);
    match base.checked_add(footprint) {
        Some(end) if end <= len => {}
        _ => {
            log(LogCategory::Codec, LogLevel::Error, || {
                format!(
                    "{} tile(s) at 0x{:X} run past the end of a {} byte buffer",
                    tile_count, base, len
                )
            });
            return Err(CodecError::OutOfRange {
                address: base,
                footprint,
                len,
            });
        }
    }

    surface.address(width - 1, height - 1).map(|_| ())
}
