//! Bitplane <-> bytemap conversion, one tile at a time.
//!
//! A pixel's palette index is spread over the tile's bitplanes: bit `b` of
//! the index lives in plane `b`. Inside a plane row byte the leftmost pixel
//! is the most significant bit. Decoding gathers one bit per plane into a
//! byte; encoding scatters the bits of a byte back, touching only the bit of
//! the column being written so neighbouring pixels survive.

use crate::error::{CodecError, Result};
use crate::logging::{log, LogCategory, LogLevel};
use crate::surface::{Bytemap, PixelSurface, TileBuffer};
use crate::transform::{Identity, PixelTransform};

use super::format::{FormatDescriptor, TileFormat};

/// Stateless converter for one planar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanarCodec {
    format: &'static FormatDescriptor,
}

impl PlanarCodec {
    pub fn new(format: &'static FormatDescriptor) -> Self {
        Self { format }
    }

    pub fn for_format(id: TileFormat) -> Self {
        Self::new(id.descriptor())
    }

    /// Like [`PlanarCodec::for_format`], but rejects a tile geometry the
    /// format does not use.
    pub fn with_dimensions(id: TileFormat, width: usize, height: usize) -> Result<Self> {
        let format = id.descriptor();
        format.validate_dimensions(width, height)?;
        Ok(Self::new(format))
    }

    pub fn format(&self) -> &'static FormatDescriptor {
        self.format
    }

    /// Base address of tile `index` in a run of tiles starting at `base`.
    ///
    /// Fails with `OutOfRange` when the address does not fit in `usize`.
    pub fn tile_address(&self, base: usize, index: usize) -> Result<usize> {
        let size = self.format.tile_size();
        index
            .checked_mul(size)
            .and_then(|offset| base.checked_add(offset))
            .ok_or(CodecError::OutOfRange {
                address: base,
                footprint: index.saturating_mul(size),
                len: usize::MAX,
            })
    }

    fn check_footprint(&self, address: usize, len: usize) -> Result<()> {
        let footprint = self.format.tile_size();
        match address.checked_add(footprint) {
            Some(end) if end <= len => Ok(()),
            _ => {
                log(LogCategory::Codec, LogLevel::Error, || {
                    format!(
                        "{}: tile at 0x{:X} runs past the end of a {} byte buffer",
                        self.format.name, address, len
                    )
                });
                Err(CodecError::OutOfRange {
                    address,
                    footprint,
                    len,
                })
            }
        }
    }

    /// Surface index of every tile pixel, row-major in tile space.
    ///
    /// Resolving all of them up front means a bad origin or transform is
    /// reported before anything is written.
    fn surface_indices<S, T>(
        &self,
        surface: &S,
        origin: (usize, usize),
        transform: &T,
    ) -> Result<Vec<usize>>
    where
        S: PixelSurface + ?Sized,
        T: PixelTransform + ?Sized,
    {
        let (width, height) = (self.format.tile_width, self.format.tile_height);
        let len = surface.pixels().len();
        let mut indices = Vec::with_capacity(self.format.pixels_per_tile());

        for y in 0..height {
            for x in 0..width {
                let (sx, sy) = transform
                    .advance(origin.0, origin.1, x, y, width, height)
                    .ok_or_else(|| {
                        let (surface_width, surface_height) = surface.dimensions();
                        log(LogCategory::Codec, LogLevel::Error, || {
                            format!("tile at {:?} lands outside the coordinate space", origin)
                        });
                        CodecError::PixelOutOfRange {
                            x: origin.0.saturating_add(x),
                            y: origin.1.saturating_add(y),
                            width: surface_width,
                            height: surface_height,
                        }
                    })?;
                let index = surface.address(sx, sy).map_err(|err| {
                    log(LogCategory::Codec, LogLevel::Error, || {
                        format!("tile at {:?} does not fit the surface: {}", origin, err)
                    });
                    err
                })?;
                if index >= len {
                    return Err(CodecError::OutOfRange {
                        address: index,
                        footprint: 1,
                        len,
                    });
                }
                indices.push(index);
            }
        }

        Ok(indices)
    }

    /// Decode the tile at `address` of `source` onto `surface`.
    ///
    /// Tile pixel `(x, y)` is stored at `transform.advance(origin, x, y)`.
    /// `source` is never modified.
    pub fn decode<S, T>(
        &self,
        source: &[u8],
        address: usize,
        surface: &mut S,
        origin: (usize, usize),
        transform: &T,
    ) -> Result<()>
    where
        S: PixelSurface + ?Sized,
        T: PixelTransform + ?Sized,
    {
        self.check_footprint(address, source.len())?;
        let indices = self.surface_indices(&*surface, origin, transform)?;

        let format = self.format;
        let width = format.tile_width;
        let pixels = surface.pixels_mut();

        for x in 0..width {
            let shift = width - 1 - x;
            for y in 0..format.tile_height {
                let row = address + format.row_stride * y;
                let mut pixel = 0u8;

                for (bit, &offset) in format.plane_offsets.iter().enumerate() {
                    pixel |= ((source[row + offset] >> shift) & 1) << bit;
                }

                pixels[indices[y * width + x]] = pixel;
            }
        }

        log(LogCategory::Codec, LogLevel::Trace, || {
            format!("{}: decoded tile at 0x{:06X}", format.name, address)
        });
        Ok(())
    }

    /// Encode the tile shown on `surface` back into `target` at `address`.
    ///
    /// Read-modify-write: only the plane bits belonging to the tile's pixels
    /// change. Bytes outside the tile footprint are left alone, and palette
    /// bits above the format's colour depth are ignored.
    pub fn encode<S, T>(
        &self,
        target: &mut [u8],
        address: usize,
        surface: &S,
        origin: (usize, usize),
        transform: &T,
    ) -> Result<()>
    where
        S: PixelSurface + ?Sized,
        T: PixelTransform + ?Sized,
    {
        self.check_footprint(address, target.len())?;
        let indices = self.surface_indices(surface, origin, transform)?;

        let format = self.format;
        let width = format.tile_width;
        let pixels = surface.pixels();

        for x in 0..width {
            let shift = width - 1 - x;
            let mask = !(1u8 << shift);
            for y in 0..format.tile_height {
                let row = address + format.row_stride * y;
                let pixel = pixels[indices[y * width + x]];

                for (bit, &offset) in format.plane_offsets.iter().enumerate() {
                    let byte = &mut target[row + offset];
                    *byte = (*byte & mask) | (((pixel >> bit) & 1) << shift);
                }
            }
        }

        log(LogCategory::Codec, LogLevel::Trace, || {
            format!("{}: encoded tile at 0x{:06X}", format.name, address)
        });
        Ok(())
    }

    /// Decode one tile into its own row-major pixel grid.
    pub fn decode_tile(&self, source: &[u8], address: usize) -> Result<TileBuffer> {
        let mut tile = Bytemap::new(self.format.tile_width, self.format.tile_height);
        self.decode(source, address, &mut tile, (0, 0), &Identity)?;
        Ok(tile)
    }

    /// Encode a standalone pixel grid, which must match the tile size.
    pub fn encode_tile(&self, target: &mut [u8], address: usize, tile: &TileBuffer) -> Result<()> {
        self.format.validate_dimensions(tile.width(), tile.height())?;
        self.encode(target, address, tile, (0, 0), &Identity)
    }
}
