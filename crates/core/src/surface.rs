//! Flat one-byte-per-pixel surfaces the codec reads from and writes to.

use crate::error::{CodecError, Result};
use crate::logging::{log, LogCategory, LogLevel};

/// Byte-addressable pixel store.
///
/// Every pixel is a palette index in `0..=255`. Implementors decide how a
/// coordinate maps to a linear index; the codec only ever goes through
/// [`PixelSurface::address`].
pub trait PixelSurface {
    /// Linear index of `(x, y)` into [`PixelSurface::pixels`].
    fn address(&self, x: usize, y: usize) -> Result<usize>;

    /// Width and height in pixels.
    fn dimensions(&self) -> (usize, usize);

    fn pixels(&self) -> &[u8];

    fn pixels_mut(&mut self) -> &mut [u8];
}

/// Row-major bitmap with one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bytemap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// Standalone pixel grid holding exactly one tile.
pub type TileBuffer = Bytemap;

impl Bytemap {
    /// Create a bytemap filled with palette index 0.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Wrap existing row-major pixels; `data` must hold exactly
    /// `width * height` bytes.
    ///
    /// A mismatch is reported as `InvalidDimensions`, with the expected
    /// height being the number of full rows `data` holds.
    pub fn from_pixels(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            log(LogCategory::Surface, LogLevel::Warn, || {
                format!(
                    "bytemap {}x{} given {} pixels",
                    width,
                    height,
                    data.len()
                )
            });
            return Err(CodecError::InvalidDimensions {
                width,
                height,
                expected_width: width,
                expected_height: data.len() / width.max(1),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.address(x, y).ok().map(|index| self.data[index])
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) -> Result<()> {
        let index = self.address(x, y)?;
        self.data[index] = value;
        Ok(())
    }

    /// Pixels of row `y`, or `None` past the bottom edge.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        (y < self.height).then(|| &self.data[y * self.width..(y + 1) * self.width])
    }

    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.data
    }
}

impl PixelSurface for Bytemap {
    #[inline]
    fn address(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(CodecError::PixelOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn pixels(&self) -> &[u8] {
        &self.data
    }

    fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
