//! Error type shared by the codec, the surfaces and the settings loader.

use thiserror::Error;

/// Contract violations reported by the tile codec.
///
/// None of these are recoverable inside the codec; they are surfaced to the
/// caller before any output byte or pixel is modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The tile block starting at `address` does not fit in the buffer.
    #[error("tile at 0x{address:X} needs {footprint} bytes but buffer holds {len}")]
    OutOfRange {
        address: usize,
        footprint: usize,
        len: usize,
    },

    /// A (transformed) pixel coordinate falls outside the pixel surface.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} surface")]
    PixelOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Requested tile geometry does not match the format.
    #[error("invalid tile dimensions {width}x{height}, format uses {expected_width}x{expected_height}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },

    #[error("unknown tile format: {0}")]
    UnknownFormat(String),

    #[error("invalid settings: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;
