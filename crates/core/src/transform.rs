//! Tile-local coordinate transforms.
//!
//! Editors show tiles mirrored or rotated without touching the ROM data, so
//! the codec never writes pixel `(x, y)` of a tile directly. It asks a
//! [`PixelTransform`] where that pixel lands on the surface instead.

use serde::{Deserialize, Serialize};

/// Maps a tile-local offset to a surface coordinate.
///
/// For a fixed configuration `advance` must be deterministic and must be a
/// bijection over the tile: every `(dx, dy)` in the tile maps to a distinct
/// position inside the tile's rectangle at `(base_x, base_y)`.
pub trait PixelTransform {
    /// Returns the surface coordinate for offset `(dx, dy)` of the tile whose
    /// top-left corner is at `(base_x, base_y)`, or `None` when that
    /// coordinate is not representable.
    ///
    /// `width` and `height` are the tile dimensions.
    fn advance(
        &self,
        base_x: usize,
        base_y: usize,
        dx: usize,
        dy: usize,
        width: usize,
        height: usize,
    ) -> Option<(usize, usize)>;
}

/// No mirroring, no rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl PixelTransform for Identity {
    #[inline]
    fn advance(
        &self,
        base_x: usize,
        base_y: usize,
        dx: usize,
        dy: usize,
        _width: usize,
        _height: usize,
    ) -> Option<(usize, usize)> {
        Some((base_x.checked_add(dx)?, base_y.checked_add(dy)?))
    }
}

/// Clockwise rotation applied inside a tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

/// Per-tile mirroring followed by rotation.
///
/// Quarter turns swap the axes, so they are only a bijection for square
/// tiles. Every registered format uses 8x8 tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileOrientation {
    pub mirror_horizontal: bool,
    pub mirror_vertical: bool,
    pub rotation: Rotation,
}

impl TileOrientation {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

impl PixelTransform for TileOrientation {
    fn advance(
        &self,
        base_x: usize,
        base_y: usize,
        dx: usize,
        dy: usize,
        width: usize,
        height: usize,
    ) -> Option<(usize, usize)> {
        let x = if self.mirror_horizontal { width - 1 - dx } else { dx };
        let y = if self.mirror_vertical { height - 1 - dy } else { dy };

        let (x, y) = match self.rotation {
            Rotation::None => (x, y),
            Rotation::Cw90 => (height - 1 - y, x),
            Rotation::Cw180 => (width - 1 - x, height - 1 - y),
            Rotation::Cw270 => (y, width - 1 - x),
        };

        Some((base_x.checked_add(x)?, base_y.checked_add(y)?))
    }
}
