//! Tile geometry: pixel → tile mapping and per-tile pixel ranges.

use crate::config::{ClaheConfig, ConfigError};

/// Where a pixel sits in the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLocation {
    pub tile_x: u32,
    pub tile_y: u32,
    /// Coordinate within the home tile. In the absorbing last column/row
    /// this can reach beyond the regular tile size.
    pub local_x: u32,
    pub local_y: u32,
}

/// Regular tile grid over one frame.
///
/// Tile sizes come from truncating division (hardware-style); the last tile
/// column/row absorbs any remainder pixels. The center offsets are those of
/// a *regular* tile — the absorbing tiles reuse them, exactly as the RTL
/// keeps its center constants fixed.
#[derive(Debug, Clone, Copy)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl TileGrid {
    pub fn new(width: u32, height: u32, config: &ClaheConfig) -> Result<Self, ConfigError> {
        config.validate(width, height)?;
        Ok(Self {
            width,
            height,
            tiles_x: config.tiles_x,
            tiles_y: config.tiles_y,
            tile_width: width / config.tiles_x,
            tile_height: height / config.tiles_y,
        })
    }

    pub fn tile_count(&self) -> usize {
        self.tiles_x as usize * self.tiles_y as usize
    }

    /// Linear tile id in row-major order.
    #[inline]
    pub fn tile_id(&self, tile_x: u32, tile_y: u32) -> usize {
        tile_y as usize * self.tiles_x as usize + tile_x as usize
    }

    /// Regular tile center offset, x axis.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.tile_width / 2
    }

    /// Regular tile center offset, y axis.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.tile_height / 2
    }

    /// Map a pixel to its home tile and intra-tile coordinates.
    ///
    /// `tile_x = x / tile_width` clamped to the last tile, so remainder
    /// pixels fold into the absorbing column/row rather than indexing past
    /// the grid.
    #[inline]
    pub fn locate(&self, x: u32, y: u32) -> PixelLocation {
        let tile_x = (x / self.tile_width).min(self.tiles_x - 1);
        let tile_y = (y / self.tile_height).min(self.tiles_y - 1);
        PixelLocation {
            tile_x,
            tile_y,
            local_x: x - tile_x * self.tile_width,
            local_y: y - tile_y * self.tile_height,
        }
    }

    /// Pixel span `[x0, x1) x [y0, y1)` covered by a tile, including the
    /// absorbed remainder for the last column/row.
    pub fn tile_bounds(&self, tile_x: u32, tile_y: u32) -> (u32, u32, u32, u32) {
        let x0 = tile_x * self.tile_width;
        let y0 = tile_y * self.tile_height;
        let x1 = if tile_x + 1 == self.tiles_x { self.width } else { x0 + self.tile_width };
        let y1 = if tile_y + 1 == self.tiles_y { self.height } else { y0 + self.tile_height };
        (x0, y0, x1, y1)
    }
}
