//! Tile-boundary-aware bilinear interpolation over per-tile CDF tables.

use crate::cdf::CdfTable;
use crate::fixed::{shift_out, AxisWeight, RoundingMode};
use crate::grid::{PixelLocation, TileGrid};

/// The four physical tiles blended for one pixel.
///
/// Left/top is the home tile; right/bottom is the next tile along each
/// axis, clamped to the grid edge. At the last column/row two logical
/// neighbors resolve to the same physical tile, which collapses the blend
/// to the home table for that axis. Kept as an explicit index computation
/// so edge clamping is testable independently of the blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborTiles {
    pub x0: u32,
    pub x1: u32,
    pub y0: u32,
    pub y1: u32,
}

/// Resolve the four neighbor tiles for a pixel's home tile.
#[inline]
pub fn resolve_neighbors(grid: &TileGrid, tile_x: u32, tile_y: u32) -> NeighborTiles {
    NeighborTiles {
        x0: tile_x,
        x1: (tile_x + 1).min(grid.tiles_x - 1),
        y0: tile_y,
        y1: (tile_y + 1).min(grid.tiles_y - 1),
    }
}

/// Two nested fixed-point weighted averages:
///
/// ```text
/// top    = ((256 - wx) * v_tl + wx * v_tr) >> 8
/// bottom = ((256 - wx) * v_bl + wx * v_br) >> 8
/// result = ((256 - wy) * top  + wy * bottom) >> 8
/// ```
///
/// Intermediates are `u32` (the widest sum is 256 * 255, far below
/// overflow). The `>> 8` is a plain truncation under the baseline
/// contract — deliberately lossy, matching the RTL datapath.
#[inline]
pub fn blend(
    v_tl: u8,
    v_tr: u8,
    v_bl: u8,
    v_br: u8,
    wx: u32,
    wy: u32,
    rounding: RoundingMode,
) -> u8 {
    let top = shift8((256 - wx) * v_tl as u32 + wx * v_tr as u32, rounding);
    let bottom = shift8((256 - wx) * v_bl as u32 + wx * v_br as u32, rounding);
    shift8((256 - wy) * top + wy * bottom, rounding) as u8
}

#[inline]
fn shift8(sum: u32, rounding: RoundingMode) -> u32 {
    shift_out(sum as i64, 8, rounding) as u32
}

/// Enhance one pixel: weights from the signed center offsets, CDF lookups
/// in the four neighbor tables, nested blend.
#[inline]
pub fn interpolate_pixel(
    grid: &TileGrid,
    weight_x: &AxisWeight,
    weight_y: &AxisWeight,
    tables: &[CdfTable],
    loc: PixelLocation,
    value: u8,
    rounding: RoundingMode,
) -> u8 {
    let wx = weight_x.weight(loc.local_x as i32 - grid.center_x() as i32);
    let wy = weight_y.weight(loc.local_y as i32 - grid.center_y() as i32);
    let n = resolve_neighbors(grid, loc.tile_x, loc.tile_y);

    let v = value as usize;
    let v_tl = tables[grid.tile_id(n.x0, n.y0)][v];
    let v_tr = tables[grid.tile_id(n.x1, n.y0)][v];
    let v_bl = tables[grid.tile_id(n.x0, n.y1)][v];
    let v_br = tables[grid.tile_id(n.x1, n.y1)][v];

    blend(v_tl, v_tr, v_bl, v_br, wx, wy, rounding)
}
