//! Per-tile luminance histograms.

use crate::frame::LumaFrame;
use crate::grid::TileGrid;
use crate::BINS;

/// 256-bin count histogram, index = luminance value.
pub type Histogram = [u32; BINS];

/// Accumulate one tile's histogram in a single pass over its pixels.
///
/// The sum of the returned counts equals the tile's pixel count, including
/// absorbed remainder pixels in the last column/row.
pub fn tile_histogram(frame: &LumaFrame, grid: &TileGrid, tile_x: u32, tile_y: u32) -> Histogram {
    let mut hist = [0u32; BINS];
    let (x0, y0, x1, y1) = grid.tile_bounds(tile_x, tile_y);
    let width = frame.width as usize;
    for y in y0..y1 {
        let row = &frame.data[y as usize * width..(y as usize + 1) * width];
        for &p in &row[x0 as usize..x1 as usize] {
            hist[p as usize] += 1;
        }
    }
    hist
}
