//! Plain-text verification dumps.
//!
//! The hardware testbench exchanges intermediate state as whitespace-
//! separated numeric records with `#` comment lines. These writers produce
//! the same shape so an external harness can diff the golden model against
//! RTL simulation output: one `(tile_id, bin_index, value)` record per CDF
//! entry and one `(x, y, value)` record per output pixel.

use crate::cdf::CdfTable;
use crate::frame::LumaFrame;
use crate::BINS;
use std::io::{self, Write};

/// Write every tile's CDF table, tile-id order, one record per bin.
pub fn write_cdf_records<W: Write>(mut w: W, tables: &[CdfTable]) -> io::Result<()> {
    writeln!(w, "# tile_id bin value")?;
    for (tile_id, table) in tables.iter().enumerate() {
        for (bin, &value) in table.iter().enumerate() {
            writeln!(w, "{tile_id} {bin} {value}")?;
        }
    }
    Ok(())
}

/// Write every output pixel, row-major, one record per pixel.
pub fn write_pixel_records<W: Write>(mut w: W, frame: &LumaFrame) -> io::Result<()> {
    writeln!(w, "# x y value")?;
    for y in 0..frame.height {
        for x in 0..frame.width {
            writeln!(w, "{x} {y} {}", frame.pixel(x, y))?;
        }
    }
    Ok(())
}
