//! Per-frame orchestration: histogram → clip → normalize per tile, then
//! interpolation over the finished tables.
//!
//! The two phases are split at a function boundary on purpose: a tile's
//! CDF table must not be read until its histogram has observed every pixel
//! of the tile for the current frame. `FrameTables` is rebuilt from scratch
//! each frame and read-only afterwards, so the interpolation pass reads all
//! tiles concurrently without synchronization.

use crate::cdf::{normalize_cdf, CdfTable};
use crate::config::{ClaheConfig, ConfigError};
use crate::fixed::{AxisWeight, RoundingMode};
use crate::frame::{FrameError, LumaFrame};
use crate::grid::TileGrid;
use crate::histogram::tile_histogram;
use crate::interp::interpolate_pixel;
use crate::limiter::clip_histogram;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("frame: {0}")]
    Frame(#[from] FrameError),
    #[error("frame geometry {got_width}x{got_height} does not match engine geometry {width}x{height}")]
    GeometryMismatch {
        width: u32,
        height: u32,
        got_width: u32,
        got_height: u32,
    },
}

/// One frame's worth of per-tile remapping tables, keyed by tile id in
/// row-major order. Owned values, replaced wholesale at each frame
/// boundary — never mutated in place across frames.
#[derive(Debug, Clone)]
pub struct FrameTables {
    tables: Vec<CdfTable>,
}

impl FrameTables {
    /// Table for one tile id.
    pub fn tile(&self, tile_id: usize) -> &CdfTable {
        &self.tables[tile_id]
    }

    /// All tables in tile-id order, for verification dumps.
    pub fn as_slice(&self) -> &[CdfTable] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Fixed-point CLAHE engine for one frame geometry.
pub struct ClaheEngine {
    grid: TileGrid,
    weight_x: AxisWeight,
    weight_y: AxisWeight,
    clip_limit: u32,
    rounding: RoundingMode,
}

impl ClaheEngine {
    /// Validate the configuration against the frame geometry and derive
    /// the per-axis weight constants.
    pub fn new(width: u32, height: u32, config: &ClaheConfig) -> Result<Self, EngineError> {
        let grid = TileGrid::new(width, height, config)?;

        let weight_x = match config.weight_mult_x {
            Some(mult) => AxisWeight::new(mult, config.weight_shift, config.rounding),
            None => AxisWeight::for_tile_dim(grid.tile_width, config.weight_shift, config.rounding),
        };
        let weight_y = match config.weight_mult_y {
            Some(mult) => AxisWeight::new(mult, config.weight_shift, config.rounding),
            None => AxisWeight::for_tile_dim(grid.tile_height, config.weight_shift, config.rounding),
        };

        tracing::debug!(
            width,
            height,
            tiles_x = grid.tiles_x,
            tiles_y = grid.tiles_y,
            tile_width = grid.tile_width,
            tile_height = grid.tile_height,
            mult_x = weight_x.mult,
            mult_y = weight_y.mult,
            shift = config.weight_shift,
            "engine configured"
        );

        Ok(Self {
            grid,
            weight_x,
            weight_y,
            clip_limit: config.clip_limit,
            rounding: config.rounding,
        })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn weight_x(&self) -> &AxisWeight {
        &self.weight_x
    }

    pub fn weight_y(&self) -> &AxisWeight {
        &self.weight_y
    }

    fn check_geometry(&self, frame: &LumaFrame) -> Result<(), EngineError> {
        if frame.width != self.grid.width || frame.height != self.grid.height {
            return Err(EngineError::GeometryMismatch {
                width: self.grid.width,
                height: self.grid.height,
                got_width: frame.width,
                got_height: frame.height,
            });
        }
        Ok(())
    }

    /// Histogram → clip → normalize for every tile. Each tile is an
    /// independent unit of work; no shared mutable state across tiles.
    pub fn compute_tables(&self, frame: &LumaFrame) -> Result<FrameTables, EngineError> {
        self.check_geometry(frame)?;

        let tiles_x = self.grid.tiles_x;
        let tables: Vec<CdfTable> = (0..self.grid.tile_count())
            .into_par_iter()
            .map(|id| {
                let tile_x = id as u32 % tiles_x;
                let tile_y = id as u32 / tiles_x;
                let hist = tile_histogram(frame, &self.grid, tile_x, tile_y);
                let clipped = clip_histogram(&hist, self.clip_limit);
                normalize_cdf(&clipped)
            })
            .collect();

        Ok(FrameTables { tables })
    }

    /// Interpolation pass over finished tables, parallel per output row.
    pub fn apply(&self, frame: &LumaFrame, tables: &FrameTables) -> Result<LumaFrame, EngineError> {
        self.check_geometry(frame)?;

        let width = self.grid.width as usize;
        let mut out = vec![0u8; frame.data.len()];

        out.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            let y = y as u32;
            for (x, slot) in row.iter_mut().enumerate() {
                let x = x as u32;
                let loc = self.grid.locate(x, y);
                *slot = interpolate_pixel(
                    &self.grid,
                    &self.weight_x,
                    &self.weight_y,
                    tables.as_slice(),
                    loc,
                    frame.pixel(x, y),
                    self.rounding,
                );
            }
        });

        Ok(LumaFrame {
            data: out,
            width: frame.width,
            height: frame.height,
        })
    }

    /// One full frame: table construction, then interpolation.
    pub fn enhance(&self, frame: &LumaFrame) -> Result<LumaFrame, EngineError> {
        let tables = self.compute_tables(frame)?;
        self.apply(frame, &tables)
    }
}
