//! Engine configuration and pre-processing validation.
//!
//! Configuration errors are rejected before any frame is touched; the
//! numeric pipeline itself never re-checks them.

use crate::fixed::RoundingMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Grid default used by the 16-tile 720p hardware reference.
pub const DEFAULT_TILES: u32 = 4;
/// Clip limit default used by the hardware testbench.
pub const DEFAULT_CLIP_LIMIT: u32 = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid dimension tiles_{axis} must be positive")]
    ZeroGrid { axis: char },
    #[error("zero-sized tile: {tiles} tiles along {axis} do not fit in {extent} pixels")]
    ZeroSizedTile { axis: char, tiles: u32, extent: u32 },
    #[error("clip_limit must be positive")]
    ZeroClipLimit,
    #[error("weight_shift must be positive")]
    ZeroWeightShift,
}

/// CLAHE engine parameters.
///
/// `weight_mult_x`/`weight_mult_y` override the multipliers otherwise
/// derived from the regular tile dimensions as `(256 << weight_shift) / dim`
/// (truncating), matching the constants burned into the hardware
/// (819 / 1456 for 320x180 tiles at shift 10).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaheConfig {
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub clip_limit: u32,
    pub weight_shift: u32,
    pub weight_mult_x: Option<i64>,
    pub weight_mult_y: Option<i64>,
    pub rounding: RoundingMode,
}

impl Default for ClaheConfig {
    fn default() -> Self {
        Self {
            tiles_x: DEFAULT_TILES,
            tiles_y: DEFAULT_TILES,
            clip_limit: DEFAULT_CLIP_LIMIT,
            weight_shift: crate::fixed::DEFAULT_WEIGHT_SHIFT,
            weight_mult_x: None,
            weight_mult_y: None,
            rounding: RoundingMode::Truncate,
        }
    }
}

impl ClaheConfig {
    /// Check the configuration against a frame geometry.
    ///
    /// The last tile column/row absorbs remainder pixels, so the only grid
    /// requirement is that the truncating tile size stays positive.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), ConfigError> {
        if self.tiles_x == 0 {
            return Err(ConfigError::ZeroGrid { axis: 'x' });
        }
        if self.tiles_y == 0 {
            return Err(ConfigError::ZeroGrid { axis: 'y' });
        }
        if width / self.tiles_x == 0 {
            return Err(ConfigError::ZeroSizedTile {
                axis: 'x',
                tiles: self.tiles_x,
                extent: width,
            });
        }
        if height / self.tiles_y == 0 {
            return Err(ConfigError::ZeroSizedTile {
                axis: 'y',
                tiles: self.tiles_y,
                extent: height,
            });
        }
        if self.clip_limit == 0 {
            return Err(ConfigError::ZeroClipLimit);
        }
        if self.weight_shift == 0 {
            return Err(ConfigError::ZeroWeightShift);
        }
        Ok(())
    }
}
