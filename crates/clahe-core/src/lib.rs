//! clahe-core — Golden model of a tiled, fixed-point CLAHE engine.
//!
//! Reproduces, bit for bit, the per-pixel output of a synthesizable
//! contrast-limited adaptive histogram equalization pipeline: per-tile
//! histogram clipping with deterministic excess redistribution, CDF
//! normalization into per-tile remapping tables, and tile-boundary-aware
//! bilinear interpolation with truncating fixed-point arithmetic.
//!
//! The arithmetic here is intentionally lossy in the same places the
//! hardware is lossy. Truncating shifts must not be "improved" to rounding;
//! the optional [`RoundingMode::RoundHalf`] variant exists only to model a
//! hardware target that itself rounds.

pub mod cdf;
pub mod config;
pub mod dump;
pub mod engine;
pub mod fixed;
pub mod frame;
pub mod grid;
pub mod histogram;
pub mod interp;
pub mod limiter;

pub use cdf::CdfTable;
pub use config::{ClaheConfig, ConfigError};
pub use engine::{ClaheEngine, EngineError, FrameTables};
pub use fixed::{AxisWeight, RoundingMode};
pub use frame::{FrameError, LumaFrame};
pub use grid::{PixelLocation, TileGrid};
pub use histogram::Histogram;

/// Number of histogram bins / luminance levels.
pub const BINS: usize = 256;
