//! Fixed-point primitives: sign-preserving shifts and the per-axis
//! tile-center-relative blend weight.
//!
//! Everything here mirrors the RTL datapath. The weight is computed from
//! the pixel's signed distance to its tile center — computing it from the
//! unsigned local coordinate instead reproduces a hard discontinuity at
//! every tile seam.

use serde::{Deserialize, Serialize};

/// Weight at the tile center.
pub const WEIGHT_CENTER: i64 = 128;
/// Fixed-point base for the weight multipliers (base-1024).
pub const DEFAULT_WEIGHT_SHIFT: u32 = 10;

/// How fixed-point right shifts discard fraction bits.
///
/// `Truncate` is the baseline hardware contract. `RoundHalf` models the
/// add-half-before-shift variant some targets implement; it applies to the
/// weight shift and to both interpolation shifts consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    #[default]
    Truncate,
    RoundHalf,
}

/// Arithmetic right shift with round-toward-zero semantics.
///
/// For negative values this is `-((-v) >> s)`, not the two's-complement
/// `>>` (which floors). The distinction matters exactly at tile seams: a
/// floor shift biases negative offsets one unit low and the seam weights
/// stop meeting within one rounding unit.
#[inline]
pub fn sra_toward_zero(v: i64, shift: u32) -> i64 {
    if v >= 0 {
        v >> shift
    } else {
        -((-v) >> shift)
    }
}

/// Right shift under the configured rounding mode.
///
/// `RoundHalf` adds half the divisor before an arithmetic (flooring) shift,
/// which is how the rounding-variant RTL implements it.
#[inline]
pub fn shift_out(v: i64, shift: u32, mode: RoundingMode) -> i64 {
    if shift == 0 {
        // Nothing to discard; also keeps the half-divisor below from
        // underflowing the shift amount.
        return v;
    }
    match mode {
        RoundingMode::Truncate => sra_toward_zero(v, shift),
        RoundingMode::RoundHalf => (v + (1i64 << (shift - 1))) >> shift,
    }
}

/// Per-axis fixed-point weight: `weight(d) = 128 + ((d * mult) >> shift)`,
/// saturated to [0, 255].
///
/// `mult` approximates `256 / tile_dim` in base `2^shift`; the reference
/// 320x180-tile hardware uses 819 (x) and 1456 (y) at shift 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisWeight {
    pub mult: i64,
    pub shift: u32,
    pub rounding: RoundingMode,
}

impl AxisWeight {
    pub fn new(mult: i64, shift: u32, rounding: RoundingMode) -> Self {
        Self { mult, shift, rounding }
    }

    /// Derive the multiplier from the regular tile dimension:
    /// `(256 << shift) / dim`, truncating, exactly as the RTL constants
    /// were generated.
    pub fn for_tile_dim(dim: u32, shift: u32, rounding: RoundingMode) -> Self {
        let mult = (256i64 << shift) / dim as i64;
        Self { mult, shift, rounding }
    }

    /// Blend weight for a signed offset from the tile center.
    #[inline]
    pub fn weight(&self, d: i32) -> u32 {
        let product = d as i64 * self.mult;
        let offset = shift_out(product, self.shift, self.rounding);
        (WEIGHT_CENTER + offset).clamp(0, 255) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x_axis() -> AxisWeight {
        // 320-wide tile: (256 << 10) / 320 = 819
        AxisWeight::for_tile_dim(320, 10, RoundingMode::Truncate)
    }

    fn y_axis() -> AxisWeight {
        // 180-tall tile: (256 << 10) / 180 = 1456
        AxisWeight::for_tile_dim(180, 10, RoundingMode::Truncate)
    }

    #[test]
    fn test_reference_multipliers() {
        assert_eq!(x_axis().mult, 819);
        assert_eq!(y_axis().mult, 1456);
    }

    #[test]
    fn test_weight_center_is_128() {
        assert_eq!(x_axis().weight(0), 128);
        assert_eq!(y_axis().weight(0), 128);
    }

    #[test]
    fn test_weight_monotonic() {
        let w = x_axis();
        let mut prev = w.weight(-200);
        for d in -199..=200 {
            let cur = w.weight(d);
            assert!(cur >= prev, "weight not monotonic at d={d}: {cur} < {prev}");
            prev = cur;
        }
    }

    #[test]
    fn test_weight_saturates() {
        // Beyond half the tile dimension the weight pins to the rails.
        assert_eq!(x_axis().weight(-200), 0);
        assert_eq!(x_axis().weight(200), 255);
        assert_eq!(y_axis().weight(-128), 0);
        assert_eq!(y_axis().weight(128), 255);
    }

    #[test]
    fn test_weight_boundary_values_x() {
        // Tile edges for a 320-wide tile, center 160: rightmost local
        // column is d = 159, leftmost is d = -160. Both land within one
        // fixed-point rounding unit of the rails.
        let w = x_axis();
        assert_eq!(w.weight(159), 255);
        assert_eq!(w.weight(-160), 1);
    }

    #[test]
    fn test_weight_boundary_values_y() {
        let w = y_axis();
        assert_eq!(w.weight(89), 254);
        assert_eq!(w.weight(-90), 1);
    }

    #[test]
    fn test_sra_rounds_toward_zero() {
        assert_eq!(sra_toward_zero(819, 10), 0);
        assert_eq!(sra_toward_zero(-819, 10), 0);
        assert_eq!(sra_toward_zero(-1024, 10), -1);
        assert_eq!(sra_toward_zero(-1025, 10), -1);
        // Plain >> would floor: -819 >> 10 == -1
        assert_eq!(-819i64 >> 10, -1);
    }

    #[test]
    fn test_weight_small_negative_offset_unbiased() {
        // d = -1 at mult 819: product -819 >> 10 truncates to 0, so the
        // weight stays at the center value instead of dipping to 127.
        assert_eq!(x_axis().weight(-1), 128);
    }

    #[test]
    fn test_round_half_variant() {
        let w = AxisWeight::for_tile_dim(320, 10, RoundingMode::RoundHalf);
        // -160 * 819 = -131040; +512 then floor-shift gives -128 -> weight 0
        assert_eq!(w.weight(-160), 0);
        // Center is unaffected by the rounding bias
        assert_eq!(w.weight(0), 128);
        assert_eq!(w.weight(159), 255);
    }

    #[test]
    fn test_shift_out_round_half() {
        assert_eq!(shift_out(1023, 10, RoundingMode::RoundHalf), 1);
        assert_eq!(shift_out(511, 10, RoundingMode::RoundHalf), 0);
        assert_eq!(shift_out(512, 10, RoundingMode::RoundHalf), 1);
    }

    #[test]
    fn test_shift_out_zero_shift_is_identity() {
        // shift 0 must not underflow the half-divisor computation
        assert_eq!(shift_out(42, 0, RoundingMode::RoundHalf), 42);
        assert_eq!(shift_out(-42, 0, RoundingMode::RoundHalf), -42);
        assert_eq!(shift_out(42, 0, RoundingMode::Truncate), 42);
        assert_eq!(shift_out(-42, 0, RoundingMode::Truncate), -42);
    }
}
