//! CDF normalization: clipped histogram → per-tile brightness remapping
//! table.

use crate::histogram::Histogram;
use crate::BINS;

/// Monotonic 256-entry lookup mapping input luminance to output luminance
/// for one tile. Immutable once computed; lives for one frame.
pub type CdfTable = [u8; BINS];

/// Normalize a clipped histogram into a [0, 255] remapping table.
///
/// `out[i] = (cdf[i] - cdf_min) * 255 / (total - cdf_min)` with truncating
/// division, where `cdf_min` is the first strictly-positive cumulative
/// value. An empty or single-valued tile (`total == 0` or
/// `total == cdf_min`) yields the all-zero table — recovered locally, never
/// an error.
pub fn normalize_cdf(clipped: &Histogram) -> CdfTable {
    let mut cdf = [0u64; BINS];
    let mut running = 0u64;
    for (i, &count) in clipped.iter().enumerate() {
        running += count as u64;
        cdf[i] = running;
    }

    let total = cdf[BINS - 1];
    let cdf_min = cdf.iter().copied().find(|&v| v > 0).unwrap_or(0);
    if total == 0 || total == cdf_min {
        return [0u8; BINS];
    }

    let denom = total - cdf_min;
    let mut out = [0u8; BINS];
    for (i, &c) in cdf.iter().enumerate() {
        // The formula is bounded to [0, 255]; the min() is defensive
        // saturation against intermediate surprises, not a code path.
        let scaled = c.saturating_sub(cdf_min) * 255 / denom;
        out[i] = scaled.min(255) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tile_all_zero() {
        let hist = [0u32; BINS];
        assert_eq!(normalize_cdf(&hist), [0u8; BINS]);
    }

    #[test]
    fn test_single_bin_degenerate_all_zero() {
        // Whole tile in one bin: total == cdf_min
        let mut hist = [0u32; BINS];
        hist[50] = 16;
        assert_eq!(normalize_cdf(&hist), [0u8; BINS]);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let mut hist = [0u32; BINS];
        for (i, bin) in hist.iter_mut().enumerate() {
            *bin = (i as u32 * 7) % 13;
        }
        let table = normalize_cdf(&hist);
        for i in 0..BINS - 1 {
            assert!(table[i] <= table[i + 1], "table decreases at bin {i}");
        }
    }

    #[test]
    fn test_four_step_spread() {
        // 4 pixels each at 0, 85, 170, 255: steps at 0, 85, 170, 255
        let mut hist = [0u32; BINS];
        for v in [0usize, 85, 170, 255] {
            hist[v] = 4;
        }
        let table = normalize_cdf(&hist);
        assert_eq!(table[0], 0);
        assert_eq!(table[84], 0);
        assert_eq!(table[85], 85);
        assert_eq!(table[169], 85);
        assert_eq!(table[170], 170);
        assert_eq!(table[254], 170);
        assert_eq!(table[255], 255);
    }

    #[test]
    fn test_truncating_division() {
        // cdf = [1, 2, 3] over bins 0..2, total 3, cdf_min 1, denom 2:
        // out[1] = 1 * 255 / 2 = 127 (truncated, not 128)
        let mut hist = [0u32; BINS];
        hist[0] = 1;
        hist[1] = 1;
        hist[2] = 1;
        let table = normalize_cdf(&hist);
        assert_eq!(table[0], 0);
        assert_eq!(table[1], 127);
        assert_eq!(table[2], 255);
        assert_eq!(table[255], 255);
    }

    #[test]
    fn test_uniform_histogram_is_near_identity_ramp() {
        let hist = [4u32; BINS];
        let table = normalize_cdf(&hist);
        assert_eq!(table[0], 0);
        assert_eq!(table[255], 255);
        // Ramp is monotone and spans the full range
        for i in 0..BINS - 1 {
            assert!(table[i] <= table[i + 1]);
        }
        assert_eq!(table[128], (128u64 * 4 * 255 / (1024 - 4)) as u8);
    }
}
