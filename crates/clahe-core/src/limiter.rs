//! Contrast limiting: per-bin clipping with deterministic excess
//! redistribution.

use crate::histogram::Histogram;
use crate::BINS;

/// Clip each bin to `clip_limit` and redistribute the excess uniformly.
///
/// `avg_increment = total_excess / 256` goes to every bin and the remainder
/// is handed out as `+1` to bins `0..remainder` in index order. The
/// hardware distributes the remainder exactly this way; any other policy
/// (round-robin from another start index, largest-bins-first) produces a
/// golden-vs-RTL mismatch even though it is equally "uniform".
///
/// Total count is conserved exactly. Callers guarantee `clip_limit > 0`
/// (enforced at configuration validation).
pub fn clip_histogram(hist: &Histogram, clip_limit: u32) -> Histogram {
    let mut clipped = *hist;
    let mut total_excess = 0u64;
    for bin in clipped.iter_mut() {
        if *bin > clip_limit {
            total_excess += (*bin - clip_limit) as u64;
            *bin = clip_limit;
        }
    }
    if total_excess == 0 {
        return clipped;
    }

    let avg_increment = (total_excess / BINS as u64) as u32;
    let remainder = (total_excess % BINS as u64) as usize;
    for (i, bin) in clipped.iter_mut().enumerate() {
        *bin += avg_increment;
        if i < remainder {
            *bin += 1;
        }
    }
    clipped
}
