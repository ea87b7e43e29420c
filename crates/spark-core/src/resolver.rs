//! Nearest-sample lookup for hover tracking
//!
//! Bisects a time-sorted series for the pair of samples straddling a query
//! instant and picks the closer one. An exact tie goes to the later sample.

use crate::Sample;

/// Leftmost index `i` in `lo..samples.len()` with `samples[i].timestamp >= query`
fn bisect_left(samples: &[Sample], query: i64, lo: usize) -> usize {
    let lo = lo.min(samples.len());
    lo + samples[lo..].partition_point(|s| s.timestamp < query)
}

/// Index of the sample nearest to `query` (unix millis)
///
/// The search never starts below index 1, so a query before the second sample
/// always compares `samples[0]` against `samples[1]`.
pub fn resolve_index(samples: &[Sample], query: i64) -> Option<usize> {
    match samples.len() {
        0 => None,
        1 => Some(0),
        len => {
            let i = bisect_left(samples, query, 1);
            if i >= len {
                return Some(len - 1);
            }

            let left_gap = query as i128 - samples[i - 1].timestamp as i128;
            let right_gap = samples[i].timestamp as i128 - query as i128;

            if right_gap > left_gap {
                Some(i - 1)
            } else {
                Some(i)
            }
        }
    }
}

/// Sample nearest to `query` (unix millis), `None` only for an empty series
pub fn resolve(samples: &[Sample], query: i64) -> Option<&Sample> {
    let index = resolve_index(samples, query)?;
    tracing::trace!(query, index, "resolved hover sample");
    samples.get(index)
}
