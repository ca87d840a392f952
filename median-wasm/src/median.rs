//! Median engine.
//!
//! The median is always the mean of two order statistics. For odd lengths both
//! indices point at the same middle element, so averaging it with itself
//! returns it unchanged and the caller never branches on parity.

use crate::sample::Sample;

/// 1-based (lower, upper) order-statistic indices for a sample of length `n`.
///
/// Odd `n` selects `(n + 1) / 2` twice; even `n` selects `n / 2` and `n / 2 + 1`.
/// `n` must be at least 1.
pub fn order_statistic_indices(n: usize) -> (usize, usize) {
    if n % 2 == 0 {
        (n / 2, n / 2 + 1)
    } else {
        let mid = (n + 1) / 2;
        (mid, mid)
    }
}

/// Compute the median of `sample`.
///
/// Values stay `i32` through the sort and are widened to `f64` only when the
/// two order statistics are averaged, so the sum cannot overflow.
pub fn median(sample: Sample) -> f64 {
    let mut values = sample.into_vec();
    values.sort_unstable();

    let (lower, upper) = order_statistic_indices(values.len());
    let lo = f64::from(values[lower - 1]);
    let hi = f64::from(values[upper - 1]);
    let result = (lo + hi) / 2.0;

    tracing::debug!(count = values.len(), lower, upper, result, "computed median");
    result
}
