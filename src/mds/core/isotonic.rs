//! mds::core::isotonic — monotone (isotonic) least-squares regression.
//!
//! Purpose
//! -------
//! Fit the non-decreasing step function of `x` closest to `y` in least
//! squares and return its values at the input points. This is the disparity
//! step of nonmetric SMACOF: `x` are the observed dissimilarities, `y` the
//! current embedded distances.
//!
//! Key behaviors
//! -------------
//! - Points are ordered by `x` (ties broken by `y`), tied `x` values are
//!   pooled into a single weighted block, and the pool-adjacent-violators
//!   algorithm (PAVA) merges blocks until block means are non-decreasing.
//! - Every input point receives the fitted value of its block, in the
//!   caller's original order.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x.len() == y.len()`; an empty input yields an empty output.
//! - Sorting uses `f64::total_cmp`, so the routine never panics on NaN,
//!   although NaN input has no meaningful fit.
//! - Points with equal `x` always receive equal fitted values.
//!
//! Performance
//! -----------
//! - `O(m log m)` for the sort plus `O(m)` for PAVA, with `m = x.len()`.

/// Pooled block used by PAVA: weighted mean of `weight` points.
#[derive(Debug, Clone, Copy)]
struct Block {
    value: f64,
    weight: f64,
    /// Number of distinct-`x` groups covered by the block.
    groups: usize,
}

/// Isotonic (non-decreasing) regression of `y` on `x`.
///
/// Returns the fitted value for every input point, in input order.
pub fn isotonic_regression(x: &[f64], y: &[f64]) -> Vec<f64> {
    debug_assert_eq!(x.len(), y.len(), "isotonic regression needs paired inputs");
    let m = x.len().min(y.len());
    if m == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| x[a].total_cmp(&x[b]).then(y[a].total_cmp(&y[b])));

    // Group tied x values: (start, end) ranges into `order`.
    let mut groups: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for k in 1..=m {
        if k == m || x[order[k]] != x[order[start]] {
            groups.push((start, k));
            start = k;
        }
    }

    let mut blocks: Vec<Block> = Vec::with_capacity(groups.len());
    for &(lo, hi) in &groups {
        let weight = (hi - lo) as f64;
        let mean = order[lo..hi].iter().map(|&i| y[i]).sum::<f64>() / weight;
        let mut current = Block { value: mean, weight, groups: 1 };
        while let Some(prev) = blocks.last() {
            if prev.value <= current.value {
                break;
            }
            let total = prev.weight + current.weight;
            current = Block {
                value: (prev.value * prev.weight + current.value * current.weight) / total,
                weight: total,
                groups: prev.groups + current.groups,
            };
            blocks.pop();
        }
        blocks.push(current);
    }

    let mut fitted = vec![0.0; m];
    let mut group_iter = groups.iter();
    for block in &blocks {
        for &(lo, hi) in group_iter.by_ref().take(block.groups) {
            for &i in &order[lo..hi] {
                fitted[i] = block.value;
            }
        }
    }
    fitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Monotone input left untouched.
    // - Pooling of adjacent violators.
    // - Tied x values sharing one fitted value.
    // - Output returned in the caller's order for unsorted x.
    // -------------------------------------------------------------------------

    #[test]
    fn already_monotone_input_is_returned_unchanged() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [0.5, 1.0, 1.5, 3.0];
        assert_eq!(isotonic_regression(&x, &y), y.to_vec());
    }

    #[test]
    // Purpose
    // -------
    // Verify the classic PAVA pooling example.
    //
    // Given
    // -----
    // - x = 1..5, y = [1, 3, 2, 4, 3.5].
    //
    // Expect
    // ------
    // - Violating pairs are replaced by their means: [1, 2.5, 2.5, 3.75, 3.75].
    fn adjacent_violators_are_pooled() {
        // Arrange
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 3.0, 2.0, 4.0, 3.5];

        // Act
        let fitted = isotonic_regression(&x, &y);

        // Assert
        let expected = [1.0, 2.5, 2.5, 3.75, 3.75];
        for (f, e) in fitted.iter().zip(expected.iter()) {
            assert_relative_eq!(*f, *e);
        }
        assert!(fitted.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    // Purpose
    // -------
    // Ensure tied x values receive the same fitted value and that the output
    // follows the caller's (unsorted) order.
    //
    // Given
    // -----
    // - x = [2, 1, 2, 3] with y = [5, 0, 1, 4].
    //
    // Expect
    // ------
    // - Both x = 2 points fitted at mean(5, 1) = 3; x = 1 → 0; x = 3 → 4.
    fn tied_x_share_one_value_in_input_order() {
        let x = [2.0, 1.0, 2.0, 3.0];
        let y = [5.0, 0.0, 1.0, 4.0];

        let fitted = isotonic_regression(&x, &y);

        assert_relative_eq!(fitted[0], 3.0);
        assert_relative_eq!(fitted[1], 0.0);
        assert_relative_eq!(fitted[2], 3.0);
        assert_relative_eq!(fitted[3], 4.0);
    }

    #[test]
    fn decreasing_input_collapses_to_global_mean() {
        let x = [1.0, 2.0, 3.0];
        let y = [3.0, 2.0, 1.0];
        let fitted = isotonic_regression(&x, &y);
        for f in fitted {
            assert_relative_eq!(f, 2.0);
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(isotonic_regression(&[], &[]).is_empty());
    }
}
