//! Pairwise Euclidean distances between the rows of a matrix.
//!
//! Used for the per-iteration distances of a configuration and for the
//! estimator's `euclidean` dissimilarity mode. Results are exactly symmetric
//! with an exact zero diagonal.
use ndarray::{Array2, ArrayView2, Zip};

/// N×N Euclidean distance matrix of the rows of `x`.
pub fn euclidean_distances(x: ArrayView2<f64>) -> Array2<f64> {
    let n = x.nrows();
    let mut out = Array2::<f64>::zeros((n, n));
    euclidean_distances_into(x, &mut out);
    out
}

/// Write the Euclidean distances of the rows of `x` into `out` (N×N).
///
/// Only the strict upper triangle is computed; it is mirrored into the lower
/// triangle and the diagonal is set to zero.
pub fn euclidean_distances_into(x: ArrayView2<f64>, out: &mut Array2<f64>) {
    let n = x.nrows();
    for i in 0..n {
        out[[i, i]] = 0.0;
        let xi = x.row(i);
        for j in (i + 1)..n {
            let mut sq = 0.0;
            Zip::from(&xi).and(&x.row(j)).for_each(|&a, &b| {
                let diff = a - b;
                sq += diff * diff;
            });
            let d = sq.sqrt();
            out[[i, j]] = d;
            out[[j, i]] = d;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn euclidean_distances_match_hand_computed_values() {
        let x = array![[0.0, 0.0], [3.0, 4.0], [0.0, 1.0]];

        let d = euclidean_distances(x.view());

        assert_relative_eq!(d[[0, 1]], 5.0);
        assert_relative_eq!(d[[0, 2]], 1.0);
        assert_relative_eq!(d[[1, 2]], 18.0_f64.sqrt());
        for i in 0..3 {
            assert_eq!(d[[i, i]], 0.0);
            for j in 0..3 {
                assert_eq!(d[[i, j]], d[[j, i]]);
            }
        }
    }

    #[test]
    fn coincident_rows_have_zero_distance() {
        let x = array![[1.0, 2.0, 3.0], [1.0, 2.0, 3.0]];
        assert_eq!(euclidean_distances(x.view()), Array2::<f64>::zeros((2, 2)));
    }
}
