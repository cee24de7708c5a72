//! mds::core::linalg — weight Laplacian and its Moore–Penrose pseudo-inverse.
//!
//! Purpose
//! -------
//! Provide the dense linear algebra that the weighted Guttman transform
//! needs: the weight Laplacian `V` assembled from a symmetric weight matrix
//! and its pseudo-inverse `V⁺`, computed once per problem.
//!
//! Key behaviors
//! -------------
//! - [`weight_laplacian`] sums every strict-upper-triangle pair `i < j`
//!   exactly once: `V[i,i] += w`, `V[j,j] += w`, `V[i,j] = V[j,i] −= w`.
//! - [`pseudo_inverse`] copies the matrix into a `nalgebra::DMatrix`, takes a
//!   thin SVD and zeroes singular values at or below
//!   `PINV_RCOND · σ_max`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The weight matrix passed to [`weight_laplacian`] is square and
//!   symmetric; diagonal weights are ignored.
//! - `V` is singular by construction (rows sum to zero), so only the
//!   pseudo-inverse is meaningful.
//!
//! Downstream usage
//! ----------------
//! - `SmacofProblem::new` builds `V⁺` once and shares it read-only across
//!   all restarts.
use crate::mds::errors::{MDSError, MDSResult};
use nalgebra::{DMatrix, SVD};
use ndarray::{Array2, ArrayView2};

/// Relative cutoff on singular values when forming `V⁺`.
pub const PINV_RCOND: f64 = 1e-15;

/// Weight Laplacian `V` of a symmetric weight matrix.
pub fn weight_laplacian(weight: ArrayView2<f64>) -> Array2<f64> {
    let n = weight.nrows();
    let mut v = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let w = weight[[i, j]];
            v[[i, i]] += w;
            v[[j, j]] += w;
            v[[i, j]] -= w;
            v[[j, i]] -= w;
        }
    }
    v
}

/// Moore–Penrose pseudo-inverse of a square matrix via SVD.
///
/// # Errors
/// - [`MDSError::PseudoInverse`] if the SVD does not yield both singular
///   vector sets.
pub fn pseudo_inverse(matrix: ArrayView2<f64>) -> MDSResult<Array2<f64>> {
    let n = matrix.nrows();
    let mut nalg = DMatrix::<f64>::zeros(n, matrix.ncols());
    fill_dmatrix(matrix, &mut nalg);

    let svd = SVD::new(nalg, true, true);
    let sigma_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let pinv = svd
        .pseudo_inverse(PINV_RCOND * sigma_max)
        .map_err(|reason| MDSError::PseudoInverse { reason })?;

    Ok(Array2::from_shape_fn((pinv.nrows(), pinv.ncols()), |(i, j)| pinv[(i, j)]))
}

// ---- Helper methods ----

/// Copy an `ndarray` matrix into a preallocated `DMatrix`, column by column.
fn fill_dmatrix(source: ArrayView2<f64>, target: &mut DMatrix<f64>) {
    let (rows, cols) = source.dim();
    for j in 0..cols {
        for i in 0..rows {
            target[(i, j)] = source[[i, j]];
        }
    }
}
