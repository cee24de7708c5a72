//! mds::core::weights — condensed ↔ square conversion and weight expansion.
//!
//! Purpose
//! -------
//! Turn batches of weight specifications into a uniform `B × N × N` stack of
//! full symmetric matrices, and provide the condensed-vector helpers that
//! sit underneath it.
//!
//! Key behaviors
//! -------------
//! - [`expand_weights`] accepts a dynamic-rank array: rank 2 is read as `B`
//!   condensed vectors, rank 3 as `B` square matrices (passed through); any
//!   other rank is a shape error.
//! - [`n_from_condensed`] inverts `L = N(N−1)/2` in closed form.
//! - [`condensed_to_square`] / [`square_to_condensed`] convert a single
//!   matrix; expanding a condensed matrix reproduces it exactly.
//!
//! Conventions
//! -----------
//! - Condensed vectors hold the strict upper triangle in row-major order:
//!   `(0,1), (0,2), …, (0,N−1), (1,2), …, (N−2,N−1)`.
//! - Expanded matrices have an exact zero diagonal.
use crate::mds::errors::{MDSError, MDSResult};
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayViewD, Axis, Ix2, Ix3};

/// Number of items `N` encoded by a condensed vector of length `len`.
///
/// # Errors
/// - [`MDSError::CondensedLength`] if no integer `N` satisfies `N(N−1)/2 = len`.
pub fn n_from_condensed(len: usize) -> MDSResult<usize> {
    let n = ((1.0 + (1.0 + 8.0 * len as f64).sqrt()) / 2.0).round() as usize;
    if n * (n - 1) / 2 != len {
        return Err(MDSError::CondensedLength { len });
    }
    Ok(n)
}

/// Expand a condensed vector into a symmetric zero-diagonal matrix.
pub fn condensed_to_square(vector: ArrayView1<f64>) -> MDSResult<Array2<f64>> {
    let n = n_from_condensed(vector.len())?;
    let mut square = Array2::<f64>::zeros((n, n));
    fill_square(vector, &mut square);
    Ok(square)
}

/// Compress a symmetric zero-diagonal matrix into its condensed vector.
///
/// # Errors
/// - [`MDSError::NotSquare`] if the matrix is not square.
/// - [`MDSError::NonZeroDiagonal`] if a diagonal entry is nonzero.
/// - [`MDSError::AsymmetricDissimilarity`] if `M[i,j] != M[j,i]`.
pub fn square_to_condensed(matrix: ArrayView2<f64>) -> MDSResult<Array1<f64>> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(MDSError::NotSquare { name: "square matrix", rows, cols });
    }
    if let Some((index, &value)) = matrix.diag().indexed_iter().find(|(_, v)| **v != 0.0) {
        return Err(MDSError::NonZeroDiagonal { index, value });
    }
    let mut condensed = Vec::with_capacity(rows * rows.saturating_sub(1) / 2);
    for i in 0..rows {
        for j in (i + 1)..rows {
            if matrix[[i, j]] != matrix[[j, i]] {
                return Err(MDSError::AsymmetricDissimilarity {
                    row: i,
                    col: j,
                    upper: matrix[[i, j]],
                    lower: matrix[[j, i]],
                });
            }
            condensed.push(matrix[[i, j]]);
        }
    }
    Ok(Array1::from(condensed))
}

/// Normalize a stack of weight specifications into `B × N × N` matrices.
///
/// Parameters
/// ----------
/// - `stack`: `ArrayViewD<f64>`
///   Either `B × L` (each row a condensed vector with `L = N(N−1)/2`) or
///   `B × N × N` (already expanded).
///
/// Returns
/// -------
/// `MDSResult<Array3<f64>>`
///   The expanded stack; rank-3 input is returned unchanged.
///
/// Errors
/// ------
/// - [`MDSError::CondensedLength`] if `L` is not triangular.
/// - [`MDSError::NotSquare`] if rank-3 input has unequal trailing axes.
/// - [`MDSError::InvalidWeightRank`] for any other rank.
pub fn expand_weights(stack: ArrayViewD<f64>) -> MDSResult<Array3<f64>> {
    match stack.ndim() {
        2 => {
            let vectors = stack.into_dimensionality::<Ix2>().map_err(|_| {
                MDSError::InvalidWeightRank { rank: 2 }
            })?;
            let (batch, len) = vectors.dim();
            let n = n_from_condensed(len)?;
            let mut matrices = Array3::<f64>::zeros((batch, n, n));
            for (vector, mut square) in
                vectors.axis_iter(Axis(0)).zip(matrices.axis_iter_mut(Axis(0)))
            {
                for_each_pair(n, |k, i, j| {
                    square[[i, j]] = vector[k];
                    square[[j, i]] = vector[k];
                });
            }
            Ok(matrices)
        }
        3 => {
            let matrices = stack.into_dimensionality::<Ix3>().map_err(|_| {
                MDSError::InvalidWeightRank { rank: 3 }
            })?;
            let (_, rows, cols) = matrices.dim();
            if rows != cols {
                return Err(MDSError::NotSquare { name: "weight matrix", rows, cols });
            }
            Ok(matrices.to_owned())
        }
        rank => Err(MDSError::InvalidWeightRank { rank }),
    }
}

// ---- Helper methods ----

fn fill_square(vector: ArrayView1<f64>, square: &mut Array2<f64>) {
    let n = square.nrows();
    for_each_pair(n, |k, i, j| {
        square[[i, j]] = vector[k];
        square[[j, i]] = vector[k];
    });
}

/// Visit every strict-upper-triangle pair with its condensed index.
fn for_each_pair<F: FnMut(usize, usize, usize)>(n: usize, mut f: F) {
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            f(k, i, j);
            k += 1;
        }
    }
}
