//! mds::core::validation — input guards for dissimilarities, weights and inits.
//!
//! Purpose
//! -------
//! Centralize the checks that every SMACOF entry point performs before the
//! first iteration: square shape, finiteness, symmetry within tolerance,
//! non-negative weights and starting-configuration dimensions.
//!
//! Key behaviors
//! -------------
//! - [`check_symmetric`] validates a square matrix against its transpose with
//!   `|A − Aᵀ| ≤ SYM_ATOL + SYM_RTOL·|Aᵀ|` and returns the symmetrized copy
//!   `(A + Aᵀ)/2`, so round-off asymmetry is repaired but genuine asymmetry
//!   is rejected.
//! - [`validate_weight`] applies the same symmetry rule to a weight matrix and
//!   additionally requires non-negative entries and a shape matching `n`.
//! - [`validate_init`] checks a starting configuration against `n` rows and
//!   returns an owned copy, never an alias of the caller's buffer.
//!
//! Invariants & assumptions
//! ------------------------
//! - Validation happens once per problem, before any iteration executes.
//! - All returned matrices are owned and finite.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and the symmetrization of
//!   near-symmetric input.
use crate::mds::errors::{MDSError, MDSResult};
use ndarray::{Array2, ArrayView2};

/// Absolute tolerance of the symmetry check.
pub const SYM_ATOL: f64 = 1e-10;
/// Relative tolerance of the symmetry check.
pub const SYM_RTOL: f64 = 1e-5;

/// Validate a square, finite, symmetric matrix and return `(A + Aᵀ)/2`.
///
/// # Errors
/// - [`MDSError::NotSquare`] / [`MDSError::EmptyInput`] on bad shape.
/// - [`MDSError::NonFiniteEntry`] for NaN/±inf entries.
/// - [`MDSError::AsymmetricDissimilarity`] at the first offending pair.
pub fn check_symmetric(matrix: ArrayView2<f64>) -> MDSResult<Array2<f64>> {
    validate_square(matrix, "dissimilarity matrix")?;
    validate_finite(matrix, "dissimilarity")?;
    if let Some((row, col)) = first_asymmetry(matrix) {
        return Err(MDSError::AsymmetricDissimilarity {
            row,
            col,
            upper: matrix[[row, col]],
            lower: matrix[[col, row]],
        });
    }
    Ok(symmetrize(matrix))
}

/// Validate an optional weight matrix against `n` items.
///
/// # Errors
/// - [`MDSError::WeightShapeMismatch`] if the shape is not `(n, n)`.
/// - [`MDSError::NonFiniteEntry`] / [`MDSError::NegativeWeight`] for bad entries.
/// - [`MDSError::AsymmetricWeight`] at the first offending pair.
pub fn validate_weight(weight: ArrayView2<f64>, n: usize) -> MDSResult<Array2<f64>> {
    let (rows, cols) = weight.dim();
    if rows != n || cols != n {
        return Err(MDSError::WeightShapeMismatch { expected: n, found: (rows, cols) });
    }
    validate_finite(weight, "weight")?;
    if let Some(((row, col), &value)) = weight.indexed_iter().find(|(_, w)| **w < 0.0) {
        return Err(MDSError::NegativeWeight { row, col, value });
    }
    if let Some((row, col)) = first_asymmetry(weight) {
        return Err(MDSError::AsymmetricWeight {
            row,
            col,
            upper: weight[[row, col]],
            lower: weight[[col, row]],
        });
    }
    Ok(symmetrize(weight))
}

/// Validate a starting configuration against `n` items and copy it.
///
/// # Errors
/// - [`MDSError::InitShapeMismatch`] if the row count differs from `n` or the
///   configuration has no columns.
/// - [`MDSError::NonFiniteEntry`] for NaN/±inf coordinates.
pub fn validate_init(init: ArrayView2<f64>, n: usize) -> MDSResult<Array2<f64>> {
    let (rows, cols) = init.dim();
    if rows != n || cols == 0 {
        return Err(MDSError::InitShapeMismatch { expected: n, found: (rows, cols) });
    }
    validate_finite(init, "init")?;
    Ok(init.to_owned())
}

pub(crate) fn validate_square(matrix: ArrayView2<f64>, name: &'static str) -> MDSResult<usize> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(MDSError::NotSquare { name, rows, cols });
    }
    if rows == 0 {
        return Err(MDSError::EmptyInput { name });
    }
    Ok(rows)
}

pub(crate) fn validate_finite(matrix: ArrayView2<f64>, name: &'static str) -> MDSResult<()> {
    match matrix.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(MDSError::NonFiniteEntry { name, row, col, value }),
        None => Ok(()),
    }
}

// ---- Helper methods ----

fn first_asymmetry(matrix: ArrayView2<f64>) -> Option<(usize, usize)> {
    let n = matrix.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            let a = matrix[[i, j]];
            let b = matrix[[j, i]];
            if (a - b).abs() > SYM_ATOL + SYM_RTOL * b.abs() {
                return Some((i, j));
            }
        }
    }
    None
}

fn symmetrize(matrix: ArrayView2<f64>) -> Array2<f64> {
    let mut out = matrix.to_owned();
    out += &matrix.t();
    out *= 0.5;
    out
}
