//! mds::errors — unified error surface for weighted SMACOF MDS.
//!
//! Purpose
//! -------
//! Provide a single error enum and result alias for every fallible routine in
//! the `mds` tree: input validation (symmetry, finiteness, option ranges),
//! shape checks (square matrices, starting configurations, weight stacks), and
//! the few numerical backends that can report failure (SVD tolerance, thread
//! pool construction).
//!
//! Key behaviors
//! -------------
//! - Define [`MDSError`] with struct-like variants carrying the offending
//!   values so diagnostics are meaningful without extra context.
//! - Classify each variant into [`MDSErrorKind`] (`Validation`, `Shape`,
//!   `Numerical`) so callers can branch on the error family instead of the
//!   exact variant.
//! - Under the `python-bindings` feature, convert into `PyErr`
//!   (`ValueError` for validation/shape failures, `RuntimeError` otherwise).
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors are raised immediately and never retried; they indicate malformed
//!   input contracts rather than transient conditions.
//! - Numerical edge cases inside the iteration (zero distances, singular `V`)
//!   are handled in-algorithm and never surface here.
//!
//! Conventions
//! -----------
//! - Indices are 0-based (row, col) in the matrix being validated.
//! - Shapes are reported as `(rows, cols)` tuples.
//!
//! Testing notes
//! -------------
//! - Unit tests check that `Display` messages embed their payloads and that
//!   `kind()` maps each family correctly.

#[cfg(feature = "python-bindings")]
use pyo3::{
    PyErr,
    exceptions::{PyRuntimeError, PyValueError},
};

/// Crate-wide result alias for MDS operations.
pub type MDSResult<T> = Result<T, MDSError>;

/// Error family used to classify [`MDSError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MDSErrorKind {
    /// Input values violate a contract (asymmetry, non-finite, bad option).
    Validation,
    /// Input dimensions are inconsistent.
    Shape,
    /// A numerical backend reported failure.
    Numerical,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MDSError {
    // ---- Validation ----
    /// Dissimilarity matrix is not symmetric within tolerance.
    AsymmetricDissimilarity { row: usize, col: usize, upper: f64, lower: f64 },

    /// Weight matrix is not symmetric within tolerance.
    AsymmetricWeight { row: usize, col: usize, upper: f64, lower: f64 },

    /// A matrix entry is NaN or ±inf.
    NonFiniteEntry { name: &'static str, row: usize, col: usize, value: f64 },

    /// A weight entry is negative.
    NegativeWeight { row: usize, col: usize, value: f64 },

    /// Square matrix handed to the condensed form has a nonzero diagonal.
    NonZeroDiagonal { index: usize, value: f64 },

    /// Dissimilarity source name is not recognized.
    UnknownDissimilarity { name: String },

    /// Target dimensionality must be at least one.
    InvalidComponents { n_components: usize, reason: &'static str },

    /// Number of restarts must be at least one.
    InvalidNInit { n_init: usize, reason: &'static str },

    /// Maximum iterations must be at least one.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// Convergence tolerance must be finite.
    InvalidEps { eps: f64, reason: &'static str },

    /// Worker count could not be interpreted.
    InvalidParallelism { n_jobs: isize, reason: &'static str },

    /// Fitted attributes were requested before `fit`.
    ModelNotFitted,

    // ---- Shape ----
    /// Matrix expected to be square.
    NotSquare { name: &'static str, rows: usize, cols: usize },

    /// Input contains no items.
    EmptyInput { name: &'static str },

    /// Starting configuration row count does not match the number of items.
    InitShapeMismatch { expected: usize, found: (usize, usize) },

    /// Weight matrix shape does not match the dissimilarity matrix.
    WeightShapeMismatch { expected: usize, found: (usize, usize) },

    /// Condensed vector length is not of the form n(n-1)/2.
    CondensedLength { len: usize },

    /// Weight stack rank is neither 2 (condensed) nor 3 (square).
    InvalidWeightRank { rank: usize },

    // ---- Numerical ----
    /// Pseudo-inverse backend rejected its input.
    PseudoInverse { reason: &'static str },

    /// Dedicated worker pool could not be built.
    ThreadPool { text: String },
}

impl MDSError {
    /// Error family of this variant.
    pub fn kind(&self) -> MDSErrorKind {
        match self {
            MDSError::AsymmetricDissimilarity { .. }
            | MDSError::AsymmetricWeight { .. }
            | MDSError::NonFiniteEntry { .. }
            | MDSError::NegativeWeight { .. }
            | MDSError::NonZeroDiagonal { .. }
            | MDSError::UnknownDissimilarity { .. }
            | MDSError::InvalidComponents { .. }
            | MDSError::InvalidNInit { .. }
            | MDSError::InvalidMaxIter { .. }
            | MDSError::InvalidEps { .. }
            | MDSError::InvalidParallelism { .. }
            | MDSError::ModelNotFitted => MDSErrorKind::Validation,
            MDSError::NotSquare { .. }
            | MDSError::EmptyInput { .. }
            | MDSError::InitShapeMismatch { .. }
            | MDSError::WeightShapeMismatch { .. }
            | MDSError::CondensedLength { .. }
            | MDSError::InvalidWeightRank { .. } => MDSErrorKind::Shape,
            MDSError::PseudoInverse { .. } | MDSError::ThreadPool { .. } => {
                MDSErrorKind::Numerical
            }
        }
    }
}

impl std::error::Error for MDSError {}

impl std::fmt::Display for MDSError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Validation ----
            MDSError::AsymmetricDissimilarity { row, col, upper, lower } => {
                write!(
                    f,
                    "Dissimilarity matrix is not symmetric: D[{row}, {col}] = {upper}, D[{col}, {row}] = {lower}"
                )
            }
            MDSError::AsymmetricWeight { row, col, upper, lower } => {
                write!(
                    f,
                    "Weight matrix is not symmetric: W[{row}, {col}] = {upper}, W[{col}, {row}] = {lower}"
                )
            }
            MDSError::NonFiniteEntry { name, row, col, value } => {
                write!(f, "Non-finite {name} entry at ({row}, {col}): {value}")
            }
            MDSError::NegativeWeight { row, col, value } => {
                write!(f, "Negative weight at ({row}, {col}): {value}, must be non-negative")
            }
            MDSError::NonZeroDiagonal { index, value } => {
                write!(f, "Nonzero diagonal entry at index {index}: {value}")
            }
            MDSError::UnknownDissimilarity { name } => {
                write!(f, "Dissimilarity must be 'precomputed' or 'euclidean'. Got '{name}' instead")
            }
            MDSError::InvalidComponents { n_components, reason } => {
                write!(f, "Invalid number of components {n_components}: {reason}")
            }
            MDSError::InvalidNInit { n_init, reason } => {
                write!(f, "Invalid number of initializations {n_init}: {reason}")
            }
            MDSError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            MDSError::InvalidEps { eps, reason } => {
                write!(f, "Invalid convergence tolerance {eps}: {reason}")
            }
            MDSError::InvalidParallelism { n_jobs, reason } => {
                write!(f, "Invalid n_jobs {n_jobs}: {reason}")
            }
            MDSError::ModelNotFitted => {
                write!(f, "Model has not been fitted yet; call fit first")
            }

            // ---- Shape ----
            MDSError::NotSquare { name, rows, cols } => {
                write!(f, "{name} must be square, got shape ({rows}, {cols})")
            }
            MDSError::EmptyInput { name } => {
                write!(f, "{name} must contain at least one item")
            }
            MDSError::InitShapeMismatch { expected, found } => {
                write!(
                    f,
                    "init matrix should have {expected} rows, found shape ({}, {})",
                    found.0, found.1
                )
            }
            MDSError::WeightShapeMismatch { expected, found } => {
                write!(
                    f,
                    "Weight matrix shape mismatch: expected ({expected}, {expected}), found ({}, {})",
                    found.0, found.1
                )
            }
            MDSError::CondensedLength { len } => {
                write!(f, "Condensed vector length {len} is not n(n-1)/2 for any integer n")
            }
            MDSError::InvalidWeightRank { rank } => {
                write!(f, "Weight stack must be 2-D (condensed) or 3-D (square), got {rank}-D")
            }

            // ---- Numerical ----
            MDSError::PseudoInverse { reason } => {
                write!(f, "Pseudo-inverse failed: {reason}")
            }
            MDSError::ThreadPool { text } => {
                write!(f, "Could not build worker pool: {text}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<MDSError> for PyErr {
    fn from(err: MDSError) -> PyErr {
        match err.kind() {
            MDSErrorKind::Validation | MDSErrorKind::Shape => PyValueError::new_err(err.to_string()),
            MDSErrorKind::Numerical => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `Display` messages.
    // - The Validation / Shape / Numerical classification of `kind()`.
    //
    // They intentionally DO NOT cover:
    // - The `From<MDSError> for PyErr` conversion, which needs the Python C API.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that the asymmetry message reports both mirrored entries.
    //
    // Given
    // -----
    // - An `AsymmetricDissimilarity` error at (0, 1) with values 1.5 / 2.5.
    //
    // Expect
    // ------
    // - The message contains both values and both index pairs.
    fn asymmetric_dissimilarity_display_includes_both_entries() {
        // Arrange
        let err = MDSError::AsymmetricDissimilarity { row: 0, col: 1, upper: 1.5, lower: 2.5 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("1.5") && msg.contains("2.5"), "Got: {msg}");
        assert!(msg.contains("D[0, 1]") && msg.contains("D[1, 0]"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `kind()` classifies one representative of each family.
    //
    // Given
    // -----
    // - An unknown dissimilarity name, an init row mismatch, and an SVD failure.
    //
    // Expect
    // ------
    // - Validation, Shape and Numerical respectively.
    fn kind_classifies_each_error_family() {
        // Arrange
        let validation = MDSError::UnknownDissimilarity { name: "cosine".to_string() };
        let shape = MDSError::InitShapeMismatch { expected: 4, found: (3, 2) };
        let numerical = MDSError::PseudoInverse { reason: "negative tolerance" };

        // Act / Assert
        assert_eq!(validation.kind(), MDSErrorKind::Validation);
        assert_eq!(shape.kind(), MDSErrorKind::Shape);
        assert_eq!(numerical.kind(), MDSErrorKind::Numerical);
    }

    #[test]
    fn condensed_length_display_includes_length() {
        let msg = MDSError::CondensedLength { len: 7 }.to_string();
        assert!(msg.contains('7'), "Got: {msg}");
    }
}
