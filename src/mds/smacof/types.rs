//! Result type and numeric constants shared by the SMACOF routines.
use ndarray::Array2;

/// Substitute for zero embedded distances in the Guttman transform.
pub const DISTANCE_FLOOR: f64 = 1e-5;

/// SmacofRun — outcome of one SMACOF optimization (or the best of several).
///
/// - `embedding`: final N×p configuration (after the last Guttman update).
/// - `stress`: raw stress `½ Σ (dis − disparities)²` of the last evaluated
///   iteration.
/// - `n_iter`: iterations executed, in `1..=max_iter`.
#[derive(Debug, Clone, PartialEq)]
pub struct SmacofRun {
    pub embedding: Array2<f64>,
    pub stress: f64,
    pub n_iter: usize,
}

impl SmacofRun {
    pub fn new(embedding: Array2<f64>, stress: f64, n_iter: usize) -> Self {
        Self { embedding, stress, n_iter }
    }

    /// Consume the run and return the `(embedding, stress, n_iter)` triple.
    pub fn into_parts(self) -> (Array2<f64>, f64, usize) {
        (self.embedding, self.stress, self.n_iter)
    }
}
