//! Per-run scratch buffers for the SMACOF loop.
//!
//! Every restart owns one [`SmacofWorkspace`]; buffers are overwritten in
//! place each iteration and never shared between runs.
use ndarray::Array2;

#[derive(Debug, Clone)]
pub struct SmacofWorkspace {
    /// Euclidean distances of the current configuration.
    pub distances: Array2<f64>,
    /// Target values for the current iteration.
    pub disparities: Array2<f64>,
    /// Guttman matrix `B(X)`.
    pub b: Array2<f64>,
}

impl SmacofWorkspace {
    pub fn new(n_samples: usize) -> Self {
        Self {
            distances: Array2::zeros((n_samples, n_samples)),
            disparities: Array2::zeros((n_samples, n_samples)),
            b: Array2::zeros((n_samples, n_samples)),
        }
    }
}
