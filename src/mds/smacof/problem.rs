//! mds::smacof::problem — validated SMACOF problem and the single-run loop.
//!
//! Purpose
//! -------
//! Hold everything about a SMACOF fit that does not change between restarts
//! (symmetrized dissimilarities, metric flag, validated weights and the
//! pseudo-inverse of their Laplacian, the constrained pairs of the monotone
//! regression) and run the majorization loop from one starting
//! configuration.
//!
//! Key behaviors
//! -------------
//! - [`SmacofProblem::new`] validates once: symmetry within tolerance,
//!   finiteness, weight shape and sign. `V⁺` is computed here and never again.
//! - [`SmacofProblem::run`] draws (or copies) a starting configuration and
//!   iterates distances → disparities → stress → Guttman transform →
//!   convergence check, up to `max_iter` times.
//!
//! Invariants & assumptions
//! ------------------------
//! - The problem is immutable after construction and `Sync`; restarts only
//!   read it. All loop state lives in a per-run [`SmacofWorkspace`].
//! - Zero embedded distances are replaced by [`DISTANCE_FLOOR`] before
//!   dividing; a singular `V` is handled by the pseudo-inverse. Neither case
//!   raises.
//! - Stress is reported before the Guttman update of the iteration that
//!   produced it; the returned embedding is the one after that update.
//!
//! Conventions
//! -----------
//! - Stress is the raw `½ Σ_{i,j} (dis − disparities)²` over all N² entries.
//! - Convergence compares `previous − stress/scale < eps`, where `scale` is
//!   the sum of the row norms of the updated configuration. The comparison is
//!   signed, so a growing normalized stress also stops the run.
//!
//! Testing notes
//! -------------
//! - Unit tests exercise the exact-embedding fixed point, the nonmetric
//!   disparity normalization and unit-weight agreement with the unweighted
//!   transform. Property tests over seeds live in `tests/`.
use crate::mds::{
    core::{
        distance::euclidean_distances_into,
        isotonic::isotonic_regression,
        linalg::{pseudo_inverse, weight_laplacian},
        options::SmacofOptions,
        validation::{check_symmetric, validate_init, validate_weight},
    },
    errors::MDSResult,
    smacof::{
        types::{DISTANCE_FLOOR, SmacofRun},
        workspace::SmacofWorkspace,
    },
};
use log::{debug, trace};
use ndarray::{Array2, ArrayView2, Zip};
use rand::Rng;

/// Validated weights together with the pseudo-inverse of their Laplacian.
#[derive(Debug, Clone)]
struct Weighting {
    weight: Array2<f64>,
    v_pinv: Array2<f64>,
}

/// SmacofProblem — immutable inputs of a SMACOF fit.
#[derive(Debug, Clone)]
pub struct SmacofProblem {
    dissimilarities: Array2<f64>,
    metric: bool,
    weighting: Option<Weighting>,
    /// Strict-upper-triangle positions with nonzero dissimilarity (nonmetric).
    constrained: Vec<(usize, usize)>,
    /// Dissimilarities at `constrained`, in the same order.
    sim_flat_w: Vec<f64>,
}

impl SmacofProblem {
    /// Validate the inputs and precompute the restart-invariant quantities.
    ///
    /// # Errors
    /// - Shape/validation errors from
    ///   [`check_symmetric`](crate::mds::core::validation::check_symmetric) and
    ///   [`validate_weight`](crate::mds::core::validation::validate_weight).
    /// - [`MDSError::PseudoInverse`](crate::mds::errors::MDSError::PseudoInverse)
    ///   if the SVD backend rejects its tolerance.
    pub fn new(
        dissimilarities: ArrayView2<f64>, metric: bool, weight: Option<ArrayView2<f64>>,
    ) -> MDSResult<Self> {
        let dissimilarities = check_symmetric(dissimilarities)?;
        let n = dissimilarities.nrows();

        let weighting = weight
            .map(|w| -> MDSResult<Weighting> {
                let weight = validate_weight(w, n)?;
                let v_pinv = pseudo_inverse(weight_laplacian(weight.view()).view())?;
                Ok(Weighting { weight, v_pinv })
            })
            .transpose()?;

        let mut constrained = Vec::new();
        let mut sim_flat_w = Vec::new();
        if !metric {
            for i in 0..n {
                for j in (i + 1)..n {
                    let d = dissimilarities[[i, j]];
                    if d != 0.0 {
                        constrained.push((i, j));
                        sim_flat_w.push(d);
                    }
                }
            }
        }

        Ok(Self { dissimilarities, metric, weighting, constrained, sim_flat_w })
    }

    pub fn n_samples(&self) -> usize {
        self.dissimilarities.nrows()
    }

    /// Symmetrized dissimilarity matrix used by every run.
    pub fn dissimilarities(&self) -> ArrayView2<'_, f64> {
        self.dissimilarities.view()
    }

    pub fn is_metric(&self) -> bool {
        self.metric
    }

    pub fn is_weighted(&self) -> bool {
        self.weighting.is_some()
    }

    /// Run SMACOF once from `init` (or from a uniform draw on `[0, 1)`).
    ///
    /// Parameters
    /// ----------
    /// - `options`: uses `n_components`, `max_iter` and `eps`. When `init` is
    ///   given its column count overrides `n_components`.
    /// - `init`: optional N×p starting configuration; copied, never aliased.
    /// - `rng`: source of the random start, consumed row-major.
    ///
    /// Errors
    /// ------
    /// - [`MDSError::InitShapeMismatch`](crate::mds::errors::MDSError::InitShapeMismatch)
    ///   or a non-finite error for a malformed `init`.
    pub fn run<R: Rng>(
        &self, options: &SmacofOptions, init: Option<ArrayView2<f64>>, rng: &mut R,
    ) -> MDSResult<SmacofRun> {
        let n = self.n_samples();
        let mut x = match init {
            Some(init) => validate_init(init, n)?,
            None => Array2::from_shape_simple_fn((n, options.n_components), || rng.random::<f64>()),
        };

        let mut ws = SmacofWorkspace::new(n);
        let mut previous: Option<f64> = None;
        let mut stress = 0.0;
        let mut n_iter = options.max_iter;

        for it in 0..options.max_iter {
            euclidean_distances_into(x.view(), &mut ws.distances);
            self.fill_disparities(&mut ws);
            stress = raw_stress(&ws.distances, &ws.disparities);
            x = self.guttman_transform(&x, &mut ws);

            let scale: f64 = x.rows().into_iter().map(|row| row.dot(&row).sqrt()).sum();
            let normalized = stress / scale;
            trace!("smacof it {it}: stress = {stress:.6e}, normalized = {normalized:.6e}");

            if let Some(prev) = previous {
                if prev - normalized < options.eps {
                    debug!("smacof converged at it {it}: stress = {stress:.6e}");
                    n_iter = it + 1;
                    break;
                }
            }
            previous = Some(normalized);
        }

        Ok(SmacofRun::new(x, stress, n_iter))
    }

    // ---- Helper methods ----

    fn fill_disparities(&self, ws: &mut SmacofWorkspace) {
        if self.metric {
            ws.disparities.assign(&self.dissimilarities);
            return;
        }

        let observed: Vec<f64> = self.constrained.iter().map(|&(i, j)| ws.distances[[i, j]]).collect();
        let fitted = isotonic_regression(&self.sim_flat_w, &observed);

        ws.disparities.assign(&ws.distances);
        for (&(i, j), &value) in self.constrained.iter().zip(&fitted) {
            ws.disparities[[i, j]] = value;
        }

        let sum_sq: f64 = ws.disparities.iter().map(|v| v * v).sum();
        if sum_sq > 0.0 {
            let n = self.n_samples() as f64;
            ws.disparities *= (n * (n - 1.0) / 2.0 / sum_sq).sqrt();
        }
    }

    fn guttman_transform(&self, x: &Array2<f64>, ws: &mut SmacofWorkspace) -> Array2<f64> {
        ws.distances.mapv_inplace(|d| if d == 0.0 { DISTANCE_FLOOR } else { d });

        match &self.weighting {
            None => Zip::from(&mut ws.b)
                .and(&ws.disparities)
                .and(&ws.distances)
                .for_each(|b, &disp, &dis| *b = -(disp / dis)),
            Some(weighting) => Zip::from(&mut ws.b)
                .and(&weighting.weight)
                .and(&ws.disparities)
                .and(&ws.distances)
                .for_each(|b, &w, &disp, &dis| *b = -(w * disp / dis)),
        }
        for i in 0..ws.b.nrows() {
            let row_sum = ws.b.row(i).sum();
            ws.b[[i, i]] -= row_sum;
        }

        let bx = ws.b.dot(x);
        match &self.weighting {
            None => bx / (self.n_samples() as f64),
            Some(weighting) => weighting.v_pinv.dot(&bx),
        }
    }
}

fn raw_stress(distances: &Array2<f64>, disparities: &Array2<f64>) -> f64 {
    0.5 * Zip::from(distances).and(disparities).fold(0.0, |acc, &d, &p| acc + (d - p) * (d - p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mds::core::distance::euclidean_distances;
    use approx::assert_abs_diff_eq;
    use ndarray::{Axis, array};
    use rand::{SeedableRng, rngs::StdRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The exact-embedding fixed point of the unweighted transform.
    // - Nonmetric disparities: monotone in the dissimilarities and scaled to
    //   a sum of squares of N(N−1)/2.
    // - Unit weights reproducing the unweighted path.
    // - Shared-problem metadata (metric / weighted flags).
    // -------------------------------------------------------------------------

    fn square_config() -> Array2<f64> {
        array![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.5, 2.0]]
    }

    #[test]
    // Purpose
    // -------
    // Verify that an exact embedding is a fixed point up to centering and that
    // the run stops on the second iteration.
    //
    // Given
    // -----
    // - D = Euclidean distances of a 5-point planar configuration X₀.
    // - init = X₀, metric, eps = 1e-3.
    //
    // Expect
    // ------
    // - stress ≈ 0, n_iter = 2, embedding = X₀ minus its column means.
    fn exact_embedding_is_a_centered_fixed_point() {
        // Arrange
        let x0 = square_config();
        let d = euclidean_distances(x0.view());
        let problem = SmacofProblem::new(d.view(), true, None).unwrap();
        let options = SmacofOptions { n_init: 1, ..SmacofOptions::default() };
        let mut rng = StdRng::seed_from_u64(0);

        // Act
        let run = problem.run(&options, Some(x0.view()), &mut rng).unwrap();

        // Assert
        assert_abs_diff_eq!(run.stress, 0.0, epsilon = 1e-20);
        assert_eq!(run.n_iter, 2);
        let mean = x0.mean_axis(Axis(0)).unwrap();
        let centered = &x0 - &mean;
        for (a, b) in run.embedding.iter().zip(centered.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the nonmetric disparity step in isolation.
    //
    // Given
    // -----
    // - Dissimilarities ranking pairs differently from the current distances.
    //
    // Expect
    // ------
    // - Upper-triangle disparities are non-decreasing in dissimilarity order.
    // - The full matrix has sum of squares N(N−1)/2.
    fn nonmetric_disparities_are_monotone_and_normalized() {
        // Arrange
        let d = array![
            [0.0, 1.0, 4.0, 2.0],
            [1.0, 0.0, 3.0, 6.0],
            [4.0, 3.0, 0.0, 5.0],
            [2.0, 6.0, 5.0, 0.0]
        ];
        let problem = SmacofProblem::new(d.view(), false, None).unwrap();
        let config = array![[0.0, 0.0], [3.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        let mut ws = SmacofWorkspace::new(4);
        euclidean_distances_into(config.view(), &mut ws.distances);

        // Act
        problem.fill_disparities(&mut ws);

        // Assert
        let sum_sq: f64 = ws.disparities.iter().map(|v| v * v).sum();
        assert_abs_diff_eq!(sum_sq, 6.0, epsilon = 1e-12);

        let mut pairs: Vec<(f64, f64)> =
            problem.constrained.iter().map(|&(i, j)| (d[[i, j]], ws.disparities[[i, j]])).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        assert!(pairs.windows(2).all(|w| w[0].1 <= w[1].1 + 1e-12));
    }

    #[test]
    fn unit_weights_match_unweighted_transform() {
        let x0 = square_config();
        let d = euclidean_distances(x0.view()).mapv(|v| v * 1.3 + 0.1);
        let d = &d - &Array2::from_diag(&d.diag());
        let ones = Array2::<f64>::ones((5, 5));
        let plain = SmacofProblem::new(d.view(), true, None).unwrap();
        let weighted = SmacofProblem::new(d.view(), true, Some(ones.view())).unwrap();
        let options = SmacofOptions { max_iter: 10, eps: -1.0, ..SmacofOptions::default() };

        let a = plain.run(&options, None, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = weighted.run(&options, None, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(a.n_iter, 10);
        assert_eq!(b.n_iter, 10);
        assert_abs_diff_eq!(a.stress, b.stress, epsilon = 1e-9);
        for (p, q) in a.embedding.iter().zip(b.embedding.iter()) {
            assert_abs_diff_eq!(*p, *q, epsilon = 1e-9);
        }
    }

    #[test]
    fn problem_reports_its_mode() {
        let d = array![[0.0, 1.0], [1.0, 0.0]];
        let w = array![[0.0, 2.0], [2.0, 0.0]];
        let problem = SmacofProblem::new(d.view(), false, Some(w.view())).unwrap();
        assert!(!problem.is_metric());
        assert!(problem.is_weighted());
        assert_eq!(problem.n_samples(), 2);
        assert_eq!(problem.dissimilarities(), d.view());
    }
}
