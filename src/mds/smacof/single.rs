//! Single-run SMACOF entry point.
use crate::mds::{
    core::options::SmacofOptions,
    errors::MDSResult,
    smacof::{problem::SmacofProblem, types::SmacofRun},
};
use ndarray::ArrayView2;
use rand::Rng;

/// smacof_single — one SMACOF optimization from one starting configuration.
///
/// Parameters
/// ----------
/// - `dissimilarities`: `ArrayView2<f64>`
///   N×N dissimilarity matrix; symmetric within tolerance.
/// - `options`: `&SmacofOptions`
///   Uses `n_components`, `metric`, `max_iter` and `eps`; `n_init`,
///   `parallelism` and `seed` are ignored here.
/// - `init`: `Option<ArrayView2<f64>>`
///   Starting configuration with N rows. Its column count overrides
///   `n_components`.
/// - `rng`: `R`
///   Random source for the starting configuration, owned by this run.
/// - `weight`: `Option<ArrayView2<f64>>`
///   N×N non-negative symmetric weights; `None` is the unweighted update.
///
/// Returns
/// -------
/// `MDSResult<SmacofRun>`
///   Final configuration, its stress and the number of iterations executed.
///
/// Errors
/// ------
/// - Option errors (`InvalidComponents`, `InvalidMaxIter`, `InvalidEps`, ...).
/// - `AsymmetricDissimilarity`, `NotSquare`, `NonFiniteEntry` for a bad `D`.
/// - `InitShapeMismatch` / `WeightShapeMismatch` for mismatched inputs.
pub fn smacof_single<R: Rng>(
    dissimilarities: ArrayView2<f64>, options: &SmacofOptions, init: Option<ArrayView2<f64>>,
    mut rng: R, weight: Option<ArrayView2<f64>>,
) -> MDSResult<SmacofRun> {
    options.validate()?;
    let problem = SmacofProblem::new(dissimilarities, options.metric, weight)?;
    problem.run(options, init, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mds::errors::MDSError;
    use ndarray::{Array2, array};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn asymmetric_dissimilarities_fail_before_iterating() {
        let d = array![[0.0, 1.0, 2.0], [5.0, 0.0, 1.0], [2.0, 1.0, 0.0]];
        let err = smacof_single(d.view(), &SmacofOptions::default(), None, StdRng::seed_from_u64(0), None)
            .unwrap_err();
        assert!(matches!(err, MDSError::AsymmetricDissimilarity { row: 0, col: 1, .. }));
    }

    #[test]
    fn init_columns_override_n_components() {
        let d = array![[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
        let init = array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.5]];
        let options = SmacofOptions { n_components: 2, ..SmacofOptions::default() };

        let run = smacof_single(d.view(), &options, Some(init.view()), StdRng::seed_from_u64(0), None)
            .unwrap();

        assert_eq!(run.embedding.dim(), (3, 3));
    }

    #[test]
    fn random_start_has_requested_shape_and_bounded_iterations() {
        let d = Array2::from_shape_fn((6, 6), |(i, j)| (i as f64 - j as f64).abs());
        let options = SmacofOptions { n_components: 3, max_iter: 25, ..SmacofOptions::default() };

        let run = smacof_single(d.view(), &options, None, StdRng::seed_from_u64(11), None).unwrap();

        assert_eq!(run.embedding.dim(), (6, 3));
        assert!((1..=25).contains(&run.n_iter));
        assert!(run.stress.is_finite() && run.stress >= 0.0);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let d = array![[0.0, 1.0], [1.0, 0.0]];
        let options = SmacofOptions { max_iter: 0, ..SmacofOptions::default() };
        let err = smacof_single(d.view(), &options, None, StdRng::seed_from_u64(0), None).unwrap_err();
        assert!(matches!(err, MDSError::InvalidMaxIter { max_iter: 0, .. }));
    }
}
