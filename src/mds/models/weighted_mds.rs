//! mds::models::weighted_mds — estimator facade over the multi-start search.
//!
//! Purpose
//! -------
//! Offer a fit/transform style entry point: hold the configuration, turn the
//! caller's input into a dissimilarity matrix according to the configured
//! [`Dissimilarity`] mode, run [`smacof`] and keep the fitted attributes for
//! later inspection.
//!
//! Key behaviors
//! -------------
//! - `Euclidean` mode treats the input as N×features raw data and uses the
//!   pairwise Euclidean distances of its rows. A square input in this mode is
//!   accepted but logged with `warn!`, since it usually means the caller meant
//!   `Precomputed`.
//! - `Precomputed` mode uses the input directly as the dissimilarity matrix.
//! - A failed `fit` leaves previously fitted attributes untouched.
//!
//! Conventions
//! -----------
//! - Fitted attributes are `None` until the first successful `fit`; the
//!   accessor methods report [`MDSError::ModelNotFitted`] instead.
use crate::mds::{
    core::{
        distance::euclidean_distances,
        options::{Dissimilarity, MDSOptions},
    },
    errors::{MDSError, MDSResult},
    smacof::{SmacofRun, smacof},
};
use log::warn;
use ndarray::{Array2, ArrayView2};

/// WeightedMDS — SMACOF multidimensional scaling with optional pair weights.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightedMDS {
    /// Estimator configuration.
    pub options: MDSOptions,
    /// Best restart of the last successful fit.
    pub results: Option<SmacofRun>,
    /// Dissimilarity matrix used by the last successful fit.
    pub dissimilarity_matrix: Option<Array2<f64>>,
}

impl WeightedMDS {
    pub fn new(options: MDSOptions) -> Self {
        Self { options, results: None, dissimilarity_matrix: None }
    }

    /// Fit the embedding and cache (embedding, stress, n_iter, dissimilarities).
    ///
    /// # Arguments
    /// - `x`: raw N×features data (`Euclidean`) or an N×N dissimilarity
    ///   matrix (`Precomputed`).
    /// - `init`: optional starting configuration; forces a single restart.
    /// - `weight`: optional N×N weight matrix.
    ///
    /// # Errors
    /// - Everything [`smacof`] can return.
    pub fn fit(
        &mut self, x: ArrayView2<f64>, init: Option<ArrayView2<f64>>,
        weight: Option<ArrayView2<f64>>,
    ) -> MDSResult<()> {
        let dissimilarities = match self.options.dissimilarity {
            Dissimilarity::Precomputed => x.to_owned(),
            Dissimilarity::Euclidean => {
                if x.nrows() == x.ncols() {
                    warn!(
                        "Input is square but dissimilarity = 'euclidean': fit now builds the \
                         dissimilarity matrix from the data; set dissimilarity = 'precomputed' \
                         to pass a dissimilarity matrix"
                    );
                }
                euclidean_distances(x)
            }
        };

        let run = smacof(dissimilarities.view(), &self.options.smacof, init, weight)?;
        self.results = Some(run);
        self.dissimilarity_matrix = Some(dissimilarities);
        Ok(())
    }

    /// Fit and return a copy of the embedding.
    pub fn fit_transform(
        &mut self, x: ArrayView2<f64>, init: Option<ArrayView2<f64>>,
        weight: Option<ArrayView2<f64>>,
    ) -> MDSResult<Array2<f64>> {
        self.fit(x, init, weight)?;
        Ok(self.embedding()?.to_owned())
    }

    pub fn embedding(&self) -> MDSResult<ArrayView2<'_, f64>> {
        Ok(self.fitted()?.embedding.view())
    }

    pub fn stress(&self) -> MDSResult<f64> {
        Ok(self.fitted()?.stress)
    }

    pub fn n_iter(&self) -> MDSResult<usize> {
        Ok(self.fitted()?.n_iter)
    }

    // ---- Helper methods ----

    fn fitted(&self) -> MDSResult<&SmacofRun> {
        self.results.as_ref().ok_or(MDSError::ModelNotFitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mds::core::options::SmacofOptions;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Euclidean vs precomputed input handling.
    // - Cached attributes after fit and the not-fitted error before it.
    // - A failed fit not clobbering an earlier result.
    // -------------------------------------------------------------------------

    fn seeded(dissimilarity: Dissimilarity) -> WeightedMDS {
        let smacof = SmacofOptions { n_init: 2, seed: Some(3), ..SmacofOptions::default() };
        WeightedMDS::new(MDSOptions::new(smacof, dissimilarity))
    }

    #[test]
    fn accessors_fail_before_fit() {
        let model = WeightedMDS::default();
        assert_eq!(model.embedding().unwrap_err(), MDSError::ModelNotFitted);
        assert_eq!(model.stress().unwrap_err(), MDSError::ModelNotFitted);
        assert_eq!(model.n_iter().unwrap_err(), MDSError::ModelNotFitted);
    }

    #[test]
    // Purpose
    // -------
    // Verify that Euclidean mode on raw data and precomputed mode on its
    // distance matrix are the same fit.
    //
    // Given
    // -----
    // - A 5×3 raw data matrix and its Euclidean distance matrix.
    //
    // Expect
    // ------
    // - Identical embeddings and stresses; the cached dissimilarity matrix is
    //   the distance matrix in both cases.
    fn euclidean_mode_matches_precomputed_distances() {
        // Arrange
        let raw = array![
            [0.0, 0.0, 1.0],
            [1.0, 2.0, 0.0],
            [2.0, 0.5, 1.0],
            [0.5, 1.5, 2.0],
            [3.0, 1.0, 0.0]
        ];
        let d = euclidean_distances(raw.view());
        let mut from_raw = seeded(Dissimilarity::Euclidean);
        let mut from_d = seeded(Dissimilarity::Precomputed);

        // Act
        let a = from_raw.fit_transform(raw.view(), None, None).unwrap();
        let b = from_d.fit_transform(d.view(), None, None).unwrap();

        // Assert
        assert_eq!(a.dim(), (5, 2));
        assert_eq!(a, b);
        assert_eq!(from_raw.stress().unwrap(), from_d.stress().unwrap());
        assert_eq!(from_raw.dissimilarity_matrix.as_ref(), Some(&d));
        assert_eq!(from_d.dissimilarity_matrix.as_ref(), Some(&d));
    }

    #[test]
    fn failed_fit_keeps_previous_results() {
        let d = array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.0], [2.0, 1.0, 0.0]];
        let mut model = seeded(Dissimilarity::Precomputed);
        model.fit(d.view(), None, None).unwrap();
        let before = model.results.clone();

        let bad_init = array![[0.0, 0.0]];
        let err = model.fit(d.view(), Some(bad_init.view()), None).unwrap_err();

        assert!(matches!(err, MDSError::InitShapeMismatch { expected: 3, .. }));
        assert_eq!(model.results, before);
    }

    #[test]
    fn explicit_init_is_used_for_a_single_restart() {
        let d = array![[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
        let init = array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.8]];
        let mut model = seeded(Dissimilarity::Precomputed);

        let embedding = model.fit_transform(d.view(), Some(init.view()), None).unwrap();

        assert_eq!(embedding.dim(), (3, 2));
        assert!(model.n_iter().unwrap() >= 1);
        assert_abs_diff_eq!(model.stress().unwrap(), 0.0, epsilon = 0.1);
    }
}
