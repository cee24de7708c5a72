//! weighted_mds — weighted SMACOF multidimensional scaling with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the SMACOF routines to Python via the `_weighted_mds` extension module. When
//! the `python-bindings` feature is enabled, this module defines the
//! Python-facing estimator class and free functions.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`mds`) as the public crate surface.
//! - Define the `WeightedMDS` `#[pyclass]`, the `smacof` and
//!   `weight_to_matrices` `#[pyfunction]`s and the `#[pymodule]` initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in [`mds`]; this file performs only
//!   FFI glue, argument conversion and error mapping.
//! - Python keyword defaults mirror the Rust defaults (`n_init = 4` for the
//!   estimator, `n_init = 8` for `smacof`).
//!
//! Conventions
//! -----------
//! - Fitted attributes carry a trailing underscore on the Python side
//!   (`embedding_`, `stress_`, `n_iter_`, `dissimilarity_matrix_`) and raise
//!   `ValueError` before `fit`.
//! - [`mds::errors::MDSError`] values are converted to `ValueError` (bad input)
//!   or `RuntimeError` (numerical backend failure) at the boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`mds`] directly and can ignore the
//!   items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_mds_pipeline.rs`; the PyO3 glue is exercised from
//!   Python.

pub mod mds;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArrayDyn};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    mds::{core::weights::expand_weights, errors::MDSError, models::WeightedMDS},
    utils::{build_mds_options, build_smacof_options, extract_f64_matrix, extract_optional_matrix},
};

/// WeightedMDS — Python-facing wrapper for the SMACOF estimator.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `WeightedMDS(n_components=2, metric=True, n_init=4, max_iter=300, eps=1e-3,
/// n_jobs=None, random_state=None, dissimilarity="euclidean")`.
///
/// Fields
/// ------
/// - `inner`: [`WeightedMDS`]
///   Rust estimator holding the configuration and the fitted attributes.
///
/// Notes
/// -----
/// - Native Rust callers should use [`WeightedMDS`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "WeightedMDS", module = "weighted_mds")]
pub struct PyWeightedMDS {
    inner: WeightedMDS,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyWeightedMDS {
    #[new]
    #[pyo3(
        signature = (
            n_components = 2,
            metric = true,
            n_init = 4,
            max_iter = 300,
            eps = 1e-3,
            n_jobs = None,
            random_state = None,
            dissimilarity = "euclidean",
        ),
        text_signature = "(n_components=2, metric=True, n_init=4, max_iter=300, eps=1e-3, \
                          n_jobs=None, random_state=None, dissimilarity='euclidean')"
    )]
    pub fn new(
        n_components: usize, metric: bool, n_init: usize, max_iter: usize, eps: f64,
        n_jobs: Option<isize>, random_state: Option<u64>, dissimilarity: &str,
    ) -> PyResult<Self> {
        let options = build_mds_options(
            n_components,
            metric,
            n_init,
            max_iter,
            eps,
            n_jobs,
            random_state,
            dissimilarity,
        )?;
        Ok(PyWeightedMDS { inner: WeightedMDS::new(options) })
    }

    /// Fit the embedding; returns the estimator itself.
    #[pyo3(signature = (x, init = None, weight = None))]
    pub fn fit<'py>(
        mut slf: PyRefMut<'py, Self>, x: &Bound<'py, PyAny>, init: Option<&Bound<'py, PyAny>>,
        weight: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<PyRefMut<'py, Self>> {
        let py = slf.py();
        let x = extract_f64_matrix(py, x)?;
        let init = extract_optional_matrix(py, init)?;
        let weight = extract_optional_matrix(py, weight)?;
        slf.inner.fit(
            x.as_array(),
            init.as_ref().map(|a| a.as_array()),
            weight.as_ref().map(|a| a.as_array()),
        )?;
        Ok(slf)
    }

    /// Fit the embedding and return it as an `(N, p)` array.
    #[pyo3(signature = (x, init = None, weight = None))]
    pub fn fit_transform<'py>(
        &mut self, py: Python<'py>, x: &Bound<'py, PyAny>, init: Option<&Bound<'py, PyAny>>,
        weight: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let x = extract_f64_matrix(py, x)?;
        let init = extract_optional_matrix(py, init)?;
        let weight = extract_optional_matrix(py, weight)?;
        let embedding = self.inner.fit_transform(
            x.as_array(),
            init.as_ref().map(|a| a.as_array()),
            weight.as_ref().map(|a| a.as_array()),
        )?;
        Ok(embedding.into_pyarray(py))
    }

    #[getter]
    pub fn embedding_<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        Ok(self.inner.embedding()?.to_owned().into_pyarray(py))
    }

    #[getter]
    pub fn stress_(&self) -> PyResult<f64> {
        Ok(self.inner.stress()?)
    }

    #[getter]
    pub fn n_iter_(&self) -> PyResult<usize> {
        Ok(self.inner.n_iter()?)
    }

    #[getter]
    pub fn dissimilarity_matrix_<'py>(
        &self, py: Python<'py>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let matrix = self.inner.dissimilarity_matrix.as_ref().ok_or(MDSError::ModelNotFitted)?;
        Ok(matrix.clone().into_pyarray(py))
    }
}

/// smacof — multi-start SMACOF on a precomputed dissimilarity matrix.
///
/// Returns `(embedding, stress)` or, with `return_n_iter=True`,
/// `(embedding, stress, n_iter)`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "smacof",
    signature = (
        dissimilarities,
        metric = true,
        n_components = 2,
        init = None,
        n_init = 8,
        n_jobs = None,
        max_iter = 300,
        eps = 1e-3,
        random_state = None,
        weight = None,
        return_n_iter = false,
    )
)]
pub fn py_smacof<'py>(
    py: Python<'py>, dissimilarities: &Bound<'py, PyAny>, metric: bool, n_components: usize,
    init: Option<&Bound<'py, PyAny>>, n_init: usize, n_jobs: Option<isize>, max_iter: usize,
    eps: f64, random_state: Option<u64>, weight: Option<&Bound<'py, PyAny>>,
    return_n_iter: bool,
) -> PyResult<Bound<'py, PyAny>> {
    let options =
        build_smacof_options(n_components, metric, n_init, max_iter, eps, n_jobs, random_state)?;
    let d = extract_f64_matrix(py, dissimilarities)?;
    let init = extract_optional_matrix(py, init)?;
    let weight = extract_optional_matrix(py, weight)?;

    let run = mds::smacof::smacof(
        d.as_array(),
        &options,
        init.as_ref().map(|a| a.as_array()),
        weight.as_ref().map(|a| a.as_array()),
    )?;
    let (embedding, stress, n_iter) = run.into_parts();
    let embedding = embedding.into_pyarray(py);
    if return_n_iter {
        Ok((embedding, stress, n_iter).into_pyobject(py)?.into_any())
    } else {
        Ok((embedding, stress).into_pyobject(py)?.into_any())
    }
}

/// weight_to_matrices — expand `(B, L)` condensed or `(B, N, N)` weights into
/// a `(B, N, N)` stack of symmetric matrices.
#[cfg(feature = "python-bindings")]
#[pyfunction]
pub fn weight_to_matrices<'py>(
    py: Python<'py>, weight: PyReadonlyArrayDyn<'py, f64>,
) -> PyResult<Bound<'py, PyArray3<f64>>> {
    let matrices = expand_weights(weight.as_array())?;
    Ok(matrices.into_pyarray(py))
}

/// _weighted_mds — PyO3 module initializer for the Python extension.
///
/// Registers the `WeightedMDS` class and the `smacof` / `weight_to_matrices`
/// functions. Invoked by Python on import; not called from user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _weighted_mds<'py>(m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PyWeightedMDS>()?;
    m.add_function(wrap_pyfunction!(py_smacof, m)?)?;
    m.add_function(wrap_pyfunction!(weight_to_matrices, m)?)?;
    Ok(())
}
