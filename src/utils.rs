//! Python-side argument extraction for the PyO3 bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! turns loosely typed Python arguments (NumPy arrays, pandas frames, nested
//! sequences, joblib-style `n_jobs`) into validated Rust values.

#[cfg(feature = "python-bindings")]
use std::str::FromStr;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::mds::core::options::{Dissimilarity, MDSOptions, Parallelism, SmacofOptions};

#[cfg(feature = "python-bindings")]
use numpy::{
    PyArray2,
    PyArrayMethods, // .readonly()
    PyReadonlyArray2,
};

/// Read a 2-D float64 matrix from a NumPy array, a pandas DataFrame, or a
/// sequence of equal-length float sequences.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray2<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro);
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 rows",
        )
    })?;
    let arr = PyArray2::from_vec2(py, &rows)
        .map_err(|_| PyTypeError::new_err("all rows must have the same length"))?;
    Ok(arr.readonly())
}

#[cfg(feature = "python-bindings")]
pub fn extract_optional_matrix<'py>(
    py: Python<'py>, raw_data: Option<&Bound<'py, PyAny>>,
) -> PyResult<Option<PyReadonlyArray2<'py, f64>>> {
    raw_data.map(|obj| extract_f64_matrix(py, obj)).transpose()
}

/// Build validated [`SmacofOptions`] from Python keyword arguments.
#[cfg(feature = "python-bindings")]
pub fn build_smacof_options(
    n_components: usize, metric: bool, n_init: usize, max_iter: usize, eps: f64,
    n_jobs: Option<isize>, random_state: Option<u64>,
) -> PyResult<SmacofOptions> {
    let parallelism = Parallelism::from_n_jobs(n_jobs)?;
    let options =
        SmacofOptions::new(n_components, metric, n_init, max_iter, eps, parallelism, random_state)?;
    Ok(options)
}

/// Build validated [`MDSOptions`] for the estimator wrapper.
#[cfg(feature = "python-bindings")]
pub fn build_mds_options(
    n_components: usize, metric: bool, n_init: usize, max_iter: usize, eps: f64,
    n_jobs: Option<isize>, random_state: Option<u64>, dissimilarity: &str,
) -> PyResult<MDSOptions> {
    let smacof =
        build_smacof_options(n_components, metric, n_init, max_iter, eps, n_jobs, random_state)?;
    let dissimilarity = Dissimilarity::from_str(dissimilarity)?;
    Ok(MDSOptions::new(smacof, dissimilarity))
}
