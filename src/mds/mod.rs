//! mds — weighted multidimensional scaling by SMACOF.
//!
//! Purpose
//! -------
//! Embed N items in a p-dimensional Euclidean space so that their pairwise
//! distances match a given dissimilarity matrix as closely as possible,
//! optionally weighting each pair. The optimizer is SMACOF (Scaling by
//! MAjorizing a COmplicated Function), run from several random starts.
//!
//! Key behaviors
//! -------------
//! - [`core`]: validated options, input guards, condensed ↔ square weight
//!   expansion, Euclidean distances, isotonic regression and the weight
//!   Laplacian pseudo-inverse.
//! - [`smacof`]: the single-run loop ([`smacof_single`]) and the multi-start
//!   search ([`smacof()`]) with serial or rayon-backed restarts.
//! - [`models`]: the [`WeightedMDS`] estimator facade.
//! - [`errors`]: the [`MDSError`] / [`MDSResult`] error surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated once, before any iteration: dissimilarities must be
//!   square, finite and symmetric within tolerance; weights must be finite,
//!   non-negative, symmetric and N×N; a starting configuration must have N
//!   rows.
//! - Restarts are pure functions of (problem, sub-seed, options); the result
//!   of a seeded call does not depend on how restarts are scheduled.
//!
//! Conventions
//! -----------
//! - Matrices are `ndarray::Array2<f64>`; configurations are N×p, row `i`
//!   holding the coordinates of item `i`.
//! - Stress is the raw `½ Σ_{i,j} (dis − disparities)²` over all N² entries.
//! - The library installs no logger; it emits `log` records only.
//!
//! Downstream usage
//! ----------------
//! - Most callers only need the estimator:
//!   1. Build [`SmacofOptions`] (or start from `Default`) and wrap it in
//!      [`MDSOptions`] with a [`Dissimilarity`] mode.
//!   2. `WeightedMDS::new(options).fit_transform(x, init, weight)`.
//! - Callers with their own dissimilarities can call [`smacof()`] directly
//!   and read the returned [`SmacofRun`].
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each module. Integration tests in
//!   `tests/integration_mds_pipeline.rs` check stress monotonicity, seeded
//!   determinism, restart selection, explicit-init handling, weighting and
//!   input rejection through the public API.

pub mod core;
pub mod errors;
pub mod models;
pub mod smacof;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::options::{Dissimilarity, MDSOptions, Parallelism, SmacofOptions};
pub use self::core::weights::expand_weights;
pub use self::errors::{MDSError, MDSErrorKind, MDSResult};
pub use self::models::WeightedMDS;
pub use self::smacof::{SmacofRun, derive_sub_seeds, smacof, smacof_single};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use weighted_mds::mds::prelude::*;

pub mod prelude {
    pub use super::{
        Dissimilarity, MDSError, MDSErrorKind, MDSOptions, MDSResult, Parallelism, SmacofOptions,
        SmacofRun, WeightedMDS, expand_weights, smacof, smacof_single,
    };
}
