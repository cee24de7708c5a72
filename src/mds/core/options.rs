//! MDS options — configuration for SMACOF runs and the estimator facade.
//!
//! Purpose
//! -------
//! Collect the configuration knobs of a SMACOF fit in one validated place:
//! target dimensionality, metric vs nonmetric mode, restart count, iteration
//! and convergence budgets, degree of parallelism, base seed, and (for the
//! estimator) the dissimilarity source.
//!
//! Key behaviors
//! -------------
//! - [`SmacofOptions::new`] rejects zero components / restarts / iterations
//!   and non-finite tolerances with typed [`MDSError`] values.
//! - [`Parallelism`] maps joblib-style `n_jobs` integers onto a serial run,
//!   a dedicated worker pool, or the global rayon pool.
//! - [`Dissimilarity`] parses the `"euclidean"` / `"precomputed"` source
//!   names case-insensitively.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed [`SmacofOptions`] always has `n_components ≥ 1`,
//!   `n_init ≥ 1`, `max_iter ≥ 1` and a finite `eps`.
//! - A negative `eps` is accepted; it can never be met, so runs always use
//!   the full `max_iter` budget.
//!
//! Conventions
//! -----------
//! - The bare `smacof` routine defaults to `n_init = 8` ([`SmacofOptions`]);
//!   the estimator defaults to `n_init = 4` ([`MDSOptions`]).
use crate::mds::errors::{MDSError, MDSResult};
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Default target dimensionality.
pub const DEFAULT_N_COMPONENTS: usize = 2;
/// Default restart count for the bare `smacof` routine.
pub const DEFAULT_N_INIT: usize = 8;
/// Default restart count for the estimator facade.
pub const DEFAULT_ESTIMATOR_N_INIT: usize = 4;
/// Default iteration cap per restart.
pub const DEFAULT_MAX_ITER: usize = 300;
/// Default convergence tolerance on the normalized stress.
pub const DEFAULT_EPS: f64 = 1e-3;

/// Degree of parallelism for the multi-start search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// Restarts run one after another on the calling thread.
    #[default]
    Serial,
    /// Restarts run on a dedicated pool with this many workers.
    Threads(NonZeroUsize),
    /// Restarts run on the global rayon pool.
    AllCores,
}

impl Parallelism {
    /// Interpret a joblib-style `n_jobs` value.
    ///
    /// - `None` or `1` → [`Parallelism::Serial`]
    /// - `-1` → [`Parallelism::AllCores`]
    /// - `k > 1` → `Threads(k)`
    /// - `k < -1` → `Threads(cpus + 1 + k)`, clamped to at least one worker
    ///
    /// # Errors
    /// - [`MDSError::InvalidParallelism`] for `n_jobs == 0`.
    pub fn from_n_jobs(n_jobs: Option<isize>) -> MDSResult<Self> {
        match n_jobs {
            None | Some(1) => Ok(Parallelism::Serial),
            Some(0) => Err(MDSError::InvalidParallelism {
                n_jobs: 0,
                reason: "n_jobs == 0 has no meaning; use 1 for serial execution.",
            }),
            Some(-1) => Ok(Parallelism::AllCores),
            Some(k) if k > 1 => Ok(Parallelism::threads(k as usize)),
            Some(k) => {
                let cpus = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
                let workers = (cpus as isize + 1 + k).max(1) as usize;
                Ok(Parallelism::threads(workers))
            }
        }
    }

    /// Number of workers the search may use.
    pub fn effective_workers(&self) -> usize {
        match self {
            Parallelism::Serial => 1,
            Parallelism::Threads(k) => k.get(),
            Parallelism::AllCores => rayon::current_num_threads(),
        }
    }

    fn threads(k: usize) -> Self {
        match NonZeroUsize::new(k) {
            Some(k) if k.get() > 1 => Parallelism::Threads(k),
            _ => Parallelism::Serial,
        }
    }
}

/// Source of the dissimilarity matrix used by the estimator facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dissimilarity {
    /// Pairwise Euclidean distances between the rows of the input.
    #[default]
    Euclidean,
    /// The input already is the dissimilarity matrix.
    Precomputed,
}

impl FromStr for Dissimilarity {
    type Err = MDSError;

    /// Parse `"euclidean"` or `"precomputed"` (any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "euclidean" => Ok(Dissimilarity::Euclidean),
            "precomputed" => Ok(Dissimilarity::Precomputed),
            _ => Err(MDSError::UnknownDissimilarity { name: s.to_string() }),
        }
    }
}

/// SmacofOptions — hyperparameters of a (multi-start) SMACOF fit.
///
/// Fields
/// ------
/// - `n_components`: target dimensionality `p`; overridden by the column
///   count of an explicit starting configuration.
/// - `metric`: `true` for metric SMACOF, `false` for the nonmetric variant
///   with a monotone-regression disparity step.
/// - `n_init`: number of restarts; forced to one when a starting
///   configuration is supplied.
/// - `max_iter`: iteration cap for a single restart.
/// - `eps`: tolerance on the decrease of the normalized stress.
/// - `parallelism`: how restarts are scheduled.
/// - `seed`: base seed for sub-seed derivation; `None` draws one from the
///   thread-local generator.
#[derive(Debug, Clone, PartialEq)]
pub struct SmacofOptions {
    pub n_components: usize,
    pub metric: bool,
    pub n_init: usize,
    pub max_iter: usize,
    pub eps: f64,
    pub parallelism: Parallelism,
    pub seed: Option<u64>,
}

impl SmacofOptions {
    /// Construct validated SMACOF options.
    ///
    /// # Errors
    /// - [`MDSError::InvalidComponents`] if `n_components == 0`.
    /// - [`MDSError::InvalidNInit`] if `n_init == 0`.
    /// - [`MDSError::InvalidMaxIter`] if `max_iter == 0`.
    /// - [`MDSError::InvalidEps`] if `eps` is NaN or infinite.
    pub fn new(
        n_components: usize, metric: bool, n_init: usize, max_iter: usize, eps: f64,
        parallelism: Parallelism, seed: Option<u64>,
    ) -> MDSResult<Self> {
        verify_n_components(n_components)?;
        verify_n_init(n_init)?;
        verify_max_iter(max_iter)?;
        verify_eps(eps)?;
        Ok(Self { n_components, metric, n_init, max_iter, eps, parallelism, seed })
    }

    /// Re-run the constructor checks on options assembled field by field.
    pub fn validate(&self) -> MDSResult<()> {
        verify_n_components(self.n_components)?;
        verify_n_init(self.n_init)?;
        verify_max_iter(self.max_iter)?;
        verify_eps(self.eps)
    }

    /// Same options with a different base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SmacofOptions {
    fn default() -> Self {
        Self {
            n_components: DEFAULT_N_COMPONENTS,
            metric: true,
            n_init: DEFAULT_N_INIT,
            max_iter: DEFAULT_MAX_ITER,
            eps: DEFAULT_EPS,
            parallelism: Parallelism::Serial,
            seed: None,
        }
    }
}

/// MDSOptions — estimator configuration: SMACOF options plus input mode.
#[derive(Debug, Clone, PartialEq)]
pub struct MDSOptions {
    /// Hyperparameters forwarded to the multi-start search.
    pub smacof: SmacofOptions,
    /// How `fit` interprets its input.
    pub dissimilarity: Dissimilarity,
}

impl MDSOptions {
    pub fn new(smacof: SmacofOptions, dissimilarity: Dissimilarity) -> Self {
        Self { smacof, dissimilarity }
    }
}

impl Default for MDSOptions {
    fn default() -> Self {
        Self {
            smacof: SmacofOptions { n_init: DEFAULT_ESTIMATOR_N_INIT, ..SmacofOptions::default() },
            dissimilarity: Dissimilarity::Euclidean,
        }
    }
}

// ---- Helper methods ----

pub(crate) fn verify_n_components(n_components: usize) -> MDSResult<()> {
    if n_components == 0 {
        return Err(MDSError::InvalidComponents {
            n_components,
            reason: "The embedding needs at least one dimension.",
        });
    }
    Ok(())
}

pub(crate) fn verify_n_init(n_init: usize) -> MDSResult<()> {
    if n_init == 0 {
        return Err(MDSError::InvalidNInit {
            n_init,
            reason: "At least one initialization is required.",
        });
    }
    Ok(())
}

pub(crate) fn verify_max_iter(max_iter: usize) -> MDSResult<()> {
    if max_iter == 0 {
        return Err(MDSError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

pub(crate) fn verify_eps(eps: f64) -> MDSResult<()> {
    if !eps.is_finite() {
        return Err(MDSError::InvalidEps { eps, reason: "Tolerance must be finite." });
    }
    Ok(())
}
