//! mds::smacof::multi_start — SMACOF with several random restarts.
//!
//! Purpose
//! -------
//! Run the single-run optimizer from `n_init` independent starting
//! configurations and keep the lowest-stress result.
//!
//! Key behaviors
//! -------------
//! - The problem (symmetrized `D`, weights, `V⁺`) is validated once and shared
//!   read-only by every restart.
//! - Restart `k` draws its start from `StdRng::seed_from_u64(sub_seeds[k])`,
//!   where the sub-seeds come from [`derive_sub_seeds`]. Serial, dedicated
//!   pool and global pool execution therefore return identical results.
//! - Results are collected in sub-seed order before selection; the lowest
//!   stress wins and ties go to the earliest restart.
//! - An explicit starting configuration forces a single restart (with a
//!   `warn!` record if more were requested).
//!
//! Invariants & assumptions
//! ------------------------
//! - Restarts share no mutable state; each owns its RNG and workspace.
//! - A missing base seed is drawn from the thread-local generator, so such
//!   runs are not reproducible.
use crate::mds::{
    core::options::{Parallelism, SmacofOptions},
    errors::{MDSError, MDSResult},
    smacof::{problem::SmacofProblem, types::SmacofRun},
};
use log::{debug, info, warn};
use ndarray::ArrayView2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::{ThreadPoolBuilder, prelude::*};

/// Derive `n_init` per-restart seeds from a base seed.
///
/// The same `(base, n_init)` always yields the same sequence, and a longer
/// sequence extends a shorter one.
pub fn derive_sub_seeds(base: u64, n_init: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(base);
    (0..n_init).map(|_| rng.random::<u64>()).collect()
}

/// smacof — multi-start SMACOF returning the best restart.
///
/// Parameters
/// ----------
/// - `dissimilarities`: `ArrayView2<f64>`
///   N×N symmetric dissimilarity matrix.
/// - `options`: `&SmacofOptions`
///   Full configuration: dimensionality, metric flag, restart count,
///   iteration/tolerance budgets, parallelism and base seed.
/// - `init`: `Option<ArrayView2<f64>>`
///   Explicit starting configuration; forces `n_init = 1`.
/// - `weight`: `Option<ArrayView2<f64>>`
///   Optional N×N weight matrix.
///
/// Returns
/// -------
/// `MDSResult<SmacofRun>`
///   The lowest-stress restart (earliest on ties).
///
/// Errors
/// ------
/// - Everything [`smacof_single`](crate::mds::smacof::smacof_single) can
///   return, raised before any restart starts iterating.
/// - [`MDSError::ThreadPool`] if a dedicated worker pool cannot be built.
pub fn smacof(
    dissimilarities: ArrayView2<f64>, options: &SmacofOptions, init: Option<ArrayView2<f64>>,
    weight: Option<ArrayView2<f64>>,
) -> MDSResult<SmacofRun> {
    options.validate()?;
    let mut n_init = options.n_init;
    if init.is_some() && n_init != 1 {
        warn!(
            "Explicit initial positions passed: performing only one init of the MDS \
             instead of {n_init}"
        );
        n_init = 1;
    }

    let problem = SmacofProblem::new(dissimilarities, options.metric, weight)?;
    let base_seed = options.seed.unwrap_or_else(|| rand::rng().random::<u64>());
    let sub_seeds = derive_sub_seeds(base_seed, n_init);
    debug!(
        "running {n_init} restart(s) from base seed {base_seed} on {} worker(s)",
        options.parallelism.effective_workers()
    );

    let restart = |(k, seed): (usize, &u64)| -> MDSResult<SmacofRun> {
        let mut rng = StdRng::seed_from_u64(*seed);
        let run = problem.run(options, init, &mut rng)?;
        debug!("restart {k}: stress = {:.6e} after {} iterations", run.stress, run.n_iter);
        Ok(run)
    };

    let runs: Vec<SmacofRun> = match options.parallelism {
        Parallelism::Serial => {
            sub_seeds.iter().enumerate().map(&restart).collect::<MDSResult<_>>()?
        }
        Parallelism::Threads(workers) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers.get())
                .build()
                .map_err(|e| MDSError::ThreadPool { text: e.to_string() })?;
            pool.install(|| {
                sub_seeds.par_iter().enumerate().map(&restart).collect::<MDSResult<Vec<_>>>()
            })?
        }
        Parallelism::AllCores => {
            sub_seeds.par_iter().enumerate().map(&restart).collect::<MDSResult<_>>()?
        }
    };

    let (best_index, best) = select_best(runs).ok_or(MDSError::InvalidNInit {
        n_init,
        reason: "At least one initialization is required.",
    })?;
    info!(
        "selected restart {best_index} of {n_init}: stress = {:.6e}, n_iter = {}",
        best.stress, best.n_iter
    );
    Ok(best)
}

// ---- Helper methods ----

/// Lowest-stress run with its index; the first run wins ties.
fn select_best(runs: Vec<SmacofRun>) -> Option<(usize, SmacofRun)> {
    let mut best: Option<(usize, SmacofRun)> = None;
    for (index, run) in runs.into_iter().enumerate() {
        if best.as_ref().is_none_or(|(_, current)| run.stress < current.stress) {
            best = Some((index, run));
        }
    }
    best
}
