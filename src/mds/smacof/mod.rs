//! SMACOF optimization: the validated problem, the single-run loop and the
//! multi-start search on top of it.
pub mod multi_start;
pub mod problem;
pub mod single;
pub mod types;
pub mod workspace;

pub use self::multi_start::{derive_sub_seeds, smacof};
pub use self::problem::SmacofProblem;
pub use self::single::smacof_single;
pub use self::types::SmacofRun;
