//! models — user-facing estimators built on the SMACOF routines.
pub mod weighted_mds;

pub use self::weighted_mds::WeightedMDS;
