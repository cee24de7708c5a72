//! Core building blocks shared by the SMACOF routines and the estimator:
//! options, input validation, weight expansion, distances, isotonic
//! regression and the weight-Laplacian linear algebra.
pub mod distance;
pub mod isotonic;
pub mod linalg;
pub mod options;
pub mod validation;
pub mod weights;
