//! Application-level configuration.
//!
//! - [`SolveParams`]: per-request timeout and the quorum rule used to decide a majority

pub mod solve_params;

pub use solve_params::SolveParams;
