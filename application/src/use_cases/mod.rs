//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_history;
pub mod solve_problem;
