//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: LLM backends (ChatGPT, Claude, DeepSeek, custom)
//! - [`problem::MathProblem`]: a validated math problem
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod problem;
pub mod string;
