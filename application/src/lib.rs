//! Application layer for math-quorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SolveParams;
pub use ports::{
    history_repository::{HistoryError, HistoryRepository},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::analyze_history::AnalyzeHistoryUseCase;
pub use use_cases::solve_problem::{
    SolveProblemError, SolveProblemInput, SolveProblemOutput, SolveProblemUseCase,
};
