//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod history_repository;
pub mod llm_gateway;
pub mod progress;
