//! Domain layer for math-quorum
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Answers
//!
//! Every model's free-text solution is reduced to a single extracted answer
//! ([`answer::extract_final_answer`]), normalized and compared exactly
//! ([`AnswerValue`]): numbers as rationals, expressions as polynomials.
//!
//! ## Quorum
//!
//! Models whose answers are equivalent form a group. The largest group
//! decides the [`ConsensusStatus`] and [`Confidence`], and the most complete
//! agreeing response becomes the explanation ([`ExplanationChoice`]).
//!
//! ## History
//!
//! Each solve can be stored as a [`HistoryRecord`]; [`HistoryStats`]
//! summarizes agreement and reliability across stored records.

pub mod answer;
pub mod config;
pub mod core;
pub mod history;
pub mod orchestration;
pub mod prompt;
pub mod providers;
pub mod quorum;

// Re-export commonly used types
pub use answer::{
    AnswerValue, ERROR_MARKER, ExtractedAnswer, answers_equivalent, equivalent, extract_answers,
    extract_final_answer, is_error_marker,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model, problem::MathProblem};
pub use history::{AgreementRate, HistoryRecord, HistoryStats, HistorySummary, LengthStats};
pub use orchestration::{
    entities::Phase,
    value_objects::{ModelResponse, responses_from_pairs},
};
pub use prompt::PromptTemplate;
pub use providers::{
    AnthropicProviderConfig, OpenAiProviderConfig, ProviderConfig, is_usable_api_key,
};

// Re-export quorum types
pub use quorum::{
    AnswerGroup, Confidence, ConsensusEngine, ConsensusOutcome, ConsensusResult, ConsensusStatus,
    ConsensusTally, ExplanationChoice, QuorumRule, Reconciliation, reconcile, reconcile_responses, reconcile_with_rule,
    select_explanation,
};
