//! Quorum consensus domain
//!
//! Turns one response per model into a consensus verdict.
//!
//! ```text
//! responses ──► extract ──► partition ──► status / confidence ──► explanation
//!               (answer)    (grouping)    (consensus, rule)       (explanation)
//! ```
//!
//! Partitioning compares each answer with the representative of every
//! existing group in first-seen order. The comparator need not be
//! transitive, so the model order given to the engine is significant.

pub mod consensus;
pub mod explanation;
pub mod grouping;
pub mod reconciliation;
pub mod rule;

// Re-export main types
pub use consensus::{
    Confidence, ConsensusEngine, ConsensusOutcome, ConsensusResult, ConsensusStatus,
    ConsensusTally, reconcile, reconcile_with_rule,
};
pub use explanation::{ExplanationChoice, detail_score, select_explanation};
pub use grouping::{AnswerGroup, largest_group, partition_answers, partition_answers_with};
pub use reconciliation::{Reconciliation, reconcile_responses};
pub use rule::QuorumRule;
