//! The reconciliation payload handed to output and history.

use super::consensus::{ConsensusEngine, ConsensusOutcome, ConsensusResult, unique_by_model};
use super::explanation::{ExplanationChoice, select_explanation};
use crate::orchestration::value_objects::ModelResponse;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Consensus plus the per-model material it was derived from
///
/// Serializes to:
///
/// ```text
/// {
///   "problem_text": "...",
///   "consensus": {"status": "...", "answer": ..., "agreeing_models": [...], "confidence": "..."},
///   "raw_answers": {"model": "value" | null},
///   "raw_responses": {"model": "text"},
///   "explanation": {"model": "...", "best_explanation": "..."} | null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub problem_text: String,
    pub consensus: ConsensusResult,
    pub raw_answers: BTreeMap<String, Option<String>>,
    pub raw_responses: BTreeMap<String, String>,
    pub explanation: Option<ExplanationChoice>,
}

impl Reconciliation {
    /// Assemble the payload from an already evaluated outcome.
    pub fn from_outcome(
        problem_text: impl Into<String>,
        outcome: &ConsensusOutcome,
        responses: &[ModelResponse],
    ) -> Self {
        let responses = unique_by_model(responses);
        let raw_answers = outcome
            .answers
            .iter()
            .map(|a| (a.model.clone(), a.value.clone()))
            .collect();
        let raw_responses = responses
            .iter()
            .map(|r| (r.model.clone(), r.content.clone()))
            .collect();

        Self {
            problem_text: problem_text.into(),
            consensus: outcome.result.clone(),
            raw_answers,
            raw_responses,
            explanation: select_explanation(&outcome.result, &responses),
        }
    }

    /// Models that were asked, in name order
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.raw_responses.keys().map(String::as_str)
    }
}

impl ConsensusEngine {
    /// Run the whole pipeline: extract, group, decide, pick an explanation.
    pub fn reconcile_responses(
        &self,
        problem_text: impl Into<String>,
        responses: &[ModelResponse],
    ) -> Reconciliation {
        let outcome = self.evaluate(responses);
        Reconciliation::from_outcome(problem_text, &outcome, responses)
    }
}

/// [`ConsensusEngine::reconcile_responses`] with the default rule
pub fn reconcile_responses(
    problem_text: impl Into<String>,
    responses: &[ModelResponse],
) -> Reconciliation {
    ConsensusEngine::default().reconcile_responses(problem_text, responses)
}
