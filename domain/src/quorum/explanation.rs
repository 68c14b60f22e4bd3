//! Explanation selection.
//!
//! The longest non-error response is taken as the most complete
//! explanation. Among equally long responses, the one that reads more like
//! a worked solution wins (see [`detail_score`]). Candidates are the
//! agreeing models when there are any, otherwise every model that
//! responded.

use super::consensus::ConsensusResult;
use crate::orchestration::value_objects::ModelResponse;
use serde::{Deserialize, Serialize};

/// The raw response surfaced as the canonical explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationChoice {
    pub model: String,
    pub best_explanation: String,
}

/// Characters counted as math notation by [`detail_score`].
const MATH_SYMBOLS: &str = "+-*/=^√∫∑π";

/// Structure bonus for a response: 200 if it mentions steps, 100 if it
/// gives reasons ("because", "since") and 5 per math symbol.
pub fn detail_score(text: &str) -> usize {
    let lower = text.to_lowercase();
    let mut score = 0;
    if lower.contains("step") {
        score += 200;
    }
    if lower.contains("because") || lower.contains("since") {
        score += 100;
    }
    score + 5 * text.chars().filter(|c| MATH_SYMBOLS.contains(*c)).count()
}

/// Pick the explanation to show for a consensus result.
///
/// Length is counted in characters. Equal lengths are decided by
/// [`detail_score`], then by the model listed first.
/// Returns `None` when no model produced usable text.
pub fn select_explanation(
    result: &ConsensusResult,
    responses: &[ModelResponse],
) -> Option<ExplanationChoice> {
    let usable = |r: &&ModelResponse| r.is_success();

    let candidates: Vec<&ModelResponse> = if result.agreeing_models.is_empty() {
        responses.iter().filter(usable).collect()
    } else {
        responses
            .iter()
            .filter(usable)
            .filter(|r| result.agreeing_models.contains(&r.model))
            .collect()
    };

    let mut best: Option<(&ModelResponse, (usize, usize))> = None;
    for response in candidates {
        let rank = (
            response.content.chars().count(),
            detail_score(&response.content),
        );
        if best.is_none_or(|(_, best_rank)| rank > best_rank) {
            best = Some((response, rank));
        }
    }

    best.map(|(response, _)| ExplanationChoice {
        model: response.model.clone(),
        best_explanation: response.content.clone(),
    })
}
