//! History record types

use crate::answer::is_error_marker;
use crate::quorum::{ConsensusResult, ExplanationChoice, Reconciliation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A durable snapshot of one solved problem.
///
/// The `id` is assigned by the store when the record is saved and is not
/// part of the serialized file body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(skip)]
    pub id: String,
    /// ISO 8601 local time of the solve
    pub timestamp: String,
    pub problem_text: String,
    /// Models that were queried, in configured order
    #[serde(default)]
    pub available_models: Vec<String>,
    pub consensus: ConsensusResult,
    #[serde(default)]
    pub raw_answers: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub raw_responses: BTreeMap<String, String>,
    #[serde(default)]
    pub explanation: Option<ExplanationChoice>,
}

impl HistoryRecord {
    /// Snapshot a reconciliation. The id stays empty until the record is stored.
    pub fn from_reconciliation(
        reconciliation: Reconciliation,
        available_models: Vec<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            timestamp: timestamp.into(),
            problem_text: reconciliation.problem_text,
            available_models,
            consensus: reconciliation.consensus,
            raw_answers: reconciliation.raw_answers,
            raw_responses: reconciliation.raw_responses,
            explanation: reconciliation.explanation,
        }
    }

    /// The reconciliation part of the record
    pub fn reconciliation(&self) -> Reconciliation {
        Reconciliation {
            problem_text: self.problem_text.clone(),
            consensus: self.consensus.clone(),
            raw_answers: self.raw_answers.clone(),
            raw_responses: self.raw_responses.clone(),
            explanation: self.explanation.clone(),
        }
    }

    /// Whether `model`'s stored response is an error marker.
    ///
    /// A model with no stored response counts as an error.
    pub fn model_failed(&self, model: &str) -> bool {
        self.raw_responses
            .get(model)
            .is_none_or(|content| is_error_marker(content))
    }

    pub fn answer_of(&self, model: &str) -> Option<&str> {
        self.raw_answers.get(model).and_then(|a| a.as_deref())
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            id: self.id.clone(),
            timestamp: self.timestamp.clone(),
            problem_text: self.problem_text.clone(),
            confidence: self.consensus.confidence,
        }
    }
}

/// Listing entry for a stored record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub id: String,
    pub timestamp: String,
    pub problem_text: String,
    pub confidence: crate::quorum::Confidence,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::value_objects::ModelResponse;
    use crate::quorum::{Confidence, reconcile_responses};

    fn record() -> HistoryRecord {
        let responses = vec![
            ModelResponse::success("chatgpt", "Answer: 7"),
            ModelResponse::failure("claude", "timeout"),
        ];
        HistoryRecord::from_reconciliation(
            reconcile_responses("3 + 4", &responses),
            vec!["chatgpt".to_string(), "claude".to_string()],
            "2025-01-02T03:04:05",
        )
    }

    #[test]
    fn test_from_reconciliation_keeps_payload() {
        let record = record();
        assert_eq!(record.problem_text, "3 + 4");
        assert_eq!(record.answer_of("chatgpt"), Some("7"));
        assert_eq!(record.answer_of("claude"), None);
        assert!(!record.model_failed("chatgpt"));
        assert!(record.model_failed("claude"));
        assert!(record.model_failed("deepseek"));
        assert_eq!(record.reconciliation().consensus, record.consensus);
    }

    #[test]
    fn test_id_is_not_serialized() {
        let mut record = record();
        record.id = "result_x.json".to_string();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["available_models"][1], "claude");
        assert_eq!(json["consensus"]["confidence"], "medium");
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{
            "timestamp": "2025-01-01T00:00:00",
            "problem_text": "1+1",
            "consensus": {"status": "no_consensus", "answer": null, "agreeing_models": [], "confidence": "low"}
        }"#;
        let record: HistoryRecord = serde_json::from_str(json).unwrap();
        assert!(record.available_models.is_empty());
        assert_eq!(record.explanation, None);
        assert_eq!(record.summary().confidence, Confidence::Low);
    }
}
