//! Aggregate statistics over stored history records.

use super::record::HistoryRecord;
use crate::answer::answers_equivalent;
use crate::quorum::{Confidence, ConsensusStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Response length distribution for one model, in characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub mean: f64,
    pub median: f64,
    pub min: usize,
    pub max: usize,
}

impl LengthStats {
    fn from_lengths(mut lengths: Vec<usize>) -> Option<Self> {
        if lengths.is_empty() {
            return None;
        }
        lengths.sort_unstable();
        let n = lengths.len();
        let mean = lengths.iter().sum::<usize>() as f64 / n as f64;
        let median = if n % 2 == 1 {
            lengths[n / 2] as f64
        } else {
            (lengths[n / 2 - 1] + lengths[n / 2]) as f64 / 2.0
        };
        Some(Self {
            mean,
            median,
            min: lengths[0],
            max: lengths[n - 1],
        })
    }
}

/// How often two models gave equivalent answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementRate {
    pub first: String,
    pub second: String,
    /// Records where both models produced an answer
    pub compared: usize,
    /// Fraction in `0.0..=1.0`; `None` when nothing could be compared
    pub rate: Option<f64>,
}

/// Statistics over a set of history records. Rates are percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total: usize,
    pub consensus_rates: BTreeMap<String, f64>,
    pub confidence_distribution: BTreeMap<String, f64>,
    /// Share of records in which the model was queried
    pub model_availability: BTreeMap<String, f64>,
    /// Share of the model's queries that returned an error marker
    pub error_rates: BTreeMap<String, f64>,
    pub response_length: BTreeMap<String, LengthStats>,
    /// Full or majority consensus
    pub overall_success_rate: f64,
    pub model_agreement: Vec<AgreementRate>,
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

impl HistoryStats {
    pub fn from_records(records: &[HistoryRecord]) -> Self {
        let total = records.len();
        if total == 0 {
            return Self::default();
        }

        let consensus_rates = ConsensusStatus::all()
            .into_iter()
            .map(|status| {
                let count = records.iter().filter(|r| r.consensus.status == status).count();
                (status.as_str().to_string(), percentage(count, total))
            })
            .collect();

        let confidence_distribution = Confidence::all()
            .into_iter()
            .map(|confidence| {
                let count = records
                    .iter()
                    .filter(|r| r.consensus.confidence == confidence)
                    .count();
                (confidence.as_str().to_string(), percentage(count, total))
            })
            .collect();

        let models: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.available_models.iter().map(String::as_str))
            .collect();

        let mut model_availability = BTreeMap::new();
        let mut error_rates = BTreeMap::new();
        let mut response_length = BTreeMap::new();

        for model in &models {
            let queried: Vec<&HistoryRecord> = records
                .iter()
                .filter(|r| r.available_models.iter().any(|m| m == model))
                .collect();
            model_availability.insert(model.to_string(), percentage(queried.len(), total));

            let failed = queried.iter().filter(|r| r.model_failed(model)).count();
            error_rates.insert(model.to_string(), percentage(failed, queried.len()));

            let lengths = queried
                .iter()
                .map(|r| r.raw_responses.get(*model).map_or(0, |t| t.chars().count()))
                .collect();
            if let Some(stats) = LengthStats::from_lengths(lengths) {
                response_length.insert(model.to_string(), stats);
            }
        }

        let succeeded = records.iter().filter(|r| r.consensus.is_success()).count();

        let models: Vec<&str> = models.into_iter().collect();
        let mut model_agreement = Vec::new();
        for (i, first) in models.iter().enumerate() {
            for second in &models[i + 1..] {
                model_agreement.push(agreement(records, first, second));
            }
        }

        Self {
            total,
            consensus_rates,
            confidence_distribution,
            model_availability,
            error_rates,
            response_length,
            overall_success_rate: percentage(succeeded, total),
            model_agreement,
        }
    }
}

fn agreement(records: &[HistoryRecord], first: &str, second: &str) -> AgreementRate {
    let mut compared = 0usize;
    let mut agreed = 0usize;
    for record in records {
        if let (Some(a), Some(b)) = (record.answer_of(first), record.answer_of(second)) {
            compared += 1;
            if answers_equivalent(Some(a), Some(b)) {
                agreed += 1;
            }
        }
    }
    AgreementRate {
        first: first.to_string(),
        second: second.to_string(),
        compared,
        rate: (compared > 0).then(|| agreed as f64 / compared as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::value_objects::ModelResponse;
    use crate::quorum::reconcile_responses;

    fn record(responses: &[ModelResponse]) -> HistoryRecord {
        let models = responses.iter().map(|r| r.model.clone()).collect();
        HistoryRecord::from_reconciliation(
            reconcile_responses("problem", responses),
            models,
            "2025-01-01T00:00:00",
        )
    }

    fn sample() -> Vec<HistoryRecord> {
        vec![
            record(&[
                ModelResponse::success("chatgpt", "Answer: 2"),
                ModelResponse::success("claude", "Answer: 2.0"),
            ]),
            record(&[
                ModelResponse::success("chatgpt", "Answer: 1"),
                ModelResponse::success("claude", "Answer: 3"),
            ]),
            record(&[
                ModelResponse::success("chatgpt", "Answer: 5"),
                ModelResponse::failure("claude", "timeout"),
                ModelResponse::success("deepseek", "Answer: 5"),
            ]),
            record(&[ModelResponse::failure("chatgpt", "down")]),
        ]
    }

    #[test]
    fn test_empty_history() {
        let stats = HistoryStats::from_records(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.model_agreement.is_empty());
        assert_eq!(stats.overall_success_rate, 0.0);
    }

    #[test]
    fn test_rates() {
        let stats = HistoryStats::from_records(&sample());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.consensus_rates["full_consensus"], 50.0);
        assert_eq!(stats.consensus_rates["no_consensus"], 25.0);
        assert_eq!(stats.consensus_rates["insufficient_data"], 25.0);
        assert_eq!(stats.consensus_rates["majority_consensus"], 0.0);
        assert_eq!(stats.overall_success_rate, 50.0);
        assert_eq!(stats.confidence_distribution["high"], 25.0);
        assert_eq!(stats.confidence_distribution["medium"], 25.0);
        assert_eq!(stats.confidence_distribution["low"], 50.0);
    }

    #[test]
    fn test_per_model_figures() {
        let stats = HistoryStats::from_records(&sample());
        assert_eq!(stats.model_availability["chatgpt"], 100.0);
        assert_eq!(stats.model_availability["claude"], 75.0);
        assert_eq!(stats.model_availability["deepseek"], 25.0);
        assert_eq!(stats.error_rates["chatgpt"], 25.0);
        assert!((stats.error_rates["claude"] - 100.0 / 3.0).abs() < 1e-9);

        let lengths = &stats.response_length["chatgpt"];
        // "Answer: 2", "Answer: 1", "Answer: 5", "Error: down"
        assert_eq!(lengths.min, 9);
        assert_eq!(lengths.max, 11);
        assert_eq!(lengths.median, 9.0);
        assert_eq!(lengths.mean, 9.5);
    }

    #[test]
    fn test_pairwise_agreement_uses_comparator() {
        let stats = HistoryStats::from_records(&sample());
        let pair = |a: &str, b: &str| {
            stats
                .model_agreement
                .iter()
                .find(|p| p.first == a && p.second == b)
                .unwrap()
                .clone()
        };

        let chatgpt_claude = pair("chatgpt", "claude");
        assert_eq!(chatgpt_claude.compared, 2);
        assert_eq!(chatgpt_claude.rate, Some(0.5));

        let chatgpt_deepseek = pair("chatgpt", "deepseek");
        assert_eq!(chatgpt_deepseek.rate, Some(1.0));

        let claude_deepseek = pair("claude", "deepseek");
        assert_eq!(claude_deepseek.compared, 0);
        assert_eq!(claude_deepseek.rate, None);
    }
}
