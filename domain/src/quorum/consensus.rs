//! Consensus determination over extracted answers
//!
//! Given one response per queried model, the engine extracts answers,
//! groups them by equivalence and derives a status and a confidence level:
//!
//! | Condition | Status | Confidence |
//! |-----------|--------|------------|
//! | no model answered (`m == 0`) | `insufficient_data` | low |
//! | all answers agree, every model answered (`k == m == n`) | `full_consensus` | high |
//! | all answers agree, some models missing (`k == m < n`) | `full_consensus` | medium |
//! | `k > m/2` and the rule holds, `k/m > 2/3` | `majority_consensus` | medium |
//! | `k > m/2` and the rule holds, `k/m <= 2/3` | `majority_consensus` | low |
//! | otherwise | `no_consensus` | low |
//!
//! where `n` is the number of models queried, `m` the number that produced
//! an answer and `k` the size of the largest group.

use super::grouping::{AnswerGroup, largest_group, partition_answers};
use super::rule::QuorumRule;
use crate::answer::extraction::{ExtractedAnswer, extract_answers};
use crate::orchestration::value_objects::ModelResponse;
use serde::{Deserialize, Serialize};

/// Agreement state among the model answers for one problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusStatus {
    /// Every answering model agrees
    FullConsensus,
    /// The largest group of agreeing models satisfies the quorum rule
    MajorityConsensus,
    /// No group is large enough
    NoConsensus,
    /// No model produced an answer
    InsufficientData,
}

impl ConsensusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusStatus::FullConsensus => "full_consensus",
            ConsensusStatus::MajorityConsensus => "majority_consensus",
            ConsensusStatus::NoConsensus => "no_consensus",
            ConsensusStatus::InsufficientData => "insufficient_data",
        }
    }

    /// Whether the status carries an answer
    pub fn has_answer(&self) -> bool {
        matches!(
            self,
            ConsensusStatus::FullConsensus | ConsensusStatus::MajorityConsensus
        )
    }

    pub fn all() -> [ConsensusStatus; 4] {
        [
            ConsensusStatus::FullConsensus,
            ConsensusStatus::MajorityConsensus,
            ConsensusStatus::NoConsensus,
            ConsensusStatus::InsufficientData,
        ]
    }
}

impl std::fmt::Display for ConsensusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How trustworthy the consensus is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    /// One level lower, saturating at `Low`
    pub fn downgrade(self) -> Self {
        match self {
            Confidence::High => Confidence::Medium,
            Confidence::Medium | Confidence::Low => Confidence::Low,
        }
    }

    pub fn all() -> [Confidence; 3] {
        [Confidence::High, Confidence::Medium, Confidence::Low]
    }

    /// Confidence as a function of status and agreement counts.
    ///
    /// `agreeing / answered` above two thirds lifts a majority to `Medium`.
    pub fn for_outcome(
        status: ConsensusStatus,
        queried: usize,
        answered: usize,
        agreeing: usize,
    ) -> Self {
        match status {
            ConsensusStatus::FullConsensus if answered >= queried => Confidence::High,
            ConsensusStatus::FullConsensus => Confidence::High.downgrade(),
            // k/m > 2/3 without floating point
            ConsensusStatus::MajorityConsensus if 3 * agreeing > 2 * answered => {
                Confidence::Medium
            }
            ConsensusStatus::MajorityConsensus => Confidence::Low,
            ConsensusStatus::NoConsensus | ConsensusStatus::InsufficientData => Confidence::Low,
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Consensus verdict for one problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub status: ConsensusStatus,
    /// Representative answer of the winning group; `None` without consensus
    pub answer: Option<String>,
    /// Models in the winning group, in the order they were supplied
    pub agreeing_models: Vec<String>,
    pub confidence: Confidence,
}

impl ConsensusResult {
    fn without_answer(status: ConsensusStatus) -> Self {
        Self {
            status,
            answer: None,
            agreeing_models: Vec::new(),
            confidence: Confidence::Low,
        }
    }

    pub fn insufficient_data() -> Self {
        Self::without_answer(ConsensusStatus::InsufficientData)
    }

    pub fn no_consensus() -> Self {
        Self::without_answer(ConsensusStatus::NoConsensus)
    }

    /// Whether some answer was agreed on (full or majority)
    pub fn is_success(&self) -> bool {
        self.status.has_answer()
    }
}

/// Counts behind a consensus decision, for logging and display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusTally {
    /// `n`: models queried
    pub queried: usize,
    /// `m`: models with an extracted answer
    pub answered: usize,
    /// `k`: size of the largest group
    pub largest_group: usize,
    /// Number of distinct answer groups
    pub groups: usize,
}

/// Everything the engine derived for one set of responses
#[derive(Debug, Clone)]
pub struct ConsensusOutcome {
    pub result: ConsensusResult,
    pub answers: Vec<ExtractedAnswer>,
    pub groups: Vec<AnswerGroup>,
    pub tally: ConsensusTally,
}

/// The consensus engine
///
/// Pure: the same responses always produce the same result.
///
/// # Example
///
/// ```
/// use math_quorum_domain::orchestration::value_objects::ModelResponse;
/// use math_quorum_domain::quorum::{Confidence, ConsensusEngine, ConsensusStatus};
///
/// let responses = vec![
///     ModelResponse::success("chatgpt", "Answer: 7"),
///     ModelResponse::success("claude", "The result is 7"),
///     ModelResponse::failure("deepseek", "rate limited"),
/// ];
///
/// let result = ConsensusEngine::default().reconcile(&responses);
/// assert_eq!(result.status, ConsensusStatus::FullConsensus);
/// assert_eq!(result.confidence, Confidence::Medium);
/// assert_eq!(result.agreeing_models, vec!["chatgpt", "claude"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsensusEngine {
    rule: QuorumRule,
}

impl ConsensusEngine {
    pub fn new(rule: QuorumRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> QuorumRule {
        self.rule
    }

    /// Reconcile responses into a consensus verdict
    pub fn reconcile(&self, responses: &[ModelResponse]) -> ConsensusResult {
        self.evaluate(responses).result
    }

    /// Reconcile and keep the intermediate answers, groups and counts
    pub fn evaluate(&self, responses: &[ModelResponse]) -> ConsensusOutcome {
        let responses = unique_by_model(responses);
        let answers = extract_answers(&responses);
        let groups = partition_answers(&answers);

        let queried = responses.len();
        let answered = answers.iter().filter(|a| a.value.is_some()).count();
        let largest = largest_group(&groups);
        let largest_len = largest.map_or(0, AnswerGroup::len);

        let tally = ConsensusTally {
            queried,
            answered,
            largest_group: largest_len,
            groups: groups.len(),
        };

        let result = match largest {
            None => ConsensusResult::insufficient_data(),
            Some(group) => {
                let status = if group.len() == answered {
                    ConsensusStatus::FullConsensus
                } else if self.rule.permits_majority(group.len(), answered) {
                    ConsensusStatus::MajorityConsensus
                } else {
                    ConsensusStatus::NoConsensus
                };

                if status.has_answer() {
                    ConsensusResult {
                        status,
                        answer: Some(group.representative.clone()),
                        agreeing_models: group.models.clone(),
                        confidence: Confidence::for_outcome(
                            status,
                            queried,
                            answered,
                            group.len(),
                        ),
                    }
                } else {
                    ConsensusResult::no_consensus()
                }
            }
        };

        ConsensusOutcome {
            result,
            answers,
            groups,
            tally,
        }
    }
}

/// Reconcile with the default majority rule
pub fn reconcile(responses: &[ModelResponse]) -> ConsensusResult {
    ConsensusEngine::default().reconcile(responses)
}

pub fn reconcile_with_rule(responses: &[ModelResponse], rule: QuorumRule) -> ConsensusResult {
    ConsensusEngine::new(rule).reconcile(responses)
}

/// First response per model name, in order
pub(crate) fn unique_by_model(responses: &[ModelResponse]) -> Vec<ModelResponse> {
    let mut unique: Vec<ModelResponse> = Vec::with_capacity(responses.len());
    for response in responses {
        if !unique.iter().any(|r| r.model == response.model) {
            unique.push(response.clone());
        }
    }
    unique
}
