//! Solve parameters for [`SolveProblemUseCase`](crate::use_cases::solve_problem::SolveProblemUseCase).
//!
//! These are application-layer concerns, not domain policy.

use math_quorum_domain::QuorumRule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default wall-clock budget for a single model request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Parameters controlling one solve run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveParams {
    /// Timeout for each model request. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Rule a non-unanimous group must satisfy to count as a majority.
    pub rule: QuorumRule,
    /// Whether the result is written to the history store.
    pub save_history: bool,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            rule: QuorumRule::default(),
            save_history: true,
        }
    }
}

impl SolveParams {
    // ==================== Builder Methods ====================

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        self.with_request_timeout(Some(Duration::from_secs(seconds)))
    }

    pub fn with_rule(mut self, rule: QuorumRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn without_history(mut self) -> Self {
        self.save_history = false;
        self
    }
}
