//! Orchestration domain entities

use serde::{Deserialize, Serialize};

/// Phase of a solve run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Every configured model is asked to solve the problem
    Query,
    /// Responses are extracted, compared and reconciled
    Reconcile,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Query => "query",
            Phase::Reconcile => "reconcile",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Query => "Model Query",
            Phase::Reconcile => "Reconciliation",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
