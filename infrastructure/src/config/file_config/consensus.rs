//! Consensus settings from TOML (`[consensus]` section)

use math_quorum_application::SolveParams;
use math_quorum_domain::{ConfigIssue, ConfigIssueCode, QuorumRule};
use serde::{Deserialize, Serialize};

/// Raw consensus configuration from TOML
///
/// ```toml
/// [consensus]
/// rule = "majority"      # majority | unanimous | atleast:N | N%
/// timeout_secs = 60      # per-model request timeout, 0 is rejected
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    pub rule: String,
    pub timeout_secs: u64,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        Self {
            rule: "majority".to_string(),
            timeout_secs: 60,
        }
    }
}

impl FileConsensusConfig {
    /// Parse the rule, falling back to majority on error.
    pub fn parse_rule(&self) -> (QuorumRule, Vec<ConfigIssue>) {
        match self.rule.parse::<QuorumRule>() {
            Ok(rule) => (rule, Vec::new()),
            Err(e) => (
                QuorumRule::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidQuorumRule,
                    format!("consensus.rule: {}", e),
                )],
            ),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (rule, mut issues) = self.parse_rule();
        if issues.is_empty() && rule.can_undercut_majority() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidQuorumRule,
                format!(
                    "consensus.rule '{}' accepts less than a strict majority; \
                     more than half of the answering models must still agree",
                    self.rule
                ),
            ));
        }
        if self.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "consensus.timeout_secs cannot be 0",
            ));
        }
        issues
    }

    pub fn to_solve_params(&self) -> SolveParams {
        SolveParams::default()
            .with_rule(self.parse_rule().0)
            .with_timeout_seconds(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults_match_solve_params() {
        let params = FileConsensusConfig::default().to_solve_params();
        assert_eq!(params.rule, QuorumRule::Majority);
        assert_eq!(params.request_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_invalid_rule_and_zero_timeout() {
        let config = FileConsensusConfig {
            rule: "most".to_string(),
            timeout_secs: 0,
        };
        let codes: Vec<_> = config.validate().iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![ConfigIssueCode::InvalidQuorumRule, ConfigIssueCode::ZeroTimeout]
        );
    }

    #[test]
    fn test_loose_rule_warns() {
        for rule in ["atleast:1", "50%"] {
            let config = FileConsensusConfig {
                rule: rule.to_string(),
                ..Default::default()
            };
            let issues = config.validate();
            assert_eq!(issues.len(), 1, "{rule}");
            assert!(!issues[0].is_error());
            assert_eq!(issues[0].code, ConfigIssueCode::InvalidQuorumRule);
        }

        for rule in ["majority", "unanimous", "75%"] {
            let config = FileConsensusConfig {
                rule: rule.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_empty(), "{rule}");
        }
    }

    #[test]
    fn test_percentage_rule() {
        let config = FileConsensusConfig {
            rule: "75%".to_string(),
            ..Default::default()
        };
        assert_eq!(config.parse_rule().0, QuorumRule::Percentage(75));
    }
}
