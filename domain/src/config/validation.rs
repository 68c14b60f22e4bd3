//! Configuration issues.
//!
//! Loaders check the merged configuration and report structured issues
//! with a severity. Errors abort startup; warnings are logged.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `models.enabled` is empty.
    NoModels,
    /// A model name in `models.enabled` is blank.
    EmptyModelName,
    /// The same model is listed twice; only the first is queried.
    DuplicateModel,
    /// `consensus.rule` could not be parsed.
    InvalidQuorumRule,
    /// `consensus.timeout_secs` is zero.
    ZeroTimeout,
    /// A custom model has no provider routing entry.
    UnroutableModel,
    /// A routing entry names an unknown provider.
    UnknownProvider,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let issue = ConfigIssue::error(ConfigIssueCode::NoModels, "no models");
        assert!(issue.is_error());
        assert_eq!(issue.to_string(), "error: no models");

        let issue = ConfigIssue::warning(ConfigIssueCode::DuplicateModel, "claude twice");
        assert!(!issue.is_error());
        assert_eq!(issue.code, ConfigIssueCode::DuplicateModel);
    }
}
