//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod consensus;
mod history;
mod models;
mod output;
mod providers;

pub use consensus::FileConsensusConfig;
pub use history::FileHistoryConfig;
pub use models::FileModelsConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileAnthropicConfig, FileOpenAiConfig, FileProvidersConfig, PROVIDER_NAMES};

use math_quorum_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Models to query
    pub models: FileModelsConfig,
    /// Quorum rule and request timeout
    pub consensus: FileConsensusConfig,
    /// Provider credentials, endpoints and routing
    pub providers: FileProvidersConfig,
    /// History store settings
    pub history: FileHistoryConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. The enabled model list (empty names, duplicates, empty list)
    /// 2. Consensus rule and timeout
    /// 3. Provider names and routability of custom models
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (models, mut issues) = self.models.parse_enabled();
        issues.extend(self.consensus.validate());
        issues.extend(self.providers.validate(&models));
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_quorum_domain::{ConfigIssueCode, Model, OutputFormat, QuorumRule};
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[models]
enabled = ["claude", "deepseek"]

[consensus]
rule = "unanimous"
timeout_secs = 30

[providers.anthropic]
model = "claude-3-5-sonnet-latest"

[history]
enabled = false
dir = "/var/lib/math-quorum"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.models.parse_enabled().0,
            vec![Model::Claude, Model::DeepSeek]
        );
        assert_eq!(config.consensus.parse_rule().0, QuorumRule::Unanimous);
        assert_eq!(config.consensus.timeout_secs, 30);
        assert_eq!(config.providers.anthropic.model, "claude-3-5-sonnet-latest");
        assert_eq!(config.providers.anthropic.max_tokens, 2000);
        assert!(!config.history.enabled);
        assert_eq!(
            config.history.resolved_dir(),
            PathBuf::from("/var/lib/math-quorum")
        );
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[consensus]
timeout_secs = 10
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        // Defaults should apply
        assert_eq!(config.consensus.rule, "majority");
        assert!(config.models.enabled.is_none());
        assert!(config.history.enabled);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[models]
enabled = []

[consensus]
timeout_secs = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let codes: Vec<_> = config.validate().iter().map(|i| i.code).collect();
        assert!(codes.contains(&ConfigIssueCode::NoModels));
        assert!(codes.contains(&ConfigIssueCode::ZeroTimeout));
    }
}
