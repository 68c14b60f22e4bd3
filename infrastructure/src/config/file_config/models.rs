//! Model selection from TOML (`[models]` section)

use math_quorum_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};

/// Model selection from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// enabled = ["chatgpt", "claude", "deepseek"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Models to query, in reporting order. `None` uses every built-in backend.
    pub enabled: Option<Vec<String>>,
}

impl FileModelsConfig {
    /// Parse the enabled model list, collecting issues.
    ///
    /// Blank names are dropped and reported; duplicates keep their first
    /// occurrence.
    pub fn parse_enabled(&self) -> (Vec<Model>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let Some(names) = &self.enabled else {
            return (Model::default_models(), issues);
        };

        let mut models: Vec<Model> = Vec::new();
        for name in names {
            if name.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName,
                    "models.enabled: model name cannot be empty",
                ));
                continue;
            }
            let model = Model::from(name.as_str());
            if models.contains(&model) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DuplicateModel,
                    format!("models.enabled: '{}' is listed more than once", model),
                ));
                continue;
            }
            models.push(model);
        }

        if models.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoModels,
                "models.enabled: at least one model is required",
            ));
        }

        (models, issues)
    }
}
