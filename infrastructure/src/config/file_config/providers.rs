//! Provider configuration from TOML (`[providers]` section)

use math_quorum_domain::{
    AnthropicProviderConfig, ConfigIssue, ConfigIssueCode, Model, OpenAiProviderConfig,
    ProviderConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Provider names accepted in `default` and `routing`.
pub const PROVIDER_NAMES: [&str; 3] = ["openai", "anthropic", "deepseek"];

/// Anthropic API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Remote model id.
    pub model: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    pub temperature: f32,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        let d = AnthropicProviderConfig::default();
        Self {
            api_key_env: d.api_key_env,
            api_key: d.api_key,
            base_url: d.base_url,
            model: d.model,
            max_tokens: d.max_tokens,
            temperature: d.temperature,
            api_version: d.api_version,
        }
    }
}

impl FileAnthropicConfig {
    fn to_domain(&self) -> AnthropicProviderConfig {
        AnthropicProviderConfig {
            api_key_env: self.api_key_env.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            api_version: self.api_version.clone(),
        }
    }
}

/// OpenAI-compatible API configuration (`[providers.openai]`, `[providers.deepseek]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key.
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL, without the `/v1/chat/completions` path.
    pub base_url: String,
    /// Remote model id.
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: f32,
}

impl From<OpenAiProviderConfig> for FileOpenAiConfig {
    fn from(d: OpenAiProviderConfig) -> Self {
        Self {
            api_key_env: d.api_key_env,
            api_key: d.api_key,
            base_url: d.base_url,
            model: d.model,
            max_tokens: d.max_tokens,
            temperature: d.temperature,
        }
    }
}

impl FileOpenAiConfig {
    fn to_domain(&self) -> OpenAiProviderConfig {
        OpenAiProviderConfig {
            api_key_env: self.api_key_env.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Per-field defaults differ between OpenAI and DeepSeek, so each section
/// is deserialized against its own defaults.
mod openai_section {
    use super::*;

    #[derive(Default, Deserialize)]
    #[serde(default)]
    struct Partial {
        api_key_env: Option<String>,
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
    }

    fn merge(partial: Partial, defaults: OpenAiProviderConfig) -> FileOpenAiConfig {
        FileOpenAiConfig {
            api_key_env: partial.api_key_env.unwrap_or(defaults.api_key_env),
            api_key: partial.api_key.or(defaults.api_key),
            base_url: partial.base_url.unwrap_or(defaults.base_url),
            model: partial.model.unwrap_or(defaults.model),
            max_tokens: partial.max_tokens.or(defaults.max_tokens),
            temperature: partial.temperature.unwrap_or(defaults.temperature),
        }
    }

    pub fn openai<'de, D: serde::Deserializer<'de>>(d: D) -> Result<FileOpenAiConfig, D::Error> {
        Ok(merge(Partial::deserialize(d)?, OpenAiProviderConfig::default()))
    }

    pub fn deepseek<'de, D: serde::Deserializer<'de>>(d: D) -> Result<FileOpenAiConfig, D::Error> {
        Ok(merge(Partial::deserialize(d)?, OpenAiProviderConfig::deepseek()))
    }
}

fn default_openai() -> FileOpenAiConfig {
    OpenAiProviderConfig::default().into()
}

fn default_deepseek() -> FileOpenAiConfig {
    OpenAiProviderConfig::deepseek().into()
}

/// Raw `[providers]` section
///
/// ```toml
/// [providers]
/// default = "openai"            # provider for custom models without a route
///
/// [providers.routing]
/// "llama-3" = "openai"
///
/// [providers.deepseek]
/// api_key_env = "DEEPSEEK_API_KEY"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Provider for custom models without a routing entry.
    pub default: Option<String>,
    /// Explicit model → provider routing overrides.
    pub routing: HashMap<String, String>,
    #[serde(deserialize_with = "openai_section::openai", default = "default_openai")]
    pub openai: FileOpenAiConfig,
    pub anthropic: FileAnthropicConfig,
    #[serde(deserialize_with = "openai_section::deepseek", default = "default_deepseek")]
    pub deepseek: FileOpenAiConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            default: None,
            routing: HashMap::new(),
            openai: default_openai(),
            anthropic: FileAnthropicConfig::default(),
            deepseek: default_deepseek(),
        }
    }
}

impl FileProvidersConfig {
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            default: self.default.clone(),
            routing: self.routing.clone(),
            openai: self.openai.to_domain(),
            anthropic: self.anthropic.to_domain(),
            deepseek: self.deepseek.to_domain(),
        }
    }

    /// Check provider names and that every custom model can be routed.
    pub fn validate(&self, models: &[Model]) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let named = self.default.iter().map(|d| ("providers.default", d)).chain(
            self.routing
                .values()
                .map(|provider| ("providers.routing", provider)),
        );
        for (field, provider) in named {
            if !PROVIDER_NAMES.contains(&provider.as_str()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider,
                    format!(
                        "{}: unknown provider '{}' (expected one of {})",
                        field,
                        provider,
                        PROVIDER_NAMES.join(", ")
                    ),
                ));
            }
        }

        if self.default.is_none() {
            for model in models {
                if matches!(model, Model::Custom(_)) && !self.routing.contains_key(model.as_str()) {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::UnroutableModel,
                        format!(
                            "model '{}' has no [providers.routing] entry and no providers.default",
                            model
                        ),
                    ));
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deepseek_section_keeps_its_defaults() {
        let toml_str = r#"
[deepseek]
model = "deepseek-reasoner"
"#;
        let config: FileProvidersConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.deepseek.model, "deepseek-reasoner");
        assert_eq!(config.deepseek.base_url, "https://api.deepseek.com");
        assert_eq!(config.deepseek.api_key_env, "DEEPSEEK_API_KEY");
        assert_eq!(config.openai.base_url, "https://api.openai.com");
    }

    #[test]
    fn test_to_provider_config() {
        let mut config = FileProvidersConfig::default();
        config.routing.insert("llama".to_string(), "openai".to_string());
        let domain = config.to_provider_config();
        assert_eq!(domain.routing["llama"], "openai");
        assert_eq!(domain.anthropic.max_tokens, 2000);
        assert_eq!(domain.openai.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_validate_routing() {
        let mut config = FileProvidersConfig::default();
        config.routing.insert("llama".to_string(), "ollama".to_string());
        let models = vec![Model::ChatGpt, Model::Custom("mistral".to_string())];

        let codes: Vec<_> = config.validate(&models).iter().map(|i| i.code).collect();
        assert!(codes.contains(&ConfigIssueCode::UnknownProvider));
        assert!(codes.contains(&ConfigIssueCode::UnroutableModel));

        config.default = Some("openai".to_string());
        config.routing.clear();
        assert!(config.validate(&models).is_empty());
    }
}
