//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, JSON, etc.).

use std::collections::HashMap;

/// Prefix of the placeholder keys shipped in sample environment files.
pub const PLACEHOLDER_KEY_PREFIX: &str = "your_";

/// Whether an API key looks like a real credential.
pub fn is_usable_api_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !key.starts_with(PLACEHOLDER_KEY_PREFIX)
}

/// Top-level provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider used for custom models without a routing entry:
    /// "openai", "anthropic" or "deepseek".
    pub default: Option<String>,
    /// Explicit model → provider routing overrides.
    pub routing: HashMap<String, String>,
    /// OpenAI API settings (ChatGPT).
    pub openai: OpenAiProviderConfig,
    /// Anthropic API settings (Claude).
    pub anthropic: AnthropicProviderConfig,
    /// DeepSeek API settings (OpenAI-compatible).
    pub deepseek: OpenAiProviderConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default: None,
            routing: HashMap::new(),
            openai: OpenAiProviderConfig::default(),
            anthropic: AnthropicProviderConfig::default(),
            deepseek: OpenAiProviderConfig::deepseek(),
        }
    }
}

/// Anthropic API provider configuration.
#[derive(Debug, Clone)]
pub struct AnthropicProviderConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Remote model id requested for `claude`.
    pub model: String,
    /// Max tokens per response (default: 2000).
    pub max_tokens: u32,
    pub temperature: f32,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for AnthropicProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-3-opus-20240229".to_string(),
            max_tokens: 2000,
            temperature: 0.1,
            api_version: "2023-06-01".to_string(),
        }
    }
}

/// Configuration for an OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    /// Environment variable name for the API key.
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL, without the `/v1/chat/completions` path.
    pub base_url: String,
    /// Remote model id.
    pub model: String,
    /// Max tokens per response; `None` leaves it to the server.
    pub max_tokens: Option<u32>,
    pub temperature: f32,
}

impl Default for OpenAiProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: None,
            temperature: 0.1,
        }
    }
}

impl OpenAiProviderConfig {
    /// Defaults for the DeepSeek API.
    pub fn deepseek() -> Self {
        Self {
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            max_tokens: Some(2000),
            temperature: 0.1,
        }
    }
}
