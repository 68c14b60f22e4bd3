//! LLM provider adapters
//!
//! Each adapter serves one backend API. [`RoutingGateway`](routing::RoutingGateway)
//! picks the adapter for a model and implements the application's `LlmGateway`.

pub mod anthropic;
pub mod http;
pub mod openai;
pub mod routing;

use async_trait::async_trait;
use math_quorum_application::ports::llm_gateway::{GatewayError, LlmSession};
use math_quorum_domain::{Model, ProviderConfig};
use std::sync::Arc;
use tracing::{info, warn};

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiCompatibleProvider;
pub use routing::RoutingGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    DeepSeek,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::DeepSeek => "deepseek",
        }
    }

    /// Parse a provider name as used in `[providers]` configuration
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAi),
            "anthropic" => Some(ProviderKind::Anthropic),
            "deepseek" => Some(ProviderKind::DeepSeek),
            _ => None,
        }
    }

    /// The provider a built-in model belongs to
    pub fn for_model(model: &Model) -> Option<Self> {
        match model {
            Model::ChatGpt => Some(ProviderKind::OpenAi),
            Model::Claude => Some(ProviderKind::Anthropic),
            Model::DeepSeek => Some(ProviderKind::DeepSeek),
            Model::Custom(_) => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;
    /// Whether the model belongs to this provider's family
    fn supports_model(&self, model: &Model) -> bool {
        ProviderKind::for_model(model) == Some(self.kind())
    }
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
    async fn available_models(&self) -> Result<Vec<Model>, GatewayError>;
}

/// Build an adapter for every provider that has a usable API key.
///
/// Providers without a key are skipped with a warning; the models they
/// serve then fail with `ModelNotAvailable`.
pub fn build_providers(config: &ProviderConfig) -> Vec<Arc<dyn ProviderAdapter>> {
    let mut providers: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

    match OpenAiCompatibleProvider::try_new(ProviderKind::OpenAi, &config.openai) {
        Some(p) => providers.push(Arc::new(p)),
        None => warn!("OpenAI API key not configured ({})", config.openai.api_key_env),
    }
    match AnthropicProvider::try_new(&config.anthropic) {
        Some(p) => providers.push(Arc::new(p)),
        None => warn!(
            "Anthropic API key not configured ({})",
            config.anthropic.api_key_env
        ),
    }
    match OpenAiCompatibleProvider::try_new(ProviderKind::DeepSeek, &config.deepseek) {
        Some(p) => providers.push(Arc::new(p)),
        None => warn!(
            "DeepSeek API key not configured ({})",
            config.deepseek.api_key_env
        ),
    }

    info!(
        "Providers available: [{}]",
        providers
            .iter()
            .map(|p| p.kind().as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    providers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names() {
        assert_eq!(ProviderKind::from_name("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::from_name("deepseek"), Some(ProviderKind::DeepSeek));
        assert_eq!(ProviderKind::from_name("ollama"), None);
        assert_eq!(ProviderKind::Anthropic.to_string(), "anthropic");
    }

    #[test]
    fn test_model_families() {
        assert_eq!(ProviderKind::for_model(&Model::ChatGpt), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::for_model(&Model::Claude), Some(ProviderKind::Anthropic));
        assert_eq!(
            ProviderKind::for_model(&Model::DeepSeek),
            Some(ProviderKind::DeepSeek)
        );
        assert_eq!(ProviderKind::for_model(&Model::Custom("x".into())), None);
    }
}
