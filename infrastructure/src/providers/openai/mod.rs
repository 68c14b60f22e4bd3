//! OpenAI-compatible chat completions provider
//!
//! Serves ChatGPT through the OpenAI API and DeepSeek through its
//! OpenAI-compatible endpoint. Both speak `POST /v1/chat/completions`
//! with bearer authentication.

mod session;
pub(crate) mod types;

pub use session::OpenAiSession;

use super::http::resolve_api_key;
use super::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use math_quorum_application::ports::llm_gateway::{GatewayError, LlmSession};
use math_quorum_domain::{Model, OpenAiProviderConfig};
use reqwest::Client;

pub struct OpenAiCompatibleProvider {
    kind: ProviderKind,
    client: Client,
    api_key: String,
    config: OpenAiProviderConfig,
}

impl OpenAiCompatibleProvider {
    pub fn new(kind: ProviderKind, config: &OpenAiProviderConfig, api_key: String) -> Self {
        Self {
            kind,
            client: Client::new(),
            api_key,
            config: config.clone(),
        }
    }

    /// Create the provider when its API key resolves to a usable value.
    pub fn try_new(kind: ProviderKind, config: &OpenAiProviderConfig) -> Option<Self> {
        let api_key = resolve_api_key(config.api_key.as_deref(), &config.api_key_env)?;
        Some(Self::new(kind, config, api_key))
    }

    pub fn chat_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Remote model id: the configured one for the family model, the
    /// model's own name for explicitly routed custom models.
    fn remote_model(&self, model: &Model) -> String {
        if self.supports_model(model) {
            self.config.model.clone()
        } else {
            model.as_str().to_string()
        }
    }

    fn family_model(&self) -> Model {
        match self.kind {
            ProviderKind::DeepSeek => Model::DeepSeek,
            _ => Model::ChatGpt,
        }
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatibleProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            self.chat_url(),
            self.api_key.clone(),
            model.clone(),
            self.remote_model(model),
            system_prompt.to_string(),
            self.config.max_tokens,
            self.config.temperature,
        )))
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(vec![self.family_model()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deepseek() -> OpenAiCompatibleProvider {
        let mut config = OpenAiProviderConfig::deepseek();
        config.base_url = "https://api.deepseek.com/".to_string();
        OpenAiCompatibleProvider::new(ProviderKind::DeepSeek, &config, "sk-test".to_string())
    }

    #[test]
    fn test_chat_url_strips_trailing_slash() {
        assert_eq!(
            deepseek().chat_url(),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_remote_model() {
        let provider = deepseek();
        assert!(provider.supports_model(&Model::DeepSeek));
        assert!(!provider.supports_model(&Model::ChatGpt));
        assert_eq!(provider.remote_model(&Model::DeepSeek), "deepseek-chat");
        assert_eq!(
            provider.remote_model(&Model::Custom("deepseek-reasoner".into())),
            "deepseek-reasoner"
        );
    }

    #[test]
    fn test_try_new_rejects_placeholder_key() {
        let mut config = OpenAiProviderConfig::default();
        config.api_key = Some("your_openai_api_key".to_string());
        config.api_key_env = "MATH_QUORUM_TEST_UNSET_KEY".to_string();
        assert!(OpenAiCompatibleProvider::try_new(ProviderKind::OpenAi, &config).is_none());
    }

    #[tokio::test]
    async fn test_available_models() {
        let models = deepseek().available_models().await.unwrap();
        assert_eq!(models, vec![Model::DeepSeek]);
    }
}
