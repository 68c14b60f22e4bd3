//! Anthropic Messages API provider

mod session;
pub(crate) mod types;

pub use session::AnthropicSession;

use super::http::resolve_api_key;
use super::{ProviderAdapter, ProviderKind};
use async_trait::async_trait;
use math_quorum_application::ports::llm_gateway::{GatewayError, LlmSession};
use math_quorum_domain::{AnthropicProviderConfig, Model};
use reqwest::Client;
use std::sync::Arc;

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    config: Arc<AnthropicProviderConfig>,
}

impl AnthropicProvider {
    pub fn new(config: &AnthropicProviderConfig, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config: Arc::new(config.clone()),
        }
    }

    pub fn try_new(config: &AnthropicProviderConfig) -> Option<Self> {
        let api_key = resolve_api_key(config.api_key.as_deref(), &config.api_key_env)?;
        Some(Self::new(config, api_key))
    }

    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let remote_model = if self.supports_model(model) {
            self.config.model.clone()
        } else {
            model.as_str().to_string()
        };

        Ok(Box::new(AnthropicSession::new(
            self.client.clone(),
            self.messages_url(),
            self.api_key.clone(),
            Arc::clone(&self.config),
            model.clone(),
            remote_model,
            system_prompt.to_string(),
        )))
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(vec![Model::Claude])
    }
}
