use super::types::{MessagesRequest, UserMessage, parse_messages_response};
use crate::providers::http::send_for_body;
use async_trait::async_trait;
use math_quorum_application::ports::llm_gateway::{GatewayError, LlmSession};
use math_quorum_domain::{AnthropicProviderConfig, Model};
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

pub struct AnthropicSession {
    client: Client,
    url: String,
    api_key: String,
    config: Arc<AnthropicProviderConfig>,
    model: Model,
    remote_model: String,
    system_prompt: String,
}

impl AnthropicSession {
    pub fn new(
        client: Client,
        url: String,
        api_key: String,
        config: Arc<AnthropicProviderConfig>,
        model: Model,
        remote_model: String,
        system_prompt: String,
    ) -> Self {
        Self {
            client,
            url,
            api_key,
            config,
            model,
            remote_model,
            system_prompt,
        }
    }
}

#[async_trait]
impl LlmSession for AnthropicSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let request = MessagesRequest {
            model: &self.remote_model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system: &self.system_prompt,
            messages: vec![UserMessage {
                role: "user",
                content,
            }],
        };

        debug!(model = %self.remote_model, "Calling Anthropic messages API");

        let body = send_for_body(
            self.client
                .post(&self.url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", &self.config.api_version)
                .json(&request),
        )
        .await?;

        parse_messages_response(&body)
    }
}
