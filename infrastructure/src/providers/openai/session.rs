//! Chat completions session
//!
//! Each `send` is a single stateless request carrying the system prompt
//! and the user message.

use super::types::{ChatMessage, ChatRequest, parse_chat_response};
use crate::providers::http::send_for_body;
use async_trait::async_trait;
use math_quorum_application::ports::llm_gateway::{GatewayError, LlmSession};
use math_quorum_domain::Model;
use reqwest::Client;
use tracing::debug;

pub struct OpenAiSession {
    client: Client,
    url: String,
    api_key: String,
    model: Model,
    remote_model: String,
    system_prompt: String,
    max_tokens: Option<u32>,
    temperature: f32,
}

impl OpenAiSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client: Client,
        url: String,
        api_key: String,
        model: Model,
        remote_model: String,
        system_prompt: String,
        max_tokens: Option<u32>,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            url,
            api_key,
            model,
            remote_model,
            system_prompt,
            max_tokens,
            temperature,
        }
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let mut messages = Vec::with_capacity(2);
        if !self.system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: &self.system_prompt,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content,
        });

        let request = ChatRequest {
            model: &self.remote_model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(model = %self.remote_model, url = %self.url, "Calling chat completions API");

        let body = send_for_body(
            self.client
                .post(&self.url)
                .bearer_auth(&self.api_key)
                .json(&request),
        )
        .await?;

        parse_chat_response(&body)
    }
}
