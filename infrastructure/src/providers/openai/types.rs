//! Chat completions wire types

use math_quorum_application::ports::llm_gateway::GatewayError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessage {
    pub content: Option<String>,
}

/// Text of the first choice.
pub(crate) fn parse_chat_response(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::RequestFailed(format!("Invalid response body: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GatewayError::RequestFailed("Response contained no content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a math expert.",
                },
                ChatMessage {
                    role: "user",
                    content: "1 + 1",
                },
            ],
            temperature: 0.1,
            max_tokens: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["messages"][1]["role"], "user");
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Answer: 2"}}]}"#;
        assert_eq!(parse_chat_response(body).unwrap(), "Answer: 2");
    }

    #[test]
    fn test_parse_missing_content() {
        assert!(parse_chat_response(r#"{"choices":[]}"#).is_err());
        assert!(parse_chat_response(r#"{"choices":[{"message":{"content":null}}]}"#).is_err());
        assert!(parse_chat_response("not json").is_err());
    }
}
