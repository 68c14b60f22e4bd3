//! Messages API wire types

use math_quorum_application::ports::llm_gateway::GatewayError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub system: &'a str,
    pub messages: Vec<UserMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Concatenate the text blocks of a response.
pub(crate) fn parse_messages_response(body: &str) -> Result<String, GatewayError> {
    let response: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::RequestFailed(format!("Invalid response body: {}", e)))?;

    let texts: Vec<String> = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect();

    if texts.is_empty() {
        return Err(GatewayError::RequestFailed(
            "Response contained no text content".to_string(),
        ));
    }
    Ok(texts.join(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_empty_system() {
        let request = MessagesRequest {
            model: "claude-3-opus-20240229",
            max_tokens: 2000,
            temperature: 0.1,
            system: "",
            messages: vec![UserMessage {
                role: "user",
                content: "2+2",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
        assert_eq!(json["max_tokens"], 2000);
    }

    #[test]
    fn test_parse_text_blocks() {
        let body = r#"{"content":[{"type":"text","text":"Answer: "},{"type":"thinking","thinking":"..."},{"type":"text","text":"4"}]}"#;
        assert_eq!(parse_messages_response(body).unwrap(), "Answer: 4");
    }

    #[test]
    fn test_parse_empty_content() {
        assert!(parse_messages_response(r#"{"content":[]}"#).is_err());
        assert!(parse_messages_response("{").is_err());
    }
}
