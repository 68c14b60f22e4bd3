//! Orchestration value objects.
//!
//! [`ModelResponse`] is the unit handed from the query phase to the
//! consensus engine: one per configured model, either the raw text or an
//! error marker. Failures are encoded, never omitted, so the engine can
//! account for every model that was asked.

use crate::answer::extraction::{ERROR_MARKER, is_error_marker};
use serde::{Deserialize, Serialize};

/// Raw response from a single model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The model that generated this response
    pub model: String,
    /// The response text, or an error marker (`"Error: ..."`)
    pub content: String,
}

impl ModelResponse {
    /// Creates a successful response from a model.
    pub fn success(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            content: content.into(),
        }
    }

    /// Creates a failed response, encoded as an error marker.
    ///
    /// # Arguments
    /// * `model` - Name or identifier of the model
    /// * `reason` - Description of why the model failed
    pub fn failure(model: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self {
            model: model.into(),
            content: format!("{}: {}", ERROR_MARKER, reason),
        }
    }

    /// Returns `true` if the content is an error marker.
    pub fn is_error(&self) -> bool {
        is_error_marker(&self.content)
    }

    /// Returns `true` if the model produced usable text.
    pub fn is_success(&self) -> bool {
        !self.is_error() && !self.content.trim().is_empty()
    }
}

/// Build an ordered response list from `(model, text)` pairs.
///
/// Duplicate model names keep their first occurrence.
pub fn responses_from_pairs<I, M, T>(pairs: I) -> Vec<ModelResponse>
where
    I: IntoIterator<Item = (M, T)>,
    M: Into<String>,
    T: Into<String>,
{
    let mut responses: Vec<ModelResponse> = Vec::new();
    for (model, text) in pairs {
        let model = model.into();
        if responses.iter().any(|r| r.model == model) {
            continue;
        }
        responses.push(ModelResponse::success(model, text));
    }
    responses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_is_error_marker() {
        let response = ModelResponse::failure("claude", "timeout");
        assert_eq!(response.content, "Error: timeout");
        assert!(response.is_error());
        assert!(!response.is_success());
    }

    #[test]
    fn test_success() {
        let response = ModelResponse::success("chatgpt", "Answer: 4");
        assert!(!response.is_error());
        assert!(response.is_success());
        assert!(!ModelResponse::success("chatgpt", "  ").is_success());
    }

    #[test]
    fn test_pairs_keep_first_duplicate() {
        let responses = responses_from_pairs(vec![
            ("chatgpt", "Answer: 1"),
            ("claude", "Answer: 2"),
            ("chatgpt", "Answer: 3"),
        ]);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].content, "Answer: 1");
        assert_eq!(responses[1].model, "claude");
    }
}
