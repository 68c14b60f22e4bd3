//! Model value object representing an LLM backend

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// LLM backends that can be asked to solve a problem (Value Object)
///
/// The string identifier doubles as the key used in `raw_answers`,
/// `raw_responses` and `agreeing_models`, so it must stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Model {
    /// OpenAI chat models
    ChatGpt,
    /// Anthropic Claude models
    Claude,
    /// DeepSeek chat models
    DeepSeek,
    /// Any other backend, routed explicitly through configuration
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::ChatGpt => "chatgpt",
            Model::Claude => "claude",
            Model::DeepSeek => "deepseek",
            Model::Custom(s) => s,
        }
    }

    /// Get the default set of models queried for every problem
    pub fn default_models() -> Vec<Model> {
        vec![Model::ChatGpt, Model::Claude, Model::DeepSeek]
    }

    /// Check if this model is served by the OpenAI API
    pub fn is_openai(&self) -> bool {
        matches!(self, Model::ChatGpt)
    }

    /// Check if this model is served by the Anthropic API
    pub fn is_claude(&self) -> bool {
        matches!(self, Model::Claude)
    }

    /// Check if this model is served by the DeepSeek API
    pub fn is_deepseek(&self) -> bool {
        matches!(self, Model::DeepSeek)
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::ChatGpt
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "chatgpt" | "openai" | "gpt" => Model::ChatGpt,
            "claude" | "anthropic" => Model::Claude,
            "deepseek" => Model::DeepSeek,
            _ => Model::Custom(s.trim().to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in Model::default_models() {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Model::from("OpenAI"), Model::ChatGpt);
        assert_eq!(Model::from("anthropic"), Model::Claude);
        assert_eq!(Model::from(" deepseek "), Model::DeepSeek);
    }

    #[test]
    fn test_custom_model() {
        let model = Model::from("qwen-math");
        assert_eq!(model, Model::Custom("qwen-math".to_string()));
        assert_eq!(model.to_string(), "qwen-math");
    }

    #[test]
    fn test_model_family_detection() {
        assert!(Model::ChatGpt.is_openai());
        assert!(Model::Claude.is_claude());
        assert!(Model::DeepSeek.is_deepseek());
        assert!(!Model::Claude.is_openai());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::DeepSeek).unwrap();
        assert_eq!(json, "\"deepseek\"");
        let model: Model = serde_json::from_str("\"claude\"").unwrap();
        assert_eq!(model, Model::Claude);
    }
}
