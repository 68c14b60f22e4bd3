//! Input file for the `reconcile` command
//!
//! A JSON object mapping model names to response text. Key order in the
//! file is the order the responses are reconciled in, so the object is
//! read entry by entry instead of through a map type.

use math_quorum_domain::{ERROR_MARKER, ModelResponse, responses_from_pairs};
use serde::Deserializer;
use serde::de::{MapAccess, Visitor};
use std::fmt;

struct ResponsePairs(Vec<(String, String)>);

impl<'de> serde::Deserialize<'de> for ResponsePairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = ResponsePairs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping model names to response text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::new();
                while let Some((model, text)) = map.next_entry::<String, Option<String>>()? {
                    // null stands for a model that produced nothing
                    let text = text.unwrap_or_else(|| format!("{}: no response", ERROR_MARKER));
                    pairs.push((model, text));
                }
                Ok(ResponsePairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

/// Parse a responses file into an ordered response list.
pub fn parse_responses(json: &str) -> serde_json::Result<Vec<ModelResponse>> {
    let ResponsePairs(pairs) = serde_json::from_str(json)?;
    Ok(responses_from_pairs(pairs))
}
