//! Output format value object

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a reconciliation is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Consensus, per-model answers and the chosen explanation (default)
    #[default]
    Full,
    /// Only the consensus answer
    Answer,
    /// The reconciliation payload as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(OutputFormat::Full),
            "answer" => Ok(OutputFormat::Answer),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{}' (expected full, answer or json)",
                other
            )),
        }
    }
}
