//! Final-answer extraction from free-form model responses.
//!
//! Responses mix step-by-step reasoning with a final answer. Extraction runs
//! an ordered list of strategies, most specific first; the first strategy
//! that matches wins, and within a strategy the last match in the text is
//! taken because models state the final answer last. No marker means no
//! answer: the extractor never guesses.
//!
//! | Order | Strategy | Example |
//! |-------|----------|---------|
//! | 1 | Boxed | `\boxed{42}` |
//! | 2 | Final answer | `Final answer: 42` |
//! | 3 | Answer | `The answer is 42` |
//! | 4 | Result / solution | `Result = 42` |
//! | 5 | Conclusion | `Therefore, x = 42.` |
//! | 6 | Last equation | `6 * 7 = 42` |
//! | 7 | Standalone line | a last line reading `42` |

use super::expression::parse_polynomial;
use super::normalize::normalize_answer;
use crate::orchestration::value_objects::ModelResponse;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Prefix that marks a response as a failure placeholder.
pub const ERROR_MARKER: &str = "Error";

/// Longest line accepted by the standalone-line strategy.
const MAX_STANDALONE_LEN: usize = 60;

static FINAL_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfinal\s+answer\b[*_\s]*(?:is\b|:|=)[*_\s]*(.+)").expect("valid regex")
});

static ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\banswer\b[*_\s]*(?:is\b|:|=)[*_\s]*(.+)").expect("valid regex")
});

static RESULT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:result|solution)\b[*_\s]*(?:is\b|:|=)[*_\s]*(.+)").expect("valid regex")
});

static CONCLUSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:therefore|thus|hence|so),\s*(.+)").expect("valid regex")
});

static EQUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^<>!=])=([^=\n]+)").expect("valid regex"));

/// The answer isolated from one model's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAnswer {
    /// Model that produced the response
    pub model: String,
    /// Extracted final answer, `None` when nothing could be isolated
    pub value: Option<String>,
}

/// Whether a response is an error placeholder rather than model output.
pub fn is_error_marker(text: &str) -> bool {
    text.trim_start().starts_with(ERROR_MARKER)
}

/// Isolate the final answer from a model response.
///
/// Returns `None` for error markers, empty input and responses with no
/// recognizable answer marker.
///
/// # Examples
///
/// ```
/// use math_quorum_domain::answer::extract_final_answer;
///
/// assert_eq!(extract_final_answer("Answer: 42"), Some("42".to_string()));
/// assert_eq!(extract_final_answer("Error: timeout"), None);
/// assert_eq!(extract_final_answer(""), None);
/// ```
pub fn extract_final_answer(raw: &str) -> Option<String> {
    if raw.trim().is_empty() || is_error_marker(raw) {
        return None;
    }

    boxed(raw)
        .or_else(|| last_capture(&FINAL_ANSWER, raw))
        .or_else(|| last_capture(&ANSWER, raw))
        .or_else(|| last_capture(&RESULT, raw))
        .or_else(|| conclusion(raw))
        .or_else(|| last_capture(&EQUATION, raw))
        .or_else(|| standalone_line(raw))
}

/// Extract an answer for every response, preserving order.
pub fn extract_answers(responses: &[ModelResponse]) -> Vec<ExtractedAnswer> {
    responses
        .iter()
        .map(|response| ExtractedAnswer {
            model: response.model.clone(),
            value: extract_final_answer(&response.content),
        })
        .collect()
}

/// Content of the last `\boxed{...}` / `\fbox{...}` group.
fn boxed(text: &str) -> Option<String> {
    let mut found = None;
    for command in ["\\boxed{", "\\fbox{"] {
        for (start, _) in text.match_indices(command) {
            let open = start + command.len() - 1;
            if let Some(inner) = brace_group(text, open) {
                let candidate = inner.trim();
                if !candidate.is_empty() && found.as_ref().is_none_or(|(pos, _)| start > *pos) {
                    found = Some((start, candidate.to_string()));
                }
            }
        }
    }
    found.map(|(_, candidate)| candidate)
}

/// Inner text of the balanced brace group opening at byte `open`.
fn brace_group(text: &str, open: usize) -> Option<&str> {
    let mut depth = 0usize;
    for (offset, c) in text[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[open + 1..open + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

fn last_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).and_then(|m| tidy(m.as_str())))
        .last()
}

/// `Therefore, ...` clauses, reduced to what follows the last `=` or ` is `.
fn conclusion(text: &str) -> Option<String> {
    let clause = last_capture(&CONCLUSION, text)?;
    if let Some((_, rhs)) = clause.rsplit_once('=') {
        return tidy(rhs);
    }
    if let Some((_, rhs)) = clause.rsplit_once(" is ") {
        return tidy(rhs);
    }
    Some(clause)
}

/// The last non-empty line, accepted only if it is a bare number or
/// expression.
fn standalone_line(text: &str) -> Option<String> {
    let line = text.lines().rev().find(|line| !line.trim().is_empty())?;
    let candidate = tidy(line)?;
    if candidate.len() > MAX_STANDALONE_LEN {
        return None;
    }
    parse_polynomial(&normalize_answer(&candidate)).map(|_| candidate)
}

/// Cut a capture at the end of its sentence and strip decoration.
fn tidy(capture: &str) -> Option<String> {
    let clipped = clip_sentence(capture);
    let cleaned = clipped
        .trim()
        .trim_matches(|c: char| matches!(c, '*' | '_' | '`' | '"' | '\''))
        .trim_end_matches([',', ';', ':', '!'])
        .trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Text up to the first period that ends a sentence; decimal points
/// (`3.5`) do not end a sentence.
fn clip_sentence(text: &str) -> &str {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    for (i, &(idx, c)) in chars.iter().enumerate() {
        if c != '.' {
            continue;
        }
        let next_is_digit = chars.get(i + 1).is_some_and(|&(_, n)| n.is_ascii_digit());
        if !next_is_digit {
            return &text[..idx];
        }
    }
    text
}
