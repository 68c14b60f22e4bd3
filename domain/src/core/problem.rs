//! Math problem value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Characters that mark text as already being written in math notation.
const MATH_MARKERS: &[char] = &[
    '+', '-', '*', '/', '=', '(', ')', '[', ']', '{', '}', '^', '√', '∫', '∑', 'π',
];

/// Terminal punctuation that leaves the problem text untouched.
const TERMINATORS: &[char] = &['?', '.', ':', ';'];

/// A math problem submitted to the backends (Value Object)
///
/// Holds the text as submitted. [`MathProblem::prepared`] produces the
/// normalized statement that is actually sent to every model and recorded
/// in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    content: String,
}

impl MathProblem {
    /// Try to create a new problem, returning None for empty text
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the problem as submitted
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Normalized problem statement
    ///
    /// Trims the text, terminates it with a period unless it already ends
    /// in `? . : ;`, and prefixes plain-language problems with an explicit
    /// instruction when no math notation is present.
    pub fn prepared(&self) -> String {
        let mut text = self.content.trim().to_string();
        if !text.ends_with(TERMINATORS) {
            text.push('.');
        }
        if !text.contains(MATH_MARKERS) {
            text = format!("Solve the following math problem: {}", text);
        }
        text
    }
}

impl std::fmt::Display for MathProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl std::str::FromStr for MathProblem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s).ok_or(DomainError::EmptyProblem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_empty() {
        assert!(MathProblem::try_new("").is_none());
        assert!(MathProblem::try_new("  \n ").is_none());
        assert!(MathProblem::try_new("2+2").is_some());
    }

    #[test]
    fn test_parse() {
        assert_eq!("".parse::<MathProblem>(), Err(DomainError::EmptyProblem));
        assert_eq!("1+1".parse::<MathProblem>().unwrap().content(), "1+1");
    }

    #[test]
    fn test_prepared_appends_period() {
        let problem = MathProblem::try_new("  2 + 2 ").unwrap();
        assert_eq!(problem.prepared(), "2 + 2.");
    }

    #[test]
    fn test_prepared_keeps_terminator() {
        let problem = MathProblem::try_new("What is 3*4?").unwrap();
        assert_eq!(problem.prepared(), "What is 3*4?");
    }

    #[test]
    fn test_prepared_prefixes_plain_text() {
        let problem = MathProblem::try_new("What is seven times six?").unwrap();
        assert_eq!(
            problem.prepared(),
            "Solve the following math problem: What is seven times six?"
        );
    }

    #[test]
    fn test_content_is_untouched() {
        let problem = MathProblem::try_new(" x^2 = 4 ").unwrap();
        assert_eq!(problem.content(), " x^2 = 4 ");
    }
}
