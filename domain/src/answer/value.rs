//! Normalized answer values and the equivalence comparator.

use super::expression::{Polynomial, parse_polynomial};
use super::normalize::normalize_answer;
use super::rational::Rational;

/// A normalized final answer, ready for comparison.
///
/// A missing answer is represented as `Option::None` at every use site,
/// never as a variant, so that "missing" can never compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    /// A constant, exact rational value (`3`, `3.0`, `6/2`, `\frac{1}{2}`)
    Number(Rational),
    /// A polynomial expression in one or more single-letter variables
    Symbolic {
        /// Normalized source text
        text: String,
        /// Canonical form used for comparison
        polynomial: Polynomial,
    },
    /// Anything else, compared as normalized text with only prose words
    /// case-folded
    Raw(String),
}

impl AnswerValue {
    /// Normalize extracted answer text into a comparable value.
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_answer(raw);
        match parse_polynomial(&normalized) {
            Some(polynomial) => match polynomial.as_constant() {
                Some(value) => AnswerValue::Number(value),
                None => AnswerValue::Symbolic {
                    text: normalized,
                    polynomial,
                },
            },
            None => AnswerValue::Raw(fold_prose_case(&normalized)),
        }
    }

    /// Whether two present answers denote the same result.
    pub fn is_equivalent(&self, other: &AnswerValue) -> bool {
        match (self, other) {
            (AnswerValue::Number(a), AnswerValue::Number(b)) => a == b,
            (
                AnswerValue::Symbolic { polynomial: a, .. },
                AnswerValue::Symbolic { polynomial: b, .. },
            ) => a == b,
            (AnswerValue::Raw(a), AnswerValue::Raw(b)) => !a.is_empty() && a == b,
            _ => false,
        }
    }

    /// Short tag for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            AnswerValue::Number(_) => "number",
            AnswerValue::Symbolic { .. } => "symbolic",
            AnswerValue::Raw(_) => "raw",
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Number(value) => write!(f, "{}", value),
            AnswerValue::Symbolic { polynomial, .. } => write!(f, "{}", polynomial),
            AnswerValue::Raw(text) => write!(f, "{}", text),
        }
    }
}

/// Lower-case plain words of three or more letters.
///
/// Variables (`X` vs `x`), short products (`AB`) and LaTeX commands
/// (`\Sigma` vs `\sigma`) keep their case.
fn fold_prose_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if !c.is_alphabetic() {
            out.push(c);
            continue;
        }
        let mut end = start + c.len_utf8();
        while let Some(&(i, next)) = chars.peek() {
            if !next.is_alphabetic() {
                break;
            }
            end = i + next.len_utf8();
            chars.next();
        }
        let word = &text[start..end];
        let is_command = text[..start].ends_with('\\');
        if !is_command && word.chars().count() >= 3 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(word);
        }
    }
    out
}

/// Comparator over possibly-missing answers.
///
/// A missing answer never agrees with anything, including another
/// missing answer.
pub fn equivalent(a: Option<&AnswerValue>, b: Option<&AnswerValue>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.is_equivalent(b),
        _ => false,
    }
}

/// Text form of [`equivalent`]: normalizes both sides first.
///
/// # Examples
///
/// ```
/// use math_quorum_domain::answer::answers_equivalent;
///
/// assert!(answers_equivalent(Some("3"), Some("3.0")));
/// assert!(answers_equivalent(Some("x+1"), Some("1+x")));
/// assert!(!answers_equivalent(None, None));
/// ```
pub fn answers_equivalent(a: Option<&str>, b: Option<&str>) -> bool {
    let a = a.map(AnswerValue::parse);
    let b = b.map(AnswerValue::parse);
    equivalent(a.as_ref(), b.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same(a: &str, b: &str) -> bool {
        answers_equivalent(Some(a), Some(b))
    }

    #[test]
    fn test_numeric_formatting() {
        assert!(same("3", "3.0"));
        assert!(same("$3$", "3"));
        assert!(same("1/2", "0.5"));
        assert!(same(r"\frac{1}{2}", "0.5"));
        assert!(same("1,000", "1000"));
        assert!(same("x = 4", "4"));
    }

    #[test]
    fn test_symbolic_equivalence() {
        assert!(same("x+1", "1+x"));
        assert!(same("$x^2$", "x*x"));
        assert!(same("2(x+3)", "2x + 6"));
        assert!(same(r"\frac{x}{2}", "0.5x"));
    }

    #[test]
    fn test_different_answers_are_not_equivalent() {
        assert!(!same("2", "3"));
        assert!(!same("0.333", "1/3"));
        assert!(!same("x+1", "x+2"));
        assert!(!same("x", "y"));
        // A number never matches a symbolic expression
        assert!(!same("2", "2x"));
    }

    #[test]
    fn test_raw_answers_compare_as_text() {
        assert!(same("No Solution", "no solution"));
        assert!(same("Sin(x)", "sin(x)"));
        assert!(same(r"\sqrt{2}", r"\sqrt{2}"));
        assert!(!same(r"\sqrt{2}", r"\sqrt{3}"));
        assert!(!same("(1, 2)", "(2, 1)"));
    }

    #[test]
    fn test_raw_answers_keep_meaningful_case() {
        assert!(!same(r"\Sigma", r"\sigma"));
        assert!(!same("sin(X)", "sin(x)"));
        assert!(!same(r"\sqrt{A}", r"\sqrt{a}"));
        assert!(!same("AB", "ab"));
        assert!(!same(r"\Gamma(n)", r"\gamma(n)"));
    }

    #[test]
    fn test_fold_prose_case() {
        assert_eq!(fold_prose_case("No Real Roots"), "no real roots");
        assert_eq!(fold_prose_case(r"\Delta = X"), r"\Delta = X");
        assert_eq!(fold_prose_case("Ab, Cos(Y)"), "Ab, cos(Y)");
    }

    #[test]
    fn test_missing_never_equivalent() {
        assert!(!answers_equivalent(None, None));
        assert!(!answers_equivalent(Some("3"), None));
        assert!(!answers_equivalent(None, Some("3")));
    }

    #[test]
    fn test_empty_raw_never_equivalent() {
        assert!(!same("$$", "$$"));
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(AnswerValue::parse("7").kind(), "number");
        assert_eq!(AnswerValue::parse("x^2-1").kind(), "symbolic");
        assert_eq!(AnswerValue::parse("x = 2 or x = 3").kind(), "raw");
    }
}
