//! Text normalization applied before answers are compared.
//!
//! Strips presentation wrappers (dollar signs, LaTeX delimiters, `\boxed`,
//! `\text`) and rewrites common LaTeX/Unicode operators into the ASCII
//! forms the expression parser understands.

use crate::core::string::collapse_whitespace;
use regex::Regex;
use std::sync::LazyLock;

static THOUSANDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,3}(,\d{3})+(\.\d+)?$").expect("valid regex"));

static ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]\s*=\s*(.+)$").expect("valid regex"));

/// Simple textual rewrites, applied in order.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("\\displaystyle", ""),
    ("\\left", ""),
    ("\\right", ""),
    ("\\,", " "),
    ("\\;", " "),
    ("\\!", ""),
    ("\\cdot", "*"),
    ("\\times", "*"),
    ("\\div", "/"),
    ("×", "*"),
    ("·", "*"),
    ("÷", "/"),
    ("−", "-"),
    ("–", "-"),
];

/// Normalize an extracted answer for comparison.
///
/// # Examples
///
/// ```
/// use math_quorum_domain::answer::normalize::normalize_answer;
///
/// assert_eq!(normalize_answer("$x = 42$"), "42");
/// assert_eq!(normalize_answer(r"\boxed{\frac{1}{2}}"), "(1)/(2)");
/// assert_eq!(normalize_answer("1,000"), "1000");
/// ```
pub fn normalize_answer(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    text = strip_delimiters(&text);
    for wrapper in ["\\boxed", "\\fbox", "\\text", "\\mathrm", "\\mathbf"] {
        text = unwrap_command(&text, wrapper);
    }
    text = rewrite_fractions(&text);
    for (from, to) in REPLACEMENTS {
        text = text.replace(from, to);
    }
    text = strip_delimiters(&collapse_whitespace(&text));

    let trimmed = text.trim_end_matches(['.', ';']).trim();
    text = trimmed.to_string();

    if let Some(caps) = ASSIGNMENT.captures(&text) {
        text = caps[1].trim().to_string();
    }

    if THOUSANDS.is_match(&text) {
        text = text.replace(',', "");
    }

    text
}

/// Remove surrounding `$...$`, `$$...$$`, `\(...\)` and `\[...\]`.
fn strip_delimiters(text: &str) -> String {
    let mut current = text.trim();
    loop {
        let stripped = [("$$", "$$"), ("$", "$"), ("\\(", "\\)"), ("\\[", "\\]")]
            .iter()
            .find_map(|(open, close)| {
                current
                    .strip_prefix(open)
                    .and_then(|rest| rest.strip_suffix(close))
            });
        match stripped {
            Some(inner) => current = inner.trim(),
            None => return current.to_string(),
        }
    }
}

/// Find the index just past the brace group starting at `open`
/// (which must point at `{`).
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, b) in bytes[open..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Replace every `\cmd{body}` with `body`.
fn unwrap_command(text: &str, command: &str) -> String {
    let mut result = text.to_string();
    while let Some(start) = result.find(&format!("{command}{{")) {
        let open = start + command.len();
        let Some(end) = matching_brace(result.as_bytes(), open) else {
            break;
        };
        let body = result[open + 1..end - 1].to_string();
        result.replace_range(start..end, &body);
    }
    result
}

/// Rewrite `\frac{a}{b}` (and `\dfrac`, `\tfrac`) into `(a)/(b)`.
fn rewrite_fractions(text: &str) -> String {
    let mut result = text.to_string();
    for command in ["\\dfrac", "\\tfrac", "\\frac"] {
        while let Some(start) = result.find(&format!("{command}{{")) {
            let num_open = start + command.len();
            let Some(num_end) = matching_brace(result.as_bytes(), num_open) else {
                return result;
            };
            if result.as_bytes().get(num_end) != Some(&b'{') {
                return result;
            }
            let Some(den_end) = matching_brace(result.as_bytes(), num_end) else {
                return result;
            };
            let numerator = &result[num_open + 1..num_end - 1];
            let denominator = &result[num_end + 1..den_end - 1];
            let rewritten = format!("({})/({})", numerator, denominator);
            result.replace_range(start..den_end, &rewritten);
        }
    }
    result
}
