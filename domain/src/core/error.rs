//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// The consensus engine itself never fails; these cover the inputs
/// that surround it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("The problem text is empty")]
    EmptyProblem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::EmptyProblem.to_string(),
            "The problem text is empty"
        );
    }
}
