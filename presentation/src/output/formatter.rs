//! Output formatter trait

use math_quorum_domain::Reconciliation;

/// Trait for formatting reconciliation results
pub trait OutputFormatter {
    /// Format the complete result
    fn format(&self, result: &Reconciliation) -> String;

    /// Format as JSON
    fn format_json(&self, result: &Reconciliation) -> String;

    /// Format the answer only (concise output)
    fn format_answer_only(&self, result: &Reconciliation) -> String;
}
