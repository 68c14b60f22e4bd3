//! Console output formatter for reconciliation results and history

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use math_quorum_domain::core::string::{collapse_whitespace, truncate};
use math_quorum_domain::{
    Confidence, ConsensusStatus, HistoryRecord, HistoryStats, HistorySummary, OutputFormat,
    Reconciliation, is_error_marker,
};

/// Widest problem text shown in one history list row
const LIST_PROBLEM_WIDTH: usize = 60;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for everything this formatter renders
    pub fn set_color_enabled(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Render a result in the requested format
    pub fn render(result: &Reconciliation, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(result),
            OutputFormat::Answer => Self::format_answer_only(result),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the complete result
    pub fn format(result: &Reconciliation) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Math Quorum Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Problem:".cyan().bold(),
            result.problem_text
        ));

        output.push_str(&format!(
            "{} {}\n",
            "Models:".cyan().bold(),
            result.models().collect::<Vec<_>>().join(", ")
        ));

        output.push_str(&Self::section_header("Model Answers"));
        for (model, content) in &result.raw_responses {
            let answer = result.raw_answers.get(model).and_then(|a| a.as_deref());
            output.push_str(&Self::answer_line(model, content, answer));
        }

        output.push_str(&Self::section_header("Consensus"));
        output.push_str(&Self::consensus_block(result));

        if let Some(explanation) = &result.explanation {
            output.push_str(&Self::section_header("Explanation"));
            output.push_str(&format!(
                "{}\n\n{}\n",
                format!("From {}", explanation.model).yellow().bold(),
                explanation.best_explanation.trim()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &Reconciliation) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// The agreed answer, or the consensus status when there is none
    pub fn format_answer_only(result: &Reconciliation) -> String {
        match &result.consensus.answer {
            Some(answer) => format!("{}\n", answer),
            None => format!("{}\n", Self::status_label(result.consensus.status)),
        }
    }

    /// One stored record: metadata followed by the full result
    pub fn format_record(record: &HistoryRecord, format: OutputFormat) -> String {
        let reconciliation = record.reconciliation();
        if format != OutputFormat::Full {
            return Self::render(&reconciliation, format);
        }

        let mut output = format!(
            "{} {}\n{} {}\n",
            "Id:".dimmed(),
            record.id,
            "Solved:".dimmed(),
            record.timestamp
        );
        if !record.available_models.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Queried:".dimmed(),
                record.available_models.join(", ")
            ));
        }
        output.push('\n');
        output.push_str(&Self::format(&reconciliation));
        output
    }

    /// History listing, one record per line
    pub fn format_history_list(summaries: &[HistorySummary]) -> String {
        if summaries.is_empty() {
            return format!("{}\n", "No stored results.".dimmed());
        }

        let mut output = String::new();
        for summary in summaries {
            let problem = collapse_whitespace(&summary.problem_text);
            output.push_str(&format!(
                "{}  {}  {}  {}\n",
                summary.id.bold(),
                summary.timestamp.dimmed(),
                Self::colored_confidence(summary.confidence, &format!("{:<6}", summary.confidence.as_str())),
                truncate(&problem, LIST_PROBLEM_WIDTH)
            ));
        }
        output
    }

    /// Human-readable history statistics
    pub fn format_stats(stats: &HistoryStats) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("History Statistics"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Total problems:".cyan().bold(),
            stats.total
        ));
        if stats.total == 0 {
            output.push_str(&Self::footer());
            return output;
        }
        output.push_str(&format!(
            "{} {:.1}%\n",
            "Overall success rate:".cyan().bold(),
            stats.overall_success_rate
        ));

        output.push_str(&Self::section_header("Consensus"));
        for status in ConsensusStatus::all() {
            let rate = stats.consensus_rates.get(status.as_str()).copied().unwrap_or(0.0);
            output.push_str(&format!("  {:<20} {:>6.1}%\n", status.as_str(), rate));
        }

        output.push_str(&Self::section_header("Confidence"));
        for confidence in Confidence::all() {
            let rate = stats
                .confidence_distribution
                .get(confidence.as_str())
                .copied()
                .unwrap_or(0.0);
            output.push_str(&format!(
                "  {} {:>6.1}%\n",
                Self::colored_confidence(confidence, &format!("{:<20}", confidence.as_str())),
                rate
            ));
        }

        output.push_str(&Self::section_header("Models"));
        output.push_str(&format!(
            "  {:<16} {:>10} {:>8} {:>12}\n",
            "model".dimmed(),
            "available".dimmed(),
            "errors".dimmed(),
            "avg length".dimmed()
        ));
        for (model, availability) in &stats.model_availability {
            let errors = stats.error_rates.get(model).copied().unwrap_or(0.0);
            let length = stats
                .response_length
                .get(model)
                .map(|l| format!("{:.0}", l.mean))
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "  {:<16} {:>9.1}% {:>7.1}% {:>12}\n",
                model, availability, errors, length
            ));
        }

        if !stats.model_agreement.is_empty() {
            output.push_str(&Self::section_header("Agreement"));
            for pair in &stats.model_agreement {
                let rate = pair
                    .rate
                    .map(|r| format!("{:.1}%", r * 100.0))
                    .unwrap_or_else(|| "n/a".to_string());
                output.push_str(&format!(
                    "  {:<30} {:>7}  ({} compared)\n",
                    format!("{} / {}", pair.first, pair.second),
                    rate,
                    pair.compared
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Statistics as pretty JSON
    pub fn format_stats_json(stats: &HistoryStats) -> String {
        serde_json::to_string_pretty(stats).unwrap_or_else(|_| "{}".to_string())
    }

    fn answer_line(model: &str, content: &str, answer: Option<&str>) -> String {
        if is_error_marker(content) {
            return format!(
                "  {} {}\n",
                format!("{:<16}", model).red().bold(),
                content.trim().red()
            );
        }
        let answer = match answer {
            Some(a) => a.normal(),
            None => "(no answer found)".dimmed(),
        };
        format!("  {} {}\n", format!("{:<16}", model).yellow().bold(), answer)
    }

    fn consensus_block(result: &Reconciliation) -> String {
        let consensus = &result.consensus;
        let mut output = format!(
            "{} {}\n",
            "Status:".bold(),
            Self::status_label(consensus.status)
        );
        output.push_str(&format!(
            "{} {}\n",
            "Confidence:".bold(),
            Self::colored_confidence(consensus.confidence, consensus.confidence.as_str())
        ));
        if let Some(answer) = &consensus.answer {
            output.push_str(&format!("{} {}\n", "Answer:".bold(), answer.green().bold()));
        }
        if !consensus.agreeing_models.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Agreeing models:".bold(),
                consensus.agreeing_models.join(", ")
            ));
        }
        output
    }

    fn status_label(status: ConsensusStatus) -> ColoredString {
        let label = match status {
            ConsensusStatus::FullConsensus => "Full consensus",
            ConsensusStatus::MajorityConsensus => "Majority consensus",
            ConsensusStatus::NoConsensus => "No consensus",
            ConsensusStatus::InsufficientData => "Insufficient data",
        };
        if status.has_answer() {
            label.green()
        } else {
            label.red()
        }
    }

    fn colored_confidence(confidence: Confidence, text: &str) -> ColoredString {
        match confidence {
            Confidence::High => text.green(),
            Confidence::Medium => text.yellow(),
            Confidence::Low => text.red(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &Reconciliation) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &Reconciliation) -> String {
        Self::format_json(result)
    }

    fn format_answer_only(&self, result: &Reconciliation) -> String {
        Self::format_answer_only(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math_quorum_domain::{ModelResponse, reconcile_responses};

    fn sample() -> Reconciliation {
        colored::control::set_override(false);
        reconcile_responses(
            "What is 1/2 + 1/4?",
            &[
                ModelResponse::success("chatgpt", "Use the common denominator 4: 2/4 + 1/4 = 3/4.\nFinal answer: 3/4"),
                ModelResponse::success("claude", "Converting to decimals, the answer is 0.75"),
                ModelResponse::failure("deepseek", "Timeout"),
            ],
        )
    }

    #[test]
    fn test_full_output_sections() {
        let output = ConsoleFormatter::format(&sample());
        assert!(output.contains("Problem: What is 1/2 + 1/4?"));
        assert!(output.contains("Full consensus"));
        assert!(output.contains("Confidence: medium"));
        assert!(output.contains("Agreeing models: chatgpt, claude"));
        assert!(output.contains("Error: Timeout"));
        assert!(output.contains("From chatgpt"));
    }

    #[test]
    fn test_answer_only() {
        assert_eq!(ConsoleFormatter::format_answer_only(&sample()), "3/4\n");

        let none = reconcile_responses("x", &[ModelResponse::failure("chatgpt", "down")]);
        assert_eq!(
            ConsoleFormatter::format_answer_only(&none),
            "Insufficient data\n"
        );
    }

    #[test]
    fn test_json_field_names() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&sample())).unwrap();
        assert_eq!(json["consensus"]["status"], "full_consensus");
        assert_eq!(json["consensus"]["confidence"], "medium");
        assert_eq!(json["raw_answers"]["deepseek"], serde_json::Value::Null);
        assert_eq!(json["explanation"]["model"], "chatgpt");
    }

    #[test]
    fn test_history_list() {
        colored::control::set_override(false);
        assert!(ConsoleFormatter::format_history_list(&[]).contains("No stored results"));

        let summaries = vec![HistorySummary {
            id: "result_20240501_100000_000".to_string(),
            timestamp: "2024-05-01T10:00:00".to_string(),
            problem_text: "Integrate\n  x^2 from 0 to 1".to_string(),
            confidence: Confidence::High,
        }];
        let output = ConsoleFormatter::format_history_list(&summaries);
        assert!(output.contains("result_20240501_100000_000"));
        assert!(output.contains("Integrate x^2 from 0 to 1"));
    }

    #[test]
    fn test_empty_stats() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_stats(&HistoryStats::default());
        assert!(output.contains("Total problems: 0"));
        assert!(!output.contains("Agreement"));
    }
}
