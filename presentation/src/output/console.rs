//! Console output formatter for batch results

use crate::output::formatter::OutputFormatter;
use crate::output::path_check::{PathCheck, PathVerdict};
use colored::Colorize;
use toolbatch_domain::{ToolCall, ToolOutcome};

/// Formats batch results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every call with its outcome, in call order
    pub fn format(calls: &[ToolCall], outcomes: &[ToolOutcome]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Batch Results"));
        output.push('\n');

        for (call, outcome) in calls.iter().zip(outcomes) {
            let title = format!("── {} {} ──", call.name, call.id);
            if outcome.is_error {
                output.push_str(&format!(
                    "\n{}\nError: {}\n",
                    title.red().bold(),
                    outcome.content
                ));
            } else {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    title.green().bold(),
                    Self::indent(&outcome.content, "  ")
                ));
            }
        }

        let errors = outcomes.iter().filter(|o| o.is_error).count();
        output.push_str(&format!(
            "\n{} {} calls, {} failed\n",
            "Summary:".cyan().bold(),
            outcomes.len(),
            errors
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as a JSON array of `tool_result` blocks
    pub fn format_json(outcomes: &[ToolOutcome]) -> String {
        let wire: Vec<_> = outcomes.iter().map(ToolOutcome::to_wire).collect();
        serde_json::to_string_pretty(&wire).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format one line per checked path
    pub fn format_path_checks(checks: &[PathCheck]) -> String {
        checks
            .iter()
            .map(|check| match &check.verdict {
                PathVerdict::Allowed { relative } => {
                    format!("{}  {} ({})", "allowed".green().bold(), check.path, relative)
                }
                PathVerdict::OutsideWorkspace => {
                    format!("{}   {} (outside workspace)", "denied".red().bold(), check.path)
                }
                PathVerdict::Denied {
                    relative,
                    pattern: Some(pattern),
                } => format!(
                    "{}   {} ({} matches '{}')",
                    "denied".red().bold(),
                    check.path,
                    relative,
                    pattern
                ),
                PathVerdict::Denied {
                    relative,
                    pattern: None,
                } => format!(
                    "{}   {} ({} matches no allowed pattern)",
                    "denied".red().bold(),
                    check.path,
                    relative
                ),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, calls: &[ToolCall], outcomes: &[ToolOutcome]) -> String {
        Self::format(calls, outcomes)
    }

    fn format_json(&self, outcomes: &[ToolOutcome]) -> String {
        Self::format_json(outcomes)
    }
}
