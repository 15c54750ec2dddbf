//! Console output formatter for pipeline results

use colored::Colorize;
use pipeline_application::{HistoricalReport, RoutingDecision};
use pipeline_domain::{AnalysisResult, ConfigIssue, Settings, Severity, known_sections};

/// Formats pipeline results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a completed analysis
    pub fn format_result(result: &AnalysisResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Analysis Result"));
        output.push('\n');
        output.push_str(&Self::field("Task:", result.task_type().as_str()));
        output.push_str(&Self::field("Model:", result.model().as_str()));
        output.push_str(&Self::field("Time:", &result.timestamp_iso()));

        output.push_str(&Self::section_header("Output"));
        output.push_str(result.output());
        output.push('\n');
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_result_json(result: &AnalysisResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a routing decision (`classify`)
    pub fn format_routing(decision: &RoutingDecision) -> String {
        let mut output = String::new();

        output.push_str(&Self::field("Task:", decision.task.as_str()));
        output.push_str(&Self::field("Model:", decision.model.as_str()));
        if decision.prompt.used_template_fallback() {
            output.push_str(&format!(
                "{}\n",
                "No prompt template for this task; the content is repeated as the template"
                    .yellow()
            ));
        }

        output.push_str(&Self::section_header("Prompt"));
        output.push_str(&Self::indent(decision.prompt.text(), "  "));
        output.push('\n');

        output
    }

    /// Format merged settings with the layers that produced them
    pub fn format_settings(settings: &Settings, sources: &[String], issues: &[ConfigIssue]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Configuration"));
        output.push('\n');

        output.push_str(&format!("{}\n", "Sources (lowest priority first):".cyan().bold()));
        for source in sources {
            output.push_str(&format!("  - {}\n", source));
        }

        for section in known_sections() {
            output.push_str(&format!(
                "\n{} {}\n",
                section.key.cyan().bold(),
                format!("({})", section.description).dimmed()
            ));
            match section.key {
                "models" => {
                    output.push_str(&format!("  default: {}\n", settings.models.default));
                    output.push_str(&format!("  classifier: {}\n", settings.models.classifier));
                    for (role, model) in &settings.models.extra {
                        output.push_str(&format!("  {}: {}\n", role, model));
                    }
                }
                "model_assignments" => {
                    if settings.model_assignments.is_empty() {
                        output.push_str(&format!("  {}\n", "(none)".dimmed()));
                    }
                    for (task, model) in &settings.model_assignments {
                        output.push_str(&format!("  {}: {}\n", task, model));
                    }
                }
                "prompts" => {
                    if settings.prompts.is_empty() {
                        output.push_str(&format!("  {}\n", "(none)".dimmed()));
                    }
                    for (task, template) in &settings.prompts {
                        output.push_str(&format!("  {}: {:?}\n", task, template));
                    }
                }
                "thresholds" => {
                    output.push_str(&format!(
                        "  max_response_time: {}s\n  min_response_length: {}\n",
                        settings.thresholds.max_response_time,
                        settings.thresholds.min_response_length
                    ));
                }
                "executor" => {
                    output.push_str(&format!("  backend: {}\n", settings.executor.backend));
                    output.push_str(&format!("  binary: {}\n", settings.executor.binary));
                    output.push_str(&format!("  base_url: {}\n", settings.executor.base_url));
                }
                _ => {}
            }
        }

        if !issues.is_empty() {
            output.push_str(&Self::section_header("Issues"));
            for issue in issues {
                output.push_str(&format!("  {}\n", Self::format_issue(issue)));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// One config issue, colored by severity
    pub fn format_issue(issue: &ConfigIssue) -> String {
        let label = match issue.severity {
            Severity::Error => "error:".red().bold(),
            Severity::Warning => "warning:".yellow().bold(),
        };
        format!("{} {}", label, issue.message)
    }

    /// Confirmation after `report` wrote its file
    pub fn format_report_written(path: &str, report: &HistoricalReport) -> String {
        let mut output = format!(
            "{} {} ({} run(s))\n",
            "Report written to".green(),
            path,
            report.statistics.total_runs
        );
        if report.skipped > 0 {
            output.push_str(&format!(
                "{}\n",
                format!("{} unreadable summary file(s) skipped", report.skipped).yellow()
            ));
        }
        output
    }

    fn field(label: &str, value: &str) -> String {
        format!("{} {}\n", label.cyan().bold(), value)
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

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
