//! Markdown rendering of the historical report

use super::statistics::{RunStatistics, UsageCount};
use chrono::{DateTime, SecondsFormat, Utc};

/// Runs needed before the trend section is rendered
pub const MIN_RUNS_FOR_TRENDS: usize = 3;

const TITLE: &str = "# Historical Multi-Model Analysis Report";
const NO_DATA_NOTICE: &str =
    "> No workflow runs found. Run the pipeline to collect data.";
const INSUFFICIENT_DATA_NOTICE: &str = "> Not enough data for trend analysis. \
     Run at least 3 workflows to enable trend insights.";

/// Renders [`RunStatistics`] as a Markdown document
pub struct MarkdownReport;

impl MarkdownReport {
    /// Render the report.
    ///
    /// - no runs: title and a "no data" notice only
    /// - fewer than [`MIN_RUNS_FOR_TRENDS`]: tables plus an
    ///   "insufficient data" notice
    /// - otherwise: tables plus a `Trend Notes` section
    pub fn render(stats: &RunStatistics, generated_at: DateTime<Utc>) -> String {
        let mut lines = vec![
            TITLE.to_string(),
            String::new(),
            format!(
                "Generated: {}",
                generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            String::new(),
        ];

        if stats.is_empty() {
            lines.push(NO_DATA_NOTICE.to_string());
            return finish(lines);
        }

        lines.push("## Summary".to_string());
        lines.push(String::new());
        lines.push(format!("- Total analysis runs: **{}**", stats.total_runs));
        if let Some(first) = &stats.first_run {
            lines.push(format!("- First run: {}", first));
        }
        if let Some(last) = &stats.last_run {
            lines.push(format!("- Latest run: {}", last));
        }
        lines.push(String::new());

        push_table(&mut lines, "Model Usage", "Model", &stats.models);
        push_table(&mut lines, "Task Distribution", "Task Type", &stats.tasks);

        if stats.total_runs < MIN_RUNS_FOR_TRENDS {
            lines.push(INSUFFICIENT_DATA_NOTICE.to_string());
        } else {
            push_trends(&mut lines, stats);
        }

        finish(lines)
    }
}

fn push_table(lines: &mut Vec<String>, heading: &str, column: &str, rows: &[UsageCount]) {
    lines.push(format!("## {}", heading));
    lines.push(String::new());
    lines.push(format!("| {} | Runs |", column));
    lines.push("|------|------|".to_string());
    for row in rows {
        lines.push(format!("| {} | {} |", escape_cell(&row.label), row.runs));
    }
    lines.push(String::new());
}

fn push_trends(lines: &mut Vec<String>, stats: &RunStatistics) {
    lines.push("## Trend Notes".to_string());
    lines.push(String::new());

    if let Some(model) = stats.most_used_model() {
        lines.push(format!(
            "- Most used model: **{}** ({} of {} runs, {:.0}%)",
            model.label,
            model.runs,
            stats.total_runs,
            stats.share(model)
        ));
    }
    if let Some(task) = stats.most_common_task() {
        lines.push(format!(
            "- Most common task: **{}** ({} of {} runs, {:.0}%)",
            task.label,
            task.runs,
            stats.total_runs,
            stats.share(task)
        ));
    }
    lines.push(format!("- Distinct models used: {}", stats.models.len()));
    if let (Some(first), Some(last)) = (&stats.first_run, &stats.last_run) {
        lines.push(format!("- Observed period: {} to {}", first, last));
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn finish(mut lines: Vec<String>) -> String {
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
