//! Aggregated run statistics

use super::summary::PersistedSummary;
use serde::Serialize;

/// Number of runs attributed to one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageCount {
    pub label: String,
    pub runs: usize,
}

/// Totals across all persisted runs.
///
/// Per-label counts keep first-seen order, which is chronological when
/// summaries are loaded from sorted run directories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    pub total_runs: usize,
    pub models: Vec<UsageCount>,
    pub tasks: Vec<UsageCount>,
    pub first_run: Option<String>,
    pub last_run: Option<String>,
}

impl RunStatistics {
    pub fn from_summaries(summaries: &[PersistedSummary]) -> Self {
        let mut stats = Self {
            total_runs: summaries.len(),
            ..Self::default()
        };

        for summary in summaries {
            tally(&mut stats.models, &summary.model);
            tally(&mut stats.tasks, &summary.task_type);

            if let Some(ts) = &summary.timestamp {
                // RFC 3339 UTC strings order lexicographically
                if stats.first_run.as_ref().is_none_or(|first| ts < first) {
                    stats.first_run = Some(ts.clone());
                }
                if stats.last_run.as_ref().is_none_or(|last| ts > last) {
                    stats.last_run = Some(ts.clone());
                }
            }
        }

        stats
    }

    pub fn is_empty(&self) -> bool {
        self.total_runs == 0
    }

    /// Model with the most runs (earliest seen wins ties)
    pub fn most_used_model(&self) -> Option<&UsageCount> {
        most_runs(&self.models)
    }

    /// Task type with the most runs (earliest seen wins ties)
    pub fn most_common_task(&self) -> Option<&UsageCount> {
        most_runs(&self.tasks)
    }

    /// Share of all runs, in percent
    pub fn share(&self, usage: &UsageCount) -> f64 {
        if self.total_runs == 0 {
            return 0.0;
        }
        usage.runs as f64 * 100.0 / self.total_runs as f64
    }
}

fn tally(counts: &mut Vec<UsageCount>, label: &str) {
    match counts.iter_mut().find(|c| c.label == label) {
        Some(count) => count.runs += 1,
        None => counts.push(UsageCount {
            label: label.to_string(),
            runs: 1,
        }),
    }
}

fn most_runs(counts: &[UsageCount]) -> Option<&UsageCount> {
    counts
        .iter()
        .fold(None, |best: Option<&UsageCount>, c| match best {
            Some(b) if b.runs >= c.runs => Some(b),
            _ => Some(c),
        })
}
