//! Demo suggestions over a fixed sample batch.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analyze::analyze_tasks_with;
use crate::scoring::ScoringPolicy;
use crate::task::{ScoredTask, TaskRecord};

pub const DEFAULT_SUGGESTIONS: usize = 3;

pub const SUGGESTION_REASON: &str =
    "Selected because it ranks among the highest-scoring tasks today.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub task: ScoredTask,
    pub reason: String,
}

fn sample(
    id: &str,
    title: &str,
    due: (i32, u32, u32),
    hours: f64,
    importance: i64,
    deps: &[&str],
) -> TaskRecord {
    let mut task = TaskRecord::new(id, title)
        .with_hours(hours)
        .with_importance(importance)
        .with_dependencies(deps.iter().copied());
    task.due_date = NaiveDate::from_ymd_opt(due.0, due.1, due.2);
    task
}

/// The built-in demo batch.
pub fn sample_tasks() -> Vec<TaskRecord> {
    vec![
        sample("1", "Fix login bug", (2025, 11, 30), 3.0, 8, &[]),
        sample("2", "Write unit tests", (2025, 11, 28), 1.0, 7, &["1"]),
        sample("3", "Prepare documentation", (2025, 12, 5), 2.0, 6, &[]),
        sample("4", "Optimize code", (2025, 11, 27), 5.0, 9, &[]),
    ]
}

/// Analyze the sample batch and return its top `limit` entries.
pub fn suggest(reference_date: NaiveDate, limit: usize, policy: &ScoringPolicy) -> Vec<Suggestion> {
    let analysis = analyze_tasks_with(&sample_tasks(), reference_date, policy);
    analysis
        .tasks
        .into_iter()
        .take(limit)
        .map(|task| Suggestion {
            task,
            reason: SUGGESTION_REASON.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_three_with_reasons() {
        for (y, m, d) in [(2025, 11, 1), (2025, 11, 29), (2026, 6, 1)] {
            let today = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            let top = suggest(today, DEFAULT_SUGGESTIONS, &ScoringPolicy::default());
            assert_eq!(top.len(), 3);
            assert!(top.iter().all(|s| !s.reason.is_empty()));
            assert!(top.windows(2).all(|w| w[0].task.score >= w[1].task.score));
        }
    }

    #[test]
    fn limit_larger_than_sample_returns_all() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        assert_eq!(suggest(today, 10, &ScoringPolicy::default()).len(), 4);
    }

    #[test]
    fn suggestion_serializes_with_reason() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        let top = suggest(today, 1, &ScoringPolicy::default());
        let v = serde_json::to_value(&top[0]).unwrap();
        assert!(v["score"].is_number());
        assert_eq!(v["reason"], SUGGESTION_REASON);
        assert!(v["title"].is_string());
    }
}
