//! Batch orchestration: normalize, scan for cycles, score, sort.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use crate::graph::DependencyGraph;
use crate::scoring::{ScoringPolicy, score_breakdown};
use crate::task::{ScoredTask, TaskRecord, TaskSet, UNTITLED};

/// Warning added once when any dependency cycle exists.
pub const CYCLE_WARNING: &str = "circular dependency detected";

/// Result of one analysis call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    /// Scored copies, highest score first.
    pub tasks: Vec<ScoredTask>,
    pub cycles: Vec<Vec<String>>,
    pub warnings: Vec<String>,
}

/// Analyze a batch with the default scoring policy.
pub fn analyze_tasks(tasks: &[TaskRecord], reference_date: NaiveDate) -> Analysis {
    analyze_tasks_with(tasks, reference_date, &ScoringPolicy::default())
}

pub fn analyze_tasks_with(
    tasks: &[TaskRecord],
    reference_date: NaiveDate,
    policy: &ScoringPolicy,
) -> Analysis {
    let mut warnings = Vec::new();

    // Both the cycle scan and scoring work on this deduplicated view.
    // A repeated id silently replaces the earlier record; only the log sees it.
    let (set, duplicates) = TaskSet::from_records(tasks.iter().cloned());
    for id in duplicates {
        warn!(task_id = %id, "duplicate task id, later record replaces earlier");
    }

    let graph = DependencyGraph::from_set(&set);
    debug!(
        tasks = graph.node_count(),
        edges = graph.edge_count(),
        %reference_date,
        "analyzing batch"
    );

    let report = graph.find_cycles();
    if report.has_cycle {
        warn!(cycles = report.cycles.len(), "dependency cycle found");
        warnings.push(CYCLE_WARNING.to_string());
    }

    let dependents = graph.dependents_counts();
    let mut scored: Vec<ScoredTask> = Vec::with_capacity(set.len());
    for task in set.iter() {
        if !task.has_title() {
            warnings.push(format!(
                "task {} missing title (set to '{UNTITLED}')",
                task.id
            ));
        }
        let count = dependents.get(&task.id).copied().unwrap_or(0);
        let breakdown = score_breakdown(task, count, reference_date, policy);
        scored.push(ScoredTask::new(task, breakdown.total, breakdown.explanation()));
    }

    // Stable: ties keep input order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    Analysis {
        tasks: scored,
        cycles: report.cycles,
        warnings,
    }
}
