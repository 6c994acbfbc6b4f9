//! taskrank-core: priority scoring and dependency analysis for task batches.
//!
//! Everything here is a pure function of its input. The reference date is
//! always passed in; only [`time::today_in`] reads the clock, and only
//! boundary layers call it.

pub mod analyze;
pub mod graph;
pub mod rank;
pub mod scoring;
pub mod suggest;
pub mod task;
pub mod time;

pub use analyze::{Analysis, CYCLE_WARNING, analyze_tasks, analyze_tasks_with};
pub use graph::{CycleReport, DependencyGraph, detect_cycle, format_cycle};
pub use rank::{SortStrategy, rank};
pub use scoring::{
    PriorityBand, ScoreBreakdown, ScoringPolicy, compute_priority_score,
    compute_priority_score_with, score_breakdown,
};
pub use suggest::{DEFAULT_SUGGESTIONS, SUGGESTION_REASON, Suggestion, sample_tasks, suggest};
pub use task::{ScoredTask, TaskRecord, TaskSet, UNTITLED};
pub use time::{days_until, parse_due_date, today_in};
