//! Priority scoring: four bounded components summed into a 0-100 score.
//!
//! | Component  | Range | Rule                                                      |
//! |------------|-------|-----------------------------------------------------------|
//! | urgency    | 0-40  | past due: 40; undated: 5; else linear decay over 30 days  |
//! | importance | 0-30  | `importance / 10 * 30`                                    |
//! | effort     | 0-15  | `15 / (1 + hours)`: quick wins score higher               |
//! | dependency | 0-15  | `min(dependents, 5) / 5 * 15`                             |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{TaskRecord, TaskSet};
use crate::time::days_until;

pub const URGENCY_MAX: f64 = 40.0;
pub const IMPORTANCE_MAX: f64 = 30.0;
pub const EFFORT_MAX: f64 = 15.0;
pub const DEPENDENCY_MAX: f64 = 15.0;

/// Tunables for the urgency and dependency components.
///
/// Defaults reproduce the documented formula exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Days over which urgency decays from 40 to 0.
    pub urgency_window_days: i64,
    /// Dependents beyond this count add nothing.
    pub dependents_cap: usize,
    /// Urgency for tasks with no due date.
    pub undated_urgency: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            urgency_window_days: 30,
            dependents_cap: 5,
            undated_urgency: 5.0,
        }
    }
}

impl ScoringPolicy {
    /// Copy with every value forced into a range that keeps components bounded.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let undated_urgency = if self.undated_urgency.is_finite() {
            self.undated_urgency.clamp(0.0, URGENCY_MAX)
        } else {
            defaults.undated_urgency
        };
        Self {
            urgency_window_days: self.urgency_window_days.max(1),
            dependents_cap: self.dependents_cap.max(1),
            undated_urgency,
        }
    }
}

/// Coarse classification used by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl PriorityBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            PriorityBand::High
        } else if score >= 50.0 {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityBand::High => "high",
            PriorityBand::Medium => "medium",
            PriorityBand::Low => "low",
        }
    }
}

/// Per-component result, each value already rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
    pub total: f64,

    pub days_until_due: Option<i64>,
    pub importance_rating: u8,
    pub estimated_hours: f64,
    pub dependents: usize,
}

impl ScoreBreakdown {
    /// `urgency: ..; importance: ..; effort: ..; dependency: ..`
    pub fn explanation(&self) -> String {
        let urgency_note = match self.days_until_due {
            None => "no due date".to_string(),
            Some(d) if d < 0 => format!("past due by {} day(s)", -d),
            Some(d) => format!("due in {d} day(s)"),
        };

        [
            format!("urgency: {} ({urgency_note})", decimal(self.urgency)),
            format!(
                "importance: {} (rating {})",
                decimal(self.importance),
                self.importance_rating
            ),
            format!(
                "effort: {} (estimated {} hour(s))",
                decimal(self.effort),
                decimal(self.estimated_hours)
            ),
            format!(
                "dependency: {} ({} dependent(s))",
                decimal(self.dependency),
                self.dependents
            ),
        ]
        .join("; ")
    }
}

/// Whole values keep one decimal place (`15.0`, not `15`).
fn decimal(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn urgency_component(days: Option<i64>, policy: &ScoringPolicy) -> f64 {
    match days {
        None => policy.undated_urgency,
        Some(d) if d < 0 => URGENCY_MAX,
        Some(d) => {
            let window = policy.urgency_window_days as f64;
            ((window - d as f64) / window).max(0.0) * URGENCY_MAX
        }
    }
}

fn importance_component(rating: u8) -> f64 {
    f64::from(rating) / 10.0 * IMPORTANCE_MAX
}

fn effort_component(hours: f64) -> f64 {
    EFFORT_MAX * (1.0 / (1.0 + hours))
}

fn dependency_component(dependents: usize, policy: &ScoringPolicy) -> f64 {
    let cap = policy.dependents_cap;
    dependents.min(cap) as f64 / cap as f64 * DEPENDENCY_MAX
}

/// Score one task given a precomputed dependents count.
pub fn score_breakdown(
    task: &TaskRecord,
    dependents: usize,
    reference_date: NaiveDate,
    policy: &ScoringPolicy,
) -> ScoreBreakdown {
    let policy = policy.sanitized();
    // Records built by hand may bypass the boundary clamps.
    let rating = crate::task::clamp_importance(i64::from(task.importance));
    let hours = crate::task::sanitize_hours(task.estimated_hours);
    let days = task.due_date.map(|due| days_until(reference_date, due));

    let urgency = urgency_component(days, &policy);
    let importance = importance_component(rating);
    let effort = effort_component(hours);
    let dependency = dependency_component(dependents, &policy);

    ScoreBreakdown {
        urgency: round2(urgency),
        importance: round2(importance),
        effort: round2(effort),
        dependency: round2(dependency),
        total: round2(urgency + importance + effort + dependency),
        days_until_due: days,
        importance_rating: rating,
        estimated_hours: hours,
        dependents,
    }
}

/// Number of other tasks in `tasks_by_id` that list `task` as a dependency.
pub fn count_dependents(task: &TaskRecord, tasks_by_id: &TaskSet) -> usize {
    tasks_by_id
        .iter()
        .filter(|other| other.id != task.id)
        .filter(|other| other.dependencies.iter().any(|d| *d == task.id))
        .count()
}

/// Compute `(score, explanation)` for one task against its batch.
pub fn compute_priority_score(
    task: &TaskRecord,
    tasks_by_id: &TaskSet,
    reference_date: NaiveDate,
) -> (f64, String) {
    compute_priority_score_with(task, tasks_by_id, reference_date, &ScoringPolicy::default())
}

pub fn compute_priority_score_with(
    task: &TaskRecord,
    tasks_by_id: &TaskSet,
    reference_date: NaiveDate,
    policy: &ScoringPolicy,
) -> (f64, String) {
    let dependents = count_dependents(task, tasks_by_id);
    let breakdown = score_breakdown(task, dependents, reference_date, policy);
    (breakdown.total, breakdown.explanation())
}
