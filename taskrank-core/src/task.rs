//! Task model for the analysis core.
//!
//! `TaskRecord` is the normalized shape every caller hands to the core:
//! loose input (JSON objects, CSV rows) is coerced into it once, at the
//! boundary, by `taskrank-ingest`. Nothing in scoring or graph analysis
//! re-validates fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Display title used for records whose title is blank.
pub const UNTITLED: &str = "<untitled>";

pub const DEFAULT_IMPORTANCE: u8 = 5;
pub const MIN_IMPORTANCE: u8 = 1;
pub const MAX_IMPORTANCE: u8 = 10;

/// Clamp a raw importance rating into `[1, 10]`.
pub fn clamp_importance(raw: i64) -> u8 {
    raw.clamp(i64::from(MIN_IMPORTANCE), i64::from(MAX_IMPORTANCE)) as u8
}

/// Hours must be finite and non-negative; anything else becomes 0.0.
pub fn sanitize_hours(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 { raw } else { 0.0 }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,

    /// Calendar due date, if any.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// Effort estimate in hours, always >= 0.
    #[serde(default)]
    pub estimated_hours: f64,

    /// 1-10, higher means more important.
    #[serde(default = "default_importance")]
    pub importance: u8,

    /// Ids of tasks that must complete before this one.
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Input fields the core does not interpret, carried to the output copy.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_importance() -> u8 {
    DEFAULT_IMPORTANCE
}

impl TaskRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
            estimated_hours: 0.0,
            importance: DEFAULT_IMPORTANCE,
            dependencies: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = sanitize_hours(hours);
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = clamp_importance(importance);
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Title for display: the placeholder when blank.
    pub fn display_title(&self) -> &str {
        if self.has_title() { &self.title } else { UNTITLED }
    }
}

/// Enriched output record: a copy of the input plus its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: TaskRecord,
    pub score: f64,
    pub explanation: String,
}

impl ScoredTask {
    /// Build the output copy. A blank title is replaced by [`UNTITLED`]
    /// in the copy only; `task` itself is left as the caller passed it.
    pub fn new(task: &TaskRecord, score: f64, explanation: impl Into<String>) -> Self {
        let mut copy = task.clone();
        if !copy.has_title() {
            copy.title = UNTITLED.to_string();
        }
        Self {
            task: copy,
            score,
            explanation: explanation.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.task.id
    }
}

/// Ordered, id-keyed view of one batch.
///
/// Insertion order is the order ids were first seen. Upserting an id that
/// already exists replaces the record in place, so the last record wins
/// while keeping the first position.
#[derive(Debug, Default, Clone)]
pub struct TaskSet {
    order: Vec<String>,
    tasks: HashMap<String, TaskRecord>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from records, returning the ids that appeared more than
    /// once (one entry per extra occurrence, in encounter order).
    pub fn from_records<I>(records: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = TaskRecord>,
    {
        let mut set = Self::new();
        let mut duplicates = Vec::new();
        for record in records {
            let id = record.id.clone();
            if set.upsert(record).is_some() {
                duplicates.push(id);
            }
        }
        (set, duplicates)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&TaskRecord> {
        self.tasks.get(id)
    }

    /// Insert or replace; returns the replaced record.
    pub fn upsert(&mut self, task: TaskRecord) -> Option<TaskRecord> {
        if !self.tasks.contains_key(&task.id) {
            self.order.push(task.id.clone());
        }
        self.tasks.insert(task.id.clone(), task)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskRecord> {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }
}

impl FromIterator<TaskRecord> for TaskSet {
    fn from_iter<I: IntoIterator<Item = TaskRecord>>(iter: I) -> Self {
        Self::from_records(iter).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_clamp_like_the_boundary() {
        let t = TaskRecord::new("a", "x").with_importance(42).with_hours(-3.0);
        assert_eq!(t.importance, 10);
        assert_eq!(t.estimated_hours, 0.0);

        let low = TaskRecord::new("b", "y").with_importance(-7).with_hours(f64::NAN);
        assert_eq!(low.importance, 1);
        assert_eq!(low.estimated_hours, 0.0);
    }

    #[test]
    fn duplicate_id_keeps_first_position_and_last_value() {
        let (set, dups) = TaskSet::from_records(vec![
            TaskRecord::new("1", "first"),
            TaskRecord::new("2", "second"),
            TaskRecord::new("1", "replacement"),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(dups, vec!["1".to_string()]);
        let ids: Vec<&str> = set.ids().collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(set.get("1").unwrap().title, "replacement");
    }

    #[test]
    fn scored_copy_uses_placeholder_without_touching_input() {
        let input = TaskRecord::new("7", "   ");
        let scored = ScoredTask::new(&input, 12.5, "x");
        assert_eq!(scored.task.title, UNTITLED);
        assert_eq!(input.title, "   ");
    }

    #[test]
    fn scored_task_serializes_flat() {
        let mut input = TaskRecord::new("t1", "Fix bug").with_importance(8);
        input
            .extra
            .insert("owner".to_string(), Value::String("sam".to_string()));
        let v = serde_json::to_value(ScoredTask::new(&input, 55.0, "why")).unwrap();

        assert_eq!(v["id"], "t1");
        assert_eq!(v["importance"], 8);
        assert_eq!(v["owner"], "sam");
        assert_eq!(v["score"], 55.0);
        assert_eq!(v["explanation"], "why");
        assert!(v["due_date"].is_null());
    }
}
