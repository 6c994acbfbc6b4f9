//! Alternative orderings for an analyzed batch.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::task::ScoredTask;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Composite score, highest first.
    #[default]
    Smart,
    /// Fewest estimated hours first.
    Fastest,
    /// Highest importance first.
    Impact,
    /// Earliest due date first; undated tasks last.
    Deadline,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 4] = [
        SortStrategy::Smart,
        SortStrategy::Fastest,
        SortStrategy::Impact,
        SortStrategy::Deadline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortStrategy::Smart => "smart",
            SortStrategy::Fastest => "fastest",
            SortStrategy::Impact => "impact",
            SortStrategy::Deadline => "deadline",
        }
    }

    fn compare(&self, a: &ScoredTask, b: &ScoredTask) -> Ordering {
        match self {
            SortStrategy::Smart => b.score.total_cmp(&a.score),
            SortStrategy::Fastest => a.task.estimated_hours.total_cmp(&b.task.estimated_hours),
            SortStrategy::Impact => b.task.importance.cmp(&a.task.importance),
            SortStrategy::Deadline => match (a.task.due_date, b.task.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SortStrategy::ALL
            .into_iter()
            .find(|st| st.as_str() == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!("unknown sort strategy '{s}' (expected smart, fastest, impact or deadline)")
            })
    }
}

/// Reorder in place. Stable, so ties keep their current order.
pub fn rank(tasks: &mut [ScoredTask], strategy: SortStrategy) {
    tasks.sort_by(|a, b| strategy.compare(a, b));
}
