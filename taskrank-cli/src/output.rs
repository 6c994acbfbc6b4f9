//! Human-readable rendering for terminal output.

use std::fmt::Write;

use taskrank_core::{Analysis, PriorityBand, ScoredTask, Suggestion, format_cycle};

fn push_task(out: &mut String, rank: usize, t: &ScoredTask) {
    let band = PriorityBand::from_score(t.score);
    let due = t
        .task
        .due_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let _ = writeln!(
        out,
        "{rank:>2}. [{:>6.2} {:<6}] {} (id {})",
        t.score,
        band.as_str(),
        t.task.title,
        t.task.id
    );
    let _ = writeln!(
        out,
        "    due {due} | {}h | importance {} | deps: {}",
        t.task.estimated_hours,
        t.task.importance,
        if t.task.dependencies.is_empty() {
            "none".to_string()
        } else {
            t.task.dependencies.join(", ")
        }
    );
    let _ = writeln!(out, "    {}", t.explanation);
}

pub fn render_analysis(analysis: &Analysis) -> String {
    let mut out = String::new();

    if analysis.tasks.is_empty() {
        out.push_str("No tasks.\n");
    }
    for (i, t) in analysis.tasks.iter().enumerate() {
        push_task(&mut out, i + 1, t);
    }

    if !analysis.cycles.is_empty() {
        out.push_str("\nCycles:\n");
        for (i, c) in analysis.cycles.iter().enumerate() {
            let _ = writeln!(out, "- cycle {}: {}", i + 1, format_cycle(c));
        }
    }

    if !analysis.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for w in &analysis.warnings {
            let _ = writeln!(out, "- {w}");
        }
    }

    out
}

pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    let mut out = String::from("# Top suggestions\n\n");
    for (i, s) in suggestions.iter().enumerate() {
        push_task(&mut out, i + 1, &s.task);
        let _ = writeln!(out, "    reason: {}", s.reason);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use taskrank_core::{ScoringPolicy, TaskRecord, analyze_tasks, suggest};

    #[test]
    fn analysis_lists_tasks_cycles_and_warnings() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        let tasks = vec![
            TaskRecord::new("1", "").with_dependencies(["2"]),
            TaskRecord::new("2", "Second").with_dependencies(["1"]),
        ];
        let text = render_analysis(&analyze_tasks(&tasks, today));

        assert!(text.contains("<untitled>"));
        assert!(text.contains("Second"));
        assert!(text.contains("cycle 1: 1 → 2 → 1"));
        assert!(text.contains("circular dependency detected"));
        assert!(text.contains("missing title"));
    }

    #[test]
    fn empty_analysis_says_so() {
        assert_eq!(render_analysis(&Analysis::default()), "No tasks.\n");
    }

    #[test]
    fn suggestions_include_reason() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 20).unwrap();
        let text = render_suggestions(&suggest(today, 3, &ScoringPolicy::default()));
        assert_eq!(text.matches("reason: ").count(), 3);
    }
}
