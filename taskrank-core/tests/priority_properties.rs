use chrono::{Duration, NaiveDate};
use taskrank_core::{
    CYCLE_WARNING, ScoredTask, TaskRecord, TaskSet, analyze_tasks, compute_priority_score,
    detect_cycle,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 19).unwrap()
}

fn base(id: &str) -> TaskRecord {
    TaskRecord::new(id, format!("task {id}"))
        .with_due_date(today() + Duration::days(10))
        .with_hours(2.0)
        .with_importance(5)
}

fn score_alone(task: &TaskRecord) -> f64 {
    let set: TaskSet = std::iter::once(task.clone()).collect();
    compute_priority_score(task, &set, today()).0
}

/// Earlier due date never scores lower; past due always takes full urgency.
#[test]
fn test_due_date_monotonic() {
    let scores: Vec<f64> = (-5..45)
        .map(|d| score_alone(&base("t").with_due_date(today() + Duration::days(d))))
        .collect();

    for w in scores.windows(2) {
        assert!(w[0] >= w[1], "{} < {}", w[0], w[1]);
    }

    let overdue = score_alone(&base("t").with_due_date(today() - Duration::days(1)));
    let long_overdue = score_alone(&base("t").with_due_date(today() - Duration::days(90)));
    assert_eq!(overdue, long_overdue);
}

#[test]
fn test_hours_strictly_decreasing() {
    let hours = [0.0, 0.25, 1.0, 3.0, 7.5, 20.0, 100.0];
    let scores: Vec<f64> = hours.iter().map(|h| score_alone(&base("t").with_hours(*h))).collect();
    for w in scores.windows(2) {
        assert!(w[0] > w[1], "{} !> {}", w[0], w[1]);
    }
}

#[test]
fn test_importance_non_decreasing_over_clamped_range() {
    let scores: Vec<f64> = (-3..=14)
        .map(|i| score_alone(&base("t").with_importance(i)))
        .collect();
    for w in scores.windows(2) {
        assert!(w[0] <= w[1]);
    }
}

#[test]
fn test_scores_always_in_range() {
    let dates = [None, Some(-400), Some(-1), Some(0), Some(29), Some(3000)];
    let hours = [-10.0, 0.0, 0.001, 1e9, f64::NAN, f64::INFINITY];
    let importances = [i64::MIN, 0, 5, 11, i64::MAX];

    for d in dates {
        for h in hours {
            for i in importances {
                let mut t = TaskRecord::new("x", "x").with_hours(h).with_importance(i);
                t.due_date = d.map(|days| today() + Duration::days(days));
                let s = score_alone(&t);
                assert!((0.0..=100.0).contains(&s), "{s} out of range");
            }
        }
    }
}

#[test]
fn test_quick_win_example() {
    let quick = base("A").with_due_date(today() + Duration::days(5)).with_hours(0.5);
    let long = base("B").with_due_date(today() + Duration::days(5)).with_hours(20.0);
    let set: TaskSet = vec![quick.clone(), long.clone()].into_iter().collect();

    let (sq, _) = compute_priority_score(&quick, &set, today());
    let (sl, _) = compute_priority_score(&long, &set, today());
    assert!(sq > sl, "quick task should beat a long one with equal due date and importance");
}

#[test]
fn test_ring_and_chain() {
    let ring = vec![
        TaskRecord::new("1", "a").with_dependencies(["2"]),
        TaskRecord::new("2", "b").with_dependencies(["3"]),
        TaskRecord::new("3", "c").with_dependencies(["1"]),
    ];
    let report = detect_cycle(&ring);
    assert!(report.has_cycle);
    assert!(!report.cycles.is_empty());
    for c in &report.cycles {
        assert_eq!(c.first(), c.last());
    }

    let chain = vec![
        TaskRecord::new("1", "a").with_dependencies(["2"]),
        TaskRecord::new("2", "b").with_dependencies(["3"]),
        TaskRecord::new("3", "c"),
    ];
    let report = detect_cycle(&chain);
    assert!(!report.has_cycle);
    assert!(report.cycles.is_empty());
}

/// Every input id shows up exactly once in the output.
#[test]
fn test_analysis_is_one_to_one() {
    let tasks: Vec<TaskRecord> = (0..25)
        .map(|i| {
            base(&i.to_string())
                .with_importance(i % 11)
                .with_hours(i as f64 / 3.0)
                .with_dependencies([((i + 1) % 25).to_string()])
        })
        .collect();

    let a = analyze_tasks(&tasks, today());
    assert_eq!(a.tasks.len(), 25);
    assert_eq!(a.warnings, vec![CYCLE_WARNING.to_string()]);

    let mut ids: Vec<&str> = a.tasks.iter().map(ScoredTask::id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 25);

    for w in a.tasks.windows(2) {
        assert!(w[0].score >= w[1].score);
    }
}

#[test]
fn test_analysis_does_not_touch_input() {
    let tasks = vec![TaskRecord::new("a", ""), base("b").with_dependencies(["a"])];
    let before = tasks.clone();
    let _ = analyze_tasks(&tasks, today());
    assert_eq!(tasks, before);
}
