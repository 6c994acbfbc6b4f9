use chrono::NaiveDate;
use serde_json::Value;
use std::io::Write;
use taskrank_core::{CYCLE_WARNING, analyze_tasks};
use taskrank_ingest::{IngestError, parse_tasks_csv, parse_tasks_json};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
}

/// Malformed fields degrade to defaults instead of failing the batch.
#[test]
fn test_messy_json_still_scores() {
    let tasks = parse_tasks_json(
        r#"[
            {"id": 1, "title": "", "due_date": "whenever", "estimated_hours": "-4", "importance": "eleven"},
            {"id": 2, "title": "Real", "due_date": "2025-11-18", "estimated_hours": 1, "importance": 99, "dependencies": [1, "c"]},
            {"id": "c", "title": "Loop", "dependencies": [2]},
            {"title": "No id"}
        ]"#,
    )
    .unwrap();

    let a = analyze_tasks(&tasks, today());
    assert_eq!(a.tasks.len(), 4);
    assert!(a.tasks.iter().all(|t| (0.0..=100.0).contains(&t.score)));
    assert!(a.warnings.contains(&CYCLE_WARNING.to_string()));
    assert!(a.warnings.iter().any(|w| w.starts_with("task 1 missing title")));
    assert!(a.tasks.iter().any(|t| t.id() == "3"));

    // Past due with max importance and one dependent: top of the list.
    assert_eq!(a.tasks[0].id(), "2");

    let doc: Value = serde_json::to_value(&a).unwrap();
    assert!(doc["tasks"][0]["explanation"].as_str().unwrap().contains("past due by 2 day(s)"));
    assert_eq!(doc["cycles"][0][0], doc["cycles"][0].as_array().unwrap().last().unwrap().clone());
}

#[test]
fn test_structural_errors_are_reported() {
    assert!(matches!(parse_tasks_json("42"), Err(IngestError::NotAnArray)));
    assert!(matches!(
        parse_tasks_json(r#"[{"id": 1}, "two"]"#),
        Err(IngestError::NotAnObject { index: 1 })
    ));
}

#[test]
fn test_csv_file_round_trip_into_analysis() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "id,title,due_date,estimated_hours,importance,dependencies").unwrap();
    writeln!(file, "a,Ship release,2025-11-21,4,9,").unwrap();
    writeln!(file, "b,Write changelog,2025-11-25,0.5,4,a").unwrap();
    writeln!(file, "c,Announce,2025-12-30,1,6,a;b").unwrap();

    let tasks = parse_tasks_csv(file.path()).unwrap();
    assert_eq!(tasks.len(), 3);

    let a = analyze_tasks(&tasks, today());
    assert!(a.warnings.is_empty());
    assert_eq!(a.tasks[0].id(), "a");
}

#[test]
fn test_missing_csv_file_is_io_error() {
    let err = parse_tasks_csv("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, IngestError::Io(_)));
    assert!(!err.is_client_error());
}
