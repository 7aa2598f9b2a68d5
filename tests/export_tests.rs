use chrono::DateTime;
use rattendance::export::{ExportFormat, export_events, save_blob};
use rattendance::models::action::AttendanceAction;
use rattendance::models::event::AttendanceEvent;
use rattendance::models::id::RecordId;
use std::fs;

fn sample() -> Vec<AttendanceEvent> {
    vec![
        AttendanceEvent::new(
            RecordId::from(1),
            AttendanceAction::ClockIn,
            DateTime::parse_from_rfc3339("2025-09-01T08:00:00+00:00").unwrap(),
            Some("Office A".into()),
        ),
        AttendanceEvent::new(
            RecordId::from(2),
            AttendanceAction::ClockOut,
            DateTime::parse_from_rfc3339("2025-09-01T17:00:00+00:00").unwrap(),
            None,
        ),
    ]
}

#[test]
fn test_export_events_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("events.csv");

    export_events(&sample(), ExportFormat::Csv, &out, false).expect("csv export");

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("id,date,time,action,location,timestamp"));
    assert!(content.contains("clock_in"));
    assert!(content.contains("Office A"));
    assert!(content.contains("2025-09-01T17:00:00+00:00"));
}

#[test]
fn test_export_events_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("events.json");

    export_events(&sample(), ExportFormat::Json, &out, false).expect("json export");

    let rows: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["action"], "clock_in");
    assert_eq!(rows[1]["location"], "");
}

#[test]
fn test_export_overwrite_needs_force() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("server.csv");
    fs::write(&out, "old").unwrap();

    save_blob(b"new", &out, true).expect("forced overwrite");
    assert_eq!(fs::read_to_string(&out).unwrap(), "new");
}
