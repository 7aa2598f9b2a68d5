use chrono::{DateTime, NaiveDate};
use rattendance::api::{HistoryFilter, normalize};
use rattendance::cli::commands::records::build_filter;
use rattendance::core::calculator::timeline::{
    break_minutes, build_timeline, group_by_date, worked_minutes,
};
use rattendance::core::routes::{Route, guard};
use rattendance::models::action::AttendanceAction;
use rattendance::models::event::AttendanceEvent;
use rattendance::models::id::RecordId;
use rattendance::models::status::CurrentStatus;
use rattendance::utils::date::range_bounds;
use rattendance::utils::formatting::optional_duration;
use serde_json::json;

fn ev(action: AttendanceAction, at: &str) -> AttendanceEvent {
    AttendanceEvent::new(
        RecordId::default(),
        action,
        DateTime::parse_from_rfc3339(at).unwrap(),
        None,
    )
}

#[test]
fn legacy_action_labels_normalize() {
    let cases = [
        ("clock_in", AttendanceAction::ClockIn),
        ("Clock In", AttendanceAction::ClockIn),
        ("CLOCK-OUT", AttendanceAction::ClockOut),
        ("Start Break", AttendanceAction::StartBreak),
        ("break_end", AttendanceAction::EndBreak),
    ];
    for (raw, expected) in cases {
        assert_eq!(AttendanceAction::normalize(raw), Some(expected), "{raw}");
    }
    assert_eq!(AttendanceAction::normalize("lunch"), None);
}

#[test]
fn actions_serialize_with_wire_names() {
    assert_eq!(
        serde_json::to_value(AttendanceAction::StartBreak).unwrap(),
        json!("start_break")
    );
    let parsed: AttendanceAction = serde_json::from_value(json!("End Break")).unwrap();
    assert_eq!(parsed, AttendanceAction::EndBreak);
}

#[test]
fn events_shape_precedence_and_ordering() {
    let data_only = json!({ "data": [
        { "id": "b", "action": "clock_out", "time": "2024-01-01T17:00:00Z" },
        { "id": "a", "type": "Clock In", "time": "2024-01-01T08:00:00Z" }
    ]});
    let events = normalize::events(&data_only);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, RecordId::from("a"));

    let bare = json!([{ "id": 1, "action": "clock_in", "time": "2024-01-01T08:00:00Z" }]);
    assert_eq!(normalize::events(&bare).len(), 1);

    assert!(normalize::events(&json!({ "message": "nothing" })).is_empty());
}

#[test]
fn events_drop_unreadable_entries() {
    let body = json!({ "activities": [
        { "id": 1, "action": "teleport", "time": "2024-01-01T08:00:00Z" },
        { "id": 2, "action": "clock_in", "time": "yesterday" },
        { "id": 3, "action": "clock_in", "time": "2024-01-01T08:00:00Z",
          "location": { "name": "Office A" } }
    ]});
    let events = normalize::events(&body);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].location.as_deref(), Some("Office A"));
}

#[test]
fn status_parsing_is_tolerant() {
    assert_eq!(
        normalize::status(&json!({ "status": "Clocked In" })),
        CurrentStatus::ClockedIn
    );
    assert_eq!(
        normalize::status(&json!({ "status": "on_break" })),
        CurrentStatus::OnBreak
    );
    assert_eq!(
        normalize::status(&json!({ "status": "?" })),
        CurrentStatus::ClockedOut
    );
    assert_eq!(normalize::status(&json!(null)), CurrentStatus::ClockedOut);
}

#[test]
fn locations_shape_precedence() {
    let body = json!({
        "data": [ { "id": 1, "name": "HQ" } ],
        "locations": [ { "id": 2, "name": "Depot" } ]
    });
    let locs = normalize::locations(&body);
    assert_eq!(locs.len(), 1);
    assert_eq!(locs[0].name, "HQ");
    assert_eq!(locs[0].id.to_string(), "1");

    let locs = normalize::locations(&json!({ "locations": [ { "id": "L2", "name": "Depot" } ] }));
    assert_eq!(locs[0].name, "Depot");
}

#[test]
fn profile_shape_precedence() {
    let u = normalize::profile(json!({ "user": { "id": 1, "name": "A" }, "data": { "id": 2 } }))
        .unwrap();
    assert_eq!(u.id, RecordId::from(1));

    let u = normalize::profile(json!({ "id": 3, "name": "C", "email": "c@x" })).unwrap();
    assert_eq!(u.email, "c@x");
}

#[test]
fn guard_redirects_by_session_presence() {
    assert_eq!(guard(Route::Attendance, false), Route::Login);
    assert_eq!(guard(Route::ScanQr, false), Route::Login);
    assert_eq!(guard(Route::CreateQr, true), Route::CreateQr);
    assert_eq!(guard(Route::Login, true), Route::Dashboard);
    assert_eq!(guard(Route::Register, true), Route::Dashboard);
    assert_eq!(guard(Route::Register, false), Route::Register);
    assert_eq!(guard(Route::NotFound, false), Route::NotFound);

    assert_eq!(Route::from_path("/"), Route::Dashboard);
    assert_eq!(Route::from_path("/qr/create"), Route::CreateQr);
    assert_eq!(Route::from_path("/nope"), Route::NotFound);
}

#[test]
fn day_calculator_worked_and_break_time() {
    let day = vec![
        ev(AttendanceAction::ClockOut, "2024-01-01T17:00:00+00:00"),
        ev(AttendanceAction::ClockIn, "2024-01-01T08:00:00+00:00"),
        ev(AttendanceAction::StartBreak, "2024-01-01T12:00:00+00:00"),
        ev(AttendanceAction::EndBreak, "2024-01-01T12:45:00+00:00"),
    ];

    let timeline = build_timeline(&day);
    assert_eq!(timeline.worked_minutes, Some(540));
    assert_eq!(timeline.break_minutes, Some(45));
    assert_eq!(timeline.events[0].action, AttendanceAction::ClockIn);

    assert_eq!(optional_duration(timeline.worked_minutes), "09h 00m");
    assert_eq!(optional_duration(worked_minutes(&day[1..3])), "--:--");
    assert_eq!(break_minutes(&[]), None);
}

#[test]
fn history_groups_by_day() {
    let history = vec![
        ev(AttendanceAction::ClockIn, "2024-01-02T12:00:00+00:00"),
        ev(AttendanceAction::ClockIn, "2024-01-01T12:00:00+00:00"),
        ev(AttendanceAction::ClockOut, "2024-01-01T13:00:00+00:00"),
    ];
    let grouped = group_by_date(&history);
    assert_eq!(grouped.len(), 2);
    let first = grouped.values().next().unwrap();
    assert_eq!(first.len(), 2);
}

#[test]
fn period_ranges_resolve_to_bounds() {
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
    assert_eq!(range_bounds("2024-02").unwrap(), (d(2024, 2, 1), d(2024, 2, 29)));
    assert_eq!(range_bounds("2024").unwrap(), (d(2024, 1, 1), d(2024, 12, 31)));
    assert_eq!(
        range_bounds("2024-01-10:2024-02").unwrap(),
        (d(2024, 1, 10), d(2024, 2, 29))
    );
    assert!(range_bounds("2024-03:2024-01").is_err());
    assert!(range_bounds("soon").is_err());
}

#[test]
fn history_filter_without_period_sends_no_dates() {
    let filter = build_filter(None, &[]).unwrap();
    assert_eq!(filter, HistoryFilter::default());
    assert!(filter.to_query().is_empty());

    let filter = build_filter(None, &["site=HQ".to_string()]).unwrap();
    assert_eq!(
        filter.to_query(),
        vec![("site".to_string(), "HQ".to_string())]
    );

    let filter = build_filter(Some("2024-02"), &[]).unwrap();
    assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2024, 2, 1));
    assert_eq!(filter.end_date, NaiveDate::from_ymd_opt(2024, 2, 29));
}
