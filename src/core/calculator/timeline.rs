use crate::models::action::AttendanceAction;
use crate::models::event::AttendanceEvent;
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::BTreeMap;

/// Day at a glance, built from the day's events.
#[derive(Debug, Default, Clone)]
pub struct DayTimeline {
    pub events: Vec<AttendanceEvent>,
    pub clock_in: Option<DateTime<FixedOffset>>,
    pub clock_out: Option<DateTime<FixedOffset>>,
    pub worked_minutes: Option<i64>,
    pub break_minutes: Option<i64>,
}

fn first_of(
    events: &[AttendanceEvent],
    action: AttendanceAction,
) -> Option<DateTime<FixedOffset>> {
    events.iter().find(|e| e.action == action).map(|e| e.time)
}

fn span(
    start: Option<DateTime<FixedOffset>>,
    end: Option<DateTime<FixedOffset>>,
) -> Option<i64> {
    match (start, end) {
        (Some(s), Some(e)) => Some((e - s).num_minutes()),
        _ => None,
    }
}

/// First clock-in to first clock-out.
pub fn worked_minutes(events: &[AttendanceEvent]) -> Option<i64> {
    span(
        first_of(events, AttendanceAction::ClockIn),
        first_of(events, AttendanceAction::ClockOut),
    )
}

/// First break start to first break end.
pub fn break_minutes(events: &[AttendanceEvent]) -> Option<i64> {
    span(
        first_of(events, AttendanceAction::StartBreak),
        first_of(events, AttendanceAction::EndBreak),
    )
}

pub fn build_timeline(events: &[AttendanceEvent]) -> DayTimeline {
    if events.is_empty() {
        return DayTimeline::default();
    }

    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.time);

    DayTimeline {
        clock_in: first_of(&sorted, AttendanceAction::ClockIn),
        clock_out: first_of(&sorted, AttendanceAction::ClockOut),
        worked_minutes: worked_minutes(&sorted),
        break_minutes: break_minutes(&sorted),
        events: sorted,
    }
}

/// History grouped by local calendar day, oldest day first.
pub fn group_by_date(events: &[AttendanceEvent]) -> BTreeMap<NaiveDate, Vec<AttendanceEvent>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<AttendanceEvent>> = BTreeMap::new();
    for ev in events {
        grouped.entry(ev.date()).or_default().push(ev.clone());
    }
    grouped
}
