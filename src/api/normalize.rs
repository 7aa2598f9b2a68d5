//! Response-shape adapters.
//!
//! The backend is not consistent about where it puts lists. Everything past
//! this module only sees the canonical models.
//!
//! Precedence, first match wins:
//! - events:    `activities` array → `data` array → bare array → empty
//! - locations: `data` array → `locations` array → bare array → empty
//! - profile:   `user` object → `data` object → bare object
//! - status:    `status` string → `clocked_out`

use crate::errors::{AppError, AppResult};
use crate::models::action::AttendanceAction;
use crate::models::event::AttendanceEvent;
use crate::models::id::RecordId;
use crate::models::location::Location;
use crate::models::session::User;
use crate::models::status::CurrentStatus;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

fn first_array<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .find_map(|k| body.get(*k).and_then(Value::as_array))
        .or_else(|| body.as_array())
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    location: Option<Value>,
    #[serde(default)]
    location_name: Option<String>,
}

/// Parse a server timestamp. RFC 3339 first; naive timestamps are taken as
/// local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|dt| dt.fixed_offset())
}

fn normalize_event(value: &Value) -> Option<AttendanceEvent> {
    let raw: RawEvent = match serde_json::from_value(value.clone()) {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %e, "dropping malformed attendance event");
            return None;
        }
    };

    let label = raw.action.as_deref().or(raw.kind.as_deref()).unwrap_or("");
    let Some(action) = AttendanceAction::normalize(label) else {
        warn!(label, "dropping attendance event with unknown action");
        return None;
    };

    let stamp = raw.time.as_deref().or(raw.created_at.as_deref()).unwrap_or("");
    let Some(time) = parse_timestamp(stamp) else {
        warn!(stamp, "dropping attendance event with unreadable time");
        return None;
    };

    let location = match raw.location {
        Some(Value::String(s)) => Some(s),
        Some(Value::Object(obj)) => obj.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
    .or(raw.location_name);

    Some(AttendanceEvent::new(
        raw.id.unwrap_or_default(),
        action,
        time,
        location,
    ))
}

/// Flat, time-ordered event list out of any supported response shape.
pub fn events(body: &Value) -> Vec<AttendanceEvent> {
    let mut out: Vec<AttendanceEvent> = first_array(body, &["activities", "data"])
        .map(|items| items.iter().filter_map(normalize_event).collect())
        .unwrap_or_default();

    // stable: equal timestamps keep server order
    out.sort_by_key(|e| e.time);
    out
}

pub fn status(body: &Value) -> CurrentStatus {
    match body.get("status").and_then(Value::as_str) {
        Some(raw) => CurrentStatus::parse(raw).unwrap_or_else(|| {
            warn!(raw, "unknown attendance status, assuming clocked_out");
            CurrentStatus::ClockedOut
        }),
        None => CurrentStatus::ClockedOut,
    }
}

pub fn locations(body: &Value) -> Vec<Location> {
    first_array(body, &["data", "locations"])
        .map(|items| {
            items
                .iter()
                .filter_map(|v| match serde_json::from_value::<Location>(v.clone()) {
                    Ok(loc) => Some(loc),
                    Err(e) => {
                        warn!(error = %e, "dropping malformed location");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn profile(body: Value) -> AppResult<User> {
    let inner = match body {
        Value::Object(mut obj) => {
            if let Some(u @ Value::Object(_)) = obj.remove("user") {
                u
            } else if let Some(d @ Value::Object(_)) = obj.remove("data") {
                d
            } else {
                Value::Object(obj)
            }
        }
        other => other,
    };

    serde_json::from_value(inner)
        .map_err(|e| AppError::Auth(format!("Unreadable profile response: {e}")))
}
