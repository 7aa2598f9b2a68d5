use super::{action::AttendanceAction, id::RecordId};
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use serde::Serialize;

/// A recorded attendance event, already normalized from the server shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceEvent {
    pub id: RecordId,
    pub action: AttendanceAction,
    pub time: DateTime<FixedOffset>,
    pub location: Option<String>,
}

impl AttendanceEvent {
    pub fn new(
        id: RecordId,
        action: AttendanceAction,
        time: DateTime<FixedOffset>,
        location: Option<String>,
    ) -> Self {
        Self {
            id,
            action,
            time,
            location,
        }
    }

    pub fn local_time(&self) -> DateTime<Local> {
        self.time.with_timezone(&Local)
    }

    pub fn date(&self) -> NaiveDate {
        self.local_time().date_naive()
    }

    pub fn date_str(&self) -> String {
        self.local_time().format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.local_time().format("%H:%M").to_string()
    }

    pub fn location_or_dash(&self) -> &str {
        self.location.as_deref().unwrap_or("-")
    }
}
