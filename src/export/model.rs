// src/export/model.rs

use crate::models::event::AttendanceEvent;
use serde::Serialize;

/// Flat row used by the CSV and JSON exports.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EventExport {
    pub id: String,
    pub date: String,
    pub time: String,
    pub action: String,
    pub location: String,
    pub timestamp: String,
}

impl From<&AttendanceEvent> for EventExport {
    fn from(e: &AttendanceEvent) -> Self {
        Self {
            id: e.id.to_string(),
            date: e.date_str(),
            time: e.time_str(),
            action: e.action.as_str().to_string(),
            location: e.location.clone().unwrap_or_default(),
            timestamp: e.time.to_rfc3339(),
        }
    }
}
