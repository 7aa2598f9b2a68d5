use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The four attendance actions a user can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceAction {
    ClockIn,
    StartBreak,
    EndBreak,
    ClockOut,
}

impl AttendanceAction {
    pub const ALL: [AttendanceAction; 4] = [
        AttendanceAction::ClockIn,
        AttendanceAction::StartBreak,
        AttendanceAction::EndBreak,
        AttendanceAction::ClockOut,
    ];

    /// Wire name used by the attendance API.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceAction::ClockIn => "clock_in",
            AttendanceAction::StartBreak => "start_break",
            AttendanceAction::EndBreak => "end_break",
            AttendanceAction::ClockOut => "clock_out",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceAction::ClockIn => "Clock In",
            AttendanceAction::StartBreak => "Start Break",
            AttendanceAction::EndBreak => "End Break",
            AttendanceAction::ClockOut => "Clock Out",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AttendanceAction::ClockIn => "Start your work day",
            AttendanceAction::StartBreak => "Take a break",
            AttendanceAction::EndBreak => "Back to work",
            AttendanceAction::ClockOut => "End your work day",
        }
    }

    /// Normalize both wire names (`clock_in`) and legacy labels (`Clock In`).
    ///
    /// Case is ignored and spaces, dashes and underscores are equivalent.
    pub fn normalize(raw: &str) -> Option<Self> {
        let key: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match key.as_str() {
            "clock_in" | "clockin" => Some(AttendanceAction::ClockIn),
            "start_break" | "startbreak" | "break_start" => Some(AttendanceAction::StartBreak),
            "end_break" | "endbreak" | "break_end" => Some(AttendanceAction::EndBreak),
            "clock_out" | "clockout" => Some(AttendanceAction::ClockOut),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AttendanceAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttendanceAction::normalize(s).ok_or_else(|| {
            format!("Unknown action '{s}'. Use clock_in, start_break, end_break or clock_out")
        })
    }
}

impl Serialize for AttendanceAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttendanceAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        AttendanceAction::normalize(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown attendance action '{raw}'"))
        })
    }
}
