use serde::Serialize;
use std::fmt;

/// Current attendance status as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentStatus {
    ClockedIn,
    OnBreak,
    #[default]
    ClockedOut,
}

impl CurrentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrentStatus::ClockedIn => "clocked_in",
            CurrentStatus::OnBreak => "on_break",
            CurrentStatus::ClockedOut => "clocked_out",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CurrentStatus::ClockedIn => "Clocked in",
            CurrentStatus::OnBreak => "On break",
            CurrentStatus::ClockedOut => "Clocked out",
        }
    }

    /// Tolerant parse: `clocked_in`, `Clocked In`, `on-break`, ...
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match key.as_str() {
            "clocked_in" | "working" => Some(CurrentStatus::ClockedIn),
            "on_break" => Some(CurrentStatus::OnBreak),
            "clocked_out" => Some(CurrentStatus::ClockedOut),
            _ => None,
        }
    }
}

impl fmt::Display for CurrentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
