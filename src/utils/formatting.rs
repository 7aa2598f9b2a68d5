//! Small text helpers for the terminal views.

use crate::models::status::CurrentStatus;
use crate::utils::colors::{BOLD, GREEN, GREY, RESET, YELLOW};

pub fn bold(s: &str) -> String {
    format!("{BOLD}{s}{RESET}")
}

/// `XXh YYm`, or `--:--` when the value could not be computed.
pub fn optional_duration(mins: Option<i64>) -> String {
    match mins {
        Some(m) => {
            let m = m.max(0);
            format!("{:02}h {:02}m", m / 60, m % 60)
        }
        None => "--:--".to_string(),
    }
}

/// Textual description and ANSI colour for a status.
pub fn describe_status(status: CurrentStatus) -> (String, &'static str) {
    match status {
        CurrentStatus::ClockedIn => (status.label().into(), GREEN),
        CurrentStatus::OnBreak => (status.label().into(), YELLOW),
        CurrentStatus::ClockedOut => (status.label().into(), GREY),
    }
}
