/// ANSI color helper utilities for terminal output.
use crate::models::action::AttendanceAction;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Greyed-out rendering for empty placeholders (`--:--`, `-`).
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "--:--" || v == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Green when work starts, yellow for breaks, red when work stops.
pub fn color_for_action(action: AttendanceAction) -> &'static str {
    match action {
        AttendanceAction::ClockIn | AttendanceAction::EndBreak => GREEN,
        AttendanceAction::StartBreak => YELLOW,
        AttendanceAction::ClockOut => RED,
    }
}

pub fn colorize_action(action: AttendanceAction) -> String {
    format!("{}{}{}", color_for_action(action), action.label(), RESET)
}
