//! Terminal rendering of attendance data.

use crate::core::calculator::timeline::{DayTimeline, build_timeline, group_by_date};
use crate::models::event::AttendanceEvent;
use crate::models::location::Location;
use crate::models::status::CurrentStatus;
use crate::utils::colors::{CYAN, RESET, colorize_action, colorize_optional};
use crate::utils::formatting::{bold, describe_status, optional_duration};
use crate::utils::table::{Column, Table};

fn clock(t: Option<chrono::DateTime<chrono::FixedOffset>>) -> String {
    t.map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

pub fn print_status(status: CurrentStatus) {
    let (label, color) = describe_status(status);
    println!("{} {}{}{}", bold("Status:"), color, label, RESET);
}

pub fn print_events(events: &[AttendanceEvent]) {
    let mut table = Table::new(vec![
        Column::new("TIME", 7),
        Column::new("ACTION", 12),
        Column::new("LOCATION", 24),
    ]);
    for ev in events {
        table.add_row(vec![
            ev.time_str(),
            colorize_action(ev.action),
            colorize_optional(ev.location_or_dash()),
        ]);
    }
    print!("{}", table.render());
}

pub fn print_timeline(day: &DayTimeline) {
    println!(
        "{} {}   {} {}",
        bold("In:"),
        colorize_optional(&clock(day.clock_in)),
        bold("Out:"),
        colorize_optional(&clock(day.clock_out)),
    );
    println!(
        "{} {}   {} {}",
        bold("Worked:"),
        colorize_optional(&optional_duration(day.worked_minutes)),
        bold("Break:"),
        colorize_optional(&optional_duration(day.break_minutes)),
    );
}

pub fn print_today(events: &[AttendanceEvent]) {
    if events.is_empty() {
        println!("No attendance recorded today.");
        return;
    }
    let day = build_timeline(events);
    print_events(&day.events);
    println!();
    print_timeline(&day);
}

pub fn print_history(events: &[AttendanceEvent]) {
    if events.is_empty() {
        println!("No attendance history for the selected period.");
        return;
    }
    for (date, day_events) in group_by_date(events) {
        let day = build_timeline(&day_events);
        println!("{CYAN}{}{RESET}", date.format("%Y-%m-%d (%a)"));
        print_events(&day.events);
        print_timeline(&day);
        println!();
    }
}

pub fn print_locations(locations: &[Location]) {
    let mut table = Table::new(vec![
        Column::new("ID", 10),
        Column::new("NAME", 24),
        Column::new("ADDRESS", 40),
    ]);
    for loc in locations {
        table.add_row(vec![
            loc.id.to_string(),
            loc.name.clone(),
            colorize_optional(loc.address.as_deref().unwrap_or("-")),
        ]);
    }
    print!("{}", table.render());
}
