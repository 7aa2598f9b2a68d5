//! Coloured console output shared by every command.

use crate::core::ports::Notifier;
use crate::utils::colors::{BLUE, BOLD, GREEN, RED, RESET, YELLOW};
use std::fmt::Display;

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => (BLUE, "ℹ️"),
            Level::Success => (GREEN, "✅"),
            Level::Warning => (YELLOW, "⚠️"),
            Level::Error => (RED, "❌"),
        }
    }
}

fn emit(level: Level, msg: &dyn Display) {
    let (color, icon) = level.style();
    let line = format!("{color}{BOLD}{icon}{RESET} {msg}");
    // Errors go to stderr.
    match level {
        Level::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

pub fn info(msg: impl Display) {
    emit(Level::Info, &msg);
}

pub fn success(msg: impl Display) {
    emit(Level::Success, &msg);
}

pub fn warning(msg: impl Display) {
    emit(Level::Warning, &msg);
}

pub fn error(msg: impl Display) {
    emit(Level::Error, &msg);
}

/// Section title line.
pub fn header(title: impl Display) {
    println!("{BLUE}{BOLD}== {title} =={RESET}");
}

/// Terminal notifications: the CLI counterpart of toast messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, msg: &str) {
        info(msg);
    }

    fn success(&self, msg: &str) {
        success(msg);
    }

    fn error(&self, msg: &str) {
        error(msg);
    }
}
