// src/export/mod.rs

pub mod fs_utils;
mod json_csv;
mod model;

pub use model::EventExport;

use crate::errors::AppResult;
use crate::models::event::AttendanceEvent;
use crate::ui::messages::success;
use clap::ValueEnum;
use fs_utils::ensure_writable;
use std::fs;
use std::path::Path;

/// Shared completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Write already-fetched events to `path` in the requested format.
pub fn export_events(
    events: &[AttendanceEvent],
    format: ExportFormat,
    path: &Path,
    force: bool,
) -> AppResult<()> {
    ensure_writable(path, force)?;

    let rows: Vec<EventExport> = events.iter().map(EventExport::from).collect();
    match format {
        ExportFormat::Csv => json_csv::export_csv(&rows, path),
        ExportFormat::Json => json_csv::export_json(&rows, path),
    }
}

/// Save the server-side export as-is.
pub fn save_blob(bytes: &[u8], path: &Path, force: bool) -> AppResult<()> {
    ensure_writable(path, force)?;
    fs::write(path, bytes)?;
    notify_export_success("Server", path);
    Ok(())
}
