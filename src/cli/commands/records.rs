//! Read-side commands: dashboard status, today, history, summary, export.

use crate::api::HistoryFilter;
use crate::cli::context::AppContext;
use crate::cli::parser::Commands;
use crate::cli::view;
use crate::core::attendance::{AttendanceStore, DataSlice};
use crate::core::calculator::timeline::build_timeline;
use crate::core::routes::Route;
use crate::errors::{AppError, AppResult};
use crate::export::{self, ExportFormat};
use crate::models::status::CurrentStatus;
use crate::ui::messages::{header, info, warning};
use crate::utils::date;
use crate::utils::formatting::bold;
use serde_json::Value;
use std::path::Path;

pub async fn handle(cmd: &Commands, ctx: &mut AppContext) -> AppResult<()> {
    let route = match cmd {
        Commands::Status => Route::Dashboard,
        _ => Route::Attendance,
    };
    if !ctx.enter(route)? {
        return Ok(());
    }
    let store = ctx.attendance_store()?;

    match cmd {
        Commands::Status => dashboard(&store).await,
        Commands::Today => today(&store).await,
        Commands::History {
            period,
            params,
            export,
            file,
            force,
        } => {
            let filter = build_filter(period.as_deref(), params)?;
            history(&store, &filter, *export, file.as_deref(), *force).await
        }
        Commands::Summary { month } => summary(&store, month.as_deref()).await,
        Commands::Export {
            file,
            period,
            force,
        } => {
            let filter = build_filter(period.as_deref(), &[])?;
            let bytes = store.export(&filter).await?;
            export::save_blob(&bytes, file, *force)
        }
        _ => Ok(()),
    }
}

/// Surface the error recorded for `slice` after a failed fetch.
fn slice_error(store: &AttendanceStore, slice: DataSlice, fallback: &str) -> AppError {
    AppError::Fetch(store.error_of(slice).unwrap_or_else(|| fallback.to_string()))
}

async fn dashboard(store: &AttendanceStore) -> AppResult<()> {
    store.refresh_all().await;

    header("Dashboard");
    let status = store.status().ok_or_else(|| {
        slice_error(store, DataSlice::Status, "Failed to fetch current status")
    })?;
    view::print_status(status);

    if store.error_of(DataSlice::Today).is_none() {
        let day = build_timeline(&store.today());
        view::print_timeline(&day);
    }

    let next = match status {
        CurrentStatus::ClockedOut => "clock_in",
        CurrentStatus::ClockedIn => "start_break or clock_out",
        CurrentStatus::OnBreak => "end_break",
    };
    info(format!("Next: scan a location QR code to {next}."));

    for slice in [DataSlice::Today, DataSlice::History] {
        if let Some(e) = store.error_of(slice) {
            warning(e);
        }
    }
    Ok(())
}

async fn today(store: &AttendanceStore) -> AppResult<()> {
    let events = store.fetch_today().await.ok_or_else(|| {
        slice_error(store, DataSlice::Today, "Failed to fetch today attendance")
    })?;

    header(format!("Today {}", date::today().format("%Y-%m-%d")));
    view::print_today(&events);
    Ok(())
}

async fn history(
    store: &AttendanceStore,
    filter: &HistoryFilter,
    format: Option<ExportFormat>,
    file: Option<&Path>,
    force: bool,
) -> AppResult<()> {
    let events = store.fetch_history(filter).await.ok_or_else(|| {
        slice_error(store, DataSlice::History, "Failed to fetch attendance history")
    })?;

    if let (Some(format), Some(file)) = (format, file) {
        return export::export_events(&events, format, file, force);
    }

    header("Attendance history");
    view::print_history(&events);
    Ok(())
}

async fn summary(store: &AttendanceStore, month: Option<&str>) -> AppResult<()> {
    let month = match month {
        Some(m) => date::parse_month(m)
            .ok_or_else(|| AppError::InvalidDate(format!("{m} (expected YYYY-MM)")))?,
        None => date::current_month(),
    };

    let summary = store
        .fetch_summary(&month)
        .await
        .ok_or_else(|| slice_error(store, DataSlice::Summary, "Failed to fetch summary"))?;

    header(format!("Summary {}", summary.month));
    print_value(&summary.data);
    Ok(())
}

/// Flat objects as `key: value` lines, anything else as pretty JSON.
fn print_value(data: &Value) {
    match data.get("data").unwrap_or(data) {
        Value::Object(map) if map.values().all(|v| !v.is_object() && !v.is_array()) => {
            for (key, value) in map {
                let shown = match value {
                    Value::String(s) => s.clone(),
                    Value::Null => "-".to_string(),
                    other => other.to_string(),
                };
                println!("{} {}", bold(&format!("{key}:")), shown);
            }
        }
        other => {
            println!(
                "{}",
                serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string())
            );
        }
    }
}

/// History / export filter from `--period` and `--param key=value`.
/// Without a period no date bounds are sent and the server decides.
pub fn build_filter(period: Option<&str>, params: &[String]) -> AppResult<HistoryFilter> {
    let mut filter = match period {
        Some(p) => {
            let (start, end) = date::range_bounds(p).map_err(AppError::InvalidDate)?;
            HistoryFilter::between(start, end)
        }
        None => HistoryFilter::default(),
    };

    for raw in params {
        let (key, value) = raw
            .split_once('=')
            .filter(|(k, _)| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::InvalidInput(format!("Invalid parameter '{raw}' (expected KEY=VALUE)"))
            })?;
        filter
            .extra
            .push((key.trim().to_string(), value.trim().to_string()));
    }
    Ok(filter)
}
