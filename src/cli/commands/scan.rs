//! `scan`: read a location QR code, pick an action, record it.

use super::prompt_line;
use crate::cli::context::AppContext;
use crate::cli::devices::{ConsoleNavigator, TextCamera, TextSource};
use crate::cli::parser::Commands;
use crate::cli::view;
use crate::core::routes::Route;
use crate::core::scan::{ScanFlow, ScanOptions, ScanState};
use crate::errors::{AppError, AppResult};
use crate::models::action::AttendanceAction;
use crate::ui::messages::{header, info, success};
use std::io::IsTerminal;
use std::sync::Arc;

pub async fn handle(cmd: &Commands, ctx: &mut AppContext) -> AppResult<()> {
    let Commands::Scan {
        payload,
        file,
        manual,
        action,
    } = cmd
    else {
        return Ok(());
    };

    if !ctx.enter(Route::ScanQr)? {
        return Ok(());
    }

    // Parse early so a typo does not cost a scan.
    let preset = action
        .as_deref()
        .map(|raw| {
            AttendanceAction::normalize(raw)
                .ok_or_else(|| AppError::InvalidInput(format!("Unknown action '{raw}'")))
        })
        .transpose()?;

    let source = match (payload, file) {
        (Some(text), _) => TextSource::Payload(text.clone()),
        (None, Some(path)) => TextSource::File(path.clone()),
        (None, None) => TextSource::Stdin,
    };
    let interactive = !matches!(source, TextSource::Stdin) && std::io::stdin().is_terminal();

    let store = ctx.attendance_store()?;
    let navigator = Arc::new(ConsoleNavigator::default());
    let mut flow = ScanFlow::new(
        store.clone(),
        Arc::new(TextCamera::new(source)),
        navigator.clone(),
        ctx.notifier.clone(),
        ScanOptions {
            test_mode: ctx.test_mode,
            redirect_delay: ctx.cfg.redirect_delay(),
        },
    );

    if *manual {
        flow.manual().await;
    } else {
        if payload.is_none() {
            info("Waiting for QR code text (one per line)…");
        }
        flow.scan().await;
    }

    let location = match flow.state() {
        ScanState::Select { location, .. } => location.clone(),
        ScanState::Error { message } => return Err(AppError::Validation(message.clone())),
        _ => return Err(AppError::Other("Unexpected scan state".into())),
    };
    info(format!(
        "Location: {} ({})",
        location.location_name, location.location_id
    ));

    let chosen = match preset {
        Some(a) => Some(a),
        None if interactive => Some(choose_action()?),
        None => None,
    };
    if let Some(a) = chosen {
        flow.select_action(a);
    }

    flow.submit().await;

    match flow.state().clone() {
        ScanState::Success { location, action } => {
            success(format!(
                "{} recorded at {}",
                action.label(),
                location.location_name
            ));
            flow.wait_redirect().await;
            store.settle_background().await;

            if navigator.last() == Some(Route::Attendance) {
                header("Today");
                view::print_today(&store.today());
            }
            Ok(())
        }
        ScanState::Select { action: None, .. } => {
            Err(AppError::InvalidInput("Please select an action".into()))
        }
        ScanState::Error { message } => Err(AppError::Submission(message)),
        _ => Err(AppError::Other("Unexpected scan state".into())),
    }
}

fn choose_action() -> AppResult<AttendanceAction> {
    for (i, a) in AttendanceAction::ALL.iter().enumerate() {
        println!("  {}) {:<12} {}", i + 1, a.label(), a.description());
    }
    let raw = prompt_line("Action: ")?;

    raw.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| AttendanceAction::ALL.get(i).copied())
        .or_else(|| AttendanceAction::normalize(&raw))
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown action '{raw}'")))
}
