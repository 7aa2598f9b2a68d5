//! Location listing and QR issuance.

use crate::cli::context::AppContext;
use crate::cli::parser::Commands;
use crate::cli::view;
use crate::core::issue::QrIssuer;
use crate::core::routes::Route;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use chrono::Utc;

pub async fn handle(cmd: &Commands, ctx: &mut AppContext) -> AppResult<()> {
    if !ctx.enter(Route::CreateQr)? {
        return Ok(());
    }

    let mut issuer = QrIssuer::new(ctx.attendance_api()?, ctx.notifier.clone(), ctx.test_mode);
    issuer.load_locations().await?;

    match cmd {
        Commands::Locations => {
            header("Locations");
            if issuer.locations().is_empty() {
                println!("No locations available.");
            } else {
                view::print_locations(issuer.locations());
            }
        }

        Commands::Qr {
            location,
            svg,
            payload,
            force,
        } => {
            if issuer.locations().is_empty() {
                return Err(AppError::InvalidInput(
                    "No locations available: cannot generate a QR code".into(),
                ));
            }

            let location_id = location.clone().unwrap_or_default();
            let issued = issuer.generate(&location_id).await?;
            info(format!(
                "{} ({})",
                issued.payload.location_name, issued.payload.location_id
            ));
            if let Some(left) = issued.remaining(Utc::now()) {
                info(format!("Expires in {} min", left.num_minutes()));
            }

            if *payload {
                println!("{}", issuer.payload_text()?);
            } else {
                println!("{}", issuer.render_terminal()?);
            }

            if let Some(target) = svg {
                issuer.save_svg(target, *force)?;
            }
        }

        _ => {}
    }
    Ok(())
}
