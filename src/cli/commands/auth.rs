use super::prompt_line;
use crate::cli::context::AppContext;
use crate::cli::parser::Commands;
use crate::core::routes::Route;
use crate::errors::AppResult;
use crate::models::session::{Credentials, RegisterProfile};
use crate::ui::messages::warning;
use crate::utils::formatting::bold;
use serde_json::Value;

pub async fn handle(cmd: &Commands, ctx: &mut AppContext) -> AppResult<()> {
    match cmd {
        Commands::Login { email, password } => {
            if !ctx.enter(Route::Login)? {
                return Ok(());
            }
            let password = match password {
                Some(p) => p.clone(),
                None => prompt_line("Password: ")?,
            };
            let session = ctx
                .session
                .login(&Credentials {
                    email: email.clone(),
                    password,
                })
                .await?;
            println!("Welcome, {}!", display_name(&session.user.name, &session.user.email));
        }

        Commands::Register {
            name,
            email,
            password,
        } => {
            if !ctx.enter(Route::Register)? {
                return Ok(());
            }
            let password = match password {
                Some(p) => p.clone(),
                None => prompt_line("Password: ")?,
            };
            ctx.session
                .register(&RegisterProfile {
                    name: name.clone(),
                    email: email.clone(),
                    password_confirmation: password.clone(),
                    password,
                })
                .await?;
        }

        Commands::Logout { force } => {
            let remote = ctx.session.logout().await;
            if remote.is_err() && *force {
                ctx.session.clear_local()?;
                warning("Local session removed; the server session may still be active.");
                return Ok(());
            }
            remote?;
        }

        Commands::Me => {
            if !ctx.enter(Route::Dashboard)? {
                return Ok(());
            }
            let user = ctx.session.refresh_profile().await?;
            println!("{} {}", bold("Name: "), user.name);
            println!("{} {}", bold("Email:"), user.email);
            println!("{} {}", bold("Id:   "), user.id);
            for (key, value) in &user.extra {
                let shown = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                println!("{} {}", bold(&format!("{key}:")), shown);
            }
        }

        _ => {}
    }
    Ok(())
}

fn display_name<'a>(name: &'a str, email: &'a str) -> &'a str {
    if name.trim().is_empty() { email } else { name }
}
