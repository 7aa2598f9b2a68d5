pub mod auth;
pub mod config;
pub mod init;
pub mod qr;
pub mod records;
pub mod scan;

use crate::errors::{AppError, AppResult};
use std::io::{self, Write};

/// Read one line from stdin after printing `prompt`.
pub(crate) fn prompt_line(prompt: &str) -> AppResult<String> {
    print!("{prompt}");
    io::stdout().flush().ok();

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let line = line.trim().to_string();
    if line.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "{} cannot be empty",
            prompt.trim_end_matches([':', ' '])
        )));
    }
    Ok(line)
}
