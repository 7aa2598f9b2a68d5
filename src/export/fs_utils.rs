// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

fn confirm(question: &str) -> AppResult<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Prepare `path` for writing an export or a QR image.
///
/// Missing parent directories are created. An existing file is replaced
/// only with `force` or after the user agrees.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir)?;
    }

    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("'{}' already exists.", path.display()));
    if confirm("Replace it?")? {
        info("Existing file will be replaced.");
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "'{}' kept, nothing written (use --force to replace it)",
            path.display()
        )))
    }
}
