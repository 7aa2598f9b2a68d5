// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{EventExport, notify_export_success};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Rows as a pretty-printed JSON array.
pub(crate) fn export_json(rows: &[EventExport], path: &Path) -> AppResult<()> {
    debug!(rows = rows.len(), path = %path.display(), "writing JSON export");

    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, rows)?;
    out.write_all(b"\n")?;
    out.flush()?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Rows as CSV; the header row comes from the `EventExport` field names.
pub(crate) fn export_csv(rows: &[EventExport], path: &Path) -> AppResult<()> {
    debug!(rows = rows.len(), path = %path.display(), "writing CSV export");

    let mut wtr = csv::Writer::from_writer(File::create(path)?);
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| AppError::Other(format!("CSV write error on row {}: {e}", row.id)))?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
