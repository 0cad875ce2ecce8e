//! CSV export of a result batch.
//!
//! Flattens the stored batch independently of any on-screen projection,
//! writes a UTF-8 CSV with the same column discipline as the table view
//! (`Store` first, remainder lexicographic), one row per record in batch
//! order. An empty batch is a reported no-op, not an error.

use crate::error::SearchError;
use crate::flatten::flatten_batch;
use crate::table::project;
use crate::types::ResultRecord;
use std::path::{Path, PathBuf};

/// Outcome of an export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written.
    Written {
        /// Target path.
        path: PathBuf,
        /// Number of data rows (excluding the header).
        rows: usize,
    },
    /// The batch was empty; no file was created.
    NothingToExport,
}

/// Export a record batch as CSV to `path`.
///
/// # Errors
///
/// Returns [`SearchError::Export`] with the target path and underlying
/// cause if the file cannot be created or written. In-memory results are
/// unaffected by a failed export.
pub fn export_csv(records: &[ResultRecord], path: &Path) -> Result<ExportOutcome, SearchError> {
    if records.is_empty() {
        return Ok(ExportOutcome::NothingToExport);
    }

    let flat = flatten_batch(records);
    let table = project(&flat);

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| SearchError::Export(format!("{}: {e}", path.display())))?;
    writer
        .write_record(&table.columns)
        .map_err(|e| SearchError::Export(format!("{}: {e}", path.display())))?;
    for row in &table.rows {
        writer
            .write_record(&row.cells)
            .map_err(|e| SearchError::Export(format!("{}: {e}", path.display())))?;
    }
    writer
        .flush()
        .map_err(|e| SearchError::Export(format!("{}: {e}", path.display())))?;

    tracing::debug!(path = %path.display(), rows = table.rows.len(), "exported result batch");
    Ok(ExportOutcome::Written {
        path: path.to_owned(),
        rows: table.rows.len(),
    })
}
