//! Delta version file.

use std::fs;
use std::path::Path;

use crate::error::{DeltaError, Result};
use crate::types::ReportDate;

/// Read the release date from the first line of the version file.
pub fn read_report_date(path: &Path) -> Result<ReportDate> {
    let version_err = |reason: String| DeltaError::VersionRead {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| version_err(e.to_string()))?;
    let first_line = content
        .trim_start_matches('\u{feff}')
        .lines()
        .next()
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| version_err("first line is empty".to_string()))?;

    let date = ReportDate::from_version_line(first_line).map_err(version_err)?;
    tracing::info!(date = %date, "Read release date");
    Ok(date)
}
