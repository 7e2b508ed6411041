//! Text report generation.
//!
//! Layout:
//!
//! ```text
//! Отчёт по добавленным адресным объектам за 2024.02.01
//! --------------------------------------------------------------------------------
//!
//! Город
//! --------------------------------------------------------------------------------
//! Тип объекта	Наименование
//! г		Химки
//! --------------------------------------------------------------------------------
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::config::{
    SectionOrder, REPORT_COLUMNS, REPORT_RULE_WIDTH, REPORT_TITLE, UNKNOWN_LEVEL_LABEL,
};
use crate::error::{DeltaError, Result};
use crate::types::{Level, LevelAggregate, LevelNameMap, ReportDate};

/// Section heading for a level: its metadata name, or a synthesized label.
pub fn level_label(names: &LevelNameMap, level: Level) -> String {
    names
        .get(level)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{UNKNOWN_LEVEL_LABEL} {level}"))
}

/// Render the report text.
pub fn render_report(
    date: &ReportDate,
    aggregate: &LevelAggregate,
    names: &LevelNameMap,
    order: SectionOrder,
) -> String {
    let rule = "-".repeat(REPORT_RULE_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{REPORT_TITLE} {date}");
    let _ = writeln!(out, "{rule}");

    for bucket in aggregate.buckets(order) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", level_label(names, bucket.level));
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{REPORT_COLUMNS}");
        for record in bucket.sorted_by_name() {
            let _ = writeln!(out, "{}\t\t{}", record.type_name, record.name);
        }
        let _ = writeln!(out, "{rule}");
    }

    out
}

/// Render the report and write it to `path`, replacing any existing file.
pub fn write_report(
    path: &Path,
    date: &ReportDate,
    aggregate: &LevelAggregate,
    names: &LevelNameMap,
    order: SectionOrder,
) -> Result<()> {
    let write_err = |source: std::io::Error| DeltaError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let text = render_report(date, aggregate, names, order);
    fs::write(path, text).map_err(write_err)?;

    tracing::info!(
        path = %path.display(),
        levels = aggregate.level_count(),
        records = aggregate.record_count(),
        "Report written"
    );
    Ok(())
}
