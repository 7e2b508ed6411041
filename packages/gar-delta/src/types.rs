//! Core data types: address records, per-level aggregation, level names and
//! the report date.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::config::SectionOrder;
use crate::error::XmlFileError;

/// Administrative level code as found in the `LEVEL` attribute.
pub type Level = i32;

/// A retained address object: its type abbreviation and its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub type_name: String,
    pub name: String,
}

impl AddressRecord {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// Records retained for a single level, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelBucket {
    pub level: Level,
    pub records: Vec<AddressRecord>,
}

impl LevelBucket {
    /// Records sorted ascending by name using ordinal comparison.
    ///
    /// The sort is stable: records with equal names keep their scan order.
    pub fn sorted_by_name(&self) -> Vec<&AddressRecord> {
        let mut rows: Vec<&AddressRecord> = self.records.iter().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }
}

/// Retained address records grouped by level.
///
/// Buckets are kept in the order their level was first seen so that both
/// first-seen and numeric section orders can be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelAggregate {
    buckets: Vec<LevelBucket>,
    index: HashMap<Level, usize>,
}

impl LevelAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the bucket for `level`, creating it if needed.
    pub fn push(&mut self, level: Level, record: AddressRecord) {
        let slot = match self.index.get(&level) {
            Some(&slot) => slot,
            None => {
                self.buckets.push(LevelBucket {
                    level,
                    records: Vec::new(),
                });
                let slot = self.buckets.len() - 1;
                self.index.insert(level, slot);
                slot
            }
        };
        self.buckets[slot].records.push(record);
    }

    /// Append all records of one parsed file, preserving their order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = (Level, AddressRecord)>) {
        for (level, record) in records {
            self.push(level, record);
        }
    }

    #[cfg(test)]
    fn records(&self, level: Level) -> Option<&[AddressRecord]> {
        self.index
            .get(&level)
            .map(|&slot| self.buckets[slot].records.as_slice())
    }

    /// Buckets in the requested section order.
    pub fn buckets(&self, order: SectionOrder) -> Vec<&LevelBucket> {
        let mut buckets: Vec<&LevelBucket> = self.buckets.iter().collect();
        if order == SectionOrder::Numeric {
            buckets.sort_by_key(|bucket| bucket.level);
        }
        buckets
    }

    /// Number of distinct levels.
    pub fn level_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of retained records across all levels.
    pub fn record_count(&self) -> usize {
        self.buckets.iter().map(|b| b.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Display names of levels from the level metadata file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelNameMap {
    names: HashMap<Level, String>,
}

impl LevelNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name of a level, replacing any earlier entry.
    pub fn insert(&mut self, level: Level, name: impl Into<String>) {
        self.names.insert(level, name.into());
    }

    pub fn get(&self, level: Level) -> Option<&str> {
        self.names.get(&level).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Report date in `YYYY.MM.DD` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDate(String);

impl ReportDate {
    /// Reverse a `DD.MM.YYYY` line into `YYYY.MM.DD`.
    ///
    /// Only the token structure is checked: exactly three non-empty
    /// dot-separated tokens. There is no calendar validation.
    ///
    /// # Examples
    /// ```
    /// use gar_delta_report::types::ReportDate;
    ///
    /// let date = ReportDate::from_version_line("01.02.2024").unwrap();
    /// assert_eq!(date.as_str(), "2024.02.01");
    /// assert!(ReportDate::from_version_line("2024-02-01").is_err());
    /// ```
    pub fn from_version_line(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let tokens: Vec<&str> = line.split('.').collect();
        if tokens.len() != 3 || tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(format!(
                "expected DD.MM.YYYY, found '{line}' ({} dot-separated tokens)",
                tokens.len()
            ));
        }
        Ok(Self(format!(
            "{}.{}.{}",
            tokens[2].trim(),
            tokens[1].trim(),
            tokens[0].trim()
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An address-object file left out of the aggregation.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: XmlFileError,
}

/// Outcome of scanning the extraction directory for address-object files.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Files matching the pattern.
    pub files_scanned: usize,
    /// Files whose records were merged into the aggregate.
    pub files_aggregated: usize,
    /// Records merged into the aggregate.
    pub records_retained: usize,
    /// Files that failed to parse, in scan order.
    pub skipped: Vec<SkippedFile>,
}
