//! File name patterns and directory listing for the extraction tree.

use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use walkdir::WalkDir;

use crate::error::{DeltaError, Result};

/// A file name wildcard such as `AS_ADDR_OBJ_2*.xml`.
///
/// `*` matches any run of characters and `?` a single character; everything
/// else is literal. The whole file name must match, ignoring ASCII and
/// Unicode case.
#[derive(Debug, Clone)]
pub struct FilePattern {
    pattern: String,
    regex: Regex,
}

impl FilePattern {
    /// Compile a wildcard pattern.
    ///
    /// # Examples
    /// ```
    /// use gar_delta_report::files::FilePattern;
    ///
    /// let pattern = FilePattern::new("AS_ADDR_OBJ_2*.xml").unwrap();
    /// assert!(pattern.matches("AS_ADDR_OBJ_20240202_0a1b.XML"));
    /// assert!(!pattern.matches("AS_ADDR_OBJ_PARAMS_20240202.XML"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        let mut source = String::with_capacity(pattern.len() + 8);
        source.push('^');
        for c in pattern.chars() {
            match c {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
            }
        }
        source.push('$');

        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|source| DeltaError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Whether a bare file name matches.
    pub fn matches(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

/// Immediate entries of `dir`, sorted by file name.
fn immediate_entries(dir: &Path) -> Result<Vec<walkdir::DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|source| DeltaError::Scan {
            path: dir.to_path_buf(),
            source,
        })
}

/// Immediate subdirectories of `dir`, sorted by name.
pub fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(immediate_entries(dir)?
        .into_iter()
        .filter(|entry| entry.file_type().is_dir())
        .map(walkdir::DirEntry::into_path)
        .collect())
}

/// Regular files directly in `dir` whose names match `pattern`, sorted by name.
pub fn matching_files(dir: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>> {
    Ok(immediate_entries(dir)?
        .into_iter()
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| pattern.matches(name))
        })
        .map(walkdir::DirEntry::into_path)
        .collect())
}
