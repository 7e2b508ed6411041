//! Error types for the delta report pipeline.
//!
//! Uses the dual-error pattern: `DeltaError` for fatal failures that abort a
//! run, and `XmlFileError` for problems with a single XML file. Address-object
//! files report `XmlFileError` without aborting; the level metadata file wraps
//! it in `DeltaError::LevelParse`.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the library. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum DeltaError {
    /// Could not build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The download service request failed or returned a non-success status.
    #[error("Failed to query download service {url}: {source}")]
    Resolution {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The download service answered with something that is not XML.
    #[error("Download service response from {url} is not valid XML: {source}")]
    ResolutionXml {
        url: String,
        #[source]
        source: roxmltree::Error,
    },

    /// The download service response has no usable delta URL.
    #[error("Download service response from {url} has no <{element}> element")]
    MissingDeltaUrl { url: String, element: &'static str },

    /// Archive download failed or returned a non-success status.
    #[error("Failed to download archive from {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Archive could not be written to disk.
    #[error("Failed to write archive to {}: {source}", .path.display())]
    ArchiveWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive is corrupt or unreadable.
    #[error("Failed to extract archive {}: {source}", .archive.display())]
    Extraction {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Filesystem failure while preparing the extraction directory or writing entries.
    #[error("Failed to extract into {}: {source}", .path.display())]
    ExtractionIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extraction directory could not be listed.
    #[error("Failed to scan directory {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The version file is missing, empty, or malformed.
    #[error("Failed to read date from version file {}: {reason}", .path.display())]
    VersionRead { path: PathBuf, reason: String },

    /// No file matches the level metadata pattern.
    #[error("No level metadata file matching '{pattern}' in {}", .dir.display())]
    LevelFileNotFound { dir: PathBuf, pattern: String },

    /// More than one file matches the level metadata pattern.
    #[error("Level metadata pattern '{pattern}' is ambiguous: {} files match", .matches.len())]
    AmbiguousLevelFile {
        pattern: String,
        matches: Vec<PathBuf>,
    },

    /// The level metadata file could not be parsed.
    #[error("Failed to parse level metadata file {}: {source}", .path.display())]
    LevelParse {
        path: PathBuf,
        #[source]
        source: XmlFileError,
    },

    /// Report could not be written.
    #[error("Failed to write report to {}: {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A filename wildcard could not be compiled.
    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Error for a single XML input file.
#[derive(Debug, Error)]
pub enum XmlFileError {
    /// File could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    Malformed(#[from] roxmltree::Error),

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute {attribute}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An integer attribute holds something that is not an integer.
    #[error("<{element}> attribute {attribute} is not an integer: '{value}'")]
    InvalidInteger {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, DeltaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_delta_url_display() {
        let err = DeltaError::MissingDeltaUrl {
            url: "https://example.com/info".to_string(),
            element: "GarXMLDeltaURL",
        };
        assert_eq!(
            err.to_string(),
            "Download service response from https://example.com/info has no <GarXMLDeltaURL> element"
        );
    }

    #[test]
    fn test_invalid_integer_display() {
        let err = XmlFileError::InvalidInteger {
            element: "OBJECT",
            attribute: "LEVEL",
            value: "x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "<OBJECT> attribute LEVEL is not an integer: 'x'"
        );
    }

    #[test]
    fn test_ambiguous_level_file_display() {
        let err = DeltaError::AmbiguousLevelFile {
            pattern: "AS_OBJECT_LEVELS*".to_string(),
            matches: vec![PathBuf::from("a"), PathBuf::from("b")],
        };
        assert!(err.to_string().contains("2 files match"));
    }

    #[test]
    fn test_level_parse_keeps_source() {
        let err = DeltaError::LevelParse {
            path: PathBuf::from("levels.xml"),
            source: XmlFileError::MissingAttribute {
                element: "OBJECTLEVEL",
                attribute: "LEVEL",
            },
        };
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("<OBJECTLEVEL> is missing required attribute LEVEL")
        );
    }
}
