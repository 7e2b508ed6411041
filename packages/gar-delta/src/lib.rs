//! GAR delta report - list address objects added in the latest GAR delta.
//!
//! Downloads the latest delta package of the Russian state address register
//! (GAR/FIAS), extracts it and writes a tab-delimited report of newly added
//! or changed address objects, grouped by administrative level and sorted by
//! name within each level.
//!
//! # Example
//!
//! ```
//! use gar_delta_report::types::{AddressRecord, LevelAggregate, LevelNameMap, ReportDate};
//! use gar_delta_report::config::SectionOrder;
//! use gar_delta_report::report::render_report;
//!
//! let mut aggregate = LevelAggregate::new();
//! aggregate.push(5, AddressRecord::new("г", "Химки"));
//!
//! let mut names = LevelNameMap::new();
//! names.insert(5, "Город");
//!
//! let date = ReportDate::from_version_line("01.02.2024").unwrap();
//! let text = render_report(&date, &aggregate, &names, SectionOrder::Numeric);
//! assert!(text.contains("г\t\tХимки"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Default paths, patterns and run settings
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client setup
//! - [`resolver`]: Delta URL lookup in the download service response
//! - [`download`]: Archive download
//! - [`archive`]: Archive extraction
//! - [`files`]: File name wildcards and directory listing
//! - [`xml`]: XML utilities
//! - [`types`]: Address records, level aggregation, level names, report date
//! - [`addr_obj`]: Address-object parsing and aggregation
//! - [`version`]: Version file reading
//! - [`levels`]: Level metadata parsing
//! - [`report`]: Report rendering
//! - [`pipeline`]: The complete run
//! - [`cli`]: Command-line interface

pub mod addr_obj;
pub mod archive;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod files;
pub mod http;
pub mod levels;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod types;
pub mod version;
pub mod xml;

// Re-export main functions
pub use pipeline::{build_report, run, ArchiveSource};

// Re-export commonly used items
pub use config::{RunConfig, SectionOrder};
pub use error::{DeltaError, Result, XmlFileError};
pub use types::{AddressRecord, LevelAggregate, LevelNameMap, ReportDate};
