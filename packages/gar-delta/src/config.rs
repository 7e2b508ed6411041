//! Configuration constants and run settings.

use std::path::PathBuf;

/// Download service endpoint returning information about the latest GAR release.
pub const SERVICE_URL: &str =
    "https://fias.nalog.ru/WebServices/Public/DownloadService.asmx/GetLastDownloadFileInfo";

/// Element in the service response holding the delta archive URL.
pub const DELTA_URL_ELEMENT: &str = "GarXMLDeltaURL";

/// Where the downloaded archive is stored.
pub const ARCHIVE_PATH: &str = "latest_update.zip";

/// Directory the archive is extracted into. Recreated on every run.
pub const EXTRACT_DIR: &str = "extracted_files";

/// Address-object files inside the per-region subdirectories.
///
/// The `_2` prefix excludes `AS_ADDR_OBJ_DIVISION` and `AS_ADDR_OBJ_PARAMS`.
pub const ADDR_OBJ_PATTERN: &str = "AS_ADDR_OBJ_2*.xml";

/// Level metadata file at the root of the extraction directory.
pub const OBJECT_LEVELS_PATTERN: &str = "AS_OBJECT_LEVELS*";

/// Version file at the root of the extraction directory.
pub const VERSION_FILE: &str = "version.txt";

/// Output report.
pub const REPORT_PATH: &str = "report.txt";

/// HTTP connect timeout in seconds.
///
/// Only the connection phase is bounded; delta archives are large and the
/// transfer itself is not timed out.
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Operation type codes of records that count as added or changed.
pub const RETAINED_OPERATION_TYPES: [i32; 3] = [10, 43, 61];

/// `ISACTIVE` value of a current record.
pub const ACTIVE_FLAG: i32 = 1;

/// Width of the horizontal rules in the report.
pub const REPORT_RULE_WIDTH: usize = 80;

/// Report title; the report date is appended.
pub const REPORT_TITLE: &str = "Отчёт по добавленным адресным объектам за";

/// Column header line of each level section.
pub const REPORT_COLUMNS: &str = "Тип объекта\tНаименование";

/// Prefix of the label used for levels missing from the level metadata.
pub const UNKNOWN_LEVEL_LABEL: &str = "Уровень";

/// Order of level sections in the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SectionOrder {
    /// Ascending level number.
    #[default]
    Numeric,
    /// Order in which levels were first encountered while scanning files.
    FirstSeen,
}

/// Paths, patterns and options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub service_url: String,
    pub archive_path: PathBuf,
    pub extract_dir: PathBuf,
    pub addr_obj_pattern: String,
    pub object_levels_pattern: String,
    pub version_file: String,
    pub report_path: PathBuf,
    pub section_order: SectionOrder,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            service_url: SERVICE_URL.to_string(),
            archive_path: PathBuf::from(ARCHIVE_PATH),
            extract_dir: PathBuf::from(EXTRACT_DIR),
            addr_obj_pattern: ADDR_OBJ_PATTERN.to_string(),
            object_levels_pattern: OBJECT_LEVELS_PATTERN.to_string(),
            version_file: VERSION_FILE.to_string(),
            report_path: PathBuf::from(REPORT_PATH),
            section_order: SectionOrder::default(),
        }
    }
}

impl RunConfig {
    pub fn with_service_url(mut self, service_url: impl Into<String>) -> Self {
        self.service_url = service_url.into();
        self
    }

    pub fn with_archive_path(mut self, archive_path: impl Into<PathBuf>) -> Self {
        self.archive_path = archive_path.into();
        self
    }

    pub fn with_extract_dir(mut self, extract_dir: impl Into<PathBuf>) -> Self {
        self.extract_dir = extract_dir.into();
        self
    }

    pub fn with_report_path(mut self, report_path: impl Into<PathBuf>) -> Self {
        self.report_path = report_path.into();
        self
    }

    pub fn with_section_order(mut self, section_order: SectionOrder) -> Self {
        self.section_order = section_order;
        self
    }

    /// Full path of the version file inside the extraction directory.
    pub fn version_path(&self) -> PathBuf {
        self.extract_dir.join(&self.version_file)
    }
}
