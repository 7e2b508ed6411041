//! The seven-step run: resolve, download, extract, aggregate, read version,
//! load level names, write report.

use std::path::PathBuf;

use crate::addr_obj::aggregate_address_objects;
use crate::archive::extract_archive;
use crate::config::RunConfig;
use crate::download::download_archive;
use crate::error::Result;
use crate::files::FilePattern;
use crate::http::create_client;
use crate::levels::load_level_names;
use crate::report::write_report;
use crate::resolver::resolve_delta_url;
use crate::types::{LevelAggregate, ReportDate, ScanSummary};
use crate::version::read_report_date;

/// Where the archive comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveSource {
    /// Resolve the latest delta URL and download it to the archive path.
    Remote,
    /// Use the archive already present at the archive path.
    Local,
}

/// Pipeline step, reported before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Downloading,
    Extracting,
    Aggregating,
    ReadingVersion,
    LoadingLevels,
    WritingReport,
}

impl Stage {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Resolving => "Resolving delta URL...",
            Self::Downloading => "Downloading delta archive...",
            Self::Extracting => "Extracting archive...",
            Self::Aggregating => "Aggregating address objects...",
            Self::ReadingVersion => "Reading version file...",
            Self::LoadingLevels => "Loading level names...",
            Self::WritingReport => "Writing report...",
        }
    }
}

/// Result of building the report from an extracted delta.
#[derive(Debug)]
pub struct ReportOutcome {
    pub date: ReportDate,
    pub scan: ScanSummary,
    pub level_count: usize,
    pub record_count: usize,
    pub report_path: PathBuf,
}

/// Result of a complete run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Resolved delta URL; `None` for a local archive.
    pub delta_url: Option<String>,
    /// Downloaded bytes; `None` for a local archive.
    pub archive_bytes: Option<u64>,
    pub extracted_files: usize,
    pub report: ReportOutcome,
}

/// Run every step. The first fatal error aborts the run.
pub fn run(
    config: &RunConfig,
    source: ArchiveSource,
    mut on_stage: impl FnMut(Stage),
) -> Result<RunOutcome> {
    let (delta_url, archive_bytes) = match source {
        ArchiveSource::Remote => {
            let client = create_client()?;

            on_stage(Stage::Resolving);
            let url = resolve_delta_url(&client, &config.service_url)?;

            on_stage(Stage::Downloading);
            let bytes = download_archive(&client, &url, &config.archive_path)?;
            (Some(url), Some(bytes))
        }
        ArchiveSource::Local => {
            tracing::info!(archive = %config.archive_path.display(), "Using local archive");
            (None, None)
        }
    };

    on_stage(Stage::Extracting);
    let extracted_files = extract_archive(&config.archive_path, &config.extract_dir)?;

    let report = build_report(config, on_stage)?;

    Ok(RunOutcome {
        delta_url,
        archive_bytes,
        extracted_files,
        report,
    })
}

/// Build the report from an already extracted delta directory.
pub fn build_report(config: &RunConfig, mut on_stage: impl FnMut(Stage)) -> Result<ReportOutcome> {
    let addr_pattern = FilePattern::new(&config.addr_obj_pattern)?;
    let levels_pattern = FilePattern::new(&config.object_levels_pattern)?;

    on_stage(Stage::Aggregating);
    let mut aggregate = LevelAggregate::new();
    let scan = aggregate_address_objects(&config.extract_dir, &addr_pattern, &mut aggregate)?;

    on_stage(Stage::ReadingVersion);
    let date = read_report_date(&config.version_path())?;

    on_stage(Stage::LoadingLevels);
    let names = load_level_names(&config.extract_dir, &levels_pattern)?;

    on_stage(Stage::WritingReport);
    write_report(
        &config.report_path,
        &date,
        &aggregate,
        &names,
        config.section_order,
    )?;

    Ok(ReportOutcome {
        date,
        scan,
        level_count: aggregate.level_count(),
        record_count: aggregate.record_count(),
        report_path: config.report_path.clone(),
    })
}
