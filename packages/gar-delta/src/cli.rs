//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{RunConfig, SectionOrder, ARCHIVE_PATH, EXTRACT_DIR, REPORT_PATH, SERVICE_URL};
use crate::error::Result;
use crate::pipeline::{build_report, run as run_pipeline, ArchiveSource, ReportOutcome};

/// GAR delta report - list address objects added in the latest registry delta.
///
/// Without a subcommand the full pipeline runs with the options below.
#[derive(Parser)]
#[command(name = "gar-delta-report")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the latest delta, extract it and write the report (the default).
    Run(RunArgs),

    /// Write the report from an already extracted delta, without network access.
    Report {
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Options of the full pipeline.
#[derive(Args)]
pub struct RunArgs {
    /// Download service endpoint
    #[arg(long, env = "GAR_DELTA_SERVICE_URL", default_value = SERVICE_URL)]
    pub service_url: String,

    /// Where the delta archive is stored
    #[arg(long, default_value = ARCHIVE_PATH)]
    pub archive: PathBuf,

    /// Extract the archive already at --archive instead of downloading
    #[arg(long)]
    pub local_archive: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl RunArgs {
    fn config(&self) -> RunConfig {
        self.output.apply(
            RunConfig::default()
                .with_service_url(&self.service_url)
                .with_archive_path(&self.archive),
        )
    }

    fn source(&self) -> ArchiveSource {
        if self.local_archive {
            ArchiveSource::Local
        } else {
            ArchiveSource::Remote
        }
    }
}

/// Options shared by both subcommands.
#[derive(Args)]
pub struct OutputArgs {
    /// Extraction directory (recreated by `run`)
    #[arg(long, default_value = EXTRACT_DIR)]
    pub extract_dir: PathBuf,

    /// Report file
    #[arg(short, long, default_value = REPORT_PATH)]
    pub report: PathBuf,

    /// Order of level sections in the report
    #[arg(long, value_enum, default_value_t = SectionOrder::Numeric)]
    pub section_order: SectionOrder,
}

impl OutputArgs {
    fn apply(&self, config: RunConfig) -> RunConfig {
        config
            .with_extract_dir(&self.extract_dir)
            .with_report_path(&self.report)
            .with_section_order(self.section_order)
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run(cli.run)) {
        Commands::Run(args) => run_command(&args.config(), args.source()),
        Commands::Report { output } => report_command(&output.apply(RunConfig::default())),
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the full pipeline.
fn run_command(config: &RunConfig, source: ArchiveSource) -> Result<()> {
    match source {
        ArchiveSource::Remote => println!(
            "{} latest delta from {}",
            style("Fetching").bold(),
            style(&config.service_url).cyan()
        ),
        ArchiveSource::Local => println!(
            "{} local archive {}",
            style("Using").bold(),
            style(config.archive_path.display()).cyan()
        ),
    }
    println!();

    let pb = spinner();
    let outcome = match run_pipeline(config, source, |stage| pb.set_message(stage.message())) {
        Ok(outcome) => outcome,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    if let Some(url) = &outcome.delta_url {
        println!("  Delta: {}", style(url).green());
    }
    if let Some(bytes) = outcome.archive_bytes {
        println!("  Downloaded: {bytes} bytes");
    }
    println!("  Extracted files: {}", outcome.extracted_files);
    print_report_summary(&outcome.report);

    Ok(())
}

/// Build the report from an extracted delta.
fn report_command(config: &RunConfig) -> Result<()> {
    println!(
        "{} report from {}",
        style("Building").bold(),
        style(config.extract_dir.display()).cyan()
    );
    println!();

    let pb = spinner();
    let outcome = match build_report(config, |stage| pb.set_message(stage.message())) {
        Ok(outcome) => outcome,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    print_report_summary(&outcome);
    Ok(())
}

fn print_report_summary(outcome: &ReportOutcome) {
    println!("  Release date: {}", style(&outcome.date).green());
    println!(
        "  Address files: {} of {}",
        outcome.scan.files_aggregated, outcome.scan.files_scanned
    );
    println!("  Levels: {}", outcome.level_count);
    println!("  Records: {}", outcome.record_count);

    if !outcome.scan.skipped.is_empty() {
        println!(
            "  Skipped files: {}",
            style(outcome.scan.skipped.len()).yellow().bold()
        );
        for skipped in &outcome.scan.skipped {
            println!(
                "    {} {}",
                style(skipped.path.display()).yellow(),
                skipped.error
            );
        }
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        outcome.report_path.display()
    );
}
