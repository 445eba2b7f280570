use crate::analysis::{AnalysisReport, ReportFormat, analyze_path, default_report_format};
use crate::cli::config::describe_config_error;
use crate::conf::load_or_default;
use anyhow::{Result, bail};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// PostgreSQL log file to analyze, or `-` for stdin
    pub log_file: PathBuf,

    /// Path to a pglens TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output the full report as JSON
    #[arg(long, conflicts_with_all = ["plain", "pretty"])]
    pub json: bool,

    /// Plain text without colors
    #[arg(long, conflicts_with = "pretty")]
    pub plain: bool,

    /// Colored text (default when stdout is a terminal)
    #[arg(long)]
    pub pretty: bool,
}

impl AnalyzeArgs {
    pub fn format(&self) -> ReportFormat {
        if self.json {
            ReportFormat::Json
        } else if self.plain {
            ReportFormat::Plain
        } else if self.pretty {
            ReportFormat::Pretty
        } else {
            default_report_format()
        }
    }
}

pub fn analyze(args: AnalyzeArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_analyze(&args, &mut out)?;
    Ok(())
}

pub fn run_analyze<W: Write>(args: &AnalyzeArgs, sink: &mut W) -> Result<AnalysisReport> {
    let config = match load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => bail!(describe_config_error(&err)),
    };

    Ok(analyze_path(&args.log_file, &config, args.format(), sink)?)
}
