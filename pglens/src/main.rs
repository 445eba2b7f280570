use clap::{Parser, Subcommand};
use pglens_core::cli;
use pglens_core::cli::analyze::AnalyzeArgs;
use pglens_core::logging::{LogFormat, default_log_format, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "pglens",
    version,
    about = "pglens: PostgreSQL log analyzer"
)]
struct Cli {
    /// Format for diagnostics written to stderr
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a log file and print the report
    Analyze(AnalyzeArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::config::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    let result = match cli.command {
        Command::Analyze(args) => cli::analyze::analyze(args),
        Command::Config { cmd } => cli::config::run(cmd),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("pglens: {e:#}");
        std::process::exit(1);
    }
}
