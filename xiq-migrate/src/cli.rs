use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "xiq-migrate")]
#[command(about = "Convert ExtremeCloud IQ wireless configuration into Edge Services controller objects")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert a normalized XIQ export into a controller bundle.
    Convert(ConvertArgs),
    /// Count what an XIQ export contains and what will not survive conversion.
    Inspect(InspectArgs),
    /// Write the export's SSIDs, VLANs and RADIUS servers as CSV for review.
    ExportCsv(ExportCsvArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Normalized XIQ configuration (JSON).
    pub input: PathBuf,
    /// Topology listing already on the controller (JSON array from GET /v1/topologies).
    #[arg(long)]
    pub existing_topologies: Option<PathBuf>,
    /// Conversion defaults (TOML). Built-in defaults are used when omitted.
    #[arg(long)]
    pub defaults: Option<PathBuf>,
    /// Where to write the controller bundle. Without it only the report is printed.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Exit with an error if any record was skipped (the bundle is still written).
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Normalized XIQ configuration (JSON).
    pub input: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ExportCsvArgs {
    /// Normalized XIQ configuration (JSON).
    pub input: PathBuf,
    /// Directory to write the CSV files into (created if missing).
    #[arg(long)]
    pub dir: PathBuf,
}
