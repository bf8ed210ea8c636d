use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cpgw-convert")]
#[command(about = "Convert gateway configurations to a vendor-independent model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Convert one gateway config, optionally joined with a management export.
    Convert(ConvertArgs),
    /// Show a summary of a parsed gateway config.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Gateway configuration JSON file.
    pub input: PathBuf,
    /// Optional management-plane export JSON file.
    #[arg(long)]
    pub management: Option<PathBuf>,
    /// Output file path; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Suppress diagnostics on stderr.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Gateway configuration JSON file.
    pub file: PathBuf,
}
