use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use cpgw_convert::convert::convert_gateway;
use cpgw_convert::diag::Diagnostics;
use cpgw_convert::inspect::render_summary;
use cpgw_convert::mgmt::ManagementConfig;
use cpgw_convert::vs::GatewayConfig;

mod cli;

use cli::{Cli, Command, ConvertArgs, InspectArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert(args) => run_convert(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let gateway: GatewayConfig = read_json(&args.input)?;
    let mgmt: Option<ManagementConfig> = match &args.management {
        Some(path) => Some(read_json(path)?),
        None => None,
    };

    let mut diags = Diagnostics::new();
    let cfg = convert_gateway(&gateway, mgmt.as_ref(), &mut diags)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;

    if !args.quiet {
        for diag in diags.entries() {
            eprintln!(
                "{} [{}] {}",
                "warning:".yellow().bold(),
                diag.code,
                diag.message
            );
        }
    }

    let json = cfg.to_json()?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write output {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let gateway: GatewayConfig = read_json(&args.file)?;
    print!("{}", render_summary(&gateway));
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
