use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use sim_server::{ServerConfig, SimServer};
use sim_store::Importer;
use sim_types::{simulation_schema, SimulationDocument, WriteReport};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Validate(args) => cmd_validate(args, &cli.format),
        Command::Schema => cmd_schema(),
    }
}

fn read_document(path: &Path) -> anyhow::Result<SimulationDocument> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    SimulationDocument::from_json_slice(&bytes).with_context(|| format!("decoding {}", path.display()))
}

fn server_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(token) = &args.auth_token {
        config.auth_token = Some(token.clone());
    }
    if let Some(max) = args.max_pairs {
        config.max_pairs = Some(max);
    }
    Ok(config)
}

fn print_warnings(report: &WriteReport) {
    for warning in &report.warnings {
        println!("  {} {}", "warning:".yellow().bold(), warning);
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let server = SimServer::new(server_config(&args)?);
    if let Some(path) = &args.import {
        let report = server.store().replace(read_document(path)?)?;
        println!(
            "{} Imported {} pairs from {}",
            "✓".green().bold(),
            server.store().read()?.pairs().len(),
            path.display().to_string().bold()
        );
        print_warnings(&report);
    }
    println!("Simulation server on {}", server.config().bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_validate(args: ValidateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let document = read_document(&args.file)?;
    let importer = match args.max_pairs {
        Some(max) => Importer::with_max_pairs(max),
        None => Importer::new(),
    };
    let (accepted, report) = importer.prepare(document)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text if report.is_clean() => {
            println!(
                "{} {} pairs{}, no warnings",
                "✓".green().bold(),
                accepted.pairs().len(),
                pair_limit(&importer)
            );
        }
        OutputFormat::Text => {
            println!(
                "{} {} pairs{} accepted with {} warnings",
                "!".yellow().bold(),
                accepted.pairs().len(),
                pair_limit(&importer),
                report.warnings.len()
            );
            print_warnings(&report);
        }
    }
    Ok(())
}

fn pair_limit(importer: &Importer) -> String {
    match importer.max_pairs() {
        Some(max) => format!(" (limit {max})"),
        None => String::new(),
    }
}

fn cmd_schema() -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&simulation_schema())?);
    Ok(())
}
