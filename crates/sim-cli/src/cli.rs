use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "simctl",
    about = "Simulation management server and tooling",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the simulation management server
    Serve(ServeArgs),
    /// Check a simulation file and report import warnings
    Validate(ValidateArgs),
    /// Print the simulation body schema
    Schema,
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub auth_token: Option<String>,
    #[arg(long)]
    pub max_pairs: Option<usize>,
    /// Simulation file loaded into the store before serving
    #[arg(long)]
    pub import: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub max_pairs: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve_defaults() {
        let cli = Cli::try_parse_from(["simctl", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert!(args.config.is_none());
            assert!(args.bind.is_none());
            assert!(args.import.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "simctl", "serve", "--bind", "0.0.0.0:8080", "--max-pairs", "10",
            "--import", "sim.json", "--auth-token", "abc",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert_eq!(args.max_pairs, Some(10));
            assert_eq!(args.import, Some(PathBuf::from("sim.json")));
            assert_eq!(args.auth_token.as_deref(), Some("abc"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_rejects_bad_bind() {
        assert!(Cli::try_parse_from(["simctl", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn parse_validate() {
        let cli = Cli::try_parse_from(["simctl", "validate", "sim.json"]).unwrap();
        if let Command::Validate(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("sim.json"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_schema_json() {
        let cli = Cli::try_parse_from(["simctl", "--format", "json", "schema"]).unwrap();
        assert!(matches!(cli.command, Command::Schema));
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["simctl", "--verbose", "schema"]).unwrap();
        assert!(cli.verbose);
    }
}
