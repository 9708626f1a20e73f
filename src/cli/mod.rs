//! Command-line interface definitions.

pub mod convert;
pub mod output;
pub mod scan;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::Sport;

/// Linesman - cross-book sports odds normalization and mispricing detection.
#[derive(Parser, Debug)]
#[command(name = "linesman")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch provider prices, align games, and rank mispricings
    Scan(ScanArgs),

    /// Convert a single price between odds representations
    Convert(ConvertArgs),

    /// Print the observed Kalshi cents-to-American conversion table
    Table(TableArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `linesman check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file and report effective settings
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `scan` subcommand.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Sport to scan (nfl, mlb, nba, nhl, ncaaf, ncaab)
    #[arg(short, long)]
    pub sport: Sport,

    /// Days ahead to include
    #[arg(long, default_value_t = 3)]
    pub days: i64,

    /// Override the sport's minimum edge threshold
    #[arg(long)]
    pub min_edge: Option<Decimal>,
}

/// Arguments for the `convert` subcommand.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// American odds input (e.g. -262 or 140)
    #[arg(long, allow_hyphen_values = true)]
    pub american: Option<i64>,

    /// Win probability input in (0, 1)
    #[arg(long)]
    pub probability: Option<Decimal>,

    /// Kalshi contract price input in cents (1-99)
    #[arg(long)]
    pub cents: Option<u32>,

    /// Fee haircut applied to probability inputs (e.g. 0.03)
    #[arg(long, default_value = "0")]
    pub fee: Decimal,
}

/// Arguments for the `table` subcommand.
#[derive(Parser, Debug)]
pub struct TableArgs {
    /// First cents row to print
    #[arg(long, default_value_t = 1)]
    pub start: u32,

    /// Last cents row to print
    #[arg(long, default_value_t = 99)]
    pub end: u32,
}

/// Dispatch a parsed command line.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Scan(args) => scan::run(&args).await,
        Commands::Convert(args) => convert::run(&args),
        Commands::Table(args) => convert::table(&args),
        Commands::Check(CheckCommand::Config(args)) => convert::check_config(&args),
    }
}
