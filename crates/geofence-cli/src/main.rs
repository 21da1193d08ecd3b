//! # geofence CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use geofence_cli::geometry::{run_contains, run_validate, ContainsArgs, ValidateArgs};
use geofence_cli::zones::{
    run_enforce, run_locate, run_nest, run_zones, EnforceArgs, ListArgs, LocateArgs, NestArgs,
};

/// Geofence Stack CLI
///
/// Validates GeoJSON delivery zones and runs delivery and nesting checks
/// against zone snapshot files.
#[derive(Parser, Debug)]
#[command(name = "geofence", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a GeoJSON Polygon or MultiPolygon.
    Validate(ValidateArgs),

    /// Test whether a point lies inside a GeoJSON geometry.
    Contains(ContainsArgs),

    /// Check a pickup/dropoff pair against a tenant's delivery zones.
    Enforce(EnforceArgs),

    /// Check a single delivery point against a tenant's delivery zones.
    Locate(LocateArgs),

    /// Check a proposed tenant zone against its platform boundaries.
    Nest(NestArgs),

    /// List a tenant's zones.
    Zones(ListArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, cli.json),
        Commands::Contains(args) => run_contains(args, cli.json),
        Commands::Enforce(args) => run_enforce(args, cli.json),
        Commands::Locate(args) => run_locate(args, cli.json),
        Commands::Nest(args) => run_nest(args, cli.json),
        Commands::Zones(args) => run_zones(args, cli.json),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
