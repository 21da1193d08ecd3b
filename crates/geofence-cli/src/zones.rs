//! # Zone Subcommands
//!
//! Run the zone engine against a snapshot file, the same file the API
//! server loads from `GEOFENCE_ZONES_PATH`.
//!
//! - `geofence enforce --zones <SNAPSHOT> --tenant <ID> --pickup <LON,LAT> --dropoff <LON,LAT>`
//! - `geofence locate  --zones <SNAPSHOT> --tenant <ID> --point <LON,LAT>`
//! - `geofence nest    --zones <SNAPSHOT> --tenant <ID> <GEOJSON>`
//! - `geofence zones   --zones <SNAPSHOT> --tenant <ID> [--scope platform|tenant]`

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use geofence_core::{parse_geometry, Coordinate, TenantId, ZoneScope};
use geofence_engine::ZoneRepository;

use crate::{exit_code, open_engine, print_json, read_geojson, EXIT_FAIL, EXIT_PASS};

/// Snapshot and tenant shared by every zone subcommand.
#[derive(Args, Debug)]
pub struct TenantArgs {
    /// Zone snapshot file (YAML, or JSON with a `.json` extension).
    #[arg(long)]
    pub zones: PathBuf,

    /// Tenant identifier.
    #[arg(long)]
    pub tenant: TenantId,
}

/// Arguments for `geofence enforce`.
#[derive(Args, Debug)]
pub struct EnforceArgs {
    #[command(flatten)]
    pub target: TenantArgs,

    /// Pickup point, `<longitude>,<latitude>`.
    #[arg(long, allow_hyphen_values = true)]
    pub pickup: Coordinate,

    /// Dropoff point, `<longitude>,<latitude>`.
    #[arg(long, allow_hyphen_values = true)]
    pub dropoff: Coordinate,
}

/// Arguments for `geofence locate`.
#[derive(Args, Debug)]
pub struct LocateArgs {
    #[command(flatten)]
    pub target: TenantArgs,

    /// Delivery point, `<longitude>,<latitude>`.
    #[arg(long, allow_hyphen_values = true)]
    pub point: Coordinate,
}

/// Arguments for `geofence nest`.
#[derive(Args, Debug)]
pub struct NestArgs {
    #[command(flatten)]
    pub target: TenantArgs,

    /// GeoJSON file with the proposed tenant zone.
    pub path: PathBuf,
}

/// Arguments for `geofence zones`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: TenantArgs,

    /// Only list zones of this scope.
    #[arg(long)]
    pub scope: Option<ZoneScope>,
}

/// Execute `geofence enforce`.
pub fn run_enforce(args: &EnforceArgs, json: bool) -> Result<u8> {
    let engine = open_engine(&args.target.zones)?;
    let decision = engine.enforce_delivery(&args.target.tenant, args.pickup, args.dropoff)?;
    let outcome = decision.outcome();
    if json {
        print_json(&outcome)?;
    } else {
        let verdict = if outcome.allowed { "ALLOWED" } else { "REJECTED" };
        println!("{verdict}: {}", outcome.message);
    }
    Ok(exit_code(outcome.allowed))
}

/// Execute `geofence locate`.
pub fn run_locate(args: &LocateArgs, json: bool) -> Result<u8> {
    let engine = open_engine(&args.target.zones)?;
    let decision = engine.check_delivery_location(&args.target.tenant, args.point)?;
    let outcome = decision.outcome();
    if json {
        print_json(&outcome)?;
    } else {
        let verdict = if outcome.allowed { "ALLOWED" } else { "REJECTED" };
        println!("{verdict}: {}", outcome.message);
    }
    Ok(exit_code(outcome.allowed))
}

/// Execute `geofence nest`.
///
/// A proposal that fails structural validation exits 2 before any
/// boundary is consulted.
pub fn run_nest(args: &NestArgs, json: bool) -> Result<u8> {
    let engine = open_engine(&args.target.zones)?;
    let value = read_geojson(&args.path)?;
    let proposed = match parse_geometry(&value) {
        Ok(geometry) => geometry,
        Err(reason) => {
            if json {
                print_json(&serde_json::json!({ "valid": false, "message": reason.to_string() }))?;
            } else {
                println!("INVALID: {}: {reason}", args.path.display());
            }
            return Ok(EXIT_FAIL);
        }
    };

    let decision = engine.validate_tenant_zone(&args.target.tenant, &proposed)?;
    let outcome = decision.outcome();
    if json {
        print_json(&outcome)?;
    } else if outcome.valid {
        println!("VALID: {}", outcome.message);
    } else {
        println!("INVALID: {}", outcome.message);
        for vertex in &outcome.outside_vertices {
            println!("  outside: {vertex}");
        }
    }
    Ok(exit_code(outcome.valid))
}

/// Execute `geofence zones`.
pub fn run_zones(args: &ListArgs, json: bool) -> Result<u8> {
    let engine = open_engine(&args.target.zones)?;
    let repository = engine.repository();
    let tenant = &args.target.tenant;
    if repository.tenant(tenant)?.is_none() {
        bail!("tenant {tenant} not found in {}", args.target.zones.display());
    }

    let zones = repository.zones(tenant, args.scope)?;
    if json {
        print_json(&zones)?;
        return Ok(EXIT_PASS);
    }

    println!("Zones for tenant {tenant}:");
    println!();
    for zone in &zones {
        println!(
            "  {:<24} {:<9} {:<13} {}",
            zone.name,
            zone.scope.as_str(),
            zone.geometry.kind(),
            if zone.active { "active" } else { "inactive" }
        );
    }
    println!();
    println!("Total: {} zones", zones.len());
    Ok(EXIT_PASS)
}
