//! # Geometry Subcommands
//!
//! - `geofence validate <GEOJSON>`
//! - `geofence contains <GEOJSON> --point <LON,LAT>`

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use geofence_core::{parse_geometry, point_in_geometry, Coordinate};
use serde::Serialize;

use crate::{exit_code, print_json, read_geojson};

/// Arguments for `geofence validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// GeoJSON file holding a Polygon, MultiPolygon or Feature.
    pub path: PathBuf,
}

/// Arguments for `geofence contains`.
#[derive(Args, Debug)]
pub struct ContainsArgs {
    /// GeoJSON file holding a Polygon, MultiPolygon or Feature.
    pub path: PathBuf,

    /// Point to test, as `<longitude>,<latitude>`.
    #[arg(long, allow_hyphen_values = true)]
    pub point: Coordinate,
}

#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    message: String,
}

#[derive(Debug, Serialize)]
struct ContainsReport {
    point: Coordinate,
    inside: bool,
}

/// Execute `geofence validate`.
pub fn run_validate(args: &ValidateArgs, json: bool) -> Result<u8> {
    let value = read_geojson(&args.path)?;
    let report = match parse_geometry(&value) {
        Ok(geometry) => ValidationReport {
            valid: true,
            message: format!("valid {}", geometry.kind()),
        },
        Err(reason) => ValidationReport {
            valid: false,
            message: reason.to_string(),
        },
    };

    if json {
        print_json(&report)?;
    } else if report.valid {
        println!("OK: {} ({})", args.path.display(), report.message);
    } else {
        println!("INVALID: {}: {}", args.path.display(), report.message);
    }
    Ok(exit_code(report.valid))
}

/// Execute `geofence contains`.
///
/// An invalid geometry is reported like `validate` and exits 2.
pub fn run_contains(args: &ContainsArgs, json: bool) -> Result<u8> {
    let value = read_geojson(&args.path)?;
    let geometry = match parse_geometry(&value) {
        Ok(geometry) => geometry,
        Err(reason) => {
            return report_invalid(&args.path, &reason.to_string(), json);
        }
    };

    let report = ContainsReport {
        point: args.point,
        inside: point_in_geometry(args.point, &geometry),
    };
    if json {
        print_json(&report)?;
    } else {
        let verdict = if report.inside { "inside" } else { "outside" };
        println!("{} is {verdict} {}", report.point, args.path.display());
    }
    Ok(exit_code(report.inside))
}

fn report_invalid(path: &std::path::Path, message: &str, json: bool) -> Result<u8> {
    if json {
        print_json(&ValidationReport {
            valid: false,
            message: message.to_string(),
        })?;
    } else {
        println!("INVALID: {}: {message}", path.display());
    }
    Ok(exit_code(false))
}
