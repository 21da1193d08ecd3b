//! # geofence-cli: CLI Tool for the Geofence Stack
//!
//! Provides the `geofence` command-line interface for operators and CI
//! pipelines that check zone files before they are deployed.
//!
//! ## Subcommands
//!
//! - `geofence validate`: structural validation of a GeoJSON file.
//! - `geofence contains`: point-in-geometry probe.
//! - `geofence enforce`: delivery check against a zone snapshot.
//! - `geofence locate`: single-point delivery check.
//! - `geofence nest`: nesting check of a proposed tenant zone.
//! - `geofence zones`: list a tenant's zones from a snapshot.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | check passed                              |
//! | 1    | I/O or parse error                        |
//! | 2    | geometry invalid or policy check rejected |

pub mod geometry;
pub mod zones;

use std::path::Path;

use anyhow::{Context, Result};
use geofence_engine::{load_snapshot, GeofenceEngine, InMemoryZoneRepository};
use serde::Serialize;

/// Exit code for a passing check.
pub const EXIT_PASS: u8 = 0;

/// Exit code for a failing check.
pub const EXIT_FAIL: u8 = 2;

/// Map a pass/fail outcome to an exit code.
pub fn exit_code(passed: bool) -> u8 {
    if passed {
        EXIT_PASS
    } else {
        EXIT_FAIL
    }
}

/// Read a GeoJSON document (bare geometry or Feature).
pub fn read_geojson(path: &Path) -> Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Load a zone snapshot into an engine.
pub fn open_engine(zones: &Path) -> Result<GeofenceEngine<InMemoryZoneRepository>> {
    let snapshot = load_snapshot(zones)?;
    let repository = InMemoryZoneRepository::from_snapshot(snapshot)
        .with_context(|| format!("zone snapshot {} rejected", zones.display()))?;
    Ok(GeofenceEngine::new(repository))
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
