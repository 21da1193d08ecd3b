//! # Geometry API
//!
//! Stateless endpoints over the geometry validator and the point-containment
//! engine. Partner consoles call `validate` before submitting a zone, and
//! tooling uses `contains` to probe a geometry without storing it.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use geofence_core::{parse_geometry, point_in_geometry, Coordinate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Message returned for a structurally valid geometry.
pub const VALID_GEOMETRY_MESSAGE: &str = "geometry is valid";

/// Result of a validation request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub message: String,
}

/// Point-containment probe.
#[derive(Debug, Deserialize)]
pub struct ContainsRequest {
    /// `[longitude, latitude]`.
    pub point: Coordinate,
    /// GeoJSON geometry or Feature.
    pub geometry: serde_json::Value,
}

/// Result of a containment probe.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContainsResponse {
    pub inside: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/geometry/validate", post(validate_geometry))
        .route("/v1/geometry/contains", post(contains))
}

/// POST /v1/geometry/validate: Run the geometry validator.
///
/// Always 200 for a JSON body: an invalid geometry is reported as
/// `valid: false` with the reason as message.
async fn validate_geometry(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ValidationResponse>, AppError> {
    let Json(value) = extract_json(body)?;
    let response = match parse_geometry(&value) {
        Ok(_) => ValidationResponse {
            valid: true,
            message: VALID_GEOMETRY_MESSAGE.to_string(),
        },
        Err(reason) => ValidationResponse {
            valid: false,
            message: reason.to_string(),
        },
    };
    state.metrics.record_decision(
        "geometry_validate",
        if response.valid { "valid" } else { "invalid" },
    );
    Ok(Json(response))
}

/// POST /v1/geometry/contains: Test a point against a geometry.
///
/// The geometry is validated first; a malformed one is a 422.
async fn contains(
    body: Result<Json<ContainsRequest>, JsonRejection>,
) -> Result<Json<ContainsResponse>, AppError> {
    let Json(req) = extract_json(body)?;
    let geometry = parse_geometry(&req.geometry)?;
    Ok(Json(ContainsResponse {
        inside: point_in_geometry(req.point, &geometry),
    }))
}
