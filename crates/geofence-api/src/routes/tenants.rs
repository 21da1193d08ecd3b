//! # Tenant Zone API
//!
//! Per-tenant endpoints over the zone repository:
//!
//! - zone listing for partner and operator consoles,
//! - delivery enforcement for the ordering workflow (fail-closed),
//! - nesting checks for the zone-management workflow (fail-open).
//!
//! Policy rejections are `200 OK` with `allowed: false` / `valid: false`.
//! Only malformed input and repository failures are errors.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use geofence_core::{parse_geometry, Coordinate, TenantId, Zone, ZoneScope};
use geofence_engine::{DeliveryOutcome, NestingOutcome, ZoneRepository};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Query for zone listing.
#[derive(Debug, Deserialize, Default)]
pub struct ZoneListParams {
    /// `platform` or `tenant`. All scopes when absent.
    pub scope: Option<String>,
}

/// Zone listing response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ZoneListResponse {
    pub tenant_id: TenantId,
    pub zones: Vec<Zone>,
}

/// Pickup/dropoff pair for an order.
#[derive(Debug, Deserialize)]
pub struct DeliveryCheckRequest {
    pub pickup: Coordinate,
    pub dropoff: Coordinate,
}

impl Validate for DeliveryCheckRequest {
    fn validate(&self) -> Result<(), String> {
        check_point("pickup", self.pickup)?;
        check_point("dropoff", self.dropoff)
    }
}

/// Single delivery point.
#[derive(Debug, Deserialize)]
pub struct LocationCheckRequest {
    pub point: Coordinate,
}

impl Validate for LocationCheckRequest {
    fn validate(&self) -> Result<(), String> {
        check_point("point", self.point)
    }
}

/// Proposed tenant zone.
#[derive(Debug, Deserialize)]
pub struct ZoneValidationRequest {
    /// GeoJSON geometry or Feature.
    pub geometry: serde_json::Value,
}

impl Validate for ZoneValidationRequest {
    fn validate(&self) -> Result<(), String> {
        if self.geometry.is_null() {
            return Err("geometry must not be null".to_string());
        }
        Ok(())
    }
}

fn check_point(field: &str, point: Coordinate) -> Result<(), String> {
    if point.is_within_bounds() {
        Ok(())
    } else {
        Err(format!(
            "{field} must have longitude -180 to 180 and latitude -90 to 90"
        ))
    }
}

fn tenant_id(raw: &str) -> Result<TenantId, AppError> {
    Ok(TenantId::new(raw)?)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/tenants/{tenant_id}/zones", get(list_zones))
        .route("/v1/tenants/{tenant_id}/zones/validate", post(validate_zone))
        .route("/v1/tenants/{tenant_id}/delivery-check", post(delivery_check))
        .route("/v1/tenants/{tenant_id}/location-check", post(location_check))
}

/// GET /v1/tenants/{tenant_id}/zones: List a tenant's zones.
///
/// Inactive zones are included. `?scope=platform|tenant` filters by scope.
async fn list_zones(
    State(state): State<AppState>,
    Path(raw_tenant): Path<String>,
    Query(params): Query<ZoneListParams>,
) -> Result<Json<ZoneListResponse>, AppError> {
    let tenant_id = tenant_id(&raw_tenant)?;
    let scope = params
        .scope
        .as_deref()
        .map(str::parse::<ZoneScope>)
        .transpose()?;

    if state.repository.tenant(&tenant_id)?.is_none() {
        return Err(AppError::NotFound(format!("tenant {tenant_id}")));
    }
    let zones = state.repository.zones(&tenant_id, scope)?;
    Ok(Json(ZoneListResponse { tenant_id, zones }))
}

/// POST /v1/tenants/{tenant_id}/delivery-check: Gate an order.
async fn delivery_check(
    State(state): State<AppState>,
    Path(raw_tenant): Path<String>,
    body: Result<Json<DeliveryCheckRequest>, JsonRejection>,
) -> Result<Json<DeliveryOutcome>, AppError> {
    let tenant_id = tenant_id(&raw_tenant)?;
    let req = extract_validated_json(body)?;
    let decision = state
        .engine
        .enforce_delivery(&tenant_id, req.pickup, req.dropoff)?;
    state.metrics.record_decision("delivery", decision.label());
    Ok(Json(decision.outcome()))
}

/// POST /v1/tenants/{tenant_id}/location-check: Gate a single delivery point.
async fn location_check(
    State(state): State<AppState>,
    Path(raw_tenant): Path<String>,
    body: Result<Json<LocationCheckRequest>, JsonRejection>,
) -> Result<Json<DeliveryOutcome>, AppError> {
    let tenant_id = tenant_id(&raw_tenant)?;
    let req = extract_validated_json(body)?;
    let decision = state.engine.check_delivery_location(&tenant_id, req.point)?;
    state.metrics.record_decision("location", decision.label());
    Ok(Json(decision.outcome()))
}

/// POST /v1/tenants/{tenant_id}/zones/validate: Check a proposed tenant zone.
///
/// The geometry must pass structural validation (422 otherwise) before it
/// is checked against the tenant's platform boundaries.
async fn validate_zone(
    State(state): State<AppState>,
    Path(raw_tenant): Path<String>,
    body: Result<Json<ZoneValidationRequest>, JsonRejection>,
) -> Result<Json<NestingOutcome>, AppError> {
    let tenant_id = tenant_id(&raw_tenant)?;
    let req = extract_validated_json(body)?;
    let proposed = parse_geometry(&req.geometry)?;
    let decision = state.engine.validate_tenant_zone(&tenant_id, &proposed)?;
    state.metrics.record_decision("nesting", decision.label());
    Ok(Json(decision.outcome()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_request_rejects_out_of_range_points() {
        let req = DeliveryCheckRequest {
            pickup: Coordinate::new(36.8, -1.3),
            dropoff: Coordinate::new(200.0, 0.0),
        };
        let err = req.validate().unwrap_err();
        assert!(err.starts_with("dropoff"));
    }

    #[test]
    fn blank_tenant_is_validation_error() {
        assert!(matches!(tenant_id("  "), Err(AppError::Validation(_))));
        assert_eq!(tenant_id(" acme ").unwrap().as_str(), "acme");
    }

    #[test]
    fn null_geometry_rejected_before_parsing() {
        let req = ZoneValidationRequest {
            geometry: serde_json::Value::Null,
        };
        assert!(req.validate().is_err());
    }
}
