//! # Delivery Enforcement
//!
//! Fail-closed gating of orders against a tenant's active delivery zones.
//!
//! Check order, first failure wins:
//!
//! 1. the tenant exists
//! 2. the tenant has at least one active `tenant` zone
//! 3. the pickup lies in the union of those zones
//! 4. the dropoff lies in the union of those zones
//!
//! The dropoff is not evaluated once the pickup fails.

use geofence_core::{point_in_any, Coordinate, TenantId, Zone, ZoneScope};

use crate::decision::{DeliveryDecision, DeliveryRejection};
use crate::engine::GeofenceEngine;
use crate::error::RepositoryError;
use crate::repository::ZoneRepository;

/// Evaluate a pickup/dropoff pair against an already-fetched zone set.
///
/// `zones` is expected to hold the tenant's active tenant-scoped zones. An
/// empty set rejects with [`DeliveryRejection::NoActiveZones`].
pub fn check_delivery(zones: &[Zone], pickup: Coordinate, dropoff: Coordinate) -> DeliveryDecision {
    if zones.is_empty() {
        return DeliveryDecision::Rejected(DeliveryRejection::NoActiveZones);
    }
    let geometries = || zones.iter().map(|zone| &zone.geometry);
    if !point_in_any(pickup, geometries()) {
        return DeliveryDecision::Rejected(DeliveryRejection::PickupOutside);
    }
    if !point_in_any(dropoff, geometries()) {
        return DeliveryDecision::Rejected(DeliveryRejection::DropoffOutside);
    }
    DeliveryDecision::Allowed
}

/// Single-point variant of [`check_delivery`].
pub fn check_location(zones: &[Zone], point: Coordinate) -> DeliveryDecision {
    if zones.is_empty() {
        return DeliveryDecision::Rejected(DeliveryRejection::NoActiveZones);
    }
    if point_in_any(point, zones.iter().map(|zone| &zone.geometry)) {
        DeliveryDecision::Allowed
    } else {
        DeliveryDecision::Rejected(DeliveryRejection::LocationOutside)
    }
}

impl<R: ZoneRepository> GeofenceEngine<R> {
    /// Decide whether an order from `pickup` to `dropoff` may be created for
    /// `tenant_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the repository cannot answer. The
    /// caller must not treat that as permission.
    pub fn enforce_delivery(
        &self,
        tenant_id: &TenantId,
        pickup: Coordinate,
        dropoff: Coordinate,
    ) -> Result<DeliveryDecision, RepositoryError> {
        let zones = match self.delivery_zones(tenant_id)? {
            Ok(zones) => zones,
            Err(rejection) => return Ok(DeliveryDecision::Rejected(rejection)),
        };
        let decision = check_delivery(&zones, pickup, dropoff);
        match decision {
            DeliveryDecision::Allowed => tracing::debug!(
                tenant = %tenant_id,
                %pickup,
                %dropoff,
                zones = zones.len(),
                "delivery allowed"
            ),
            DeliveryDecision::Rejected(reason) => tracing::info!(
                tenant = %tenant_id,
                %pickup,
                %dropoff,
                reason = reason.label(),
                "delivery rejected"
            ),
        }
        Ok(decision)
    }

    /// Decide whether a single delivery point is serviceable for `tenant_id`.
    ///
    /// Same preconditions as [`Self::enforce_delivery`].
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the repository cannot answer.
    pub fn check_delivery_location(
        &self,
        tenant_id: &TenantId,
        point: Coordinate,
    ) -> Result<DeliveryDecision, RepositoryError> {
        let zones = match self.delivery_zones(tenant_id)? {
            Ok(zones) => zones,
            Err(rejection) => return Ok(DeliveryDecision::Rejected(rejection)),
        };
        let decision = check_location(&zones, point);
        tracing::debug!(
            tenant = %tenant_id,
            %point,
            outcome = decision.label(),
            "delivery location checked"
        );
        Ok(decision)
    }

    /// Resolve the tenant and its active delivery zones, or the fail-closed
    /// rejection that applies.
    fn delivery_zones(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Result<Vec<Zone>, DeliveryRejection>, RepositoryError> {
        if self.repository().tenant(tenant_id)?.is_none() {
            tracing::warn!(tenant = %tenant_id, "delivery check for unknown tenant");
            return Ok(Err(DeliveryRejection::TenantNotFound));
        }
        let zones = self.repository().active_zones(tenant_id, ZoneScope::Tenant)?;
        if zones.is_empty() {
            tracing::warn!(tenant = %tenant_id, "tenant has no active delivery zones");
            return Ok(Err(DeliveryRejection::NoActiveZones));
        }
        Ok(Ok(zones))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofence_core::{Geometry, Polygon};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry {
        Geometry::Polygon(Polygon::from_outer(vec![
            Coordinate::new(x0, y0),
            Coordinate::new(x1, y0),
            Coordinate::new(x1, y1),
            Coordinate::new(x0, y1),
            Coordinate::new(x0, y0),
        ]))
    }

    fn zones(geometries: Vec<Geometry>) -> Vec<Zone> {
        let owner = TenantId::new("acme").unwrap();
        geometries
            .into_iter()
            .enumerate()
            .map(|(i, g)| Zone::new(owner.clone(), format!("zone-{i}"), ZoneScope::Tenant, g))
            .collect()
    }

    #[test]
    fn empty_zone_set_fails_closed() {
        let decision = check_delivery(&[], Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0));
        assert_eq!(
            decision,
            DeliveryDecision::Rejected(DeliveryRejection::NoActiveZones)
        );
        assert_eq!(
            check_location(&[], Coordinate::new(0.0, 0.0)),
            DeliveryDecision::Rejected(DeliveryRejection::NoActiveZones)
        );
    }

    #[test]
    fn pickup_is_checked_before_dropoff() {
        let set = zones(vec![rect(0.0, 0.0, 10.0, 10.0)]);
        let decision = check_delivery(&set, Coordinate::new(20.0, 20.0), Coordinate::new(30.0, 30.0));
        assert_eq!(
            decision,
            DeliveryDecision::Rejected(DeliveryRejection::PickupOutside)
        );
    }

    #[test]
    fn dropoff_outside_rejected() {
        let set = zones(vec![rect(0.0, 0.0, 10.0, 10.0)]);
        let decision = check_delivery(&set, Coordinate::new(5.0, 5.0), Coordinate::new(15.0, 5.0));
        assert_eq!(
            decision,
            DeliveryDecision::Rejected(DeliveryRejection::DropoffOutside)
        );
    }

    #[test]
    fn endpoints_may_use_different_zones() {
        let set = zones(vec![rect(0.0, 0.0, 10.0, 10.0), rect(20.0, 0.0, 30.0, 10.0)]);
        let decision = check_delivery(&set, Coordinate::new(5.0, 5.0), Coordinate::new(25.0, 5.0));
        assert!(decision.is_allowed());
        assert_eq!(decision.to_string(), "order within allowed delivery zones");
    }

    #[test]
    fn single_location_outside() {
        let set = zones(vec![rect(0.0, 0.0, 10.0, 10.0)]);
        assert_eq!(
            check_location(&set, Coordinate::new(-1.0, 5.0)),
            DeliveryDecision::Rejected(DeliveryRejection::LocationOutside)
        );
        assert!(check_location(&set, Coordinate::new(1.0, 5.0)).is_allowed());
    }
}
