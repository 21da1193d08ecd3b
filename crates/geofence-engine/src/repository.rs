//! # Zone Repository
//!
//! The read-only seam between the engine and whatever stores tenants and
//! zones. The engine only ever asks two questions: does this tenant exist,
//! and which of its zones (of a given scope) are there.
//!
//! [`InMemoryZoneRepository`] is the implementation shipped with the stack.
//! It holds a snapshot loaded from a file (see [`crate::snapshot`]) and is
//! what the API server and CLI run against.

use std::collections::HashMap;
use std::sync::Arc;

use geofence_core::{Tenant, TenantId, Zone, ZoneScope};
use parking_lot::RwLock;

use crate::error::{RepositoryError, SnapshotError};

/// Read access to tenants and their zones.
///
/// Implementations must only return zones owned by the requested tenant.
/// That filter is what isolates tenants from each other.
pub trait ZoneRepository: Send + Sync {
    /// Look up a tenant.
    fn tenant(&self, tenant_id: &TenantId) -> Result<Option<Tenant>, RepositoryError>;

    /// All zones of a tenant, active or not, optionally restricted to one
    /// scope. Unknown tenants have no zones.
    fn zones(
        &self,
        tenant_id: &TenantId,
        scope: Option<ZoneScope>,
    ) -> Result<Vec<Zone>, RepositoryError>;

    /// Active zones of one scope.
    fn active_zones(
        &self,
        tenant_id: &TenantId,
        scope: ZoneScope,
    ) -> Result<Vec<Zone>, RepositoryError> {
        let mut zones = self.zones(tenant_id, Some(scope))?;
        zones.retain(|zone| zone.active);
        Ok(zones)
    }

    /// Verify the backing store can currently be read.
    fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

impl<R: ZoneRepository + ?Sized> ZoneRepository for Arc<R> {
    fn tenant(&self, tenant_id: &TenantId) -> Result<Option<Tenant>, RepositoryError> {
        (**self).tenant(tenant_id)
    }

    fn zones(
        &self,
        tenant_id: &TenantId,
        scope: Option<ZoneScope>,
    ) -> Result<Vec<Zone>, RepositoryError> {
        (**self).zones(tenant_id, scope)
    }

    fn active_zones(
        &self,
        tenant_id: &TenantId,
        scope: ZoneScope,
    ) -> Result<Vec<Zone>, RepositoryError> {
        (**self).active_zones(tenant_id, scope)
    }

    fn ping(&self) -> Result<(), RepositoryError> {
        (**self).ping()
    }
}

// ─── In-memory implementation ────────────────────────────────────────

#[derive(Debug)]
struct TenantEntry {
    tenant: Tenant,
    zones: Vec<Zone>,
}

/// Thread-safe in-memory repository.
///
/// Zones keep their insertion order. Every inserted zone has passed
/// [`geofence_core::Geometry::validate`].
#[derive(Debug, Default)]
pub struct InMemoryZoneRepository {
    tenants: RwLock<HashMap<TenantId, TenantEntry>>,
}

impl InMemoryZoneRepository {
    /// Create an empty repository. Every delivery check against it fails
    /// closed with "tenant not found".
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::DuplicateTenant`] if the identifier is taken.
    pub fn insert_tenant(&self, tenant: Tenant) -> Result<(), SnapshotError> {
        let mut tenants = self.tenants.write();
        if tenants.contains_key(&tenant.id) {
            return Err(SnapshotError::DuplicateTenant(tenant.id));
        }
        tenants.insert(
            tenant.id.clone(),
            TenantEntry {
                tenant,
                zones: Vec::new(),
            },
        );
        Ok(())
    }

    /// Add a zone to its owning tenant after validating its geometry.
    ///
    /// # Errors
    ///
    /// - [`SnapshotError::UnknownTenant`] if the owner is not registered.
    /// - [`SnapshotError::InvalidZone`] if the geometry is malformed.
    pub fn insert_zone(&self, zone: Zone) -> Result<(), SnapshotError> {
        if let Err(source) = zone.geometry.validate() {
            return Err(SnapshotError::InvalidZone {
                zone: zone.name,
                tenant: zone.tenant_id,
                source,
            });
        }
        let mut tenants = self.tenants.write();
        match tenants.get_mut(&zone.tenant_id) {
            Some(entry) => {
                entry.zones.push(zone);
                Ok(())
            }
            None => Err(SnapshotError::UnknownTenant {
                zone: zone.name,
                tenant: zone.tenant_id,
            }),
        }
    }

    /// Number of registered tenants.
    pub fn tenant_count(&self) -> usize {
        self.tenants.read().len()
    }

    /// Number of zones per scope, counting active zones only when
    /// `active_only` is set.
    pub fn zone_count(&self, scope: ZoneScope, active_only: bool) -> usize {
        self.tenants
            .read()
            .values()
            .flat_map(|entry| entry.zones.iter())
            .filter(|zone| zone.scope == scope && (zone.active || !active_only))
            .count()
    }
}

impl ZoneRepository for InMemoryZoneRepository {
    fn tenant(&self, tenant_id: &TenantId) -> Result<Option<Tenant>, RepositoryError> {
        Ok(self
            .tenants
            .read()
            .get(tenant_id)
            .map(|entry| entry.tenant.clone()))
    }

    fn zones(
        &self,
        tenant_id: &TenantId,
        scope: Option<ZoneScope>,
    ) -> Result<Vec<Zone>, RepositoryError> {
        let tenants = self.tenants.read();
        let Some(entry) = tenants.get(tenant_id) else {
            return Ok(Vec::new());
        };
        Ok(entry
            .zones
            .iter()
            .filter(|zone| scope.map_or(true, |s| zone.scope == s))
            .cloned()
            .collect())
    }

    fn ping(&self) -> Result<(), RepositoryError> {
        let _ = self.tenants.read().len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geofence_core::{Coordinate, Geometry, InvalidGeometry, Polygon};

    fn tenant(id: &str) -> Tenant {
        Tenant {
            id: TenantId::new(id).unwrap(),
            name: format!("{id} deliveries"),
        }
    }

    fn square() -> Geometry {
        Geometry::Polygon(Polygon::from_outer(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ]))
    }

    fn zone(owner: &str, name: &str, scope: ZoneScope, active: bool) -> Zone {
        Zone::new(TenantId::new(owner).unwrap(), name, scope, square()).with_active(active)
    }

    #[test]
    fn zones_are_isolated_per_tenant() {
        let repo = InMemoryZoneRepository::new();
        repo.insert_tenant(tenant("acme")).unwrap();
        repo.insert_tenant(tenant("globex")).unwrap();
        repo.insert_zone(zone("acme", "a", ZoneScope::Tenant, true)).unwrap();
        repo.insert_zone(zone("globex", "g", ZoneScope::Tenant, true)).unwrap();

        let acme = TenantId::new("acme").unwrap();
        let zones = repo.zones(&acme, None).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "a");
    }

    #[test]
    fn active_zones_filter_scope_and_activity() {
        let repo = InMemoryZoneRepository::new();
        repo.insert_tenant(tenant("acme")).unwrap();
        repo.insert_zone(zone("acme", "live", ZoneScope::Tenant, true)).unwrap();
        repo.insert_zone(zone("acme", "paused", ZoneScope::Tenant, false)).unwrap();
        repo.insert_zone(zone("acme", "boundary", ZoneScope::Platform, true)).unwrap();

        let acme = TenantId::new("acme").unwrap();
        let active: Vec<String> = repo
            .active_zones(&acme, ZoneScope::Tenant)
            .unwrap()
            .into_iter()
            .map(|z| z.name)
            .collect();
        assert_eq!(active, vec!["live"]);
        assert_eq!(repo.zones(&acme, Some(ZoneScope::Tenant)).unwrap().len(), 2);
        assert_eq!(repo.zone_count(ZoneScope::Tenant, true), 1);
        assert_eq!(repo.zone_count(ZoneScope::Tenant, false), 2);
        assert_eq!(repo.zone_count(ZoneScope::Platform, true), 1);
    }

    #[test]
    fn unknown_tenant_has_no_zones() {
        let repo = InMemoryZoneRepository::new();
        let ghost = TenantId::new("ghost").unwrap();
        assert!(repo.tenant(&ghost).unwrap().is_none());
        assert!(repo.zones(&ghost, None).unwrap().is_empty());
    }

    #[test]
    fn duplicate_tenant_rejected() {
        let repo = InMemoryZoneRepository::new();
        repo.insert_tenant(tenant("acme")).unwrap();
        assert!(matches!(
            repo.insert_tenant(tenant("acme")),
            Err(SnapshotError::DuplicateTenant(_))
        ));
        assert_eq!(repo.tenant_count(), 1);
    }

    #[test]
    fn zone_for_unknown_tenant_rejected() {
        let repo = InMemoryZoneRepository::new();
        assert!(matches!(
            repo.insert_zone(zone("ghost", "z", ZoneScope::Tenant, true)),
            Err(SnapshotError::UnknownTenant { .. })
        ));
    }

    #[test]
    fn malformed_zone_rejected() {
        let repo = InMemoryZoneRepository::new();
        repo.insert_tenant(tenant("acme")).unwrap();
        let mut bad = zone("acme", "open", ZoneScope::Tenant, true);
        bad.geometry = Geometry::Polygon(Polygon::from_outer(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 1.0),
        ]));
        match repo.insert_zone(bad) {
            Err(SnapshotError::InvalidZone { source, .. }) => {
                assert_eq!(source, InvalidGeometry::RingNotClosed)
            }
            other => panic!("expected InvalidZone, got {other:?}"),
        }
    }

    #[test]
    fn arc_repository_delegates() {
        let repo = Arc::new(InMemoryZoneRepository::new());
        repo.insert_tenant(tenant("acme")).unwrap();
        let acme = TenantId::new("acme").unwrap();
        let as_trait: &dyn ZoneRepository = &repo;
        assert!(as_trait.tenant(&acme).unwrap().is_some());
    }

    #[test]
    fn in_memory_repository_is_always_readable() {
        let repo = Arc::new(InMemoryZoneRepository::new());
        assert_eq!(repo.ping(), Ok(()));
        repo.insert_tenant(tenant("acme")).unwrap();
        assert_eq!(repo.ping(), Ok(()));
    }
}
