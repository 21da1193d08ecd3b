//! # Zone Snapshots
//!
//! File format used to seed an [`InMemoryZoneRepository`]. YAML is the
//! default; a `.json` extension selects JSON.
//!
//! ```yaml
//! tenants:
//!   - id: acme
//!     name: Acme Deliveries
//!     zones:
//!       - name: Downtown
//!         scope: tenant          # default
//!         active: true           # default
//!         geometry:
//!           type: Polygon
//!           coordinates: [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]
//! ```
//!
//! `geometry` accepts anything `parse_geometry` accepts, including a GeoJSON
//! `Feature` wrapper, and goes through the same structural validation as
//! API input.

use std::path::Path;

use geofence_core::{parse_geometry, Tenant, TenantId, Zone, ZoneId, ZoneScope};
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::repository::InMemoryZoneRepository;

/// Root of a snapshot document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    /// Registered tenants and their zones.
    #[serde(default)]
    pub tenants: Vec<TenantRecord>,
}

/// A tenant and the zones it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRecord {
    /// Tenant identifier.
    pub id: TenantId,
    /// Display name. Defaults to the identifier.
    #[serde(default)]
    pub name: Option<String>,
    /// Zones owned by the tenant, platform boundaries included.
    #[serde(default)]
    pub zones: Vec<ZoneRecord>,
}

/// A zone as written in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Identifier. Generated when absent.
    #[serde(default)]
    pub id: Option<ZoneId>,
    /// Zone label.
    pub name: String,
    /// Authoring scope.
    #[serde(default = "default_scope")]
    pub scope: ZoneScope,
    /// Whether checks consult the zone.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Raw GeoJSON geometry.
    pub geometry: serde_json::Value,
}

fn default_scope() -> ZoneScope {
    ZoneScope::Tenant
}

fn default_active() -> bool {
    true
}

impl ZoneRecord {
    fn into_zone(self, tenant_id: &TenantId) -> Result<Zone, SnapshotError> {
        let geometry = parse_geometry(&self.geometry).map_err(|source| SnapshotError::InvalidZone {
            zone: self.name.clone(),
            tenant: tenant_id.clone(),
            source,
        })?;
        Ok(Zone {
            id: self.id.unwrap_or_default(),
            tenant_id: tenant_id.clone(),
            name: self.name,
            scope: self.scope,
            active: self.active,
            geometry,
            created_at: None,
        })
    }
}

impl InMemoryZoneRepository {
    /// Build a repository from a parsed snapshot.
    ///
    /// # Errors
    ///
    /// Fails on the first duplicate tenant or invalid zone geometry. Nothing
    /// is served from a partially loaded snapshot.
    pub fn from_snapshot(snapshot: ZoneSnapshot) -> Result<Self, SnapshotError> {
        let repository = Self::new();
        for record in snapshot.tenants {
            let name = record
                .name
                .unwrap_or_else(|| record.id.as_str().to_string());
            repository.insert_tenant(Tenant {
                id: record.id.clone(),
                name,
            })?;
            for zone in record.zones {
                repository.insert_zone(zone.into_zone(&record.id)?)?;
            }
        }
        tracing::info!(
            tenants = repository.tenant_count(),
            tenant_zones = repository.zone_count(ZoneScope::Tenant, false),
            platform_zones = repository.zone_count(ZoneScope::Platform, false),
            "zone snapshot loaded"
        );
        Ok(repository)
    }
}

/// Parse a snapshot file. `.json` files are read as JSON, anything else as
/// YAML.
///
/// # Errors
///
/// [`SnapshotError::Io`] or [`SnapshotError::Parse`].
pub fn load_snapshot(path: &Path) -> Result<ZoneSnapshot, SnapshotError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&contents).map_err(|e| e.to_string())
    };
    parsed.map_err(|reason| SnapshotError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::ZoneRepository;
    use geofence_core::InvalidGeometry;
    use std::io::Write;

    const YAML: &str = r#"
tenants:
  - id: acme
    name: Acme Deliveries
    zones:
      - name: Downtown
        geometry:
          type: Polygon
          coordinates: [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]
      - name: Paused
        active: false
        geometry:
          type: Feature
          properties: {}
          geometry:
            type: Polygon
            coordinates: [[[20, 0], [30, 0], [30, 10], [20, 10], [20, 0]]]
      - name: Metro boundary
        scope: platform
        geometry:
          type: MultiPolygon
          coordinates:
            - [[[-50, -50], [50, -50], [50, 50], [-50, 50], [-50, -50]]]
  - id: globex
"#;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn yaml_snapshot_loads_with_defaults() {
        let file = write_temp(".yaml", YAML);
        let snapshot = load_snapshot(file.path()).unwrap();
        let repo = InMemoryZoneRepository::from_snapshot(snapshot).unwrap();

        assert_eq!(repo.tenant_count(), 2);
        let acme = TenantId::new("acme").unwrap();
        let tenant_zones = repo.zones(&acme, Some(ZoneScope::Tenant)).unwrap();
        assert_eq!(tenant_zones.len(), 2);
        assert!(tenant_zones[0].active);
        assert!(!tenant_zones[1].active);
        assert_eq!(repo.active_zones(&acme, ZoneScope::Platform).unwrap().len(), 1);

        let globex = TenantId::new("globex").unwrap();
        assert_eq!(repo.tenant(&globex).unwrap().unwrap().name, "globex");
    }

    #[test]
    fn json_snapshot_selected_by_extension() {
        let json = r#"{"tenants":[{"id":"acme","zones":[{"name":"z","geometry":
            {"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,1],[0,0]]]}}]}]}"#;
        let file = write_temp(".json", json);
        let snapshot = load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.tenants.len(), 1);
        assert_eq!(snapshot.tenants[0].zones[0].scope, ZoneScope::Tenant);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }

    #[test]
    fn garbage_is_parse_error() {
        let file = write_temp(".yaml", "tenants: [ this is : not valid");
        assert!(matches!(
            load_snapshot(file.path()),
            Err(SnapshotError::Parse { .. })
        ));
    }

    #[test]
    fn invalid_zone_geometry_rejects_whole_snapshot() {
        let yaml = r#"
tenants:
  - id: acme
    zones:
      - name: Open ring
        geometry:
          type: Polygon
          coordinates: [[[0, 0], [10, 0], [10, 10], [0, 10]]]
"#;
        let snapshot: ZoneSnapshot = serde_yaml::from_str(yaml).unwrap();
        match InMemoryZoneRepository::from_snapshot(snapshot) {
            Err(SnapshotError::InvalidZone { zone, source, .. }) => {
                assert_eq!(zone, "Open ring");
                assert_eq!(source, InvalidGeometry::RingNotClosed);
            }
            other => panic!("expected InvalidZone, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_tenant_rejects_snapshot() {
        let yaml = "tenants:\n  - id: acme\n  - id: acme\n";
        let snapshot: ZoneSnapshot = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            InMemoryZoneRepository::from_snapshot(snapshot),
            Err(SnapshotError::DuplicateTenant(_))
        ));
    }
}
