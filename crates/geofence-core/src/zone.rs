//! # Tenant & Zone Records
//!
//! Read-only records the engine consumes from the zone repository.
//!
//! A [`Zone`] carries exactly one [`Geometry`] and a [`ZoneScope`]:
//!
//! - [`ZoneScope::Tenant`]: a partner's self-declared delivery area. Gates
//!   live order traffic; only active tenant zones grant coverage.
//! - [`ZoneScope::Platform`]: an operator-authored outer boundary that
//!   constrains which tenant zones may be configured.
//!
//! The engine never mutates these records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::containment::point_in_geometry;
use crate::error::ValidationError;
use crate::geometry::{Coordinate, Geometry};
use crate::identity::{TenantId, ZoneId};

/// Who authored a zone, and therefore what it is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneScope {
    /// Operator-owned authorization boundary.
    Platform,
    /// Partner-owned delivery area.
    Tenant,
}

impl ZoneScope {
    /// All scopes, in display order.
    pub const ALL: [ZoneScope; 2] = [ZoneScope::Platform, ZoneScope::Tenant];

    /// Wire name of the scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Tenant => "tenant",
        }
    }
}

impl std::fmt::Display for ZoneScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ZoneScope {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "platform" => Ok(Self::Platform),
            "tenant" => Ok(Self::Tenant),
            _ => Err(ValidationError::InvalidZoneScope(s.to_string())),
        }
    }
}

/// A partner tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    /// Tenant identifier.
    pub id: TenantId,
    /// Display name.
    pub name: String,
}

/// A delivery or authorization zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier.
    pub id: ZoneId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Human-readable label shown in consoles.
    pub name: String,
    /// Authoring scope.
    pub scope: ZoneScope,
    /// Inactive zones are ignored by every check.
    pub active: bool,
    /// Zone boundary.
    pub geometry: Geometry,
    /// Creation time, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Zone {
    /// Create an active zone with a fresh identifier.
    pub fn new(
        tenant_id: TenantId,
        name: impl Into<String>,
        scope: ZoneScope,
        geometry: Geometry,
    ) -> Self {
        Self {
            id: ZoneId::new(),
            tenant_id,
            name: name.into(),
            scope,
            active: true,
            geometry,
            created_at: Some(Utc::now()),
        }
    }

    /// Builder-style activity toggle.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Whether `point` lies inside this zone's geometry.
    pub fn contains(&self, point: Coordinate) -> bool {
        point_in_geometry(point, &self.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;

    fn unit_square() -> Geometry {
        Geometry::Polygon(Polygon::from_outer(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ]))
    }

    #[test]
    fn scope_wire_names() {
        assert_eq!(serde_json::to_string(&ZoneScope::Platform).unwrap(), "\"platform\"");
        assert_eq!(serde_json::to_string(&ZoneScope::Tenant).unwrap(), "\"tenant\"");
        assert_eq!("Tenant".parse::<ZoneScope>().unwrap(), ZoneScope::Tenant);
        assert!("zeus".parse::<ZoneScope>().is_err());
    }

    #[test]
    fn new_zone_is_active() {
        let tenant = TenantId::new("acme").unwrap();
        let zone = Zone::new(tenant, "CBD", ZoneScope::Tenant, unit_square());
        assert!(zone.active);
        assert!(!zone.with_active(false).active);
    }

    #[test]
    fn zone_contains_delegates_to_geometry() {
        let tenant = TenantId::new("acme").unwrap();
        let zone = Zone::new(tenant, "square", ZoneScope::Tenant, unit_square());
        assert!(zone.contains(Coordinate::new(0.5, 0.5)));
        assert!(!zone.contains(Coordinate::new(1.5, 0.5)));
    }

    #[test]
    fn zone_deserializes_without_created_at() {
        let json = serde_json::json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "tenant_id": "acme",
            "name": "square",
            "scope": "platform",
            "active": false,
            "geometry": serde_json::to_value(unit_square()).unwrap()
        });
        let zone: Zone = serde_json::from_value(json).unwrap();
        assert_eq!(zone.scope, ZoneScope::Platform);
        assert!(zone.created_at.is_none());
    }
}
