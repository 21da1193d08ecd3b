//! # Tenant & Zone Identifiers
//!
//! Newtypes for the two addressing primitives of the stack: the tenant that
//! owns zones (the unit of isolation) and the zone itself.
//!
//! ## Validation
//!
//! [`TenantId`] is validated to be non-empty at construction time, including
//! when deserialized. [`ZoneId`] is UUID-based and always valid by
//! construction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

// -- Validating Deserialize for TenantId --------------------------------------

impl<'de> Deserialize<'de> for TenantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Identifier of a partner tenant.
///
/// Tenants are created by the platform operator outside this stack, so no
/// format is imposed beyond non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TenantId(String);

impl TenantId {
    /// Create a tenant identifier, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTenantId`] if the string is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidTenantId);
        }
        Ok(Self(trimmed))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TenantId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneId(Uuid);

impl ZoneId {
    /// Generate a new random zone identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ZoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_id_trims() {
        let id = TenantId::new("  acme-deliveries ").unwrap();
        assert_eq!(id.as_str(), "acme-deliveries");
    }

    #[test]
    fn tenant_id_rejects_blank() {
        assert_eq!(TenantId::new(""), Err(ValidationError::InvalidTenantId));
        assert_eq!(TenantId::new("   "), Err(ValidationError::InvalidTenantId));
    }

    #[test]
    fn tenant_id_deserialize_validates() {
        let ok: TenantId = serde_json::from_str("\"acme\"").unwrap();
        assert_eq!(ok.to_string(), "acme");
        assert!(serde_json::from_str::<TenantId>("\"  \"").is_err());
    }

    #[test]
    fn zone_ids_are_unique() {
        assert_ne!(ZoneId::new(), ZoneId::new());
    }

    #[test]
    fn zone_id_serde_is_plain_uuid() {
        let uuid = Uuid::nil();
        let id = ZoneId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
        let back: ZoneId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
