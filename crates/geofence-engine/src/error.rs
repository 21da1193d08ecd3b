//! # Engine Error Types
//!
//! - [`RepositoryError`]: the zone repository could not answer. Never a
//!   policy outcome.
//! - [`SnapshotError`]: a zone snapshot could not be read or contained a
//!   record that violates the data model.

use std::path::PathBuf;

use geofence_core::{InvalidGeometry, TenantId};
use thiserror::Error;

/// Failure of the zone/tenant lookup collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be read.
    #[error("zone repository unavailable: {0}")]
    Unavailable(String),
}

/// Failure while loading zones into the in-memory repository.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("failed to read zone snapshot {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot document could not be parsed.
    #[error("failed to parse zone snapshot {path}: {reason}")]
    Parse {
        /// File that was being parsed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The same tenant identifier appears twice.
    #[error("duplicate tenant {0} in zone snapshot")]
    DuplicateTenant(TenantId),

    /// A zone references a tenant that is not registered.
    #[error("zone {zone:?} references unknown tenant {tenant}")]
    UnknownTenant {
        /// Zone name.
        zone: String,
        /// Referenced tenant.
        tenant: TenantId,
    },

    /// A zone geometry failed structural validation.
    #[error("zone {zone:?} of tenant {tenant} has invalid geometry: {source}")]
    InvalidZone {
        /// Zone name.
        zone: String,
        /// Owning tenant.
        tenant: TenantId,
        /// Validation failure.
        source: InvalidGeometry,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_zone_message_names_zone_and_reason() {
        let err = SnapshotError::InvalidZone {
            zone: "CBD".into(),
            tenant: TenantId::new("acme").unwrap(),
            source: InvalidGeometry::RingNotClosed,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"CBD\""));
        assert!(msg.contains("acme"));
        assert!(msg.contains("ring must be closed"));
    }

    #[test]
    fn repository_error_display() {
        let err = RepositoryError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "zone repository unavailable: connection refused");
    }
}
