//! # Geofence Engine
//!
//! Binds the pure checks in [`crate::enforcement`] and [`crate::nesting`] to
//! a [`ZoneRepository`]. The operations themselves live next to their pure
//! counterparts; this module only owns the handle.

use crate::repository::ZoneRepository;

/// Stateless orchestrator over a zone repository.
///
/// Cheap to clone when `R` is (e.g. `Arc<InMemoryZoneRepository>`).
#[derive(Debug, Clone)]
pub struct GeofenceEngine<R> {
    repository: R,
}

impl<R: ZoneRepository> GeofenceEngine<R> {
    /// Create an engine reading zones from `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The backing repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }
}
