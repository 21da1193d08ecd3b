//! # Zone Nesting
//!
//! Checks a proposed tenant zone against the platform boundaries authorized
//! for that tenant. Fail-open: with no active platform boundary every
//! proposal is accepted.
//!
//! The test is vertex-only. Each outer-ring vertex of the proposal must lie
//! inside the union of the boundaries; edges are not tested. A proposal
//! whose vertices are all covered can still have an edge that crosses
//! outside a non-convex boundary, and it is accepted.
//!
//! Holes in the proposal are ignored, matching the containment engine.

use geofence_core::{point_in_any, Coordinate, Geometry, TenantId, ZoneScope};

use crate::decision::{NestingApproval, NestingDecision, NestingRejection};
use crate::engine::GeofenceEngine;
use crate::error::RepositoryError;
use crate::repository::ZoneRepository;

/// Evaluate `proposed` against an already-fetched set of boundaries.
///
/// Order:
///
/// 1. no boundaries → [`NestingApproval::Unconstrained`]
/// 2. no outer-ring vertices → [`NestingRejection::NoVertices`]
/// 3. any vertex outside every boundary → [`NestingRejection::OutsideBoundaries`]
pub fn check_nesting<'a, I>(proposed: &Geometry, boundaries: I) -> NestingDecision
where
    I: IntoIterator<Item = &'a Geometry>,
    I::IntoIter: Clone,
{
    let boundaries = boundaries.into_iter();
    if boundaries.clone().next().is_none() {
        return NestingDecision::Valid(NestingApproval::Unconstrained);
    }

    let vertices = proposed.outer_vertices();
    if vertices.is_empty() {
        return NestingDecision::Invalid(NestingRejection::NoVertices);
    }

    let mut outside: Vec<Coordinate> = Vec::new();
    for vertex in vertices {
        if !point_in_any(vertex, boundaries.clone()) && !outside.contains(&vertex) {
            outside.push(vertex);
        }
    }

    if outside.is_empty() {
        NestingDecision::Valid(NestingApproval::WithinBoundaries)
    } else {
        NestingDecision::Invalid(NestingRejection::OutsideBoundaries { outside })
    }
}

impl<R: ZoneRepository> GeofenceEngine<R> {
    /// Decide whether `proposed` may be stored as a tenant zone for
    /// `tenant_id`, given that tenant's active platform boundaries.
    ///
    /// The proposal is assumed to have passed structural validation.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the boundaries cannot be read.
    pub fn validate_tenant_zone(
        &self,
        tenant_id: &TenantId,
        proposed: &Geometry,
    ) -> Result<NestingDecision, RepositoryError> {
        let boundaries = self
            .repository()
            .active_zones(tenant_id, ZoneScope::Platform)?;
        let decision = check_nesting(proposed, boundaries.iter().map(|zone| &zone.geometry));
        match &decision {
            NestingDecision::Valid(NestingApproval::Unconstrained) => tracing::debug!(
                tenant = %tenant_id,
                "no platform boundaries, tenant zone accepted"
            ),
            NestingDecision::Valid(NestingApproval::WithinBoundaries) => tracing::debug!(
                tenant = %tenant_id,
                boundaries = boundaries.len(),
                "tenant zone within platform boundaries"
            ),
            NestingDecision::Invalid(reason) => tracing::info!(
                tenant = %tenant_id,
                reason = reason.label(),
                "tenant zone rejected"
            ),
        }
        Ok(decision)
    }
}
