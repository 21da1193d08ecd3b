//! # Decision Types
//!
//! First-class results of the two orchestrating checks. A rejection is an
//! expected outcome, not an error, so it is carried in the `Ok` side of
//! every engine call.
//!
//! The `Display` text of each reason is forwarded verbatim by the ordering
//! and zone-management workflows, so the wording is part of the contract.
//! [`DeliveryOutcome`] and [`NestingOutcome`] are the wire forms:
//!
//! ```text
//! { "allowed": false, "message": "pickup location outside allowed delivery zones" }
//! { "valid": true,   "message": "no platform boundaries defined, tenant zone allowed" }
//! ```

use geofence_core::Coordinate;
use serde::{Deserialize, Serialize};

// ─── Delivery ────────────────────────────────────────────────────────

/// Why a delivery was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryRejection {
    /// The tenant is not registered.
    TenantNotFound,
    /// The tenant has no active tenant-scoped zone (fail-closed).
    NoActiveZones,
    /// The pickup point is outside every active zone.
    PickupOutside,
    /// The dropoff point is outside every active zone.
    DropoffOutside,
    /// The single delivery point is outside every active zone.
    LocationOutside,
}

impl DeliveryRejection {
    /// Stable snake_case label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TenantNotFound => "tenant_not_found",
            Self::NoActiveZones => "no_active_zones",
            Self::PickupOutside => "pickup_outside",
            Self::DropoffOutside => "dropoff_outside",
            Self::LocationOutside => "location_outside",
        }
    }
}

impl std::fmt::Display for DeliveryRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::TenantNotFound => "tenant not found",
            Self::NoActiveZones => "no active delivery zones defined",
            Self::PickupOutside => "pickup location outside allowed delivery zones",
            Self::DropoffOutside => "dropoff location outside allowed delivery zones",
            Self::LocationOutside => "delivery location outside allowed delivery zones",
        })
    }
}

/// Result of a delivery check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryDecision {
    /// Every checked point is covered.
    Allowed,
    /// The order must not be created.
    Rejected(DeliveryRejection),
}

impl DeliveryDecision {
    /// Message used when the delivery is allowed.
    pub const ALLOWED_MESSAGE: &'static str = "order within allowed delivery zones";

    /// Whether the order may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Metrics label: `allowed` or the rejection label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Rejected(reason) => reason.label(),
        }
    }

    /// Convert to the wire form.
    pub fn outcome(&self) -> DeliveryOutcome {
        DeliveryOutcome {
            allowed: self.is_allowed(),
            message: self.to_string(),
        }
    }
}

impl std::fmt::Display for DeliveryDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allowed => f.write_str(Self::ALLOWED_MESSAGE),
            Self::Rejected(reason) => std::fmt::Display::fmt(reason, f),
        }
    }
}

/// Wire form of a [`DeliveryDecision`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// Whether the order may proceed.
    pub allowed: bool,
    /// Human-readable reason.
    pub message: String,
}

// ─── Nesting ─────────────────────────────────────────────────────────

/// Why a proposed tenant zone was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestingApproval {
    /// No active platform boundary exists for the tenant (fail-open).
    Unconstrained,
    /// Every vertex lies inside at least one platform boundary.
    WithinBoundaries,
}

/// Why a proposed tenant zone was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum NestingRejection {
    /// The proposal has no outer-ring vertices.
    NoVertices,
    /// Some vertices fall outside every platform boundary.
    OutsideBoundaries {
        /// Offending vertices, deduplicated, in ring order.
        outside: Vec<Coordinate>,
    },
}

impl NestingRejection {
    /// Stable snake_case label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoVertices => "no_vertices",
            Self::OutsideBoundaries { .. } => "outside_boundaries",
        }
    }
}

impl std::fmt::Display for NestingRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NoVertices => "invalid geometry: no vertices found",
            Self::OutsideBoundaries { .. } => {
                "proposed zone is not entirely within authorized boundaries"
            }
        })
    }
}

/// Result of a nesting check.
#[derive(Debug, Clone, PartialEq)]
pub enum NestingDecision {
    /// The zone may be stored.
    Valid(NestingApproval),
    /// The zone must be refused.
    Invalid(NestingRejection),
}

impl NestingDecision {
    /// Whether the proposed zone may be stored.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Metrics label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid(NestingApproval::Unconstrained) => "unconstrained",
            Self::Valid(NestingApproval::WithinBoundaries) => "within_boundaries",
            Self::Invalid(reason) => reason.label(),
        }
    }

    /// Convert to the wire form.
    pub fn outcome(&self) -> NestingOutcome {
        let outside_vertices = match self {
            Self::Invalid(NestingRejection::OutsideBoundaries { outside }) => outside.clone(),
            _ => Vec::new(),
        };
        NestingOutcome {
            valid: self.is_valid(),
            message: self.to_string(),
            outside_vertices,
        }
    }
}

impl std::fmt::Display for NestingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid(NestingApproval::Unconstrained) => {
                f.write_str("no platform boundaries defined, tenant zone allowed")
            }
            Self::Valid(NestingApproval::WithinBoundaries) => {
                f.write_str("tenant zone validated against platform boundaries")
            }
            Self::Invalid(reason) => std::fmt::Display::fmt(reason, f),
        }
    }
}

/// Wire form of a [`NestingDecision`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestingOutcome {
    /// Whether the proposed zone may be stored.
    pub valid: bool,
    /// Human-readable reason.
    pub message: String,
    /// Vertices outside every platform boundary. Omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outside_vertices: Vec<Coordinate>,
}
