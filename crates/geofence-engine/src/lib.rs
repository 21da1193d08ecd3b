//! # geofence-engine: Zone Enforcement & Nesting
//!
//! Orchestrates the point-containment engine from `geofence-core` against
//! zone sets read from a [`ZoneRepository`].
//!
//! ## Operations
//!
//! | Operation                                    | Zones consulted            | Empty zone set |
//! |----------------------------------------------|----------------------------|----------------|
//! | [`GeofenceEngine::enforce_delivery`]         | active `tenant` zones      | reject         |
//! | [`GeofenceEngine::check_delivery_location`]  | active `tenant` zones      | reject         |
//! | [`GeofenceEngine::validate_tenant_zone`]     | active `platform` zones    | accept         |
//!
//! A tenant without coverage never receives orders. Platform zones
//! constrain nothing until an operator defines one.
//!
//! ## Decisions vs Errors
//!
//! Policy outcomes are values ([`DeliveryDecision`], [`NestingDecision`]).
//! Only repository failures are errors ([`RepositoryError`]), and callers
//! must treat them as "no decision", never as "allowed".
//!
//! ## Concurrency
//!
//! Every check reads its zone set once and then runs as a pure function. The
//! engine holds no mutable state; [`InMemoryZoneRepository`] guards its maps
//! with a `parking_lot::RwLock`, so concurrent checks never contend.

pub mod decision;
pub mod engine;
pub mod enforcement;
pub mod error;
pub mod nesting;
pub mod repository;
pub mod snapshot;

pub use decision::{
    DeliveryDecision, DeliveryOutcome, DeliveryRejection, NestingApproval, NestingDecision,
    NestingOutcome, NestingRejection,
};
pub use engine::GeofenceEngine;
pub use enforcement::{check_delivery, check_location};
pub use error::{RepositoryError, SnapshotError};
pub use nesting::check_nesting;
pub use repository::{InMemoryZoneRepository, ZoneRepository};
pub use snapshot::{load_snapshot, TenantRecord, ZoneRecord, ZoneSnapshot};
