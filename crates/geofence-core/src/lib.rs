//! # geofence-core: Foundational Types for the Geofence Stack
//!
//! This crate is the leaf of the workspace. It owns the geometry model and
//! the two pure algorithms every other crate builds on:
//!
//! - **Geometry Validator** ([`validate`]): structural checks on untyped
//!   GeoJSON payloads: type tag, ring arity, ring closure, coordinate bounds.
//! - **Point-Containment Engine** ([`containment`]): even-odd ray casting
//!   against a ring, a geometry, or a union of geometries.
//!
//! ## Key Design Principles
//!
//! 1. **Closed geometry enum.** [`Geometry`] is `Polygon | MultiPolygon` and
//!    nothing else. Untyped input is rejected at the boundary by
//!    [`validate_geometry`] / [`parse_geometry`].
//!
//! 2. **GeoJSON coordinate order.** [`Coordinate`] serializes as
//!    `[longitude, latitude]`. Swapping the order silently inverts every
//!    containment decision, so the pair is never exposed as a bare tuple.
//!
//! 3. **Newtype identifiers.** [`TenantId`] and [`ZoneId`] cannot be mixed up
//!    with each other or with free-form strings.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `geofence-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests. Containment over malformed
//!   geometry returns an unspecified boolean, it never panics.

pub mod containment;
pub mod error;
pub mod geometry;
pub mod identity;
pub mod validate;
pub mod zone;

// Re-export primary types for ergonomic imports.
pub use containment::{point_in_any, point_in_geometry, point_in_ring};
pub use error::{InvalidGeometry, ValidationError};
pub use geometry::{Coordinate, Geometry, Polygon, Ring};
pub use identity::{TenantId, ZoneId};
pub use validate::{parse_geometry, unwrap_feature, validate_geometry};
pub use zone::{Tenant, Zone, ZoneScope};
