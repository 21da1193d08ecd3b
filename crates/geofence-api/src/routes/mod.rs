//! # API Route Modules
//!
//! - `geometry`: stateless geometry validation and point containment.
//! - `tenants`: per-tenant zone listing, delivery enforcement and zone
//!   nesting checks against the loaded zone repository.

pub mod geometry;
pub mod tenants;
