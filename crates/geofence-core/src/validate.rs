//! # Geometry Validator
//!
//! Structural validation of untyped GeoJSON payloads before they are trusted
//! as a [`Geometry`].
//!
//! ## Rules
//!
//! | Check                 | `Polygon` | `MultiPolygon` member |
//! |-----------------------|-----------|-----------------------|
//! | non-empty ring list   | yes       | yes                   |
//! | ≥ 4 positions / ring  | yes       | yes                   |
//! | numeric positions     | yes       | yes                   |
//! | coordinate bounds     | yes       | yes                   |
//! | first == last         | yes       | **no**                |
//!
//! `MultiPolygon` members may carry open rings; containment closes rings
//! implicitly.
//!
//! The first failure wins. A `Polygon` ring is checked for arity, then
//! closure, then position by position (numeric, then bounds). A
//! `MultiPolygon` has the shape of every member checked before any position.
//!
//! The same table is applied to typed values by [`Geometry::validate`], so a
//! zone loaded from a snapshot file and a payload posted over HTTP are held
//! to identical rules.

use serde_json::Value;

use crate::error::InvalidGeometry;
use crate::geometry::{Coordinate, Geometry, Polygon, Ring, MIN_RING_POSITIONS};

/// Which geometry a ring belongs to. Selects the error wording and whether
/// closure is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RingContext {
    Polygon,
    MultiPolygonMember,
}

impl RingContext {
    fn too_short(self) -> InvalidGeometry {
        match self {
            Self::Polygon => InvalidGeometry::RingTooShort,
            Self::MultiPolygonMember => InvalidGeometry::MemberRingTooShort,
        }
    }

    fn requires_closure(self) -> bool {
        matches!(self, Self::Polygon)
    }
}

// ─── Untyped payloads ────────────────────────────────────────────────

/// Validate an untyped payload claiming to be a `Polygon` or `MultiPolygon`.
///
/// A `Feature` wrapper is rejected here as an unsupported type; use
/// [`parse_geometry`] to accept features.
///
/// # Errors
///
/// Returns the first [`InvalidGeometry`] encountered, in document order.
pub fn validate_geometry(value: &Value) -> Result<(), InvalidGeometry> {
    decode_geometry(value).map(|_| ())
}

/// Unwrap a GeoJSON `Feature` to its `geometry` member.
///
/// Any other value is returned unchanged, so bare geometries pass through.
///
/// # Errors
///
/// Returns [`InvalidGeometry::FeatureWithoutGeometry`] if the value is a
/// `Feature` whose `geometry` is absent or `null`.
pub fn unwrap_feature(value: &Value) -> Result<&Value, InvalidGeometry> {
    if value.get("type").and_then(Value::as_str) != Some("Feature") {
        return Ok(value);
    }
    match value.get("geometry") {
        Some(geometry) if !geometry.is_null() => Ok(geometry),
        _ => Err(InvalidGeometry::FeatureWithoutGeometry),
    }
}

/// Validate a payload (bare geometry or `Feature`) and return its typed form.
///
/// # Errors
///
/// Returns [`InvalidGeometry`] for any structural violation.
pub fn parse_geometry(value: &Value) -> Result<Geometry, InvalidGeometry> {
    decode_geometry(unwrap_feature(value)?)
}

fn decode_geometry(value: &Value) -> Result<Geometry, InvalidGeometry> {
    let kind = geometry_kind(value)?;

    if kind != "Polygon" && kind != "MultiPolygon" {
        return Err(InvalidGeometry::UnsupportedType(kind.to_string()));
    }

    let coordinates = value
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or(InvalidGeometry::MissingCoordinates)?;

    if kind == "Polygon" {
        if coordinates.is_empty() {
            return Err(InvalidGeometry::EmptyPolygon);
        }
        let polygon = decode_polygon(coordinates, RingContext::Polygon)?;
        Ok(Geometry::Polygon(polygon))
    } else {
        if coordinates.is_empty() {
            return Err(InvalidGeometry::EmptyMultiPolygon);
        }
        // Shape of every member first, then positions.
        let members = coordinates
            .iter()
            .map(|member| match member.as_array() {
                Some(rings) if rings.is_empty() => Err(InvalidGeometry::EmptyMemberPolygon),
                Some(rings) if rings.iter().all(has_ring_arity) => Ok(rings),
                Some(_) => Err(InvalidGeometry::MemberRingTooShort),
                None => Err(InvalidGeometry::EmptyMemberPolygon),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let polygons = members
            .into_iter()
            .map(|rings| decode_polygon(rings, RingContext::MultiPolygonMember))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Geometry::MultiPolygon(polygons))
    }
}

/// The `type` tag. Absent, `null`, `""`, `false` and `0` count as missing;
/// any other non-string tag is unsupported and reported by its JSON text.
fn geometry_kind(value: &Value) -> Result<&str, InvalidGeometry> {
    match value.get("type") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Err(InvalidGeometry::MissingType),
        Some(Value::String(kind)) if kind.is_empty() => Err(InvalidGeometry::MissingType),
        Some(Value::String(kind)) => Ok(kind.as_str()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(InvalidGeometry::MissingType),
        Some(other) => Err(InvalidGeometry::UnsupportedType(other.to_string())),
    }
}

fn has_ring_arity(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|positions| positions.len() >= MIN_RING_POSITIONS)
}

fn decode_polygon(rings: &[Value], ctx: RingContext) -> Result<Polygon, InvalidGeometry> {
    rings
        .iter()
        .map(|ring| decode_ring(ring, ctx))
        .collect::<Result<Vec<_>, _>>()
        .map(Polygon::new)
}

/// Arity, then closure on the raw positions, then each position in turn
/// (numeric, then bounds).
fn decode_ring(value: &Value, ctx: RingContext) -> Result<Ring, InvalidGeometry> {
    let positions = match value.as_array() {
        Some(positions) if positions.len() >= MIN_RING_POSITIONS => positions,
        _ => return Err(ctx.too_short()),
    };
    if ctx.requires_closure() && !raw_ring_is_closed(positions) {
        return Err(InvalidGeometry::RingNotClosed);
    }
    positions
        .iter()
        .map(|position| {
            let coordinate = decode_position(position)?;
            if !coordinate.is_within_bounds() {
                return Err(InvalidGeometry::CoordinateOutOfBounds);
            }
            Ok(coordinate)
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Ring::from)
}

/// Compares the first two components of the first and last positions.
/// Numbers compare numerically, anything else by JSON equality.
fn raw_ring_is_closed(positions: &[Value]) -> bool {
    let (Some(first), Some(last)) = (positions.first(), positions.last()) else {
        return false;
    };
    (0..2).all(|i| {
        let (a, b) = (first.get(i), last.get(i));
        match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        }
    })
}

fn decode_position(value: &Value) -> Result<Coordinate, InvalidGeometry> {
    match value.as_array().map(Vec::as_slice) {
        Some([lon, lat, ..]) => match (lon.as_f64(), lat.as_f64()) {
            (Some(lon), Some(lat)) => Ok(Coordinate::new(lon, lat)),
            _ => Err(InvalidGeometry::InvalidCoordinate),
        },
        _ => Err(InvalidGeometry::InvalidCoordinate),
    }
}

// ─── Shared ring rules ───────────────────────────────────────────────

fn check_ring(ring: &Ring, ctx: RingContext) -> Result<(), InvalidGeometry> {
    if ring.len() < MIN_RING_POSITIONS {
        return Err(ctx.too_short());
    }
    if ctx.requires_closure() && !ring.is_closed() {
        return Err(InvalidGeometry::RingNotClosed);
    }
    if !ring.positions().iter().all(Coordinate::is_within_bounds) {
        return Err(InvalidGeometry::CoordinateOutOfBounds);
    }
    Ok(())
}

// ─── Typed values ────────────────────────────────────────────────────

impl Geometry {
    /// Apply the structural rules to an already-typed geometry.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidGeometry`] encountered.
    pub fn validate(&self) -> Result<(), InvalidGeometry> {
        match self {
            Self::Polygon(polygon) => {
                if polygon.rings().is_empty() {
                    return Err(InvalidGeometry::EmptyPolygon);
                }
                polygon
                    .rings()
                    .iter()
                    .try_for_each(|ring| check_ring(ring, RingContext::Polygon))
            }
            Self::MultiPolygon(polygons) => {
                if polygons.is_empty() {
                    return Err(InvalidGeometry::EmptyMultiPolygon);
                }
                polygons.iter().try_for_each(|polygon| {
                    if polygon.rings().is_empty() {
                        return Err(InvalidGeometry::EmptyMemberPolygon);
                    }
                    polygon
                        .rings()
                        .iter()
                        .try_for_each(|ring| check_ring(ring, RingContext::MultiPolygonMember))
                })
            }
        }
    }
}
