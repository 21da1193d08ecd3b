//! # Point-Containment Engine
//!
//! Even-odd ray casting: a horizontal ray is cast from the point towards
//! +∞ longitude and every ring edge it crosses toggles the result.
//!
//! An edge `(i, j)` counts as a crossing when exactly one endpoint lies
//! strictly north of the point, and the edge's longitude at the point's
//! latitude is strictly east of the point. The straddle condition guarantees
//! `lat_i != lat_j`, so the interpolation never divides by zero.
//!
//! ## Semantics
//!
//! - `Polygon`: only the outer ring is consulted. A point inside a hole is
//!   reported inside.
//! - `MultiPolygon`: inside iff inside the outer ring of any member.
//! - Points exactly on an edge or vertex get whatever the crossing count
//!   yields. No answer is guaranteed for them.
//! - Degenerate input (empty ring, polygon without rings) is outside. No
//!   input panics, but answers for geometry that never passed
//!   [`crate::validate`] are unspecified.

use crate::geometry::{Coordinate, Geometry, Polygon};

/// Whether `point` lies inside the ring described by `ring`.
///
/// The ring is closed implicitly: the first edge runs from the last position
/// to the first, so an explicitly closed ring contributes one zero-length
/// edge that never counts.
pub fn point_in_ring(point: Coordinate, ring: &[Coordinate]) -> bool {
    let Some(last) = ring.last() else {
        return false;
    };

    let mut inside = false;
    let mut prev = last;
    for current in ring {
        let straddles = (current.lat > point.lat) != (prev.lat > point.lat);
        if straddles {
            let crossing_lon = (prev.lon - current.lon) * (point.lat - current.lat)
                / (prev.lat - current.lat)
                + current.lon;
            if point.lon < crossing_lon {
                inside = !inside;
            }
        }
        prev = current;
    }
    inside
}

/// Whether `point` lies inside the outer ring of `polygon`.
pub fn point_in_polygon(point: Coordinate, polygon: &Polygon) -> bool {
    polygon
        .outer()
        .is_some_and(|outer| point_in_ring(point, outer.positions()))
}

/// Whether `point` lies inside `geometry`.
pub fn point_in_geometry(point: Coordinate, geometry: &Geometry) -> bool {
    geometry
        .polygons()
        .iter()
        .any(|polygon| point_in_polygon(point, polygon))
}

/// Union containment: whether `point` lies inside any of `geometries`.
///
/// An empty set contains nothing.
pub fn point_in_any<'a, I>(point: Coordinate, geometries: I) -> bool
where
    I: IntoIterator<Item = &'a Geometry>,
{
    geometries
        .into_iter()
        .any(|geometry| point_in_geometry(point, geometry))
}
