//! # Geometry Model
//!
//! Typed rendition of the GeoJSON subset the stack accepts:
//!
//! ```text
//! Geometry ──┬── Polygon(Polygon)            rings[0] = outer, rings[1..] = holes
//!            └── MultiPolygon(Vec<Polygon>)  union of polygons
//!
//! Polygon ──▶ Vec<Ring> ──▶ Vec<Coordinate> ──▶ [longitude, latitude]
//! ```
//!
//! The serde representation is wire-compatible with GeoJSON:
//! `{"type": "Polygon", "coordinates": [[[lon, lat], ...]]}`.
//!
//! Types in this module do not enforce ring arity, closure or bounds on
//! construction. Those rules are checked by [`Geometry::validate`] and by
//! the untyped validator in [`crate::validate`], so that containment can
//! still be asked about (and degrade gracefully on) malformed shapes.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidGeometry, ValidationError};

/// Inclusive longitude range.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Inclusive latitude range.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Minimum number of positions in a ring (three corners plus the closing
/// position).
pub const MIN_RING_POSITIONS: usize = 4;

// ─── Coordinate ──────────────────────────────────────────────────────

/// A `(longitude, latitude)` position in GeoJSON order.
///
/// Serializes as `[lon, lat]`. Deserialization accepts any numeric array of
/// length ≥ 2 (a trailing altitude is dropped).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Coordinate {
    /// Longitude (x).
    pub lon: f64,
    /// Latitude (y).
    pub lat: f64,
}

impl Coordinate {
    /// Create a position from longitude and latitude, in that order.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both components lie within the WGS84 bounds.
    ///
    /// NaN is never within bounds.
    pub fn is_within_bounds(&self) -> bool {
        LONGITUDE_RANGE.contains(&self.lon) && LATITUDE_RANGE.contains(&self.lat)
    }
}

impl TryFrom<Vec<f64>> for Coordinate {
    type Error = InvalidGeometry;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [lon, lat, ..] => Ok(Self::new(*lon, *lat)),
            _ => Err(InvalidGeometry::InvalidCoordinate),
        }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lon, c.lat]
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self::new(lon, lat)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lon, self.lat)
    }
}

/// Parses `"<lon>,<lat>"`, the form used on command lines.
impl std::str::FromStr for Coordinate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidCoordinate(s.to_string());
        let (lon, lat) = s.split_once(',').ok_or_else(invalid)?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(lon, lat))
    }
}

// ─── Ring ────────────────────────────────────────────────────────────

/// One boundary loop of a polygon.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<Coordinate>);

impl Ring {
    /// Wrap a sequence of positions.
    pub fn new(positions: Vec<Coordinate>) -> Self {
        Self(positions)
    }

    /// Positions in order, including the closing position.
    pub fn positions(&self) -> &[Coordinate] {
        &self.0
    }

    /// Number of positions, including the closing position.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the ring has no positions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the first and last positions are numerically equal.
    ///
    /// An empty ring is not closed.
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }
}

impl From<Vec<Coordinate>> for Ring {
    fn from(positions: Vec<Coordinate>) -> Self {
        Self(positions)
    }
}

impl FromIterator<Coordinate> for Ring {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ─── Polygon ─────────────────────────────────────────────────────────

/// A polygon as an ordered list of rings: outer boundary first, then holes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon(Vec<Ring>);

impl Polygon {
    /// Build a polygon from its rings (outer boundary first).
    pub fn new(rings: Vec<Ring>) -> Self {
        Self(rings)
    }

    /// Build a polygon without holes.
    pub fn from_outer(outer: impl Into<Ring>) -> Self {
        Self(vec![outer.into()])
    }

    /// All rings, outer boundary first.
    pub fn rings(&self) -> &[Ring] {
        &self.0
    }

    /// The outer boundary, if any ring is present.
    pub fn outer(&self) -> Option<&Ring> {
        self.0.first()
    }

    /// Interior rings. Accepted structurally, ignored by containment.
    pub fn holes(&self) -> &[Ring] {
        self.0.get(1..).unwrap_or(&[])
    }
}

// ─── Geometry ────────────────────────────────────────────────────────

/// The closed set of geometries a zone may carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// A single polygon.
    Polygon(Polygon),
    /// A union of polygons, e.g. a delivery area made of disjoint regions.
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// The GeoJSON type tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Polygon(_) => "Polygon",
            Self::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Member polygons: one for `Polygon`, all members for `MultiPolygon`.
    pub fn polygons(&self) -> &[Polygon] {
        match self {
            Self::Polygon(polygon) => std::slice::from_ref(polygon),
            Self::MultiPolygon(polygons) => polygons,
        }
    }

    /// Outer rings of every member polygon, skipping members without rings.
    pub fn outer_rings(&self) -> impl Iterator<Item = &Ring> {
        self.polygons().iter().filter_map(Polygon::outer)
    }

    /// Every position of every outer ring, in order. The closing position of
    /// each ring is included, as it is a real vertex of the ring.
    pub fn outer_vertices(&self) -> Vec<Coordinate> {
        self.outer_rings()
            .flat_map(|ring| ring.positions().iter().copied())
            .collect()
    }
}
