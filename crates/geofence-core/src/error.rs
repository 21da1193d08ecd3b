//! # Error Types: Structural Validation Failures
//!
//! Two families of errors live here, both derived with `thiserror`:
//!
//! - [`InvalidGeometry`]: a GeoJSON payload failed structural validation.
//!   The `Display` text of every variant is the reason string that calling
//!   workflows forward verbatim to partners and operators, so the wording is
//!   part of the public contract.
//! - [`ValidationError`]: a scalar input (identifier, coordinate literal)
//!   failed its constructor checks.
//!
//! Policy outcomes (point outside zone, tenant without zones) are not errors
//! and are modelled as decision values in `geofence-engine`.

use thiserror::Error;

/// Structural validation failure for a geometry payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidGeometry {
    /// The payload is not an object or has no `type` member.
    #[error("Invalid GeoJSON: missing type")]
    MissingType,

    /// The `type` tag is neither `Polygon` nor `MultiPolygon`.
    #[error("Invalid GeoJSON type: {0}. Only Polygon and MultiPolygon are supported.")]
    UnsupportedType(String),

    /// The `coordinates` member is absent or not a list.
    #[error("Invalid GeoJSON: missing or invalid coordinates")]
    MissingCoordinates,

    /// A `Feature` wrapper carried no `geometry` member.
    #[error("Invalid GeoJSON: Feature has no geometry")]
    FeatureWithoutGeometry,

    /// A `Polygon` with an empty ring list.
    #[error("Invalid Polygon: coordinates must be a non-empty array")]
    EmptyPolygon,

    /// A `Polygon` ring that is not a list or has fewer than four positions.
    #[error("Invalid Polygon: ring must have at least 4 points (closed polygon)")]
    RingTooShort,

    /// A `Polygon` ring whose first and last positions differ.
    #[error("Invalid Polygon: ring must be closed (first and last points must match)")]
    RingNotClosed,

    /// A position that is not at least two numeric values.
    #[error("Invalid coordinate: must be [longitude, latitude] with numeric values")]
    InvalidCoordinate,

    /// A position outside longitude [-180, 180] or latitude [-90, 90].
    #[error("Invalid coordinate: longitude must be -180 to 180, latitude must be -90 to 90")]
    CoordinateOutOfBounds,

    /// A `MultiPolygon` with an empty polygon list.
    #[error("Invalid MultiPolygon: coordinates must be a non-empty array")]
    EmptyMultiPolygon,

    /// A `MultiPolygon` member that is not a list or has no rings.
    #[error("Invalid MultiPolygon: polygon must be a non-empty array")]
    EmptyMemberPolygon,

    /// A `MultiPolygon` ring that is not a list or has fewer than four positions.
    #[error("Invalid MultiPolygon: ring must have at least 4 points")]
    MemberRingTooShort,
}

/// Constructor-level validation failure for scalar domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Tenant identifiers must be non-empty after trimming.
    #[error("tenant identifier must not be empty")]
    InvalidTenantId,

    /// A `lon,lat` literal could not be parsed.
    #[error("invalid coordinate {0:?}: expected \"<longitude>,<latitude>\"")]
    InvalidCoordinate(String),

    /// A zone scope literal other than `platform` or `tenant`.
    #[error("invalid zone scope {0:?}: expected \"platform\" or \"tenant\"")]
    InvalidZoneScope(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_type_names_the_tag() {
        let err = InvalidGeometry::UnsupportedType("Point".into());
        assert_eq!(
            err.to_string(),
            "Invalid GeoJSON type: Point. Only Polygon and MultiPolygon are supported."
        );
    }

    #[test]
    fn bounds_message_is_stable() {
        assert_eq!(
            InvalidGeometry::CoordinateOutOfBounds.to_string(),
            "Invalid coordinate: longitude must be -180 to 180, latitude must be -90 to 90"
        );
    }

    #[test]
    fn coordinate_literal_error_quotes_input() {
        let err = ValidationError::InvalidCoordinate("abc".into());
        assert!(err.to_string().contains("\"abc\""));
    }
}
