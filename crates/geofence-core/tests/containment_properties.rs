//! # Geometry Property Tests
//!
//! Property-based checks over generated rectangles and rings: containment of
//! strictly interior points, exclusion of exterior points, validator
//! invariants (closure, bounds) and purity of both entry points.

use geofence_core::{
    parse_geometry, point_in_geometry, point_in_ring, validate_geometry, Coordinate, Geometry,
    InvalidGeometry,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn rectangle(x0: f64, y0: f64, w: f64, h: f64) -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[
            [x0, y0], [x0 + w, y0], [x0 + w, y0 + h], [x0, y0 + h], [x0, y0]
        ]]
    })
}

fn rectangle_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (-170.0..160.0f64, -80.0..70.0f64, 0.01..9.0f64, 0.01..9.0f64)
}

proptest! {
    #[test]
    fn interior_points_are_inside(
        (x0, y0, w, h) in rectangle_strategy(),
        fx in 0.05..0.95f64,
        fy in 0.05..0.95f64,
    ) {
        let geometry = parse_geometry(&rectangle(x0, y0, w, h)).unwrap();
        let point = Coordinate::new(x0 + fx * w, y0 + fy * h);
        prop_assert!(point_in_geometry(point, &geometry));
    }

    #[test]
    fn points_east_or_north_are_outside(
        (x0, y0, w, h) in rectangle_strategy(),
        dx in 0.001..5.0f64,
        fy in 0.05..0.95f64,
    ) {
        let geometry = parse_geometry(&rectangle(x0, y0, w, h)).unwrap();
        let east = Coordinate::new(x0 + w + dx, y0 + fy * h);
        let north = Coordinate::new(x0 + fy * w, y0 + h + dx);
        prop_assert!(!point_in_geometry(east, &geometry));
        prop_assert!(!point_in_geometry(north, &geometry));
    }

    #[test]
    fn open_rings_never_validate(
        (x0, y0, w, h) in rectangle_strategy(),
    ) {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[
                [x0, y0], [x0 + w, y0], [x0 + w, y0 + h], [x0, y0 + h]
            ]]
        });
        prop_assert_eq!(validate_geometry(&value), Err(InvalidGeometry::RingNotClosed));
    }

    #[test]
    fn out_of_range_longitude_never_validates(
        lon in prop_oneof![180.0001..1000.0f64, -1000.0..-180.0001f64],
        lat in -90.0..90.0f64,
    ) {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[
                [lon, lat], [0.0, 0.0], [1.0, 1.0], [lon, lat]
            ]]
        });
        prop_assert_eq!(
            validate_geometry(&value),
            Err(InvalidGeometry::CoordinateOutOfBounds)
        );
    }

    #[test]
    fn validation_and_containment_are_pure(
        (x0, y0, w, h) in rectangle_strategy(),
        lon in -180.0..180.0f64,
        lat in -90.0..90.0f64,
    ) {
        let value = rectangle(x0, y0, w, h);
        prop_assert_eq!(validate_geometry(&value), validate_geometry(&value));

        let geometry = parse_geometry(&value).unwrap();
        let point = Coordinate::new(lon, lat);
        prop_assert_eq!(
            point_in_geometry(point, &geometry),
            point_in_geometry(point, &geometry)
        );
    }

    #[test]
    fn arbitrary_rings_never_panic(
        positions in proptest::collection::vec((-200.0..200.0f64, -100.0..100.0f64), 0..12),
        lon in -200.0..200.0f64,
        lat in -100.0..100.0f64,
    ) {
        let ring: Vec<Coordinate> = positions.into_iter().map(Coordinate::from).collect();
        let _ = point_in_ring(Coordinate::new(lon, lat), &ring);
    }
}

#[test]
fn reference_rectangle() {
    let value = json!({
        "type": "Polygon",
        "coordinates": [[
            [36.80, -1.30], [36.82, -1.30], [36.82, -1.28], [36.80, -1.28], [36.80, -1.30]
        ]]
    });
    let geometry: Geometry = parse_geometry(&value).unwrap();
    assert!(point_in_geometry(Coordinate::new(36.81, -1.29), &geometry));
    assert!(!point_in_geometry(Coordinate::new(36.90, -1.29), &geometry));
}

#[test]
fn typed_round_trip_keeps_validity() {
    let value = rectangle(10.0, 10.0, 1.0, 1.0);
    let geometry = parse_geometry(&value).unwrap();
    let reencoded = serde_json::to_value(&geometry).unwrap();
    assert_eq!(validate_geometry(&reencoded), Ok(()));
    assert_eq!(geometry.validate(), Ok(()));
}
