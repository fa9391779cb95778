use super::geo::{METERS_PER_DEG_LAT, meters_per_deg_lon};
use super::{GeoPoint, Vec2D};

const LAUNCH: GeoPoint = GeoPoint::new(12.2253, 79.0747);

#[test]
fn test_meters_per_degree() {
    assert!((meters_per_deg_lon(0.0) - METERS_PER_DEG_LAT).abs() < 1e-9);
    assert!((meters_per_deg_lon(60.0) - METERS_PER_DEG_LAT * 0.5).abs() < 1e-6);
    assert!(meters_per_deg_lon(LAUNCH.lat()) < METERS_PER_DEG_LAT);
}

#[test]
fn test_offset_round_trip() {
    let offset = Vec2D::new(250.0, -120.0);
    let moved = LAUNCH.offset_by_meters(offset);
    assert!(moved.lat() < LAUNCH.lat());
    assert!(moved.lon() > LAUNCH.lon());
    let back = LAUNCH.meters_to(&moved);
    assert!((back.x() - offset.x()).abs() < 1e-6);
    assert!((back.y() - offset.y()).abs() < 1e-6);
}

#[test]
fn test_bearing() {
    assert!((Vec2D::<f64>::new(0.0, 1.0).bearing_deg() - 0.0).abs() < 1e-9);
    assert!((Vec2D::<f64>::new(1.0, 0.0).bearing_deg() - 90.0).abs() < 1e-9);
    assert!((Vec2D::<f64>::new(0.0, -1.0).bearing_deg() - 180.0).abs() < 1e-9);
    assert!((Vec2D::<f64>::new(-1.0, 0.0).bearing_deg() - 270.0).abs() < 1e-9);
    assert!((Vec2D::<f64>::zero().bearing_deg()).abs() < 1e-9);
}

#[test]
fn test_vector_ops() {
    let mut v = Vec2D::new(3.0, -1.0);
    v += Vec2D::new(1.0, 4.0) * 0.5;
    assert_eq!(v, Vec2D::new(3.5, 1.0));
    assert!((Vec2D::<f64>::new(3.0, 4.0).abs() - 5.0).abs() < 1e-12);
    assert_eq!(Vec2D::<f64>::new(2.0, 2.0) - Vec2D::new(1.0, 3.0), Vec2D::new(1.0, -1.0));
}
