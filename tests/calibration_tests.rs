// Host-side tests for angle normalization.

use folio_core::{calibrate, raw_tilt, NormalizedTilt, OrientationSample};

#[test]
fn neutral_without_origin() {
    let s = OrientationSample::new(30.0, -20.0);
    assert_eq!(calibrate(s, None), NormalizedTilt::NEUTRAL);
}

#[test]
fn neutral_at_calibration_point() {
    let origin = OrientationSample::new(10.0, 5.0);
    let sample = OrientationSample::new(10.0, 5.0);
    let t = calibrate(sample, Some(origin));
    assert_eq!(t.tilt_x, 0.5);
    assert_eq!(t.tilt_y, 0.5);
}

#[test]
fn offsets_scale_to_axis_ranges() {
    let origin = OrientationSample::new(0.0, 0.0);
    // full gamma range to the right, half beta range forward
    let t = calibrate(OrientationSample::new(45.0, 45.0), Some(origin));
    assert_eq!(t.tilt_x, 1.0);
    assert_eq!(t.tilt_y, 0.75);

    let t = calibrate(OrientationSample::new(-90.0, -45.0), Some(origin));
    assert_eq!(t.tilt_x, 0.0);
    assert_eq!(t.tilt_y, 0.0);
}

#[test]
fn offsets_beyond_range_are_clamped() {
    let origin = OrientationSample::new(-60.0, -40.0);
    let t = calibrate(OrientationSample::new(80.0, 40.0), Some(origin));
    assert_eq!(t.tilt_x, 1.0);
    assert_eq!(t.tilt_y, 1.0);
}

#[test]
fn samples_are_clamped_on_construction() {
    let s = OrientationSample::new(170.0, -80.0);
    assert_eq!(s.beta, 90.0);
    assert_eq!(s.gamma, -45.0);
}

#[test]
fn raw_tilt_ignores_origin() {
    let t = raw_tilt(OrientationSample::new(0.0, 22.5));
    assert_eq!(t.tilt_x, 0.75);
    assert_eq!(t.tilt_y, 0.5);
}

#[test]
fn event_payload_validation() {
    assert!(OrientationSample::from_event(None, Some(1.0)).is_none());
    assert!(OrientationSample::from_event(Some(1.0), None).is_none());
    assert!(OrientationSample::from_event(Some(f64::NAN), Some(1.0)).is_none());
    let s = OrientationSample::from_event(Some(12.0), Some(-3.0)).unwrap();
    assert_eq!(s, OrientationSample::new(12.0, -3.0));
}
