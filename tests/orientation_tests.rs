// Host-side tests for the orientation permission state machine and smoothing.

mod common;

use common::approx;
use folio_core::constants::{AUTO_CENTER_RATE, ORIENTATION_SMOOTHING};
use folio_core::{
    NormalizedTilt, OrientationConfig, OrientationHub, OrientationTracker, TrackerPhase,
};

fn listening() -> OrientationTracker {
    let mut t = OrientationTracker::new(OrientationConfig::default());
    assert_eq!(t.start(false), TrackerPhase::Listening);
    t
}

#[test]
fn listens_immediately_without_permission_api() {
    let t = listening();
    assert!(t.permission_granted());
}

#[test]
fn waits_for_gesture_when_permission_required() {
    let mut t = OrientationTracker::new(OrientationConfig::default());
    assert_eq!(t.start(true), TrackerPhase::AwaitingPermission);
    assert!(!t.permission_granted());

    // samples before permission are ignored
    t.on_sample(Some(20.0), Some(10.0));
    assert!(t.smoothed().is_none());

    assert!(t.on_gesture());
    assert_eq!(t.phase(), TrackerPhase::PermissionPending);
    // a second gesture while the prompt is open does not issue another request
    assert!(!t.on_gesture());

    t.on_permission_result(true);
    assert_eq!(t.phase(), TrackerPhase::Listening);
    assert!(t.permission_granted());
}

#[test]
fn denial_allows_retry_on_next_gesture() {
    let mut t = OrientationTracker::new(OrientationConfig::default());
    t.start(true);
    assert!(t.on_gesture());
    t.on_permission_result(false);
    assert_eq!(t.phase(), TrackerPhase::AwaitingPermission);

    assert!(t.request_permission());
    t.on_permission_result(true);
    assert!(t.permission_granted());
}

#[test]
fn stray_permission_result_is_ignored() {
    let mut t = OrientationTracker::new(OrientationConfig::default());
    t.start(true);
    t.on_permission_result(true);
    assert_eq!(t.phase(), TrackerPhase::AwaitingPermission);
}

#[test]
fn first_sample_seeds_origin_and_reads_neutral() {
    let mut t = listening();
    assert_eq!(t.calibrated_tilt(), NormalizedTilt::NEUTRAL);
    t.on_sample(Some(40.0), Some(10.0));
    t.tick();
    assert_eq!(t.origin().unwrap().beta, 40.0);
    assert_eq!(t.calibrated_tilt(), NormalizedTilt::NEUTRAL);
}

#[test]
fn invalid_samples_keep_previous_state() {
    let mut t = listening();
    t.on_sample(Some(10.0), Some(5.0));
    let before = t.smoothed();
    t.on_sample(None, Some(30.0));
    t.on_sample(Some(f64::NAN), Some(30.0));
    t.tick();
    assert_eq!(t.smoothed(), before);
}

#[test]
fn smoothing_moves_a_fixed_fraction_per_frame() {
    let mut t = listening();
    t.on_sample(Some(0.0), Some(0.0));
    t.on_sample(Some(0.0), Some(20.0));
    t.tick();
    let s = t.smoothed().unwrap();
    assert!(approx(s.gamma, 20.0 * ORIENTATION_SMOOTHING, 1e-5));
    let o = t.origin().unwrap();
    assert!(approx(o.gamma, 20.0 * AUTO_CENTER_RATE, 1e-6));
    assert!(t.calibrated_tilt().tilt_x > 0.5);
}

#[test]
fn held_attitude_drifts_back_to_neutral() {
    let mut t = listening();
    t.on_sample(Some(0.0), Some(0.0));
    t.on_sample(Some(0.0), Some(30.0));
    for _ in 0..60 {
        t.tick();
    }
    let early = t.calibrated_tilt().tilt_x;
    for _ in 0..3000 {
        t.tick();
    }
    let late = t.calibrated_tilt().tilt_x;
    assert!(early > 0.7);
    assert!(late < early);
    assert!(approx(late, 0.5, 0.01), "late tilt {}", late);
}

#[test]
fn stop_is_idempotent_and_clears_samples() {
    let mut t = listening();
    t.on_sample(Some(1.0), Some(2.0));
    t.stop();
    t.stop();
    assert_eq!(t.phase(), TrackerPhase::Unstarted);
    assert!(t.origin().is_none());
    assert_eq!(t.raw_tilt(), NormalizedTilt::NEUTRAL);
}

#[test]
fn hub_reports_first_and_last_subscriber() {
    let mut hub = OrientationHub::new(OrientationConfig::default());
    let (a, first_a) = hub.subscribe();
    let (b, first_b) = hub.subscribe();
    assert!(first_a);
    assert!(!first_b);
    hub.tracker_mut().start(false);

    assert!(!hub.unsubscribe(a));
    assert!(!hub.unsubscribe(a), "double unsubscribe is a no-op");
    assert_eq!(hub.subscriber_count(), 1);
    assert!(hub.unsubscribe(b));
    assert_eq!(hub.tracker().phase(), TrackerPhase::Unstarted);

    let (_, first_again) = hub.subscribe();
    assert!(first_again);
}
