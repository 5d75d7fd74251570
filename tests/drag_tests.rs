// Host-side tests for track positioning and release velocity.

mod common;

use std::time::Duration;

use common::approx;
use folio_core::{DragConfig, DragTracker, TrackGeometry};
use instant::Instant;

const LEFT: f32 = 40.0;

fn track() -> TrackGeometry {
    TrackGeometry {
        left: LEFT,
        width: 200.0,
        handle_width: 64.0,
        padding: 6.0,
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn position_spans_usable_width() {
    let g = track();
    assert_eq!(g.usable_width(), 124.0);
    assert_eq!(g.position(LEFT + 6.0 + 32.0), 0.0);
    assert_eq!(g.position(LEFT + 6.0 + 32.0 + 124.0), 1.0);
    assert_eq!(g.position(LEFT + 6.0 + 32.0 + 62.0), 0.5);
}

#[test]
fn position_clamps_outside_track() {
    let g = track();
    assert_eq!(g.position(LEFT - 500.0), 0.0);
    assert_eq!(g.position(LEFT + 900.0), 1.0);
}

#[test]
fn zero_usable_width_reads_zero() {
    let g = TrackGeometry {
        left: 0.0,
        width: 60.0,
        handle_width: 64.0,
        padding: 6.0,
    };
    assert_eq!(g.position(30.0), 0.0);
    assert_eq!(g.position(f32::NAN), 0.0);
}

#[test]
fn move_without_start_is_ignored() {
    let mut d = DragTracker::new(track(), DragConfig::default());
    assert!(d.drag_move(100.0, Instant::now()).is_none());
    assert!(d.end(Instant::now()).is_none());
}

#[test]
fn velocity_is_smoothed_across_samples() {
    let mut d = DragTracker::new(track(), DragConfig::default());
    let t0 = Instant::now();
    let start = LEFT + 38.0;
    d.start(start, t0);
    // 12.4 px per 16 ms = 0.1 units per 16 ms = 6.25 units/s
    d.drag_move(start + 12.4, t0 + ms(16));
    let v1 = d.state().velocity;
    assert!(approx(v1, 0.3 * 6.25, 1e-3), "v1 = {}", v1);

    d.drag_move(start + 24.8, t0 + ms(32));
    let v2 = d.state().velocity;
    assert!(approx(v2, 0.7 * v1 + 0.3 * 6.25, 1e-3), "v2 = {}", v2);
}

#[test]
fn stale_and_out_of_order_samples_do_not_feed_velocity() {
    let mut d = DragTracker::new(track(), DragConfig::default());
    let t0 = Instant::now();
    d.start(LEFT + 38.0, t0);

    // 150 ms gap: position updates, velocity does not
    let pos = d.drag_move(LEFT + 100.0, t0 + ms(150)).unwrap();
    assert!(pos > 0.0);
    assert_eq!(d.state().velocity, 0.0);

    // same timestamp again
    d.drag_move(LEFT + 120.0, t0 + ms(150));
    assert_eq!(d.state().velocity, 0.0);
    assert_eq!(d.state().last_timestamp, Some(t0 + ms(150)));
}

#[test]
fn release_velocity_is_clamped_and_state_reset() {
    let mut d = DragTracker::new(track(), DragConfig::default());
    let t0 = Instant::now();
    d.start(LEFT + 38.0, t0);
    for i in 1..=10u64 {
        // full track in 1 ms steps: far beyond the release limit
        let x = if i % 2 == 1 { LEFT + 162.0 } else { LEFT + 38.0 };
        d.drag_move(x, t0 + ms(i));
    }
    d.drag_move(LEFT + 162.0, t0 + ms(11));
    let release = d.end(t0 + ms(12)).unwrap();
    assert_eq!(release.position, 1.0);
    assert!(release.velocity.abs() <= 5.0);
    assert!(!d.is_dragging());
    assert_eq!(d.state().velocity, 0.0);
    assert!(d.state().last_timestamp.is_none());
}

#[test]
fn fast_flick_releases_at_limit() {
    let mut d = DragTracker::new(track(), DragConfig::default());
    let t0 = Instant::now();
    d.start(LEFT + 38.0, t0);
    for i in 1..=5u64 {
        d.drag_move(LEFT + 38.0 + 24.8 * i as f32, t0 + ms(10 * i));
    }
    let release = d.end(t0 + ms(60)).unwrap();
    assert_eq!(release.velocity, 5.0);
}

#[test]
fn flick_held_still_before_release_has_no_momentum() {
    let mut d = DragTracker::new(track(), DragConfig::default());
    let t0 = Instant::now();
    d.start(LEFT + 38.0, t0);
    for i in 1..=5u64 {
        d.drag_move(LEFT + 38.0 + 24.8 * i as f32, t0 + ms(10 * i));
    }
    assert!(d.state().velocity > 0.0);

    let release = d.end(t0 + ms(50 + 150)).unwrap();
    assert_eq!(release.position, 1.0);
    assert_eq!(release.velocity, 0.0);
    assert!(!d.is_dragging());
}

#[test]
fn cancel_drops_the_drag() {
    let mut d = DragTracker::new(track(), DragConfig::default());
    d.start(LEFT + 60.0, Instant::now());
    d.cancel();
    assert!(!d.is_dragging());
    // later hover moves no longer move the handle
    assert!(d.drag_move(LEFT + 120.0, Instant::now()).is_none());
    assert!(d.end(Instant::now()).is_none());
}
