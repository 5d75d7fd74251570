// Host-side tests for the tilt animator.

mod common;

use common::approx;
use folio_core::{Rect, TiltAnimator, TiltConfig, TiltTransform};
use glam::Vec2;

fn card() -> Rect {
    Rect::new(0.0, 0.0, 200.0, 100.0)
}

fn run_until_rest(anim: &mut TiltAnimator) -> usize {
    let mut ticks = 0;
    loop {
        ticks += 1;
        assert!(ticks < 5_000, "animation never settled");
        if !anim.tick().keep_running {
            return ticks;
        }
    }
}

#[test]
fn converges_exactly_and_stops() {
    let mut anim = TiltAnimator::new(TiltConfig::default());
    let target = TiltTransform {
        rotate_x: 8.0,
        rotate_y: -8.0,
        scale: 1.02,
    };
    assert!(anim.set_target(target), "first target change starts the loop");
    assert!(!anim.set_target(target), "already running");

    let ticks = run_until_rest(&mut anim);
    assert!(ticks > 10);
    assert_eq!(anim.current(), target);
    assert!(!anim.is_running());

    // at rest the same target does not restart the loop
    assert!(!anim.set_target(target));
}

#[test]
fn first_tick_moves_by_smoothing_factor() {
    let mut anim = TiltAnimator::new(TiltConfig::default());
    anim.set_target(TiltTransform {
        rotate_x: 0.0,
        rotate_y: 8.0,
        scale: 1.0,
    });
    let frame = anim.tick();
    assert!(frame.keep_running);
    assert!(approx(frame.transform.rotate_y, 0.64, 1e-6));
}

#[test]
fn pointer_at_right_edge_tilts_fully_about_y() {
    let mut anim = TiltAnimator::new(TiltConfig::default());
    anim.set_target_from_pointer(Vec2::new(200.0, 50.0), card(), 1.0);
    let t = anim.target();
    assert_eq!(t.rotate_y, 8.0);
    assert_eq!(t.rotate_x, 0.0);
    assert!(approx(t.scale, 1.02, 1e-6));
}

#[test]
fn pointer_above_center_tilts_positive_x() {
    let mut anim = TiltAnimator::new(TiltConfig::default());
    anim.set_target_from_pointer(Vec2::new(100.0, 0.0), card(), 1.0);
    assert_eq!(anim.target().rotate_x, 8.0);
    assert_eq!(anim.target().rotate_y, 0.0);
}

#[test]
fn partial_influence_scales_target() {
    let mut anim = TiltAnimator::new(TiltConfig::default());
    anim.set_target_from_pointer(Vec2::new(350.0, 50.0), card(), 0.25);
    let t = anim.target();
    // offset beyond the edge is clamped before scaling
    assert_eq!(t.rotate_y, 2.0);
    assert!(approx(t.scale, 1.005, 1e-6));
}

#[test]
fn empty_rect_resets_target() {
    let mut anim = TiltAnimator::new(TiltConfig::default());
    anim.set_target_from_pointer(Vec2::new(200.0, 50.0), card(), 1.0);
    anim.set_target_from_pointer(Vec2::new(5.0, 5.0), Rect::new(0.0, 0.0, 0.0, 0.0), 1.0);
    assert_eq!(anim.target(), TiltTransform::REST);
}

#[test]
fn non_finite_input_never_reaches_output() {
    let mut anim = TiltAnimator::new(TiltConfig::default());
    anim.set_target_from_pointer(Vec2::new(f32::NAN, 50.0), card(), f32::INFINITY);
    let frame = anim.tick();
    assert!(frame.transform.rotate_x.is_finite());
    assert!(frame.transform.rotate_y.is_finite());
    assert!(frame.transform.scale.is_finite());
}

#[test]
fn focus_survives_unrelated_pointer_moves() {
    let mut anim = TiltAnimator::new(TiltConfig::default());
    anim.focus_in(Vec2::new(150.0, 50.0), card());
    assert!(anim.interaction().hovered);
    assert!(anim.interaction().focused);

    anim.update_hover(false);
    assert!(anim.interaction().hovered);

    // moving focus between children keeps the tilt
    assert!(!anim.focus_out(true));
    assert!(anim.interaction().focused);

    anim.focus_out(false);
    assert!(!anim.interaction().hovered);
    assert_eq!(anim.target(), TiltTransform::REST);
}

#[test]
fn hover_follows_pointer_without_focus() {
    let mut anim = TiltAnimator::new(TiltConfig::default());
    anim.update_hover(true);
    assert!(anim.interaction().hovered);
    anim.update_hover(false);
    assert!(!anim.interaction().hovered);
}

#[test]
fn css_formatting() {
    let t = TiltTransform {
        rotate_x: 1.5,
        rotate_y: -2.0,
        scale: 1.02,
    };
    assert_eq!(
        t.css(),
        "rotateX(1.500deg) rotateY(-2.000deg) scale3d(1.0200, 1.0200, 1.0200)"
    );
}
