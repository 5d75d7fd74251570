//! Per-card tilt behavior combining proximity, animation and orientation.
//!
//! The card is driven entirely by [`CardEvent`]s so the same state machine
//! runs under the DOM binding and under host tests.

use glam::Vec2;

use crate::calibration::NormalizedTilt;
use crate::capability::DeviceClass;
use crate::config::TiltConfig;
use crate::constants::NEUTRAL_TILT;
use crate::proximity::{ElementProbe, HitTester, Proximity, ProximityDetector};
use crate::tilt::{TiltAnimator, TiltTransform};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CardEvent {
    /// Capability probe result, delivered once after mount.
    Classified(DeviceClass),
    PointerMoved(Vec2),
    /// Keyboard focus entered; center of the focused child.
    FocusIn(Vec2),
    FocusOut { to_inside: bool },
    Orientation(NormalizedTilt),
    /// Animation frame callback.
    Frame,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardOutput {
    /// Transform to publish this turn, if it changed.
    pub transform: Option<TiltTransform>,
    /// The caller must schedule an animation frame.
    pub wants_frame: bool,
    pub hovered: bool,
}

/// Rotation target for a calibrated device tilt.
///
/// Tilting the device right acts like a pointer right of center
/// (positive `rotate_y`); tilting its top away acts like a pointer above
/// center (positive `rotate_x`).
pub fn orientation_transform(tilt: NormalizedTilt, max_tilt_deg: f32) -> TiltTransform {
    TiltTransform {
        rotate_x: -(tilt.tilt_y - NEUTRAL_TILT) * 2.0 * max_tilt_deg,
        rotate_y: (tilt.tilt_x - NEUTRAL_TILT) * 2.0 * max_tilt_deg,
        scale: 1.0,
    }
}

#[derive(Clone, Debug)]
pub struct CardTilt {
    config: TiltConfig,
    class: Option<DeviceClass>,
    proximity: ProximityDetector,
    animator: TiltAnimator,
    last_proximity: Proximity,
}

impl CardTilt {
    pub fn new(instance_id: impl Into<String>, config: TiltConfig) -> Self {
        Self {
            proximity: ProximityDetector::new(instance_id, &config),
            animator: TiltAnimator::new(config),
            config,
            class: None,
            last_proximity: Proximity::NONE,
        }
    }

    pub fn instance_id(&self) -> &str {
        self.proximity.instance_id()
    }

    pub fn device_class(&self) -> Option<DeviceClass> {
        self.class
    }

    pub fn last_proximity(&self) -> Proximity {
        self.last_proximity
    }

    pub fn animator(&self) -> &TiltAnimator {
        &self.animator
    }

    pub fn handle<E>(&mut self, event: CardEvent, env: &E) -> CardOutput
    where
        E: ElementProbe + HitTester + ?Sized,
    {
        let mut out = CardOutput::default();
        match (event, self.class) {
            (CardEvent::Classified(class), _) => {
                self.class = Some(class);
                log::debug!("[tilt] card {} classified as {:?}", self.instance_id(), class);
            }
            (CardEvent::Frame, Some(_)) => {
                if self.animator.is_running() {
                    let frame = self.animator.tick();
                    out.transform = Some(frame.transform);
                    out.wants_frame = frame.keep_running;
                }
            }
            (CardEvent::PointerMoved(point), Some(DeviceClass::PointerPrimary)) => {
                let prox = self.proximity.influence(env, env, point);
                self.last_proximity = prox;
                self.animator.update_hover(prox.is_directly_over);
                // focus owns the target until it leaves the card
                if !self.animator.interaction().focused {
                    out.wants_frame = match env.bounding_rect() {
                        Some(rect) if prox.influence > 0.0 => {
                            self.animator.set_target_from_pointer(point, rect, prox.influence)
                        }
                        _ => self.animator.reset_target(),
                    };
                }
            }
            (CardEvent::FocusIn(center), Some(DeviceClass::PointerPrimary)) => {
                if let Some(rect) = env.bounding_rect() {
                    out.wants_frame = self.animator.focus_in(center, rect);
                }
            }
            (CardEvent::FocusOut { to_inside }, Some(DeviceClass::PointerPrimary)) => {
                out.wants_frame = self.animator.focus_out(to_inside);
            }
            (CardEvent::Orientation(tilt), Some(DeviceClass::TouchPrimary)) => {
                let target = orientation_transform(tilt, self.config.max_tilt_deg);
                if target != self.animator.current() {
                    out.transform = Some(self.animator.snap_to(target));
                }
            }
            // unclassified, or input owned by the other device class
            _ => {}
        }
        out.hovered = self.animator.interaction().hovered;
        out
    }
}
