//! Tilt animation: target channels set by input, current channels advanced
//! once per frame, formatted as a CSS transform.

use std::fmt;

use glam::Vec2;

use crate::config::TiltConfig;
use crate::math::{clamp, finite_or, lerp};
use crate::proximity::Rect;

/// Rotation in degrees and uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltTransform {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
}

impl TiltTransform {
    pub const REST: TiltTransform = TiltTransform {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    pub fn css(&self) -> String {
        self.to_string()
    }

    fn sanitized(self) -> Self {
        Self {
            rotate_x: finite_or(self.rotate_x, 0.0),
            rotate_y: finite_or(self.rotate_y, 0.0),
            scale: finite_or(self.scale, 1.0),
        }
    }
}

impl Default for TiltTransform {
    fn default() -> Self {
        Self::REST
    }
}

impl fmt::Display for TiltTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rotateX({:.3}deg) rotateY({:.3}deg) scale3d({s:.4}, {s:.4}, {s:.4})",
            self.rotate_x,
            self.rotate_y,
            s = self.scale
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutcome {
    pub transform: TiltTransform,
    /// Whether another frame should be scheduled.
    pub keep_running: bool,
}

/// Hover is tracked apart from the pointer stream so keyboard focus is not
/// cleared by unrelated pointer motion elsewhere on the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub hovered: bool,
    pub focused: bool,
}

#[derive(Clone, Debug)]
pub struct TiltAnimator {
    config: TiltConfig,
    current: TiltTransform,
    target: TiltTransform,
    running: bool,
    interaction: InteractionState,
}

impl TiltAnimator {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            current: TiltTransform::REST,
            target: TiltTransform::REST,
            running: false,
            interaction: InteractionState::default(),
        }
    }

    pub fn current(&self) -> TiltTransform {
        self.current
    }

    pub fn target(&self) -> TiltTransform {
        self.target
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// Target for a pointer at `point` against `rect`, scaled by `influence`.
    /// Returns `true` when the caller must schedule a frame.
    pub fn set_target_from_pointer(&mut self, point: Vec2, rect: Rect, influence: f32) -> bool {
        if !rect.has_area() {
            return self.reset_target();
        }
        let influence = clamp(finite_or(influence, 0.0), 0.0, 1.0);
        let center = rect.center();
        let nx = clamp(finite_or((point.x - center.x) / (rect.width() * 0.5), 0.0), -1.0, 1.0);
        let ny = clamp(finite_or((point.y - center.y) / (rect.height() * 0.5), 0.0), -1.0, 1.0);
        let max = self.config.max_tilt_deg;
        self.set_target(TiltTransform {
            rotate_x: -ny * max * influence,
            rotate_y: nx * max * influence,
            scale: 1.0 + self.config.hover_scale_gain * influence,
        })
    }

    pub fn reset_target(&mut self) -> bool {
        self.set_target(TiltTransform::REST)
    }

    /// Set an explicit target. Returns `true` when a stopped loop needs to
    /// be restarted.
    pub fn set_target(&mut self, target: TiltTransform) -> bool {
        self.target = target.sanitized();
        if self.running || self.at_rest() {
            return false;
        }
        self.running = true;
        true
    }

    /// Jump straight to `target` without animating.
    pub fn snap_to(&mut self, target: TiltTransform) -> TiltTransform {
        self.target = target.sanitized();
        self.current = self.target;
        self.running = false;
        self.current
    }

    fn at_rest(&self) -> bool {
        let c = &self.current;
        let t = &self.target;
        (t.rotate_x - c.rotate_x).abs() <= self.config.rotation_epsilon
            && (t.rotate_y - c.rotate_y).abs() <= self.config.rotation_epsilon
            && (t.scale - c.scale).abs() <= self.config.scale_epsilon
    }

    /// Advance one frame. All channels update before the snapshot is taken.
    pub fn tick(&mut self) -> FrameOutcome {
        let f = self.config.smoothing;
        self.current = TiltTransform {
            rotate_x: lerp(self.current.rotate_x, self.target.rotate_x, f),
            rotate_y: lerp(self.current.rotate_y, self.target.rotate_y, f),
            scale: lerp(self.current.scale, self.target.scale, f),
        }
        .sanitized();
        if self.at_rest() {
            self.current = self.target;
            self.running = false;
        } else {
            self.running = true;
        }
        FrameOutcome {
            transform: self.current,
            keep_running: self.running,
        }
    }

    /// Pointer moved somewhere; `directly_over` comes from proximity.
    pub fn update_hover(&mut self, directly_over: bool) {
        if directly_over {
            self.interaction.hovered = true;
        } else if !self.interaction.focused {
            self.interaction.hovered = false;
        }
    }

    /// Keyboard focus entered; tilt toward the focused child at full influence.
    pub fn focus_in(&mut self, focus_center: Vec2, rect: Rect) -> bool {
        self.interaction.focused = true;
        self.interaction.hovered = true;
        self.set_target_from_pointer(focus_center, rect, 1.0)
    }

    /// Keyboard focus moved. Only leaving the element resets the tilt.
    pub fn focus_out(&mut self, to_inside: bool) -> bool {
        if to_inside {
            return false;
        }
        self.interaction.focused = false;
        self.interaction.hovered = false;
        self.reset_target()
    }
}
