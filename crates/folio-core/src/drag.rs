//! Drag tracking along a bounded horizontal track.

use std::time::Duration;

use instant::Instant;

use crate::config::DragConfig;
use crate::math::{clamp, finite_or, lerp};

/// Track and handle dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackGeometry {
    pub left: f32,
    pub width: f32,
    pub handle_width: f32,
    pub padding: f32,
}

impl TrackGeometry {
    pub fn usable_width(&self) -> f32 {
        self.width - self.handle_width - 2.0 * self.padding
    }

    /// Normalized handle position for a pointer at `client_x`.
    pub fn position(&self, client_x: f32) -> f32 {
        let usable = self.usable_width();
        if !(usable > 0.0) {
            return 0.0;
        }
        let offset = client_x - self.left - self.padding - self.handle_width * 0.5;
        clamp(finite_or(offset / usable, 0.0), 0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub is_dragging: bool,
    pub start_x: f32,
    pub last_position: f32,
    pub velocity: f32,
    pub last_timestamp: Option<Instant>,
}

/// Final position and momentum reported when a drag ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragRelease {
    pub position: f32,
    pub velocity: f32,
}

#[derive(Clone, Debug)]
pub struct DragTracker {
    geometry: TrackGeometry,
    config: DragConfig,
    state: DragState,
}

impl DragTracker {
    pub fn new(geometry: TrackGeometry, config: DragConfig) -> Self {
        Self {
            geometry,
            config,
            state: DragState::default(),
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    /// Layout may change between drags; the next start picks it up.
    pub fn set_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = geometry;
    }

    pub fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    pub fn start(&mut self, client_x: f32, at: Instant) -> f32 {
        let position = self.geometry.position(client_x);
        self.state = DragState {
            is_dragging: true,
            start_x: client_x,
            last_position: position,
            velocity: 0.0,
            last_timestamp: Some(at),
        };
        log::debug!("[drag] start at {:.3}", position);
        position
    }

    /// New normalized position, or `None` when no drag is active.
    pub fn drag_move(&mut self, client_x: f32, at: Instant) -> Option<f32> {
        if !self.state.is_dragging {
            return None;
        }
        let position = self.geometry.position(client_x);
        let max_gap = Duration::from_millis(self.config.max_sample_gap_ms);
        match self.state.last_timestamp {
            // out-of-order sample: report position, keep the clock
            Some(last) if at <= last => {}
            Some(last) => {
                let elapsed = at - last;
                if elapsed < max_gap {
                    let dt = elapsed.as_secs_f32();
                    let instantaneous = (position - self.state.last_position) / dt;
                    if instantaneous.is_finite() {
                        self.state.velocity = lerp(
                            self.state.velocity,
                            instantaneous,
                            self.config.velocity_smoothing,
                        );
                    }
                }
                self.state.last_timestamp = Some(at);
            }
            None => self.state.last_timestamp = Some(at),
        }
        self.state.last_position = position;
        Some(position)
    }

    /// Finish the drag at `at` and reset all accumulators.
    ///
    /// A handle held still for the sample gap or longer releases with no
    /// momentum.
    pub fn end(&mut self, at: Instant) -> Option<DragRelease> {
        if !self.state.is_dragging {
            return None;
        }
        let max_gap = Duration::from_millis(self.config.max_sample_gap_ms);
        let held = match self.state.last_timestamp {
            Some(last) => at > last && at - last >= max_gap,
            None => false,
        };
        let velocity = if held { 0.0 } else { self.state.velocity };
        let limit = self.config.max_release_velocity;
        let release = DragRelease {
            position: self.state.last_position,
            velocity: clamp(finite_or(velocity, 0.0), -limit, limit),
        };
        self.state = DragState::default();
        log::debug!(
            "[drag] release at {:.3} velocity {:.3}",
            release.position,
            release.velocity
        );
        Some(release)
    }

    /// Drop an active drag without reporting a release.
    pub fn cancel(&mut self) {
        self.state = DragState::default();
    }
}
