//! Device orientation tracking.
//!
//! The tracker owns the permission state machine and the smoothed estimate.
//! The web layer feeds it events and calls [`OrientationTracker::tick`] once
//! per animation frame, independent of how often the device reports.

use smallvec::SmallVec;

use crate::calibration::{calibrate, raw_tilt, NormalizedTilt, OrientationSample};
use crate::config::OrientationConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerPhase {
    Unstarted,
    /// Waiting for a user gesture before the platform prompt can be shown.
    AwaitingPermission,
    /// A request was issued from a gesture and has not resolved yet.
    PermissionPending,
    Listening,
}

#[derive(Clone, Debug)]
pub struct OrientationTracker {
    config: OrientationConfig,
    phase: TrackerPhase,
    target: Option<OrientationSample>,
    smoothed: Option<OrientationSample>,
    origin: Option<OrientationSample>,
}

impl OrientationTracker {
    pub fn new(config: OrientationConfig) -> Self {
        Self {
            config,
            phase: TrackerPhase::Unstarted,
            target: None,
            smoothed: None,
            origin: None,
        }
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn permission_granted(&self) -> bool {
        self.phase == TrackerPhase::Listening
    }

    /// Leave `Unstarted`. Platforms without a permission API listen at once.
    pub fn start(&mut self, requires_permission: bool) -> TrackerPhase {
        if self.phase == TrackerPhase::Unstarted {
            self.phase = if requires_permission {
                TrackerPhase::AwaitingPermission
            } else {
                TrackerPhase::Listening
            };
            log::info!("[orientation] started, phase={:?}", self.phase);
        }
        self.phase
    }

    /// A touch or click happened. Returns `true` when the caller must issue
    /// the platform permission request synchronously in that handler.
    pub fn on_gesture(&mut self) -> bool {
        self.request_permission()
    }

    /// Explicit retry from UI; same contract as [`Self::on_gesture`].
    pub fn request_permission(&mut self) -> bool {
        if self.phase == TrackerPhase::AwaitingPermission {
            self.phase = TrackerPhase::PermissionPending;
            true
        } else {
            false
        }
    }

    pub fn on_permission_result(&mut self, granted: bool) {
        if self.phase != TrackerPhase::PermissionPending {
            return;
        }
        if granted {
            self.phase = TrackerPhase::Listening;
            log::info!("[orientation] permission granted");
        } else {
            self.phase = TrackerPhase::AwaitingPermission;
            log::warn!("[orientation] permission denied, will retry on next gesture");
        }
    }

    /// Record a device event. Invalid payloads leave all state untouched.
    pub fn on_sample(&mut self, beta: Option<f64>, gamma: Option<f64>) {
        if self.phase != TrackerPhase::Listening {
            return;
        }
        let Some(sample) = OrientationSample::from_event(beta, gamma) else {
            return;
        };
        if self.origin.is_none() {
            self.origin = Some(sample);
            self.smoothed = Some(sample);
        }
        self.target = Some(sample);
    }

    /// Advance smoothing and auto-centering by one frame.
    pub fn tick(&mut self) {
        let Some(target) = self.target else {
            return;
        };
        if let Some(smoothed) = self.smoothed.as_mut() {
            smoothed.lerp_toward(target, self.config.smoothing);
        }
        if let Some(origin) = self.origin.as_mut() {
            origin.lerp_toward(target, self.config.auto_center_rate);
        }
    }

    pub fn calibrated_tilt(&self) -> NormalizedTilt {
        match self.smoothed {
            Some(s) => calibrate(s, self.origin),
            None => NormalizedTilt::NEUTRAL,
        }
    }

    pub fn raw_tilt(&self) -> NormalizedTilt {
        self.smoothed.map(raw_tilt).unwrap_or(NormalizedTilt::NEUTRAL)
    }

    pub fn origin(&self) -> Option<OrientationSample> {
        self.origin
    }

    pub fn smoothed(&self) -> Option<OrientationSample> {
        self.smoothed
    }

    /// Return to `Unstarted` and forget every sample. Safe to call twice.
    pub fn stop(&mut self) {
        if self.phase != TrackerPhase::Unstarted {
            log::info!("[orientation] stopped");
        }
        self.phase = TrackerPhase::Unstarted;
        self.target = None;
        self.smoothed = None;
        self.origin = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u32);

/// One tracker shared by every interested card.
///
/// The owner installs the platform listener when [`Self::subscribe`]
/// reports the first subscriber and removes it when [`Self::unsubscribe`]
/// reports the last one.
#[derive(Debug)]
pub struct OrientationHub {
    tracker: OrientationTracker,
    subscribers: SmallVec<[SubscriberId; 8]>,
    next_id: u32,
}

impl OrientationHub {
    pub fn new(config: OrientationConfig) -> Self {
        Self {
            tracker: OrientationTracker::new(config),
            subscribers: SmallVec::new(),
            next_id: 0,
        }
    }

    /// Returns the new id and whether this is the first live subscriber.
    pub fn subscribe(&mut self) -> (SubscriberId, bool) {
        let id = SubscriberId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let first = self.subscribers.is_empty();
        self.subscribers.push(id);
        (id, first)
    }

    /// Returns `true` when `id` was the last subscriber; the tracker is
    /// stopped in that case. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| *s != id);
        let removed = self.subscribers.len() != before;
        let last = removed && self.subscribers.is_empty();
        if last {
            self.tracker.stop();
        }
        last
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn subscribers(&self) -> &[SubscriberId] {
        &self.subscribers
    }

    pub fn tracker(&self) -> &OrientationTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut OrientationTracker {
        &mut self.tracker
    }
}
