//! Mapping of raw device angles to a normalized 0..1 tilt.
//!
//! gamma (left/right) drives `tilt_x`, beta (front/back) drives `tilt_y`.
//! No axis is inverted here; consumers decide how tilt maps to rotation.

use crate::constants::{BETA_RANGE_DEG, GAMMA_RANGE_DEG, NEUTRAL_TILT};
use crate::math::{clamp, lerp};

/// Device tilt in degrees, already clamped to the physical ranges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationSample {
    pub beta: f32,
    pub gamma: f32,
}

impl OrientationSample {
    pub fn new(beta: f32, gamma: f32) -> Self {
        Self {
            beta: clamp(beta, -BETA_RANGE_DEG, BETA_RANGE_DEG),
            gamma: clamp(gamma, -GAMMA_RANGE_DEG, GAMMA_RANGE_DEG),
        }
    }

    /// Build a sample from event payload fields; `None` when either angle
    /// is missing or not a finite number.
    pub fn from_event(beta: Option<f64>, gamma: Option<f64>) -> Option<Self> {
        let beta = beta.filter(|b| b.is_finite())?;
        let gamma = gamma.filter(|g| g.is_finite())?;
        Some(Self::new(beta as f32, gamma as f32))
    }

    /// Move both angles toward `target` by `factor`.
    pub fn lerp_toward(&mut self, target: OrientationSample, factor: f32) {
        self.beta = lerp(self.beta, target.beta, factor);
        self.gamma = lerp(self.gamma, target.gamma, factor);
    }
}

/// Calibration-relative tilt; 0.5 on both axes is neutral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedTilt {
    pub tilt_x: f32,
    pub tilt_y: f32,
}

impl NormalizedTilt {
    pub const NEUTRAL: NormalizedTilt = NormalizedTilt {
        tilt_x: NEUTRAL_TILT,
        tilt_y: NEUTRAL_TILT,
    };
}

impl Default for NormalizedTilt {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[inline]
fn normalize_axis(offset: f32, range: f32) -> f32 {
    NEUTRAL_TILT + clamp(offset, -range, range) / (2.0 * range)
}

/// Tilt of `sample` relative to `origin`; neutral until an origin exists.
pub fn calibrate(sample: OrientationSample, origin: Option<OrientationSample>) -> NormalizedTilt {
    match origin {
        None => NormalizedTilt::NEUTRAL,
        Some(origin) => NormalizedTilt {
            tilt_x: normalize_axis(sample.gamma - origin.gamma, GAMMA_RANGE_DEG),
            tilt_y: normalize_axis(sample.beta - origin.beta, BETA_RANGE_DEG),
        },
    }
}

/// Tilt of `sample` relative to a device lying flat.
pub fn raw_tilt(sample: OrientationSample) -> NormalizedTilt {
    NormalizedTilt {
        tilt_x: normalize_axis(sample.gamma, GAMMA_RANGE_DEG),
        tilt_y: normalize_axis(sample.beta, BETA_RANGE_DEG),
    }
}
