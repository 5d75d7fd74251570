//! Tunables for the interaction state machines.
//!
//! Every struct defaults to the values in [`crate::constants`]; callers may
//! override individual fields and should call `validate` before use.

use crate::constants::*;
use crate::error::ConfigError;

fn check_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn check_factor(name: &'static str, value: f32) -> Result<(), ConfigError> {
    check_finite(name, value)?;
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange { name, value })
    }
}

/// Per-card tilt and proximity tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    pub max_tilt_deg: f32,
    pub hover_scale_gain: f32,
    pub smoothing: f32,
    pub rotation_epsilon: f32,
    pub scale_epsilon: f32,
    pub proximity_margin: f32,
    pub visibility_threshold: f32,
    pub hit_fallback_opacity: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_tilt_deg: MAX_TILT_DEG,
            hover_scale_gain: HOVER_SCALE_GAIN,
            smoothing: TILT_SMOOTHING,
            rotation_epsilon: ROTATION_EPSILON,
            scale_epsilon: SCALE_EPSILON,
            proximity_margin: PROXIMITY_MARGIN_PX,
            visibility_threshold: VISIBILITY_THRESHOLD,
            hit_fallback_opacity: HIT_FALLBACK_OPACITY,
        }
    }
}

impl TiltConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("max_tilt_deg", self.max_tilt_deg)?;
        check_finite("hover_scale_gain", self.hover_scale_gain)?;
        check_factor("smoothing", self.smoothing)?;
        check_positive("rotation_epsilon", self.rotation_epsilon)?;
        check_positive("scale_epsilon", self.scale_epsilon)?;
        check_positive("proximity_margin", self.proximity_margin)?;
        check_finite("visibility_threshold", self.visibility_threshold)?;
        check_finite("hit_fallback_opacity", self.hit_fallback_opacity)
    }

    /// Defaults with the optional per-element overrides applied.
    pub fn with_overrides(
        max_tilt_deg: Option<f32>,
        proximity_margin: Option<f32>,
        smoothing: Option<f32>,
    ) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(v) = max_tilt_deg {
            cfg.max_tilt_deg = v;
        }
        if let Some(v) = proximity_margin {
            cfg.proximity_margin = v;
        }
        if let Some(v) = smoothing {
            cfg.smoothing = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationConfig {
    pub smoothing: f32,
    pub auto_center_rate: f32,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            smoothing: ORIENTATION_SMOOTHING,
            auto_center_rate: AUTO_CENTER_RATE,
        }
    }
}

impl OrientationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_factor("orientation smoothing", self.smoothing)?;
        check_factor("auto_center_rate", self.auto_center_rate)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    pub velocity_smoothing: f32,
    pub max_sample_gap_ms: u64,
    pub max_release_velocity: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            velocity_smoothing: VELOCITY_SMOOTHING,
            max_sample_gap_ms: MAX_SAMPLE_GAP_MS,
            max_release_velocity: MAX_RELEASE_VELOCITY,
        }
    }
}

impl DragConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_factor("velocity_smoothing", self.velocity_smoothing)?;
        check_positive("max_release_velocity", self.max_release_velocity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    pub band_px: f32,
    pub offset_px: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            band_px: REVEAL_BAND_PX,
            offset_px: REVEAL_OFFSET_PX,
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("reveal band_px", self.band_px)?;
        check_finite("reveal offset_px", self.offset_px)
    }
}
