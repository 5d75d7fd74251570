// Host-side tests for tunable defaults and validation.

use folio_core::constants::*;
use folio_core::{ConfigError, DragConfig, OrientationConfig, RevealConfig, TiltConfig};

#[test]
fn defaults_are_valid() {
    assert!(TiltConfig::default().validate().is_ok());
    assert!(OrientationConfig::default().validate().is_ok());
    assert!(DragConfig::default().validate().is_ok());
    assert!(RevealConfig::default().validate().is_ok());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_factors_are_ordered() {
    // tilt settles slower than orientation; the origin drifts slowest
    assert!(TILT_SMOOTHING < ORIENTATION_SMOOTHING);
    assert!(AUTO_CENTER_RATE < TILT_SMOOTHING);
    assert!(SCALE_EPSILON < ROTATION_EPSILON);
    assert!(VISIBILITY_THRESHOLD < HIT_FALLBACK_OPACITY);
}

#[test]
fn overrides_apply() {
    let cfg = TiltConfig::with_overrides(Some(12.0), None, Some(0.2)).unwrap();
    assert_eq!(cfg.max_tilt_deg, 12.0);
    assert_eq!(cfg.smoothing, 0.2);
    assert_eq!(cfg.proximity_margin, PROXIMITY_MARGIN_PX);
}

#[test]
fn bad_overrides_are_rejected() {
    assert_eq!(
        TiltConfig::with_overrides(None, Some(0.0), None),
        Err(ConfigError::NotPositive {
            name: "proximity_margin",
            value: 0.0
        })
    );
    assert!(matches!(
        TiltConfig::with_overrides(None, None, Some(1.5)),
        Err(ConfigError::FactorOutOfRange { .. })
    ));
    assert!(matches!(
        TiltConfig::with_overrides(Some(f32::NAN), None, None),
        Err(ConfigError::NotFinite { .. })
    ));
}

#[test]
fn error_messages_name_the_field() {
    let err = TiltConfig::with_overrides(None, None, Some(0.0)).unwrap_err();
    assert_eq!(err.to_string(), "smoothing must be in (0, 1], got 0");
}
