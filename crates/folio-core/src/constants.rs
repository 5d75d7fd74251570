// Interaction tuning defaults shared by the core state machines and the web frontend.

// Card tilt
pub const MAX_TILT_DEG: f32 = 8.0; // rotation at full influence on the element's edge
pub const HOVER_SCALE_GAIN: f32 = 0.02; // scale = 1 + gain * influence
pub const TILT_SMOOTHING: f32 = 0.08; // per-frame lerp factor, slower than orientation
pub const ROTATION_EPSILON: f32 = 0.001; // degrees
pub const SCALE_EPSILON: f32 = 0.0001;

// Proximity
pub const PROXIMITY_MARGIN_PX: f32 = 150.0; // falloff zone around the bounding rect
pub const VISIBILITY_THRESHOLD: f32 = 0.1; // below this opacity elements are ignored
pub const HIT_FALLBACK_OPACITY: f32 = 0.5; // trust the rect when at least this opaque

// Device orientation
pub const BETA_RANGE_DEG: f32 = 90.0; // front-back tilt, clamped to +-range
pub const GAMMA_RANGE_DEG: f32 = 45.0; // left-right tilt, clamped to +-range
pub const ORIENTATION_SMOOTHING: f32 = 0.12; // per frame
pub const AUTO_CENTER_RATE: f32 = 0.002; // per frame drift of the calibration origin
pub const NEUTRAL_TILT: f32 = 0.5;

// Drag tracking
pub const VELOCITY_SMOOTHING: f32 = 0.3; // weight of the newest instantaneous velocity
pub const MAX_SAMPLE_GAP_MS: u64 = 100; // older samples do not feed velocity
pub const MAX_RELEASE_VELOCITY: f32 = 5.0; // track units per second

// Scroll reveal
pub const REVEAL_BAND_PX: f32 = 120.0; // distance over which a section fades in/out
pub const REVEAL_OFFSET_PX: f32 = 32.0; // translate applied while fully hidden
