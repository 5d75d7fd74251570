// DOM contract between the page markup and the interaction layer.

// Cards
pub const CARD_SELECTOR: &str = "[data-tilt-card]";
pub const ATTR_TILT_ID: &str = "data-tilt-id"; // stable per-instance identifier used by hit-testing
pub const ATTR_TILT_MAX: &str = "data-tilt-max";
pub const ATTR_TILT_MARGIN: &str = "data-tilt-margin";
pub const ATTR_TILT_SMOOTHING: &str = "data-tilt-smoothing";
pub const ATTR_HOVERED: &str = "data-hovered";
pub const CARD_ID_PREFIX: &str = "tilt-card";

// Slider
pub const TRACK_SELECTOR: &str = "[data-drag-track]";
pub const HANDLE_SELECTOR: &str = "[data-drag-handle]";
pub const ATTR_TRACK_PADDING: &str = "data-drag-padding";
pub const ATTR_DRAGGING: &str = "data-dragging";
pub const CSS_VAR_DRAG_POSITION: &str = "--drag-position";
pub const RELEASE_EVENT: &str = "folio:release";
pub const DEFAULT_TRACK_PADDING_PX: f32 = 6.0;

// Sections
pub const SECTION_SELECTOR: &str = "[data-section]";
pub const SECTION_DOT_SELECTOR: &str = "[data-section-dot]";
pub const REVEAL_SELECTOR: &str = "[data-reveal]";
pub const ACTIVE_CLASS: &str = "active";

// Capability probe
pub const MQ_HOVER_NONE: &str = "(hover: none)";
pub const MQ_POINTER_COARSE: &str = "(pointer: coarse)";
