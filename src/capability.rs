use folio_core::{CapabilityProbe, DeviceClass};
use web_sys as web;

use crate::constants::{MQ_HOVER_NONE, MQ_POINTER_COARSE};

fn media_matches(window: &web::Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Classify the device from input-capability media queries. Client side
/// only; without a window every device is treated as pointer-primary.
pub fn probe() -> DeviceClass {
    let Some(window) = web::window() else {
        return DeviceClass::PointerPrimary;
    };
    CapabilityProbe {
        hover_none: media_matches(&window, MQ_HOVER_NONE),
        pointer_coarse: media_matches(&window, MQ_POINTER_COARSE),
    }
    .classify()
}
