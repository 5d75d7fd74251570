//! Draggable handle on a horizontal track.
//!
//! Mouse and pen drags use pointer events with capture. Touch drags use touch
//! events: start and end listeners stay passive, the move listener is not
//! passive so it can stop the page from scrolling while a drag is active.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{DragConfig, DragRelease, DragTracker, TrackGeometry};
use instant::Instant;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::constants::{
    ATTR_DRAGGING, ATTR_TRACK_PADDING, CSS_VAR_DRAG_POSITION, DEFAULT_TRACK_PADDING_PX,
    HANDLE_SELECTOR, RELEASE_EVENT,
};
use crate::dom;
use crate::listener::Listener;

struct SliderShared {
    track: web::HtmlElement,
    handle: web::HtmlElement,
    tracker: RefCell<DragTracker>,
}

impl SliderShared {
    fn measure(&self) -> Option<TrackGeometry> {
        let track = dom::rect_of(&self.track)?;
        let handle = dom::rect_of(&self.handle)?;
        Some(TrackGeometry {
            left: track.left,
            width: track.width(),
            handle_width: handle.width(),
            padding: dom::attr_f32(&self.track, ATTR_TRACK_PADDING)
                .unwrap_or(DEFAULT_TRACK_PADDING_PX),
        })
    }

    fn begin(&self, client_x: f32) {
        let mut tracker = self.tracker.borrow_mut();
        if let Some(geometry) = self.measure() {
            tracker.set_geometry(geometry);
        }
        let position = tracker.start(client_x, Instant::now());
        drop(tracker);
        self.publish_position(position);
        dom::set_flag_attr(&self.track, ATTR_DRAGGING, true);
    }

    /// Returns `false` when no drag is active.
    fn advance(&self, client_x: f32) -> bool {
        let moved = self.tracker.borrow_mut().drag_move(client_x, Instant::now());
        match moved {
            Some(position) => {
                self.publish_position(position);
                true
            }
            None => false,
        }
    }

    fn finish(&self) {
        let release = self.tracker.borrow_mut().end(Instant::now());
        if let Some(release) = release {
            dom::set_flag_attr(&self.track, ATTR_DRAGGING, false);
            self.publish_position(release.position);
            self.dispatch_release(release);
        }
    }

    fn abort(&self) {
        self.tracker.borrow_mut().cancel();
        dom::set_flag_attr(&self.track, ATTR_DRAGGING, false);
    }

    fn publish_position(&self, position: f32) {
        dom::set_style(&self.track, CSS_VAR_DRAG_POSITION, &format!("{:.4}", position));
    }

    fn dispatch_release(&self, release: DragRelease) {
        let detail = js_sys::Object::new();
        for (key, value) in [("position", release.position), ("velocity", release.velocity)] {
            let value = JsValue::from_f64(value as f64);
            _ = js_sys::Reflect::set(&detail, &JsValue::from_str(key), &value);
        }
        let init = web::CustomEventInit::new();
        init.set_detail(&detail);
        init.set_bubbles(true);
        match web::CustomEvent::new_with_event_init_dict(RELEASE_EVENT, &init) {
            Ok(ev) => {
                _ = self.track.dispatch_event(&ev);
            }
            Err(e) => log::warn!("[drag] could not create release event: {:?}", e),
        }
    }
}

pub struct MountedSlider {
    _listeners: Vec<Listener>,
}

impl MountedSlider {
    /// Wire `track`; `None` when it has no handle child.
    pub fn mount(track: web::HtmlElement) -> Option<Self> {
        let handle = track
            .query_selector(HANDLE_SELECTOR)
            .ok()
            .flatten()?
            .dyn_into::<web::HtmlElement>()
            .ok()?;
        let config = DragConfig::default();
        if let Err(e) = config.validate() {
            log::error!("[drag] invalid defaults: {}", e);
        }
        let geometry = TrackGeometry {
            left: 0.0,
            width: 0.0,
            handle_width: 0.0,
            padding: DEFAULT_TRACK_PADDING_PX,
        };
        let shared = Rc::new(SliderShared {
            track,
            handle,
            tracker: RefCell::new(DragTracker::new(geometry, config)),
        });
        if let Some(geometry) = shared.measure() {
            shared.tracker.borrow_mut().set_geometry(geometry);
        }

        let mut listeners = Vec::new();
        listeners.extend(wire_pointer(&shared));
        listeners.extend(wire_touch(&shared));
        log::info!("[drag] mounted slider");
        Some(Self {
            _listeners: listeners,
        })
    }
}

fn wire_pointer(shared: &Rc<SliderShared>) -> Vec<Listener> {
    let mut out = Vec::with_capacity(5);
    let handle_target: web::EventTarget = shared.handle.clone().into();

    let s = shared.clone();
    out.extend(Listener::new(&handle_target, "pointerdown", false, move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        // touch is handled by the touch listeners
        if ev.pointer_type() == "touch" {
            return;
        }
        _ = s.handle.set_pointer_capture(ev.pointer_id());
        s.begin(ev.client_x() as f32);
        ev.prevent_default();
    }));

    // capture lost without a pointerup ends the drag with no release
    for kind in ["pointercancel", "lostpointercapture"] {
        let s = shared.clone();
        out.extend(Listener::new(&handle_target, kind, true, move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            if ev.pointer_type() != "touch" && s.tracker.borrow().is_dragging() {
                s.abort();
            }
        }));
    }

    let Some(window) = web::window() else {
        return out;
    };

    let s = shared.clone();
    out.extend(Listener::new(&window, "pointermove", true, move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            if ev.pointer_type() != "touch" {
                s.advance(ev.client_x() as f32);
            }
        }
    }));

    let s = shared.clone();
    out.extend(Listener::new(&window, "pointerup", true, move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            if ev.pointer_type() != "touch" {
                s.finish();
            }
        }
    }));
    out
}

fn first_touch_x(ev: &web::TouchEvent) -> Option<f32> {
    ev.touches().get(0).map(|t| t.client_x() as f32)
}

fn wire_touch(shared: &Rc<SliderShared>) -> Vec<Listener> {
    let mut out = Vec::with_capacity(4);
    let handle_target: web::EventTarget = shared.handle.clone().into();

    let s = shared.clone();
    out.extend(Listener::new(&handle_target, "touchstart", true, move |ev: web::Event| {
        if let Some(x) = ev.dyn_ref::<web::TouchEvent>().and_then(first_touch_x) {
            s.begin(x);
        }
    }));

    let s = shared.clone();
    out.extend(Listener::new(&handle_target, "touchmove", false, move |ev: web::Event| {
        let Some(x) = ev.dyn_ref::<web::TouchEvent>().and_then(first_touch_x) else {
            return;
        };
        if s.advance(x) {
            ev.prevent_default();
        }
    }));

    let s = shared.clone();
    out.extend(Listener::new(&handle_target, "touchend", true, move |_ev: web::Event| {
        s.finish();
    }));

    let s = shared.clone();
    out.extend(Listener::new(&handle_target, "touchcancel", true, move |_ev: web::Event| {
        s.abort();
    }));
    out
}
