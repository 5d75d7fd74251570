use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{CardEvent, CardOutput, CardTilt, DeviceClass, TiltConfig};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{
    ATTR_HOVERED, ATTR_TILT_ID, ATTR_TILT_MARGIN, ATTR_TILT_MAX, ATTR_TILT_SMOOTHING,
};
use crate::dom::{self, DomProbe};
use crate::frame::FrameLoop;
use crate::listener::Listener;
use crate::orientation::{self, Subscription};

struct CardShared {
    element: web::HtmlElement,
    probe: DomProbe,
    tilt: RefCell<CardTilt>,
}

impl CardShared {
    /// Feed one event and publish the result. Returns whether a frame is wanted.
    fn dispatch(&self, event: CardEvent) -> bool {
        let out = self.tilt.borrow_mut().handle(event, &self.probe);
        self.publish(&out);
        out.wants_frame
    }

    fn publish(&self, out: &CardOutput) {
        if let Some(t) = out.transform {
            dom::set_style(&self.element, "transform", &t.css());
        }
        dom::set_flag_attr(&self.element, ATTR_HOVERED, out.hovered);
    }
}

/// A card with its listeners, frame loop and orientation subscription.
/// Dropping it tears all of them down.
pub struct MountedCard {
    id: String,
    _shared: Rc<CardShared>,
    // declared before `frame` so listeners go first
    _listeners: Vec<Listener>,
    _subscription: Option<Subscription>,
    frame: Rc<FrameLoop>,
}

fn config_for(element: &web::Element) -> TiltConfig {
    let overrides = TiltConfig::with_overrides(
        dom::attr_f32(element, ATTR_TILT_MAX),
        dom::attr_f32(element, ATTR_TILT_MARGIN),
        dom::attr_f32(element, ATTR_TILT_SMOOTHING),
    );
    match overrides {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("[tilt] {}; using defaults", e);
            TiltConfig::default()
        }
    }
}

impl MountedCard {
    pub fn mount(element: web::HtmlElement, id: String) -> Self {
        _ = element.set_attribute(ATTR_TILT_ID, &id);
        let config = config_for(&element);
        let shared = Rc::new(CardShared {
            probe: DomProbe::new(element.clone().into()),
            tilt: RefCell::new(CardTilt::new(id.clone(), config)),
            element,
        });

        let frame_shared = shared.clone();
        let frame = Rc::new(FrameLoop::new(move || frame_shared.dispatch(CardEvent::Frame)));

        // classification happens on the client after mount
        let class = crate::capability::probe();
        shared.dispatch(CardEvent::Classified(class));

        let mut listeners = Vec::new();
        let mut subscription = None;
        match class {
            DeviceClass::PointerPrimary => {
                listeners.extend(wire_pointer(&shared, &frame));
                listeners.extend(wire_focus(&shared, &frame));
            }
            DeviceClass::TouchPrimary => {
                let sink_shared = shared.clone();
                subscription = Some(orientation::subscribe(move |tilt| {
                    sink_shared.dispatch(CardEvent::Orientation(tilt));
                }));
            }
        }
        log::info!("[tilt] mounted card {} ({:?})", id, class);

        Self {
            id,
            _shared: shared,
            _listeners: listeners,
            _subscription: subscription,
            frame,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for MountedCard {
    fn drop(&mut self) {
        self.frame.cancel();
        log::info!("[tilt] unmounted card {}", self.id);
    }
}

fn wire_pointer(shared: &Rc<CardShared>, frame: &Rc<FrameLoop>) -> Option<Listener> {
    let window = web::window()?;
    let shared = shared.clone();
    let frame = frame.clone();
    Listener::new(&window, "pointermove", true, move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let point = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        if shared.dispatch(CardEvent::PointerMoved(point)) {
            frame.schedule();
        }
    })
}

fn wire_focus(shared: &Rc<CardShared>, frame: &Rc<FrameLoop>) -> Vec<Listener> {
    let target: web::EventTarget = shared.element.clone().into();
    let mut out = Vec::with_capacity(2);

    let focus_shared = shared.clone();
    let focus_frame = frame.clone();
    out.extend(Listener::new(&target, "focusin", true, move |ev: web::Event| {
        let Some(focused) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        let Some(rect) = dom::rect_of(&focused) else {
            return;
        };
        if focus_shared.dispatch(CardEvent::FocusIn(rect.center())) {
            focus_frame.schedule();
        }
    }));

    let blur_shared = shared.clone();
    let blur_frame = frame.clone();
    out.extend(Listener::new(&target, "focusout", true, move |ev: web::Event| {
        let to_inside = ev
            .dyn_ref::<web::FocusEvent>()
            .and_then(|fe| fe.related_target())
            .and_then(|t| t.dyn_into::<web::Node>().ok())
            .map(|node| blur_shared.element.contains(Some(&node)))
            .unwrap_or(false);
        if blur_shared.dispatch(CardEvent::FocusOut { to_inside }) {
            blur_frame.schedule();
        }
    }));
    out
}
