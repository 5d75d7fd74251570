//! Page-wide device orientation service.
//!
//! One `deviceorientation` listener and one frame loop serve every card that
//! holds a [`Subscription`]. Both exist only while at least one subscription
//! is alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fnv::FnvHashMap;
use folio_core::{NormalizedTilt, OrientationConfig, OrientationHub, SubscriberId, TrackerPhase};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::frame::FrameLoop;
use crate::listener::Listener;

type Sink = Rc<dyn Fn(NormalizedTilt)>;

struct OrientationService {
    hub: RefCell<OrientationHub>,
    sinks: RefCell<FnvHashMap<SubscriberId, Sink>>,
    device_listener: RefCell<Option<Listener>>,
    gesture_listeners: RefCell<Vec<Listener>>,
    frame: RefCell<Option<FrameLoop>>,
}

thread_local! {
    static SERVICE: RefCell<Option<Rc<OrientationService>>> = const { RefCell::new(None) };
}

/// Keeps a card subscribed; unsubscribes on drop.
pub struct Subscription {
    id: SubscriberId,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(service) = current() else {
            return;
        };
        let last = service.hub.borrow_mut().unsubscribe(self.id);
        service.sinks.borrow_mut().remove(&self.id);
        if last {
            service.device_listener.borrow_mut().take();
            service.gesture_listeners.borrow_mut().clear();
            service.frame.borrow_mut().take();
            SERVICE.with(|s| s.borrow_mut().take());
            log::info!("[orientation] last subscriber left, listener removed");
        }
    }
}

fn current() -> Option<Rc<OrientationService>> {
    SERVICE.with(|s| s.borrow().clone())
}

fn service() -> Rc<OrientationService> {
    SERVICE.with(|s| {
        s.borrow_mut()
            .get_or_insert_with(|| {
                let config = OrientationConfig::default();
                if let Err(e) = config.validate() {
                    log::error!("[orientation] invalid defaults: {}", e);
                }
                Rc::new(OrientationService {
                    hub: RefCell::new(OrientationHub::new(config)),
                    sinks: RefCell::new(FnvHashMap::default()),
                    device_listener: RefCell::new(None),
                    gesture_listeners: RefCell::new(Vec::new()),
                    frame: RefCell::new(None),
                })
            })
            .clone()
    })
}

/// Register `sink` to receive the calibrated tilt every frame.
pub fn subscribe(sink: impl Fn(NormalizedTilt) + 'static) -> Subscription {
    let svc = service();
    let (id, first) = svc.hub.borrow_mut().subscribe();
    svc.sinks.borrow_mut().insert(id, Rc::new(sink));
    if first {
        start(&svc);
    }
    Subscription { id }
}

/// UI-triggered permission retry. Must run inside a user gesture handler.
pub fn request_permission() -> bool {
    let Some(svc) = current() else {
        return false;
    };
    if svc.hub.borrow_mut().tracker_mut().request_permission() {
        issue_permission_request(&svc);
        true
    } else {
        false
    }
}

pub fn permission_granted() -> bool {
    let Some(svc) = current() else {
        return false;
    };
    let granted = svc.hub.borrow().tracker().permission_granted();
    granted
}

fn orientation_constructor() -> Option<JsValue> {
    let window = web::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str("DeviceOrientationEvent"))
        .ok()
        .filter(|v| !v.is_undefined())
}

fn permission_function() -> Option<(JsValue, js_sys::Function)> {
    let ctor = orientation_constructor()?;
    let f = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission")).ok()?;
    let f = f.dyn_into::<js_sys::Function>().ok()?;
    Some((ctor, f))
}

fn start(svc: &Rc<OrientationService>) {
    if orientation_constructor().is_none() {
        log::info!("[orientation] not supported on this device");
        return;
    }
    let weak = Rc::downgrade(svc);
    let frame = FrameLoop::new(move || match weak.upgrade() {
        Some(svc) => broadcast(&svc),
        None => false,
    });
    *svc.frame.borrow_mut() = Some(frame);

    let requires_permission = permission_function().is_some();
    let phase = svc.hub.borrow_mut().tracker_mut().start(requires_permission);
    match phase {
        TrackerPhase::Listening => install_device_listener(svc),
        TrackerPhase::AwaitingPermission => install_gesture_listeners(svc),
        _ => {}
    }
}

/// Returns whether the loop should keep running.
fn broadcast(svc: &OrientationService) -> bool {
    let tilt = {
        let mut hub = svc.hub.borrow_mut();
        let tracker = hub.tracker_mut();
        if !tracker.permission_granted() {
            return false;
        }
        tracker.tick();
        tracker.calibrated_tilt()
    };
    let sinks: Vec<Sink> = svc.sinks.borrow().values().cloned().collect();
    for sink in sinks {
        sink(tilt);
    }
    true
}

fn install_device_listener(svc: &Rc<OrientationService>) {
    let Some(window) = web::window() else {
        return;
    };
    let weak = Rc::downgrade(svc);
    let listener = Listener::new(&window, "deviceorientation", true, move |ev: web::Event| {
        let Some(svc) = weak.upgrade() else {
            return;
        };
        if let Some(ev) = ev.dyn_ref::<web::DeviceOrientationEvent>() {
            svc.hub.borrow_mut().tracker_mut().on_sample(ev.beta(), ev.gamma());
        }
    });
    *svc.device_listener.borrow_mut() = listener;
    // frames only run once samples can arrive
    if let Some(frame) = svc.frame.borrow().as_ref() {
        frame.schedule();
    }
}

fn install_gesture_listeners(svc: &Rc<OrientationService>) {
    let Some(document) = crate::dom::window_document() else {
        return;
    };
    let mut installed = svc.gesture_listeners.borrow_mut();
    if !installed.is_empty() {
        return;
    }
    for kind in ["touchend", "click"] {
        let weak: Weak<OrientationService> = Rc::downgrade(svc);
        let listener = Listener::new(&document, kind, true, move |_ev: web::Event| {
            let Some(svc) = weak.upgrade() else {
                return;
            };
            let should_request = svc.hub.borrow_mut().tracker_mut().on_gesture();
            if should_request {
                issue_permission_request(&svc);
            }
        });
        installed.extend(listener);
    }
    log::info!("[orientation] waiting for a gesture to request permission");
}

/// Calls `DeviceOrientationEvent.requestPermission()` synchronously; only
/// the promise is awaited.
fn issue_permission_request(svc: &Rc<OrientationService>) {
    let Some((ctor, request)) = permission_function() else {
        svc.hub.borrow_mut().tracker_mut().on_permission_result(true);
        install_device_listener(svc);
        return;
    };
    let promise = match request.call0(&ctor) {
        Ok(p) => p.dyn_into::<js_sys::Promise>().ok(),
        Err(e) => {
            log::warn!("[orientation] requestPermission threw: {:?}", e);
            None
        }
    };
    let Some(promise) = promise else {
        svc.hub.borrow_mut().tracker_mut().on_permission_result(false);
        return;
    };
    let weak = Rc::downgrade(svc);
    spawn_local(async move {
        let granted = match JsFuture::from(promise).await {
            Ok(v) => v.as_string().as_deref() == Some("granted"),
            Err(e) => {
                log::warn!("[orientation] permission request failed: {:?}", e);
                false
            }
        };
        let Some(svc) = weak.upgrade() else {
            return;
        };
        svc.hub.borrow_mut().tracker_mut().on_permission_result(granted);
        if granted {
            svc.gesture_listeners.borrow_mut().clear();
            install_device_listener(&svc);
        }
    });
}
