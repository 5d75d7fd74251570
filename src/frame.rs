use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that runs only while asked to.
///
/// `on_frame` returns whether another frame is wanted. At most one frame is
/// pending at a time; [`FrameLoop::cancel`] and `Drop` revoke it.
pub struct FrameLoop {
    pending: Rc<Cell<Option<i32>>>,
    slot: FrameSlot,
}

impl FrameLoop {
    pub fn new(mut on_frame: impl FnMut() -> bool + 'static) -> Self {
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let pending_tick = pending.clone();
        let weak_slot = Rc::downgrade(&slot);
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if on_frame() {
                if let Some(slot) = weak_slot.upgrade() {
                    request(&slot, &pending_tick);
                }
            }
        }) as Box<dyn FnMut()>));
        Self { pending, slot }
    }

    /// Ask for a frame unless one is already pending.
    pub fn schedule(&self) {
        request(&self.slot, &self.pending);
    }

    pub fn cancel(&self) {
        if let (Some(window), Some(handle)) = (web::window(), self.pending.take()) {
            _ = window.cancel_animation_frame(handle);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
        self.slot.borrow_mut().take();
    }
}

fn request(slot: &FrameSlot, pending: &Rc<Cell<Option<i32>>>) {
    if pending.get().is_some() {
        return;
    }
    let Some(window) = web::window() else {
        return;
    };
    let slot = slot.borrow();
    let Some(callback) = slot.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(handle) => pending.set(Some(handle)),
        Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
    }
}
