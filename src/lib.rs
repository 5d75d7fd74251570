#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;

use fnv::FnvHashMap;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod capability;
mod card;
mod constants;
mod dom;
mod frame;
mod listener;
mod orientation;
mod sections;
mod slider;

use card::MountedCard;
use constants::{ATTR_TILT_ID, CARD_ID_PREFIX, CARD_SELECTOR, TRACK_SELECTOR};
use sections::MountedSections;
use slider::MountedSlider;

/// Everything wired into the current page.
#[derive(Default)]
struct Page {
    cards: FnvHashMap<String, MountedCard>,
    sliders: Vec<MountedSlider>,
    sections: Option<MountedSections>,
    // waiting for DOMContentLoaded; dropped once the page is built
    ready: Option<listener::Listener>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

fn unique_card_id(element: &web::Element, taken: &FnvHashMap<String, MountedCard>) -> String {
    let base = element
        .get_attribute(ATTR_TILT_ID)
        .filter(|s| !s.is_empty())
        .or_else(|| Some(element.id()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| CARD_ID_PREFIX.to_string());
    if base != CARD_ID_PREFIX && !taken.contains_key(&base) {
        return base;
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn build_page(document: &web::Document) -> Page {
    let mut page = Page::default();
    for element in dom::query_all(document, CARD_SELECTOR) {
        let id = unique_card_id(&element, &page.cards);
        let card = MountedCard::mount(element, id);
        page.cards.insert(card.id().to_string(), card);
    }
    page.sliders = dom::query_all(document, TRACK_SELECTOR)
        .into_iter()
        .filter_map(MountedSlider::mount)
        .collect();
    page.sections = MountedSections::mount(document);
    log::info!(
        "page mounted: {} cards, {} sliders",
        page.cards.len(),
        page.sliders.len()
    );
    page
}

/// Wire every card, slider and section found in the document. Replaces any
/// previous mount.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    init().map_err(|e| JsValue::from_str(&format!("{:?}", e)))
}

/// Remove every listener and cancel every frame loop installed by [`mount`].
#[wasm_bindgen]
pub fn unmount() {
    let page = PAGE.with(|p| p.borrow_mut().take());
    if let Some(page) = page {
        let cards = page.cards.len();
        drop(page);
        log::info!("page unmounted ({} cards)", cards);
    }
}

/// Retry the orientation permission prompt. Call from a click or touch handler.
#[wasm_bindgen]
pub fn request_orientation_permission() -> bool {
    orientation::request_permission()
}

#[wasm_bindgen]
pub fn orientation_permission_granted() -> bool {
    orientation::permission_granted()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no window or document"))?;

    unmount();
    if document.ready_state() == "loading" {
        let doc = document.clone();
        let ready = listener::Listener::new(&document, "DOMContentLoaded", true, move |_ev| {
            let page = build_page(&doc);
            let ready = PAGE.with(|p| {
                let mut slot = p.borrow_mut();
                let current = slot.as_mut()?;
                let ready = current.ready.take()?;
                *current = page;
                Some(ready)
            });
            // this closure is still running; release it once the handler returns
            if let Some(ready) = ready {
                wasm_bindgen_futures::spawn_local(async move { drop(ready) });
            }
        })
        .ok_or_else(|| anyhow::anyhow!("could not wait for DOMContentLoaded"))?;
        PAGE.with(|p| {
            *p.borrow_mut() = Some(Page {
                ready: Some(ready),
                ..Page::default()
            })
        });
        return Ok(());
    }

    let page = build_page(&document);
    PAGE.with(|p| *p.borrow_mut() = Some(page));
    Ok(())
}
