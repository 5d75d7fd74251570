use std::rc::Rc;

use folio_core::{reveal_style, RevealConfig, SectionBounds, SectionNavigator};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{ACTIVE_CLASS, REVEAL_SELECTOR, SECTION_DOT_SELECTOR, SECTION_SELECTOR};
use crate::dom;
use crate::frame::FrameLoop;
use crate::listener::Listener;

struct SectionsShared {
    sections: Vec<web::HtmlElement>,
    dots: Vec<web::HtmlElement>,
    reveals: Vec<web::HtmlElement>,
    reveal_config: RevealConfig,
}

impl SectionsShared {
    /// Document-space bounds; measured on every update since layout shifts
    /// as fonts and images load.
    fn navigator(&self, scroll_y: f32) -> SectionNavigator {
        let bounds = self
            .sections
            .iter()
            .filter_map(|s| dom::rect_of(s))
            .map(|r| SectionBounds {
                top: r.top + scroll_y,
                height: r.height(),
            })
            .collect();
        SectionNavigator::new(bounds)
    }

    fn update(&self) {
        let Some(window) = web::window() else {
            return;
        };
        let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
        let viewport_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;

        let active = self.navigator(scroll_y).active_index(scroll_y, viewport_h);
        for (i, dot) in self.dots.iter().enumerate() {
            let on = Some(i) == active;
            _ = dot.class_list().toggle_with_force(ACTIVE_CLASS, on);
            if on {
                _ = dot.set_attribute("aria-current", "true");
            } else {
                _ = dot.remove_attribute("aria-current");
            }
        }

        for el in &self.reveals {
            let Some(rect) = dom::rect_of(el) else {
                continue;
            };
            let style = reveal_style(rect.top, rect.bottom, viewport_h, &self.reveal_config);
            dom::set_style(el, "opacity", &format!("{:.3}", style.opacity));
            let shift = format!("translate3d(0, {:.1}px, 0)", style.translate_y);
            dom::set_style(el, "transform", &shift);
        }
    }

    fn scroll_to(&self, index: usize) {
        let Some(window) = web::window() else {
            return;
        };
        let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
        let Some(top) = self.navigator(scroll_y).scroll_target(index) else {
            return;
        };
        let opts = web::ScrollToOptions::new();
        opts.set_top(top as f64);
        opts.set_behavior(web::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&opts);
        log::debug!("[sections] scrolling to section {}", index);
    }
}

/// Dot navigator and reveal styling, refreshed at most once per frame.
pub struct MountedSections {
    _listeners: Vec<Listener>,
    frame: Rc<FrameLoop>,
}

impl MountedSections {
    pub fn mount(document: &web::Document) -> Option<Self> {
        let shared = Rc::new(SectionsShared {
            sections: dom::query_all(document, SECTION_SELECTOR),
            dots: dom::query_all(document, SECTION_DOT_SELECTOR),
            reveals: dom::query_all(document, REVEAL_SELECTOR),
            reveal_config: RevealConfig::default(),
        });
        if shared.sections.is_empty() && shared.reveals.is_empty() {
            return None;
        }
        if shared.dots.len() != shared.sections.len() {
            log::warn!(
                "[sections] {} dots for {} sections",
                shared.dots.len(),
                shared.sections.len()
            );
        }

        let frame_shared = shared.clone();
        let frame = Rc::new(FrameLoop::new(move || {
            frame_shared.update();
            false
        }));

        let mut listeners = Vec::new();
        let window = web::window()?;
        for kind in ["scroll", "resize"] {
            let f = frame.clone();
            listeners.extend(Listener::new(&window, kind, true, move |_ev: web::Event| {
                f.schedule()
            }));
        }
        for (i, dot) in shared.dots.iter().enumerate() {
            let s = shared.clone();
            let target: &web::EventTarget = dot.unchecked_ref();
            listeners.extend(Listener::new(target, "click", true, move |_ev: web::Event| {
                s.scroll_to(i)
            }));
        }
        frame.schedule();
        log::info!(
            "[sections] mounted {} sections, {} reveal targets",
            shared.sections.len(),
            shared.reveals.len()
        );
        Some(Self {
            _listeners: listeners,
            frame,
        })
    }
}

impl Drop for MountedSections {
    fn drop(&mut self) {
        self.frame.cancel();
    }
}
