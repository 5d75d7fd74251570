use folio_core::{ElementProbe, HitNode, HitTester, Rect, Visibility};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::ATTR_TILT_ID;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn rect_of(element: &web::Element) -> Option<Rect> {
    if !element.is_connected() {
        return None;
    }
    let r = element.get_bounding_client_rect();
    Some(Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.right() as f32,
        r.bottom() as f32,
    ))
}

/// All elements matching `selector`, in document order.
pub fn query_all(root: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = root.query_selector_all(selector) else {
        log::warn!("invalid selector {}", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

/// Parse a numeric data attribute; absent or malformed values are `None`.
pub fn attr_f32(element: &web::Element, name: &str) -> Option<f32> {
    let raw = element.get_attribute(name)?;
    match raw.trim().parse::<f32>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {}=\"{}\": not a number", name, raw);
            None
        }
    }
}

#[inline]
pub fn set_style(element: &web::HtmlElement, property: &str, value: &str) {
    _ = element.style().set_property(property, value);
}

#[inline]
pub fn set_flag_attr(element: &web::Element, name: &str, on: bool) {
    if on {
        _ = element.set_attribute(name, "true");
    } else {
        _ = element.remove_attribute(name);
    }
}

/// Layout and hit-testing answers for one tracked element.
pub struct DomProbe {
    element: web::Element,
}

impl DomProbe {
    pub fn new(element: web::Element) -> Self {
        Self { element }
    }
}

impl ElementProbe for DomProbe {
    fn bounding_rect(&self) -> Option<Rect> {
        rect_of(&self.element)
    }

    fn visibility(&self) -> Visibility {
        let style = web::window().and_then(|w| w.get_computed_style(&self.element).ok().flatten());
        let Some(style) = style else {
            return Visibility::default();
        };
        let opacity = style
            .get_property_value("opacity")
            .ok()
            .and_then(|v| v.trim().parse::<f32>().ok())
            .unwrap_or(1.0);
        let hidden = style
            .get_property_value("visibility")
            .map(|v| v == "hidden" || v == "collapse")
            .unwrap_or(false)
            || style
                .get_property_value("display")
                .map(|v| v == "none")
                .unwrap_or(false);
        Visibility { opacity, hidden }
    }
}

impl HitTester for DomProbe {
    type Node = DomNode;

    fn topmost_at(&self, point: Vec2) -> Option<DomNode> {
        let document = self.element.owner_document()?;
        document
            .element_from_point(point.x, point.y)
            .map(DomNode)
    }
}

/// Hit-test result walking up through `parentElement`.
pub struct DomNode(pub web::Element);

impl HitNode for DomNode {
    fn instance_id(&self) -> Option<String> {
        self.0.get_attribute(ATTR_TILT_ID)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(DomNode)
    }
}
