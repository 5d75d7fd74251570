//! Pointer proximity to a tracked element.
//!
//! Geometry, visibility and hit-testing are read through traits so the web
//! binding can answer from the DOM and tests can answer from plain data.

use glam::Vec2;

use crate::config::TiltConfig;

/// Bounding box in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// False for detached or not yet laid out elements.
    pub fn has_area(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Euclidean distance from `p` to the nearest edge; zero inside.
    pub fn distance_to(&self, p: Vec2) -> f32 {
        let dx = (self.left - p.x).max(0.0).max(p.x - self.right);
        let dy = (self.top - p.y).max(0.0).max(p.y - self.bottom);
        Vec2::new(dx, dy).length()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visibility {
    pub opacity: f32,
    pub hidden: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            hidden: false,
        }
    }
}

/// Read-only view of the tracked element's layout.
pub trait ElementProbe {
    fn bounding_rect(&self) -> Option<Rect>;
    fn visibility(&self) -> Visibility;
}

/// A node returned by hit-testing, able to walk to its parent.
pub trait HitNode: Sized {
    fn instance_id(&self) -> Option<String>;
    fn parent(&self) -> Option<Self>;
}

/// "What is visually on top at this point."
pub trait HitTester {
    type Node: HitNode;
    fn topmost_at(&self, point: Vec2) -> Option<Self::Node>;
}

/// Walk ancestors of `node` (inclusive) looking for `instance_id`.
pub fn subtree_contains<N: HitNode>(node: N, instance_id: &str) -> bool {
    let mut cursor = Some(node);
    while let Some(n) = cursor {
        if n.instance_id().as_deref() == Some(instance_id) {
            return true;
        }
        cursor = n.parent();
    }
    false
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Proximity {
    pub influence: f32,
    pub is_directly_over: bool,
}

impl Proximity {
    pub const NONE: Proximity = Proximity {
        influence: 0.0,
        is_directly_over: false,
    };
    pub const OVER: Proximity = Proximity {
        influence: 1.0,
        is_directly_over: true,
    };
}

/// Influence evaluator bound to one element's stable identifier.
#[derive(Clone, Debug)]
pub struct ProximityDetector {
    instance_id: String,
    margin: f32,
    visibility_threshold: f32,
    fallback_opacity: f32,
}

impl ProximityDetector {
    pub fn new(instance_id: impl Into<String>, config: &TiltConfig) -> Self {
        Self {
            instance_id: instance_id.into(),
            margin: config.proximity_margin,
            visibility_threshold: config.visibility_threshold,
            fallback_opacity: config.hit_fallback_opacity,
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn influence<P, H>(&self, probe: &P, hit: &H, point: Vec2) -> Proximity
    where
        P: ElementProbe + ?Sized,
        H: HitTester + ?Sized,
    {
        if !point.is_finite() {
            return Proximity::NONE;
        }
        let vis = probe.visibility();
        if vis.hidden || !(vis.opacity >= self.visibility_threshold) {
            return Proximity::NONE;
        }
        let rect = match probe.bounding_rect() {
            Some(r) if r.has_area() => r,
            _ => return Proximity::NONE,
        };

        if rect.contains(point) {
            let on_top = hit
                .topmost_at(point)
                .map(|node| subtree_contains(node, &self.instance_id))
                .unwrap_or(false);
            if on_top || vis.opacity >= self.fallback_opacity {
                return Proximity::OVER;
            }
            // covered by something else and too faint to trust the rect
            return Proximity::NONE;
        }

        let distance = rect.distance_to(point);
        if distance < self.margin {
            let t = 1.0 - distance / self.margin;
            Proximity {
                influence: t * t,
                is_directly_over: false,
            }
        } else {
            Proximity::NONE
        }
    }
}
