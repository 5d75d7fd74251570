// Plain-data stand-ins for the DOM used by the host tests.

#![allow(dead_code)]

use std::rc::Rc;

use folio_core::{ElementProbe, HitNode, HitTester, Rect, Visibility};
use glam::Vec2;

pub fn approx(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

/// A flat node tree: each entry is (instance id, parent index).
#[derive(Clone, Default)]
pub struct FakeTree {
    pub nodes: Vec<(Option<String>, Option<usize>)>,
}

impl FakeTree {
    pub fn push(&mut self, id: Option<&str>, parent: Option<usize>) -> usize {
        self.nodes.push((id.map(str::to_string), parent));
        self.nodes.len() - 1
    }
}

pub struct FakeNode {
    tree: Rc<FakeTree>,
    index: usize,
}

impl FakeNode {
    pub fn new(tree: Rc<FakeTree>, index: usize) -> Self {
        Self { tree, index }
    }
}

impl HitNode for FakeNode {
    fn instance_id(&self) -> Option<String> {
        self.tree.nodes[self.index].0.clone()
    }

    fn parent(&self) -> Option<Self> {
        self.tree.nodes[self.index]
            .1
            .map(|p| FakeNode::new(self.tree.clone(), p))
    }
}

/// One element with a fixed rect plus the node reported by hit-testing.
pub struct FakeElement {
    pub rect: Option<Rect>,
    pub visibility: Visibility,
    pub tree: Rc<FakeTree>,
    pub topmost: Option<usize>,
}

impl FakeElement {
    /// A fully visible element tagged `id` that is always on top.
    pub fn visible(id: &str, rect: Rect) -> Self {
        let mut tree = FakeTree::default();
        let root = tree.push(Some(id), None);
        let child = tree.push(None, Some(root));
        Self {
            rect: Some(rect),
            visibility: Visibility::default(),
            tree: Rc::new(tree),
            topmost: Some(child),
        }
    }
}

impl ElementProbe for FakeElement {
    fn bounding_rect(&self) -> Option<Rect> {
        self.rect
    }

    fn visibility(&self) -> Visibility {
        self.visibility
    }
}

impl HitTester for FakeElement {
    type Node = FakeNode;

    fn topmost_at(&self, _point: Vec2) -> Option<FakeNode> {
        self.topmost.map(|i| FakeNode::new(self.tree.clone(), i))
    }
}
