// File: crates/elroi-core/src/host.rs
// Summary: Host (DOM-like) collaborator: element capabilities, overlays, and an in-memory host.
// Notes:
// - The core only needs {create element, query size, set position/content, remove by
//   kind, listen for pointer-leave}. Event delivery goes the other way: the host calls
//   `Elroi::handle_event` when the pointer moves or leaves.

use crate::geometry::Point2;
use crate::tooltip::TooltipState;
use crate::types::Size;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Caller-owned element the graph is inserted into.
    Container,
    /// Element hosting the drawing surface.
    Paper,
    Tooltip,
    ErrorBanner,
    /// List of labels for one axis.
    AxisLabels,
    AxisLabel,
    PointFlag,
    PointLabel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Append,
    Prepend,
}

/// Host-side element produced by a drawer (axis labels, flags, point labels).
#[derive(Clone, Debug, PartialEq)]
pub struct Overlay {
    pub kind: ElementKind,
    pub position: Point2,
    pub content: String,
    pub children: Vec<Overlay>,
}

impl Overlay {
    pub fn new(kind: ElementKind, position: Point2, content: impl Into<String>) -> Self {
        Self { kind, position, content: content.into(), children: Vec::new() }
    }

    pub fn with_children(mut self, children: Vec<Overlay>) -> Self {
        self.children = children;
        self
    }
}

pub trait Host {
    fn size(&self, element: ElementId) -> Size;
    fn create_element(&mut self, parent: ElementId, kind: ElementKind, placement: Placement) -> ElementId;
    fn set_content(&mut self, element: ElementId, content: &str);
    fn set_position(&mut self, element: ElementId, position: Point2);
    fn set_width(&mut self, element: ElementId, width: f32);
    /// Remove every element of `kind` below `root`, with its descendants. Returns how many matched.
    fn remove_all(&mut self, root: ElementId, kind: ElementKind) -> usize;
    fn listen_pointer_leave(&mut self, element: ElementId);

    /// Reflect tooltip state onto the tooltip element.
    fn sync_tooltip(&mut self, element: ElementId, state: &TooltipState) {
        self.set_position(element, state.position);
        self.set_content(element, &state.content);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub parent: Option<ElementId>,
    pub kind: ElementKind,
    pub content: String,
    pub position: Point2,
    pub width: Option<f32>,
    pub size: Size,
    pub listens_pointer_leave: bool,
    children: Vec<ElementId>,
}

impl Element {
    pub fn children(&self) -> &[ElementId] { &self.children }
}

/// In-memory element tree. Used headless (tests, PNG export) where no real DOM exists.
#[derive(Clone, Debug, Default)]
pub struct HeadlessHost {
    elements: Vec<Element>,
    next_id: u32,
    /// Sizes applied to newly created elements of a kind, standing in for external CSS.
    styled_sizes: Vec<(ElementKind, Size)>,
}

impl HeadlessHost {
    pub fn new() -> Self { Self::default() }

    /// Give every element of `kind` created from now on a fixed size.
    pub fn with_styled_size(mut self, kind: ElementKind, size: Size) -> Self {
        self.styled_sizes.push((kind, size));
        self
    }

    /// Add a root container of the given size.
    pub fn add_container(&mut self, size: Size) -> ElementId {
        let id = self.alloc(None, ElementKind::Container);
        if let Some(el) = self.get_mut(id) {
            el.size = size;
        }
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |e| e.kind == kind)
    }

    pub fn count(&self, kind: ElementKind) -> usize { self.elements_of(kind).count() }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    fn alloc(&mut self, parent: Option<ElementId>, kind: ElementKind) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        let size = self
            .styled_sizes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, s)| *s)
            .unwrap_or_default();
        self.elements.push(Element {
            id,
            parent,
            kind,
            content: String::new(),
            position: Point2::default(),
            width: None,
            size,
            listens_pointer_leave: false,
            children: Vec::new(),
        });
        id
    }

    fn is_descendant(&self, id: ElementId, root: ElementId) -> bool {
        let mut cur = self.element(id).and_then(|e| e.parent);
        while let Some(p) = cur {
            if p == root { return true; }
            cur = self.element(p).and_then(|e| e.parent);
        }
        false
    }

    fn subtree(&self, id: ElementId, out: &mut Vec<ElementId>) {
        out.push(id);
        if let Some(el) = self.element(id) {
            for &child in &el.children {
                self.subtree(child, out);
            }
        }
    }
}

impl Host for HeadlessHost {
    fn size(&self, element: ElementId) -> Size {
        self.element(element).map(|e| e.size).unwrap_or_default()
    }

    fn create_element(&mut self, parent: ElementId, kind: ElementKind, placement: Placement) -> ElementId {
        let id = self.alloc(Some(parent), kind);
        if let Some(p) = self.get_mut(parent) {
            match placement {
                Placement::Append => p.children.push(id),
                Placement::Prepend => p.children.insert(0, id),
            }
        }
        id
    }

    fn set_content(&mut self, element: ElementId, content: &str) {
        if let Some(el) = self.get_mut(element) {
            el.content = content.to_string();
        }
    }

    fn set_position(&mut self, element: ElementId, position: Point2) {
        if let Some(el) = self.get_mut(element) {
            el.position = position;
        }
    }

    fn set_width(&mut self, element: ElementId, width: f32) {
        if let Some(el) = self.get_mut(element) {
            el.width = Some(width);
        }
    }

    fn remove_all(&mut self, root: ElementId, kind: ElementKind) -> usize {
        let matched: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|e| e.kind == kind && self.is_descendant(e.id, root))
            .map(|e| e.id)
            .collect();

        let mut doomed = Vec::new();
        for &id in &matched {
            self.subtree(id, &mut doomed);
        }
        self.elements.retain(|e| !doomed.contains(&e.id));
        for el in &mut self.elements {
            el.children.retain(|c| !doomed.contains(c));
        }
        matched.len()
    }

    fn listen_pointer_leave(&mut self, element: ElementId) {
        if let Some(el) = self.get_mut(element) {
            el.listens_pointer_leave = true;
        }
    }
}
