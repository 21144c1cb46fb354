//! Document - High-level document API

use std::collections::HashMap;

use crate::style::CssStyleDeclaration;
use crate::{
    Config, DOMRect, DomTree, ElementGeometry, EventListener, EventTargets, NodeId, Window,
};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    config: Config,
    window: Window,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    events: EventTargets,
    geometry: HashMap<NodeId, ElementGeometry>,
}

impl Document {
    /// Create a new document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        Self::with_config(Config::with_url(url))
    }

    /// Create a document skeleton from a configuration
    pub fn with_config(config: Config) -> Self {
        let mut doc = Self::empty_with_config(config);
        let tree = &mut doc.tree;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh detached nodes under valid parents cannot fail
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        doc.finalize();
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self::empty_with_config(Config::with_url(url))
    }

    pub fn empty_with_config(config: Config) -> Self {
        Self {
            tree: DomTree::new(),
            window: Window::new(&config),
            config,
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            events: EventTargets::new(),
            geometry: HashMap::new(),
        }
    }

    /// Locate html/head/body after the tree was built and apply the
    /// configured document-element metrics
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let find_child = |parent: NodeId, tag: &str| {
            tree.children(parent).find(|&c| tree.tag_name(c) == Some(tag))
        };

        self.html_element = find_child(tree.root(), "html").unwrap_or(NodeId::NONE);
        self.head_element = find_child(self.html_element, "head").unwrap_or(NodeId::NONE);
        self.body_element = find_child(self.html_element, "body").unwrap_or(NodeId::NONE);

        if self.html_element.is_valid() {
            let geometry = self.geometry.entry(self.html_element).or_default();
            geometry.client_top = self.config.document_client_top;
            geometry.client_left = self.config.document_client_left;
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Owning window
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.is_valid().then_some(self.html_element)
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        self.head_element.is_valid().then_some(self.head_element)
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.body_element.is_valid().then_some(self.body_element)
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.head()
            .and_then(|head| {
                self.tree
                    .children(head)
                    .find(|&c| self.tree.tag_name(c) == Some("title"))
            })
            .map(|title| self.tree.text_content(title))
            .unwrap_or_default()
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node| self.tree.get_attribute(node, "id") == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// `addEventListener`; duplicates are ignored
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: EventListener,
        capture: bool,
    ) -> bool {
        self.events.add(node, event_type, listener, capture)
    }

    /// `removeEventListener`
    pub fn remove_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: &EventListener,
        capture: bool,
    ) -> bool {
        self.events.remove(node, event_type, listener, capture)
    }

    pub fn event_targets(&self) -> &EventTargets {
        &self.events
    }

    // ------------------------------------------------------------------
    // Style and geometry
    // ------------------------------------------------------------------

    /// Computed style through the owning window
    pub fn computed_style(&self, node: NodeId) -> Option<CssStyleDeclaration> {
        self.window.get_computed_style(&self.tree, node)
    }

    /// Record layout metrics for an element. Non-elements are ignored.
    pub fn set_geometry(&mut self, node: NodeId, geometry: ElementGeometry) {
        if self.tree.is_element(node) {
            self.geometry.insert(node, geometry);
        }
    }

    /// Metrics for an element; `None` for node kinds without a box
    pub fn geometry(&self, node: NodeId) -> Option<ElementGeometry> {
        if !self.tree.is_element(node) {
            return None;
        }
        Some(self.geometry.get(&node).copied().unwrap_or_default())
    }

    /// `getBoundingClientRect`; `None` when the node has no box
    pub fn bounding_client_rect(&self, node: NodeId) -> Option<DOMRect> {
        self.geometry(node).map(|g| g.bounding_client_rect())
    }

    pub fn offset_width(&self, node: NodeId) -> f64 {
        self.geometry(node).map_or(0.0, |g| g.offset_width)
    }

    pub fn offset_height(&self, node: NodeId) -> f64 {
        self.geometry(node).map_or(0.0, |g| g.offset_height)
    }

    pub fn client_top(&self, node: NodeId) -> f64 {
        self.geometry(node).map_or(0.0, |g| g.client_top)
    }

    pub fn client_left(&self, node: NodeId) -> f64 {
        self.geometry(node).map_or(0.0, |g| g.client_left)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
