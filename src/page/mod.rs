//! Page model: a lightweight element arena for one rendered HTML document.
//!
//! The enhancer never touches a live DOM. Instead it owns a [`Page`] scanned
//! from the rendered HTML (see [`scan`]) and mutates that model directly:
//! class toggles, attribute promotion, style updates, node injection. Hosts
//! mirror those mutations into their real document.
//!
//! Node identity is positional: a [`NodeId`] stays valid for the lifetime of
//! the page view (nodes are never removed, only added).

mod scan;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use url::Url;

use crate::error::EnhanceError;

/// Identifier of a node within one [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

/// A single node in the page arena.
#[derive(Debug, Clone)]
pub enum PageNode {
    Element(ElementNode),
    Text(String),
}

/// An element with its mutable presentation state.
#[derive(Debug, Clone)]
pub struct ElementNode {
    /// Lowercased tag name.
    pub tag: String,
    /// Parent element, `None` for top-level nodes.
    pub parent: Option<NodeId>,
    /// Child nodes (elements and text) in document order.
    pub children: Vec<NodeId>,
    attrs: FxHashMap<String, String>,
    classes: SmallVec<[String; 4]>,
    styles: FxHashMap<String, String>,
}

impl ElementNode {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_string(),
            parent,
            children: Vec::new(),
            attrs: FxHashMap::default(),
            classes: SmallVec::new(),
            styles: FxHashMap::default(),
        }
    }

    /// Attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Class list in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Inline style property, if set.
    pub fn style(&self, prop: &str) -> Option<&str> {
        self.styles.get(prop).map(String::as_str)
    }

    pub fn set_style(&mut self, prop: &str, value: &str) {
        self.styles.insert(prop.to_string(), value.to_string());
    }
}

/// One rendered HTML document plus everything the enhancer injected into it.
#[derive(Debug, Clone, Default)]
pub struct Page {
    nodes: Vec<PageNode>,
    roots: Vec<NodeId>,
    body: Option<NodeId>,
    base_url: Option<Url>,
}

impl Page {
    /// Parse a rendered HTML document into a page model.
    ///
    /// `page_url` is the address the document is served from; it anchors
    /// relative links for outbound-host comparison. An unparseable URL is
    /// treated as absent.
    pub fn parse(html: &str, page_url: Option<&str>) -> Result<Self, EnhanceError> {
        let mut page = Self {
            base_url: page_url.and_then(|u| Url::parse(u).ok()),
            ..Self::default()
        };
        scan::parse_into(&mut page, html, None)?;
        let body = page
            .elements()
            .find(|(_, e)| e.tag == "body")
            .map(|(id, _)| id);
        page.body = body;
        Ok(page)
    }

    /// Append an HTML fragment under `<body>` (or at the top level when the
    /// document has none). Returns the ids of the appended top-level nodes.
    ///
    /// This is the model's stand-in for dynamic content injection; follow it
    /// with [`SiteEnhancer::refresh`](crate::SiteEnhancer::refresh) to attach
    /// behaviors to the new elements.
    pub fn append_html(&mut self, html: &str) -> Result<Vec<NodeId>, EnhanceError> {
        let parent = self.body;
        scan::parse_into(self, html, parent)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn node(&self, id: NodeId) -> Option<&PageNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementNode> {
        match self.node(id) {
            Some(PageNode::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementNode> {
        match self.nodes.get_mut(id.0 as usize) {
            Some(PageNode::Element(e)) => Some(e),
            _ => None,
        }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &ElementNode)> {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match n {
            PageNode::Element(e) => Some((NodeId(i as u32), e)),
            PageNode::Text(_) => None,
        })
    }

    /// The `<body>` element, when the document has one.
    pub fn body(&self) -> Option<NodeId> {
        self.body
    }

    /// The address the document is served from.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// First element whose `id` attribute equals `id_value`.
    pub fn find_by_html_id(&self, id_value: &str) -> Option<NodeId> {
        self.elements()
            .find(|(_, e)| e.attr("id") == Some(id_value))
            .map(|(id, _)| id)
    }

    /// First descendant of `root` with the given tag (depth-first).
    pub fn find_descendant(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = match self.element(root) {
            Some(e) => e.children.iter().rev().copied().collect(),
            None => return None,
        };
        while let Some(id) = stack.pop() {
            if let Some(e) = self.element(id) {
                if e.tag == tag {
                    return Some(id);
                }
                stack.extend(e.children.iter().rev().copied());
            }
        }
        None
    }

    /// Nearest element (starting at `id`, walking up) matching `pred`.
    pub fn closest(
        &self,
        id: NodeId,
        pred: impl Fn(&ElementNode) -> bool,
    ) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(cur) = current {
            let elem = self.element(cur)?;
            if pred(elem) {
                return Some(cur);
            }
            current = elem.parent;
        }
        None
    }

    /// Whether `id` is `ancestor` or lies inside it.
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.element(cur).and_then(|e| e.parent);
        }
        false
    }

    /// Concatenated text of all text descendants, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            match self.node(cur) {
                Some(PageNode::Text(t)) => out.push_str(t),
                Some(PageNode::Element(e)) => {
                    stack.extend(e.children.iter().rev().copied());
                }
                None => {}
            }
        }
        out
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Create an element and append it to `parent` (or the top level).
    pub fn create_element(&mut self, parent: Option<NodeId>, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(PageNode::Element(ElementNode::new(tag, parent)));
        self.link_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent` (or the top level).
    pub fn append_text(&mut self, parent: Option<NodeId>, text: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(PageNode::Text(text.to_string()));
        self.link_child(parent, id);
        id
    }

    /// Replace the content of a text node. Returns false for non-text ids.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> bool {
        match self.nodes.get_mut(id.0 as usize) {
            Some(PageNode::Text(t)) => {
                *t = text.to_string();
                true
            }
            _ => false,
        }
    }

    fn link_child(&mut self, parent: Option<NodeId>, id: NodeId) {
        match parent.and_then(|p| self.element_mut(p)) {
            Some(elem) => elem.children.push(id),
            None => self.roots.push(id),
        }
    }
}
