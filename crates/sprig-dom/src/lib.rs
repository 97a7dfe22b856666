//! Document tree consumed by the Sprig layout engine.
//!
//! The tree is produced by an external parsing and styling pipeline and is
//! read-only to layout. It carries, per node, a tag name (or the `#text`
//! sentinel), literal text for leaves, an optional hyperlink target, ordered
//! children and an optional [`ResolvedStyle`].
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Layout
//! boxes refer back to their source node by `NodeId`, never by reference.

mod style;

pub use style::ResolvedStyle;

use std::collections::HashMap;

use serde::Serialize;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Tag-name sentinel reported for text leaves.
pub const TEXT_TAG: &str = "#text";

/// Tag-name sentinel reported for the document root.
pub const DOCUMENT_TAG: &str = "#document";

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// The document root. Layout treats it like any unclassified wrapper.
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    ///
    /// Comments have no name and never reach layout.
    Comment(String),
}

/// Element-specific data.
///
/// NOTE: We only store the local name, the attribute list and the style
/// record resolved by the styling pass. Namespaces are not modelled.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
    /// Style values resolved before layout runs, if any.
    pub style: Option<ResolvedStyle>,
}

impl ElementData {
    /// Create element data with no attributes and no style.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            ..Self::default()
        }
    }

    /// The hyperlink target carried by this element, if any.
    ///
    /// [§ 4.6.1 Links](https://html.spec.whatwg.org/multipage/links.html#links-created-by-a-and-area-elements)
    /// "The href attribute on a and area elements must have a value that is
    /// a valid URL potentially surrounded by spaces."
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.attrs
            .get("href")
            .map(|href| href.trim())
            .filter(|href| !href.is_empty())
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// All nodes live in one contiguous vector; relationships are [`NodeId`]
/// indices. The Document node is always at index 0.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Allocate an element and append it to `parent`.
    pub fn element(&mut self, parent: NodeId, tag_name: &str) -> NodeId {
        let id = self.alloc(NodeType::Element(ElementData::new(tag_name)));
        self.append_child(parent, id);
        id
    }

    /// Allocate a text leaf and append it to `parent`.
    pub fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.alloc(NodeType::Text(text.to_string()));
        self.append_child(parent, id);
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`. Unknown ids are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return;
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Set an attribute on an element. Non-elements are left untouched.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(NodeType::Element(data)) = self.get_mut(id).map(|n| &mut n.node_type) {
            let _ = data.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Attach a resolved style record to an element. Non-elements are left untouched.
    pub fn set_style(&mut self, id: NodeId, style: ResolvedStyle) {
        if let Some(NodeType::Element(data)) = self.get_mut(id).map(|n| &mut n.node_type) {
            data.style = Some(style);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The name layout classifies this node by.
    ///
    /// Elements report their tag name, text leaves [`TEXT_TAG`] and the
    /// document [`DOCUMENT_TAG`]. Comments, elements with an empty tag name
    /// and unknown ids have no name.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.node_type {
            NodeType::Document => Some(DOCUMENT_TAG),
            NodeType::Element(data) if !data.tag_name.is_empty() => Some(&data.tag_name),
            NodeType::Text(_) => Some(TEXT_TAG),
            NodeType::Element(_) | NodeType::Comment(_) => None,
        }
    }

    /// The hyperlink target carried by this node itself (not inherited).
    #[must_use]
    pub fn href(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).and_then(ElementData::href)
    }

    /// The resolved style record attached to this node, if any.
    #[must_use]
    pub fn style(&self, id: NodeId) -> Option<&ResolvedStyle> {
        self.as_element(id).and_then(|e| e.style.as_ref())
    }

    /// Iterate over `id` and all of its descendants in document order.
    ///
    /// The walk keeps an explicit stack, so arbitrarily deep trees are safe.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.get(id).is_some() { vec![id] } else { Vec::new() };
        Descendants { tree: self, stack }
    }

    /// Split every text node into one text node per whitespace-separated word.
    ///
    /// Only ASCII whitespace separates words; a no-break space stays inside
    /// its word.
    ///
    /// Layout places each text leaf as a single unbreakable run; splitting
    /// beforehand turns its greedy run placement into word wrapping. Text
    /// under a `pre` element keeps its whitespace and is left alone, and
    /// whitespace-only text is kept as is (layout ignores it).
    pub fn split_text_nodes(&mut self) {
        let mut parents = Vec::new();
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            let is_pre = self
                .as_element(id)
                .is_some_and(|e| e.tag_name.eq_ignore_ascii_case("pre"));
            if is_pre {
                continue;
            }
            if node.children.iter().any(|&c| self.as_text(c).is_some()) {
                parents.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }

        for parent in parents {
            let old_children = std::mem::take(&mut self.nodes[parent.0].children);
            let mut new_children = Vec::with_capacity(old_children.len());
            for child in old_children {
                let words: Vec<String> = match self.as_text(child) {
                    Some(text) => text.split_ascii_whitespace().map(str::to_string).collect(),
                    None => Vec::new(),
                };
                if words.is_empty() {
                    new_children.push(child);
                    continue;
                }
                let mut words = words.into_iter();
                if let Some(first) = words.next() {
                    self.nodes[child.0].node_type = NodeType::Text(first);
                    new_children.push(child);
                }
                for word in words {
                    let id = self.alloc(NodeType::Text(word));
                    self.nodes[id.0].parent = Some(parent);
                    new_children.push(id);
                }
            }
            self.nodes[parent.0].children = new_children;
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator returned by [`DomTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
