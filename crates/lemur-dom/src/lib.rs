//! Arena-based attributed tree for UI hierarchy snapshots.
//!
//! This crate provides the tree abstraction the selector engine queries:
//! a hierarchy dump (e.g. an Android accessibility snapshot) parsed into
//! element nodes carrying a tag name and an ordered attribute list.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. Parent links are plain indices into the arena, so
//! parent and children never own each other.

pub mod bounds;

/// Attribute holding the element's `resource-id`, checked first when
/// resolving `#id` selectors.
pub const RESOURCE_ID_ATTR: &str = "resource-id";

/// Fallback attribute for `#id` selectors when [`RESOURCE_ID_ATTR`] is
/// empty or absent.
pub const ID_ATTR: &str = "id";

/// Attribute holding the whitespace-separated class list.
pub const CLASS_ATTR: &str = "class";

/// A type-safe index into the hierarchy tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues. Ids are only meaningful for the tree that allocated them; a
/// stale or foreign id resolves to nothing rather than panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A single node in the hierarchy.
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction. Sibling order is the document order of
/// children under the same parent.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is; only elements carry attributes.
    pub kind: NodeKind,

    /// The parent node, or `None` for the document node. A non-owning
    /// back-reference: the arena owns all nodes.
    pub parent: Option<NodeId>,

    /// Children in document order.
    pub children: Vec<NodeId>,

    /// The node immediately following this one among its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately preceding this one among its parent's children.
    pub prev_sibling: Option<NodeId>,
}

/// The kind of a hierarchy node.
///
/// Selectors only ever match [`NodeKind::Element`]; text and comment nodes
/// exist so that sibling navigation can skip them the way a real dump
/// requires.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The synthetic root that holds the top-level element of the dump.
    Document,
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// Character data between elements. Never selector-matchable.
    Text(String),
    /// A comment. Never selector-matchable.
    Comment(String),
}

/// An attribute name/value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name, matched case-sensitively.
    pub name: String,
    /// The attribute value.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// Insertion-ordered attribute list with case-sensitive name lookup.
///
/// Hierarchy dumps carry a handful of attributes per node, so lookup is a
/// linear scan over a `Vec` rather than a hash map; this keeps the document
/// order of attributes observable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<Attribute>,
}

impl AttributeMap {
    /// Create an empty attribute map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Look up an attribute value by exact, case-sensitive name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Whether an attribute with this exact name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|attr| attr.name == name)
    }

    /// Set an attribute, replacing the value in place if the name already
    /// exists and appending otherwise.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => value.clone_into(&mut attr.value),
            None => self
                .entries
                .push(Attribute::new(name.to_string(), value.to_string())),
        }
    }

    /// Iterate over attributes in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.entries.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, String)> for AttributeMap {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.set(&name, &value);
        }
        map
    }
}

/// Element-specific data: tag name plus ordered attributes.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's tag name, matched case-sensitively by type selectors.
    pub tag_name: String,
    /// The element's attribute list in document order.
    pub attrs: AttributeMap,
}

impl ElementData {
    /// Look up an attribute value by exact name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Resolve the element's identifier for `#id` selectors: the
    /// [`RESOURCE_ID_ATTR`] value when present and non-empty, otherwise the
    /// plain [`ID_ATTR`] value.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self.attrs.get(RESOURCE_ID_ATTR) {
            Some(value) if !value.is_empty() => Some(value),
            _ => self.attrs.get(ID_ATTR),
        }
    }

    /// The set of class names from the class attribute, split on runs of
    /// whitespace.
    #[must_use]
    pub fn classes(&self) -> std::collections::HashSet<&str> {
        match self.attrs.get(CLASS_ATTR) {
            Some(list) => list.split_ascii_whitespace().collect(),
            None => std::collections::HashSet::new(),
        }
    }
}

/// Arena-based hierarchy tree with O(1) node access and traversal.
///
/// All nodes live in a contiguous vector indexed by [`NodeId`]; the
/// synthetic document node occupies index 0. Relationships are stored as
/// indices in both directions, so walking up (ancestors), down (children),
/// or sideways (siblings) never needs to re-derive anything.
#[derive(Debug, Clone)]
pub struct UiTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
}

impl UiTree {
    /// Create a new tree holding just the document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        UiTree {
            nodes: vec![document],
        }
    }

    /// The document node's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of nodes in the tree, document node included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (never true: the document node always
    /// exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its id. The node is not yet attached
    /// to the tree.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Append `child` as the last child of `parent`, updating parent and
    /// sibling links on both sides.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// The parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// All children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// The last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// The next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// The previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate over all ancestors of a node, from parent to the document
    /// node.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over preceding siblings, from immediately before outward to
    /// the first child.
    #[must_use]
    pub fn preceding_siblings(&self, id: NodeId) -> PrecedingSiblingIterator<'_> {
        PrecedingSiblingIterator {
            tree: self,
            current: self.prev_sibling(id),
        }
    }

    /// Iterate over following siblings, from immediately after onward to
    /// the last child.
    #[must_use]
    pub fn following_siblings(&self, id: NodeId) -> FollowingSiblingIterator<'_> {
        FollowingSiblingIterator {
            tree: self,
            current: self.next_sibling(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The root element of the dump: the first element child of the
    /// document node (for an Android snapshot, the `<hierarchy>` element).
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }
}

impl Default for UiTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a UiTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over preceding siblings of a node.
pub struct PrecedingSiblingIterator<'a> {
    tree: &'a UiTree,
    current: Option<NodeId>,
}

impl Iterator for PrecedingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.prev_sibling(id);
        Some(id)
    }
}

/// Iterator over following siblings of a node.
pub struct FollowingSiblingIterator<'a> {
    tree: &'a UiTree,
    current: Option<NodeId>,
}

impl Iterator for FollowingSiblingIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.next_sibling(id);
        Some(id)
    }
}
