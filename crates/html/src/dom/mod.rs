//! Arena-backed DOM.
//!
//! Nodes live in an [`indextree::Arena`]; children are owned in document
//! order and the parent link is a plain index, so ownership only ever flows
//! from the root down.

use indextree::Arena;
use smallvec::SmallVec;

pub use indextree::NodeId;

/// Attributes in source order. Names are unique and lower-cased.
pub type Attributes = SmallVec<[(String, String); 4]>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementData {
    pub tag: String,
    pub attrs: Attributes,
}

impl ElementData {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attributes::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing the value of an existing one in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id").map(str::trim)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|candidate| candidate == class)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Document {
    arena: Arena<NodeKind>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document holding only the synthetic `html` root.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeKind::Element(ElementData::new("html")));
        Self { arena, root }
    }

    #[inline]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.arena.count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let node = self.arena.new_node(NodeKind::Element(data));
        parent.append(node, &mut self.arena);
        node
    }

    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let node = self.arena.new_node(NodeKind::Text(text.into()));
        parent.append(node, &mut self.arena);
        node
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.arena.get(node).map(indextree::Node::get)
    }

    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.kind(node)? {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.kind(node)? {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|data| data.tag.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(name)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node)?.parent()
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.arena)
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.ancestors(&self.arena).skip(1)
    }

    /// `node` and everything below it in pre-order.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.descendants(&self.arena)
    }

    /// Concatenated text of every text node under `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .filter_map(|id| self.text(id))
            .collect()
    }

    /// Elements with the given tag in pre-order.
    pub fn elements_by_tag<'doc>(&'doc self, tag: &'doc str) -> impl Iterator<Item = NodeId> + 'doc {
        self.descendants(self.root)
            .filter(move |id| self.tag(*id) == Some(tag))
    }

    pub fn find_first(&self, tag: &str) -> Option<NodeId> {
        self.elements_by_tag(tag).next()
    }

    /// Nearest strict ancestor with the given tag.
    pub fn closest_ancestor(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.ancestors(node).find(|id| self.tag(*id) == Some(tag))
    }
}
