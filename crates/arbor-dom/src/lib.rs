//! DOM tree backend for the Arbor query engine.
//!
//! This crate provides an arena-based DOM tree following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/) and implements
//! [`NodeAdapter`] for it.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.
//!
//! The adapter is element-centric, as selectors are: only element children
//! count as siblings, and the document element is the adapter's root.

use std::borrow::Cow;
use std::collections::HashMap;

use arbor_query::{AdapterError, AdapterResult, NodeAdapter};
use thiserror::Error;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Errors raised by tree mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The id does not belong to this tree.
    #[error("node {0} is not in this tree")]
    NodeNotFound(usize),

    /// [HierarchyRequestError](https://webidl.spec.whatwg.org/#hierarchyrequesterror):
    /// the insertion would create a cycle or move the document.
    #[error("cannot insert {child:?} under {parent:?}")]
    HierarchyRequest {
        /// The would-be parent.
        parent: NodeId,
        /// The node being inserted.
        child: NodeId,
    },
}

/// A type-safe index into the DOM tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node document... and parent (null or an element)."
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

/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// Element-specific data.
///
/// NOTE: Only the local name and attributes are stored; namespaces are not
/// modelled.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// An element with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(name.into(), value.into());
        self
    }
}

/// Arena-based DOM tree.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
/// "The DOM represents a document as a tree."
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
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

    /// Get the document node ID.
    #[must_use]
    pub const fn document(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, including the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node and return its ID.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if either id is not in this tree,
    /// and [`DomError::HierarchyRequest`] if the insertion would make a node
    /// its own ancestor or move the document node.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.ensure_pre_insertion_validity(parent, child)?;
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(child.0) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity)
    ///
    /// "If node is a host-including inclusive ancestor of parent, then throw a
    /// "HierarchyRequestError" DOMException."
    fn ensure_pre_insertion_validity(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        for id in [parent, child] {
            if self.get(id).is_none() {
                return Err(DomError::NodeNotFound(id.0));
            }
        }
        if child == NodeId::ROOT || parent == child || self.is_descendant_of(parent, child) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `child` from `parent`. Does nothing if `child` is not a child
    /// of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) == Some(parent) {
            self.detach(child);
        }
    }

    fn detach(&mut self, child: NodeId) {
        let Some(old_parent) = self.nodes.get_mut(child.0).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(old_parent.0) {
            node.children.retain(|&c| c != child);
        }
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Allocate an element and append it to `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if `parent` is not in this tree.
    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> Result<NodeId, DomError> {
        self.append_new(parent, NodeType::Element(data))
    }

    /// Allocate a text node and append it to `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if `parent` is not in this tree.
    pub fn append_text(
        &mut self,
        parent: NodeId,
        text: impl Into<String>,
    ) -> Result<NodeId, DomError> {
        self.append_new(parent, NodeType::Text(text.into()))
    }

    /// Allocate a comment node and append it to `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if `parent` is not in this tree.
    pub fn append_comment(
        &mut self,
        parent: NodeId,
        text: impl Into<String>,
    ) -> Result<NodeId, DomError> {
        self.append_new(parent, NodeType::Comment(text.into()))
    }

    fn append_new(&mut self, parent: NodeId, node_type: NodeType) -> Result<NodeId, DomError> {
        if self.get(parent).is_none() {
            return Err(DomError::NodeNotFound(parent.0));
        }
        let id = self.alloc(node_type);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Get the parent of a node, including the document.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, of every node type.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
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

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(NodeId::ROOT).next()
    }

    fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.as_element(c).is_some())
    }

    /// The element-centric [`NodeAdapter`] over this tree.
    #[must_use]
    pub const fn elements(&self) -> ElementView<'_> {
        ElementView { tree: self }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Element-centric view of a [`DomTree`], the tree's [`NodeAdapter`].
///
/// - `children` lists element children only.
/// - The document element has no parent; the document node sits outside the
///   element tree, so `:root` selects the document element. Adapter calls on
///   the document node itself fail with [`AdapterError::Backend`].
/// - `content` is the direct text of a node, `None` when it is only
///   whitespace; comments never count.
#[derive(Debug, Clone, Copy)]
pub struct ElementView<'a> {
    tree: &'a DomTree,
}

impl<'a> ElementView<'a> {
    /// The underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &'a DomTree {
        self.tree
    }

    /// Resolve `id`, rejecting ids outside the tree and the document node,
    /// which is not part of the element view.
    fn node(&self, id: NodeId) -> AdapterResult<&'a Node> {
        let node = self
            .tree
            .get(id)
            .ok_or_else(|| AdapterError::Backend(format!("node {} is not in this tree", id.0)))?;
        if matches!(node.node_type, NodeType::Document) {
            return Err(AdapterError::Backend(
                "the document node is outside the element view; query from the document element"
                    .to_string(),
            ));
        }
        Ok(node)
    }
}

impl NodeAdapter for ElementView<'_> {
    type Node = NodeId;

    fn children(&self, node: &NodeId) -> AdapterResult<Vec<NodeId>> {
        let _ = self.node(*node)?;
        Ok(self.tree.element_children(*node).collect())
    }

    fn parent(&self, node: &NodeId) -> AdapterResult<Option<NodeId>> {
        Ok(self
            .node(*node)?
            .parent
            .filter(|&p| self.tree.as_element(p).is_some()))
    }

    fn name(&self, node: &NodeId) -> AdapterResult<Cow<'_, str>> {
        Ok(match &self.node(*node)?.node_type {
            NodeType::Element(data) if data.tag_name.bytes().any(|b| b.is_ascii_uppercase()) => {
                Cow::Owned(data.tag_name.to_ascii_lowercase())
            }
            NodeType::Element(data) => Cow::Borrowed(data.tag_name.as_str()),
            NodeType::Document => Cow::Borrowed("#document"),
            NodeType::Text(_) => Cow::Borrowed("#text"),
            NodeType::Comment(_) => Cow::Borrowed("#comment"),
        })
    }

    fn content(&self, node: &NodeId) -> AdapterResult<Option<Cow<'_, str>>> {
        let text = match &self.node(*node)?.node_type {
            NodeType::Text(text) => Cow::Borrowed(text.as_str()),
            NodeType::Comment(_) | NodeType::Document => return Ok(None),
            NodeType::Element(_) => {
                let texts: Vec<&str> = self
                    .tree
                    .children(*node)
                    .iter()
                    .filter_map(|&c| self.tree.as_text(c))
                    .collect();
                match texts.as_slice() {
                    [] => return Ok(None),
                    [single] => Cow::Borrowed(*single),
                    _ => Cow::Owned(texts.concat()),
                }
            }
        };
        Ok((!text.trim().is_empty()).then_some(text))
    }

    fn attribute_names(&self, node: &NodeId) -> AdapterResult<Vec<String>> {
        let _ = self.node(*node)?;
        let mut names: Vec<String> = self
            .tree
            .as_element(*node)
            .map(|e| e.attrs.keys().cloned().collect())
            .unwrap_or_default();
        names.sort_unstable();
        Ok(names)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> AdapterResult<Option<Cow<'_, str>>> {
        let _ = self.node(*node)?;
        Ok(self
            .tree
            .as_element(*node)
            .and_then(|e| e.attrs.get(name))
            .map(|v| Cow::Borrowed(v.as_str())))
    }

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    /// restricted to elements, like
    /// [`nextElementSibling`](https://dom.spec.whatwg.org/#dom-nondocumenttypechildnode-nextelementsibling).
    fn next_sibling(&self, node: &NodeId) -> AdapterResult<Option<NodeId>> {
        let Some(parent) = self.parent(node)? else {
            return Ok(None);
        };
        Ok(self
            .tree
            .element_children(parent)
            .skip_while(|&c| c != *node)
            .nth(1))
    }
}
