//! The node-capability contract a tree backend implements.
//!
//! The evaluator never touches tree storage. Every structural question it
//! asks (who are my siblings, who is my parent, am I empty) goes through
//! a [`NodeAdapter`], so a JSON document, an arena DOM or any other tree
//! becomes queryable by implementing this one trait.

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{AdapterError, AdapterResult};

/// Type name that matches every child in [`NodeAdapter::children_of_type`].
pub const UNIVERSAL: &str = "*";

/// Tree-navigation primitives over a backend's node handles.
///
/// Nodes are cheap handles (an index, an `Rc`, a reference) owned by the
/// backend. Adapter calls must not fail for any node reachable through
/// [`children`](Self::children) or [`parent`](Self::parent); a backend that
/// cannot answer an operation at all returns
/// [`AdapterError::UnsupportedOperation`].
pub trait NodeAdapter {
    /// Handle identifying one node of the tree.
    type Node: Clone + Eq + Hash + Debug;

    /// All direct children in document order, empty for a leaf.
    ///
    /// Repeated calls on an unchanged tree return the same sequence.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] if the backend cannot enumerate children.
    fn children(&self, node: &Self::Node) -> AdapterResult<Vec<Self::Node>>;

    /// The parent of `node`, or `None` for the root.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] if the backend cannot resolve the parent.
    fn parent(&self, node: &Self::Node) -> AdapterResult<Option<Self::Node>>;

    /// The node's type or tag identifier.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] if the backend cannot name the node.
    fn name(&self, node: &Self::Node) -> AdapterResult<Cow<'_, str>>;

    /// Textual leaf value, if any.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] if the backend cannot read the content.
    fn content(&self, node: &Self::Node) -> AdapterResult<Option<Cow<'_, str>>>;

    /// Names of the node's attribute-like properties, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns an [`AdapterError`] if the backend cannot list attributes.
    fn attribute_names(&self, node: &Self::Node) -> AdapterResult<Vec<String>>;

    /// Direct children whose [`name`](Self::name) equals `type_name`.
    ///
    /// [`UNIVERSAL`] (`"*"`) matches every child.
    ///
    /// # Errors
    ///
    /// Propagates failures of [`children`](Self::children) and
    /// [`name`](Self::name).
    fn children_of_type(
        &self,
        node: &Self::Node,
        type_name: &str,
    ) -> AdapterResult<Vec<Self::Node>> {
        let children = self.children(node)?;
        if type_name == UNIVERSAL {
            return Ok(children);
        }
        let mut typed = Vec::with_capacity(children.len());
        for child in children {
            if self.name(&child)? == type_name {
                typed.push(child);
            }
        }
        Ok(typed)
    }

    /// Value of a single attribute. `None` when the attribute is absent or
    /// has no value.
    ///
    /// # Errors
    ///
    /// The default implementation reports the operation as unsupported.
    fn attribute(&self, node: &Self::Node, name: &str) -> AdapterResult<Option<Cow<'_, str>>> {
        let _ = (node, name);
        Err(AdapterError::unsupported("attribute"))
    }

    /// Whether `name` is among [`attribute_names`](Self::attribute_names).
    ///
    /// # Errors
    ///
    /// Propagates failures of [`attribute_names`](Self::attribute_names).
    fn has_attribute(&self, node: &Self::Node, name: &str) -> AdapterResult<bool> {
        Ok(self.attribute_names(node)?.iter().any(|n| n == name))
    }

    /// `:empty` semantics: no children and no content.
    ///
    /// Backends whose attributes count as content override this.
    ///
    /// # Errors
    ///
    /// Propagates failures of [`children`](Self::children) and
    /// [`content`](Self::content).
    fn is_empty(&self, node: &Self::Node) -> AdapterResult<bool> {
        Ok(self.children(node)?.is_empty() && self.content(node)?.is_none())
    }

    /// Walk the ancestor chain up to the node with no parent.
    ///
    /// # Errors
    ///
    /// Propagates failures of [`parent`](Self::parent).
    fn root(&self, node: &Self::Node) -> AdapterResult<Self::Node> {
        let mut current = node.clone();
        while let Some(parent) = self.parent(&current)? {
            current = parent;
        }
        Ok(current)
    }

    /// The sibling immediately after `node`.
    ///
    /// # Errors
    ///
    /// The default implementation reports the operation as unsupported.
    fn next_sibling(&self, node: &Self::Node) -> AdapterResult<Option<Self::Node>> {
        let _ = node;
        Err(AdapterError::unsupported("next_sibling"))
    }

    /// Every node below `node` in document order, excluding `node` itself.
    ///
    /// # Errors
    ///
    /// Propagates failures of [`children`](Self::children).
    fn descendants(&self, node: &Self::Node) -> AdapterResult<Vec<Self::Node>> {
        let mut result = Vec::new();
        let mut stack = self.children(node)?;
        stack.reverse();
        while let Some(current) = stack.pop() {
            let mut children = self.children(&current)?;
            children.reverse();
            stack.extend(children);
            result.push(current);
        }
        Ok(result)
    }
}
