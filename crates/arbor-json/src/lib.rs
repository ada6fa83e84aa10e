//! JSON document backend for the Arbor query engine.
//!
//! A JSON document is mapped onto a tree the way a selector author would
//! read it:
//!
//! - An object member whose value is an object becomes a child node named
//!   after the member key.
//! - An object member whose value is an array becomes one child per array
//!   element, all named after the key. Primitive elements become leaves
//!   whose content is the primitive's text (`null` has no content).
//! - An object member whose value is a primitive is an attribute.
//!
//! So `{"items": [{"id": 1}, {"id": 2}], "title": "x"}` is a `root` node with
//! attribute `title` and two `items` children, each carrying an `id`
//! attribute. Member order is preserved, so sibling positions follow the
//! document text.

use std::borrow::Cow;

use arbor_common::warning::warn_once;
use arbor_query::{AdapterError, AdapterResult, NodeAdapter};
use serde_json::Value;
use thiserror::Error;

/// Name given to the root node when none is supplied.
pub const DEFAULT_ROOT_NAME: &str = "root";

/// Errors raised while loading a document.
#[derive(Debug, Error)]
pub enum JsonTreeError {
    /// The text is not valid JSON.
    #[error("invalid JSON document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Index of a node within a [`JsonTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonNodeId(pub usize);

impl JsonNodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

#[derive(Debug, Clone)]
struct JsonNode {
    name: String,
    parent: Option<JsonNodeId>,
    children: Vec<JsonNodeId>,
    /// Primitive members in document order, as they appear in the document.
    attributes: Vec<(String, Value)>,
    content: Option<String>,
}

/// An immutable tree snapshot of a JSON document.
#[derive(Debug, Clone)]
pub struct JsonTree {
    nodes: Vec<JsonNode>,
}

impl JsonTree {
    /// Build a tree from an already-parsed value. The root node is named
    /// `root_name`; elements of a top-level array become its children and
    /// share that name.
    #[must_use]
    pub fn from_value(root_name: &str, value: &Value) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        match value {
            Value::Array(elements) => {
                let root = tree.push(root_name, None, None);
                tree.push_elements(root, root_name, elements);
            }
            _ => {
                let _ = tree.push_value(root_name, None, value);
            }
        }
        tree
    }

    /// Parse `text` and build a tree from it.
    ///
    /// # Errors
    ///
    /// Returns [`JsonTreeError::Parse`] if `text` is not valid JSON.
    pub fn parse(root_name: &str, text: &str) -> Result<Self, JsonTreeError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(root_name, &value))
    }

    /// The root node.
    #[must_use]
    pub const fn root_node(&self) -> JsonNodeId {
        JsonNodeId::ROOT
    }

    /// Number of nodes in the tree, at least one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Slash-separated names from the root down to `id`, e.g.
    /// `/root/items/items`. Unknown ids yield an empty string.
    #[must_use]
    pub fn path(&self, id: JsonNodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.nodes.get(c.0)) {
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.iter().rev().fold(String::new(), |mut path, name| {
            path.push('/');
            path.push_str(name);
            path
        })
    }

    fn push(
        &mut self,
        name: &str,
        parent: Option<JsonNodeId>,
        content: Option<String>,
    ) -> JsonNodeId {
        let id = JsonNodeId(self.nodes.len());
        self.nodes.push(JsonNode {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            attributes: Vec::new(),
            content,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    fn push_value(
        &mut self,
        name: &str,
        parent: Option<JsonNodeId>,
        value: &Value,
    ) -> JsonNodeId {
        let Value::Object(members) = value else {
            return self.push(name, parent, primitive_text(value));
        };

        let id = self.push(name, parent, None);
        for (key, member) in members {
            match member {
                Value::Object(_) => {
                    let _ = self.push_value(key, Some(id), member);
                }
                Value::Array(elements) => self.push_elements(id, key, elements),
                _ => self.nodes[id.0]
                    .attributes
                    .push((key.clone(), member.clone())),
            }
        }
        id
    }

    fn push_elements(&mut self, parent: JsonNodeId, name: &str, elements: &[Value]) {
        for element in elements {
            if let Value::Array(nested) = element {
                warn_once(
                    "JSON",
                    &format!("nested array under '{name}' flattened into its parent"),
                );
                self.push_elements(parent, name, nested);
            } else {
                let _ = self.push_value(name, Some(parent), element);
            }
        }
    }

    /// The primitive JSON value of attribute `name`, untouched: numbers stay
    /// numbers and `null` stays `null`. `None` if the attribute is absent or
    /// `id` is not in this document.
    #[must_use]
    pub fn attribute_value(&self, id: JsonNodeId, name: &str) -> Option<&Value> {
        self.nodes
            .get(id.0)?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    fn node(&self, id: JsonNodeId) -> AdapterResult<&JsonNode> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| AdapterError::Backend(format!("node {} is not in this document", id.0)))
    }
}

/// Text form of a primitive; `None` for `null`.
fn primitive_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl NodeAdapter for JsonTree {
    type Node = JsonNodeId;

    fn children(&self, node: &JsonNodeId) -> AdapterResult<Vec<JsonNodeId>> {
        Ok(self.node(*node)?.children.clone())
    }

    fn parent(&self, node: &JsonNodeId) -> AdapterResult<Option<JsonNodeId>> {
        Ok(self.node(*node)?.parent)
    }

    fn name(&self, node: &JsonNodeId) -> AdapterResult<Cow<'_, str>> {
        Ok(Cow::Borrowed(self.node(*node)?.name.as_str()))
    }

    fn content(&self, node: &JsonNodeId) -> AdapterResult<Option<Cow<'_, str>>> {
        Ok(self.node(*node)?.content.as_deref().map(Cow::Borrowed))
    }

    fn attribute_names(&self, node: &JsonNodeId) -> AdapterResult<Vec<String>> {
        Ok(self
            .node(*node)?
            .attributes
            .iter()
            .map(|(key, _)| key.clone())
            .collect())
    }

    fn attribute(&self, node: &JsonNodeId, name: &str) -> AdapterResult<Option<Cow<'_, str>>> {
        Ok(self
            .node(*node)?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| match value {
                Value::Null => None,
                Value::String(s) => Some(Cow::Borrowed(s.as_str())),
                other => Some(Cow::Owned(other.to_string())),
            }))
    }

    /// An object carrying primitive members is not empty, even without
    /// children.
    fn is_empty(&self, node: &JsonNodeId) -> AdapterResult<bool> {
        let node = self.node(*node)?;
        Ok(node.children.is_empty() && node.content.is_none() && node.attributes.is_empty())
    }

    fn next_sibling(&self, node: &JsonNodeId) -> AdapterResult<Option<JsonNodeId>> {
        let Some(parent) = self.node(*node)?.parent else {
            return Ok(None);
        };
        let siblings = &self.node(parent)?.children;
        Ok(siblings
            .iter()
            .position(|sibling| sibling == node)
            .and_then(|index| siblings.get(index + 1))
            .copied())
    }
}
