//! Minimal vector-backed tree used to exercise the evaluator.

use std::borrow::Cow;

use arbor_query::{AdapterError, AdapterResult, NodeAdapter};

/// One node of a [`TestTree`].
#[derive(Debug, Clone)]
pub struct TestNode {
    pub name: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub content: Option<String>,
}

/// Tree whose node handles are indices into a vector.
#[derive(Debug, Clone, Default)]
pub struct TestTree {
    nodes: Vec<TestNode>,
}

impl TestTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node named `name` under `parent` (or as a new root).
    pub fn add(&mut self, parent: Option<usize>, name: &str) -> usize {
        let id = self.nodes.len();
        self.nodes.push(TestNode {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            content: None,
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    /// Add a leaf carrying text content.
    pub fn add_text(&mut self, parent: Option<usize>, name: &str, content: &str) -> usize {
        let id = self.add(parent, name);
        self.nodes[id].content = Some(content.to_string());
        id
    }

    /// Remove `child` from its parent's list without clearing its parent
    /// pointer, producing an inconsistent backend.
    pub fn orphan_in_parent_list(&mut self, child: usize) {
        if let Some(parent) = self.nodes[child].parent {
            self.nodes[parent].children.retain(|&c| c != child);
        }
    }
}

impl NodeAdapter for TestTree {
    type Node = usize;

    fn children(&self, node: &usize) -> AdapterResult<Vec<usize>> {
        Ok(self.nodes[*node].children.clone())
    }

    fn parent(&self, node: &usize) -> AdapterResult<Option<usize>> {
        Ok(self.nodes[*node].parent)
    }

    fn name(&self, node: &usize) -> AdapterResult<Cow<'_, str>> {
        Ok(Cow::Borrowed(self.nodes[*node].name.as_str()))
    }

    fn content(&self, node: &usize) -> AdapterResult<Option<Cow<'_, str>>> {
        Ok(self.nodes[*node].content.as_deref().map(Cow::Borrowed))
    }

    fn attribute_names(&self, _node: &usize) -> AdapterResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Wraps a [`TestTree`] but cannot enumerate children.
#[derive(Debug)]
pub struct NoChildren(pub TestTree);

impl NodeAdapter for NoChildren {
    type Node = usize;

    fn children(&self, _node: &usize) -> AdapterResult<Vec<usize>> {
        Err(AdapterError::unsupported("children"))
    }

    fn parent(&self, node: &usize) -> AdapterResult<Option<usize>> {
        self.0.parent(node)
    }

    fn name(&self, node: &usize) -> AdapterResult<Cow<'_, str>> {
        self.0.name(node)
    }

    fn content(&self, node: &usize) -> AdapterResult<Option<Cow<'_, str>>> {
        self.0.content(node)
    }

    fn attribute_names(&self, node: &usize) -> AdapterResult<Vec<String>> {
        self.0.attribute_names(node)
    }
}

/// `A(children: B, C, D)`, all children named `item`.
pub fn three_items() -> (TestTree, [usize; 4]) {
    let mut tree = TestTree::new();
    let a = tree.add(None, "list");
    let b = tree.add(Some(a), "item");
    let c = tree.add(Some(a), "item");
    let d = tree.add(Some(a), "item");
    (tree, [a, b, c, d])
}

/// `p(a, b, a, b, c)` with distinct type names, plus a text leaf under
/// the last child.
pub fn mixed_types() -> (TestTree, Vec<usize>) {
    let mut tree = TestTree::new();
    let p = tree.add(None, "p");
    let a1 = tree.add(Some(p), "a");
    let b1 = tree.add(Some(p), "b");
    let a2 = tree.add(Some(p), "a");
    let b2 = tree.add(Some(p), "b");
    let c1 = tree.add(Some(p), "c");
    let t = tree.add_text(Some(c1), "t", "x");
    (tree, vec![p, a1, b1, a2, b2, c1, t])
}
