//! Ordered, duplicate-free node sets passed between query stages.

use std::collections::HashSet;
use std::hash::Hash;

/// The working set of nodes a selector stage filters.
///
/// Insertion order is preserved so results are deterministic; inserting a
/// node that is already present is a no-op.
#[derive(Debug, Clone)]
pub struct CandidateSet<N> {
    order: Vec<N>,
    seen: HashSet<N>,
}

impl<N: Clone + Eq + Hash> CandidateSet<N> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Create an empty set with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Add `node` at the end unless it is already present.
    ///
    /// Returns `true` if the node was newly inserted.
    pub fn insert(&mut self, node: N) -> bool {
        if self.seen.contains(&node) {
            return false;
        }
        let _ = self.seen.insert(node.clone());
        self.order.push(node);
        true
    }

    /// Whether `node` is a member.
    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.seen.contains(node)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the set has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.order.iter()
    }

    /// First node in insertion order.
    #[must_use]
    pub fn first(&self) -> Option<&N> {
        self.order.first()
    }

    /// Nodes as a slice in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[N] {
        &self.order
    }

    /// Whether every member of `self` is also in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.order.iter().all(|node| other.contains(node))
    }

    /// Members of `self` that are also in `other`, in `self`'s order.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        self.order
            .iter()
            .filter(|node| other.contains(node))
            .cloned()
            .collect()
    }

    /// Consume the set, returning nodes in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<N> {
        self.order
    }
}

impl<N: Clone + Eq + Hash> Default for CandidateSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two sets are equal when they hold the same nodes in the same order.
impl<N: Eq + Hash> PartialEq for CandidateSet<N> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl<N: Eq + Hash> Eq for CandidateSet<N> {}

impl<N: Clone + Eq + Hash> FromIterator<N> for CandidateSet<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<N: Clone + Eq + Hash> Extend<N> for CandidateSet<N> {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        for node in iter {
            let _ = self.insert(node);
        }
    }
}

impl<N> IntoIterator for CandidateSet<N> {
    type Item = N;
    type IntoIter = std::vec::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

impl<'a, N> IntoIterator for &'a CandidateSet<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}
