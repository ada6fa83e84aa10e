//! Structural pseudo-class evaluation in terms of [`NodeAdapter`] calls.
//!
//! [Selectors Level 3 § 6.6.5](https://www.w3.org/TR/selectors-3/#structural-pseudos)
//! "Selectors introduces the concept of structural pseudo-classes to permit
//! selection based on extra information that lies in the document tree but
//! cannot be represented by other simple selectors or combinators."
//!
//! Every evaluation is a filter over a candidate set. Positions are
//! recomputed from the parent's child list for each candidate, so results
//! stay correct even if the backend mutates between queries.

use arbor_common::warning::warn_once;

use crate::adapter::NodeAdapter;
use crate::candidate::CandidateSet;
use crate::error::QueryResult;
use crate::pseudo::{PositionInfo, PseudoClass, PseudoClassSpecifier};

/// Filters candidate sets by structural pseudo-class.
///
/// The evaluator holds no per-query state; the only configuration is an
/// optional scope node used as the reference point for `:root`.
#[derive(Debug)]
pub struct PseudoClassEvaluator<'a, A: NodeAdapter> {
    adapter: &'a A,
    scope: Option<A::Node>,
}

impl<'a, A: NodeAdapter> PseudoClassEvaluator<'a, A> {
    /// Create an evaluator over `adapter` with no explicit scope.
    #[must_use]
    pub const fn new(adapter: &'a A) -> Self {
        Self {
            adapter,
            scope: None,
        }
    }

    /// Use `scope` instead of the first candidate as the node `:root`
    /// ascends from.
    #[must_use]
    pub fn with_scope(mut self, scope: A::Node) -> Self {
        self.scope = Some(scope);
        self
    }

    /// The adapter this evaluator queries.
    #[must_use]
    pub const fn adapter(&self) -> &'a A {
        self.adapter
    }

    /// Decode `specifier` and evaluate it against `nodes`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnsupportedPseudoClass`](crate::QueryError::UnsupportedPseudoClass)
    /// before touching the tree if the keyword is unknown, and propagates
    /// adapter failures.
    pub fn check(
        &self,
        specifier: &PseudoClassSpecifier,
        nodes: &CandidateSet<A::Node>,
    ) -> QueryResult<CandidateSet<A::Node>> {
        let pseudo = specifier.pseudo_class()?;
        self.evaluate(pseudo, nodes)
    }

    /// Return the members of `nodes` matching `pseudo`, in input order.
    ///
    /// The result is a subset of `nodes` for every pseudo-class except
    /// [`PseudoClass::Root`], which yields the root of the scope node (or of
    /// the first candidate when no scope is set) whether or not the root was
    /// a candidate. An empty input always yields an empty result.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures; no partial result is returned.
    pub fn evaluate(
        &self,
        pseudo: PseudoClass,
        nodes: &CandidateSet<A::Node>,
    ) -> QueryResult<CandidateSet<A::Node>> {
        let result = match pseudo {
            PseudoClass::Root => self.root_of_scope(nodes)?,
            _ => {
                let mut kept = CandidateSet::with_capacity(nodes.len());
                for node in nodes {
                    if self.matches(pseudo, node)? {
                        let _ = kept.insert(node.clone());
                    }
                }
                kept
            }
        };

        #[cfg(feature = "eval-trace")]
        eprintln!("[eval] :{pseudo} {} -> {}", nodes.len(), result.len());

        Ok(result)
    }

    /// Whether a single node satisfies `pseudo`.
    ///
    /// For [`PseudoClass::Root`] this asks whether `node` has no parent.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures.
    pub fn matches(&self, pseudo: PseudoClass, node: &A::Node) -> QueryResult<bool> {
        Ok(match pseudo {
            PseudoClass::Empty => self.adapter.is_empty(node)?,
            PseudoClass::Root => self.adapter.parent(node)?.is_none(),
            PseudoClass::FirstChild | PseudoClass::FirstOfType => self
                .position_in_parent(node, pseudo.is_typed())?
                .is_some_and(PositionInfo::is_first),
            PseudoClass::LastChild | PseudoClass::LastOfType => self
                .position_in_parent(node, pseudo.is_typed())?
                .is_some_and(PositionInfo::is_last),
            PseudoClass::OnlyChild | PseudoClass::OnlyOfType => self
                .position_in_parent(node, pseudo.is_typed())?
                .is_some_and(PositionInfo::is_only),
        })
    }

    /// Position of `node` among its parent's children, or among the
    /// children sharing its name when `by_type` is set.
    ///
    /// Returns `None` for a parentless node: its sibling set is empty, so no
    /// positional pseudo-class can match it.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures.
    pub fn position_in_parent(
        &self,
        node: &A::Node,
        by_type: bool,
    ) -> QueryResult<Option<PositionInfo>> {
        let Some(parent) = self.adapter.parent(node)? else {
            return Ok(None);
        };

        let siblings = if by_type {
            let name = self.adapter.name(node)?;
            self.adapter.children_of_type(&parent, &name)?
        } else {
            self.adapter.children(&parent)?
        };

        let Some(index) = siblings.iter().position(|sibling| sibling == node) else {
            warn_once(
                "Query",
                "node is missing from its parent's children; treating it as parentless",
            );
            return Ok(None);
        };

        Ok(Some(PositionInfo {
            index,
            size: siblings.len(),
        }))
    }

    /// [§ 6.6.5.1 :root](https://www.w3.org/TR/selectors-3/#root-pseudo)
    ///
    /// The root reached by ascending from the scope node, or from the first
    /// candidate when no scope is set.
    fn root_of_scope(&self, nodes: &CandidateSet<A::Node>) -> QueryResult<CandidateSet<A::Node>> {
        let mut result = CandidateSet::new();
        if nodes.is_empty() {
            return Ok(result);
        }
        if let Some(reference) = self.scope.as_ref().or_else(|| nodes.first()) {
            let _ = result.insert(self.adapter.root(reference)?);
        }
        Ok(result)
    }
}
