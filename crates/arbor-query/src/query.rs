//! Chained selector stages.
//!
//! A [`Query`] is a compound selector such as `item:first-child:empty`:
//! an optional type stage followed by pseudo-class stages. Each stage
//! filters the output of the previous one, mirroring how CSS refines a
//! selection one simple selector at a time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::adapter::{NodeAdapter, UNIVERSAL};
use crate::candidate::CandidateSet;
use crate::error::{QueryError, QueryResult};
use crate::evaluator::PseudoClassEvaluator;
use crate::pseudo::PseudoClass;

/// One filtering step of a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// [§ 6.1 Type selector](https://www.w3.org/TR/selectors-3/#type-selectors)
    /// Keep nodes whose name equals the given name; `*` keeps every node.
    Type(String),

    /// Keep nodes satisfying a structural pseudo-class.
    PseudoClass(PseudoClass),
}

impl Stage {
    /// Run this stage over `nodes`.
    ///
    /// Unlike [`PseudoClassEvaluator::evaluate`], a `:root` stage never
    /// introduces a node: the root is kept only if it was already a
    /// candidate.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures.
    pub fn apply<A: NodeAdapter>(
        &self,
        evaluator: &PseudoClassEvaluator<'_, A>,
        nodes: &CandidateSet<A::Node>,
    ) -> QueryResult<CandidateSet<A::Node>> {
        match self {
            Self::Type(name) if name == UNIVERSAL => Ok(nodes.clone()),
            Self::Type(name) => {
                let adapter = evaluator.adapter();
                let mut kept = CandidateSet::with_capacity(nodes.len());
                for node in nodes {
                    if adapter.name(node)? == name.as_str() {
                        let _ = kept.insert(node.clone());
                    }
                }
                Ok(kept)
            }
            Self::PseudoClass(PseudoClass::Root) => Ok(evaluator
                .evaluate(PseudoClass::Root, nodes)?
                .intersection(nodes)),
            Self::PseudoClass(pseudo) => evaluator.evaluate(*pseudo, nodes),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => f.write_str(name),
            Self::PseudoClass(pseudo) => write!(f, ":{pseudo}"),
        }
    }
}

/// A sequence of stages evaluated left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    stages: Vec<Stage>,
}

impl Query {
    /// An empty query, which keeps every candidate.
    #[must_use]
    pub const fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a type stage.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.stages.push(Stage::Type(name.into()));
        self
    }

    /// Append a pseudo-class stage.
    #[must_use]
    pub fn with_pseudo_class(mut self, pseudo: PseudoClass) -> Self {
        self.stages.push(Stage::PseudoClass(pseudo));
        self
    }

    /// The stages in evaluation order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Parse a compound selector: an optional type name (or `*`) followed by
    /// any number of `:keyword` pseudo-classes, e.g. `row:last-of-type:empty`.
    ///
    /// Combinators, attribute, class and ID selectors are not accepted.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidQuery`] for anything outside that form and
    /// [`QueryError::UnsupportedPseudoClass`] for unknown keywords.
    pub fn parse(raw: &str) -> QueryResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::InvalidQuery(raw.to_string()));
        }

        let mut parts = trimmed.split(':');
        let mut query = Self::new();

        // The text before the first colon is the type stage, possibly empty.
        let head = parts.next().unwrap_or_default();
        if head == UNIVERSAL || is_identifier(head) {
            query.stages.push(Stage::Type(head.to_string()));
        } else if !head.is_empty() {
            return Err(QueryError::InvalidQuery(raw.to_string()));
        }

        for keyword in parts {
            if !is_identifier(keyword) {
                return Err(QueryError::InvalidQuery(raw.to_string()));
            }
            query
                .stages
                .push(Stage::PseudoClass(PseudoClass::parse(keyword)?));
        }

        Ok(query)
    }

    /// Run every stage in order over `nodes`.
    ///
    /// # Errors
    ///
    /// Propagates the first stage failure; no partial result is returned.
    pub fn filter<A: NodeAdapter>(
        &self,
        evaluator: &PseudoClassEvaluator<'_, A>,
        nodes: CandidateSet<A::Node>,
    ) -> QueryResult<CandidateSet<A::Node>> {
        let mut current = nodes;
        for stage in &self.stages {
            if current.is_empty() {
                break;
            }
            current = stage.apply(evaluator, &current)?;
        }
        Ok(current)
    }

    /// Evaluate against `root` and all of its descendants, in document order.
    ///
    /// `root` also scopes `:root`.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures.
    pub fn select<A: NodeAdapter>(
        &self,
        adapter: &A,
        root: &A::Node,
    ) -> QueryResult<CandidateSet<A::Node>> {
        let mut candidates = CandidateSet::new();
        let _ = candidates.insert(root.clone());
        candidates.extend(adapter.descendants(root)?);

        let evaluator = PseudoClassEvaluator::new(adapter).with_scope(root.clone());
        self.filter(&evaluator, candidates)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stage in &self.stages {
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// [§ 4.3.10 ident](https://www.w3.org/TR/css-syntax-3/#ident-token-diagram)
/// restricted to the characters a type name or keyword can contain here.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '-' || !c.is_ascii())
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-' || !c.is_ascii())
}
