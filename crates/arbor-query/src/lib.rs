//! Structural pseudo-class queries over arbitrary trees.
//!
//! # Scope
//!
//! This crate implements:
//! - **Node adapter contract** ([`NodeAdapter`]) - the navigation primitives a
//!   tree backend supplies: children, typed children, parent, name, content,
//!   attributes, emptiness and root
//!
//! - **Pseudo-class evaluation** ([`PseudoClassEvaluator`]) per
//!   [Selectors Level 3 § 6.6.5](https://www.w3.org/TR/selectors-3/#structural-pseudos)
//!   - `:empty`, `:root`
//!   - `:first-child`, `:last-child`, `:only-child`
//!   - `:first-of-type`, `:last-of-type`, `:only-of-type`
//!
//! - **Chained queries** ([`Query`]) - a type stage plus pseudo-class stages,
//!   each filtering the previous stage's [`CandidateSet`]
//!
//! # Not Implemented
//!
//! - Combinators, attribute, class and ID selectors
//! - `:nth-*` functional pseudo-classes
//! - Specificity and cascade
//! - Live (mutation-tracking) results
//!
//! # Example
//!
//! ```ignore
//! let query = Query::parse("item:last-of-type")?;
//! let matches = query.select(&tree, &tree.root())?;
//! ```

/// The [`NodeAdapter`] contract tree backends implement.
pub mod adapter;
/// Ordered, duplicate-free candidate sets.
pub mod candidate;
/// Adapter and query error types.
pub mod error;
/// Pseudo-class filtering over a [`NodeAdapter`].
pub mod evaluator;
/// Pseudo-class keywords, specifiers and sibling positions.
pub mod pseudo;
/// Compound selector stages chained into a query.
pub mod query;

pub use adapter::{NodeAdapter, UNIVERSAL};
pub use candidate::CandidateSet;
pub use error::{AdapterError, AdapterResult, QueryError, QueryResult};
pub use evaluator::PseudoClassEvaluator;
pub use pseudo::{PositionInfo, PseudoClass, PseudoClassSpecifier};
pub use query::{Query, Stage};
