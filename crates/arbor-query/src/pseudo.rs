//! Structural pseudo-class keywords and the specifier values that carry them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::QueryError;

/// The eight structural pseudo-classes the evaluator understands.
///
/// Keywords decode once, at selector-parse time, so evaluation dispatches
/// over a closed set instead of comparing strings.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PseudoClass {
    /// [`:empty`](https://www.w3.org/TR/selectors-3/#empty-pseudo)
    /// "The :empty pseudo-class represents an element that has no children at all."
    Empty,

    /// [`:first-child`](https://www.w3.org/TR/selectors-3/#first-child-pseudo)
    /// "The :first-child pseudo-class represents an element that is the first
    /// child of some other element."
    FirstChild,

    /// [`:first-of-type`](https://www.w3.org/TR/selectors-3/#first-of-type-pseudo)
    /// "The :first-of-type pseudo-class represents an element that is the first
    /// sibling of its type in the list of children of its parent element."
    FirstOfType,

    /// [`:last-child`](https://www.w3.org/TR/selectors-3/#last-child-pseudo)
    /// "The :last-child pseudo-class represents an element that is the last
    /// child of some other element."
    LastChild,

    /// [`:last-of-type`](https://www.w3.org/TR/selectors-3/#last-of-type-pseudo)
    /// "The :last-of-type pseudo-class represents an element that is the last
    /// sibling of its type in the list of children of its parent element."
    LastOfType,

    /// [`:only-child`](https://www.w3.org/TR/selectors-3/#only-child-pseudo)
    /// "Represents an element that has a parent element and whose parent
    /// element has no other element children."
    OnlyChild,

    /// [`:only-of-type`](https://www.w3.org/TR/selectors-3/#only-of-type-pseudo)
    /// "Represents an element that has a parent element and whose parent
    /// element has no other element children with the same expanded element
    /// name."
    OnlyOfType,

    /// [`:root`](https://www.w3.org/TR/selectors-3/#root-pseudo)
    /// "The :root pseudo-class represents an element that is the root of the
    /// document."
    Root,
}

impl PseudoClass {
    /// Decode a keyword (without the leading colon).
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnsupportedPseudoClass`] for any keyword outside
    /// the recognized eight.
    pub fn parse(keyword: &str) -> Result<Self, QueryError> {
        Self::from_str(keyword)
            .map_err(|_| QueryError::UnsupportedPseudoClass(keyword.to_string()))
    }

    /// The CSS keyword, e.g. `"last-of-type"`.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        self.into()
    }

    /// Whether position is computed among same-name siblings only.
    #[must_use]
    pub const fn is_typed(self) -> bool {
        matches!(self, Self::FirstOfType | Self::LastOfType | Self::OnlyOfType)
    }

    /// Whether the predicate depends on the node's position among siblings.
    #[must_use]
    pub const fn is_positional(self) -> bool {
        !matches!(self, Self::Empty | Self::Root)
    }
}

/// A pseudo-class as produced by an external selector parser: the raw
/// keyword, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PseudoClassSpecifier {
    value: String,
}

impl PseudoClassSpecifier {
    /// Wrap a keyword such as `"first-child"`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The raw keyword.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Decode the keyword into a [`PseudoClass`].
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnsupportedPseudoClass`] for unknown keywords.
    pub fn pseudo_class(&self) -> Result<PseudoClass, QueryError> {
        PseudoClass::parse(&self.value)
    }
}

impl From<PseudoClass> for PseudoClassSpecifier {
    fn from(pseudo: PseudoClass) -> Self {
        Self::new(pseudo.keyword())
    }
}

impl TryFrom<&PseudoClassSpecifier> for PseudoClass {
    type Error = QueryError;

    fn try_from(specifier: &PseudoClassSpecifier) -> Result<Self, Self::Error> {
        specifier.pseudo_class()
    }
}

/// Position of a node among a sibling set.
///
/// Computed freshly for every query, never cached, since the tree may have
/// changed between queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionInfo {
    /// Zero-based index within the sibling set.
    pub index: usize,
    /// Number of nodes in the sibling set; at least 1 since the node itself
    /// is a member.
    pub size: usize,
}

impl PositionInfo {
    /// `index == 0`
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.index == 0
    }

    /// `index == size - 1`
    #[must_use]
    pub const fn is_last(self) -> bool {
        self.index + 1 == self.size
    }

    /// `size == 1`
    #[must_use]
    pub const fn is_only(self) -> bool {
        self.size == 1
    }
}
