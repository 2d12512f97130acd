//! Error types for the host document.

use crate::NodeId;

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, DomError>;

/// Errors raised while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The selector was empty or whitespace only.
    #[error("empty selector")]
    Empty,

    /// A token that cannot appear at this position.
    #[error("unexpected '{found}' at column {column} in selector '{selector}'")]
    UnexpectedToken {
        selector: String,
        column: u32,
        found: String,
    },

    /// The selector ended in the middle of a name or attribute test.
    #[error("unexpected end of selector '{selector}'")]
    UnexpectedEnd { selector: String },

    /// A pseudo-class the matcher does not implement.
    #[error("unsupported pseudo-class ':{name}' in selector '{selector}'")]
    UnsupportedPseudoClass { selector: String, name: String },

    /// A selector list where a single selector was required.
    #[error("expected a single selector, found a list in '{selector}'")]
    UnexpectedList { selector: String },

    /// A trailing combinator with nothing after it.
    #[error("selector '{selector}' ends with a combinator")]
    DanglingCombinator { selector: String },
}

/// Errors that can occur when manipulating the host document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The node ID is invalid or its node has been freed.
    #[error("node {0:?} does not exist in this document")]
    UnknownNode(NodeId),

    /// Inserting the node would make it its own ancestor, or move the root.
    #[error("cannot insert node {child:?} under {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// A single-target operation was applied to a set of a different size.
    #[error("operation needs exactly one element, but the set holds {len}")]
    NotSingle { len: usize },

    /// Selector parsing error.
    #[error(transparent)]
    Selector(#[from] SelectorError),
}
