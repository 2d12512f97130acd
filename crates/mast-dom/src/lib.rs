//! Host document for Mast.
//!
//! Components render into a [`Document`]: an arena of element nodes with a
//! single `html` root. The crate provides:
//!
//! - **Element specs**: detached subtree descriptions ([`ElementSpec`])
//! - **Selectors**: a CSS subset tokenized with `cssparser` (type, `#id`,
//!   `.class`, attribute operators, structural pseudo-classes, all four
//!   combinators and selector lists)
//! - **Element sets**: ordered query results ([`ElementSet`])
//! - **Delegated events**: bubbling dispatch with selector-filtered listeners
//!
//! # Example
//!
//! ```
//! use mast_dom::{Document, ElementSpec};
//!
//! let document = Document::new();
//! let app = document.create(&ElementSpec::new("div").with_id("app"));
//! document.append_child(document.root(), app).unwrap();
//!
//! let found = document.query("#app").unwrap();
//! assert_eq!(found.single().unwrap(), app);
//! ```

mod document;
mod element;
mod element_set;
mod error;
mod event;
mod matcher;
pub mod selector;

pub use document::{Document, ListenerId, NodeId};
pub use element::ElementSpec;
pub use element_set::ElementSet;
pub use error::{DomError, Result, SelectorError};
pub use event::DomEvent;
pub use selector::{
    AttributeOperator, AttributeSelector, Combinator, PseudoClass, Selector, SelectorList,
    SelectorPart, TypeSelector,
};
