//! Common imports.
//!
//! ```
//! use mast::prelude::*;
//! ```

pub use crate::component::{Component, WeakComponent};
pub use crate::config::{ComponentConfig, ConstructOptions, SubcomponentDecl};
pub use crate::connection::Connection;
pub use crate::error::{Error, Result};
pub use crate::model::{Attributes, Model, ModelSource};
pub use crate::pattern::{Pattern, TemplatePattern};
pub use crate::runtime::Runtime;
pub use mast_core::EventLoop;
pub use mast_dom::{Document, ElementSpec};
