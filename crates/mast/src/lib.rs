//! # Mast
//!
//! A component lifecycle and composition engine. A [`Component`] binds a
//! template to a data model through a [`Pattern`], renders itself into a host
//! [`Document`](mast_dom::Document), and manages a tree of child components
//! that are placed into outlets inside their parent's rendered element.
//!
//! ## Quick Start
//!
//! ```
//! use mast::prelude::*;
//! use serde_json::json;
//!
//! let runtime = Runtime::new();
//! let document = runtime.document();
//! let app = document.create(&ElementSpec::new("div").with_id("app"));
//! document.append_child(document.root(), app).unwrap();
//!
//! runtime.templates().register(
//!     "#greeting",
//!     ElementSpec::new("p").with_text("Hello, {{name}}!"),
//! );
//!
//! let greeting = Component::new(
//!     &runtime,
//!     ComponentConfig::new()
//!         .with_template("#greeting")
//!         .with_outlet("#app")
//!         .with_model_attributes(json!({ "name": "world" })),
//! )
//! .unwrap();
//!
//! assert_eq!(document.text(greeting.root_node()).as_deref(), Some("Hello, world!"));
//!
//! greeting.set("name", "Mast");
//! assert_eq!(document.text(greeting.root_node()).as_deref(), Some("Hello, Mast!"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`mast_core`]: signals, the cooperative event loop, logging helpers
//! - [`dom`]: the host document, selectors and delegated events
//! - this crate: models, patterns, components and their registries

mod component;
mod config;
mod connection;
mod debug;
mod error;
mod model;
mod outlet;
mod pattern;
pub mod prelude;
mod registry;
mod runtime;

pub use mast_core;
pub use mast_dom as dom;

pub use component::{Component, WeakComponent};
pub use config::{
    ComponentConfig, ComponentManifest, ConstructOptions, EventBinding, EventHandler, Hook,
    SubcomponentDecl, SubcomponentManifest,
};
pub use connection::Connection;
pub use debug::ComponentTreeDebug;
pub use error::{Error, Result};
pub use model::{Attributes, Model, ModelChange, ModelRegistry, ModelSource};
pub use pattern::{Pattern, TemplatePattern, TemplateRegistry};
pub use registry::{ComponentFactory, ComponentRegistry};
pub use runtime::Runtime;
