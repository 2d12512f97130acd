//! Component tree visualization.
//!
//! ```
//! use mast::{Component, ComponentConfig, ComponentTreeDebug, ConstructOptions, Runtime};
//! use mast::dom::ElementSpec;
//!
//! let runtime = Runtime::new();
//! runtime.templates().register("#t", ElementSpec::new("div"));
//! let component = Component::build(
//!     &runtime,
//!     ComponentConfig::new().with_template("#t").with_type_name("Page"),
//!     ConstructOptions::dont_render(),
//! )
//! .unwrap();
//!
//! let output = ComponentTreeDebug::new().format(&component);
//! assert!(output.starts_with("Page"));
//! ```

use std::fmt::Write as _;

use mast_core::{TreeFormatOptions, TreeStyle};

use crate::component::Component;

/// Formats a component and its descendants as an indented tree.
#[derive(Debug, Clone, Default)]
pub struct ComponentTreeDebug {
    options: TreeFormatOptions,
}

impl ComponentTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Create a visualizer using plain ASCII connectors.
    pub fn ascii() -> Self {
        Self::with_options(TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::minimal()
        })
    }

    /// Format `root` and everything below it.
    pub fn format(&self, root: &Component) -> String {
        let mut output = String::new();
        self.format_into(root, None, 0, true, &mut output);
        output
    }

    fn format_into(
        &self,
        component: &Component,
        key: Option<&str>,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) {
        if self.options.exceeds_depth(depth) {
            return;
        }

        output.push_str(&self.options.prefix(depth, is_last));
        let type_name = component.type_name().unwrap_or("(anonymous)");
        match key {
            Some(key) => output.push_str(key),
            None => output.push_str(type_name),
        }
        if self.options.show_ids {
            let _ = write!(output, " [#{}]", component.id());
        }
        if self.options.show_types && key.is_some() {
            let _ = write!(output, " ({})", type_name);
        }
        if component.is_destroyed() {
            output.push_str(" <destroyed>");
        }
        output.push('\n');

        if self.options.show_details {
            let prefix = self.options.detail_prefix(depth);
            let document = component.runtime().document();
            let root = component.root_node();
            let _ = writeln!(
                output,
                "{}  outlet: {}",
                prefix,
                component.outlet().unwrap_or("(none)")
            );
            let _ = writeln!(
                output,
                "{}  root: {}{}",
                prefix,
                document.describe(root),
                if document.is_attached(root) { "" } else { " (detached)" }
            );
        }

        let children = component.children();
        let count = children.len();
        for (i, (child_key, child)) in children.iter().enumerate() {
            self.format_into(child, Some(child_key), depth + 1, i + 1 == count, output);
        }
    }
}
