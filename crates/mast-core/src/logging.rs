//! Logging and debugging facilities for Mast.
//!
//! This module provides:
//! - Target and span names for filtering Mast's `tracing` output
//! - Tree formatting options shared by the component and document debuggers
//! - Performance tracing hooks for profiling
//!
//! # Tracing Integration
//!
//! Mast uses the `tracing` crate for instrumentation. To see logs, install a
//! subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("mast::component=debug")
//!         .init();
//! }
//! ```

/// Span names used throughout Mast for tracing.
pub mod span_names {
    /// Component construction span.
    pub const COMPONENT_INIT: &str = "mast::component::init";
    /// Component render span.
    pub const COMPONENT_RENDER: &str = "mast::component::render";
    /// Event loop turn span.
    pub const EVENT_LOOP: &str = "mast::event_loop";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Component lifecycle target.
    pub const COMPONENT: &str = "mast::component";
    /// Subcomponent registration and tree maintenance target.
    pub const TREE: &str = "mast::tree";
    /// Outlet resolution target.
    pub const OUTLET: &str = "mast::outlet";
    /// Model store target.
    pub const MODEL: &str = "mast::model";
    /// Pattern/template target.
    pub const PATTERN: &str = "mast::pattern";
    /// Realtime connection target.
    pub const CONNECTION: &str = "mast::connection";
    /// Host document target.
    pub const DOM: &str = "mast::dom";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "mast::signal";
    /// Event loop target.
    pub const EVENT_LOOP: &str = "mast::event_loop";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show identifiers (component ids, node ids).
    pub show_ids: bool,
    /// Whether to show type names.
    pub show_types: bool,
    /// Whether to show extra details (outlets, attributes).
    pub show_details: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            show_details: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_details: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            show_details: false,
            ..Default::default()
        }
    }

    /// Whether `depth` is past the configured maximum.
    pub fn exceeds_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| depth > max)
    }

    /// Build the prefix string for a tree line at `depth`.
    pub fn prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }

    /// Build the prefix for detail lines under a node at `depth`.
    pub fn detail_prefix(&self, depth: usize) -> String {
        let branch = match self.style {
            TreeStyle::Ascii => "|",
            TreeStyle::Unicode => "\u{2502}",
            TreeStyle::Compact => "",
        };

        let mut prefix = String::new();
        for _ in 0..depth {
            prefix.push_str(branch);
            for _ in 0..self.indent_size {
                prefix.push(' ');
            }
        }
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "mast::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
