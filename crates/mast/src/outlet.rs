//! Outlet resolution.

use mast_core::logging::targets;
use mast_dom::{Document, NodeId};

use crate::error::{Error, Result};

/// Resolve the single element a component is placed into.
///
/// `explicit` wins over `default`. With a `context`, only descendants of the
/// context element are searched; otherwise the whole document is.
pub(crate) fn verify_outlet(
    document: &Document,
    explicit: Option<&str>,
    default: Option<&str>,
    context: Option<NodeId>,
) -> Result<NodeId> {
    let selector = explicit.or(default).ok_or(Error::NoOutlet)?;

    let found = match context {
        Some(context) => document.query_within(context, selector)?,
        None => document.query(selector)?,
    };

    match found.single() {
        Ok(node) => {
            tracing::trace!(target: targets::OUTLET, selector, ?node, "resolved outlet");
            Ok(node)
        }
        Err(_) => {
            let context = context.map(|node| document.describe(node));
            tracing::debug!(
                target: targets::OUTLET,
                selector,
                found = found.len(),
                context = context.as_deref().unwrap_or("document"),
                "outlet did not resolve to one element"
            );
            Err(Error::outlet_cardinality(selector, found.len(), context))
        }
    }
}
