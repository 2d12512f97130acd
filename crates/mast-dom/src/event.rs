//! Events dispatched through the host document.

use crate::NodeId;

/// An event delivered to a delegated listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    /// Event name, e.g. `click`.
    pub name: String,
    /// The element the event was dispatched at.
    pub target: NodeId,
    /// The element the listener is attached to.
    pub current_target: NodeId,
    /// The element that matched the listener's selector. Equal to
    /// `current_target` for listeners without a selector.
    pub delegate_target: NodeId,
}

impl DomEvent {
    pub(crate) fn new(
        name: &str,
        target: NodeId,
        current_target: NodeId,
        delegate_target: NodeId,
    ) -> Self {
        Self {
            name: name.to_string(),
            target,
            current_target,
            delegate_target,
        }
    }
}
