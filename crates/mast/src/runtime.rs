//! Services shared by a component tree.

use mast_core::{EventLoop, EventLoopConfig};
use mast_dom::Document;

use crate::connection::Connection;
use crate::model::ModelRegistry;
use crate::pattern::TemplateRegistry;
use crate::registry::ComponentRegistry;

/// The bundle of services every component is constructed against.
///
/// Cloning is cheap and shares every service. Children always use their
/// parent's runtime.
#[derive(Debug, Clone, Default)]
pub struct Runtime {
    document: Document,
    event_loop: EventLoop,
    connection: Connection,
    components: ComponentRegistry,
    models: ModelRegistry,
    templates: TemplateRegistry,
}

impl Runtime {
    /// Create a runtime with a fresh document and empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runtime whose event loop uses `config`.
    pub fn with_event_loop_config(config: EventLoopConfig) -> Self {
        Self {
            event_loop: EventLoop::with_config(config),
            ..Self::default()
        }
    }

    /// Use an existing document.
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = document;
        self
    }

    /// Use an existing connection.
    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connection = connection;
        self
    }

    /// The host document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The event loop running deferred work.
    pub fn event_loop(&self) -> &EventLoop {
        &self.event_loop
    }

    /// The realtime connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Registered component types.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// Registered models.
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// Registered templates.
    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }
}
