//! Component type registry.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use mast_core::logging::targets;

use crate::config::{ComponentConfig, ComponentManifest};

/// Factory producing a fresh configuration for a component type.
pub type ComponentFactory = Rc<dyn Fn() -> ComponentConfig>;

/// Maps component type names to their configuration factories.
///
/// Subcomponent declarations name their type; the parent looks the name up
/// here when it registers the child.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    factories: Rc<RefCell<HashMap<String, ComponentFactory>>>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("components", &self.names())
            .finish()
    }
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any previous one.
    pub fn register<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> ComponentConfig + 'static,
    {
        let name = name.into();
        tracing::debug!(target: targets::COMPONENT, name = %name, "registered component type");
        self.factories.borrow_mut().insert(name, Rc::new(factory));
    }

    /// Register a component type described by a manifest.
    pub fn register_manifest(&self, name: impl Into<String>, manifest: ComponentManifest) {
        self.register(name, move || manifest.clone().into_config());
    }

    /// Check if a type is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.borrow().contains_key(name)
    }

    /// Build a fresh configuration for `name`, tagged with the type name.
    pub fn config_for(&self, name: &str) -> Option<ComponentConfig> {
        let factory = self.factories.borrow().get(name).cloned()?;
        let config = factory();
        Some(match config.type_name {
            Some(_) => config,
            None => config.with_type_name(name),
        })
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_for_tags_type_name() {
        let registry = ComponentRegistry::new();
        registry.register("Row", || ComponentConfig::new().with_template("#row"));
        registry.register("Named", || ComponentConfig::new().with_type_name("Custom"));

        let config = registry.config_for("Row").unwrap();
        assert_eq!(config.type_name.as_deref(), Some("Row"));
        assert_eq!(config.template(), Some("#row"));
        assert_eq!(
            registry.config_for("Named").unwrap().type_name.as_deref(),
            Some("Custom")
        );
        assert!(registry.config_for("Missing").is_none());
        assert_eq!(registry.names(), vec!["Named", "Row"]);
    }

    #[test]
    fn test_factories_may_consult_the_registry() {
        let registry = ComponentRegistry::new();
        let inner = registry.clone();
        registry.register("Outer", move || {
            let outlet = if inner.contains("Inner") { "#with" } else { "#without" };
            ComponentConfig::new().with_outlet(outlet)
        });
        assert_eq!(registry.config_for("Outer").unwrap().outlet(), Some("#without"));
    }

    #[test]
    fn test_register_manifest() {
        let registry = ComponentRegistry::new();
        let manifest = ComponentManifest::from_json(r##"{ "template": "#card" }"##).unwrap();
        registry.register_manifest("Card", manifest);
        assert_eq!(registry.config_for("Card").unwrap().template(), Some("#card"));
    }
}
