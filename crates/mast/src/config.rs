//! Component configuration.
//!
//! [`ComponentConfig`] is the builder a component is constructed from. It can
//! be assembled in code with the `with_*` methods, or loaded from a JSON
//! [`ComponentManifest`]:
//!
//! ```
//! use mast::ComponentConfig;
//!
//! let config = ComponentConfig::from_json(r##"{
//!     "template": "#list",
//!     "outlet": "#app",
//!     "model": { "title": "Inbox" },
//!     "subcomponents": [
//!         { "key": "footer", "component": "Footer", "outlet": ".footer" }
//!     ]
//! }"##).unwrap();
//!
//! assert_eq!(config.outlet(), Some("#app"));
//! assert_eq!(config.subcomponents().len(), 1);
//! ```

use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::{Component, ComponentInner};
use crate::error::Result;
use crate::model::{Attributes, ModelSource};
use crate::pattern::Pattern;
use mast_dom::DomEvent;

/// A lifecycle hook.
pub type Hook = Rc<dyn Fn(&Component)>;

/// A delegated event handler.
pub type EventHandler = Rc<dyn Fn(&Component, &DomEvent)>;

/// Declares a child component to build under a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcomponentDecl {
    /// Name of the component type in the registry.
    #[serde(default)]
    pub component: Option<String>,
    /// Outlet selector, resolved inside the parent's rendered element.
    #[serde(default)]
    pub outlet: Option<String>,
}

impl SubcomponentDecl {
    /// Declare a child of type `component`.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: Some(component.into()),
            outlet: None,
        }
    }

    /// Set the outlet selector.
    pub fn with_outlet(mut self, outlet: impl Into<String>) -> Self {
        self.outlet = Some(outlet.into());
        self
    }
}

/// A delegated host event binding, e.g. `"click .save"`.
#[derive(Clone)]
pub struct EventBinding {
    /// Event name.
    pub event: String,
    /// Optional selector filtering the delegate target.
    pub selector: Option<String>,
    /// Handler invoked with the component and the event.
    pub handler: EventHandler,
}

impl EventBinding {
    /// Parse a `"event selector"` key. Everything after the first run of
    /// whitespace is the selector.
    pub fn new(key: &str, handler: EventHandler) -> Self {
        let key = key.trim();
        let (event, selector) = match key.split_once(char::is_whitespace) {
            Some((event, selector)) => (event, Some(selector.trim().to_string())),
            None => (key, None),
        };
        Self {
            event: event.to_string(),
            selector,
            handler,
        }
    }
}

impl fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBinding")
            .field("event", &self.event)
            .field("selector", &self.selector)
            .finish()
    }
}

/// Options controlling a single construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructOptions {
    /// Skip automatic placement even when `autorender` is on.
    pub dont_render: bool,
}

impl ConstructOptions {
    /// Options that suppress placement.
    pub fn dont_render() -> Self {
        Self { dont_render: true }
    }
}

/// Everything a component is built from.
#[derive(Clone, Default)]
pub struct ComponentConfig {
    pub(crate) type_name: Option<String>,
    pub(crate) model: Option<ModelSource>,
    pub(crate) pattern: Option<Rc<dyn Pattern>>,
    pub(crate) template: Option<String>,
    pub(crate) outlet: Option<String>,
    pub(crate) parent: Option<Weak<ComponentInner>>,
    pub(crate) subcomponents: Vec<(String, SubcomponentDecl)>,
    pub(crate) autorender: Option<bool>,
    pub(crate) replace_outlet: bool,
    pub(crate) init: Option<Hook>,
    pub(crate) after_render: Option<Hook>,
    pub(crate) after_connect: Option<Hook>,
    pub(crate) events: Vec<EventBinding>,
    pub(crate) attributes: Attributes,
}

impl fmt::Debug for ComponentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("type_name", &self.type_name)
            .field("model", &self.model)
            .field("pattern", &self.pattern.as_ref().map(|p| p.template()))
            .field("template", &self.template)
            .field("outlet", &self.outlet)
            .field("has_parent", &self.parent.is_some())
            .field("subcomponents", &self.subcomponents)
            .field("autorender", &self.autorender)
            .field("replace_outlet", &self.replace_outlet)
            .field("events", &self.events)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl ComponentConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON manifest.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: ComponentManifest = serde_json::from_str(json)?;
        Ok(manifest.into_config())
    }

    /// Name used in logs and debug output.
    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    /// Set the model source.
    pub fn with_model(mut self, model: impl Into<ModelSource>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Use a model registered under `name`.
    pub fn with_registered_model(self, name: impl Into<String>) -> Self {
        self.with_model(ModelSource::Registered(name.into()))
    }

    /// Build a model from an attribute bag.
    pub fn with_model_attributes(self, attributes: Value) -> Self {
        self.with_model(ModelSource::Attributes(attributes))
    }

    /// Use an explicit pattern. Takes precedence over template and model.
    pub fn with_pattern(mut self, pattern: Rc<dyn Pattern>) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Set the template selector.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Set the outlet selector.
    pub fn with_outlet(mut self, outlet: impl Into<String>) -> Self {
        self.outlet = Some(outlet.into());
        self
    }

    /// Declare a subcomponent. Declaring the same key again replaces the
    /// earlier declaration in place.
    pub fn with_subcomponent(mut self, key: impl Into<String>, decl: SubcomponentDecl) -> Self {
        let key = key.into();
        match self.subcomponents.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = decl,
            None => self.subcomponents.push((key, decl)),
        }
        self
    }

    /// Enable or disable automatic placement.
    pub fn with_autorender(mut self, autorender: bool) -> Self {
        self.autorender = Some(autorender);
        self
    }

    /// Replace the outlet instead of appending into it.
    pub fn with_replace_outlet(mut self, replace: bool) -> Self {
        self.replace_outlet = replace;
        self
    }

    /// Hook run once subcomponents are registered, before placement.
    pub fn on_init<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Component) + 'static,
    {
        self.init = Some(Rc::new(hook));
        self
    }

    /// Hook run after every non-silent render.
    pub fn on_after_render<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Component) + 'static,
    {
        self.after_render = Some(Rc::new(hook));
        self
    }

    /// Hook run when the connection is (or becomes) live.
    pub fn on_after_connect<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Component) + 'static,
    {
        self.after_connect = Some(Rc::new(hook));
        self
    }

    /// Bind a delegated host event, keyed as `"event [selector]"`.
    pub fn with_event<F>(mut self, key: &str, handler: F) -> Self
    where
        F: Fn(&Component, &DomEvent) + 'static,
    {
        self.events.push(EventBinding::new(key, Rc::new(handler)));
        self
    }

    /// Set an extra attribute, readable through [`Component::attribute`].
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The configured outlet selector.
    pub fn outlet(&self) -> Option<&str> {
        self.outlet.as_deref()
    }

    /// The configured template selector.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Declared subcomponents, in declaration order.
    pub fn subcomponents(&self) -> &[(String, SubcomponentDecl)] {
        &self.subcomponents
    }

    pub(crate) fn with_parent(mut self, parent: Weak<ComponentInner>) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// A subcomponent entry in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcomponentManifest {
    /// Key under which the child is registered.
    pub key: String,
    /// The declaration.
    #[serde(flatten)]
    pub decl: SubcomponentDecl,
}

/// Serializable component description.
///
/// `model` may be a string naming a registered model or an attribute object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentManifest {
    pub template: Option<String>,
    pub outlet: Option<String>,
    pub model: Option<Value>,
    pub autorender: Option<bool>,
    pub replace_outlet: bool,
    pub subcomponents: Vec<SubcomponentManifest>,
    pub attributes: Attributes,
}

impl ComponentManifest {
    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into a builder configuration.
    pub fn into_config(self) -> ComponentConfig {
        let mut config = ComponentConfig::new();
        config.template = self.template;
        config.outlet = self.outlet;
        config.model = self.model.map(|model| match model {
            Value::String(name) => ModelSource::Registered(name),
            other => ModelSource::Attributes(other),
        });
        config.autorender = self.autorender;
        config.replace_outlet = self.replace_outlet;
        config.attributes = self.attributes;
        for entry in self.subcomponents {
            config = config.with_subcomponent(entry.key, entry.decl);
        }
        config
    }
}
