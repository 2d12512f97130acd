//! Reactive key/value models.
//!
//! A [`Model`] is a shared handle to a map of JSON attributes. Setting an
//! attribute to a new value emits [`Model::changed`]; setting it to the value
//! it already holds does nothing.
//!
//! Components get their model from a [`ModelSource`], resolved once at
//! construction against the runtime's [`ModelRegistry`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use mast_core::logging::targets;
use mast_core::Signal;
use serde_json::Value;

use crate::error::{Error, Result};

/// Attribute map held by a model and passed to patterns.
pub type Attributes = serde_json::Map<String, Value>;

static NEXT_CID: AtomicU64 = AtomicU64::new(1);

/// Payload of [`Model::changed`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModelChange {
    /// The attribute that changed.
    pub key: String,
    /// Its new value.
    pub value: Value,
}

struct ModelInner {
    cid: u64,
    attributes: RefCell<Attributes>,
    changed: Signal<ModelChange>,
}

/// Shared handle to a reactive attribute map.
///
/// Cloning the handle shares the same attributes.
#[derive(Clone)]
pub struct Model {
    inner: Rc<ModelInner>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("cid", &self.inner.cid)
            .field("attributes", &self.inner.attributes.borrow())
            .finish()
    }
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::from_attributes(Attributes::new())
    }

    /// Create a model holding `attributes`.
    pub fn from_attributes(attributes: Attributes) -> Self {
        Self {
            inner: Rc::new(ModelInner {
                cid: NEXT_CID.fetch_add(1, Ordering::Relaxed),
                attributes: RefCell::new(attributes),
                changed: Signal::new(),
            }),
        }
    }

    /// Create a model from a JSON object. Returns `None` for any other value.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(attributes) => Some(Self::from_attributes(attributes)),
            _ => None,
        }
    }

    /// Client id, unique within the process.
    pub fn cid(&self) -> u64 {
        self.inner.cid
    }

    /// Whether two handles refer to the same model.
    pub fn ptr_eq(&self, other: &Model) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Get an attribute.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.attributes.borrow().get(key).cloned()
    }

    /// Set an attribute, emitting [`changed`](Self::changed) if the value
    /// differs from the current one.
    ///
    /// Returns `true` if the model changed.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        let value = value.into();
        {
            let mut attributes = self.inner.attributes.borrow_mut();
            if attributes.get(&key) == Some(&value) {
                return false;
            }
            attributes.insert(key.clone(), value.clone());
        }
        tracing::debug!(target: targets::MODEL, cid = self.inner.cid, key = %key, "attribute changed");
        self.inner.changed.emit(ModelChange { key, value });
        true
    }

    /// A copy of all attributes.
    pub fn snapshot(&self) -> Attributes {
        self.inner.attributes.borrow().clone()
    }

    /// The attributes as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.snapshot())
    }

    /// Emitted after an attribute changes.
    pub fn changed(&self) -> &Signal<ModelChange> {
        &self.inner.changed
    }
}

/// Named model instances shared across components.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: Rc<RefCell<HashMap<String, Model>>>,
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let models = self.models.borrow();
        let mut names: Vec<_> = models.keys().collect();
        names.sort();
        f.debug_struct("ModelRegistry").field("models", &names).finish()
    }
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under `name`, returning the model it replaced.
    pub fn register(&self, name: impl Into<String>, model: Model) -> Option<Model> {
        self.models.borrow_mut().insert(name.into(), model)
    }

    /// Look up a model.
    pub fn get(&self, name: &str) -> Option<Model> {
        self.models.borrow().get(name).cloned()
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.models.borrow().contains_key(name)
    }
}

/// Where a component's model comes from.
#[derive(Clone)]
pub enum ModelSource {
    /// A constructor producing a fresh model.
    Constructor(Rc<dyn Fn() -> Model>),
    /// The name of a model in the [`ModelRegistry`].
    Registered(String),
    /// An attribute bag. Must be a JSON object.
    Attributes(Value),
    /// An existing model instance.
    Instance(Model),
}

impl fmt::Debug for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructor(_) => f.write_str("Constructor(..)"),
            Self::Registered(name) => f.debug_tuple("Registered").field(name).finish(),
            Self::Attributes(value) => f.debug_tuple("Attributes").field(value).finish(),
            Self::Instance(model) => f.debug_tuple("Instance").field(&model.cid()).finish(),
        }
    }
}

impl From<Model> for ModelSource {
    fn from(model: Model) -> Self {
        Self::Instance(model)
    }
}

impl ModelSource {
    /// Create a constructor source.
    pub fn constructor<F>(f: F) -> Self
    where
        F: Fn() -> Model + 'static,
    {
        Self::Constructor(Rc::new(f))
    }

    /// Resolve to a model instance.
    ///
    /// An unknown registered name is an error. An attribute bag that is not a
    /// JSON object is only logged, and resolves to no model.
    pub fn resolve(self, registry: &ModelRegistry) -> Result<Option<Model>> {
        match self {
            Self::Constructor(constructor) => Ok(Some(constructor())),
            Self::Registered(name) => match registry.get(&name) {
                Some(model) => Ok(Some(model)),
                None => Err(Error::invalid_model(name)),
            },
            Self::Attributes(value) => {
                let description = value.to_string();
                let model = Model::from_value(value);
                if model.is_none() {
                    tracing::error!(
                        target: targets::MODEL,
                        definition = %description,
                        "Invalid model definition"
                    );
                }
                Ok(model)
            }
            Self::Instance(model) => Ok(Some(model)),
        }
    }
}

static_assertions::assert_not_impl_any!(Model: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_set_emits_only_on_change() {
        let model = Model::new();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        model.changed().connect(move |change| {
            assert_eq!(change.key, "title");
            count_clone.set(count_clone.get() + 1);
        });

        assert!(model.set("title", "a"));
        assert!(!model.set("title", "a"));
        assert!(model.set("title", "b"));
        assert_eq!(count.get(), 2);
        assert_eq!(model.get("title"), Some(json!("b")));
        assert_eq!(model.to_json(), json!({ "title": "b" }));
    }

    #[test]
    fn test_cids_are_unique() {
        let a = Model::new();
        let b = Model::new();
        assert_ne!(a.cid(), b.cid());
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn test_resolve_sources() {
        let registry = ModelRegistry::new();
        let shared = Model::new();
        registry.register("Session", shared.clone());

        let resolved = ModelSource::Registered("Session".into())
            .resolve(&registry)
            .unwrap()
            .unwrap();
        assert!(resolved.ptr_eq(&shared));

        let built = ModelSource::constructor(|| {
            Model::from_value(json!({ "n": 1 })).unwrap_or_default()
        })
        .resolve(&registry)
        .unwrap()
        .unwrap();
        assert_eq!(built.get("n"), Some(json!(1)));

        let bag = ModelSource::Attributes(json!({ "x": true }))
            .resolve(&registry)
            .unwrap()
            .unwrap();
        assert_eq!(bag.get("x"), Some(json!(true)));

        let instance = ModelSource::from(shared.clone()).resolve(&registry).unwrap();
        assert!(instance.unwrap().ptr_eq(&shared));
    }

    #[test]
    fn test_resolve_errors() {
        let registry = ModelRegistry::new();
        assert!(matches!(
            ModelSource::Registered("Missing".into()).resolve(&registry),
            Err(Error::InvalidModel { name }) if name == "Missing"
        ));
        assert!(ModelSource::Attributes(json!([1, 2]))
            .resolve(&registry)
            .unwrap()
            .is_none());
    }
}
