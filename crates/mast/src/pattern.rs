//! Patterns bind a template to a model.
//!
//! A [`Pattern`] produces the element a component renders, and announces via
//! [`Pattern::changed`] whenever that output would differ: when its model
//! changes or when it is pointed at another template.
//!
//! [`TemplatePattern`] is the built-in implementation. Templates are element
//! specs registered in a [`TemplateRegistry`] under a selector string such as
//! `#row-template`. String content is rendered with `tera`, so `{{ key }}`
//! placeholders are filled from the model's attributes and the usual filters
//! apply (`{{ title | default(value="Untitled") }}`). A placeholder naming an
//! attribute the data lacks fails the render.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use mast_core::logging::targets;
use mast_core::{ConnectionGuard, Signal};
use mast_dom::ElementSpec;
use tera::{Context, Tera};

use crate::error::{Error, Result};
use crate::model::{Attributes, Model, ModelChange};

/// Produces render-ready elements from a model.
pub trait Pattern {
    /// Build the element for `data`.
    fn generate(&self, data: &Attributes) -> Result<ElementSpec>;

    /// The model whose attributes feed [`generate`](Self::generate).
    fn model(&self) -> Model;

    /// The current template selector.
    fn template(&self) -> String;

    /// Point the pattern at another template, emitting `changed`.
    fn set_template(&self, selector: &str) -> Result<()>;

    /// Emitted when the generated output may have changed.
    fn changed(&self) -> &Signal<()>;
}

/// Templates keyed by selector.
///
/// Placeholder strings are compiled into a shared `tera` instance the first
/// time they are rendered and reused afterwards.
#[derive(Clone)]
pub struct TemplateRegistry {
    templates: Rc<RefCell<HashMap<String, ElementSpec>>>,
    engine: Rc<RefCell<Tera>>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        let mut engine = Tera::default();
        // Strings land in the document as text; markup escaping happens on output.
        engine.autoescape_on(vec![]);
        Self {
            templates: Rc::default(),
            engine: Rc::new(RefCell::new(engine)),
        }
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let templates = self.templates.borrow();
        let mut selectors: Vec<_> = templates.keys().collect();
        selectors.sort();
        f.debug_struct("TemplateRegistry")
            .field("templates", &selectors)
            .finish()
    }
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, returning the one it replaced.
    pub fn register(&self, selector: impl Into<String>, template: ElementSpec) -> Option<ElementSpec> {
        self.templates.borrow_mut().insert(selector.into(), template)
    }

    /// Look up a template.
    pub fn get(&self, selector: &str) -> Option<ElementSpec> {
        self.templates.borrow().get(selector).cloned()
    }

    /// Check if a selector has a template.
    pub fn contains(&self, selector: &str) -> bool {
        self.templates.borrow().contains_key(selector)
    }

    /// Render the template registered under `selector` with `data`.
    pub fn render(&self, selector: &str, data: &Attributes) -> Result<ElementSpec> {
        let template = self.get(selector).ok_or_else(|| Error::template(selector))?;
        let context = Context::from_serialize(data).map_err(|source| Error::render(selector, source))?;
        template
            .try_map_strings(&|text: &str| self.render_text(text, &context))
            .map_err(|source| Error::render(selector, source))
    }

    fn render_text(&self, text: &str, context: &Context) -> tera::Result<String> {
        if !text.contains("{{") && !text.contains("{%") {
            return Ok(text.to_string());
        }
        let mut engine = self.engine.borrow_mut();
        if !engine.get_template_names().any(|name| name == text) {
            engine.add_raw_template(text, text)?;
        }
        engine.render(text, context)
    }
}

/// Pattern rendering a registered template through [`TemplateRegistry::render`].
pub struct TemplatePattern {
    template: RefCell<String>,
    model: Model,
    templates: TemplateRegistry,
    changed: Signal<()>,
    _model_connection: ConnectionGuard<ModelChange>,
}

impl fmt::Debug for TemplatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplatePattern")
            .field("template", &self.template.borrow())
            .field("model", &self.model.cid())
            .finish()
    }
}

impl TemplatePattern {
    /// Create a pattern for `template` over `model`.
    ///
    /// The template does not need to exist yet; it is looked up on every
    /// [`generate`](Pattern::generate).
    pub fn new(template: impl Into<String>, model: Model, templates: TemplateRegistry) -> Rc<Self> {
        let template = template.into();
        Rc::new_cyclic(|weak: &Weak<TemplatePattern>| {
            let weak = weak.clone();
            let model_connection = model.changed().connect_scoped(move |_| {
                if let Some(pattern) = weak.upgrade() {
                    pattern.changed.emit(());
                }
            });
            Self {
                template: RefCell::new(template),
                model,
                templates,
                changed: Signal::new(),
                _model_connection: model_connection,
            }
        })
    }
}

impl Pattern for TemplatePattern {
    fn generate(&self, data: &Attributes) -> Result<ElementSpec> {
        let selector = self.template.borrow().clone();
        tracing::trace!(target: targets::PATTERN, template = %selector, "generating");
        self.templates.render(&selector, data)
    }

    fn model(&self) -> Model {
        self.model.clone()
    }

    fn template(&self) -> String {
        self.template.borrow().clone()
    }

    fn set_template(&self, selector: &str) -> Result<()> {
        if !self.templates.contains(selector) {
            return Err(Error::template(selector));
        }
        self.template.replace(selector.to_string());
        tracing::debug!(target: targets::PATTERN, template = %selector, "template changed");
        self.changed.emit(());
        Ok(())
    }

    fn changed(&self) -> &Signal<()> {
        &self.changed
    }
}
