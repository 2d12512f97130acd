//! Components.
//!
//! A [`Component`] owns a [`Pattern`], renders it into the host document and
//! manages a tree of child components.
//!
//! # Lifecycle
//!
//! Construction resolves the model and pattern, registers the declared
//! subcomponents (built but not placed), runs the `init` hook and, unless
//! placement is suppressed, appends (or replaces) into the outlet. Every
//! render swaps a freshly generated element in for the previous one in a
//! single document operation and then schedules one deferred `append` per
//! child on the runtime's event loop, so children land inside the new element
//! on the next turn.
//!
//! Exactly one root element represents a component at any time. Before the
//! first render it is a detached, empty placeholder `div`.
//!
//! # Handles
//!
//! `Component` is a cheap reference-counted handle. Parents own their
//! children; children hold a weak reference back. Every signal and event
//! handler a component installs captures only a weak handle, so dropping the
//! last strong handle silences them.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use mast_core::logging::{span_names, targets};
use mast_core::{ConnectionGuard, Signal, TaskId};
use mast_dom::{ElementSpec, ListenerId, NodeId, SelectorList};
use serde_json::Value;

use crate::config::{ComponentConfig, ConstructOptions, EventBinding, Hook, SubcomponentDecl};
use crate::error::{Error, Result};
use crate::model::{Attributes, Model};
use crate::outlet::verify_outlet;
use crate::pattern::{Pattern, TemplatePattern};
use crate::runtime::Runtime;

static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) struct ComponentInner {
    id: u64,
    runtime: Runtime,
    type_name: Option<String>,
    model: Option<Model>,
    pattern: Rc<dyn Pattern>,
    outlet: Option<String>,
    parent: Option<Weak<ComponentInner>>,
    children: RefCell<Vec<(String, Component)>>,
    autorender: bool,
    replace_outlet: bool,
    attributes: Attributes,
    events: Vec<EventBinding>,
    after_connect_hook: Option<Hook>,
    root: Cell<NodeId>,
    listeners: RefCell<Vec<ListenerId>>,
    pending_appends: RefCell<Vec<TaskId>>,
    after_render: Signal<()>,
    pattern_connection: RefCell<Option<ConnectionGuard<()>>>,
    after_render_connection: RefCell<Option<ConnectionGuard<()>>>,
    connect_connection: RefCell<Option<ConnectionGuard<()>>>,
    destroyed: Cell<bool>,
}

impl Drop for ComponentInner {
    fn drop(&mut self) {
        if !self.destroyed.get() {
            self.runtime.document().release(self.root.get());
        }
    }
}

/// Shared handle to a component.
#[derive(Clone)]
pub struct Component {
    inner: Rc<ComponentInner>,
}

/// Weak handle to a component.
#[derive(Clone, Default)]
pub struct WeakComponent {
    inner: Weak<ComponentInner>,
}

impl WeakComponent {
    /// Upgrade to a strong handle if the component is still alive.
    pub fn upgrade(&self) -> Option<Component> {
        self.inner.upgrade().map(|inner| Component { inner })
    }
}

impl fmt::Debug for WeakComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakComponent")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.inner.id)
            .field("type_name", &self.inner.type_name)
            .field("outlet", &self.inner.outlet)
            .field("root", &self.inner.root.get())
            .field("children", &self.child_keys())
            .field("destroyed", &self.inner.destroyed.get())
            .finish()
    }
}

impl Component {
    /// Build a component and place it unless `autorender` is off.
    pub fn new(runtime: &Runtime, config: ComponentConfig) -> Result<Self> {
        Self::build(runtime, config, ConstructOptions::default())
    }

    /// Build a component with explicit construction options.
    pub fn build(runtime: &Runtime, config: ComponentConfig, options: ConstructOptions) -> Result<Self> {
        let _span = tracing::debug_span!(
            target: targets::COMPONENT,
            span_names::COMPONENT_INIT,
            type_name = config.type_name.as_deref().unwrap_or("(anonymous)")
        )
        .entered();

        let ComponentConfig {
            type_name,
            model,
            pattern,
            template,
            outlet,
            parent,
            subcomponents,
            autorender,
            replace_outlet,
            init,
            after_render,
            after_connect,
            events,
            attributes,
        } = config;

        let model = match model {
            Some(source) => source.resolve(runtime.models())?,
            None => None,
        };

        let pattern: Rc<dyn Pattern> = match pattern {
            Some(pattern) => {
                if template.is_some() || model.is_some() {
                    tracing::warn!(
                        target: targets::COMPONENT,
                        "A template selector and/or model was specified even though a pattern \
                         was also specified; ignoring them and using the pattern"
                    );
                }
                pattern
            }
            None => {
                let template = template.ok_or(Error::MissingRenderSource)?;
                TemplatePattern::new(
                    template,
                    model.clone().unwrap_or_default(),
                    runtime.templates().clone(),
                )
            }
        };

        for binding in &events {
            if let Some(selector) = &binding.selector {
                SelectorList::parse(selector)?;
            }
        }

        let autorender = parent.is_none() && autorender.unwrap_or(true);

        let document = runtime.document();
        let placeholder = document.create(&ElementSpec::new("div"));
        document.retain(placeholder)?;

        let component = Component {
            inner: Rc::new(ComponentInner {
                id: NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed),
                runtime: runtime.clone(),
                type_name,
                model,
                pattern,
                outlet,
                parent,
                children: RefCell::new(Vec::new()),
                autorender,
                replace_outlet,
                attributes,
                events,
                after_connect_hook: after_connect,
                root: Cell::new(placeholder),
                listeners: RefCell::new(Vec::new()),
                pending_appends: RefCell::new(Vec::new()),
                after_render: Signal::new(),
                pattern_connection: RefCell::new(None),
                after_render_connection: RefCell::new(None),
                connect_connection: RefCell::new(None),
                destroyed: Cell::new(false),
            }),
        };

        let weak = component.downgrade();
        let guard = component.inner.pattern.changed().connect_scoped(move |_| {
            if let Some(component) = weak.upgrade() {
                if let Err(error) = component.render(false) {
                    tracing::error!(target: targets::COMPONENT, %error, "re-render after pattern change failed");
                }
            }
        });
        component.inner.pattern_connection.replace(Some(guard));

        for (key, decl) in subcomponents {
            component.register_subcomponent(key, decl)?;
        }

        if let Some(init) = init {
            init(&component);
        }

        let weak = component.downgrade();
        let guard = component.inner.after_render.connect_scoped(move |_| {
            if let (Some(hook), Some(component)) = (&after_render, weak.upgrade()) {
                hook(&component);
            }
        });
        component.inner.after_render_connection.replace(Some(guard));

        if !options.dont_render && component.inner.autorender {
            if component.inner.replace_outlet {
                component.replace(None)?;
            } else {
                component.append(None)?;
            }
        }

        component.listen_for_connect();

        tracing::debug!(
            target: targets::COMPONENT,
            id = component.inner.id,
            children = component.inner.children.borrow().len(),
            "component initialized"
        );
        Ok(component)
    }

    fn listen_for_connect(&self) {
        let connection = self.inner.runtime.connection();
        drop(self.inner.connect_connection.take());

        if connection.is_connected() {
            self.after_connect();
        } else {
            let weak = self.downgrade();
            let guard = connection.connect_signal().connect_scoped(move |_| {
                if let Some(component) = weak.upgrade() {
                    component.after_connect();
                }
            });
            self.inner.connect_connection.replace(Some(guard));
        }
    }

    fn after_connect(&self) {
        tracing::trace!(target: targets::COMPONENT, id = self.inner.id, "connection live");
        if let Some(hook) = &self.inner.after_connect_hook {
            hook(self);
        }
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.inner.destroyed.get() {
            Err(Error::Destroyed)
        } else {
            Ok(())
        }
    }

    /// Render, then append the root element to the outlet.
    ///
    /// The outlet is `outlet` if given, else the configured one. For a child
    /// the search is limited to the parent's current root element.
    pub fn append(&self, outlet: Option<&str>) -> Result<()> {
        self.ensure_alive()?;
        let document = self.inner.runtime.document();
        let context = self.parent().map(|parent| parent.root_node());
        let outlet = verify_outlet(document, outlet, self.inner.outlet.as_deref(), context)?;

        self.render(false)?;
        document.append_child(outlet, self.root_node())?;
        tracing::debug!(
            target: targets::COMPONENT,
            id = self.inner.id,
            outlet = %document.describe(outlet),
            "appended"
        );
        Ok(())
    }

    /// Adopt the outlet element as the root, then render over it.
    ///
    /// The outlet is searched in the whole document, even for children.
    pub fn replace(&self, outlet: Option<&str>) -> Result<()> {
        self.ensure_alive()?;
        let document = self.inner.runtime.document();
        let outlet = verify_outlet(document, outlet, self.inner.outlet.as_deref(), None)?;

        self.set_root(outlet)?;
        self.render(false)?;
        tracing::debug!(target: targets::COMPONENT, id = self.inner.id, "replaced outlet");
        Ok(())
    }

    /// Regenerate the root element in place.
    ///
    /// Children are appended into the new element on the next event loop
    /// turn. Unless `silent`, `after_render` fires before this returns.
    pub fn render(&self, silent: bool) -> Result<()> {
        self.ensure_alive()?;
        let _span = tracing::trace_span!(
            target: targets::COMPONENT,
            span_names::COMPONENT_RENDER,
            id = self.inner.id
        )
        .entered();

        let document = self.inner.runtime.document();
        let event_loop = self.inner.runtime.event_loop();

        {
            let mut pending = self.inner.pending_appends.borrow_mut();
            pending.retain(|task| event_loop.is_pending(*task));
            if !pending.is_empty() {
                tracing::warn!(
                    target: targets::COMPONENT,
                    id = self.inner.id,
                    stale = pending.len(),
                    "rendering again before child appends from the previous render ran; \
                     they will append into the new element"
                );
            }
        }

        let element = self.generate(None)?;
        document.replace_node(self.root_node(), element)?;
        self.set_root(element)?;
        self.bind_events()?;

        let children = self.inner.children.borrow().clone();
        let mut tasks = Vec::with_capacity(children.len());
        for (key, child) in children {
            let weak = child.downgrade();
            tasks.push(event_loop.post(move || {
                let Some(child) = weak.upgrade() else {
                    return;
                };
                if let Err(error) = child.append(None) {
                    tracing::error!(target: targets::COMPONENT, key = %key, %error, "deferred child append failed");
                }
            }));
        }
        self.inner.pending_appends.borrow_mut().extend(tasks);

        tracing::debug!(target: targets::COMPONENT, id = self.inner.id, ?element, "rendered");
        if !silent {
            self.inner.after_render.emit(());
        }
        Ok(())
    }

    /// Materialize the pattern's output as a new detached element.
    ///
    /// `data` is laid over the model's attributes. The element is not placed.
    pub fn generate(&self, data: Option<&Attributes>) -> Result<NodeId> {
        let mut attributes = self.inner.pattern.model().snapshot();
        if let Some(data) = data {
            attributes.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        let spec = self.inner.pattern.generate(&attributes)?;
        Ok(self.inner.runtime.document().create(&spec))
    }

    /// Build a child from a declaration and store it under `key`.
    ///
    /// The child is not placed; the next render of this component appends it.
    /// An existing child under `key` is replaced in place and dropped.
    /// A declaration without an `outlet` uses the registered definition's own
    /// outlet instead of failing with [`Error::NoOutlet`].
    pub fn register_subcomponent(&self, key: impl Into<String>, decl: SubcomponentDecl) -> Result<Component> {
        let key = key.into();
        let registry = self.inner.runtime.components();
        let name = decl
            .component
            .as_deref()
            .ok_or_else(|| Error::unknown_subcomponent(None))?;
        let config = registry
            .config_for(name)
            .ok_or_else(|| Error::unknown_subcomponent(Some(name)))?;

        let mut config = config.with_parent(Rc::downgrade(&self.inner));
        if decl.outlet.is_some() {
            config.outlet = decl.outlet;
        }

        let child = Component::build(&self.inner.runtime, config, ConstructOptions::default())?;

        let replaced = {
            let mut children = self.inner.children.borrow_mut();
            match children.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => Some(std::mem::replace(&mut entry.1, child.clone())),
                None => {
                    children.push((key.clone(), child.clone()));
                    None
                }
            }
        };
        if replaced.is_some() {
            tracing::debug!(target: targets::TREE, key = %key, "replaced subcomponent");
        }
        drop(replaced);

        tracing::debug!(target: targets::TREE, parent = self.inner.id, key = %key, component = name, "registered subcomponent");
        Ok(child)
    }

    /// Tear the component down.
    ///
    /// Removes delegated event handlers and signal subscriptions, then removes
    /// the root element from the document. Children are left alone. Calling
    /// this again does nothing.
    pub fn destroy(&self) {
        if self.inner.destroyed.replace(true) {
            return;
        }
        let document = self.inner.runtime.document();

        self.unbind_events();
        drop(self.inner.after_render_connection.take());
        drop(self.inner.connect_connection.take());
        drop(self.inner.pattern_connection.take());

        let root = self.root_node();
        document.remove_node(root);
        document.release(root);
        tracing::debug!(target: targets::COMPONENT, id = self.inner.id, "destroyed");
    }

    /// Retarget the pattern's template, which triggers a re-render.
    pub fn set_template(&self, selector: &str) -> Result<()> {
        self.inner.pattern.set_template(selector)
    }

    /// Set an attribute on the pattern's model, which re-renders on change.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        self.inner.pattern.model().set(key, value)
    }

    /// Read an attribute from the pattern's model.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.pattern.model().get(key)
    }

    fn set_root(&self, node: NodeId) -> Result<()> {
        let document = self.inner.runtime.document();
        let previous = self.inner.root.get();
        if previous == node {
            return Ok(());
        }
        document.retain(node)?;
        self.inner.root.set(node);
        self.unbind_events();
        document.release(previous);
        Ok(())
    }

    fn bind_events(&self) -> Result<()> {
        self.unbind_events();
        let document = self.inner.runtime.document();
        let root = self.root_node();
        let mut listeners = Vec::with_capacity(self.inner.events.len());
        for binding in &self.inner.events {
            let weak = self.downgrade();
            let handler = binding.handler.clone();
            listeners.push(document.delegate(
                root,
                binding.event.clone(),
                binding.selector.as_deref(),
                move |event| {
                    if let Some(component) = weak.upgrade() {
                        handler(&component, event);
                    }
                },
            )?);
        }
        self.inner.listeners.replace(listeners);
        Ok(())
    }

    fn unbind_events(&self) {
        let document = self.inner.runtime.document();
        for listener in self.inner.listeners.take() {
            document.undelegate(listener);
        }
    }

    /// Create a weak handle.
    pub fn downgrade(&self) -> WeakComponent {
        WeakComponent {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether two handles refer to the same component.
    pub fn ptr_eq(&self, other: &Component) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Process-unique id, used in logs and debug output.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Registered type name, if built from the registry or named.
    pub fn type_name(&self) -> Option<&str> {
        self.inner.type_name.as_deref()
    }

    /// The runtime this component was built against.
    pub fn runtime(&self) -> &Runtime {
        &self.inner.runtime
    }

    /// The element currently representing this component.
    pub fn root_node(&self) -> NodeId {
        self.inner.root.get()
    }

    /// Configured outlet selector.
    pub fn outlet(&self) -> Option<&str> {
        self.inner.outlet.as_deref()
    }

    /// Whether the component places itself on construction.
    pub fn autorender(&self) -> bool {
        self.inner.autorender
    }

    /// Whether placement replaces the outlet.
    pub fn replaces_outlet(&self) -> bool {
        self.inner.replace_outlet
    }

    /// The resolved model, if one was configured.
    pub fn model(&self) -> Option<Model> {
        self.inner.model.clone()
    }

    /// The pattern this component renders.
    pub fn pattern(&self) -> Rc<dyn Pattern> {
        self.inner.pattern.clone()
    }

    /// An extra attribute from the configuration.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        self.inner.attributes.get(key).cloned()
    }

    /// The parent component, if this is a live child.
    pub fn parent(&self) -> Option<Component> {
        self.inner
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Component { inner })
    }

    /// Children in registration order.
    pub fn children(&self) -> Vec<(String, Component)> {
        self.inner.children.borrow().clone()
    }

    /// Look up a child by key.
    pub fn child(&self, key: &str) -> Option<Component> {
        self.inner
            .children
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, child)| child.clone())
    }

    /// Child keys in registration order.
    pub fn child_keys(&self) -> Vec<String> {
        self.inner
            .children
            .borrow()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Emitted after every non-silent render.
    pub fn after_render_signal(&self) -> &Signal<()> {
        &self.inner.after_render
    }

    /// Number of child appends scheduled by renders that have not run yet.
    pub fn pending_child_appends(&self) -> usize {
        let event_loop = self.inner.runtime.event_loop();
        self.inner
            .pending_appends
            .borrow()
            .iter()
            .filter(|task| event_loop.is_pending(**task))
            .count()
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.get()
    }
}

static_assertions::assert_not_impl_any!(Component: Send, Sync);
