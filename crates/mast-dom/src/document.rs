//! Arena-backed host document.
//!
//! The document owns every element node in a slot map. Nodes are either
//! attached (reachable from the document root) or detached. Detached subtrees
//! are freed as soon as nothing retains any node inside them, which mirrors
//! how a garbage-collected host keeps a detached subtree alive while some
//! script still references one of its nodes.
//!
//! Components [`retain`](Document::retain) the node they currently render
//! into and [`release`](Document::release) it when they move on.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fmt::{self, Write as _};
use std::rc::Rc;

use mast_core::logging::targets;
use mast_core::TreeFormatOptions;
use slotmap::{new_key_type, SlotMap};

use crate::element::ElementSpec;
use crate::element_set::ElementSet;
use crate::error::{DomError, Result};
use crate::event::DomEvent;
use crate::matcher;
use crate::selector::SelectorList;

new_key_type! {
    /// A stable handle to an element node.
    ///
    /// Handles of freed nodes stay harmless: every operation checks
    /// membership and treats unknown nodes as detached.
    pub struct NodeId;

    /// Identifies a delegated event listener, returned by
    /// [`Document::delegate`].
    pub struct ListenerId;
}

/// Internal data stored for each element.
pub(crate) struct NodeData {
    pub(crate) tag: String,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) text: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    retained: usize,
    listeners: Vec<ListenerId>,
}

impl NodeData {
    fn from_spec(spec: &ElementSpec) -> Self {
        Self {
            tag: spec.tag.clone(),
            id: spec.id.clone(),
            classes: spec.classes.clone(),
            attributes: spec.attributes.clone(),
            text: spec.text.clone(),
            parent: None,
            children: Vec::new(),
            retained: 0,
            listeners: Vec::new(),
        }
    }

    fn describe(&self) -> String {
        let mut out = self.tag.clone();
        if let Some(id) = &self.id {
            let _ = write!(out, "#{id}");
        }
        for class in &self.classes {
            let _ = write!(out, ".{class}");
        }
        out
    }
}

type Handler = Rc<dyn Fn(&DomEvent)>;

struct Listener {
    node: NodeId,
    event: String,
    selector: Option<SelectorList>,
    handler: Handler,
}

pub(crate) struct Tree {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    pub(crate) root: NodeId,
    listeners: SlotMap<ListenerId, Listener>,
}

impl Tree {
    fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(id).ok_or(DomError::UnknownNode(id))
    }

    fn insert_spec(&mut self, spec: &ElementSpec, parent: Option<NodeId>) -> NodeId {
        let mut data = NodeData::from_spec(spec);
        data.parent = parent;
        let id = self.nodes.insert(data);
        for child in &spec.children {
            let child_id = self.insert_spec(child, Some(id));
            self.nodes[id].children.push(child_id);
        }
        id
    }

    fn top_root(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.nodes.get(id).and_then(|d| d.parent) {
            id = parent;
        }
        id
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == ancestor {
                return true;
            }
            current = self.nodes.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get_mut(id).and_then(|d| d.parent.take()) else {
            return;
        };
        if let Some(parent_data) = self.nodes.get_mut(parent) {
            parent_data.children.retain(|&child| child != id);
        }
    }

    /// Pre-order traversal of the subtree rooted at `id`, including `id`.
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(data) = self.nodes.get(current) {
                result.push(current);
                stack.extend(data.children.iter().rev().copied());
            }
        }
        result
    }

    /// Free a detached, unretained subtree.
    fn sweep(&mut self, root: NodeId) {
        if root == self.root {
            return;
        }
        match self.nodes.get(root) {
            Some(data) if data.parent.is_none() => {}
            _ => return,
        }

        let subtree = self.subtree(root);
        if subtree.iter().any(|&id| self.nodes[id].retained > 0) {
            return;
        }

        for &id in &subtree {
            if let Some(data) = self.nodes.remove(id) {
                for listener in data.listeners {
                    self.listeners.remove(listener);
                }
            }
        }
        tracing::trace!(target: targets::DOM, ?root, freed = subtree.len(), "freed detached subtree");
    }
}

/// Shared handle to a host document.
///
/// Cloning the handle shares the same document.
#[derive(Clone)]
pub struct Document {
    tree: Rc<RefCell<Tree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree.borrow();
        f.debug_struct("Document")
            .field("root", &tree.root)
            .field("nodes", &tree.nodes.len())
            .field("listeners", &tree.listeners.len())
            .finish()
    }
}

impl Document {
    /// Create an empty document with an `html` root element.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::from_spec(&ElementSpec::new("html")));
        Self {
            tree: Rc::new(RefCell::new(Tree {
                nodes,
                root,
                listeners: SlotMap::with_key(),
            })),
        }
    }

    /// The root element. It can never be moved or removed.
    pub fn root(&self) -> NodeId {
        self.tree.borrow().root
    }

    /// Whether two handles refer to the same document.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree)
    }

    /// Materialize a spec as a new detached subtree and return its root.
    pub fn create(&self, spec: &ElementSpec) -> NodeId {
        let id = self.tree.borrow_mut().insert_spec(spec, None);
        tracing::trace!(target: targets::DOM, ?id, tag = %spec.tag, "created element");
        id
    }

    /// Wrap a single node in an [`ElementSet`].
    pub fn wrap(&self, node: NodeId) -> ElementSet {
        ElementSet::new(self.clone(), vec![node])
    }

    /// Check if a node exists.
    pub fn contains(&self, node: NodeId) -> bool {
        self.tree.borrow().nodes.contains_key(node)
    }

    /// Check if a node is reachable from the document root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let tree = self.tree.borrow();
        tree.nodes.contains_key(node) && tree.top_root(node) == tree.root
    }

    /// Number of live nodes, attached or not, including the root.
    pub fn node_count(&self) -> usize {
        self.tree.borrow().nodes.len()
    }

    /// Get the parent of a node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.borrow().nodes.get(node).and_then(|d| d.parent)
    }

    /// Get the children of a node (empty for unknown nodes).
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .borrow()
            .nodes
            .get(node)
            .map(|d| d.children.clone())
            .unwrap_or_default()
    }

    /// Get the tag of a node.
    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().nodes.get(node).map(|d| d.tag.clone())
    }

    /// Get the element id of a node.
    pub fn element_id(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().nodes.get(node).and_then(|d| d.id.clone())
    }

    /// Check whether a node carries a class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.tree
            .borrow()
            .nodes
            .get(node)
            .is_some_and(|d| d.classes.iter().any(|c| c == class))
    }

    /// Get an attribute value.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.tree
            .borrow()
            .nodes
            .get(node)
            .and_then(|d| d.attributes.get(name).cloned())
    }

    /// Get the text content of a node (not including descendants).
    pub fn text(&self, node: NodeId) -> Option<String> {
        self.tree.borrow().nodes.get(node).and_then(|d| d.text.clone())
    }

    /// Short `tag#id.class` description of a node, for messages.
    pub fn describe(&self, node: NodeId) -> String {
        self.tree
            .borrow()
            .nodes
            .get(node)
            .map(NodeData::describe)
            .unwrap_or_else(|| "(freed)".to_string())
    }

    /// Append `child` as the last child of `parent`, moving it if needed.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.node(parent)?;
        tree.node(child)?;
        if child == tree.root || tree.is_ancestor_or_self(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        let previous_root = tree.top_root(child);
        tree.detach(child);
        tree.nodes[parent].children.push(child);
        tree.nodes[child].parent = Some(parent);
        if previous_root != child {
            tree.sweep(previous_root);
        }

        tracing::trace!(target: targets::DOM, ?parent, ?child, "appended child");
        Ok(())
    }

    /// Swap `new` into the position of `old` in a single operation.
    ///
    /// Returns `Ok(false)` without touching the tree when `old` has no parent;
    /// there is no position to take over. `old` is detached and freed unless
    /// it is retained.
    pub fn replace_node(&self, old: NodeId, new: NodeId) -> Result<bool> {
        let mut tree = self.tree.borrow_mut();
        let parent = tree.node(old)?.parent;
        tree.node(new)?;
        if old == new {
            return Ok(parent.is_some());
        }
        if new == tree.root || tree.is_ancestor_or_self(new, old) {
            return Err(DomError::HierarchyRequest {
                parent: old,
                child: new,
            });
        }
        let Some(parent) = parent else {
            return Ok(false);
        };

        let previous_root = tree.top_root(new);
        tree.detach(new);
        let siblings = &mut tree.nodes[parent].children;
        if let Some(index) = siblings.iter().position(|&c| c == old) {
            siblings[index] = new;
        }
        tree.nodes[new].parent = Some(parent);
        tree.nodes[old].parent = None;

        tree.sweep(old);
        if previous_root != new {
            tree.sweep(previous_root);
        }

        tracing::trace!(target: targets::DOM, ?old, ?new, "replaced node");
        Ok(true)
    }

    /// Detach a node from the tree and free it unless it is retained.
    ///
    /// Returns `false` for unknown nodes and for the root.
    pub fn remove_node(&self, node: NodeId) -> bool {
        let mut tree = self.tree.borrow_mut();
        if node == tree.root || !tree.nodes.contains_key(node) {
            return false;
        }
        let previous_root = tree.top_root(node);
        tree.detach(node);
        tree.sweep(node);
        if previous_root != node {
            tree.sweep(previous_root);
        }
        tracing::trace!(target: targets::DOM, ?node, "removed node");
        true
    }

    /// Keep a node (and therefore its detached subtree) alive.
    pub fn retain(&self, node: NodeId) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        let data = tree.nodes.get_mut(node).ok_or(DomError::UnknownNode(node))?;
        data.retained += 1;
        Ok(())
    }

    /// Undo one [`retain`](Self::retain). Frees the node's detached subtree
    /// once nothing in it is retained anymore.
    pub fn release(&self, node: NodeId) {
        let mut tree = self.tree.borrow_mut();
        let Some(data) = tree.nodes.get_mut(node) else {
            return;
        };
        data.retained = data.retained.saturating_sub(1);
        if data.retained == 0 {
            let root = tree.top_root(node);
            tree.sweep(root);
        }
    }

    /// Query the whole attached document (descendants of the root).
    pub fn query(&self, selector: &str) -> Result<ElementSet> {
        let selector = SelectorList::parse(selector)?;
        let root = self.root();
        Ok(ElementSet::new(self.clone(), self.select(root, &selector)))
    }

    /// Query the descendants of `context`.
    pub fn query_within(&self, context: NodeId, selector: &str) -> Result<ElementSet> {
        let selector = SelectorList::parse(selector)?;
        if !self.contains(context) {
            return Err(DomError::UnknownNode(context));
        }
        Ok(ElementSet::new(self.clone(), self.select(context, &selector)))
    }

    /// Descendants of `scope` (excluding `scope`) matching `selector`, in
    /// document order.
    pub fn select(&self, scope: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        let tree = self.tree.borrow();
        tree.subtree(scope)
            .into_iter()
            .skip(1)
            .filter(|&node| matcher::matches_any(&tree, node, selector))
            .collect()
    }

    /// Check if a node matches any selector of the list.
    pub fn matches(&self, node: NodeId, selector: &SelectorList) -> bool {
        matcher::matches_any(&self.tree.borrow(), node, selector)
    }

    /// Listen for `event` bubbling through `node`.
    ///
    /// With a selector, the handler only fires for events whose target is, or
    /// is inside, a descendant of `node` matching the selector; the event's
    /// `delegate_target` is that matching element.
    pub fn delegate<F>(
        &self,
        node: NodeId,
        event: impl Into<String>,
        selector: Option<&str>,
        handler: F,
    ) -> Result<ListenerId>
    where
        F: Fn(&DomEvent) + 'static,
    {
        let selector = selector.map(SelectorList::parse).transpose()?;
        let mut tree = self.tree.borrow_mut();
        tree.node(node)?;
        let id = tree.listeners.insert(Listener {
            node,
            event: event.into(),
            selector,
            handler: Rc::new(handler),
        });
        tree.nodes[node].listeners.push(id);
        Ok(id)
    }

    /// Remove a delegated listener. Returns `false` if it was already gone.
    pub fn undelegate(&self, id: ListenerId) -> bool {
        let mut tree = self.tree.borrow_mut();
        let Some(listener) = tree.listeners.remove(id) else {
            return false;
        };
        if let Some(data) = tree.nodes.get_mut(listener.node) {
            data.listeners.retain(|&l| l != id);
        }
        true
    }

    /// Number of live listeners in the document.
    pub fn listener_count(&self) -> usize {
        self.tree.borrow().listeners.len()
    }

    /// Dispatch `event` at `target`, bubbling to the root.
    ///
    /// Returns the number of handler invocations.
    pub fn dispatch(&self, target: NodeId, event: &str) -> Result<usize> {
        let calls: Vec<(Handler, DomEvent)> = {
            let tree = self.tree.borrow();
            tree.node(target)?;

            let mut path = vec![target];
            let mut current = tree.nodes[target].parent;
            while let Some(node) = current {
                path.push(node);
                current = tree.nodes[node].parent;
            }

            let mut calls = Vec::new();
            for (depth, &node) in path.iter().enumerate() {
                for listener_id in &tree.nodes[node].listeners {
                    let listener = &tree.listeners[*listener_id];
                    if listener.event != event {
                        continue;
                    }
                    match &listener.selector {
                        None => calls.push((
                            listener.handler.clone(),
                            DomEvent::new(event, target, node, node),
                        )),
                        Some(selector) => {
                            for &inner in &path[..depth] {
                                if matcher::matches_any(&tree, inner, selector) {
                                    calls.push((
                                        listener.handler.clone(),
                                        DomEvent::new(event, target, node, inner),
                                    ));
                                }
                            }
                        }
                    }
                }
            }
            calls
        };

        tracing::trace!(target: targets::DOM, ?target, event, handlers = calls.len(), "dispatching event");
        for (handler, event) in &calls {
            handler(event);
        }
        Ok(calls.len())
    }

    /// Serialize a subtree as markup, for debugging and tests.
    pub fn to_markup(&self, node: NodeId) -> String {
        let tree = self.tree.borrow();
        let mut out = String::new();
        write_markup(&tree, node, &mut out);
        out
    }

    /// Format a subtree as an indented tree.
    pub fn dump_tree(&self, node: NodeId, options: &TreeFormatOptions) -> String {
        let tree = self.tree.borrow();
        let mut out = String::new();
        let mut visited = HashSet::new();
        dump_node(&tree, node, 0, true, options, &mut visited, &mut out);
        out
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_markup(tree: &Tree, node: NodeId, out: &mut String) {
    let Some(data) = tree.nodes.get(node) else {
        return;
    };
    let _ = write!(out, "<{}", data.tag);
    if let Some(id) = &data.id {
        let _ = write!(out, " id=\"{}\"", escape(id));
    }
    if !data.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&data.classes.join(" ")));
    }
    for (name, value) in &data.attributes {
        let _ = write!(out, " {}=\"{}\"", name, escape(value));
    }
    out.push('>');
    if let Some(text) = &data.text {
        out.push_str(&escape(text));
    }
    for &child in &data.children {
        write_markup(tree, child, out);
    }
    let _ = write!(out, "</{}>", data.tag);
}

fn dump_node(
    tree: &Tree,
    node: NodeId,
    depth: usize,
    is_last: bool,
    options: &TreeFormatOptions,
    visited: &mut HashSet<NodeId>,
    out: &mut String,
) {
    if options.exceeds_depth(depth) || !visited.insert(node) {
        return;
    }
    let Some(data) = tree.nodes.get(node) else {
        return;
    };

    out.push_str(&options.prefix(depth, is_last));
    out.push_str(&data.describe());
    if options.show_ids {
        let _ = write!(out, " [{:?}]", node);
    }
    out.push('\n');

    if options.show_details {
        let detail_prefix = options.detail_prefix(depth);
        for (name, value) in &data.attributes {
            let _ = writeln!(out, "{}  @{}={:?}", detail_prefix, name, value);
        }
        if let Some(text) = &data.text {
            let _ = writeln!(out, "{}  {:?}", detail_prefix, text);
        }
    }

    let count = data.children.len();
    for (i, &child) in data.children.iter().enumerate() {
        dump_node(tree, child, depth + 1, i + 1 == count, options, visited, out);
    }
}

static_assertions::assert_not_impl_any!(Document: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn mount(document: &Document, spec: ElementSpec) -> NodeId {
        let node = document.create(&spec);
        document.append_child(document.root(), node).unwrap();
        node
    }

    #[test]
    fn test_create_is_detached() {
        let document = Document::new();
        let node = document.create(&ElementSpec::new("div").with_child(ElementSpec::new("p")));
        assert!(document.contains(node));
        assert!(!document.is_attached(node));
        assert_eq!(document.node_count(), 3);
    }

    #[test]
    fn test_append_and_markup() {
        let document = Document::new();
        let app = mount(&document, ElementSpec::new("div").with_id("app"));
        let item = document.create(
            &ElementSpec::new("p")
                .with_class("a")
                .with_class("b")
                .with_attr("title", "x\"y")
                .with_text("1 < 2"),
        );
        document.append_child(app, item).unwrap();

        assert!(document.is_attached(item));
        assert_eq!(
            document.to_markup(app),
            "<div id=\"app\"><p class=\"a b\" title=\"x&quot;y\">1 &lt; 2</p></div>"
        );
    }

    #[test]
    fn test_append_rejects_cycles() {
        let document = Document::new();
        let outer = mount(&document, ElementSpec::new("div"));
        let inner = document.create(&ElementSpec::new("span"));
        document.append_child(outer, inner).unwrap();

        assert_eq!(
            document.append_child(inner, outer),
            Err(DomError::HierarchyRequest {
                parent: inner,
                child: outer,
            })
        );
        assert!(matches!(
            document.append_child(inner, document.root()),
            Err(DomError::HierarchyRequest { .. })
        ));
    }

    #[test]
    fn test_replace_keeps_position() {
        let document = Document::new();
        let list = mount(
            &document,
            ElementSpec::new("ul").with_children([
                ElementSpec::new("li").with_id("a"),
                ElementSpec::new("li").with_id("b"),
                ElementSpec::new("li").with_id("c"),
            ]),
        );
        let old = document.query("#b").unwrap().first().unwrap();
        let new = document.create(&ElementSpec::new("li").with_id("new"));

        assert!(document.replace_node(old, new).unwrap());
        let ids: Vec<_> = document
            .children(list)
            .into_iter()
            .filter_map(|c| document.element_id(c))
            .collect();
        assert_eq!(ids, vec!["a", "new", "c"]);
        // Unretained and detached, so freed.
        assert!(!document.contains(old));
    }

    #[test]
    fn test_replace_detached_is_noop() {
        let document = Document::new();
        let old = document.create(&ElementSpec::new("div"));
        let new = document.create(&ElementSpec::new("div"));
        assert!(!document.replace_node(old, new).unwrap());
        assert!(document.contains(old));
        assert!(!document.is_attached(new));
    }

    #[test]
    fn test_retained_nodes_keep_detached_subtree_alive() {
        let document = Document::new();
        let outer = mount(
            &document,
            ElementSpec::new("section").with_child(ElementSpec::new("div").with_id("slot")),
        );
        let slot = document.query("#slot").unwrap().first().unwrap();
        let leaf = document.create(&ElementSpec::new("span"));
        document.append_child(slot, leaf).unwrap();
        document.retain(leaf).unwrap();

        assert!(document.remove_node(outer));
        assert!(document.contains(outer));
        assert!(document.contains(leaf));
        assert!(!document.is_attached(leaf));

        // Moving the retained node out frees the abandoned subtree.
        let host = mount(&document, ElementSpec::new("main"));
        document.append_child(host, leaf).unwrap();
        assert!(!document.contains(outer));
        assert!(!document.contains(slot));

        document.release(leaf);
        assert!(document.contains(leaf));
        assert!(document.remove_node(leaf));
        assert!(!document.contains(leaf));
    }

    #[test]
    fn test_release_frees_detached_node() {
        let document = Document::new();
        let node = document.create(&ElementSpec::new("div"));
        document.retain(node).unwrap();
        document.retain(node).unwrap();
        document.release(node);
        assert!(document.contains(node));
        document.release(node);
        assert!(!document.contains(node));
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let document = Document::new();
        assert!(!document.remove_node(document.root()));
        assert!(document.contains(document.root()));
    }

    #[test]
    fn test_delegated_dispatch() {
        let document = Document::new();
        let app = mount(
            &document,
            ElementSpec::new("div").with_id("app").with_child(
                ElementSpec::new("button")
                    .with_class("save")
                    .with_child(ElementSpec::new("span")),
            ),
        );
        let span = document.query("button span").unwrap().first().unwrap();
        let button = document.query(".save").unwrap().first().unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_delegated = seen.clone();
        document
            .delegate(app, "click", Some(".save"), move |event| {
                seen_delegated.borrow_mut().push(("delegated", event.delegate_target));
            })
            .unwrap();
        let seen_direct = seen.clone();
        let direct = document
            .delegate(app, "click", None, move |event| {
                seen_direct.borrow_mut().push(("direct", event.delegate_target));
            })
            .unwrap();

        assert_eq!(document.dispatch(span, "click").unwrap(), 2);
        assert_eq!(
            *seen.borrow(),
            vec![("delegated", button), ("direct", app)]
        );

        assert_eq!(document.dispatch(span, "keyup").unwrap(), 0);
        assert!(document.undelegate(direct));
        assert!(!document.undelegate(direct));
        assert_eq!(document.dispatch(app, "click").unwrap(), 0);
    }

    #[test]
    fn test_freed_nodes_drop_listeners() {
        let document = Document::new();
        let node = mount(&document, ElementSpec::new("div"));
        document.delegate(node, "click", None, |_| {}).unwrap();
        assert_eq!(document.listener_count(), 1);
        document.remove_node(node);
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn test_dump_tree() {
        let document = Document::new();
        mount(
            &document,
            ElementSpec::new("div")
                .with_id("app")
                .with_child(ElementSpec::new("p").with_attr("lang", "en")),
        );
        let output = document.dump_tree(document.root(), &TreeFormatOptions::minimal());
        assert_eq!(output, "html\n\u{2514}\u{2500}\u{2500} div#app\n\u{2502}  \u{2514}\u{2500}\u{2500} p\n");

        let detailed = document.dump_tree(document.root(), &TreeFormatOptions::detailed());
        assert!(detailed.contains("@lang=\"en\""));
    }
}
