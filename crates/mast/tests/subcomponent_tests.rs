//! Tests for subcomponent registration and deferred child placement.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use mast::mast_core::EventLoopConfig;
use mast::dom::ElementSpec;
use mast::{
    Component, ComponentConfig, ComponentTreeDebug, ConstructOptions, Error, Runtime,
    SubcomponentDecl,
};
use serde_json::json;

use common::{capture_logs, runtime};

fn register_child(runtime: &Runtime) {
    runtime
        .components()
        .register("Child", || ComponentConfig::new().with_template("#child"));
}

fn root_with_child(runtime: &Runtime) -> Component {
    Component::new(
        runtime,
        ComponentConfig::new()
            .with_template("#t1")
            .with_outlet("#app")
            .with_subcomponent("c1", SubcomponentDecl::new("Child").with_outlet("#slot")),
    )
    .unwrap()
}

#[test]
fn test_child_is_placed_on_next_turn() {
    let runtime = runtime();
    register_child(&runtime);
    let root = root_with_child(&runtime);
    let document = runtime.document();

    let child = root.child("c1").unwrap();
    assert!(child.parent().unwrap().ptr_eq(&root));
    assert!(!child.autorender());
    assert!(!document.is_attached(child.root_node()));
    assert_eq!(root.pending_child_appends(), 1);

    assert_eq!(runtime.event_loop().run_until_idle().unwrap(), 1);

    let slot = document.query("#slot").unwrap().single().unwrap();
    assert_eq!(document.children(slot), vec![child.root_node()]);
    assert_eq!(root.pending_child_appends(), 0);
}

#[test]
fn test_rerender_moves_children_into_new_element() {
    let runtime = runtime();
    register_child(&runtime);
    let root = root_with_child(&runtime);
    let document = runtime.document();
    runtime.event_loop().run_until_idle().unwrap();

    let old_root = root.root_node();
    let old_child = root.child("c1").unwrap().root_node();

    root.set("title", "again");
    // The child's element survives in the detached old root until the
    // deferred append moves the child over.
    assert!(document.contains(old_child));
    assert!(document.contains(old_root));
    assert!(!document.is_attached(old_child));

    runtime.event_loop().run_until_idle().unwrap();
    assert!(!document.contains(old_root));
    assert!(!document.contains(old_child));
    let slot = document.query("#slot").unwrap().single().unwrap();
    assert_eq!(document.children(slot), vec![root.child("c1").unwrap().root_node()]);
}

#[test]
fn test_stale_pending_appends_warn_but_still_run() {
    let runtime = runtime();
    register_child(&runtime);
    let root = root_with_child(&runtime);
    let document = runtime.document();
    assert_eq!(root.pending_child_appends(), 1);

    let (result, logs) = capture_logs(|| root.render(false));
    result.unwrap();
    assert!(logs.contains("WARN"));
    assert!(logs.contains("rendering again before child appends"));
    assert_eq!(root.pending_child_appends(), 2);

    assert_eq!(runtime.event_loop().run_until_idle().unwrap(), 2);
    let slot = document.query("#slot").unwrap().single().unwrap();
    assert_eq!(document.children(slot).len(), 1);
    assert_eq!(document.query(".child").unwrap().len(), 1);
}

#[test]
fn test_children_are_appended_in_declaration_order() {
    let runtime = runtime();
    register_child(&runtime);
    runtime.templates().register(
        "#list",
        ElementSpec::new("ul").with_child(ElementSpec::new("li").with_id("items")),
    );
    runtime.components().register("Labelled", || {
        ComponentConfig::new()
            .with_template("#child")
            .with_model_attributes(json!({ "label": "second" }))
    });

    let root = Component::new(
        &runtime,
        ComponentConfig::new()
            .with_template("#list")
            .with_outlet("#app")
            .with_subcomponent("first", SubcomponentDecl::new("Child").with_outlet("#items"))
            .with_subcomponent("second", SubcomponentDecl::new("Labelled").with_outlet("#items")),
    )
    .unwrap();
    runtime.event_loop().run_until_idle().unwrap();

    assert_eq!(root.child_keys(), vec!["first", "second"]);
    let document = runtime.document();
    let items = document.query("#items").unwrap().single().unwrap();
    let placed: Vec<_> = document
        .children(items)
        .into_iter()
        .map(|node| document.text(node).unwrap_or_default())
        .collect();
    assert_eq!(placed, vec!["", "second"]);
}

#[test]
fn test_reregistering_a_key_keeps_one_entry() {
    let runtime = runtime();
    register_child(&runtime);
    runtime
        .components()
        .register("Other", || ComponentConfig::new().with_template("#t1"));

    let root = Component::build(
        &runtime,
        ComponentConfig::new().with_template("#t1"),
        ConstructOptions::dont_render(),
    )
    .unwrap();

    let first = root
        .register_subcomponent("c1", SubcomponentDecl::new("Child"))
        .unwrap()
        .downgrade();
    root.register_subcomponent("c1", SubcomponentDecl::new("Other"))
        .unwrap();

    assert_eq!(root.children().len(), 1);
    assert_eq!(root.child("c1").unwrap().type_name(), Some("Other"));
    // The replaced child was dropped.
    assert!(first.upgrade().is_none());
}

#[test]
fn test_unknown_subcomponent_type() {
    let runtime = runtime();
    register_child(&runtime);

    let missing_name = Component::new(
        &runtime,
        ComponentConfig::new()
            .with_template("#t1")
            .with_outlet("#app")
            .with_subcomponent("c1", SubcomponentDecl::default()),
    );
    assert!(matches!(
        missing_name,
        Err(Error::UnknownSubcomponentType { component: None })
    ));

    let unknown = Component::new(
        &runtime,
        ComponentConfig::new()
            .with_template("#t1")
            .with_outlet("#app")
            .with_subcomponent("c1", SubcomponentDecl::new("Ghost")),
    );
    assert!(matches!(
        unknown,
        Err(Error::UnknownSubcomponentType { component: Some(name) }) if name == "Ghost"
    ));

    // Failed construction placed nothing.
    assert_eq!(runtime.document().query(".page").unwrap().len(), 0);
}

#[test]
fn test_declaration_outlet_falls_back_to_definition() {
    let runtime = runtime();
    runtime.components().register("Docked", || {
        ComponentConfig::new()
            .with_template("#child")
            .with_outlet("#slot")
    });

    let root = Component::new(
        &runtime,
        ComponentConfig::new()
            .with_template("#t1")
            .with_outlet("#app")
            .with_subcomponent("docked", SubcomponentDecl::new("Docked")),
    )
    .unwrap();
    assert_eq!(root.child("docked").unwrap().outlet(), Some("#slot"));

    runtime.event_loop().run_until_idle().unwrap();
    assert_eq!(runtime.document().query("#slot .child").unwrap().len(), 1);
}

#[test]
fn test_child_outlet_is_scoped_to_parent() {
    let runtime = runtime();
    register_child(&runtime);
    // A second #slot outside the parent must not confuse the child.
    let document = runtime.document();
    let decoy = document.create(&ElementSpec::new("div").with_id("slot"));
    document.append_child(document.root(), decoy).unwrap();

    let _root = root_with_child(&runtime);
    runtime.event_loop().run_until_idle().unwrap();

    assert!(document.children(decoy).is_empty());
    assert_eq!(document.query(".page #slot .child").unwrap().len(), 1);
}

#[test]
fn test_failed_child_append_is_logged() {
    let runtime = runtime();
    register_child(&runtime);
    let root = Component::new(
        &runtime,
        ComponentConfig::new()
            .with_template("#two-slots")
            .with_outlet("#app")
            .with_subcomponent("c1", SubcomponentDecl::new("Child").with_outlet(".slot")),
    )
    .unwrap();

    let (result, logs) = capture_logs(|| runtime.event_loop().run_until_idle());
    assert_eq!(result.unwrap(), 1);
    assert!(logs.contains("deferred child append failed"));
    assert!(logs.contains("More than one element exists in this template context"));
    assert!(!runtime.document().is_attached(root.child("c1").unwrap().root_node()));
}

#[test]
fn test_destroy_does_not_cascade() {
    let runtime = runtime();
    register_child(&runtime);
    let root = root_with_child(&runtime);
    runtime.event_loop().run_until_idle().unwrap();
    let document = runtime.document();
    let child = root.child("c1").unwrap();
    let parent_node = root.root_node();

    root.destroy();
    assert!(root.is_destroyed());
    assert!(!child.is_destroyed());
    // The child still holds its element, detached along with the parent's.
    assert!(document.contains(child.root_node()));
    assert!(document.contains(parent_node));
    assert!(!document.is_attached(child.root_node()));
    assert_eq!(document.query(".page").unwrap().len(), 0);

    // Destroying the child as well releases the rest.
    child.destroy();
    assert!(!document.contains(parent_node));
}

#[test]
fn test_child_renders_independently() {
    let runtime = runtime();
    register_child(&runtime);
    let parent_renders = Rc::new(Cell::new(0));
    let parent_renders_clone = parent_renders.clone();
    let root = Component::new(
        &runtime,
        ComponentConfig::new()
            .with_template("#t1")
            .with_outlet("#app")
            .with_subcomponent("c1", SubcomponentDecl::new("Child").with_outlet("#slot"))
            .on_after_render(move |_| parent_renders_clone.set(parent_renders_clone.get() + 1)),
    )
    .unwrap();
    runtime.event_loop().run_until_idle().unwrap();

    let child = root.child("c1").unwrap();
    child.set("label", "updated");
    let document = runtime.document();
    assert_eq!(document.text(child.root_node()).as_deref(), Some("updated"));
    assert_eq!(document.query("#slot .child").unwrap().len(), 1);
    assert_eq!(parent_renders.get(), 1);
    assert!(!runtime.event_loop().has_pending());
}

#[test]
fn test_manifest_registered_components() {
    let runtime = runtime();
    runtime.components().register_manifest(
        "Child",
        mast::ComponentManifest::from_json(
            r##"{ "template": "#child", "model": { "label": "from manifest" } }"##,
        )
        .unwrap(),
    );

    let config = ComponentConfig::from_json(
        r##"{
            "template": "#t1",
            "outlet": "#app",
            "model": { "title": "Manifest" },
            "subcomponents": [
                { "key": "c1", "component": "Child", "outlet": "#slot" }
            ]
        }"##,
    )
    .unwrap();
    let root = Component::new(&runtime, config).unwrap();
    runtime.event_loop().run_until_idle().unwrap();

    let document = runtime.document();
    let child = document.query("#slot .child").unwrap().single().unwrap();
    assert_eq!(document.text(child).as_deref(), Some("from manifest"));
    assert_eq!(root.get("title"), Some(json!("Manifest")));
}

#[test]
fn test_tree_debug_output() {
    let runtime = runtime();
    register_child(&runtime);
    let root = Component::new(
        &runtime,
        ComponentConfig::new()
            .with_type_name("Page")
            .with_template("#t1")
            .with_outlet("#app")
            .with_subcomponent("c1", SubcomponentDecl::new("Child").with_outlet("#slot"))
            .with_subcomponent("c2", SubcomponentDecl::new("Child").with_outlet("#slot")),
    )
    .unwrap();

    let output = ComponentTreeDebug::ascii().format(&root);
    assert_eq!(output, "Page\n+-- c1\n`-- c2\n");

    let detailed = ComponentTreeDebug::with_options(mast::mast_core::TreeFormatOptions::detailed())
        .format(&root);
    assert!(detailed.contains(&format!("c1 [#{}] (Child)", root.child("c1").unwrap().id())));
    assert!(detailed.contains("outlet: #slot"));
    assert!(detailed.contains("(detached)"));
}

#[test]
fn test_runaway_rerendering_stalls_the_event_loop() {
    let runtime = Runtime::with_event_loop_config(EventLoopConfig::default().with_max_turns(3));
    let document = runtime.document();
    let app = document.create(&ElementSpec::new("div").with_id("app"));
    document.append_child(document.root(), app).unwrap();
    runtime
        .templates()
        .register("#t1", ElementSpec::new("div").with_child(ElementSpec::new("p").with_id("slot")));
    runtime.templates().register("#child", ElementSpec::new("span"));
    register_child(&runtime);

    // The child re-renders its parent every time it is appended, which
    // schedules yet another append.
    let root = Rc::new(std::cell::RefCell::new(None::<Component>));
    let root_clone = root.clone();
    runtime.components().register("Echo", move || {
        let root = root_clone.clone();
        ComponentConfig::new()
            .with_template("#child")
            .on_after_render(move |_| {
                if let Some(root) = root.borrow().as_ref() {
                    let _ = root.render(true);
                }
            })
    });

    let component = Component::new(
        &runtime,
        ComponentConfig::new()
            .with_template("#t1")
            .with_outlet("#app")
            .with_subcomponent("echo", SubcomponentDecl::new("Echo").with_outlet("#slot")),
    )
    .unwrap();
    *root.borrow_mut() = Some(component);

    let (result, _logs) = capture_logs(|| runtime.event_loop().run_until_idle());
    assert!(matches!(
        result,
        Err(mast::mast_core::EventLoopError::Stalled { turns: 3, pending: 1 })
    ));
    root.borrow_mut().take();
}
