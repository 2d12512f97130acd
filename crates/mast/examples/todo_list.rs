//! Mast Todo List Example
//!
//! Builds a small page from registered component types, places the children
//! on the next event loop turn, reacts to model changes and delegated clicks,
//! and prints the document and component tree along the way.
//!
//! Run with: cargo run -p mast --example todo_list
//! Set `RUST_LOG=mast=debug` to watch the lifecycle.

use std::error::Error;

use mast::dom::ElementSpec;
use mast::mast_core::TreeFormatOptions;
use mast::prelude::*;
use mast::{ComponentTreeDebug, SubcomponentDecl};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn register_templates(runtime: &Runtime) {
    let templates = runtime.templates();
    templates.register(
        "#page",
        ElementSpec::new("main").with_class("todo").with_children([
            ElementSpec::new("header").with_id("header-slot"),
            ElementSpec::new("ul").with_id("items"),
            ElementSpec::new("footer").with_id("footer-slot"),
        ]),
    );
    templates.register(
        "#header",
        ElementSpec::new("h1").with_text("{{title}} ({{open}} open)"),
    );
    templates.register(
        "#footer",
        ElementSpec::new("div").with_children([
            ElementSpec::new("button").with_class("clear").with_text("Clear done"),
            ElementSpec::new("span").with_class("status").with_text("{{status}}"),
        ]),
    );
}

fn register_components(runtime: &Runtime, session: Model) {
    let components = runtime.components();

    components.register("Header", move || {
        ComponentConfig::new()
            .with_template("#header")
            .with_model(session.clone())
            .with_outlet("#header-slot")
    });

    components.register("Footer", || {
        ComponentConfig::new()
            .with_template("#footer")
            .with_model_attributes(json!({ "status": "offline" }))
            .with_event("click .clear", |footer, _event| {
                footer.set("status", "cleared");
            })
            .on_after_connect(|footer| {
                footer.set("status", "synced");
            })
    });
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let runtime = Runtime::new();
    let document = runtime.document();
    let app = document.create(&ElementSpec::new("div").with_id("app"));
    document.append_child(document.root(), app)?;

    let session = Model::from_value(json!({ "title": "Today", "open": 2 })).unwrap_or_default();
    runtime.models().register("Session", session.clone());

    register_templates(&runtime);
    register_components(&runtime, session.clone());

    let page = Component::new(
        &runtime,
        ComponentConfig::new()
            .with_type_name("Page")
            .with_template("#page")
            .with_outlet("#app")
            .with_registered_model("Session")
            .with_subcomponent("header", SubcomponentDecl::new("Header"))
            .with_subcomponent("footer", SubcomponentDecl::new("Footer").with_outlet("#footer-slot"))
            .on_after_render(|page| {
                tracing::info!(id = page.id(), "page rendered");
            }),
    )?;

    println!("After construction (children pending):");
    println!("{}", document.to_markup(app));

    runtime.event_loop().run_until_idle()?;
    println!("\nAfter the deferred turn:");
    println!("{}", document.to_markup(app));

    // Both the page and the header re-render; the page's children move into
    // its new element on the next turn.
    session.set("open", 1);
    runtime.event_loop().run_until_idle()?;
    println!("\nHeader after the model changed:");
    if let Some(header) = page.child("header") {
        println!("{}", document.to_markup(header.root_node()));
    }

    let clear = document.query(".clear")?.single()?;
    document.dispatch(clear, "click")?;
    runtime.connection().set_connected(true);
    if let Some(footer) = page.child("footer") {
        println!("\nFooter status: {:?}", footer.get("status"));
    }

    println!("\nComponent tree:");
    print!(
        "{}",
        ComponentTreeDebug::with_options(TreeFormatOptions::detailed()).format(&page)
    );

    println!("\nDocument tree:");
    print!(
        "{}",
        document.dump_tree(document.root(), &TreeFormatOptions::minimal())
    );

    page.destroy();
    println!("\nAfter destroy: {}", document.to_markup(app));
    Ok(())
}
