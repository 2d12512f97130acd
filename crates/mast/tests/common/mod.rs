//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use mast::dom::ElementSpec;
use mast::Runtime;

/// A runtime whose document holds `<div id="app">` and a few templates:
///
/// - `#t1`: `<section class="page"><h1>{{ title }}</h1><div id="slot"></div></section>`
/// - `#child`: `<span class="child">{{ label }}</span>`
///
/// Missing `title` and `label` attributes render as empty text.
/// - `#two-slots`: a section with two `.slot` elements
pub fn runtime() -> Runtime {
    let runtime = Runtime::new();
    let document = runtime.document();
    let app = document.create(&ElementSpec::new("div").with_id("app"));
    document.append_child(document.root(), app).unwrap();

    let templates = runtime.templates();
    templates.register(
        "#t1",
        ElementSpec::new("section").with_class("page").with_children([
            ElementSpec::new("h1").with_text("{{ title | default(value=\"\") }}"),
            ElementSpec::new("div").with_id("slot"),
        ]),
    );
    templates.register(
        "#child",
        ElementSpec::new("span").with_class("child").with_text("{{ label | default(value=\"\") }}"),
    );
    templates.register(
        "#two-slots",
        ElementSpec::new("section").with_children([
            ElementSpec::new("div").with_class("slot"),
            ElementSpec::new("div").with_class("slot"),
        ]),
    );
    runtime
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber capturing every log line, and return the
/// captured text alongside `f`'s result.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap().clone();
    (result, String::from_utf8_lossy(&bytes).into_owned())
}
