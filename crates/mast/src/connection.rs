//! Realtime link state shared by all components.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use mast_core::logging::targets;
use mast_core::Signal;

struct ConnectionInner {
    connected: Cell<bool>,
    connect: Signal<()>,
    disconnect: Signal<()>,
}

/// Shared handle to the application's realtime connection.
///
/// There is no transport here: whatever owns the link reports its state
/// through [`set_connected`](Self::set_connected) and components react to the
/// [`connect_signal`](Self::connect_signal).
#[derive(Clone)]
pub struct Connection {
    inner: Rc<ConnectionInner>,
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("connected", &self.inner.connected.get())
            .finish()
    }
}

impl Connection {
    /// Create a disconnected connection.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ConnectionInner {
                connected: Cell::new(false),
                connect: Signal::new(),
                disconnect: Signal::new(),
            }),
        }
    }

    /// Whether the link is currently live.
    pub fn is_connected(&self) -> bool {
        self.inner.connected.get()
    }

    /// Update the link state. Emits `connect` or `disconnect` on transitions
    /// only.
    pub fn set_connected(&self, connected: bool) {
        if self.inner.connected.replace(connected) == connected {
            return;
        }
        tracing::info!(target: targets::CONNECTION, connected, "connection state changed");
        if connected {
            self.inner.connect.emit(());
        } else {
            self.inner.disconnect.emit(());
        }
    }

    /// Emitted when the link becomes live.
    pub fn connect_signal(&self) -> &Signal<()> {
        &self.inner.connect
    }

    /// Emitted when the link drops.
    pub fn disconnect_signal(&self) -> &Signal<()> {
        &self.inner.disconnect
    }
}
