//! Core systems for Mast.
//!
//! This crate provides the foundations the Mast component engine is built on:
//!
//! - **Signal/Slot System**: Single-threaded observer notifications with
//!   connection IDs for explicit unsubscription
//! - **Event Loop**: A cooperative FIFO task queue with "next turn" semantics
//! - **Logging**: `tracing` targets, span names and tree formatting helpers
//!
//! # Signal/Slot Example
//!
//! ```
//! use mast_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Event Loop Example
//!
//! ```
//! use mast_core::EventLoop;
//!
//! let event_loop = EventLoop::new();
//! event_loop.post(|| println!("deferred"));
//! assert_eq!(event_loop.run_until_idle().unwrap(), 1);
//! ```

mod error;
mod event_loop;
pub mod logging;
pub mod signal;

pub use error::{EventLoopError, Result};
pub use event_loop::{EventLoop, EventLoopConfig, TaskId};
pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
