//! Cooperative single-threaded event loop.
//!
//! Work that must run "on the next turn" (after the current call stack has
//! unwound) is posted as a task. A turn runs every task that was queued when
//! the turn started, in FIFO order; tasks posted while a turn is running are
//! deferred to the following turn.
//!
//! The loop is driven explicitly by its owner: call [`EventLoop::turn`] to run
//! a single turn or [`EventLoop::run_until_idle`] to drain the queue.
//!
//! # Example
//!
//! ```
//! use mast_core::EventLoop;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let event_loop = EventLoop::new();
//! let log = Rc::new(RefCell::new(Vec::new()));
//!
//! let inner_loop = event_loop.clone();
//! let inner_log = log.clone();
//! event_loop.post(move || {
//!     inner_log.borrow_mut().push("first");
//!     let nested_log = inner_log.clone();
//!     inner_loop.post(move || nested_log.borrow_mut().push("next turn"));
//! });
//!
//! assert_eq!(event_loop.turn(), 1);
//! assert_eq!(*log.borrow(), vec!["first"]);
//! event_loop.run_until_idle().unwrap();
//! assert_eq!(*log.borrow(), vec!["first", "next turn"]);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use crate::error::EventLoopError;
use crate::logging::{span_names, targets, PerfSpan};

/// A unique identifier for a posted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// Configuration for an [`EventLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventLoopConfig {
    /// Maximum number of turns [`EventLoop::run_until_idle`] runs before
    /// giving up. Guards against tasks that keep re-posting themselves.
    pub max_turns: usize,
}

impl Default for EventLoopConfig {
    fn default() -> Self {
        Self { max_turns: 1024 }
    }
}

impl EventLoopConfig {
    /// Set the turn limit.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }
}

type BoxedTask = Box<dyn FnOnce() + 'static>;

struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

struct EventLoopInner {
    queue: RefCell<VecDeque<TaskData>>,
    next_id: Cell<u64>,
    turns: Cell<u64>,
    config: EventLoopConfig,
}

/// Shared handle to a cooperative task queue.
///
/// Cloning the handle shares the same queue.
#[derive(Clone)]
pub struct EventLoop {
    inner: Rc<EventLoopInner>,
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("pending", &self.pending_count())
            .field("turns", &self.turns_run())
            .field("config", &self.inner.config)
            .finish()
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    /// Create an event loop with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EventLoopConfig::default())
    }

    /// Create an event loop with a custom configuration.
    pub fn with_config(config: EventLoopConfig) -> Self {
        Self {
            inner: Rc::new(EventLoopInner {
                queue: RefCell::new(VecDeque::new()),
                next_id: Cell::new(1),
                turns: Cell::new(0),
                config,
            }),
        }
    }

    /// The configuration this loop was created with.
    pub fn config(&self) -> EventLoopConfig {
        self.inner.config
    }

    /// Post a task to run on the next turn.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + 'static,
    {
        let id = TaskId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.queue.borrow_mut().push_back(TaskData {
            id,
            task: Box::new(task),
        });
        tracing::trace!(target: targets::EVENT_LOOP, task = id.0, "posted task");
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&self, id: TaskId) -> bool {
        let mut queue = self.inner.queue.borrow_mut();
        if let Some(pos) = queue.iter().position(|t| t.id == id) {
            queue.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check whether a task is still queued.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.inner.queue.borrow().iter().any(|t| t.id == id)
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.inner.queue.borrow().is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    /// Total number of turns run so far.
    pub fn turns_run(&self) -> u64 {
        self.inner.turns.get()
    }

    /// Run one turn: every task queued before this call, in FIFO order.
    ///
    /// Returns the number of tasks executed.
    #[tracing::instrument(skip_all, target = "mast::event_loop", level = "trace")]
    pub fn turn(&self) -> usize {
        let boundary = self.inner.next_id.get();
        self.inner.turns.set(self.inner.turns.get() + 1);

        let mut executed = 0;
        loop {
            // The queue borrow must end before the task runs; tasks post.
            let next = {
                let mut queue = self.inner.queue.borrow_mut();
                match queue.front() {
                    Some(front) if front.id.0 < boundary => queue.pop_front(),
                    _ => None,
                }
            };
            let Some(task_data) = next else { break };
            tracing::trace!(target: targets::EVENT_LOOP, task = task_data.id.0, "running task");
            (task_data.task)();
            executed += 1;
        }

        tracing::trace!(target: targets::EVENT_LOOP, executed, "turn complete");
        executed
    }

    /// Run turns until the queue is empty.
    ///
    /// Returns the number of tasks executed, or [`EventLoopError::Stalled`] if
    /// the queue is still non-empty after `max_turns` turns.
    pub fn run_until_idle(&self) -> Result<usize, EventLoopError> {
        let _perf = PerfSpan::new(span_names::EVENT_LOOP);
        let mut executed = 0;
        let mut turns = 0;
        while self.has_pending() {
            if turns == self.inner.config.max_turns {
                tracing::error!(
                    target: targets::EVENT_LOOP,
                    turns,
                    pending = self.pending_count(),
                    "event loop did not become idle"
                );
                return Err(EventLoopError::Stalled {
                    turns,
                    pending: self.pending_count(),
                });
            }
            executed += self.turn();
            turns += 1;
        }
        Ok(executed)
    }
}

static_assertions::assert_not_impl_any!(EventLoop: Send, Sync);
