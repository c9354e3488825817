//! Composed event handlers
//!
//! Event handler properties merge by chaining instead of replacement. A
//! [`Handler`] is an ordered list of callbacks, innermost wrapper first.
//! Invoking it runs each callback in turn and stops as soon as one of them
//! calls [`Event::stop_propagation`], which lets an inner wrapper veto the
//! behavior of every wrapper around it.
//!
//! # Example
//!
//! ```
//! use partial_element_engine::{Event, Handler};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let outer_log = Rc::clone(&log);
//! let inner_log = Rc::clone(&log);
//!
//! let outer = Handler::new(move |_| outer_log.borrow_mut().push("outer"));
//! let inner = Handler::new(move |_| inner_log.borrow_mut().push("inner"));
//!
//! let chained = Handler::chain(&outer, &inner);
//! chained.invoke(&mut Event::new("click"));
//! assert_eq!(*log.borrow(), vec!["inner", "outer"]);
//! ```

use crate::types::Value;
use std::fmt;
use std::rc::Rc;

/// A single event callback.
pub type Callback = Rc<dyn Fn(&mut Event)>;

/// Event passed through a handler chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Event type, e.g. `"click"`
    pub name: String,
    /// Arbitrary payload supplied by the runtime
    pub detail: Value,
    propagation_stopped: bool,
}

impl Event {
    /// Create an event with no payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: Value::Null,
            propagation_stopped: false,
        }
    }

    /// Attach a payload.
    pub fn with_detail(mut self, detail: impl Into<Value>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Prevent handlers of enclosing wrappers from running.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// An ordered chain of callbacks, innermost first.
#[derive(Clone)]
pub struct Handler {
    callbacks: Vec<Callback>,
}

impl Handler {
    /// Wrap a single callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut Event) + 'static,
    {
        Self {
            callbacks: vec![Rc::new(callback)],
        }
    }

    /// Wrap an already shared callback.
    pub fn from_callback(callback: Callback) -> Self {
        Self {
            callbacks: vec![callback],
        }
    }

    /// Compose a parent (outer) and child (inner) handler.
    ///
    /// The child's callbacks run first; the parent's only run while the
    /// event has not been stopped.
    pub fn chain(parent: &Handler, child: &Handler) -> Handler {
        let callbacks = child
            .callbacks
            .iter()
            .chain(parent.callbacks.iter())
            .cloned()
            .collect();
        Handler { callbacks }
    }

    /// Run the chain against an event.
    pub fn invoke(&self, event: &mut Event) {
        for (i, callback) in self.callbacks.iter().enumerate() {
            if i > 0 && event.is_propagation_stopped() {
                tracing::trace!(
                    event = %event.name,
                    skipped = self.callbacks.len() - i,
                    "Propagation stopped, skipping outer handlers"
                );
                break;
            }
            callback(event);
        }
    }

    /// Number of callbacks in the chain.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({} callbacks)", self.callbacks.len())
    }
}

/// Two handlers are equal when they chain the same callbacks in the same order.
impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.callbacks.len() == other.callbacks.len()
            && self
                .callbacks
                .iter()
                .zip(other.callbacks.iter())
                .all(|(a, b)| Rc::ptr_eq(a, b))
    }
}
