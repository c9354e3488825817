//! Partial Element Engine
//!
//! Lets a property set declared on a non-rendering "partial" node flow down
//! through any chain of wrapper nodes until it reaches the first node that
//! does render: a host element, text, a number, a list or a portal.
//! Nested partial elements compose their property sets with per-key merge
//! strategies instead of overwriting each other.
//!
//! This library provides:
//! - Classification of nodes into the variants the rewriter understands
//! - Property set merging (class lists, data mappings, handler chains, ...)
//! - Materialization of the final property set into native attributes
//! - The recursive tree rewriter tying these together
//!
//! # Example
//!
//! ```
//! use partial_element_engine::{partial_element, Node, PropertySet};
//!
//! let button = Node::partial(
//!     PropertySet::new().class_name("btn btn-primary").disabled(true),
//!     Node::text("Save"),
//! );
//!
//! let out = partial_element(
//!     &PropertySet::new().element("button").class_name("btn").data("action", "save"),
//!     &button,
//! )?;
//!
//! assert_eq!(
//!     out.to_string(),
//!     r#"<button className="btn btn-primary" data-action="save" disabled="disabled">Save</button>"#
//! );
//! # Ok::<(), partial_element_engine::EngineError>(())
//! ```

pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod handler;
pub mod materialize;
pub mod merge;
pub mod node;
pub mod props;
pub mod rewrite;
pub mod strategy;
pub mod trace;
pub mod types;

// Re-export commonly used items
pub use classify::{classify, NodeVariant};
pub use document::{node_to_json, DocumentReader};
pub use error::{EngineError, Result};
pub use handler::{Callback, Event, Handler};
pub use materialize::materialize;
pub use merge::{merge, unique_classes};
pub use node::{Component, Element, ElementKind, Node, ObjectType, RenderFn};
pub use props::{is_event_handler_key, PropertySet};
pub use rewrite::{partial_element, portal, Rewriter};
pub use strategy::{MergeStrategy, StrategyTable};
pub use trace::{TraceBuilder, TraceStep};
pub use types::{StepKind, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
