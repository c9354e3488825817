//! Configuration constants for the partial element engine
//!
//! Centralized values used throughout the engine for:
//! - The recognized property vocabulary
//! - Attribute names produced during materialization
//! - Recursion depth limits (prevent stack overflow)
//!
//! The merge strategy table is the only runtime-tunable configuration; see
//! [`crate::strategy::StrategyTable`].

/// Property naming the concrete output element.
pub const ELEMENT_KEY: &str = "element";

/// Property holding space-separated class tokens.
pub const CLASS_NAME_KEY: &str = "className";

/// Property disabling the materialized element.
pub const DISABLED_KEY: &str = "disabled";

/// Property keeping event handlers on a disabled element.
pub const ALLOW_HANDLERS_WHILE_DISABLED_KEY: &str = "allowEventHandlersWhileDisabled";

/// Property holding structured `data-*` entries.
pub const DATA_KEY: &str = "data";

/// Property holding the debug label.
pub const DEBUG_NAME_KEY: &str = "debugName";

/// Property controlling whether fragments are unwrapped.
pub const UNWRAP_FRAGMENTS_KEY: &str = "unwrapFragments";

/// Children payload key. Never part of an accumulated property set.
pub const CHILDREN_KEY: &str = "children";

/// Prefix identifying event handler properties (`onClick`, `onChange`, ...).
pub const EVENT_HANDLER_PREFIX: &str = "on";

/// Element used when no `element` property reaches the terminal node.
pub const DEFAULT_ELEMENT: &str = "div";

/// Elements with native disabled semantics.
pub const DISABLEABLE_ELEMENTS: &[&str] = &["input", "button"];

/// Character marking a custom element name (`my-widget`).
pub const CUSTOM_ELEMENT_SEPARATOR: char = '-';

/// Attribute receiving the class list on standard elements.
pub const CLASS_NAME_ATTRIBUTE: &str = "className";

/// Attribute receiving the class list on custom elements.
pub const CLASS_ATTRIBUTE: &str = "class";

/// Disabled marker attribute and its value.
pub const DISABLED_ATTRIBUTE: &str = "disabled";
pub const DISABLED_ATTRIBUTE_VALUE: &str = "disabled";

/// Non-interactive marker for elements without native disabled semantics.
pub const DATA_DISABLED_ATTRIBUTE: &str = "data-disabled";

/// Attribute receiving the debug label.
pub const DEBUG_NAMES_ATTRIBUTE: &str = "data-debug-names";

/// Prefix for attributes projected from the `data` property.
pub const DATA_ATTRIBUTE_PREFIX: &str = "data-";

/// Text of the placeholder rendered for unrecognized nodes.
pub const ERROR_PLACEHOLDER_TEXT: &str = "ERROR";

/// Maximum nesting depth of wrapper, component and provider layers.
///
/// Prevents stack overflow on pathological trees (e.g. a component that
/// returns itself). 256 layers is far beyond any hand-written wrapper chain.
pub const MAX_REWRITE_DEPTH: usize = 256;
