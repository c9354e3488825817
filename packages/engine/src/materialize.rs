//! Materialization of a final property set into an output element
//!
//! Logical properties are translated into native attribute names:
//!
//! | property | attribute |
//! |---|---|
//! | `className` | `className`, or `class` on custom elements |
//! | `disabled` | `disabled="disabled"`, plus `data-disabled=""` where the element has no native disabled state |
//! | `debugName` | `data-debug-names` |
//! | `data.<key>` | `data-<key>` |
//!
//! Every other key is copied verbatim, except that event handlers are
//! dropped from disabled elements unless `allowEventHandlersWhileDisabled`
//! is set.

use crate::config::{
    CLASS_ATTRIBUTE, CLASS_NAME_ATTRIBUTE, CUSTOM_ELEMENT_SEPARATOR, DATA_ATTRIBUTE_PREFIX,
    DATA_DISABLED_ATTRIBUTE, DEBUG_NAMES_ATTRIBUTE, DEFAULT_ELEMENT, DISABLEABLE_ELEMENTS,
    DISABLED_ATTRIBUTE, DISABLED_ATTRIBUTE_VALUE,
};
use crate::node::Node;
use crate::props::{is_event_handler_key, PropertySet};
use crate::types::Value;

/// Whether a tag names a custom element.
pub fn is_custom_element(tag: &str) -> bool {
    tag.contains(CUSTOM_ELEMENT_SEPARATOR)
}

/// Whether a tag has native disabled semantics.
pub fn is_natively_disableable(tag: &str) -> bool {
    DISABLEABLE_ELEMENTS.contains(&tag)
}

/// Collapse runs of whitespace and trim.
pub fn normalize_class_list(class_list: &str) -> String {
    class_list.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the output element for `props` around `children`.
pub fn materialize(props: &PropertySet, children: &Node) -> Node {
    let tag = props.tag().unwrap_or(DEFAULT_ELEMENT);
    let is_custom = is_custom_element(tag);

    let mut attributes: PropertySet = props
        .pass_through()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if props.is_disabled() && !props.allows_handlers_while_disabled() {
        let handler_keys: Vec<String> = attributes
            .keys()
            .filter(|k| is_event_handler_key(k))
            .map(str::to_string)
            .collect();
        for key in &handler_keys {
            attributes.remove(key);
        }
        if !handler_keys.is_empty() {
            tracing::debug!(tag, removed = ?handler_keys, "Dropped event handlers from disabled element");
        }
    }

    let class_list = normalize_class_list(props.class_list().unwrap_or_default());
    if !class_list.is_empty() {
        let attribute = if is_custom {
            CLASS_ATTRIBUTE
        } else {
            CLASS_NAME_ATTRIBUTE
        };
        attributes.insert(attribute, class_list);
    }

    if props.is_disabled() {
        attributes.insert(DISABLED_ATTRIBUTE, DISABLED_ATTRIBUTE_VALUE);
        if !is_custom && !is_natively_disableable(tag) {
            attributes.insert(DATA_DISABLED_ATTRIBUTE, "");
        }
    }

    if let Some(label) = props.debug_label() {
        attributes.insert(DEBUG_NAMES_ATTRIBUTE, label);
    }

    if let Some(data) = props.data_entries() {
        for (key, value) in data {
            attributes.insert(format!("{}{}", DATA_ATTRIBUTE_PREFIX, key), value.clone());
        }
    }

    Node::host(tag, attributes, children.clone())
}

/// Materialize with the defaults only, e.g. for a bare portal.
pub fn materialize_plain(children: &Node) -> Node {
    materialize(&PropertySet::new(), children)
}

/// Attribute lookup helper for output nodes.
pub fn attribute<'a>(node: &'a Node, name: &str) -> Option<&'a Value> {
    node.props().and_then(|props| props.get(name))
}
