//! Node classification
//!
//! [`classify`] maps a node to the rule the rewriter applies to it. Rules are
//! checked in a fixed order and the first match wins:
//!
//! 1. **Falsy** - false, null or the empty string
//! 2. **Primitive** - text or number
//! 3. **List** - a sequence of nodes
//! 4. **HostElement** - a native element
//! 5. **Group** - a fragment; transparent unless `unwrapFragments` is false
//! 6. **MaterializeMarker** - a portal
//! 7. **Passthrough** - a partial element
//! 8. **Lazy** - an invocable component
//! 9. **Forwarding** - an object type with a render capability
//! 10. **Context** - an object type without render, with non-empty children
//! 11. **Unrecognized** - everything else
//!
//! Classification never fails.

use crate::node::{Element, ElementKind, Node};
use crate::props::PropertySet;

/// Classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeVariant {
    Falsy,
    Primitive,
    List,
    HostElement,
    /// Fragment; `transparent` is false when the accumulated set opts out
    Group { transparent: bool },
    MaterializeMarker,
    Passthrough,
    Lazy,
    Forwarding,
    Context,
    Unrecognized,
}

impl NodeVariant {
    /// Whether the rewriter stops descending at this variant.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NodeVariant::Falsy
                | NodeVariant::Primitive
                | NodeVariant::List
                | NodeVariant::HostElement
                | NodeVariant::Group { transparent: false }
                | NodeVariant::MaterializeMarker
                | NodeVariant::Unrecognized
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeVariant::Falsy => "falsy",
            NodeVariant::Primitive => "primitive",
            NodeVariant::List => "list",
            NodeVariant::HostElement => "host_element",
            NodeVariant::Group { transparent: true } => "group",
            NodeVariant::Group { transparent: false } => "opaque_group",
            NodeVariant::MaterializeMarker => "materialize_marker",
            NodeVariant::Passthrough => "passthrough",
            NodeVariant::Lazy => "lazy",
            NodeVariant::Forwarding => "forwarding",
            NodeVariant::Context => "context",
            NodeVariant::Unrecognized => "unrecognized",
        }
    }
}

/// Classify `node` given the property set accumulated so far.
pub fn classify(node: &Node, state: &PropertySet) -> NodeVariant {
    if node.is_falsy() {
        return NodeVariant::Falsy;
    }

    match node {
        Node::Text(_) | Node::Number(_) => NodeVariant::Primitive,
        Node::List(_) => NodeVariant::List,
        Node::Element(element) => classify_element(element, state),
        Node::Null | Node::Bool(_) | Node::Opaque(_) => NodeVariant::Unrecognized,
    }
}

fn classify_element(element: &Element, state: &PropertySet) -> NodeVariant {
    match &element.kind {
        ElementKind::Host(_) => NodeVariant::HostElement,
        ElementKind::Fragment => NodeVariant::Group {
            transparent: state.unwraps_fragments(),
        },
        ElementKind::Portal => NodeVariant::MaterializeMarker,
        ElementKind::Partial => NodeVariant::Passthrough,
        ElementKind::Component(_) => NodeVariant::Lazy,
        ElementKind::Object(object) if object.has_render() => NodeVariant::Forwarding,
        ElementKind::Object(_) if !element.children.is_falsy() => NodeVariant::Context,
        ElementKind::Object(_) => NodeVariant::Unrecognized,
    }
}
