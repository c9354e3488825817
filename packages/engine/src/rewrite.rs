//! Tree rewriting
//!
//! The [`Rewriter`] walks a node tree carrying an accumulated property set
//! and decides, node by node, whether to keep descending or to materialize:
//!
//! | variant | action |
//! |---|---|
//! | falsy | empty output |
//! | primitive, list, host element, opaque group | materialize with the accumulated set |
//! | transparent group | descend into its children, set unchanged |
//! | materialize marker | materialize with the marker's own properties only |
//! | passthrough | merge the wrapper's properties, descend |
//! | lazy component | call it, descend into its output, set unchanged |
//! | forwarding wrapper | call its render, descend into its output, set unchanged |
//! | context wrapper | rewrite its children, rebuild the wrapper around them |
//! | unrecognized | log and render a placeholder |
//!
//! The only error is a malformed merge; everything else degrades to a
//! visible placeholder so the surrounding tree stays mounted.
//!
//! # Example
//!
//! ```
//! use partial_element_engine::{partial_element, Node, PropertySet};
//!
//! let tree = Node::partial(
//!     PropertySet::new().class_name("a b"),
//!     Node::text("label"),
//! );
//! let out = partial_element(&PropertySet::new().element("span").class_name("a"), &tree).unwrap();
//! assert_eq!(out.to_string(), r#"<span className="a b">label</span>"#);
//! ```

use crate::classify::{classify, NodeVariant};
use crate::config::MAX_REWRITE_DEPTH;
use crate::error::Result;
use crate::materialize::materialize;
use crate::merge::merge;
use crate::node::{Element, ElementKind, Node};
use crate::props::PropertySet;
use crate::strategy::StrategyTable;
use crate::trace::TraceBuilder;
use crate::types::StepKind;

/// Rewrites node trees against a merge strategy table.
#[derive(Debug, Clone)]
pub struct Rewriter {
    strategies: StrategyTable,
    max_depth: usize,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Rewriter {
    /// Rewriter with the default strategy table.
    pub fn new() -> Self {
        Self::with_strategies(StrategyTable::default())
    }

    pub fn with_strategies(strategies: StrategyTable) -> Self {
        Self {
            strategies,
            max_depth: MAX_REWRITE_DEPTH,
        }
    }

    /// Override the maximum wrapper nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn strategies(&self) -> &StrategyTable {
        &self.strategies
    }

    pub fn strategies_mut(&mut self) -> &mut StrategyTable {
        &mut self.strategies
    }

    /// Entry point of a partial element: pass `props` down into `children`.
    pub fn render_partial(&self, props: &PropertySet, children: &Node) -> Result<Node> {
        self.rewrite(children, &props.without_children())
    }

    /// Like [`render_partial`](Self::render_partial), recording a trace.
    pub fn render_partial_traced(
        &self,
        props: &PropertySet,
        children: &Node,
        trace: &mut TraceBuilder,
    ) -> Result<Node> {
        trace.push(StepKind::Root, "<Partial>");
        let result = self.rewrite_traced(children, &props.without_children(), trace);
        trace.pop();
        result
    }

    /// Entry point of a portal: materialize here with `props` only.
    pub fn render_portal(&self, props: &PropertySet, children: &Node) -> Node {
        materialize(&props.without_children(), children)
    }

    /// Rewrite `node` under the accumulated property set `state`.
    pub fn rewrite(&self, node: &Node, state: &PropertySet) -> Result<Node> {
        let mut trace = TraceBuilder::disabled();
        self.rewrite_at(node, state, 0, &mut trace)
    }

    /// Rewrite `node`, recording each step into `trace`.
    pub fn rewrite_traced(
        &self,
        node: &Node,
        state: &PropertySet,
        trace: &mut TraceBuilder,
    ) -> Result<Node> {
        self.rewrite_at(node, state, 0, trace)
    }

    fn rewrite_at(
        &self,
        node: &Node,
        state: &PropertySet,
        depth: usize,
        trace: &mut TraceBuilder,
    ) -> Result<Node> {
        let variant = classify(node, state);
        trace.push(StepKind::Unwrap, node.describe());
        trace.set_variant(variant.name());

        tracing::trace!(depth, variant = variant.name(), node = %node.describe(), "Rewriting node");

        let result = if depth > self.max_depth {
            tracing::warn!(
                depth,
                max_depth = self.max_depth,
                node = %node.describe(),
                "Maximum rewrite depth exceeded, rendering placeholder"
            );
            trace.set_kind(StepKind::Placeholder);
            trace.set_detail("depth limit");
            Ok(Node::error_placeholder())
        } else {
            self.apply(node, variant, state, depth, trace)
        };

        trace.pop();
        result
    }

    fn apply(
        &self,
        node: &Node,
        variant: NodeVariant,
        state: &PropertySet,
        depth: usize,
        trace: &mut TraceBuilder,
    ) -> Result<Node> {
        match (variant, node) {
            (NodeVariant::Falsy, _) => {
                trace.set_kind(StepKind::Empty);
                Ok(Node::empty())
            }

            (NodeVariant::Primitive, _)
            | (NodeVariant::List, _)
            | (NodeVariant::HostElement, _)
            | (NodeVariant::Group { transparent: false }, _) => {
                let output = materialize(state, node);
                trace.set_kind(StepKind::Materialize);
                trace.set_detail(output.describe());
                Ok(output)
            }

            (NodeVariant::Group { transparent: true }, Node::Element(element)) => {
                self.rewrite_at(&element.children, state, depth + 1, trace)
            }

            (NodeVariant::MaterializeMarker, Node::Element(element)) => {
                let output = materialize(&element.props.without_children(), &element.children);
                if !state.is_empty() {
                    tracing::debug!(
                        discarded = state.len(),
                        "Portal discards accumulated properties"
                    );
                }
                trace.set_kind(StepKind::Materialize);
                trace.set_detail(output.describe());
                Ok(output)
            }

            (NodeVariant::Passthrough, Node::Element(element)) => {
                let own = element.props.without_children();
                let merged = merge(state, &own, &self.strategies)?;
                trace.set_kind(StepKind::Merge);
                trace.set_detail(own.keys().collect::<Vec<_>>().join(","));
                tracing::debug!(depth, keys = own.len(), "Merged wrapper properties");
                self.rewrite_at(&element.children, &merged, depth + 1, trace)
            }

            (
                NodeVariant::Lazy,
                Node::Element(Element {
                    kind: ElementKind::Component(component),
                    props,
                    children,
                }),
            ) => {
                tracing::debug!(depth, component = %component.name, "Calling component");
                let next = component.call(props, children);
                self.rewrite_at(&next, state, depth + 1, trace)
            }

            (
                NodeVariant::Forwarding,
                Node::Element(Element {
                    kind: ElementKind::Object(object),
                    props,
                    children,
                }),
            ) => match object.render(props, children) {
                Some(next) => {
                    tracing::debug!(depth, wrapper = %object.name, "Calling forwarding render");
                    self.rewrite_at(&next, state, depth + 1, trace)
                }
                None => Ok(self.unrecognized(node, trace)),
            },

            (NodeVariant::Context, Node::Element(element)) => {
                trace.set_kind(StepKind::Rebuild);
                let children = self.rewrite_at(&element.children, state, depth + 1, trace)?;
                Ok(Node::Element(Element {
                    kind: element.kind.clone(),
                    props: element.props.clone(),
                    children: Box::new(children),
                }))
            }

            _ => Ok(self.unrecognized(node, trace)),
        }
    }

    fn unrecognized(&self, node: &Node, trace: &mut TraceBuilder) -> Node {
        tracing::error!(node = ?node, "Unrecognized node pattern, rendering placeholder");
        trace.set_kind(StepKind::Placeholder);
        Node::error_placeholder()
    }
}

/// Pass `props` down into `children` with the default strategy table.
pub fn partial_element(props: &PropertySet, children: &Node) -> Result<Node> {
    Rewriter::new().render_partial(props, children)
}

/// Materialize `children` under a fresh element built from `props` only.
pub fn portal(props: &PropertySet, children: &Node) -> Node {
    Rewriter::new().render_portal(props, children)
}
