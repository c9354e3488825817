//! Rewrite tracing for debugging wrapper chains
//!
//! A [`TraceBuilder`] is threaded through a rewrite and records one
//! [`TraceStep`] per node visited. Steps nest the same way the rewrite
//! recursion does, so the finished trace shows the path a property set took
//! from the entry point to the materialized element.
//!
//! # Example
//!
//! ```
//! use partial_element_engine::trace::TraceBuilder;
//! use partial_element_engine::{Node, PropertySet, Rewriter};
//!
//! let tree = Node::partial(
//!     PropertySet::new().class_name("inner"),
//!     Node::host("span", PropertySet::new(), Node::text("hi")),
//! );
//!
//! let mut trace = TraceBuilder::new();
//! let out = Rewriter::new()
//!     .rewrite_traced(&tree, &PropertySet::new().class_name("outer"), &mut trace)
//!     .unwrap();
//!
//! assert_eq!(out.to_string(), r#"<div className="outer inner"><span>hi</span></div>"#);
//! let root = trace.build().unwrap();
//! println!("{}", root.render(0, false));
//! ```

use crate::types::StepKind;
use serde::Serialize;
use std::time::Instant;

/// One step of a rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct TraceStep {
    /// What the rewriter did at this step
    pub kind: StepKind,

    /// Description of the node visited
    pub node: String,

    /// Classification of the node, if it was classified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Extra information, e.g. the merged keys or the output produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Nested steps
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TraceStep>,

    /// Duration in microseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_us: Option<u64>,
}

impl TraceStep {
    pub fn new(kind: StepKind, node: impl Into<String>) -> Self {
        Self {
            kind,
            node: node.into(),
            variant: None,
            detail: None,
            children: Vec::new(),
            duration_us: None,
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_child(mut self, child: TraceStep) -> Self {
        self.children.push(child);
        self
    }

    /// Number of steps in this subtree, including this one.
    pub fn step_count(&self) -> usize {
        1 + self.children.iter().map(TraceStep::step_count).sum::<usize>()
    }

    /// Kinds along the first-child path, from this step down.
    pub fn kinds(&self) -> Vec<StepKind> {
        let mut kinds = vec![self.kind];
        let mut current = self;
        while let Some(first) = current.children.first() {
            kinds.push(first.kind);
            current = first;
        }
        kinds
    }

    /// Render the trace as a human-readable tree.
    ///
    /// ```text
    /// <Partial> (root)
    /// `-- <Partial> (merge) [passthrough] className
    ///     `-- <span> (materialize) [host_element]
    /// ```
    pub fn render(&self, indent: usize, is_last: bool) -> String {
        self.render_internal(indent, is_last, true)
    }

    fn render_internal(&self, indent: usize, is_last: bool, is_top_level: bool) -> String {
        let prefix = if is_top_level {
            ""
        } else if is_last {
            "`-- "
        } else {
            "+-- "
        };
        let child_indent = if is_top_level {
            ""
        } else if is_last {
            "    "
        } else {
            "|   "
        };

        let mut line = format!("{}{} ({})", prefix, self.node, self.kind.label());
        if let Some(ref variant) = self.variant {
            line.push_str(&format!(" [{}]", variant));
        }
        if let Some(ref detail) = self.detail {
            line.push(' ');
            line.push_str(detail);
        }
        if let Some(duration) = self.duration_us {
            if duration >= 100 {
                line.push_str(&format!(" ({}us)", duration));
            }
        }

        let mut lines = vec![line];
        let child_count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            let rendered = child.render_internal(0, i == child_count - 1, false);
            for child_line in rendered.lines() {
                lines.push(format!("{}{}{}", " ".repeat(indent * 4), child_indent, child_line));
            }
        }

        lines.join("\n")
    }

    /// Render as a compact single-line summary, e.g. `merge:<Partial>`.
    pub fn render_compact(&self) -> String {
        format!("{}:{}", self.kind.label(), self.node)
    }
}

#[derive(Debug)]
struct BuildingStep {
    step: TraceStep,
    start_time: Instant,
}

/// Stack-based builder for rewrite traces.
#[derive(Debug)]
pub struct TraceBuilder {
    stack: Vec<BuildingStep>,
    root: Option<TraceStep>,
    enabled: bool,
}

impl Default for TraceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
            enabled: true,
        }
    }

    /// A builder that records nothing.
    pub fn disabled() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enter a new step.
    pub fn push(&mut self, kind: StepKind, node: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.stack.push(BuildingStep {
            step: TraceStep::new(kind, node),
            start_time: Instant::now(),
        });
    }

    /// Change the kind of the current step once the rewriter has decided.
    pub fn set_kind(&mut self, kind: StepKind) {
        if let Some(current) = self.current() {
            current.kind = kind;
        }
    }

    pub fn set_variant(&mut self, variant: impl Into<String>) {
        if let Some(current) = self.current() {
            current.variant = Some(variant.into());
        }
    }

    pub fn set_detail(&mut self, detail: impl Into<String>) {
        if let Some(current) = self.current() {
            current.detail = Some(detail.into());
        }
    }

    /// Leave the current step, attaching it to its parent.
    ///
    /// Popping the outermost step stores it as the trace root.
    pub fn pop(&mut self) -> Option<TraceStep> {
        if !self.enabled {
            return None;
        }

        let building = self.stack.pop()?;
        let mut completed = building.step;
        completed.duration_us = Some(building.start_time.elapsed().as_micros() as u64);

        match self.stack.last_mut() {
            Some(parent) => parent.step.children.push(completed.clone()),
            None => self.root = Some(completed.clone()),
        }

        Some(completed)
    }

    /// Finish the trace, returning the root step.
    pub fn build(mut self) -> Option<TraceStep> {
        if !self.enabled {
            return None;
        }
        while !self.stack.is_empty() {
            self.pop();
        }
        self.root
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn current(&mut self) -> Option<&mut TraceStep> {
        if !self.enabled {
            return None;
        }
        self.stack.last_mut().map(|b| &mut b.step)
    }
}
