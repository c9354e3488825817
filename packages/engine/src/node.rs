//! Node tree model
//!
//! Nodes are what the surrounding UI runtime hands to the engine and what it
//! gets back. The rewriter never mutates an input node; it only builds new
//! ones. Output trees use the same type: a materialized element is a
//! [`ElementKind::Host`] element whose properties are native attributes.
//!
//! `Display` renders a node as markup, which is how traces, diagnostics and
//! tests look at trees.

use crate::config::{DEFAULT_ELEMENT, ERROR_PLACEHOLDER_TEXT};
use crate::props::PropertySet;
use crate::types::Value;
use std::fmt;
use std::rc::Rc;

/// Render function of a component or forwarding wrapper.
pub type RenderFn = Rc<dyn Fn(&PropertySet, &Node) -> Node>;

/// An invocable element type.
#[derive(Clone)]
pub struct Component {
    pub name: String,
    render: RenderFn,
}

impl Component {
    pub fn new<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&PropertySet, &Node) -> Node + 'static,
    {
        Self {
            name: name.into(),
            render: Rc::new(render),
        }
    }

    /// Call the component with its properties and children.
    pub fn call(&self, props: &PropertySet, children: &Node) -> Node {
        (self.render)(props, children)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({})", self.name)
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Rc::ptr_eq(&self.render, &other.render)
    }
}

/// A non-invocable element type. With a render capability it is a
/// forwarding wrapper; without one it is a context scope.
#[derive(Clone)]
pub struct ObjectType {
    pub name: String,
    render: Option<RenderFn>,
}

impl ObjectType {
    /// Object type exposing a render capability.
    pub fn forwarding<F>(name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&PropertySet, &Node) -> Node + 'static,
    {
        Self {
            name: name.into(),
            render: Some(Rc::new(render)),
        }
    }

    /// Object type without a render capability.
    pub fn scope(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            render: None,
        }
    }

    pub fn has_render(&self) -> bool {
        self.render.is_some()
    }

    /// Call the render capability, if present.
    pub fn render(&self, props: &PropertySet, children: &Node) -> Option<Node> {
        self.render.as_ref().map(|render| render(props, children))
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("render", &self.render.is_some())
            .finish()
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && match (&self.render, &other.render) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

/// The type of an element node
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// Native element, e.g. `span`
    Host(String),
    /// Anonymous group
    Fragment,
    /// Forces materialization at this point
    Portal,
    /// Passes its properties down to the next materialized node
    Partial,
    /// Invocable component
    Component(Component),
    /// Forwarding wrapper or context scope
    Object(ObjectType),
}

/// An element node: a type, its own properties and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub props: PropertySet,
    pub children: Box<Node>,
}

impl Element {
    pub fn new(kind: ElementKind, props: PropertySet, children: Node) -> Self {
        Self {
            kind,
            props,
            children: Box::new(children),
        }
    }
}

/// A node in a UI tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Text(String),
    Number(f64),
    List(Vec<Node>),
    Element(Element),
    /// A runtime value with no structure the engine understands
    Opaque(String),
}

impl Default for Node {
    fn default() -> Self {
        Node::Null
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn number(n: impl Into<f64>) -> Self {
        Node::Number(n.into())
    }

    pub fn list(items: impl IntoIterator<Item = Node>) -> Self {
        Node::List(items.into_iter().collect())
    }

    pub fn host(tag: impl Into<String>, props: PropertySet, children: Node) -> Self {
        Node::Element(Element::new(ElementKind::Host(tag.into()), props, children))
    }

    pub fn fragment(children: Node) -> Self {
        Node::Element(Element::new(ElementKind::Fragment, PropertySet::new(), children))
    }

    /// An empty fragment, the output for falsy input.
    pub fn empty() -> Self {
        Node::fragment(Node::Null)
    }

    pub fn partial(props: PropertySet, children: Node) -> Self {
        Node::Element(Element::new(ElementKind::Partial, props, children))
    }

    pub fn portal(props: PropertySet, children: Node) -> Self {
        Node::Element(Element::new(ElementKind::Portal, props, children))
    }

    pub fn component(component: Component, props: PropertySet, children: Node) -> Self {
        Node::Element(Element::new(ElementKind::Component(component), props, children))
    }

    pub fn forward_ref(object: ObjectType, props: PropertySet, children: Node) -> Self {
        Node::Element(Element::new(ElementKind::Object(object), props, children))
    }

    pub fn provider(name: impl Into<String>, props: PropertySet, children: Node) -> Self {
        Node::Element(Element::new(
            ElementKind::Object(ObjectType::scope(name)),
            props,
            children,
        ))
    }

    pub fn opaque(description: impl Into<String>) -> Self {
        Node::Opaque(description.into())
    }

    /// The visible placeholder rendered in place of an unusable node.
    pub fn error_placeholder() -> Self {
        Node::host(
            DEFAULT_ELEMENT,
            PropertySet::new(),
            Node::text(ERROR_PLACEHOLDER_TEXT),
        )
    }

    /// False, null and the empty string render nothing.
    pub fn is_falsy(&self) -> bool {
        match self {
            Node::Null | Node::Bool(false) => true,
            Node::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Native element name, for host elements.
    pub fn host_tag(&self) -> Option<&str> {
        match self {
            Node::Element(Element {
                kind: ElementKind::Host(tag),
                ..
            }) => Some(tag),
            _ => None,
        }
    }

    pub fn props(&self) -> Option<&PropertySet> {
        self.as_element().map(|e| &e.props)
    }

    pub fn children(&self) -> Option<&Node> {
        self.as_element().map(|e| e.children.as_ref())
    }

    /// Short one-line description for traces and diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Node::Null => "null".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Text(s) if s.chars().count() > 20 => {
                let head: String = s.chars().take(17).collect();
                format!("\"{}...\"", head)
            }
            Node::Text(s) => format!("\"{}\"", s),
            Node::Number(n) => n.to_string(),
            Node::List(items) => format!("[{} items]", items.len()),
            Node::Opaque(desc) => format!("opaque({})", desc),
            Node::Element(e) => format!("<{}>", kind_name(&e.kind)),
        }
    }
}

fn kind_name(kind: &ElementKind) -> &str {
    match kind {
        ElementKind::Host(tag) => tag,
        ElementKind::Fragment => "Fragment",
        ElementKind::Portal => "Portal",
        ElementKind::Partial => "Partial",
        ElementKind::Component(c) => &c.name,
        ElementKind::Object(o) => &o.name,
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn fmt_attribute(f: &mut fmt::Formatter<'_>, key: &str, value: &Value) -> fmt::Result {
    match value {
        Value::Handler(h) => write!(f, " {}={{handler/{}}}", key, h.len()),
        Value::Array(_) | Value::Object(_) => {
            let json = serde_json::to_string(value).map_err(|_| fmt::Error)?;
            write!(f, " {}=\"{}\"", key, escape(&json))
        }
        other => {
            let text = other.to_attribute_text().unwrap_or_default();
            write!(f, " {}=\"{}\"", key, escape(&text))
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null | Node::Bool(_) => Ok(()),
            Node::Text(s) => f.write_str(&escape(s)),
            Node::Number(n) => write!(f, "{}", n),
            Node::List(items) => items.iter().try_for_each(|item| write!(f, "{}", item)),
            Node::Opaque(desc) => write!(f, "{{{}}}", desc),
            Node::Element(Element {
                kind: ElementKind::Fragment,
                children,
                ..
            }) => write!(f, "{}", children),
            Node::Element(e) => {
                let name = kind_name(&e.kind);
                write!(f, "<{}", name)?;
                for (key, value) in &e.props {
                    fmt_attribute(f, key, value)?;
                }
                if e.children.is_falsy() {
                    write!(f, " />")
                } else {
                    write!(f, ">{}</{}>", e.children, name)
                }
            }
        }
    }
}
