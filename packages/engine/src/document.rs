//! JSON tree documents
//!
//! Trees can be described as JSON so they can be fed to the engine from
//! outside Rust (the `rewrite` binary, fixture tests). Scalars map to
//! themselves: strings are text, numbers are numbers, arrays are lists,
//! `null` and booleans are kept as-is. Elements are objects with a `type`:
//!
//! ```json
//! {"type": "partial", "props": {"className": "a"}, "children": "text"}
//! {"type": "host", "tag": "span", "props": {}, "children": ["a", "b"]}
//! {"type": "fragment", "children": "x"}
//! {"type": "portal", "props": {"element": "b"}, "children": "x"}
//! {"type": "provider", "name": "Theme", "props": {"value": "dark"}, "children": "x"}
//! {"type": "component", "name": "Card", "props": {}, "children": "x"}
//! {"type": "forward_ref", "name": "FancyInput", "props": {}}
//! {"type": "opaque", "description": "symbol"}
//! ```
//!
//! Components and forwarding wrappers are looked up by name in the
//! [`DocumentReader`]'s registry. Event handler properties given as strings
//! become named handlers that log when invoked.

use crate::error::{EngineError, Result};
use crate::handler::Handler;
use crate::node::{Component, Element, ElementKind, Node, ObjectType};
use crate::props::{is_event_handler_key, PropertySet};
use crate::types::Value;
use serde_json::{json, Map as JsonMap, Value as JsonValue};
use std::collections::{BTreeMap, HashMap};

/// Converts JSON documents into node trees.
#[derive(Debug, Clone, Default)]
pub struct DocumentReader {
    components: HashMap<String, Component>,
    forwarding: HashMap<String, ObjectType>,
}

impl DocumentReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a component available as `{"type": "component", "name": ...}`.
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.insert(component.name.clone(), component);
        self
    }

    /// Make a forwarding wrapper available as `{"type": "forward_ref", "name": ...}`.
    pub fn with_forwarding(mut self, object: ObjectType) -> Self {
        self.forwarding.insert(object.name.clone(), object);
        self
    }

    /// Parse a JSON string into a node.
    pub fn read_str(&self, content: &str) -> Result<Node> {
        let json: JsonValue = serde_json::from_str(content)?;
        self.read(&json)
    }

    /// Convert a parsed JSON value into a node.
    pub fn read(&self, json: &JsonValue) -> Result<Node> {
        match json {
            JsonValue::Null => Ok(Node::Null),
            JsonValue::Bool(b) => Ok(Node::Bool(*b)),
            JsonValue::Number(n) => n
                .as_f64()
                .map(Node::Number)
                .ok_or_else(|| EngineError::InvalidDocument(format!("unsupported number {}", n))),
            JsonValue::String(s) => Ok(Node::Text(s.clone())),
            JsonValue::Array(items) => items
                .iter()
                .map(|item| self.read(item))
                .collect::<Result<Vec<_>>>()
                .map(Node::List),
            JsonValue::Object(obj) => self.read_element(obj),
        }
    }

    fn read_element(&self, obj: &JsonMap<String, JsonValue>) -> Result<Node> {
        let node_type = required_str(obj, "type")?;
        let props = match obj.get("props") {
            Some(props) => props_from_json(props)?,
            None => PropertySet::new(),
        };
        let children = match obj.get("children") {
            Some(children) => self.read(children)?,
            None => Node::Null,
        };

        let kind = match node_type {
            "host" => ElementKind::Host(required_str(obj, "tag")?.to_string()),
            "fragment" => ElementKind::Fragment,
            "partial" => ElementKind::Partial,
            "portal" => ElementKind::Portal,
            "provider" => ElementKind::Object(ObjectType::scope(required_str(obj, "name")?)),
            "component" => {
                let name = required_str(obj, "name")?;
                let component = self.components.get(name).ok_or_else(|| {
                    EngineError::InvalidDocument(format!("unknown component '{}'", name))
                })?;
                ElementKind::Component(component.clone())
            }
            "forward_ref" => {
                let name = required_str(obj, "name")?;
                let object = self.forwarding.get(name).ok_or_else(|| {
                    EngineError::InvalidDocument(format!("unknown forwarding wrapper '{}'", name))
                })?;
                ElementKind::Object(object.clone())
            }
            "opaque" => {
                let description = obj
                    .get("description")
                    .and_then(JsonValue::as_str)
                    .unwrap_or("opaque");
                return Ok(Node::opaque(description));
            }
            other => {
                return Err(EngineError::InvalidDocument(format!(
                    "unknown node type '{}'",
                    other
                )))
            }
        };

        Ok(Node::Element(Element::new(kind, props, children)))
    }
}

fn required_str<'a>(obj: &'a JsonMap<String, JsonValue>, field: &str) -> Result<&'a str> {
    obj.get(field)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| EngineError::InvalidDocument(format!("missing string field '{}'", field)))
}

/// Convert a JSON object into a property set.
pub fn props_from_json(json: &JsonValue) -> Result<PropertySet> {
    let obj = json
        .as_object()
        .ok_or_else(|| EngineError::InvalidDocument("props must be an object".to_string()))?;

    Ok(obj
        .iter()
        .map(|(key, value)| {
            let value = match value {
                JsonValue::String(name) if is_event_handler_key(key) => {
                    Value::Handler(named_handler(key, name))
                }
                other => json_to_value(other),
            };
            (key.clone(), value)
        })
        .collect())
}

/// A handler that only logs its invocation.
pub fn named_handler(key: &str, name: &str) -> Handler {
    let key = key.to_string();
    let name = name.to_string();
    Handler::new(move |event| {
        tracing::info!(key = %key, handler = %name, event = %event.name, "Handler invoked");
    })
}

pub fn json_to_value(v: &JsonValue) -> Value {
    match v {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Null
            }
        }
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(arr) => Value::Array(arr.iter().map(json_to_value).collect()),
        JsonValue::Object(obj) => {
            let map: BTreeMap<String, Value> = obj
                .iter()
                .map(|(k, v)| (k.clone(), json_to_value(v)))
                .collect();
            Value::Object(map)
        }
    }
}

/// Handlers have no JSON form; they are written as a marker string.
pub fn value_to_json(v: &Value) -> JsonValue {
    match v {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => json!(*i),
        Value::Float(f) => json!(*f),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Array(arr) => JsonValue::Array(arr.iter().map(value_to_json).collect()),
        Value::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
        Value::Handler(h) => JsonValue::String(format!("[handler x{}]", h.len())),
    }
}

pub fn props_to_json(props: &PropertySet) -> JsonValue {
    JsonValue::Object(
        props
            .iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect(),
    )
}

/// Write a node tree in the document format.
pub fn node_to_json(node: &Node) -> JsonValue {
    match node {
        Node::Null => JsonValue::Null,
        Node::Bool(b) => JsonValue::Bool(*b),
        Node::Text(s) => JsonValue::String(s.clone()),
        Node::Number(n) => json!(*n),
        Node::List(items) => JsonValue::Array(items.iter().map(node_to_json).collect()),
        Node::Opaque(description) => json!({"type": "opaque", "description": description}),
        Node::Element(element) => {
            let mut obj = JsonMap::new();
            match &element.kind {
                ElementKind::Host(tag) => {
                    obj.insert("type".into(), json!("host"));
                    obj.insert("tag".into(), json!(tag));
                }
                ElementKind::Fragment => {
                    obj.insert("type".into(), json!("fragment"));
                }
                ElementKind::Portal => {
                    obj.insert("type".into(), json!("portal"));
                }
                ElementKind::Partial => {
                    obj.insert("type".into(), json!("partial"));
                }
                ElementKind::Component(component) => {
                    obj.insert("type".into(), json!("component"));
                    obj.insert("name".into(), json!(component.name));
                }
                ElementKind::Object(object) => {
                    let node_type = if object.has_render() {
                        "forward_ref"
                    } else {
                        "provider"
                    };
                    obj.insert("type".into(), json!(node_type));
                    obj.insert("name".into(), json!(object.name));
                }
            }
            if !element.props.is_empty() {
                obj.insert("props".into(), props_to_json(&element.props));
            }
            if !element.children.is_falsy() {
                obj.insert("children".into(), node_to_json(&element.children));
            }
            JsonValue::Object(obj)
        }
    }
}
