//! World struct for Cucumber BDD tests
//!
//! Contains the test state that persists across steps in a scenario. Trees
//! are kept in their JSON document form and only turned into nodes when the
//! rewrite runs, so handlers can record into a log owned by that run.

use cucumber::World;
use partial_element_engine::document::props_from_json;
use partial_element_engine::{
    is_event_handler_key, node_to_json, DocumentReader, Event, Handler, Node, PropertySet,
    Rewriter, StrategyTable, Value,
};
use serde_json::Value as JsonValue;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::helpers::value_conversion::parse_handler_cell;

/// A wrapper layer between the partial element and the innermost child.
#[derive(Debug, Clone)]
pub enum Layer {
    Partial(JsonValue),
    Portal(JsonValue),
    Fragment,
    Provider(String),
}

/// Test world that holds state across steps in a Cucumber scenario.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct PartialElementWorld {
    /// Properties of the outermost partial element
    pub props: JsonValue,
    /// Wrapper layers, outermost first
    pub layers: Vec<Layer>,
    /// Innermost child in document form
    pub leaf: JsonValue,
    /// Merge strategies for the rewrite
    pub strategies: StrategyTable,
    /// Rewritten tree in document form (if successful)
    pub output: Option<JsonValue>,
    /// Rewritten tree rendered as markup (if successful)
    pub markup: Option<String>,
    /// Handler names recorded per event key, in invocation order
    pub fired: BTreeMap<String, Vec<String>>,
    /// Last error (if the rewrite failed)
    pub error: Option<String>,
}

impl Default for PartialElementWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialElementWorld {
    pub fn new() -> Self {
        Self {
            props: JsonValue::Object(Default::default()),
            layers: Vec::new(),
            leaf: JsonValue::Null,
            strategies: StrategyTable::default(),
            output: None,
            markup: None,
            fired: BTreeMap::new(),
            error: None,
        }
    }

    /// Build the tree, rewrite it and fire every handler on the output.
    pub fn rewrite(&mut self) {
        let log = Rc::new(RefCell::new(Vec::new()));

        let result = self.build(&log).and_then(|(props, tree)| {
            Rewriter::with_strategies(self.strategies.clone())
                .render_partial(&props, &tree)
                .map_err(|e| e.to_string())
        });

        match result {
            Ok(output) => {
                self.fired = fire_handlers(&output, &log);
                self.output = Some(node_to_json(&output));
                self.markup = Some(output.to_string());
                self.error = None;
            }
            Err(e) => {
                self.output = None;
                self.markup = None;
                self.error = Some(e);
            }
        }
    }

    fn build(&self, log: &Rc<RefCell<Vec<String>>>) -> Result<(PropertySet, Node), String> {
        let reader = DocumentReader::new();
        let mut tree = reader.read(&self.leaf).map_err(|e| e.to_string())?;

        for layer in self.layers.iter().rev() {
            tree = match layer {
                Layer::Partial(props) => Node::partial(recording_props(props, log)?, tree),
                Layer::Portal(props) => Node::portal(recording_props(props, log)?, tree),
                Layer::Fragment => Node::fragment(tree),
                Layer::Provider(name) => Node::provider(name.as_str(), PropertySet::new(), tree),
            };
        }

        Ok((recording_props(&self.props, log)?, tree))
    }

    /// The output's root element, if the output is one.
    pub fn output_element(&self) -> Option<&serde_json::Map<String, JsonValue>> {
        self.output.as_ref()?.as_object()
    }

    /// A property of the output's root element.
    pub fn output_attribute(&self, name: &str) -> Option<&JsonValue> {
        self.output_element()?.get("props")?.get(name)
    }
}

/// Convert JSON props, replacing handler names with handlers that record
/// into `log`.
fn recording_props(
    props: &JsonValue,
    log: &Rc<RefCell<Vec<String>>>,
) -> Result<PropertySet, String> {
    let mut set = props_from_json(props).map_err(|e| e.to_string())?;

    let handlers: Vec<(String, String)> = props
        .as_object()
        .into_iter()
        .flatten()
        .filter(|(key, _)| is_event_handler_key(key))
        .filter_map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
        .collect();

    for (key, cell) in handlers {
        let (name, stops) = parse_handler_cell(&cell);
        let log = Rc::clone(log);
        set.insert(
            key,
            Handler::new(move |event: &mut Event| {
                log.borrow_mut().push(name.clone());
                if stops {
                    event.stop_propagation();
                }
            }),
        );
    }

    Ok(set)
}

fn fire_handlers(output: &Node, log: &Rc<RefCell<Vec<String>>>) -> BTreeMap<String, Vec<String>> {
    let mut fired = BTreeMap::new();
    let Some(props) = output.props() else {
        return fired;
    };

    for (key, value) in props {
        if let Value::Handler(handler) = value {
            log.borrow_mut().clear();
            handler.invoke(&mut Event::new(key.as_str()));
            fired.insert(key.clone(), log.borrow().clone());
        }
    }

    fired
}
