//! Given step definitions
//!
//! Steps that set up the tree and strategy table for scenarios.

use cucumber::{gherkin::Step, given};
use partial_element_engine::MergeStrategy;

use crate::helpers::value_conversion::parse_table_to_props;
use crate::world::{Layer, PartialElementWorld};

fn table_props(step: &Step) -> serde_json::Value {
    step.table
        .as_ref()
        .map(parse_table_to_props)
        .unwrap_or_else(|| serde_json::json!({}))
}

// =============================================================================
// Tree steps
// =============================================================================

#[given("a partial element with props:")]
fn set_partial_props(world: &mut PartialElementWorld, step: &Step) {
    world.props = table_props(step);
}

#[given("a partial element without props")]
fn set_empty_partial(world: &mut PartialElementWorld) {
    world.props = serde_json::json!({});
}

#[given("it wraps a partial element with props:")]
fn wrap_partial(world: &mut PartialElementWorld, step: &Step) {
    world.layers.push(Layer::Partial(table_props(step)));
}

#[given("it wraps a portal with props:")]
fn wrap_portal(world: &mut PartialElementWorld, step: &Step) {
    world.layers.push(Layer::Portal(table_props(step)));
}

#[given("it wraps a fragment")]
fn wrap_fragment(world: &mut PartialElementWorld) {
    world.layers.push(Layer::Fragment);
}

#[given(expr = "it wraps a {string} context provider")]
fn wrap_provider(world: &mut PartialElementWorld, name: String) {
    world.layers.push(Layer::Provider(name));
}

// =============================================================================
// Innermost child steps
// =============================================================================

#[given(expr = "the innermost child is the text {string}")]
fn set_text_leaf(world: &mut PartialElementWorld, text: String) {
    world.leaf = serde_json::Value::String(text);
}

#[given(expr = "the innermost child is the number {int}")]
fn set_number_leaf(world: &mut PartialElementWorld, n: i64) {
    world.leaf = serde_json::Value::from(n);
}

#[given("the innermost child is nothing")]
fn set_null_leaf(world: &mut PartialElementWorld) {
    world.leaf = serde_json::Value::Null;
}

#[given("the innermost child is the document:")]
fn set_document_leaf(world: &mut PartialElementWorld, step: &Step) {
    let content = step.docstring.as_deref().unwrap_or("null");
    world.leaf = serde_json::from_str(content.trim())
        .unwrap_or_else(|e| panic!("Invalid document in feature file: {}", e));
}

// =============================================================================
// Strategy steps
// =============================================================================

#[given(expr = "the merge strategy for {string} is {string}")]
fn set_strategy(world: &mut PartialElementWorld, key: String, strategy: String) {
    let strategy = strategy
        .parse::<MergeStrategy>()
        .unwrap_or_else(|e| panic!("Invalid strategy in feature file: {}", e));
    world.strategies.register(key, strategy);
}

#[given("the merge strategies:")]
fn set_strategies_yaml(world: &mut PartialElementWorld, step: &Step) {
    let content = step.docstring.as_deref().unwrap_or_default();
    world
        .strategies
        .extend_from_yaml(content)
        .unwrap_or_else(|e| panic!("Invalid strategy YAML in feature file: {}", e));
}
