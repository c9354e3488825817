//! Property set merging
//!
//! [`merge`] folds a wrapper's own properties (the child) into the set
//! accumulated from the wrappers around it (the parent). For every key of
//! the child:
//!
//! - a falsy parent value is replaced by the child value
//! - a falsy child value keeps the parent value
//! - otherwise the key's [`MergeStrategy`] combines both
//!
//! Keys only present in the parent are carried over untouched.

use crate::error::{EngineError, Result};
use crate::handler::Handler;
use crate::props::PropertySet;
use crate::strategy::{MergeStrategy, StrategyTable};
use crate::types::Value;

/// Merge `child` into `parent`, producing a new set.
pub fn merge(parent: &PropertySet, child: &PropertySet, table: &StrategyTable) -> Result<PropertySet> {
    let mut merged = parent.clone();

    for (key, child_value) in child {
        let value = match parent.get(key) {
            None => child_value.clone(),
            Some(parent_value) if parent_value.is_falsy() => child_value.clone(),
            Some(parent_value) if child_value.is_falsy() => parent_value.clone(),
            Some(parent_value) => {
                let strategy = table.strategy_for(key);
                apply_strategy(key, strategy, parent_value, child_value)?
            }
        };
        merged.insert(key.clone(), value);
    }

    Ok(merged)
}

/// Combine two non-falsy values for `key` with the given strategy.
pub fn apply_strategy(
    key: &str,
    strategy: MergeStrategy,
    parent: &Value,
    child: &Value,
) -> Result<Value> {
    let mismatch = || EngineError::MergeTypeMismatch {
        key: key.to_string(),
        strategy: strategy.to_string(),
        parent: parent.type_name().to_string(),
        child: child.type_name().to_string(),
    };

    match strategy {
        MergeStrategy::Replace => Ok(child.clone()),
        MergeStrategy::ConcatenateString => match (parent.as_str(), child.as_str()) {
            (Some(p), Some(c)) => Ok(Value::String(format!("{} {}", p, c))),
            _ => Err(mismatch()),
        },
        MergeStrategy::ConcatenateCssClass => match (parent.as_str(), child.as_str()) {
            (Some(p), Some(c)) => Ok(Value::String(unique_classes(&format!("{} {}", p, c)))),
            _ => Err(mismatch()),
        },
        MergeStrategy::MergeObject => match (parent.as_object(), child.as_object()) {
            (Some(p), Some(c)) => {
                let mut union = p.clone();
                union.extend(c.iter().map(|(k, v)| (k.clone(), v.clone())));
                Ok(Value::Object(union))
            }
            _ => Err(mismatch()),
        },
        MergeStrategy::AppendArray => match (parent.as_array(), child.as_array()) {
            (Some(p), Some(c)) => Ok(Value::Array(p.iter().chain(c.iter()).cloned().collect())),
            _ => Err(mismatch()),
        },
        MergeStrategy::FunctionChain => match (parent.as_handler(), child.as_handler()) {
            (Some(p), Some(c)) => Ok(Value::Handler(Handler::chain(p, c))),
            _ => Err(mismatch()),
        },
    }
}

/// Split on whitespace, keep the first occurrence of each token, rejoin with single spaces.
pub fn unique_classes(class_list: &str) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for token in class_list.split_whitespace() {
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen.join(" ")
}
