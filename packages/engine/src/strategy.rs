//! Merge strategies and the per-key strategy table
//!
//! The table is the engine's only runtime configuration. It starts from the
//! built-in defaults and accepts extra registrations, either in code or from
//! a YAML/JSON mapping of property name to strategy name:
//!
//! ```yaml
//! items: appendArray
//! title: concatenateString
//! ```
//!
//! Keys without an entry fall back to `functionChain` when they look like an
//! event handler and to `replace` otherwise.

use crate::config::{CLASS_NAME_KEY, DATA_KEY, DEBUG_NAME_KEY};
use crate::error::{EngineError, Result};
use crate::props::is_event_handler_key;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// How a parent value and a child value for the same key are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MergeStrategy {
    /// Child value wins
    Replace,
    /// `parent + " " + child`
    ConcatenateString,
    /// Concatenate, then drop duplicate class tokens
    ConcatenateCssClass,
    /// Shallow mapping union, child entries win
    MergeObject,
    /// Parent sequence followed by child sequence
    AppendArray,
    /// Child handler first, parent handler unless propagation was stopped
    FunctionChain,
}

impl MergeStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            MergeStrategy::Replace => "replace",
            MergeStrategy::ConcatenateString => "concatenateString",
            MergeStrategy::ConcatenateCssClass => "concatenateCssClass",
            MergeStrategy::MergeObject => "mergeObject",
            MergeStrategy::AppendArray => "appendArray",
            MergeStrategy::FunctionChain => "functionChain",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MergeStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "replace" => Ok(MergeStrategy::Replace),
            "concatenateString" => Ok(MergeStrategy::ConcatenateString),
            "concatenateCssClass" => Ok(MergeStrategy::ConcatenateCssClass),
            "mergeObject" => Ok(MergeStrategy::MergeObject),
            "appendArray" => Ok(MergeStrategy::AppendArray),
            "functionChain" => Ok(MergeStrategy::FunctionChain),
            other => Err(EngineError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Strategy lookup keyed by property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyTable {
    entries: HashMap<String, MergeStrategy>,
}

impl Default for StrategyTable {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(CLASS_NAME_KEY.to_string(), MergeStrategy::ConcatenateCssClass);
        entries.insert(DATA_KEY.to_string(), MergeStrategy::MergeObject);
        entries.insert(DEBUG_NAME_KEY.to_string(), MergeStrategy::ConcatenateString);
        Self { entries }
    }
}

impl StrategyTable {
    /// Table with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with no explicit entries; every key uses the fallback rule.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register (or override) the strategy for a key.
    pub fn register(&mut self, key: impl Into<String>, strategy: MergeStrategy) -> &mut Self {
        self.entries.insert(key.into(), strategy);
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, key: impl Into<String>, strategy: MergeStrategy) -> Self {
        self.register(key, strategy);
        self
    }

    /// Explicitly registered strategy for a key, if any.
    pub fn get(&self, key: &str) -> Option<MergeStrategy> {
        self.entries.get(key).copied()
    }

    /// Effective strategy for a key, applying the fallback rule.
    pub fn strategy_for(&self, key: &str) -> MergeStrategy {
        self.get(key).unwrap_or(if is_event_handler_key(key) {
            MergeStrategy::FunctionChain
        } else {
            MergeStrategy::Replace
        })
    }

    /// Apply overrides from a YAML mapping of key to strategy name.
    pub fn extend_from_yaml(&mut self, content: &str) -> Result<()> {
        let overrides: BTreeMap<String, MergeStrategy> = serde_yaml_ng::from_str(content)?;
        self.extend(overrides);
        Ok(())
    }

    /// Apply overrides from a JSON object of key to strategy name.
    pub fn extend_from_json(&mut self, content: &str) -> Result<()> {
        let overrides: BTreeMap<String, MergeStrategy> = serde_json::from_str(content)?;
        self.extend(overrides);
        Ok(())
    }

    /// Defaults plus the overrides in a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let mut table = Self::default();
        table.extend_from_yaml(content)?;
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<(String, MergeStrategy)> for StrategyTable {
    fn extend<I: IntoIterator<Item = (String, MergeStrategy)>>(&mut self, iter: I) {
        for (key, strategy) in iter {
            tracing::debug!(key = %key, strategy = %strategy, "Registering merge strategy");
            self.entries.insert(key, strategy);
        }
    }
}
