//! Property sets carried by wrapper nodes
//!
//! A [`PropertySet`] maps property names to [`Value`]s. A handful of names
//! have a meaning to the engine (see [`crate::config`]); every other key is
//! passed through to the materialized element. Keys starting with
//! [`EVENT_HANDLER_PREFIX`] are event handlers.

use crate::config::{
    ALLOW_HANDLERS_WHILE_DISABLED_KEY, CHILDREN_KEY, CLASS_NAME_KEY, DATA_KEY, DEBUG_NAME_KEY,
    DISABLED_KEY, ELEMENT_KEY, EVENT_HANDLER_PREFIX, UNWRAP_FRAGMENTS_KEY,
};
use crate::handler::{Event, Handler};
use crate::types::Value;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Keys consumed by the materializer instead of being copied verbatim.
const LOGICAL_KEYS: &[&str] = &[
    ELEMENT_KEY,
    CLASS_NAME_KEY,
    DISABLED_KEY,
    ALLOW_HANDLERS_WHILE_DISABLED_KEY,
    DATA_KEY,
    DEBUG_NAME_KEY,
    UNWRAP_FRAGMENTS_KEY,
    CHILDREN_KEY,
];

/// Whether a key names an event handler (`onClick`, `onChange`, ...).
pub fn is_event_handler_key(key: &str) -> bool {
    key.starts_with(EVENT_HANDLER_PREFIX)
}

/// Whether a key is interpreted by the materializer.
pub fn is_logical_key(key: &str) -> bool {
    LOGICAL_KEYS.contains(&key)
}

/// Mapping from property name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    entries: BTreeMap<String, Value>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Later writes to the same key win.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the `element` property.
    pub fn element(self, tag: impl Into<String>) -> Self {
        self.with(ELEMENT_KEY, tag.into())
    }

    /// Set the `className` property.
    pub fn class_name(self, classes: impl Into<String>) -> Self {
        self.with(CLASS_NAME_KEY, classes.into())
    }

    /// Set the `disabled` property.
    pub fn disabled(self, disabled: bool) -> Self {
        self.with(DISABLED_KEY, disabled)
    }

    /// Add one entry to the `data` mapping.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut data = self.data_entries().cloned().unwrap_or_default();
        data.insert(key.into(), Value::String(value.into()));
        self.insert(DATA_KEY, Value::Object(data));
        self
    }

    /// Set the `debugName` property.
    pub fn debug_name(self, name: impl Into<String>) -> Self {
        self.with(DEBUG_NAME_KEY, name.into())
    }

    /// Set the `unwrapFragments` property.
    pub fn unwrap_fragments(self, unwrap: bool) -> Self {
        self.with(UNWRAP_FRAGMENTS_KEY, unwrap)
    }

    /// Attach an event handler callback.
    pub fn on<F>(self, key: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut Event) + 'static,
    {
        self.with(key, Handler::new(callback))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Copy of this set without the `children` key.
    pub fn without_children(&self) -> Self {
        let mut copy = self.clone();
        copy.remove(CHILDREN_KEY);
        copy
    }

    /// Element name, if a non-empty one was given.
    pub fn tag(&self) -> Option<&str> {
        self.get_str(ELEMENT_KEY).filter(|s| !s.is_empty())
    }

    pub fn class_list(&self) -> Option<&str> {
        self.get_str(CLASS_NAME_KEY)
    }

    pub fn is_disabled(&self) -> bool {
        self.get_flag(DISABLED_KEY)
    }

    pub fn allows_handlers_while_disabled(&self) -> bool {
        self.get_flag(ALLOW_HANDLERS_WHILE_DISABLED_KEY)
    }

    pub fn data_entries(&self) -> Option<&BTreeMap<String, Value>> {
        self.get(DATA_KEY).and_then(Value::as_object)
    }

    pub fn debug_label(&self) -> Option<&str> {
        self.get_str(DEBUG_NAME_KEY).filter(|s| !s.is_empty())
    }

    /// Fragments are unwrapped unless `unwrapFragments` is explicitly false.
    pub fn unwraps_fragments(&self) -> bool {
        !matches!(self.get(UNWRAP_FRAGMENTS_KEY), Some(Value::Bool(false)))
    }

    /// Entries that are copied to the output element as-is.
    pub fn pass_through(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter().filter(|(k, _)| !is_logical_key(k))
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn get_flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_falsy())
    }
}

impl FromIterator<(String, Value)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, Value>> for PropertySet {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for PropertySet {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
