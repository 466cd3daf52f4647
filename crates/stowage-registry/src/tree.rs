//! Nested `category -> namespace -> item` document shared by the stores.

use serde_json::{Map, Value};

use crate::path::ConfigPath;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ConfigTree {
    root: Map<String, Value>,
}

impl ConfigTree {
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(ConfigTree { root }),
            Value::Null => Some(ConfigTree::default()),
            _ => None,
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    pub(crate) fn get(&self, path: &ConfigPath) -> Option<&Value> {
        let namespace = self.root.get(&path.category)?.get(&path.namespace)?;
        match &path.item {
            Some(item) => namespace.get(item),
            None => Some(namespace),
        }
    }

    pub(crate) fn set(&mut self, path: &ConfigPath, value: Value) {
        let mut category = take_object(&mut self.root, &path.category);
        match &path.item {
            None => {
                category.insert(path.namespace.clone(), value);
            }
            Some(item) => {
                let mut namespace = take_object(&mut category, &path.namespace);
                namespace.insert(item.clone(), value);
                category.insert(path.namespace.clone(), Value::Object(namespace));
            }
        }
        self.root.insert(path.category.clone(), Value::Object(category));
    }

    /// Returns whether something was removed.
    pub(crate) fn delete(&mut self, path: &ConfigPath) -> bool {
        let Some(Value::Object(category)) = self.root.get_mut(&path.category) else {
            return false;
        };
        match &path.item {
            None => category.remove(&path.namespace).is_some(),
            Some(item) => match category.get_mut(&path.namespace) {
                Some(Value::Object(namespace)) => namespace.remove(item).is_some(),
                _ => false,
            },
        }
    }
}

/// Remove the child object under `key`. Any non-object value there is dropped.
fn take_object(parent: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match parent.remove(key) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
