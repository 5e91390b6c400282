//! Path-addressed access to the JSON state tree.

use reqflow_types::{PathSegment, RequestPath};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// The process-wide application state.
///
/// Always a JSON object at the root. Reads take a [`RequestPath`]; object
/// keys are matched by [`PathSegment::as_key`] and arrays by
/// [`PathSegment::as_index`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateTree(Value);

impl StateTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Wraps a value; non-object roots are replaced by an empty object.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => Self(value),
            _ => Self::new(),
        }
    }

    /// Borrows the underlying JSON.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwraps the underlying JSON.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Reads the value at `path`.
    #[must_use]
    pub fn get_in(&self, path: &RequestPath) -> Option<&Value> {
        get_in(&self.0, path)
    }

    /// Writes `value` at `path`, creating intermediate objects.
    pub fn set_in(&mut self, path: &RequestPath, value: Value) {
        set_in(&mut self.0, path, value);
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }
    }

    /// Removes the value at `path`. No-op when absent.
    pub fn remove_in(&mut self, path: &RequestPath) -> Option<Value> {
        remove_in(&mut self.0, path)
    }
}

impl Default for StateTree {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Value> for StateTree {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

fn step<'a>(value: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(&segment.as_key()),
        Value::Array(items) => segment.as_index().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Reads `path` out of any JSON value.
#[must_use]
pub fn get_in<'a>(value: &'a Value, path: &RequestPath) -> Option<&'a Value> {
    path.iter().try_fold(value, step)
}

/// Writes `value` at `path` inside any JSON value.
///
/// Scalars met along the way are replaced by objects. An index one past the
/// end of an array appends to it; an index further out leaves `root`
/// untouched.
pub fn set_in(root: &mut Value, path: &RequestPath, value: Value) {
    let mut node = root;
    for segment in path {
        let index = match &*node {
            Value::Array(_) => segment.as_index(),
            _ => None,
        };
        node = match (node, index) {
            (Value::Array(items), Some(index)) => {
                if index == items.len() {
                    items.push(Value::Null);
                }
                match items.get_mut(index) {
                    Some(item) => item,
                    None => {
                        warn!("Ignoring write at {path}: index {index} is past the end");
                        return;
                    }
                }
            }
            (other, _) => {
                if !other.is_object() {
                    *other = Value::Object(Map::new());
                }
                match other {
                    Value::Object(map) => map.entry(segment.as_key()).or_insert(Value::Null),
                    _ => return,
                }
            }
        };
    }
    *node = value;
}

/// Removes the value at `path` inside any JSON value.
pub fn remove_in(root: &mut Value, path: &RequestPath) -> Option<Value> {
    let (last, parents) = path.segments().split_last()?;
    let mut node = root;
    for segment in parents {
        node = match node {
            Value::Object(map) => map.get_mut(&segment.as_key())?,
            Value::Array(items) => items.get_mut(segment.as_index()?)?,
            _ => return None,
        };
    }
    match node {
        Value::Object(map) => map.remove(&last.as_key()),
        Value::Array(items) => {
            let index = last.as_index()?;
            (index < items.len()).then(|| items.remove(index))
        }
        _ => None,
    }
}
