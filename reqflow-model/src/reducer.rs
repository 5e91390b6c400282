use crate::EntityMap;
use regex::Regex;
use reqflow_types::Action;
use serde_json::{Map, Value};
use tracing::debug;

/// A pure state transition: consumes the current state and an action and
/// returns the next state.
///
/// Closures of the shape `Fn(S, &Action) -> S` are reducers too, so most
/// slice reducers never need a named type.
pub trait Reducer<S>: Send + Sync {
    fn reduce(&self, state: S, action: &Action) -> S;
}

impl<S, F> Reducer<S> for F
where
    F: Fn(S, &Action) -> S + Send + Sync,
{
    fn reduce(&self, state: S, action: &Action) -> S {
        self(state, action)
    }
}

/// Reducer that returns its state unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<S> Reducer<S> for Identity {
    fn reduce(&self, state: S, _action: &Action) -> S {
        state
    }
}

/// Returns the identity reducer.
#[must_use]
pub fn identity() -> Identity {
    Identity
}

/// Wraps an inner reducer with the shared entity merge policy.
///
/// When an action's kind matches `pattern` and its payload carries
/// `entities.<entity_kind>`, those records are merged into the current
/// state before the inner reducer runs. Any number of reducers can share
/// the policy this way without duplicating it.
pub struct HandleEntities<R = Identity> {
    pattern: Regex,
    entity_kind: String,
    inner: R,
}

impl HandleEntities<Identity> {
    /// Creates a wrapper around the identity reducer.
    pub fn new(pattern: Regex, entity_kind: impl Into<String>) -> Self {
        Self {
            pattern,
            entity_kind: entity_kind.into(),
            inner: Identity,
        }
    }

    /// Creates a wrapper from a regex source string.
    pub fn from_pattern(
        pattern: &str,
        entity_kind: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self::new(Regex::new(pattern)?, entity_kind))
    }
}

impl<R> HandleEntities<R> {
    /// Replaces the inner reducer.
    pub fn with_inner<R2>(self, inner: R2) -> HandleEntities<R2> {
        HandleEntities {
            pattern: self.pattern,
            entity_kind: self.entity_kind,
            inner,
        }
    }

    /// The entity kind this wrapper merges.
    pub fn entity_kind(&self) -> &str {
        &self.entity_kind
    }

    /// Extracts the incoming records for this kind, if the action applies.
    fn incoming(&self, action: &Action) -> Option<EntityMap> {
        if !self.pattern.is_match(&action.kind) {
            return None;
        }
        let records = action.payload_at(&["entities", &self.entity_kind])?;
        let incoming = EntityMap::from_value(records)?;
        debug!(
            "Merging {} {} entities from {}",
            incoming.len(),
            self.entity_kind,
            action.kind
        );
        Some(incoming)
    }
}

impl<R: Reducer<EntityMap>> Reducer<EntityMap> for HandleEntities<R> {
    fn reduce(&self, mut state: EntityMap, action: &Action) -> EntityMap {
        if let Some(incoming) = self.incoming(action) {
            state.merge_from(&incoming);
        }
        self.inner.reduce(state, action)
    }
}

/// JSON-slice form, used when the wrapper sits inside a [`CombineReducers`]
/// tree. A null or non-object slice starts from an empty map.
impl<R: Reducer<Value>> Reducer<Value> for HandleEntities<R> {
    fn reduce(&self, state: Value, action: &Action) -> Value {
        let state = match self.incoming(action) {
            Some(incoming) => {
                let mut current = EntityMap::from_value(&state).unwrap_or_default();
                current.merge_from(&incoming);
                // Keep non-object entries the typed map skipped.
                let mut merged = match state {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                if let Value::Object(records) = current.to_value() {
                    merged.extend(records);
                }
                Value::Object(merged)
            }
            None if state.is_null() => Value::Object(Map::new()),
            None => state,
        };
        self.inner.reduce(state, action)
    }
}

/// Builds one reducer over a JSON object from named slice reducers.
///
/// Each slice reducer sees only `state[key]` (null when absent). Keys with
/// no registered reducer are carried over untouched.
#[derive(Default)]
pub struct CombineReducers {
    slices: Vec<(String, Box<dyn Reducer<Value>>)>,
}

impl CombineReducers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the reducer for `key`.
    #[must_use]
    pub fn slice(mut self, key: impl Into<String>, reducer: impl Reducer<Value> + 'static) -> Self {
        self.slices.push((key.into(), Box::new(reducer)));
        self
    }

    /// Registered slice keys, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slices.iter().map(|(k, _)| k.as_str())
    }
}

impl Reducer<Value> for CombineReducers {
    fn reduce(&self, state: Value, action: &Action) -> Value {
        let mut object = match state {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, reducer) in &self.slices {
            let slice = object.remove(key).unwrap_or(Value::Null);
            object.insert(key.clone(), reducer.reduce(slice, action));
        }
        Value::Object(object)
    }
}
