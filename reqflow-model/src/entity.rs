use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// One normalized record: an open mapping of field name to value.
pub type EntityRecord = Map<String, Value>;

/// Id-indexed cache of entity records for a single entity kind.
///
/// Ids are kept as strings, the way JSON object keys carry them, so numeric
/// and string ids of the same value address the same record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityMap(BTreeMap<String, EntityRecord>);

impl EntityMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EntityRecord> {
        self.0.get(id)
    }

    /// True if a record is cached under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Inserts or replaces a record.
    pub fn insert(&mut self, id: impl Into<String>, record: EntityRecord) -> Option<EntityRecord> {
        self.0.insert(id.into(), record)
    }

    /// Removes a record.
    pub fn remove(&mut self, id: &str) -> Option<EntityRecord> {
        self.0.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates records in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &EntityRecord)> {
        self.0.iter()
    }

    /// Returns all ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Merges `incoming` into this map in place.
    ///
    /// For every incoming id: fields of an existing record are kept unless
    /// the incoming record sets them; unknown ids are inserted as-is.
    pub fn merge_from(&mut self, incoming: &EntityMap) {
        for (id, record) in &incoming.0 {
            match self.0.get_mut(id) {
                Some(existing) => {
                    for (field, value) in record {
                        existing.insert(field.clone(), value.clone());
                    }
                }
                None => {
                    self.0.insert(id.clone(), record.clone());
                }
            }
        }
    }

    /// Builds a map from a JSON object of `id -> record`.
    ///
    /// Entries whose record is not a JSON object are skipped.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut map = Self::new();
        for (id, record) in object {
            match record.as_object() {
                Some(fields) => {
                    map.0.insert(id.clone(), fields.clone());
                }
                None => warn!("Skipping non-object entity record {id}"),
            }
        }
        Some(map)
    }

    /// Renders the map as a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(id, record)| (id.clone(), Value::Object(record.clone())))
                .collect(),
        )
    }
}

impl FromIterator<(String, EntityRecord)> for EntityMap {
    fn from_iter<I: IntoIterator<Item = (String, EntityRecord)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Merges `incoming` into a copy of `existing`.
///
/// Ids only in `existing` pass through unchanged; for shared ids the result
/// holds the union of both records' fields with incoming values winning.
#[must_use]
pub fn merge_entities(existing: &EntityMap, incoming: &EntityMap) -> EntityMap {
    let mut merged = existing.clone();
    merged.merge_from(incoming);
    merged
}
