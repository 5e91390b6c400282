use crate::{EntityMap, EntityRecord};
use serde_json::Value;
use tracing::debug;

/// Turns a list of records into an id-indexed map.
///
/// The id is read from each record's `id` field (string or number). Records
/// without a usable id are dropped. Later records with a duplicate id
/// replace earlier ones.
pub fn resource_list_to_map<I>(resources: I) -> EntityMap
where
    I: IntoIterator<Item = EntityRecord>,
{
    let mut map = EntityMap::new();
    for record in resources {
        let id = match record.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                debug!("Dropping resource without id");
                continue;
            }
        };
        map.insert(id, record);
    }
    map
}
