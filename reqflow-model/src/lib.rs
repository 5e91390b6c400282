//! Normalized entity model for reqflow.
//!
//! Defines the types every reducer that caches API responses depends on:
//! - [`EntityMap`]: id-indexed cache of partially fetched records
//! - [`merge_entities`]: the merge policy (field union, incoming wins)
//! - [`Reducer`]: the state-transition seam, implemented by closures
//! - [`HandleEntities`]: a reducer wrapper that merges `payload.entities.<kind>`
//! - [`CombineReducers`]: builds one root reducer from named slice reducers
//!
//! Merging never drops a field that an earlier, richer fetch already
//! produced.

mod entity;
mod reducer;
mod resource;

pub use entity::{merge_entities, EntityMap, EntityRecord};
pub use reducer::{identity, CombineReducers, HandleEntities, Identity, Reducer};
pub use resource::resource_list_to_map;
