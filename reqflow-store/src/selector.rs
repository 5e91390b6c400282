use crate::{StateTree, StoreResult};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;

/// A derived read cached by the JSON form of its inputs.
///
/// `input` extracts the parts of the state the result depends on; `result`
/// computes the derived value from them. Two snapshots whose inputs
/// serialize identically share one cached result, so selectors stay cheap
/// even though every dispatch produces a fresh tree.
pub struct MemoizedSelector<I, R> {
    input: Box<dyn Fn(&StateTree) -> I + Send + Sync>,
    result: Box<dyn Fn(&I) -> R + Send + Sync>,
    cache: Mutex<HashMap<String, R>>,
}

impl<I, R> MemoizedSelector<I, R>
where
    I: Serialize,
    R: Clone,
{
    pub fn new(
        input: impl Fn(&StateTree) -> I + Send + Sync + 'static,
        result: impl Fn(&I) -> R + Send + Sync + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            result: Box::new(result),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Runs the selector against `state`.
    pub fn select(&self, state: &StateTree) -> StoreResult<R> {
        let inputs = (self.input)(state);
        let key = serde_json::to_string(&inputs)?;
        if let Some(hit) = self.cache.lock().get(&key) {
            return Ok(hit.clone());
        }
        let value = (self.result)(&inputs);
        self.cache.lock().insert(key, value.clone());
        Ok(value)
    }

    /// Number of cached results.
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }

    /// Drops every cached result.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}
