//! The single-writer store.
//!
//! `dispatch` runs the request-state reducer and then the application
//! reducer over a copy of the current tree and publishes the result as a
//! new snapshot. Writers are serialized; readers never block writers for
//! longer than an `Arc` clone. A batch is one write: its actions are reduced
//! back to back and published as a single snapshot.

use crate::requests::RequestStateReducer;
use crate::{StateTree, StoreConfig};
use parking_lot::Mutex;
use reqflow_model::Reducer;
use reqflow_types::{Action, RequestPath, RequestStatus};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Read and dispatch access to a state container.
///
/// The async coordinators and action wrappers only ever see this trait, so
/// any container that keeps the single-writer rule can stand in for
/// [`Store`].
pub trait StateAccess: Send + Sync {
    /// Applies `action` synchronously.
    fn dispatch(&self, action: Action);

    /// Applies `actions` in order as one write.
    ///
    /// No other dispatch interleaves with the batch, and subscribers are
    /// only notified of the state after the last action.
    fn dispatch_batch(&self, actions: Vec<Action>);

    /// Returns the current state snapshot.
    fn snapshot(&self) -> Arc<StateTree>;

    /// Reads the status tracked for `path`.
    fn request_status(&self, path: &RequestPath) -> Option<RequestStatus>;

    /// Reads a copy of the value at `path` in the current snapshot.
    fn get_in(&self, path: &RequestPath) -> Option<Value> {
        self.snapshot().get_in(path).cloned()
    }
}

/// Shared handle passed to thunks.
pub type StoreHandle = Arc<dyn StateAccess>;

/// Owns the state tree and applies actions to it.
pub struct Store {
    config: StoreConfig,
    requests: RequestStateReducer,
    reducer: Box<dyn Reducer<Value>>,
    /// Current snapshot; also the change feed for subscribers.
    state: watch::Sender<Arc<StateTree>>,
    /// Serializes writers.
    writer: Mutex<()>,
}

impl Store {
    /// Creates a store with an empty tree.
    pub fn new(config: StoreConfig, reducer: impl Reducer<Value> + 'static) -> Self {
        Self::with_state(config, reducer, StateTree::new())
    }

    /// Creates a store starting from `initial`.
    pub fn with_state(
        config: StoreConfig,
        reducer: impl Reducer<Value> + 'static,
        initial: StateTree,
    ) -> Self {
        let (state, _) = watch::channel(Arc::new(initial));
        Self {
            requests: RequestStateReducer::new(config.request_states_root.clone()),
            config,
            reducer: Box::new(reducer),
            state,
            writer: Mutex::new(()),
        }
    }

    /// Wraps the store in a [`StoreHandle`].
    pub fn into_handle(self) -> StoreHandle {
        Arc::new(self)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Subscribes to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<StateTree>> {
        self.state.subscribe()
    }

    fn reduce(&self, tree: Value, action: &Action) -> Value {
        let tree = self.requests.reduce(tree, action);
        let tree = self.reducer.reduce(tree, action);
        debug!("Applied {}", action.kind);
        tree
    }

    fn publish(&self, tree: Value) {
        self.state.send_replace(Arc::new(StateTree::from_value(tree)));
    }

    fn current(&self) -> Value {
        StateTree::clone(&self.state.borrow()).into_value()
    }
}

impl StateAccess for Store {
    fn dispatch(&self, action: Action) {
        let _writer = self.writer.lock();
        let tree = self.reduce(self.current(), &action);
        self.publish(tree);
    }

    fn dispatch_batch(&self, actions: Vec<Action>) {
        if actions.is_empty() {
            return;
        }
        let _writer = self.writer.lock();
        let tree = actions
            .iter()
            .fold(self.current(), |tree, action| self.reduce(tree, action));
        self.publish(tree);
    }

    fn snapshot(&self) -> Arc<StateTree> {
        self.state.borrow().clone()
    }

    fn request_status(&self, path: &RequestPath) -> Option<RequestStatus> {
        self.requests.status(self.snapshot().as_value(), path)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
