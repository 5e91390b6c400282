//! Maybe-async units of work.

use futures::future::{BoxFuture, FutureExt};
use reqflow_store::StoreHandle;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

/// Future produced by running a task.
pub type TaskFuture = BoxFuture<'static, anyhow::Result<Value>>;

/// Async work that gets the store handle when it runs.
pub type Thunk = Box<dyn FnOnce(StoreHandle) -> TaskFuture + Send>;

/// A creator: builds a task from its arguments.
pub type Creator<A> = Arc<dyn Fn(A) -> Task + Send + Sync>;

/// A unit of work producing a value or a failure.
pub enum Task {
    /// Already-computed value; wrappers treat it as an immediate success.
    Ready(Value),
    /// Work that runs against the store when awaited.
    Deferred(Thunk),
}

impl Task {
    /// Creates a ready task.
    pub fn ready(value: impl Into<Value>) -> Self {
        Self::Ready(value.into())
    }

    /// Creates a deferred task from an async closure.
    pub fn deferred<F, Fut>(work: F) -> Self
    where
        F: FnOnce(StoreHandle) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self::Deferred(Box::new(move |handle| work(handle).boxed()))
    }

    /// True for [`Task::Ready`].
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Runs the task to completion.
    pub fn run(self, handle: StoreHandle) -> TaskFuture {
        match self {
            Self::Ready(value) => futures::future::ready(Ok(value)).boxed(),
            Self::Deferred(thunk) => thunk(handle),
        }
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}
