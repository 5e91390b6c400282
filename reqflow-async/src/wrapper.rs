//! Creator decorators and the action wrapper.
//!
//! Decorators are plain `Creator -> Creator` functions. [`CreatorBuilder`]
//! chains them; each step wraps everything before it, so the last decorator
//! added runs outermost.

use crate::analytics::{with_analytics, AnalyticsSink, AnalyticsSpec};
use crate::error::error_payload;
use crate::{Creator, Task};
use futures::future::{BoxFuture, FutureExt};
use reqflow_store::{set_request_state, StoreHandle};
use reqflow_types::{Action, RequestPath, RequestStatus};
use std::fmt;
use std::sync::Arc;
use tracing::error;

/// Tracks a creator's task under the request path derived from its args.
///
/// Dispatches `Loading` before the task starts and `Loaded` once it
/// succeeds. A failure is logged, recorded as `Error`, and re-raised.
pub fn with_request_state<A, P>(get_path: P, creator: Creator<A>) -> Creator<A>
where
    A: Send + 'static,
    P: Fn(&A) -> RequestPath + Send + Sync + 'static,
{
    Arc::new(move |args: A| {
        let path = get_path(&args);
        let creator = creator.clone();
        Task::deferred(move |handle: StoreHandle| async move {
            handle.dispatch(set_request_state(&path, RequestStatus::Loading));
            match creator(args).run(handle.clone()).await {
                Ok(value) => {
                    handle.dispatch(set_request_state(&path, RequestStatus::Loaded));
                    Ok(value)
                }
                Err(e) => {
                    error!("Request {path} failed: {e:#}");
                    handle.dispatch(set_request_state(
                        &path,
                        RequestStatus::error(error_payload(&e)),
                    ));
                    Err(e)
                }
            }
        })
    })
}

/// Outcome of [`ActionCreator::dispatch`].
pub enum Dispatched {
    /// The creator returned a plain value; its action is already applied.
    Sync(Action),
    /// The creator returned async work; the future dispatches its outcome.
    Async(BoxFuture<'static, anyhow::Result<Action>>),
}

impl Dispatched {
    /// Waits for the outcome.
    pub async fn settle(self) -> anyhow::Result<Action> {
        match self {
            Self::Sync(action) => Ok(action),
            Self::Async(fut) => fut.await,
        }
    }
}

impl fmt::Debug for Dispatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(action) => f.debug_tuple("Sync").field(action).finish(),
            Self::Async(_) => f.write_str("Async(..)"),
        }
    }
}

/// A creator whose outcome is normalized into one tagged action.
pub struct ActionCreator<A> {
    action_type: String,
    creator: Creator<A>,
}

impl<A: Send + 'static> ActionCreator<A> {
    pub fn new(
        action_type: impl Into<String>,
        creator: impl Fn(A) -> Task + Send + Sync + 'static,
    ) -> Self {
        Self::from_creator(action_type, Arc::new(creator))
    }

    pub fn from_creator(action_type: impl Into<String>, creator: Creator<A>) -> Self {
        Self {
            action_type: action_type.into(),
            creator,
        }
    }

    /// The kind of every action this creator dispatches.
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Runs the creator and dispatches its outcome as `{kind, payload}`.
    ///
    /// A ready value is dispatched before this returns. Async work is
    /// dispatched when the returned future completes; a failure is
    /// dispatched as a failed action and then re-raised to the caller.
    pub fn dispatch(&self, handle: &StoreHandle, args: A) -> Dispatched {
        match (self.creator)(args) {
            Task::Ready(payload) => {
                let action = Action::new(self.action_type.as_str(), payload);
                handle.dispatch(action.clone());
                Dispatched::Sync(action)
            }
            Task::Deferred(thunk) => {
                let kind = self.action_type.clone();
                let handle = handle.clone();
                Dispatched::Async(
                    async move {
                        match thunk(handle.clone()).await {
                            Ok(payload) => {
                                let action = Action::new(kind, payload);
                                handle.dispatch(action.clone());
                                Ok(action)
                            }
                            Err(e) => {
                                handle.dispatch(Action::failure(kind, error_payload(&e)));
                                Err(e)
                            }
                        }
                    }
                    .boxed(),
                )
            }
        }
    }
}

impl<A> fmt::Display for ActionCreator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.action_type)
    }
}

impl<A> fmt::Debug for ActionCreator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("action_type", &self.action_type)
            .finish()
    }
}

/// Shorthand for [`ActionCreator::new`].
pub fn create_thunk_action<A: Send + 'static>(
    action_type: impl Into<String>,
    creator: impl Fn(A) -> Task + Send + Sync + 'static,
) -> ActionCreator<A> {
    ActionCreator::new(action_type, creator)
}

/// Chains decorators around a creator.
pub struct CreatorBuilder<A> {
    creator: Creator<A>,
}

impl<A: Send + 'static> CreatorBuilder<A> {
    pub fn new(creator: impl Fn(A) -> Task + Send + Sync + 'static) -> Self {
        Self {
            creator: Arc::new(creator),
        }
    }

    /// Wraps with [`with_request_state`].
    #[must_use]
    pub fn with_request_state(
        self,
        get_path: impl Fn(&A) -> RequestPath + Send + Sync + 'static,
    ) -> Self {
        Self {
            creator: with_request_state(get_path, self.creator),
        }
    }

    /// Wraps with [`with_analytics`].
    #[must_use]
    pub fn with_analytics(self, sink: Arc<dyn AnalyticsSink>, spec: AnalyticsSpec<A>) -> Self {
        Self {
            creator: with_analytics(sink, spec, self.creator),
        }
    }

    /// Returns the decorated creator.
    pub fn build(self) -> Creator<A> {
        self.creator
    }

    /// Finishes with an [`ActionCreator`] dispatching `action_type`.
    pub fn with_action(self, action_type: impl Into<String>) -> ActionCreator<A> {
        ActionCreator::from_creator(action_type, self.creator)
    }
}
