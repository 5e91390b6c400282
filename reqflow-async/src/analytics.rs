//! Analytics event emission around creators.
//!
//! Only the seam lives here: events go to an [`AnalyticsSink`] supplied by
//! the application. Analytics never breaks the primary flow, so every
//! failure in computing or sending an event is logged and dropped.

use crate::{Creator, RequestError, RequestResult, Task};
use reqflow_store::{StateTree, StoreHandle};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// One tracked event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub category: Option<Value>,
    pub action: Option<Value>,
    pub label: Option<Value>,
    pub value: Option<Value>,
}

/// Receives analytics events.
pub trait AnalyticsSink: Send + Sync {
    fn track_event(&self, event: &AnalyticsEvent) -> anyhow::Result<()>;
}

type ComputeFn<A> =
    Arc<dyn Fn(&A, &AnalyticsEvent, &StateTree) -> anyhow::Result<Option<Value>> + Send + Sync>;

/// How one event field is obtained.
pub enum AnalyticsField<A> {
    /// A constant.
    Fixed(Value),
    /// Computed from the creator's args, the fields computed so far, and a
    /// state snapshot.
    Computed(ComputeFn<A>),
}

impl<A> AnalyticsField<A> {
    fn resolve(
        &self,
        args: &A,
        partial: &AnalyticsEvent,
        state: &StateTree,
    ) -> anyhow::Result<Option<Value>> {
        match self {
            Self::Fixed(value) => Ok(Some(value.clone())),
            Self::Computed(f) => f(args, partial, state),
        }
    }
}

impl<A> Clone for AnalyticsField<A> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(v) => Self::Fixed(v.clone()),
            Self::Computed(f) => Self::Computed(f.clone()),
        }
    }
}

/// Describes the event emitted for each invocation of a creator.
///
/// Fields are resolved in order (category, action, label, value); each
/// computed field sees the ones before it.
pub struct AnalyticsSpec<A> {
    category: Option<AnalyticsField<A>>,
    action: Option<AnalyticsField<A>>,
    label: Option<AnalyticsField<A>>,
    value: Option<AnalyticsField<A>>,
}

impl<A> Default for AnalyticsSpec<A> {
    fn default() -> Self {
        Self {
            category: None,
            action: None,
            label: None,
            value: None,
        }
    }
}

macro_rules! spec_field {
    ($field:ident, $computed:ident) => {
        #[must_use]
        pub fn $field(mut self, value: impl Into<Value>) -> Self {
            self.$field = Some(AnalyticsField::Fixed(value.into()));
            self
        }

        #[must_use]
        pub fn $computed<F>(mut self, f: F) -> Self
        where
            F: Fn(&A, &AnalyticsEvent, &StateTree) -> anyhow::Result<Option<Value>>
                + Send
                + Sync
                + 'static,
        {
            self.$field = Some(AnalyticsField::Computed(Arc::new(f)));
            self
        }
    };
}

impl<A> AnalyticsSpec<A> {
    pub fn new() -> Self {
        Self::default()
    }

    spec_field!(category, category_with);
    spec_field!(action, action_with);
    spec_field!(label, label_with);
    spec_field!(value, value_with);

    /// Resolves every field into an event.
    pub fn evaluate(&self, args: &A, state: &StateTree) -> RequestResult<AnalyticsEvent> {
        let mut event = AnalyticsEvent::default();
        let resolve = |field: &Option<AnalyticsField<A>>, partial: &AnalyticsEvent| {
            field
                .as_ref()
                .map(|f| f.resolve(args, partial, state))
                .transpose()
                .map(Option::flatten)
                .map_err(RequestError::Analytics)
        };
        event.category = resolve(&self.category, &event)?;
        event.action = resolve(&self.action, &event)?;
        event.label = resolve(&self.label, &event)?;
        event.value = resolve(&self.value, &event)?;
        Ok(event)
    }
}

/// Emits one analytics event per invocation, then runs the creator's task.
///
/// The event is computed when the task runs, against the state at that
/// moment. Failures while computing or sending it are logged at warn and
/// never reach the caller; the inner task always runs.
pub fn with_analytics<A>(
    sink: Arc<dyn AnalyticsSink>,
    spec: AnalyticsSpec<A>,
    creator: Creator<A>,
) -> Creator<A>
where
    A: Send + 'static,
{
    let spec = Arc::new(spec);
    Arc::new(move |args: A| {
        let sink = sink.clone();
        let spec = spec.clone();
        let creator = creator.clone();
        Task::deferred(move |handle: StoreHandle| {
            let tracked = spec
                .evaluate(&args, &handle.snapshot())
                .and_then(|event| sink.track_event(&event).map_err(RequestError::Analytics));
            if let Err(e) = tracked {
                warn!("Analytics threw an error: {e}");
            }
            creator(args).run(handle)
        })
    })
}
