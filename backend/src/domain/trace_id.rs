//! Correlation id for the request currently being served.
//!
//! The `Trace` middleware mints one id per request and runs the handler via
//! [`TraceId::instrument`]; [`Error`](super::Error) reads it back through
//! [`TraceId::current`] so error bodies and the `trace-id` header agree.
//! Work spawned onto other tasks does not see the id unless it is
//! instrumented again.

use std::fmt;
use std::future::Future;

use uuid::Uuid;

tokio::task_local! {
    static REQUEST_TRACE: TraceId;
}

/// Opaque per-request correlation id, rendered as a hyphenated UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint an id for a new request.
    #[must_use]
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request whose future is being polled, if any.
    ///
    /// # Examples
    /// ```
    /// use pergamino::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// assert!(TraceId::current().is_none());
    /// let id = TraceId::fresh();
    /// assert_eq!(id.instrument(async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    #[must_use]
    pub fn current() -> Option<Self> {
        REQUEST_TRACE.try_with(|id| *id).ok()
    }

    /// Poll `fut` as part of the request identified by `self`.
    pub fn instrument<Fut>(self, fut: Fut) -> impl Future<Output = Fut::Output>
    where
        Fut: Future,
    {
        REQUEST_TRACE.scope(self, fut)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}
