//! Middleware chain for intercepting actions before they reach the reducer
//!
//! Each middleware receives the action by value together with a [`Next`]
//! continuation. Calling [`Next::run`] forwards the action (or a replacement
//! built from it) to the rest of the chain and finally to the reducer.
//! Returning without calling it drops the action: no reducer runs and no
//! subscriber is notified.
//!
//! # Example
//!
//! ```ignore
//! use devtools_dispatch_core::{from_fn, DispatchError, Store};
//!
//! let mut store = Store::new(State::default(), reducer);
//! store.add_middleware(from_fn("drop-ticks", |_api, action: Action, next| {
//!     if matches!(action, Action::Tick) {
//!         return Ok(());
//!     }
//!     next.run(action)
//! }));
//! ```

use std::sync::Arc;

use crate::error::DispatchError;
use crate::store::Store;
use crate::Action;

/// Middleware trait for intercepting actions
///
/// Middleware run in the order they were added to the store. A middleware
/// placed before another sees the action first, and sees the later one's
/// input rather than its output.
pub trait Middleware<S, A: Action> {
    /// Name reported in [`DispatchError::Middleware`]
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Handle an action
    ///
    /// Call `next.run(action)` to continue the chain, or return without
    /// calling it to short-circuit dispatch.
    fn handle(
        &mut self,
        api: &MiddlewareApi<'_, S, A>,
        action: A,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError>;
}

impl<S, A: Action> Middleware<S, A> for Box<dyn Middleware<S, A>> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn handle(
        &mut self,
        api: &MiddlewareApi<'_, S, A>,
        action: A,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError> {
        (**self).handle(api, action, next)
    }
}

/// Read access to the store from inside the chain
pub struct MiddlewareApi<'a, S, A: Action> {
    store: &'a Store<S, A>,
}

impl<'a, S, A: Action> MiddlewareApi<'a, S, A> {
    pub(crate) fn new(store: &'a Store<S, A>) -> Self {
        Self { store }
    }

    /// Current state as seen by the chain
    ///
    /// Before the reducer ran this is the published state. After `next.run`
    /// returned it is the state that will be published once the whole chain
    /// has completed.
    pub fn state(&self) -> Arc<S> {
        self.store.staged_or_published()
    }

    /// Whether the reducer already ran for the action being handled
    pub fn reduced(&self) -> bool {
        self.store.has_staged()
    }

    /// Dispatch another action
    ///
    /// The action is queued and processed after the current dispatch
    /// completes; it re-enters the chain from the beginning.
    pub fn dispatch(&self, action: A) -> Result<(), DispatchError> {
        self.store.dispatch(action)
    }
}

type Terminal<'a, A> = &'a dyn Fn(A) -> Result<(), DispatchError>;

enum Then<'a, S, A: Action> {
    Reduce(Terminal<'a, A>),
    Continue(Box<Next<'a, S, A>>),
}

/// Continuation handed to every middleware
pub struct Next<'a, S, A: Action> {
    rest: &'a mut [Box<dyn Middleware<S, A>>],
    api: &'a MiddlewareApi<'a, S, A>,
    then: Then<'a, S, A>,
}

impl<'a, S, A: Action> Next<'a, S, A> {
    pub(crate) fn new(
        chain: &'a mut [Box<dyn Middleware<S, A>>],
        api: &'a MiddlewareApi<'a, S, A>,
        reduce: Terminal<'a, A>,
    ) -> Self {
        Self {
            rest: chain,
            api,
            then: Then::Reduce(reduce),
        }
    }

    /// Forward the action to the rest of the chain
    pub fn run(self, action: A) -> Result<(), DispatchError> {
        let Next { rest, api, then } = self;
        match rest.split_first_mut() {
            Some((head, tail)) => head.handle(
                api,
                action,
                Next {
                    rest: tail,
                    api,
                    then,
                },
            ),
            None => match then {
                Then::Reduce(reduce) => reduce(action),
                Then::Continue(outer) => outer.run(action),
            },
        }
    }
}

/// Middleware built from a closure, see [`from_fn`]
pub struct FnMiddleware<F> {
    name: &'static str,
    f: F,
}

/// Build a middleware from a closure
pub fn from_fn<S, A, F>(name: &'static str, f: F) -> FnMiddleware<F>
where
    A: Action,
    F: FnMut(&MiddlewareApi<'_, S, A>, A, Next<'_, S, A>) -> Result<(), DispatchError>,
{
    FnMiddleware { name, f }
}

impl<S, A, F> Middleware<S, A> for FnMiddleware<F>
where
    A: Action,
    F: FnMut(&MiddlewareApi<'_, S, A>, A, Next<'_, S, A>) -> Result<(), DispatchError>,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn handle(
        &mut self,
        api: &MiddlewareApi<'_, S, A>,
        action: A,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError> {
        (self.f)(api, action, next)
    }
}

/// Middleware that logs actions (for debugging)
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before forwarding
    pub log_before: bool,
    /// Whether to log after the rest of the chain returned
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<S, A: Action> Middleware<S, A> for LoggingMiddleware {
    fn name(&self) -> &'static str {
        "logging"
    }

    fn handle(
        &mut self,
        api: &MiddlewareApi<'_, S, A>,
        action: A,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError> {
        let name = action.name();
        if self.log_before {
            tracing::debug!(action = %name, "Dispatching action");
        }

        let before = api.state();
        let result = next.run(action);

        if self.log_after {
            match &result {
                Ok(()) => tracing::debug!(
                    action = %name,
                    state_changed = !Arc::ptr_eq(&before, &api.state()),
                    "Action processed"
                ),
                Err(err) => tracing::debug!(action = %name, error = %err, "Action failed"),
            }
        }
        result
    }
}

/// Compose multiple middleware into a single middleware
///
/// Placing a composed middleware in a chain behaves exactly like placing its
/// members there one after another.
pub struct ComposedMiddleware<S, A: Action> {
    middlewares: Vec<Box<dyn Middleware<S, A>>>,
}

impl<S, A: Action> std::fmt::Debug for ComposedMiddleware<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedMiddleware")
            .field("middlewares_count", &self.middlewares.len())
            .finish()
    }
}

impl<S, A: Action> Default for ComposedMiddleware<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A: Action> ComposedMiddleware<S, A> {
    /// Create a new composed middleware
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the composition
    pub fn add<M: Middleware<S, A> + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }

    /// Builder-style [`add`](Self::add)
    pub fn with<M: Middleware<S, A> + 'static>(mut self, middleware: M) -> Self {
        self.add(middleware);
        self
    }

    /// Number of middleware in the composition
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Whether the composition forwards straight to the next link
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }
}

impl<S, A: Action> Middleware<S, A> for ComposedMiddleware<S, A> {
    fn name(&self) -> &'static str {
        "composed"
    }

    fn handle(
        &mut self,
        api: &MiddlewareApi<'_, S, A>,
        action: A,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError> {
        Next {
            rest: self.middlewares.as_mut_slice(),
            api,
            then: Then::Continue(Box::new(next)),
        }
        .run(action)
    }
}
