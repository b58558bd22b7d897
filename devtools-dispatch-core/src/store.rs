//! Centralized state store with reducer pattern
//!
//! The store owns the published state tree as an `Arc<S>` snapshot. Every
//! dispatch runs the middleware chain, lets the reducer stage the next tree,
//! swaps the published `Arc` once the whole chain succeeded, and then calls
//! the subscribers in subscription order.
//!
//! Dispatching from inside a subscriber or a middleware never interleaves
//! with the dispatch in progress: the action is queued and processed once
//! the current one has committed.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::error::DispatchError;
use crate::middleware::{Middleware, MiddlewareApi, Next};
use crate::reducer::Reducer;
use crate::Action;

struct Listener {
    id: u64,
    callback: Rc<dyn Fn()>,
}

type Listeners = RefCell<Vec<Listener>>;

/// Centralized state store with Redux-like reducer pattern
///
/// # Type Parameters
/// * `S` - The state tree type
/// * `A` - The action type (must implement `Action`)
///
/// # Example
/// ```ignore
/// let store = Rc::new(Store::new(AppState::default(), root_reducer));
///
/// let weak = Rc::downgrade(&store);
/// let subscription = store.subscribe(move || {
///     if let Some(store) = weak.upgrade() {
///         render(&store.state());
///     }
/// });
///
/// store.dispatch(Action::PageSelected { page: Page::Connect })?;
/// subscription.unsubscribe();
/// ```
pub struct Store<S, A: Action> {
    state: RefCell<Arc<S>>,
    staged: RefCell<Option<Arc<S>>>,
    reducer: Reducer<S, A>,
    middleware: RefCell<Vec<Box<dyn Middleware<S, A>>>>,
    listeners: Rc<Listeners>,
    next_listener_id: Cell<u64>,
    queue: RefCell<VecDeque<A>>,
    dispatching: Cell<bool>,
}

impl<S, A: Action> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("middleware_count", &self.middleware.borrow().len())
            .field("listener_count", &self.listeners.borrow().len())
            .field("dispatching", &self.dispatching.get())
            .finish()
    }
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and root reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::from_arc(Arc::new(state), reducer)
    }

    /// Create a store publishing an existing snapshot
    pub fn from_arc(state: Arc<S>, reducer: Reducer<S, A>) -> Self {
        Self {
            state: RefCell::new(state),
            staged: RefCell::new(None),
            reducer,
            middleware: RefCell::new(Vec::new()),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener_id: Cell::new(0),
            queue: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
        }
    }

    /// Append a middleware to the end of the chain
    pub fn add_middleware<M: Middleware<S, A> + 'static>(&mut self, middleware: M) {
        self.middleware.get_mut().push(Box::new(middleware));
    }

    /// Builder-style [`add_middleware`](Self::add_middleware)
    pub fn with_middleware<M: Middleware<S, A> + 'static>(mut self, middleware: M) -> Self {
        self.add_middleware(middleware);
        self
    }

    /// Number of middleware in the chain
    pub fn middleware_count(&self) -> usize {
        self.middleware.borrow().len()
    }

    /// Get the current published snapshot
    ///
    /// The snapshot is never mutated. Hold on to it only as long as stale
    /// data is acceptable; dispatches publish new snapshots.
    pub fn state(&self) -> Arc<S> {
        Arc::clone(&self.state.borrow())
    }

    /// Register a listener called after every committed dispatch
    ///
    /// Listeners take no arguments; they read [`state`](Self::state)
    /// themselves. They are called in subscription order.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            callback: Rc::new(listener),
        });
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Whether a dispatch is currently in progress
    pub fn is_dispatching(&self) -> bool {
        self.dispatching.get()
    }

    /// Dispatch an action through the middleware chain and reducer
    ///
    /// Returns once the action and every action queued while it was being
    /// processed have been handled. If any of them failed, the first failure
    /// is returned; a failed action leaves the published state untouched.
    ///
    /// Called re-entrantly (from a listener or a middleware), the action is
    /// queued and `Ok(())` is returned immediately.
    pub fn dispatch(&self, action: A) -> Result<(), DispatchError> {
        if self.dispatching.get() {
            tracing::trace!(action = %action.name(), "queueing re-entrant dispatch");
            self.queue.borrow_mut().push_back(action);
            return Ok(());
        }

        let _guard = DispatchingGuard::enter(&self.dispatching);
        self.staged.replace(None);
        let mut first_error = None;
        let mut pending = Some(action);

        while let Some(action) = pending {
            if let Err(err) = self.process(action) {
                tracing::warn!(action = %err.action(), error = %err, "dispatch failed");
                first_error.get_or_insert(err);
            }
            pending = self.queue.borrow_mut().pop_front();
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn process(&self, action: A) -> Result<(), DispatchError> {
        let name = action.name();
        let mut chain = self.middleware.borrow_mut();
        let api = MiddlewareApi::new(self);
        let reduce = |action: A| self.reduce(action);
        let result = Next::new(chain.as_mut_slice(), &api, &reduce).run(action);
        drop(chain);

        let staged = self.staged.borrow_mut().take();
        result?;

        match staged {
            Some(next) => {
                *self.state.borrow_mut() = next;
                self.notify();
            }
            None => tracing::debug!(action = %name, "action dropped by middleware"),
        }
        Ok(())
    }

    fn reduce(&self, action: A) -> Result<(), DispatchError> {
        let current = self.staged_or_published();
        let next = (self.reducer)(&current, &action)
            .map_err(|err| DispatchError::reducer(action.name(), err))?;
        *self.staged.borrow_mut() = Some(next);
        Ok(())
    }

    fn notify(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .map(|listener| Rc::clone(&listener.callback))
            .collect();

        for listener in listeners {
            listener();
        }
    }

    pub(crate) fn has_staged(&self) -> bool {
        self.staged.borrow().is_some()
    }

    pub(crate) fn staged_or_published(&self) -> Arc<S> {
        match self.staged.borrow().as_ref() {
            Some(staged) => Arc::clone(staged),
            None => self.state(),
        }
    }
}

struct DispatchingGuard<'a>(&'a Cell<bool>);

impl<'a> DispatchingGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for DispatchingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Handle returned by [`Store::subscribe`]
///
/// Dropping the handle keeps the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    /// Remove the listener from the store
    ///
    /// Returns `false` if the store is gone or the listener was already removed.
    pub fn unsubscribe(self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let mut listeners = listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|listener| listener.id != self.id);
        listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReducerError;
    use crate::middleware::from_fn;

    #[derive(Debug, Default, PartialEq)]
    struct TestState {
        counter: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        NoOp,
        Explode,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Increment => "INCREMENT",
                TestAction::Decrement => "DECREMENT",
                TestAction::NoOp => "NO_OP",
                TestAction::Explode => "EXPLODE",
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("reducer exploded")]
    struct Exploded;

    fn test_reducer(
        state: &Arc<TestState>,
        action: &TestAction,
    ) -> Result<Arc<TestState>, ReducerError> {
        match action {
            TestAction::Increment => Ok(Arc::new(TestState {
                counter: state.counter + 1,
            })),
            TestAction::Decrement => Ok(Arc::new(TestState {
                counter: state.counter - 1,
            })),
            TestAction::NoOp => Ok(Arc::clone(state)),
            TestAction::Explode => Err(Exploded.into()),
        }
    }

    #[test]
    fn test_store_dispatch() {
        let store = Store::new(TestState::default(), test_reducer);

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(store.state().counter, 1);

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(store.state().counter, 2);

        store.dispatch(TestAction::Decrement).unwrap();
        assert_eq!(store.state().counter, 1);
    }

    #[test]
    fn test_store_noop_keeps_snapshot() {
        let store = Store::new(TestState::default(), test_reducer);
        let before = store.state();

        store.dispatch(TestAction::NoOp).unwrap();
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn test_published_snapshot_is_not_mutated() {
        let store = Store::new(TestState::default(), test_reducer);
        let before = store.state();

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(before.counter, 0);
        assert_eq!(store.state().counter, 1);
    }

    #[test]
    fn test_reducer_failure_keeps_previous_state() {
        let store = Store::new(TestState::default(), test_reducer);
        store.dispatch(TestAction::Increment).unwrap();
        let before = store.state();

        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        let _sub = store.subscribe(move || counter.set(counter.get() + 1));

        let err = store.dispatch(TestAction::Explode).unwrap_err();
        assert_eq!(err.action(), "EXPLODE");
        assert!(matches!(err, DispatchError::Reducer { .. }));
        assert!(err.cause::<Exploded>().is_some());
        assert!(Arc::ptr_eq(&before, &store.state()));
        assert_eq!(notified.get(), 0);
        assert!(!store.is_dispatching());
    }

    #[test]
    fn test_middleware_failure_after_reduce_discards_staged_state() {
        let store = Store::new(TestState::default(), test_reducer).with_middleware(from_fn(
            "fails-late",
            |_api, action: TestAction, next| {
                let name = action.name();
                next.run(action)?;
                Err(DispatchError::middleware("fails-late", name, Exploded))
            },
        ));
        let before = store.state();

        let err = store.dispatch(TestAction::Increment).unwrap_err();
        assert_eq!(err.action(), "INCREMENT");
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn test_subscribers_called_in_order() {
        let store = Store::new(TestState::default(), test_reducer);
        let calls = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3 {
            let calls = Rc::clone(&calls);
            store.subscribe(move || calls.borrow_mut().push(id));
        }

        store.dispatch(TestAction::NoOp).unwrap();
        assert_eq!(*calls.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let store = Store::new(TestState::default(), test_reducer);
        let notified = Rc::new(Cell::new(0));

        let counter = Rc::clone(&notified);
        let sub = store.subscribe(move || counter.set(counter.get() + 1));
        assert_eq!(store.listener_count(), 1);

        store.dispatch(TestAction::Increment).unwrap();
        assert!(sub.unsubscribe());
        store.dispatch(TestAction::Increment).unwrap();

        assert_eq!(notified.get(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_short_circuit_skips_reducer_and_listeners() {
        let store = Store::new(TestState::default(), test_reducer).with_middleware(from_fn(
            "drop-all",
            |_api, _action: TestAction, _next| Ok(()),
        ));
        let notified = Rc::new(Cell::new(false));
        let flag = Rc::clone(&notified);
        store.subscribe(move || flag.set(true));

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(store.state().counter, 0);
        assert!(!notified.get());
    }

    #[test]
    fn test_reentrant_dispatch_is_queued() {
        let store = Rc::new(Store::new(TestState::default(), test_reducer));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&store);
        let log = Rc::clone(&seen);
        store.subscribe(move || {
            let Some(store) = weak.upgrade() else { return };
            let counter = store.state().counter;
            log.borrow_mut().push(counter);
            if counter == 1 {
                // Queued until this notification round is over
                store.dispatch(TestAction::Increment).unwrap();
                assert_eq!(store.state().counter, 1);
            }
        });

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(store.state().counter, 2);
    }

    #[test]
    fn test_queued_failure_is_reported() {
        let store = Store::new(TestState::default(), test_reducer).with_middleware(from_fn(
            "explode-after-increment",
            |api, action: TestAction, next| {
                if action == TestAction::Increment {
                    api.dispatch(TestAction::Explode)?;
                }
                next.run(action)
            },
        ));

        let err = store.dispatch(TestAction::Increment).unwrap_err();
        assert_eq!(err.action(), "EXPLODE");
        assert_eq!(store.state().counter, 1);
    }

    #[test]
    fn test_middleware_sees_staged_state_after_next() {
        let observed = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&observed);
        let store = Store::new(TestState::default(), test_reducer).with_middleware(from_fn(
            "observer",
            move |api: &MiddlewareApi<'_, TestState, TestAction>, action: TestAction, next| {
                log.borrow_mut().push(api.state().counter);
                next.run(action)?;
                log.borrow_mut().push(api.state().counter);
                Ok(())
            },
        ));

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(*observed.borrow(), vec![0, 1]);
    }
}
