//! Test utilities for devtools-dispatch stores
//!
//! - [`TestHarness`]: a store wired with a recorder at the end of the chain
//!   and a subscriber capturing every published snapshot
//! - [`RecordingMiddleware`]: records the actions that reach its position
//! - Assertion macros for verifying recorded actions
//!
//! # Example
//!
//! ```ignore
//! use devtools_dispatch::testing::TestHarness;
//!
//! let harness = TestHarness::new(State::default(), reducer);
//! harness.dispatch(Action::RequestTabsStart).unwrap();
//!
//! let reduced = harness.drain_emitted();
//! assert_emitted!(reduced, Action::RequestTabsStart);
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::DispatchError;
use crate::middleware::{Middleware, MiddlewareApi, Next};
use crate::reducer::Reducer;
use crate::store::Store;
use crate::Action;

/// Middleware that records a clone of every action passing through it
///
/// Placed last in a chain it records exactly what the reducer receives.
#[derive(Debug)]
pub struct RecordingMiddleware<A> {
    recorded: Rc<RefCell<Vec<A>>>,
}

impl<A> Default for RecordingMiddleware<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> RecordingMiddleware<A> {
    pub fn new() -> Self {
        Self {
            recorded: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Handle to the recorded actions, usable after the middleware moved
    /// into a store
    pub fn handle(&self) -> Rc<RefCell<Vec<A>>> {
        Rc::clone(&self.recorded)
    }
}

impl<S, A: Action + Clone> Middleware<S, A> for RecordingMiddleware<A> {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn handle(
        &mut self,
        _api: &MiddlewareApi<'_, S, A>,
        action: A,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError> {
        self.recorded.borrow_mut().push(action.clone());
        next.run(action)
    }
}

/// Store test harness
///
/// Provides:
/// - The wrapped [`Store`], with a [`RecordingMiddleware`] appended last
/// - Every published snapshot, in order
/// - Helpers for dispatching and draining
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type (must implement [`Action`] and `Clone`)
pub struct TestHarness<S: 'static, A: Action + Clone> {
    store: Rc<Store<S, A>>,
    emitted: Rc<RefCell<Vec<A>>>,
    snapshots: Rc<RefCell<Vec<Arc<S>>>>,
}

impl<S: 'static, A: Action + Clone> TestHarness<S, A> {
    /// Harness around a bare store
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::from_store(Store::new(state, reducer))
    }

    /// Harness around a store that already carries middleware
    pub fn from_store(mut store: Store<S, A>) -> Self {
        let recorder = RecordingMiddleware::new();
        let emitted = recorder.handle();
        store.add_middleware(recorder);

        let store = Rc::new(store);
        let snapshots = Rc::new(RefCell::new(Vec::new()));
        let weak = Rc::downgrade(&store);
        let sink = Rc::clone(&snapshots);
        store.subscribe(move || {
            if let Some(store) = weak.upgrade() {
                sink.borrow_mut().push(store.state());
            }
        });

        Self {
            store,
            emitted,
            snapshots,
        }
    }

    pub fn store(&self) -> &Store<S, A> {
        &self.store
    }

    pub fn state(&self) -> Arc<S> {
        self.store.state()
    }

    pub fn dispatch(&self, action: A) -> Result<(), DispatchError> {
        self.store.dispatch(action)
    }

    /// Dispatch several actions, stopping at the first failure
    pub fn dispatch_all(&self, actions: impl IntoIterator<Item = A>) -> Result<(), DispatchError> {
        for action in actions {
            self.dispatch(action)?;
        }
        Ok(())
    }

    /// Drain the actions that reached the reducer
    pub fn drain_emitted(&self) -> Vec<A> {
        std::mem::take(&mut *self.emitted.borrow_mut())
    }

    /// Check if any actions reached the reducer.
    pub fn has_emitted(&self) -> bool {
        !self.emitted.borrow().is_empty()
    }

    /// Drain the snapshots published so far
    pub fn drain_snapshots(&self) -> Vec<Arc<S>> {
        std::mem::take(&mut *self.snapshots.borrow_mut())
    }
}

/// Assert that a specific action was emitted.
///
/// # Example
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, Action::RequestTabsStart);
/// assert_emitted!(actions, Action::PageSelected { page: Page::Connect });
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find and return the first action matching a pattern.
///
/// # Example
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// if let Some(Action::ConnectRuntimeFailure { error }) =
///     find_emitted!(actions, Action::ConnectRuntimeFailure { .. })
/// {
///     assert!(error.contains("refused"));
/// }
/// ```
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReducerError;
    use crate::middleware::from_fn;
    use crate::reducer::unchanged;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Foo,
        Bar(i32),
    }

    impl crate::Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Foo => "FOO",
                TestAction::Bar(_) => "BAR",
            }
        }
    }

    fn reducer(state: &Arc<i32>, action: &TestAction) -> Result<Arc<i32>, ReducerError> {
        match action {
            TestAction::Bar(n) => Ok(Arc::new(**state + n)),
            TestAction::Foo => unchanged(state),
        }
    }

    #[test]
    fn test_harness_records_and_drains() {
        let harness = TestHarness::new(0, reducer);

        harness
            .dispatch_all([TestAction::Foo, TestAction::Bar(42)])
            .unwrap();

        let actions = harness.drain_emitted();
        assert_eq!(actions, vec![TestAction::Foo, TestAction::Bar(42)]);
        assert!(!harness.has_emitted());

        let snapshots = harness.drain_snapshots();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(*snapshots[1], 42);
        assert!(harness.drain_snapshots().is_empty());
    }

    #[test]
    fn test_recorder_runs_after_store_middleware() {
        let store = Store::new(0, reducer).with_middleware(from_fn(
            "double",
            |_api, action: TestAction, next| match action {
                TestAction::Bar(n) => next.run(TestAction::Bar(n * 2)),
                other => next.run(other),
            },
        ));
        let harness = TestHarness::from_store(store);

        harness.dispatch(TestAction::Bar(1)).unwrap();
        assert_eq!(harness.drain_emitted(), vec![TestAction::Bar(2)]);
        assert_eq!(*harness.state(), 2);
    }

    #[test]
    fn test_assert_macros() {
        let actions = vec![TestAction::Foo, TestAction::Bar(42)];

        assert_emitted!(actions, TestAction::Foo);
        assert_emitted!(actions, TestAction::Bar(42));
        assert_emitted!(actions, TestAction::Bar(_));
        assert_emitted!(actions, TestAction::Bar(n) if *n > 40);

        assert_not_emitted!(actions, TestAction::Bar(99));

        let found = find_emitted!(actions, TestAction::Bar(_));
        assert!(found.is_some());

        let count = count_emitted!(actions, TestAction::Bar(_));
        assert_eq!(count, 1);
    }
}
