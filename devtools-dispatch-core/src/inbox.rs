//! Hand-off point between async work and the single-threaded store
//!
//! Fetching target lists happens outside the store, usually in async tasks.
//! Those tasks only ever produce *completed* actions; they send them through
//! an [`ActionSender`], and the owner of the store drains the matching
//! [`ActionInbox`] between events.
//!
//! ```ignore
//! let (tx, mut inbox) = inbox::channel::<Action>();
//!
//! tokio::spawn(async move {
//!     match client.list_addons().await {
//!         Ok(addons) => tx.send(Action::request_extensions_success(addons)),
//!         Err(e) => tx.send(Action::RequestExtensionsFailure { error: e.to_string() }),
//!     };
//! });
//!
//! while let Some(action) = inbox.recv().await {
//!     store.dispatch(action)?;
//! }
//! ```

use tokio::sync::mpsc;

use crate::error::DispatchError;
use crate::store::Store;
use crate::Action;

/// Create a connected sender/inbox pair
pub fn channel<A: Action>() -> (ActionSender<A>, ActionInbox<A>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ActionSender { tx }, ActionInbox { rx })
}

/// Sending half, cheap to clone and `Send` when the action is
#[derive(Debug)]
pub struct ActionSender<A> {
    tx: mpsc::UnboundedSender<A>,
}

impl<A> Clone for ActionSender<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A: Action> ActionSender<A> {
    /// Queue a completed action for the store
    ///
    /// Returns `false` if the inbox was dropped; the action is discarded.
    pub fn send(&self, action: A) -> bool {
        match self.tx.send(action) {
            Ok(()) => true,
            Err(mpsc::error::SendError(action)) => {
                tracing::debug!(action = %action.name(), "inbox closed, discarding action");
                false
            }
        }
    }

    /// Whether the inbox is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half, owned next to the store
#[derive(Debug)]
pub struct ActionInbox<A> {
    rx: mpsc::UnboundedReceiver<A>,
}

impl<A: Action> ActionInbox<A> {
    /// Wait for the next action
    ///
    /// Returns `None` once every sender is dropped and the inbox is empty.
    pub async fn recv(&mut self) -> Option<A> {
        self.rx.recv().await
    }

    /// Take the next action if one is ready
    pub fn try_recv(&mut self) -> Option<A> {
        self.rx.try_recv().ok()
    }

    /// Dispatch every action that is ready, in arrival order
    ///
    /// A failing action does not stop the drain. Returns the number of
    /// actions dispatched, or the first failure.
    pub fn drain_into<S>(&mut self, store: &Store<S, A>) -> Result<usize, DispatchError> {
        let mut count = 0;
        let mut first_error = None;

        while let Some(action) = self.try_recv() {
            count += 1;
            if let Err(err) = store.dispatch(action) {
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(count),
        }
    }

    /// Stop accepting new actions; already queued ones can still be drained
    pub fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ReducerError;

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Loaded(Vec<&'static str>),
        Broken,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Loaded(_) => "LOADED",
                TestAction::Broken => "BROKEN",
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("broken")]
    struct Broken;

    fn reducer(
        state: &Arc<Vec<&'static str>>,
        action: &TestAction,
    ) -> Result<Arc<Vec<&'static str>>, ReducerError> {
        match action {
            TestAction::Loaded(items) => {
                let mut next = (**state).clone();
                next.extend(items.iter().copied());
                Ok(Arc::new(next))
            }
            TestAction::Broken => Err(Broken.into()),
        }
    }

    #[tokio::test]
    async fn test_actions_from_tasks_reach_store() {
        let store = Store::new(Vec::new(), reducer);
        let (tx, mut inbox) = channel::<TestAction>();

        let task_tx = tx.clone();
        tokio::spawn(async move {
            task_tx.send(TestAction::Loaded(vec!["tab-1"]));
        })
        .await
        .unwrap();
        tx.send(TestAction::Loaded(vec!["tab-2"]));

        assert_eq!(inbox.drain_into(&store).unwrap(), 2);
        assert_eq!(*store.state(), vec!["tab-1", "tab-2"]);
        assert_eq!(inbox.drain_into(&store).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_recv_ends_when_senders_drop() {
        let (tx, mut inbox) = channel::<TestAction>();
        tx.send(TestAction::Broken);
        drop(tx);

        assert_eq!(inbox.recv().await, Some(TestAction::Broken));
        assert_eq!(inbox.recv().await, None);
    }

    #[test]
    fn test_drain_continues_after_failure() {
        let store = Store::new(Vec::new(), reducer);
        let (tx, mut inbox) = channel::<TestAction>();
        tx.send(TestAction::Broken);
        tx.send(TestAction::Loaded(vec!["worker"]));

        let err = inbox.drain_into(&store).unwrap_err();
        assert_eq!(err.action(), "BROKEN");
        assert_eq!(*store.state(), vec!["worker"]);
    }

    #[test]
    fn test_send_after_inbox_dropped() {
        let (tx, inbox) = channel::<TestAction>();
        drop(inbox);
        assert!(tx.is_closed());
        assert!(!tx.send(TestAction::Broken));
    }
}
