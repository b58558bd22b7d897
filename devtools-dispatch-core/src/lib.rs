//! Core traits and types for devtools-dispatch
//!
//! This crate provides a small Redux-style state container: actions flow
//! through an ordered middleware chain into a pure reducer, and the store
//! publishes the resulting snapshot to its subscribers.
//!
//! # Core Concepts
//!
//! - **Action**: Tagged messages describing an intent or an external event
//! - **Store**: Holds the published snapshot, runs the chain, notifies listeners
//! - **Middleware**: Intercepts, rewrites or drops actions before the reducer
//! - **Reducer**: Pure `(&Arc<S>, &A) -> Arc<S>`, composed per slice
//!
//! # Basic Example
//!
//! ```ignore
//! use devtools_dispatch_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum Action {
//!     PageSelected { page: Page },
//! }
//!
//! fn ui_reducer(state: &Arc<UiState>, action: &Action) -> Result<Arc<UiState>, ReducerError> {
//!     match action {
//!         Action::PageSelected { page } if *page != state.selected_page => {
//!             Ok(Arc::new(UiState { selected_page: *page }))
//!         }
//!         _ => unchanged(state),
//!     }
//! }
//!
//! let store = Store::new(UiState::default(), ui_reducer);
//! store.dispatch(Action::PageSelected { page: Page::Connect })?;
//! ```
//!
//! # Async Work
//!
//! The store is single-threaded and its dispatch is synchronous. Async work
//! (listing add-ons, tabs, workers) runs elsewhere and reports back through
//! an [`inbox`] as completed actions:
//!
//! 1. **Start actions** mark a request as in flight (e.g. `RequestTabsStart`)
//! 2. **Result actions** carry the outcome (e.g. `RequestTabsSuccess`, `RequestTabsFailure`)
//!
//! Middleware turn raw result payloads into display-ready records before
//! the reducer sees them.

pub mod action;
pub mod debug;
pub mod error;
pub mod inbox;
pub mod middleware;
pub mod reducer;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionSummary};

// Error exports
pub use error::{BoxError, DispatchError, ReducerError};

// Store exports
pub use middleware::{
    from_fn, ComposedMiddleware, FnMiddleware, LoggingMiddleware, Middleware, MiddlewareApi, Next,
};
pub use reducer::{unchanged, Reducer};
pub use store::{Store, Subscription};

// Inbox exports
pub use inbox::{ActionInbox, ActionSender};

// Testing exports
pub use testing::{RecordingMiddleware, TestHarness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionSummary};
    pub use crate::debug::{ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware};
    pub use crate::error::{BoxError, DispatchError, ReducerError};
    pub use crate::inbox::{ActionInbox, ActionSender};
    pub use crate::middleware::{
        from_fn, ComposedMiddleware, LoggingMiddleware, Middleware, MiddlewareApi, Next,
    };
    pub use crate::reducer::{unchanged, Reducer};
    pub use crate::store::{Store, Subscription};
}
