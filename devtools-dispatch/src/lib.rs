//! devtools-dispatch: Redux-style state management for devtools panels
//!
//! Actions flow through an ordered middleware chain into a pure reducer.
//! The store publishes immutable snapshots and notifies subscribers after
//! every committed dispatch.
//!
//! # Example
//! ```ignore
//! use devtools_dispatch::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum Action {
//!     RequestTabsStart,
//!     RequestTabsSuccess { tabs: Vec<DebugTarget> },
//! }
//!
//! let store = Store::new(RuntimeState::default(), runtime_reducer)
//!     .with_middleware(LoggingMiddleware::new());
//! store.dispatch(Action::RequestTabsStart)?;
//! ```

// Re-export everything from core
pub use devtools_dispatch_core::*;

// Re-export derive macros
pub use devtools_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use devtools_dispatch_core::{Action, ActionSummary};

    // Store
    pub use devtools_dispatch_core::{
        from_fn, unchanged, ComposedMiddleware, DispatchError, LoggingMiddleware, Middleware,
        MiddlewareApi, Next, Reducer, ReducerError, Store, Subscription,
    };
    pub use devtools_dispatch_core::combine_reducers;

    // Async hand-off
    pub use devtools_dispatch_core::{ActionInbox, ActionSender};

    // Debug
    pub use devtools_dispatch_core::debug::{
        ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware, ActionOutcome,
    };

    // Derive macros
    pub use devtools_dispatch_macros::Action;
}
