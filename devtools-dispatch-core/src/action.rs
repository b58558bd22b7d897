//! Action trait for type-safe state transitions

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions describe a state-change intent or an external event. They should be:
/// - Debug: For logging and error reports
/// - 'static: Actions are moved through the middleware chain by value
///
/// Use `#[derive(Action)]` from `devtools-dispatch-macros` to auto-implement this trait.
pub trait Action: Debug + 'static {
    /// Get the action tag, e.g. `"REQUEST_EXTENSIONS_SUCCESS"`
    ///
    /// Tags are stable identifiers used for logging, filtering and error reports.
    fn name(&self) -> &'static str;
}

/// Short, human-readable rendering of an action for logs
///
/// The default implementation uses the `Debug` output. Override it for
/// actions that carry large payloads (target lists, descriptors).
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
