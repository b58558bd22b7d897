//! Slice reducers
//!
//! Each reducer returns its input `Arc` for actions it does not handle.

mod runtime;
mod ui;

pub use runtime::{runtime_reducer, RuntimeReducerError};
pub use ui::ui_reducer;
