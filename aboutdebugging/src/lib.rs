//! State pipeline of the about:debugging panel
//!
//! Tracks the debug targets (extensions, tabs, workers) of a connected
//! runtime. Async code lists targets and dispatches `*_SUCCESS` actions
//! carrying raw runtime descriptors; component-data middleware normalize
//! them into [`DebugTarget`] records; the `runtime` and `ui` reducers fold
//! them into an immutable [`AppState`].
//!
//! ```ignore
//! use aboutdebugging::{configure_store, Action};
//!
//! let store = configure_store();
//! store.subscribe(|| render());
//!
//! store.dispatch(Action::RequestExtensionsStart)?;
//! store.dispatch(Action::extensions_listed(addons))?;
//!
//! for target in &store.state().runtime.installed_extensions {
//!     println!("{} {}", target.name, target.icon);
//! }
//! ```

pub mod action;
pub mod middleware;
pub mod normalize;
pub mod reducers;
pub mod state;
pub mod store;
pub mod target;

pub use action::{Action, Page, RuntimeInfo};
pub use middleware::{
    ExtensionComponentDataMiddleware, TabComponentDataMiddleware, WorkerComponentDataMiddleware,
};
pub use normalize::{normalize_extensions, normalize_tabs, normalize_workers, InvalidRecordError};
pub use reducers::{runtime_reducer, ui_reducer, RuntimeReducerError};
pub use state::{root_reducer, AppState, ConnectionStatus, RequestError, RuntimeState, UiState};
pub use store::{configure_store, configure_store_with, PanelConfig, PanelStore};
pub use target::{
    DebugTarget, DebugTargetType, RawExtensionDescriptor, RawTabDescriptor, RawWorkerDescriptor,
    TargetDetails, TargetList,
};
