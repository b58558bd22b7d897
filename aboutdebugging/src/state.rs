//! Panel state tree

use std::sync::Arc;

use devtools_dispatch::combine_reducers;

use crate::action::{Action, Page, RuntimeInfo};
use crate::reducers::{runtime_reducer, ui_reducer};
use crate::target::DebugTarget;

/// Connection to the debugged runtime
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected(RuntimeInfo),
    Failed,
    Disconnecting,
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected(_))
    }
}

/// Last failed request, as reported by a `*_FAILURE` action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// Tag of the failure action
    pub action: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeState {
    pub connection: ConnectionStatus,
    pub installed_extensions: Vec<DebugTarget>,
    pub temporary_extensions: Vec<DebugTarget>,
    pub tabs: Vec<DebugTarget>,
    pub other_workers: Vec<DebugTarget>,
    pub service_workers: Vec<DebugTarget>,
    pub shared_workers: Vec<DebugTarget>,
    pub last_error: Option<RequestError>,
}

impl RuntimeState {
    /// Every known target, extensions first
    pub fn targets(&self) -> impl Iterator<Item = &DebugTarget> {
        self.installed_extensions
            .iter()
            .chain(&self.temporary_extensions)
            .chain(&self.tabs)
            .chain(&self.other_workers)
            .chain(&self.service_workers)
            .chain(&self.shared_workers)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub selected_page: Page,
}

/// Root of the published state tree
///
/// Each slice is owned by exactly one reducer. Slices untouched by an
/// action are shared with the previous tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub runtime: Arc<RuntimeState>,
    pub ui: Arc<UiState>,
}

combine_reducers! {
    /// Root reducer of the panel
    pub fn root_reducer(AppState, Action) {
        runtime: runtime_reducer,
        ui: ui_reducer,
    }
}
