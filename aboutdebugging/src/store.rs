//! Panel store wiring

use devtools_dispatch::debug::{ActionLogConfig, ActionLoggerMiddleware, SharedActionLog};
use devtools_dispatch::Store;
use serde::Deserialize;

use crate::action::Action;
use crate::middleware::{
    ExtensionComponentDataMiddleware, TabComponentDataMiddleware, WorkerComponentDataMiddleware,
};
use crate::state::{root_reducer, AppState};

pub type PanelStore = Store<AppState, Action>;

/// Store options, deserializable from the panel's settings
///
/// ```ignore
/// let config: PanelConfig = serde_json::from_str(r#"{
///     "log_actions": true,
///     "action_log": { "capacity": 50, "filter": { "exclude": ["*_START", "PAGE_SELECTED"] } }
/// }"#)?;
/// let (store, log) = configure_store_with(&config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Keep an in-memory log of dispatched actions and emit them as tracing events
    pub log_actions: bool,
    pub action_log: ActionLogConfig,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            log_actions: true,
            action_log: ActionLogConfig::default(),
        }
    }
}

/// Panel store with the default configuration
pub fn configure_store() -> PanelStore {
    let (store, _) = configure_store_with(&PanelConfig::default());
    store
}

/// Panel store, plus the action log when `log_actions` is set
///
/// Middleware order: extensions, tabs, workers, then the action logger, so
/// the log records what the reducer receives.
pub fn configure_store_with(config: &PanelConfig) -> (PanelStore, Option<SharedActionLog>) {
    let mut store = Store::new(AppState::default(), root_reducer)
        .with_middleware(ExtensionComponentDataMiddleware::new())
        .with_middleware(TabComponentDataMiddleware::new())
        .with_middleware(WorkerComponentDataMiddleware::new());

    let log = if config.log_actions {
        let logger = ActionLoggerMiddleware::with_log(config.action_log.clone());
        let log = logger.shared_log();
        store.add_middleware(logger);
        log
    } else {
        None
    };

    tracing::debug!(
        middleware = store.middleware_count(),
        log_actions = config.log_actions,
        "configured panel store"
    );
    (store, log)
}
