//! Actions understood by the about:debugging store

use devtools_dispatch::ActionSummary;
use serde::Deserialize;

use crate::target::{RawExtensionDescriptor, RawTabDescriptor, RawWorkerDescriptor, TargetList};

/// Runtime the panel is connected to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuntimeInfo {
    pub name: String,
    pub version: String,
}

/// Top-level page of the panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    ThisFirefox,
    Connect,
}

/// Everything that can happen to the panel state
#[derive(devtools_dispatch::Action, Debug, Clone, PartialEq)]
pub enum Action {
    ConnectRuntimeStart,
    ConnectRuntimeSuccess {
        runtime: RuntimeInfo,
    },
    ConnectRuntimeFailure {
        error: String,
    },

    DisconnectRuntimeStart,
    DisconnectRuntimeSuccess,
    DisconnectRuntimeFailure {
        error: String,
    },

    RequestExtensionsStart,
    RequestExtensionsSuccess {
        installed_extensions: TargetList<RawExtensionDescriptor>,
        temporary_extensions: TargetList<RawExtensionDescriptor>,
    },
    RequestExtensionsFailure {
        error: String,
    },

    RequestTabsStart,
    RequestTabsSuccess {
        tabs: TargetList<RawTabDescriptor>,
    },
    RequestTabsFailure {
        error: String,
    },

    RequestWorkersStart,
    RequestWorkersSuccess {
        other_workers: TargetList<RawWorkerDescriptor>,
        service_workers: TargetList<RawWorkerDescriptor>,
        shared_workers: TargetList<RawWorkerDescriptor>,
    },
    RequestWorkersFailure {
        error: String,
    },

    PageSelected {
        page: Page,
    },
}

impl Action {
    /// `REQUEST_EXTENSIONS_SUCCESS` from the runtime's full add-on listing
    ///
    /// Non-debuggable add-ons are skipped; the rest are split into installed
    /// and temporary lists, keeping their order.
    pub fn extensions_listed(addons: Vec<RawExtensionDescriptor>) -> Self {
        let (temporary, installed): (Vec<_>, Vec<_>) = addons
            .into_iter()
            .filter(|addon| addon.debuggable)
            .partition(|addon| addon.temporarily_installed);

        Self::RequestExtensionsSuccess {
            installed_extensions: TargetList::Raw(installed),
            temporary_extensions: TargetList::Raw(temporary),
        }
    }

    /// `REQUEST_TABS_SUCCESS` with a raw tab listing
    pub fn tabs_listed(tabs: Vec<RawTabDescriptor>) -> Self {
        Self::RequestTabsSuccess {
            tabs: TargetList::Raw(tabs),
        }
    }

    /// `REQUEST_WORKERS_SUCCESS` with raw worker listings
    pub fn workers_listed(
        other: Vec<RawWorkerDescriptor>,
        service: Vec<RawWorkerDescriptor>,
        shared: Vec<RawWorkerDescriptor>,
    ) -> Self {
        Self::RequestWorkersSuccess {
            other_workers: TargetList::Raw(other),
            service_workers: TargetList::Raw(service),
            shared_workers: TargetList::Raw(shared),
        }
    }

    /// Error message carried by `*_FAILURE` actions
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::ConnectRuntimeFailure { error }
            | Self::DisconnectRuntimeFailure { error }
            | Self::RequestExtensionsFailure { error }
            | Self::RequestTabsFailure { error }
            | Self::RequestWorkersFailure { error } => Some(error),
            _ => None,
        }
    }
}

fn list_summary<R>(list: &TargetList<R>) -> String {
    let state = if list.is_normalized() { "normalized" } else { "raw" };
    format!("{} {}", list.len(), state)
}

impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Self::RequestExtensionsSuccess {
                installed_extensions,
                temporary_extensions,
            } => format!(
                "RequestExtensionsSuccess {{ installed: {}, temporary: {} }}",
                list_summary(installed_extensions),
                list_summary(temporary_extensions)
            ),
            Self::RequestTabsSuccess { tabs } => {
                format!("RequestTabsSuccess {{ tabs: {} }}", list_summary(tabs))
            }
            Self::RequestWorkersSuccess {
                other_workers,
                service_workers,
                shared_workers,
            } => format!(
                "RequestWorkersSuccess {{ other: {}, service: {}, shared: {} }}",
                list_summary(other_workers),
                list_summary(service_workers),
                list_summary(shared_workers)
            ),
            other => format!("{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devtools_dispatch::Action as _;

    #[test]
    fn test_tags_match_panel_constants() {
        assert_eq!(
            Action::ConnectRuntimeStart.name(),
            "CONNECT_RUNTIME_START"
        );
        assert_eq!(
            Action::extensions_listed(vec![]).name(),
            "REQUEST_EXTENSIONS_SUCCESS"
        );
        assert_eq!(
            Action::RequestWorkersFailure {
                error: "gone".into()
            }
            .name(),
            "REQUEST_WORKERS_FAILURE"
        );
        assert_eq!(
            Action::PageSelected {
                page: Page::Connect
            }
            .name(),
            "PAGE_SELECTED"
        );
    }

    #[test]
    fn test_extensions_listed_partitions_debuggable() {
        let addon = |id: &str, temporary: bool, debuggable: bool| RawExtensionDescriptor {
            id: id.into(),
            temporarily_installed: temporary,
            debuggable,
            ..Default::default()
        };

        let action = Action::extensions_listed(vec![
            addon("a", false, true),
            addon("b", true, true),
            addon("system", false, false),
            addon("c", false, true),
        ]);

        let Action::RequestExtensionsSuccess {
            installed_extensions: TargetList::Raw(installed),
            temporary_extensions: TargetList::Raw(temporary),
        } = action
        else {
            panic!("expected raw extension lists");
        };

        let ids = |list: &[RawExtensionDescriptor]| -> Vec<String> {
            list.iter().map(|e| e.id.clone()).collect()
        };
        assert_eq!(ids(&installed), vec!["a", "c"]);
        assert_eq!(ids(&temporary), vec!["b"]);
    }

    #[test]
    fn test_summary_hides_payloads() {
        let action = Action::tabs_listed(vec![RawTabDescriptor::default()]);
        assert_eq!(action.summary(), "RequestTabsSuccess { tabs: 1 raw }");

        let failure = Action::RequestTabsFailure {
            error: "closed".into(),
        };
        assert_eq!(failure.error(), Some("closed"));
        assert!(failure.summary().contains("closed"));
    }
}
