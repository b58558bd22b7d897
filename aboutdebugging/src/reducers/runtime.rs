use std::sync::Arc;

use devtools_dispatch::{unchanged, Action as _, ReducerError};
use thiserror::Error;

use crate::action::Action;
use crate::state::{ConnectionStatus, RequestError, RuntimeState};
use crate::target::{DebugTarget, TargetList};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeReducerError {
    /// A `*_SUCCESS` action reached the reducer with a raw list
    #[error("`{kind}` reached the reducer without being normalized")]
    Unnormalized { kind: &'static str },
}

fn normalized<R>(
    list: &TargetList<R>,
    kind: &'static str,
) -> Result<Vec<DebugTarget>, RuntimeReducerError> {
    list.normalized()
        .map(<[DebugTarget]>::to_vec)
        .ok_or(RuntimeReducerError::Unnormalized { kind })
}

fn with_error(state: &RuntimeState, action: &Action, message: &str) -> RuntimeState {
    RuntimeState {
        last_error: Some(RequestError {
            action: action.name(),
            message: message.to_string(),
        }),
        ..state.clone()
    }
}

pub fn runtime_reducer(
    state: &Arc<RuntimeState>,
    action: &Action,
) -> Result<Arc<RuntimeState>, ReducerError> {
    let next = match action {
        Action::ConnectRuntimeStart => RuntimeState {
            connection: ConnectionStatus::Connecting,
            ..(**state).clone()
        },
        Action::ConnectRuntimeSuccess { runtime } => RuntimeState {
            connection: ConnectionStatus::Connected(runtime.clone()),
            last_error: None,
            ..(**state).clone()
        },
        Action::ConnectRuntimeFailure { error } => RuntimeState {
            connection: ConnectionStatus::Failed,
            ..with_error(state, action, error)
        },

        Action::DisconnectRuntimeStart => RuntimeState {
            connection: ConnectionStatus::Disconnecting,
            ..(**state).clone()
        },
        Action::DisconnectRuntimeSuccess => RuntimeState::default(),

        Action::RequestExtensionsSuccess {
            installed_extensions,
            temporary_extensions,
        } => RuntimeState {
            installed_extensions: normalized(installed_extensions, "installed_extensions")?,
            temporary_extensions: normalized(temporary_extensions, "temporary_extensions")?,
            ..(**state).clone()
        },
        Action::RequestTabsSuccess { tabs } => RuntimeState {
            tabs: normalized(tabs, "tabs")?,
            ..(**state).clone()
        },
        Action::RequestWorkersSuccess {
            other_workers,
            service_workers,
            shared_workers,
        } => RuntimeState {
            other_workers: normalized(other_workers, "other_workers")?,
            service_workers: normalized(service_workers, "service_workers")?,
            shared_workers: normalized(shared_workers, "shared_workers")?,
            ..(**state).clone()
        },

        Action::DisconnectRuntimeFailure { error }
        | Action::RequestExtensionsFailure { error }
        | Action::RequestTabsFailure { error }
        | Action::RequestWorkersFailure { error } => with_error(state, action, error),

        Action::RequestExtensionsStart
        | Action::RequestTabsStart
        | Action::RequestWorkersStart
        | Action::PageSelected { .. } => return unchanged(state),
    };

    Ok(Arc::new(next))
}
