//! Dispatch failures

use std::error::Error as StdError;

/// Boxed cause of a middleware or reducer failure
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error returned by a reducer
///
/// Reducers may fail with any error type; `?` boxes it. The store turns it
/// into a [`DispatchError::Reducer`] tagged with the offending action.
pub type ReducerError = BoxError;

/// A dispatch that did not commit
///
/// Every variant carries the tag of the action that failed. When a dispatch
/// fails, the previously published state stays published and no subscriber
/// is notified.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A middleware rejected the action
    #[error("middleware `{middleware}` failed on `{action}`: {source}")]
    Middleware {
        action: &'static str,
        middleware: &'static str,
        #[source]
        source: BoxError,
    },

    /// The reducer failed while computing the next state
    #[error("reducer failed on `{action}`: {source}")]
    Reducer {
        action: &'static str,
        #[source]
        source: BoxError,
    },
}

impl DispatchError {
    /// Build a middleware failure for the given action tag
    pub fn middleware<E>(middleware: &'static str, action: &'static str, error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Middleware {
            action,
            middleware,
            source: error.into(),
        }
    }

    pub(crate) fn reducer(action: &'static str, error: ReducerError) -> Self {
        Self::Reducer {
            action,
            source: error,
        }
    }

    /// Tag of the action whose dispatch failed
    pub fn action(&self) -> &'static str {
        match self {
            Self::Middleware { action, .. } | Self::Reducer { action, .. } => action,
        }
    }

    /// Try to view the cause as a concrete error type
    pub fn cause<E: StdError + 'static>(&self) -> Option<&E> {
        let source = match self {
            Self::Middleware { source, .. } | Self::Reducer { source, .. } => source,
        };
        source.as_ref().downcast_ref::<E>()
    }
}
