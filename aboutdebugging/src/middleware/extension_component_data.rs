use devtools_dispatch::{Action as _, DispatchError, Middleware, MiddlewareApi, Next};

use crate::action::Action;
use crate::normalize::{normalize_extensions, InvalidRecordError};

/// Normalizes the add-on lists of `REQUEST_EXTENSIONS_SUCCESS`
///
/// A record that cannot be normalized fails the dispatch with the
/// [`InvalidRecordError`](crate::InvalidRecordError) as its cause.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionComponentDataMiddleware;

impl ExtensionComponentDataMiddleware {
    pub const NAME: &'static str = "extension-component-data";

    pub fn new() -> Self {
        Self
    }
}

impl<S> Middleware<S, Action> for ExtensionComponentDataMiddleware {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle(
        &mut self,
        _api: &MiddlewareApi<'_, S, Action>,
        action: Action,
        next: Next<'_, S, Action>,
    ) -> Result<(), DispatchError> {
        let tag = action.name();
        match action {
            Action::RequestExtensionsSuccess {
                installed_extensions,
                temporary_extensions,
            } => {
                let fail = |err: InvalidRecordError| DispatchError::middleware(Self::NAME, tag, err);
                let installed_extensions = installed_extensions
                    .normalize_with(normalize_extensions)
                    .map_err(fail)?;
                let temporary_extensions = temporary_extensions
                    .normalize_with(normalize_extensions)
                    .map_err(fail)?;

                tracing::debug!(
                    installed = installed_extensions.len(),
                    temporary = temporary_extensions.len(),
                    "normalized extensions"
                );
                next.run(Action::RequestExtensionsSuccess {
                    installed_extensions,
                    temporary_extensions,
                })
            }
            other => next.run(other),
        }
    }
}
