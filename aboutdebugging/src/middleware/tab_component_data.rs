use devtools_dispatch::{DispatchError, Middleware, MiddlewareApi, Next};

use crate::action::Action;
use crate::normalize::normalize_tabs;
use crate::target::TargetList;

/// Normalizes the tab list of `REQUEST_TABS_SUCCESS`
#[derive(Debug, Clone, Copy, Default)]
pub struct TabComponentDataMiddleware;

impl TabComponentDataMiddleware {
    pub const NAME: &'static str = "tab-component-data";

    pub fn new() -> Self {
        Self
    }
}

impl<S> Middleware<S, Action> for TabComponentDataMiddleware {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handle(
        &mut self,
        _api: &MiddlewareApi<'_, S, Action>,
        action: Action,
        next: Next<'_, S, Action>,
    ) -> Result<(), DispatchError> {
        match action {
            Action::RequestTabsSuccess { tabs } => {
                let tabs = match tabs {
                    TargetList::Raw(raw) => TargetList::Normalized(normalize_tabs(&raw)),
                    normalized => normalized,
                };
                tracing::debug!(tabs = tabs.len(), "normalized tabs");
                next.run(Action::RequestTabsSuccess { tabs })
            }
            other => next.run(other),
        }
    }
}
