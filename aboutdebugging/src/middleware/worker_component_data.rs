use devtools_dispatch::{Action as _, DispatchError, Middleware, MiddlewareApi, Next};

use crate::action::Action;
use crate::normalize::{normalize_workers, InvalidRecordError};

/// Normalizes the three worker lists of `REQUEST_WORKERS_SUCCESS`
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerComponentDataMiddleware;

impl WorkerComponentDataMiddleware {
    pub const NAME: &'static str = "worker-component-data";

    pub fn new() -> Self {
        Self
    }
}

impl<S> Middleware<S, Action> for WorkerComponentDataMiddleware {
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
            Action::RequestWorkersSuccess {
                other_workers,
                service_workers,
                shared_workers,
            } => {
                let fail = |err: InvalidRecordError| DispatchError::middleware(Self::NAME, tag, err);
                next.run(Action::RequestWorkersSuccess {
                    other_workers: other_workers
                        .normalize_with(normalize_workers)
                        .map_err(fail)?,
                    service_workers: service_workers
                        .normalize_with(normalize_workers)
                        .map_err(fail)?,
                    shared_workers: shared_workers
                        .normalize_with(normalize_workers)
                        .map_err(fail)?,
                })
            }
            other => next.run(other),
        }
    }
}
