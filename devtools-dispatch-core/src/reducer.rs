//! Reducers and slice composition
//!
//! A reducer maps `(&Arc<S>, &A)` to the next `Arc<S>`. Reducers never
//! mutate the snapshot they are given. A reducer that does not handle an
//! action returns `Arc::clone(state)`, so consumers can detect "nothing
//! changed" with [`Arc::ptr_eq`].

use std::sync::Arc;

use crate::error::ReducerError;

/// A reducer function: previous snapshot + action -> next snapshot
pub type Reducer<S, A> = fn(&Arc<S>, &A) -> Result<Arc<S>, ReducerError>;

/// Return value of a reducer that did not recognize the action
///
/// Equivalent to `Ok(Arc::clone(state))`.
#[inline]
pub fn unchanged<S>(state: &Arc<S>) -> Result<Arc<S>, ReducerError> {
    Ok(Arc::clone(state))
}

/// Build a root reducer from one reducer per slice
///
/// The state struct must hold each slice as an `Arc<Slice>` field. The
/// generated function calls every slice reducer in the listed order with
/// the slice's current `Arc` and the action. If every slice came back
/// pointer-identical, the input root `Arc` is returned as is; otherwise a
/// new root is built, sharing the unchanged slices.
///
/// # Example
///
/// ```ignore
/// pub struct AppState {
///     pub runtime: Arc<RuntimeState>,
///     pub ui: Arc<UiState>,
/// }
///
/// combine_reducers! {
///     pub fn root_reducer(AppState, Action) {
///         runtime: runtime_reducer,
///         ui: ui_reducer,
///     }
/// }
/// ```
#[macro_export]
macro_rules! combine_reducers {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident($state:ident, $action:ty) {
            $($slice:ident : $reducer:path),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis fn $name(
            state: &::std::sync::Arc<$state>,
            action: &$action,
        ) -> ::core::result::Result<::std::sync::Arc<$state>, $crate::ReducerError> {
            $(
                let $slice = $reducer(&state.$slice, action)?;
            )+
            if true $(&& ::std::sync::Arc::ptr_eq(&$slice, &state.$slice))+ {
                return ::core::result::Result::Ok(::std::sync::Arc::clone(state));
            }
            ::core::result::Result::Ok(::std::sync::Arc::new($state {
                $($slice),+
            }))
        }
    };
}
