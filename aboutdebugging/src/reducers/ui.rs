use std::sync::Arc;

use devtools_dispatch::{unchanged, ReducerError};

use crate::action::Action;
use crate::state::UiState;

pub fn ui_reducer(state: &Arc<UiState>, action: &Action) -> Result<Arc<UiState>, ReducerError> {
    match action {
        Action::PageSelected { page } if *page != state.selected_page => {
            Ok(Arc::new(UiState {
                selected_page: *page,
            }))
        }
        _ => unchanged(state),
    }
}
