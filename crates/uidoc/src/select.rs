//! Pure helpers deriving the active UI state after a mutation.
//!
//! Handlers share these so every transition repairs `ui_state` the same way
//! and a snapshot never points at an entity it no longer contains.

use crate::model::id::Id;
use crate::model::refs::{ComponentView, Refs, UiState};

/// The UI state after `deleted_id` was removed from `components`.
///
/// If the view was not on the deleted component it is kept as-is. Otherwise
/// selection falls back to the document's first remaining component, or the
/// typography view when none remain.
pub fn after_component_delete(refs: &Refs, deleted_id: Id) -> UiState {
    match refs.ui_state.component_view() {
        Some(view) if view.component_id == deleted_id => match refs.components.first_key() {
            Some(first) => UiState::Component(ComponentView::new(*first, false)),
            None => UiState::Typography,
        },
        _ => refs.ui_state.clone(),
    }
}

/// The component view with `layer_id` selected (or deselected on `None`).
///
/// Selecting a layer also clears the active media query, since the media
/// query belonged to the previously selected layer.
pub fn with_selected_layer(view: &ComponentView, layer_id: Option<Id>) -> ComponentView {
    ComponentView {
        layer_id,
        media_query_id: None,
        ..view.clone()
    }
}
