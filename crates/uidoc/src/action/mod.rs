//! Edit actions and the pure reducer that applies them.
//!
//! [`apply_action`] is the single operational entry point of this crate:
//! it takes an immutable snapshot and a discrete edit intent and computes
//! the next snapshot, with no side effects. Persistence and IPC happen in
//! the host after the reducer returns, never inside it.
//!
//! Dispatch is a closed match over the action's tag: adding an action kind
//! without a handler is a compile error, not a silent no-op.

pub mod components;
pub mod layers;
pub mod refs;
pub mod shortcuts;

use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::factory::NewLayer;
use crate::model::id::Id;
use crate::model::layer::LayerStyle;
use crate::model::refs::{Artboard, ComponentView, EditorMode, RefKind, RefValue, Refs, UiState};
use crate::select;

pub use shortcuts::ShortcutKey;

/// A discrete edit intent.
///
/// Actions are plain data and cross the host's IPC boundary as tagged JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    // Components
    AddComponent {
        name: String,
    },
    RenameComponent {
        component_id: Id,
        name: String,
    },
    DeleteComponent {
        component_id: Id,
    },
    AddComponentProp {
        component_id: Id,
        name: String,
        default_value: Option<String>,
    },
    EditComponentProp {
        component_id: Id,
        old_name: String,
        new_name: String,
    },
    DeleteComponentProp {
        component_id: Id,
        name: String,
    },
    AddComponentExample {
        component_id: Id,
        name: String,
    },
    DeleteComponentExample {
        component_id: Id,
        example_id: Id,
    },
    UpdateComponentExampleProp {
        component_id: Id,
        example_id: Id,
        prop_name: String,
        value: String,
    },

    // Layers
    AddLayer {
        component_id: Id,
        layer: NewLayer,
        parent_layer_id: Option<Id>,
    },
    DeleteLayer {
        component_id: Id,
        layer_id: Id,
    },
    MoveLayer {
        component_id: Id,
        layer_id: Id,
        parent_id: Id,
        position: usize,
    },
    RenameLayer {
        component_id: Id,
        layer_id: Id,
        name: String,
    },
    UpdateLayerText {
        component_id: Id,
        layer_id: Id,
        text: String,
    },
    UpdateLayerImage {
        component_id: Id,
        layer_id: Id,
        src: String,
        alt: String,
    },
    UpdateLayerHref {
        component_id: Id,
        layer_id: Id,
        href: String,
    },
    SetLayerBinding {
        component_id: Id,
        layer_id: Id,
        prop: String,
        binding: Option<String>,
    },
    UpdateComponentLayerProp {
        component_id: Id,
        layer_id: Id,
        prop: String,
        value: String,
    },
    /// Targets whatever layer is currently selected; see
    /// [`layers::update_layer_style`] for the precondition.
    UpdateLayerStyle {
        style: LayerStyle,
    },
    AddMediaQuery {
        component_id: Id,
        layer_id: Id,
        breakpoint_id: Id,
    },
    DeleteMediaQuery {
        component_id: Id,
        layer_id: Id,
        media_query_id: Id,
    },

    // Top-level reference collections
    UpdateRef {
        kind: RefKind,
        id: Id,
        value: RefValue,
    },
    DeleteRef {
        kind: RefKind,
        id: Id,
    },
    UpdateArtboard {
        id: Id,
        artboard: Artboard,
    },
    DeleteArtboard {
        id: Id,
    },

    // UI navigation and selection (never touch `is_saved`)
    GoHome,
    GoTypography,
    GoColors,
    GoBreakpoints,
    SelectComponent {
        component_id: Id,
        editing: bool,
    },
    SelectLayer {
        layer_id: Option<Id>,
    },
    HoverLayer {
        layer_id: Option<Id>,
    },
    SelectMediaQuery {
        media_query_id: Option<Id>,
    },
    SetEditorMode {
        mode: EditorMode,
    },
    SetEditing {
        editing: bool,
    },

    /// A keyboard shortcut routed through the reducer.
    GlobalShortcut {
        key: ShortcutKey,
    },
}

/// Applies `action` to `refs` and returns the next snapshot.
///
/// Pure and total over well-formed documents: an `Err` means the action
/// addressed an entity that does not exist or was issued against the wrong
/// UI state, which is a bug in the caller. On error no new snapshot exists,
/// so no partial mutation is ever observable.
pub fn apply_action(action: &Action, refs: &Refs) -> Result<Refs, ActionError> {
    match action {
        Action::AddComponent { name } => {
            components::add_component(refs, name).map(Refs::mark_unsaved)
        }
        Action::RenameComponent { component_id, name } => {
            components::rename_component(refs, *component_id, name).map(Refs::mark_unsaved)
        }
        Action::DeleteComponent { component_id } => {
            components::delete_component(refs, *component_id).map(Refs::mark_unsaved)
        }
        Action::AddComponentProp {
            component_id,
            name,
            default_value,
        } => components::add_component_prop(refs, *component_id, name, default_value.as_deref())
            .map(Refs::mark_unsaved),
        Action::EditComponentProp {
            component_id,
            old_name,
            new_name,
        } => components::edit_component_prop(refs, *component_id, old_name, new_name)
            .map(Refs::mark_unsaved),
        Action::DeleteComponentProp { component_id, name } => {
            components::delete_component_prop(refs, *component_id, name).map(Refs::mark_unsaved)
        }
        Action::AddComponentExample { component_id, name } => {
            components::add_component_example(refs, *component_id, name).map(Refs::mark_unsaved)
        }
        Action::DeleteComponentExample {
            component_id,
            example_id,
        } => components::delete_component_example(refs, *component_id, *example_id)
            .map(Refs::mark_unsaved),
        Action::UpdateComponentExampleProp {
            component_id,
            example_id,
            prop_name,
            value,
        } => components::update_component_example_prop(
            refs,
            *component_id,
            *example_id,
            prop_name,
            value,
        )
        .map(Refs::mark_unsaved),

        Action::AddLayer {
            component_id,
            layer,
            parent_layer_id,
        } => layers::add_layer(refs, *component_id, layer, *parent_layer_id)
            .map(Refs::mark_unsaved),
        Action::DeleteLayer {
            component_id,
            layer_id,
        } => layers::delete_layer(refs, *component_id, *layer_id).map(Refs::mark_unsaved),
        Action::MoveLayer {
            component_id,
            layer_id,
            parent_id,
            position,
        } => layers::move_layer(refs, *component_id, *layer_id, *parent_id, *position)
            .map(Refs::mark_unsaved),
        Action::RenameLayer {
            component_id,
            layer_id,
            name,
        } => layers::rename_layer(refs, *component_id, *layer_id, name).map(Refs::mark_unsaved),
        Action::UpdateLayerText {
            component_id,
            layer_id,
            text,
        } => layers::update_layer_text(refs, *component_id, *layer_id, text)
            .map(Refs::mark_unsaved),
        Action::UpdateLayerImage {
            component_id,
            layer_id,
            src,
            alt,
        } => layers::update_layer_image(refs, *component_id, *layer_id, src, alt)
            .map(Refs::mark_unsaved),
        Action::UpdateLayerHref {
            component_id,
            layer_id,
            href,
        } => layers::update_layer_href(refs, *component_id, *layer_id, href)
            .map(Refs::mark_unsaved),
        Action::SetLayerBinding {
            component_id,
            layer_id,
            prop,
            binding,
        } => layers::set_layer_binding(refs, *component_id, *layer_id, prop, binding.as_deref())
            .map(Refs::mark_unsaved),
        Action::UpdateComponentLayerProp {
            component_id,
            layer_id,
            prop,
            value,
        } => layers::update_component_layer_prop(refs, *component_id, *layer_id, prop, value)
            .map(Refs::mark_unsaved),
        Action::UpdateLayerStyle { style } => {
            layers::update_layer_style(refs, style).map(Refs::mark_unsaved)
        }
        Action::AddMediaQuery {
            component_id,
            layer_id,
            breakpoint_id,
        } => layers::add_media_query(refs, *component_id, *layer_id, *breakpoint_id)
            .map(Refs::mark_unsaved),
        Action::DeleteMediaQuery {
            component_id,
            layer_id,
            media_query_id,
        } => layers::delete_media_query(refs, *component_id, *layer_id, *media_query_id)
            .map(Refs::mark_unsaved),

        Action::UpdateRef { kind, id, value } => {
            self::refs::update_ref(refs, *kind, *id, value).map(Refs::mark_unsaved)
        }
        Action::DeleteRef { kind, id } => {
            self::refs::delete_ref(refs, *kind, *id).map(Refs::mark_unsaved)
        }
        Action::UpdateArtboard { id, artboard } => {
            self::refs::update_artboard(refs, *id, artboard).map(Refs::mark_unsaved)
        }
        Action::DeleteArtboard { id } => {
            self::refs::delete_artboard(refs, *id).map(Refs::mark_unsaved)
        }

        Action::GoHome => Ok(refs.with_ui_state(UiState::Home)),
        Action::GoTypography => Ok(refs.with_ui_state(UiState::Typography)),
        Action::GoColors => Ok(refs.with_ui_state(UiState::Colors)),
        Action::GoBreakpoints => Ok(refs.with_ui_state(UiState::Breakpoints)),
        Action::SelectComponent {
            component_id,
            editing,
        } => select_component(refs, *component_id, *editing),
        Action::SelectLayer { layer_id } => select_layer(refs, *layer_id),
        Action::HoverLayer { layer_id } => hover_layer(refs, *layer_id),
        Action::SelectMediaQuery { media_query_id } => select_media_query(refs, *media_query_id),
        Action::SetEditorMode { mode } => set_editor_mode(refs, *mode),
        Action::SetEditing { editing } => set_editing(refs, *editing),

        Action::GlobalShortcut { key } => shortcuts::global_shortcut(refs, *key),
    }
}

fn select_component(refs: &Refs, component_id: Id, editing: bool) -> Result<Refs, ActionError> {
    refs.component(component_id)?;
    Ok(refs.with_ui_state(UiState::Component(ComponentView::new(component_id, editing))))
}

/// Requires an active component view, the shared precondition of the
/// selection actions below.
fn active_view(refs: &Refs) -> Result<&ComponentView, ActionError> {
    refs.component_view().ok_or(ActionError::NoActiveLayer)
}

fn select_layer(refs: &Refs, layer_id: Option<Id>) -> Result<Refs, ActionError> {
    let view = active_view(refs)?;
    if let Some(id) = layer_id {
        refs.layer(view.component_id, id)?;
    }
    let next = select::with_selected_layer(view, layer_id);
    Ok(refs.with_ui_state(UiState::Component(next)))
}

fn hover_layer(refs: &Refs, layer_id: Option<Id>) -> Result<Refs, ActionError> {
    let view = active_view(refs)?;
    let next = ComponentView {
        hovered_layer_id: layer_id,
        ..view.clone()
    };
    Ok(refs.with_ui_state(UiState::Component(next)))
}

fn select_media_query(refs: &Refs, media_query_id: Option<Id>) -> Result<Refs, ActionError> {
    let view = active_view(refs)?;
    if let Some(id) = media_query_id {
        let layer_id = view.layer_id.ok_or(ActionError::NoActiveLayer)?;
        let layer = refs.layer(view.component_id, layer_id)?;
        if !layer.media_queries().iter().any(|mq| mq.id == id) {
            return Err(ActionError::MediaQueryNotFound { id, layer_id });
        }
    }
    let next = ComponentView {
        media_query_id,
        ..view.clone()
    };
    Ok(refs.with_ui_state(UiState::Component(next)))
}

fn set_editor_mode(refs: &Refs, mode: EditorMode) -> Result<Refs, ActionError> {
    let view = active_view(refs)?;
    let next = ComponentView {
        editor_mode: mode,
        ..view.clone()
    };
    Ok(refs.with_ui_state(UiState::Component(next)))
}

fn set_editing(refs: &Refs, editing: bool) -> Result<Refs, ActionError> {
    let view = active_view(refs)?;
    let next = ComponentView {
        is_editing: editing,
        ..view.clone()
    };
    Ok(refs.with_ui_state(UiState::Component(next)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;

    fn project_with_selection() -> (Refs, Id, Id) {
        let refs = factory::default_project();
        let component_id = *refs.components.first_key().unwrap();
        let root_id = refs
            .components
            .get(&component_id)
            .unwrap()
            .layout
            .as_ref()
            .unwrap()
            .id();
        let refs = apply_action(
            &Action::SelectComponent {
                component_id,
                editing: true,
            },
            &refs,
        )
        .unwrap();
        (refs, component_id, root_id)
    }

    #[test]
    fn test_navigation_actions_keep_saved_flag() {
        let refs = factory::default_project();
        let next = apply_action(&Action::GoColors, &refs).unwrap();
        assert_eq!(next.ui_state, UiState::Colors);
        assert!(next.is_saved);
    }

    #[test]
    fn test_select_component_requires_existence() {
        let refs = factory::default_project();
        let err = apply_action(
            &Action::SelectComponent {
                component_id: Id::from_u128(404),
                editing: false,
            },
            &refs,
        )
        .unwrap_err();
        assert!(matches!(err, ActionError::ComponentNotFound { .. }));
    }

    #[test]
    fn test_select_layer_validates_id() {
        let (refs, _, root_id) = project_with_selection();

        let next = apply_action(&Action::SelectLayer { layer_id: Some(root_id) }, &refs).unwrap();
        assert_eq!(next.component_view().unwrap().layer_id, Some(root_id));
        assert!(next.is_saved);

        let err = apply_action(
            &Action::SelectLayer {
                layer_id: Some(Id::from_u128(404)),
            },
            &refs,
        )
        .unwrap_err();
        assert!(matches!(err, ActionError::LayerNotFound { .. }));
    }

    #[test]
    fn test_selection_actions_require_component_view() {
        let refs = factory::default_project();
        for action in [
            Action::SelectLayer { layer_id: None },
            Action::HoverLayer { layer_id: None },
            Action::SetEditing { editing: true },
        ] {
            assert_eq!(
                apply_action(&action, &refs).unwrap_err(),
                ActionError::NoActiveLayer
            );
        }
    }

    #[test]
    fn test_mutating_action_clears_saved_flag() {
        let (refs, component_id, _) = project_with_selection();
        let next = apply_action(
            &Action::RenameComponent {
                component_id,
                name: "hero".to_string(),
            },
            &refs,
        )
        .unwrap();
        assert!(!next.is_saved);
        assert_eq!(next.components.get(&component_id).unwrap().name, "hero");
    }

    #[test]
    fn test_action_serde_tagged() {
        let action = Action::SelectLayer {
            layer_id: Some(Id::from_u128(1)),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "selectLayer");
        let back: Action = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }
}
