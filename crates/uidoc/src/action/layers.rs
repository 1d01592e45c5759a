//! Handlers for layer-level actions: tree structure, per-variant props,
//! bindings, styles, and media queries.

use crate::error::ActionError;
use crate::factory::{self, NewLayer};
use crate::model::component::Component;
use crate::model::id::Id;
use crate::model::layer::{Layer, LayerKind, LayerStyle};
use crate::model::refs::{ComponentView, Refs, UiState};
use crate::select;
use crate::tree;

/// Replaces a component's layout wholesale.
fn with_layout(refs: &Refs, component_id: Id, layout: Option<Layer>) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    let updated = Component {
        layout,
        ..component.clone()
    };
    Ok(refs.with_component(component_id, updated))
}

/// Substitutes one rebuilt layer into a component's tree.
fn with_layer(refs: &Refs, component_id: Id, updated: Layer) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    let layout = component
        .layout
        .as_ref()
        .ok_or(ActionError::LayerNotFound { id: updated.id() })?;
    let next = tree::replace_layer(layout, updated);
    with_layout(refs, component_id, Some(next))
}

/// Adds a new layer to a component.
///
/// An empty layout makes the new layer the root. Otherwise a parent must be
/// named explicitly; when the named target is a leaf, the layer is added to
/// the target's parent instead (clicking "add" on a leaf adds a sibling).
/// The new layer gets a tree-unique generated name and becomes the
/// selection.
pub fn add_layer(
    refs: &Refs,
    component_id: Id,
    request: &NewLayer,
    parent_layer_id: Option<Id>,
) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    let mut layer = factory::new_layer(request);
    layer.set_name(tree::generate_layer_name(
        component.layout.as_ref(),
        request.kind(),
    ));
    let layer_id = layer.id();

    let layout = match &component.layout {
        None => layer,
        Some(root) => {
            let parent_id = parent_layer_id
                .ok_or(ActionError::ParentRequired { component_id })?;
            let target = tree::find_layer_with_parent(root, parent_id)
                .ok_or(ActionError::LayerNotFound { id: parent_id })?;
            let insert_under = if tree::can_have_children(target.layer) {
                target.layer
            } else {
                // Auto-escalation: a leaf target means "next to the leaf".
                target
                    .parent
                    .ok_or(ActionError::NotAContainer { id: parent_id })?
            };
            let position = insert_under
                .children()
                .map(Vec::len)
                .unwrap_or_default();
            tree::insert_layer(root, layer, insert_under.id(), position)?
        }
    };

    let mut next = with_layout(refs, component_id, Some(layout))?;
    if let Some(view) = next.component_view() {
        next.ui_state = UiState::Component(select::with_selected_layer(view, Some(layer_id)));
    }
    Ok(next)
}

/// Removes a layer. Deleting the root clears the layout. The layer
/// selection is always cleared, whether or not the deleted layer held it.
pub fn delete_layer(refs: &Refs, component_id: Id, layer_id: Id) -> Result<Refs, ActionError> {
    refs.layer(component_id, layer_id)?;
    let component = refs.component(component_id)?;
    let layout = component
        .layout
        .as_ref()
        .and_then(|root| tree::remove_layer(root, layer_id));

    let mut next = with_layout(refs, component_id, layout)?;
    if let Some(view) = next.component_view() {
        next.ui_state = UiState::Component(select::with_selected_layer(view, None));
    }
    Ok(next)
}

/// Moves a layer under `parent_id` at the zero-based `position`.
pub fn move_layer(
    refs: &Refs,
    component_id: Id,
    layer_id: Id,
    parent_id: Id,
    position: usize,
) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    let root = component
        .layout
        .as_ref()
        .ok_or(ActionError::LayerNotFound { id: layer_id })?;
    let layout = tree::move_layer(root, layer_id, parent_id, position)?;
    with_layout(refs, component_id, Some(layout))
}

pub fn rename_layer(
    refs: &Refs,
    component_id: Id,
    layer_id: Id,
    name: &str,
) -> Result<Refs, ActionError> {
    let mut layer = refs.layer(component_id, layer_id)?.clone();
    layer.set_name(name.to_string());
    with_layer(refs, component_id, layer)
}

pub fn update_layer_text(
    refs: &Refs,
    component_id: Id,
    layer_id: Id,
    text: &str,
) -> Result<Refs, ActionError> {
    let layer = refs.layer(component_id, layer_id)?;
    match layer {
        Layer::Text(l) => {
            let mut updated = l.clone();
            updated.text = text.to_string();
            with_layer(refs, component_id, Layer::Text(updated))
        }
        other => Err(wrong_kind(other, LayerKind::Text)),
    }
}

pub fn update_layer_image(
    refs: &Refs,
    component_id: Id,
    layer_id: Id,
    src: &str,
    alt: &str,
) -> Result<Refs, ActionError> {
    let layer = refs.layer(component_id, layer_id)?;
    match layer {
        Layer::Image(l) => {
            let mut updated = l.clone();
            updated.src = src.to_string();
            updated.alt = alt.to_string();
            with_layer(refs, component_id, Layer::Image(updated))
        }
        other => Err(wrong_kind(other, LayerKind::Image)),
    }
}

pub fn update_layer_href(
    refs: &Refs,
    component_id: Id,
    layer_id: Id,
    href: &str,
) -> Result<Refs, ActionError> {
    let layer = refs.layer(component_id, layer_id)?;
    match layer {
        Layer::Link(l) => {
            let mut updated = l.clone();
            updated.href = href.to_string();
            with_layer(refs, component_id, Layer::Link(updated))
        }
        other => Err(wrong_kind(other, LayerKind::Link)),
    }
}

/// Sets or clears one binding entry on a layer.
///
/// The binding target must be a declared prop of the owning component, so a
/// binding can only dangle transiently inside the prop-delete cascade,
/// which removes it in the same transition.
pub fn set_layer_binding(
    refs: &Refs,
    component_id: Id,
    layer_id: Id,
    prop: &str,
    binding: Option<&str>,
) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    let mut layer = refs.layer(component_id, layer_id)?.clone();
    match binding {
        Some(target) => {
            if !component.has_prop(target) {
                return Err(ActionError::PropNotFound {
                    component_id,
                    name: target.to_string(),
                });
            }
            let bindings = layer.bindings_mut();
            *bindings = bindings.set(
                prop.to_string(),
                crate::model::layer::Binding {
                    prop_name: target.to_string(),
                },
            );
        }
        None => {
            let bindings = layer.bindings_mut();
            *bindings = bindings.remove(&prop.to_string());
        }
    }
    with_layer(refs, component_id, layer)
}

/// Edits a `Component`-layer's literal prop value. The prop must be
/// declared by the referenced component.
pub fn update_component_layer_prop(
    refs: &Refs,
    component_id: Id,
    layer_id: Id,
    prop: &str,
    value: &str,
) -> Result<Refs, ActionError> {
    let layer = refs.layer(component_id, layer_id)?;
    match layer {
        Layer::Component(l) => {
            let target = refs.component(l.component_id)?;
            if !target.has_prop(prop) {
                return Err(ActionError::PropNotFound {
                    component_id: l.component_id,
                    name: prop.to_string(),
                });
            }
            let mut updated = l.clone();
            updated.props = updated.props.set(prop.to_string(), value.to_string());
            with_layer(refs, component_id, Layer::Component(updated))
        }
        other => Err(wrong_kind(other, LayerKind::Component)),
    }
}

/// Merges a style patch into whatever layer is currently selected.
///
/// The action payload carries no component/layer id on purpose: style edits
/// always target the active selection. Requires a component view with a
/// selected layer. With no active media query the patch lands on the base
/// style; with one selected it lands on that override only.
pub fn update_layer_style(refs: &Refs, patch: &LayerStyle) -> Result<Refs, ActionError> {
    let view = refs
        .component_view()
        .ok_or(ActionError::NoActiveLayer)?
        .clone();
    let layer_id = view.layer_id.ok_or(ActionError::NoActiveLayer)?;
    let mut layer = refs.layer(view.component_id, layer_id)?.clone();

    match view.media_query_id {
        None => {
            let merged = layer.style().merge(patch);
            *layer.style_mut() = merged;
        }
        Some(mq_id) => {
            let mq = layer
                .media_queries_mut()
                .iter_mut()
                .find(|mq| mq.id == mq_id)
                .ok_or(ActionError::MediaQueryNotFound {
                    id: mq_id,
                    layer_id,
                })?;
            mq.style = mq.style.merge(patch);
        }
    }
    with_layer(refs, view.component_id, layer)
}

/// Appends a media-query override referencing `breakpoint_id`, seeded with
/// a copy of the layer's current base style, and selects it.
pub fn add_media_query(
    refs: &Refs,
    component_id: Id,
    layer_id: Id,
    breakpoint_id: Id,
) -> Result<Refs, ActionError> {
    refs.breakpoint(breakpoint_id)?;
    let mut layer = refs.layer(component_id, layer_id)?.clone();
    let mq = factory::new_media_query(breakpoint_id, layer.style());
    let mq_id = mq.id;
    layer.media_queries_mut().push(mq);

    let mut next = with_layer(refs, component_id, layer)?;
    if let Some(view) = next.component_view() {
        next.ui_state = UiState::Component(ComponentView {
            media_query_id: Some(mq_id),
            ..view.clone()
        });
    }
    Ok(next)
}

/// Removes a media-query override, deselecting it if it was active.
pub fn delete_media_query(
    refs: &Refs,
    component_id: Id,
    layer_id: Id,
    media_query_id: Id,
) -> Result<Refs, ActionError> {
    let mut layer = refs.layer(component_id, layer_id)?.clone();
    let queries = layer.media_queries_mut();
    if !queries.iter().any(|mq| mq.id == media_query_id) {
        return Err(ActionError::MediaQueryNotFound {
            id: media_query_id,
            layer_id,
        });
    }
    queries.retain(|mq| mq.id != media_query_id);

    let mut next = with_layer(refs, component_id, layer)?;
    if let Some(view) = next.component_view() {
        if view.media_query_id == Some(media_query_id) {
            next.ui_state = UiState::Component(ComponentView {
                media_query_id: None,
                ..view.clone()
            });
        }
    }
    Ok(next)
}

fn wrong_kind(layer: &Layer, expected: LayerKind) -> ActionError {
    ActionError::WrongLayerKind {
        id: layer.id(),
        expected,
        actual: layer.kind(),
    }
}
