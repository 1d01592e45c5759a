//! The global keyboard-shortcut meta-action.
//!
//! Shortcuts are routed through the reducer so the host stays free of
//! document knowledge. Whether a key does anything depends entirely on the
//! current UI state; a shortcut that does not apply returns the snapshot
//! unchanged rather than failing.

use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::model::component::Component;
use crate::model::id::Id;
use crate::model::layer::{Display, FlexDirection};
#[cfg(test)]
use crate::model::layer::Layer;
use crate::model::refs::Refs;
use crate::tree;

use super::layers;

/// Keys the reducer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutKey {
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// Where an arrow key wants to move the selected layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Previous,
    Next,
}

pub fn global_shortcut(refs: &Refs, key: ShortcutKey) -> Result<Refs, ActionError> {
    let Some(view) = refs.component_view() else {
        return Ok(refs.clone());
    };
    let Some(layer_id) = view.layer_id else {
        return Ok(refs.clone());
    };

    match key {
        ShortcutKey::Backspace => {
            if !view.is_editing {
                return Ok(refs.clone());
            }
            layers::delete_layer(refs, view.component_id, layer_id).map(Refs::mark_unsaved)
        }
        ShortcutKey::ArrowUp | ShortcutKey::ArrowDown | ShortcutKey::ArrowLeft
        | ShortcutKey::ArrowRight => reorder(refs, view.component_id, layer_id, key),
    }
}

/// Moves the selected layer among its siblings when the parent is a flex
/// row/column whose axis matches the pressed arrow.
///
/// A container with no explicit `display` counts as flex; a link does not.
/// `-reverse` directions invert which arrow means previous/next. Arrows at
/// the edge of the sibling list, a cross-axis arrow, a non-flex parent, or
/// a root selection are all no-ops.
fn reorder(refs: &Refs, component_id: Id, layer_id: Id, key: ShortcutKey) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    let Some(root) = component.layout.as_ref() else {
        return Ok(refs.clone());
    };
    let Some(found) = tree::find_layer_with_parent(root, layer_id) else {
        return Ok(refs.clone());
    };
    let Some(parent) = found.parent else {
        return Ok(refs.clone());
    };
    if parent.effective_display() != Some(Display::Flex) {
        return Ok(refs.clone());
    }
    let direction = parent.style().flex_direction.unwrap_or(FlexDirection::Row);
    let Some(step) = step_for(key, direction) else {
        return Ok(refs.clone());
    };

    let siblings = parent.children().map(Vec::as_slice).unwrap_or_default();
    let Some(index) = siblings.iter().position(|l| l.id() == layer_id) else {
        return Ok(refs.clone());
    };
    let target = match step {
        Step::Previous if index > 0 => index - 1,
        Step::Next if index + 1 < siblings.len() => index + 1,
        // At the edge of the sibling list
        Step::Previous | Step::Next => return Ok(refs.clone()),
    };

    let mut updated = parent.clone();
    if let Some(children) = updated.children_mut() {
        children.swap(index, target);
    }
    let layout = tree::replace_layer(root, updated);
    let next = refs.with_component(
        component_id,
        Component {
            layout: Some(layout),
            ..component.clone()
        },
    );
    Ok(next.mark_unsaved())
}

/// Maps an arrow to previous/next for the given flex direction, or `None`
/// when the arrow is on the wrong axis.
fn step_for(key: ShortcutKey, direction: FlexDirection) -> Option<Step> {
    let step = match (key, direction.is_vertical()) {
        (ShortcutKey::ArrowUp, true) | (ShortcutKey::ArrowLeft, false) => Step::Previous,
        (ShortcutKey::ArrowDown, true) | (ShortcutKey::ArrowRight, false) => Step::Next,
        _ => return None,
    };
    Some(match (step, direction.is_reversed()) {
        (s, false) => s,
        (Step::Previous, true) => Step::Next,
        (Step::Next, true) => Step::Previous,
    })
}
