//! Generic algorithms over a component's layer tree.
//!
//! All structural operations are copy-on-write: they take the existing root
//! by reference and return a rebuilt tree, leaving the input untouched.
//! Children are only traversed for the container-capable variants
//! (`Container` and `Link`).

use rustc_hash::FxHashSet;

use crate::error::ActionError;
use crate::model::id::Id;
use crate::model::layer::{Layer, LayerKind};

/// A search hit with its immediate parent (`None` for the root).
#[derive(Debug, Clone, Copy)]
pub struct FoundLayer<'a> {
    pub layer: &'a Layer,
    pub parent: Option<&'a Layer>,
}

/// True iff the layer variant can hold children.
pub fn can_have_children(layer: &Layer) -> bool {
    matches!(layer.kind(), LayerKind::Container | LayerKind::Link)
}

/// Depth-first search for the layer with `id`. Returns the first match.
pub fn find_layer(root: &Layer, id: Id) -> Option<&Layer> {
    if root.id() == id {
        return Some(root);
    }
    root.children()?
        .iter()
        .find_map(|child| find_layer(child, id))
}

/// Like [`find_layer`], additionally tracking the immediate parent.
pub fn find_layer_with_parent(root: &Layer, id: Id) -> Option<FoundLayer<'_>> {
    fn walk<'a>(node: &'a Layer, parent: Option<&'a Layer>, id: Id) -> Option<FoundLayer<'a>> {
        if node.id() == id {
            return Some(FoundLayer { layer: node, parent });
        }
        node.children()?
            .iter()
            .find_map(|child| walk(child, Some(node), id))
    }
    walk(root, None, id)
}

/// Structural replace: substitutes `updated` wholesale at the node whose id
/// matches, rebuilding every ancestor on the path. A miss returns the tree
/// unchanged (a clone of the input).
pub fn replace_layer(root: &Layer, updated: Layer) -> Layer {
    if root.id() == updated.id() {
        return updated;
    }
    let mut next = root.clone();
    if let Some(children) = next.children_mut() {
        *children = children
            .iter()
            .map(|child| replace_layer(child, updated.clone()))
            .collect();
    }
    next
}

/// Removes the node with `id`. Returns `None` when the root itself was
/// removed (an empty layout).
pub fn remove_layer(root: &Layer, id: Id) -> Option<Layer> {
    if root.id() == id {
        return None;
    }
    let mut next = root.clone();
    if let Some(children) = next.children_mut() {
        *children = children
            .iter()
            .filter_map(|child| remove_layer(child, id))
            .collect();
    }
    Some(next)
}

/// Inserts `layer` as a child of `parent_id` at the zero-based `position`
/// (clamped to the child count). Fails when the target cannot hold children
/// or is not in the tree.
pub fn insert_layer(
    root: &Layer,
    layer: Layer,
    parent_id: Id,
    position: usize,
) -> Result<Layer, ActionError> {
    let parent = find_layer(root, parent_id).ok_or(ActionError::LayerNotFound { id: parent_id })?;
    if !can_have_children(parent) {
        return Err(ActionError::NotAContainer { id: parent_id });
    }

    let mut updated = parent.clone();
    let children = updated
        .children_mut()
        .ok_or(ActionError::NotAContainer { id: parent_id })?;
    let index = position.min(children.len());
    children.insert(index, layer);
    Ok(replace_layer(root, updated))
}

/// Removes the layer from its current position and reinserts it under
/// `parent_id` at `position`.
pub fn move_layer(
    root: &Layer,
    layer_id: Id,
    parent_id: Id,
    position: usize,
) -> Result<Layer, ActionError> {
    let layer = find_layer(root, layer_id)
        .ok_or(ActionError::LayerNotFound { id: layer_id })?
        .clone();
    let without =
        remove_layer(root, layer_id).ok_or(ActionError::CannotMoveRoot { id: layer_id })?;
    insert_layer(&without, layer, parent_id, position)
}

/// Pre-order flatten of the tree.
pub fn descendants(root: &Layer) -> Vec<&Layer> {
    let mut out = Vec::new();
    fn walk<'a>(node: &'a Layer, out: &mut Vec<&'a Layer>) {
        out.push(node);
        if let Some(children) = node.children() {
            for child in children {
                walk(child, out);
            }
        }
    }
    walk(root, &mut out);
    out
}

/// Applies `f` to every node in pre-order, preserving the tree shape.
///
/// The transform sees each node after its ancestors but before its children;
/// changing a node's children inside `f` composes with the recursion.
pub fn map_layers(root: Layer, f: &mut impl FnMut(Layer) -> Layer) -> Layer {
    let mut node = f(root);
    if let Some(children) = node.children_mut() {
        *children = std::mem::take(children)
            .into_iter()
            .map(|child| map_layers(child, f))
            .collect();
    }
    node
}

/// Picks a unique name for a new layer of `kind` within the tree rooted at
/// `root` (if any): the kind's display name, or that name suffixed with the
/// smallest positive integer not already in use.
pub fn generate_layer_name(root: Option<&Layer>, kind: LayerKind) -> String {
    let base = kind.display_name();
    let taken: FxHashSet<&str> = root
        .map(|r| descendants(r).into_iter().map(Layer::name).collect())
        .unwrap_or_default();
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut n = 1usize;
    loop {
        let candidate = format!("{base} {n}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}
