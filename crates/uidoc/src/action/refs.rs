//! Handlers for the top-level reference collections (colors, fonts,
//! breakpoints) and artboards.
//!
//! `update_ref` / `delete_ref` are generic over [`RefKind`]: the kind tag
//! selects which map the action indexes into. Deletion deliberately does
//! not scan layers for usages; a style referencing a deleted definition
//! dangles until resolution time.

use crate::error::ActionError;
use crate::model::id::Id;
use crate::model::refs::{Artboard, RefKind, RefValue, Refs};

/// Inserts or replaces a definition in the map selected by `kind`.
///
/// The payload variant must match the kind tag; a mismatch is a caller bug.
pub fn update_ref(refs: &Refs, kind: RefKind, id: Id, value: &RefValue) -> Result<Refs, ActionError> {
    let mut next = refs.clone();
    match (kind, value) {
        (RefKind::Color, RefValue::Color(def)) => {
            next.colors = refs.colors.set(id, def.clone());
        }
        (RefKind::FontFamily, RefValue::FontFamily(def)) => {
            next.font_families = refs.font_families.set(id, def.clone());
        }
        (RefKind::FontSize, RefValue::FontSize(def)) => {
            next.font_sizes = refs.font_sizes.set(id, def.clone());
        }
        (RefKind::Breakpoint, RefValue::Breakpoint(def)) => {
            next.breakpoints = refs.breakpoints.set(id, def.clone());
        }
        (kind, _) => return Err(ActionError::RefKindMismatch { kind }),
    }
    Ok(next)
}

/// Removes a definition from the map selected by `kind`.
pub fn delete_ref(refs: &Refs, kind: RefKind, id: Id) -> Result<Refs, ActionError> {
    let mut next = refs.clone();
    match kind {
        RefKind::Color => next.colors = refs.colors.remove(&id),
        RefKind::FontFamily => next.font_families = refs.font_families.remove(&id),
        RefKind::FontSize => next.font_sizes = refs.font_sizes.remove(&id),
        RefKind::Breakpoint => next.breakpoints = refs.breakpoints.remove(&id),
    }
    Ok(next)
}

pub fn update_artboard(refs: &Refs, id: Id, artboard: &Artboard) -> Result<Refs, ActionError> {
    let mut next = refs.clone();
    next.artboards = refs.artboards.set(id, artboard.clone());
    Ok(next)
}

pub fn delete_artboard(refs: &Refs, id: Id) -> Result<Refs, ActionError> {
    let mut next = refs.clone();
    next.artboards = refs.artboards.remove(&id);
    Ok(next)
}
