//! Error types for action application, reference resolution, and validation.

use thiserror::Error;

use crate::model::id::Id;
use crate::model::layer::LayerKind;
use crate::model::refs::RefKind;

/// An invariant violation raised while applying an action.
///
/// Every variant signals a bug in the caller (an action addressing an entity
/// that does not exist, or issued against the wrong UI state), never an
/// expected runtime condition. No partial mutation is observable: on error
/// no new snapshot is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("component {id} not found")]
    ComponentNotFound { id: Id },

    #[error("layer {id} not found")]
    LayerNotFound { id: Id },

    #[error("component name {name:?} is already taken")]
    DuplicateComponentName { name: String },

    #[error("prop {name:?} already declared on component {component_id}")]
    DuplicatePropName { component_id: Id, name: String },

    #[error("prop {name:?} not declared on component {component_id}")]
    PropNotFound { component_id: Id, name: String },

    #[error("layer {id} cannot hold children")]
    NotAContainer { id: Id },

    #[error("the root layer {id} cannot be moved")]
    CannotMoveRoot { id: Id },

    #[error("component {component_id} already has a layout; adding a layer requires a parent")]
    ParentRequired { component_id: Id },

    #[error("no layer is selected in the active component view")]
    NoActiveLayer,

    #[error("layer {id} is a {actual:?} layer, expected {expected:?}")]
    WrongLayerKind {
        id: Id,
        expected: LayerKind,
        actual: LayerKind,
    },

    #[error("breakpoint {id} not found")]
    BreakpointNotFound { id: Id },

    #[error("media query {id} not found on layer {layer_id}")]
    MediaQueryNotFound { id: Id, layer_id: Id },

    #[error("{kind:?} ref value does not match ref kind")]
    RefKindMismatch { kind: RefKind },
}

/// A failure while resolving weak references or substituting component
/// layers, raised at render/resolution time rather than at edit time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("dangling {kind:?} reference: {id}")]
    DanglingRef { kind: RefKind, id: Id },

    #[error("component {id} not found during substitution")]
    ComponentNotFound { id: Id },

    #[error("component {id} embeds itself (directly or transitively)")]
    ComponentCycle { id: Id },
}

/// An advisory finding from whole-document validation.
///
/// The reducer maintains these invariants itself; validation exists for
/// hosts loading documents from outside the reducer's control.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("duplicate layer id {id} in component {component_id}")]
    DuplicateLayerId { component_id: Id, id: Id },

    #[error("duplicate prop name {name:?} on component {component_id}")]
    DuplicatePropName { component_id: Id, name: String },

    #[error("layer {layer_id} in component {component_id} references missing component {target}")]
    MissingComponentTarget {
        component_id: Id,
        layer_id: Id,
        target: Id,
    },

    #[error("layer {layer_id} in component {component_id} binds to undeclared prop {prop:?}")]
    UnknownBindingTarget {
        component_id: Id,
        layer_id: Id,
        prop: String,
    },

    #[error("media query {media_query_id} on layer {layer_id} references missing breakpoint {breakpoint_id}")]
    MissingBreakpoint {
        layer_id: Id,
        media_query_id: Id,
        breakpoint_id: Id,
    },

    #[error("ui state references missing component {id}")]
    StaleActiveComponent { id: Id },

    #[error("ui state references missing layer {id}")]
    StaleActiveLayer { id: Id },
}
