//! Advisory whole-document validation.
//!
//! The reducer maintains these invariants itself on every transition, so a
//! document that never left the reducer's control always passes. Validation
//! exists for hosts loading documents from outside that control: files
//! edited by hand, produced by older versions, or assembled by other tools.
//! The first violation found is returned.

use rustc_hash::FxHashSet;

use crate::error::ValidationError;
use crate::model::component::Component;
use crate::model::id::Id;
use crate::model::layer::Layer;
use crate::model::refs::Refs;
use crate::tree;

/// Checks the whole document for invariant violations.
pub fn validate_refs(refs: &Refs) -> Result<(), ValidationError> {
    for (component_id, component) in refs.components.iter() {
        validate_component(refs, *component_id, component)?;
    }
    validate_ui_state(refs)
}

fn validate_component(
    refs: &Refs,
    component_id: Id,
    component: &Component,
) -> Result<(), ValidationError> {
    let mut prop_names = FxHashSet::default();
    for prop in &component.props {
        if !prop_names.insert(prop.name.as_str()) {
            return Err(ValidationError::DuplicatePropName {
                component_id,
                name: prop.name.clone(),
            });
        }
    }

    let Some(layout) = component.layout.as_ref() else {
        return Ok(());
    };
    let mut layer_ids = FxHashSet::default();
    for layer in tree::descendants(layout) {
        let layer_id = layer.id();
        if !layer_ids.insert(layer_id) {
            return Err(ValidationError::DuplicateLayerId {
                component_id,
                id: layer_id,
            });
        }
        for (_, binding) in layer.bindings().iter() {
            if !component.has_prop(&binding.prop_name) {
                return Err(ValidationError::UnknownBindingTarget {
                    component_id,
                    layer_id,
                    prop: binding.prop_name.clone(),
                });
            }
        }
        for query in layer.media_queries() {
            if !refs.breakpoints.contains_key(&query.min_width.id) {
                return Err(ValidationError::MissingBreakpoint {
                    layer_id,
                    media_query_id: query.id,
                    breakpoint_id: query.min_width.id,
                });
            }
        }
        if let Layer::Component(l) = layer {
            if !refs.components.contains_key(&l.component_id) {
                return Err(ValidationError::MissingComponentTarget {
                    component_id,
                    layer_id,
                    target: l.component_id,
                });
            }
        }
    }
    Ok(())
}

/// Checks that `ui_state` only addresses entities that exist.
fn validate_ui_state(refs: &Refs) -> Result<(), ValidationError> {
    let Some(view) = refs.component_view() else {
        return Ok(());
    };
    if !refs.components.contains_key(&view.component_id) {
        return Err(ValidationError::StaleActiveComponent {
            id: view.component_id,
        });
    }
    for id in [view.layer_id, view.hovered_layer_id].into_iter().flatten() {
        if refs.layer(view.component_id, id).is_err() {
            return Err(ValidationError::StaleActiveLayer { id });
        }
    }
    Ok(())
}
