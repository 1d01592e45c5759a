//! Handlers for component-level actions: lifecycle, props (with their
//! document-wide cascades), and example presets.

use crate::error::ActionError;
use crate::factory;
use crate::model::component::{Component, ComponentProp};
use crate::model::id::Id;
use crate::model::layer::Layer;
use crate::model::refs::{ComponentView, Refs, UiState};
use crate::select;
use crate::tree;

pub fn add_component(refs: &Refs, name: &str) -> Result<Refs, ActionError> {
    if refs.components.values().any(|c| c.name == name) {
        return Err(ActionError::DuplicateComponentName {
            name: name.to_string(),
        });
    }
    let id = Id::generate();
    let mut next = refs.with_component(id, factory::new_component(name));
    next.ui_state = UiState::Component(ComponentView::new(id, true));
    Ok(next)
}

pub fn rename_component(refs: &Refs, component_id: Id, name: &str) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    let renamed = Component {
        name: name.to_string(),
        ..component.clone()
    };
    Ok(refs.with_component(component_id, renamed))
}

/// Deletes a component and repairs `ui_state` in the same transition.
///
/// No scan for `Component`-layers referencing the deleted component is
/// performed: such references dangle until resolution time, the same policy
/// as ref deletion.
pub fn delete_component(refs: &Refs, component_id: Id) -> Result<Refs, ActionError> {
    refs.component(component_id)?;
    let mut next = refs.clone();
    next.components = refs.components.remove(&component_id);
    next.ui_state = select::after_component_delete(&next, component_id);
    Ok(next)
}

pub fn add_component_prop(
    refs: &Refs,
    component_id: Id,
    name: &str,
    default_value: Option<&str>,
) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    if component.has_prop(name) {
        return Err(ActionError::DuplicatePropName {
            component_id,
            name: name.to_string(),
        });
    }
    let mut updated = component.clone();
    updated.props.push(ComponentProp {
        name: name.to_string(),
        default_value: default_value.map(str::to_string),
    });
    Ok(refs.with_component(component_id, updated))
}

/// Renames a prop and retargets every reference to it across the document:
/// binding targets inside the owning component's own tree, example preset
/// keys, and the `props`/`bindings` entries (keyed by the *child* prop name)
/// of every `Component`-layer anywhere that instances the owner.
pub fn edit_component_prop(
    refs: &Refs,
    component_id: Id,
    old_name: &str,
    new_name: &str,
) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    if !component.has_prop(old_name) {
        return Err(ActionError::PropNotFound {
            component_id,
            name: old_name.to_string(),
        });
    }
    if old_name != new_name && component.has_prop(new_name) {
        return Err(ActionError::DuplicatePropName {
            component_id,
            name: new_name.to_string(),
        });
    }

    let mut next = refs.clone();
    next.components = refs.components.map_values(|id, c| {
        let mut c = c.clone();
        if *id == component_id {
            for prop in &mut c.props {
                if prop.name == old_name {
                    prop.name = new_name.to_string();
                }
            }
            c.examples = c
                .examples
                .into_iter()
                .map(|mut ex| {
                    ex.props = ex.props.rename_key(&old_name.to_string(), new_name.to_string());
                    ex
                })
                .collect();
            c.layout = c.layout.map(|root| {
                tree::map_layers(root, &mut |mut layer| {
                    retarget_bindings(&mut layer, old_name, new_name);
                    layer
                })
            });
        }
        c.layout = c.layout.map(|root| {
            tree::map_layers(root, &mut |mut layer| {
                rekey_instance_entries(&mut layer, component_id, old_name, new_name);
                layer
            })
        });
        c
    });
    Ok(next)
}

/// Removes a prop with the three-way cascade: the owner's prop list and
/// example presets, bindings in the owner's own tree, and the matching
/// `props`/`bindings` entries on every referencing `Component`-layer in the
/// whole document.
pub fn delete_component_prop(
    refs: &Refs,
    component_id: Id,
    name: &str,
) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    if !component.has_prop(name) {
        return Err(ActionError::PropNotFound {
            component_id,
            name: name.to_string(),
        });
    }

    let mut next = refs.clone();
    next.components = refs.components.map_values(|id, c| {
        let mut c = c.clone();
        if *id == component_id {
            c.props.retain(|p| p.name != name);
            c.examples = c
                .examples
                .into_iter()
                .map(|mut ex| {
                    ex.props = ex.props.remove(&name.to_string());
                    ex
                })
                .collect();
            c.layout = c.layout.map(|root| {
                tree::map_layers(root, &mut |mut layer| {
                    strip_bindings_to(&mut layer, name);
                    layer
                })
            });
        }
        c.layout = c.layout.map(|root| {
            tree::map_layers(root, &mut |mut layer| {
                drop_instance_entries(&mut layer, component_id, name);
                layer
            })
        });
        c
    });
    Ok(next)
}

pub fn add_component_example(refs: &Refs, component_id: Id, name: &str) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    let mut updated = component.clone();
    updated.examples.push(factory::new_example(name));
    Ok(refs.with_component(component_id, updated))
}

pub fn delete_component_example(
    refs: &Refs,
    component_id: Id,
    example_id: Id,
) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    let mut updated = component.clone();
    updated.examples.retain(|ex| ex.id != example_id);
    Ok(refs.with_component(component_id, updated))
}

/// Sets one prop value on an example preset.
///
/// A stale `example_id` is a benign miss (rapid UI edits race against
/// deletes): the component is returned unchanged rather than failing.
pub fn update_component_example_prop(
    refs: &Refs,
    component_id: Id,
    example_id: Id,
    prop_name: &str,
    value: &str,
) -> Result<Refs, ActionError> {
    let component = refs.component(component_id)?;
    let mut updated = component.clone();
    updated.examples = updated
        .examples
        .into_iter()
        .map(|mut ex| {
            if ex.id == example_id {
                ex.props = ex.props.set(prop_name.to_string(), value.to_string());
            }
            ex
        })
        .collect();
    Ok(refs.with_component(component_id, updated))
}

/// Rewrites binding targets `old` → `new` on one layer of the owner's tree.
fn retarget_bindings(layer: &mut Layer, old: &str, new: &str) {
    let bindings = layer.bindings_mut();
    *bindings = bindings.map_values(|_, binding| {
        let mut binding = binding.clone();
        if binding.prop_name == old {
            binding.prop_name = new.to_string();
        }
        binding
    });
}

/// Drops binding entries targeting `name` on one layer of the owner's tree.
fn strip_bindings_to(layer: &mut Layer, name: &str) {
    let bindings = layer.bindings_mut();
    let stale: Vec<String> = bindings
        .iter()
        .filter(|(_, b)| b.prop_name == name)
        .map(|(k, _)| k.clone())
        .collect();
    for key in stale {
        *bindings = bindings.remove(&key);
    }
}

/// Rekeys `props`/`bindings` entries on a `Component`-layer instancing
/// `target` when the child prop `old` was renamed to `new`.
fn rekey_instance_entries(layer: &mut Layer, target: Id, old: &str, new: &str) {
    if let Layer::Component(instance) = layer {
        if instance.component_id == target {
            instance.props = instance.props.rename_key(&old.to_string(), new.to_string());
            instance.bindings = instance
                .bindings
                .rename_key(&old.to_string(), new.to_string());
        }
    }
}

/// Deletes `props`/`bindings` entries keyed by the removed child prop on a
/// `Component`-layer instancing `target`.
fn drop_instance_entries(layer: &mut Layer, target: Id, name: &str) {
    if let Layer::Component(instance) = layer {
        if instance.component_id == target {
            instance.props = instance.props.remove(&name.to_string());
            instance.bindings = instance.bindings.remove(&name.to_string());
        }
    }
}
