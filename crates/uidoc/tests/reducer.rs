//! End-to-end scenarios driving the reducer through the public API.

use uidoc::action::{apply_action, Action};
use uidoc::factory::{self, NewLayer};
use uidoc::model::layer::{Layer, LayerStyle, StyleRef};
use uidoc::model::refs::{ColorDef, RefKind, RefValue, Refs, UiState};
use uidoc::model::Id;
use uidoc::resolve::{self, PropContext};

fn first_component(refs: &Refs) -> Id {
    *refs.components.first_key().unwrap()
}

fn layout<'a>(refs: &'a Refs, component_id: Id) -> &'a Layer {
    refs.components
        .get(&component_id)
        .unwrap()
        .layout
        .as_ref()
        .unwrap()
}

fn apply(refs: &Refs, actions: &[Action]) -> Refs {
    actions
        .iter()
        .fold(refs.clone(), |acc, action| apply_action(action, &acc).unwrap())
}

#[test]
fn add_layer_to_hello_world() {
    let refs = factory::default_project();
    let component_id = first_component(&refs);
    let root = layout(&refs, component_id);
    assert_eq!(root.name(), "Container");
    assert_eq!(root.children().unwrap().len(), 1);
    assert_eq!(root.children().unwrap()[0].name(), "Hello World");

    let root_id = root.id();
    let next = apply(
        &refs,
        &[
            Action::SelectComponent {
                component_id,
                editing: true,
            },
            Action::AddLayer {
                component_id,
                layer: NewLayer::Text,
                parent_layer_id: Some(root_id),
            },
        ],
    );

    let children = layout(&next, component_id).children().unwrap();
    assert_eq!(children.len(), 2);
    // First unused default name for a text layer
    assert_eq!(children[1].name(), "Text");
    // The new layer becomes the selection
    assert_eq!(
        next.component_view().unwrap().layer_id,
        Some(children[1].id())
    );
    assert!(!next.is_saved);
}

#[test]
fn add_layer_on_leaf_becomes_sibling() {
    let refs = factory::default_project();
    let component_id = first_component(&refs);
    let text_id = layout(&refs, component_id).children().unwrap()[0].id();

    let next = apply_action(
        &Action::AddLayer {
            component_id,
            layer: NewLayer::Image,
            parent_layer_id: Some(text_id),
        },
        &refs,
    )
    .unwrap();

    // Escalated to the text layer's parent, not nested under the leaf
    let children = layout(&next, component_id).children().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].name(), "Image");
}

/// Builds a "card" component with a bound `title` prop, plus an instance of
/// it inside the default hello-world component. Returns
/// (refs, card_id, hello_id, instance_id).
fn document_with_instance() -> (Refs, Id, Id, Id) {
    let refs = factory::default_project();
    let hello_id = first_component(&refs);

    let refs = apply_action(
        &Action::AddComponent {
            name: "card".to_string(),
        },
        &refs,
    )
    .unwrap();
    // AddComponent selects the new component, so its id is in ui_state
    let card_id = refs.component_view().unwrap().component_id;

    let refs = apply(
        &refs,
        &[
            Action::AddLayer {
                component_id: card_id,
                layer: NewLayer::Text,
                parent_layer_id: None,
            },
            Action::AddComponentProp {
                component_id: card_id,
                name: "title".to_string(),
                default_value: Some("Untitled".to_string()),
            },
        ],
    );
    let card_root_id = layout(&refs, card_id).id();
    let refs = apply(
        &refs,
        &[
            Action::SetLayerBinding {
                component_id: card_id,
                layer_id: card_root_id,
                prop: "text".to_string(),
                binding: Some("title".to_string()),
            },
            Action::AddComponentExample {
                component_id: card_id,
                name: "greeting".to_string(),
            },
        ],
    );
    let example_id = refs.components.get(&card_id).unwrap().examples[0].id;
    let refs = apply_action(
        &Action::UpdateComponentExampleProp {
            component_id: card_id,
            example_id,
            prop_name: "title".to_string(),
            value: "Hi from the example".to_string(),
        },
        &refs,
    )
    .unwrap();

    // Instance the card inside hello-world
    let hello_root_id = layout(&refs, hello_id).id();
    let refs = apply(
        &refs,
        &[
            Action::SelectComponent {
                component_id: hello_id,
                editing: true,
            },
            Action::AddLayer {
                component_id: hello_id,
                layer: NewLayer::Component {
                    component_id: card_id,
                },
                parent_layer_id: Some(hello_root_id),
            },
        ],
    );
    let instance_id = refs.component_view().unwrap().layer_id.unwrap();
    let refs = apply_action(
        &Action::UpdateComponentLayerProp {
            component_id: hello_id,
            layer_id: instance_id,
            prop: "title".to_string(),
            value: "Hello from the instance".to_string(),
        },
        &refs,
    )
    .unwrap();
    (refs, card_id, hello_id, instance_id)
}

fn instance<'a>(refs: &'a Refs, hello_id: Id, instance_id: Id) -> &'a Layer {
    uidoc::tree::find_layer(layout(refs, hello_id), instance_id).unwrap()
}

#[test]
fn delete_prop_cascades_document_wide() {
    let (refs, card_id, hello_id, instance_id) = document_with_instance();

    let next = apply_action(
        &Action::DeleteComponentProp {
            component_id: card_id,
            name: "title".to_string(),
        },
        &refs,
    )
    .unwrap();

    let card = next.components.get(&card_id).unwrap();
    assert!(!card.has_prop("title"));
    // Binding inside the card's own tree is gone
    assert!(card.layout.as_ref().unwrap().bindings().is_empty());
    // Example preset entry is scrubbed
    assert!(card.examples[0].props.is_empty());
    // The instance in the other component lost its entry too
    let Layer::Component(inst) = instance(&next, hello_id, instance_id) else {
        panic!("expected component layer");
    };
    assert!(!inst.props.contains_key(&"title".to_string()));
}

#[test]
fn rename_prop_retargets_document_wide() {
    let (refs, card_id, hello_id, instance_id) = document_with_instance();

    let next = apply_action(
        &Action::EditComponentProp {
            component_id: card_id,
            old_name: "title".to_string(),
            new_name: "heading".to_string(),
        },
        &refs,
    )
    .unwrap();

    let card = next.components.get(&card_id).unwrap();
    assert!(card.has_prop("heading"));
    assert!(!card.has_prop("title"));
    let binding = card
        .layout
        .as_ref()
        .unwrap()
        .bindings()
        .get(&"text".to_string())
        .unwrap();
    assert_eq!(binding.prop_name, "heading");
    assert_eq!(
        card.examples[0].props.get(&"heading".to_string()).unwrap(),
        "Hi from the example"
    );
    let Layer::Component(inst) = instance(&next, hello_id, instance_id) else {
        panic!("expected component layer");
    };
    assert_eq!(
        inst.props.get(&"heading".to_string()).unwrap(),
        "Hello from the instance"
    );
    assert!(!inst.props.contains_key(&"title".to_string()));
}

#[test]
fn instance_substitution_uses_prop_value() {
    let (refs, _, hello_id, instance_id) = document_with_instance();

    let resolved = resolve::resolve_layer(
        &refs,
        instance(&refs, hello_id, instance_id),
        &PropContext::empty(),
    )
    .unwrap()
    .unwrap();
    let resolve::ResolvedContent::Text { text } = &resolved.content else {
        panic!("expected text content");
    };
    assert_eq!(text, "Hello from the instance");
}

#[test]
fn delete_component_falls_back_to_first_remaining() {
    let refs = factory::default_project();
    let hello_id = first_component(&refs);
    let refs = apply_action(
        &Action::AddComponent {
            name: "card".to_string(),
        },
        &refs,
    )
    .unwrap();
    let card_id = refs.component_view().unwrap().component_id;

    // The active component goes away: fall back to the first remaining one
    let next = apply_action(&Action::DeleteComponent { component_id: card_id }, &refs).unwrap();
    assert_eq!(next.component_view().unwrap().component_id, hello_id);

    // No components left: fall back to the typography view
    let last = apply_action(
        &Action::DeleteComponent {
            component_id: hello_id,
        },
        &next,
    )
    .unwrap();
    assert_eq!(last.ui_state, UiState::Typography);
}

#[test]
fn style_routing_and_responsive_resolution() {
    let red = Id::from_u128(1);
    let blue = Id::from_u128(2);
    let refs = factory::default_project();
    let component_id = first_component(&refs);
    let root_id = layout(&refs, component_id).id();
    let tablet = *refs.breakpoints.first_key().unwrap();
    assert_eq!(refs.breakpoints.get(&tablet).unwrap().min_width_px, 768);

    let refs = apply(
        &refs,
        &[
            Action::UpdateRef {
                kind: RefKind::Color,
                id: red,
                value: RefValue::Color(ColorDef {
                    name: "red".to_string(),
                    value: "red".to_string(),
                }),
            },
            Action::UpdateRef {
                kind: RefKind::Color,
                id: blue,
                value: RefValue::Color(ColorDef {
                    name: "blue".to_string(),
                    value: "blue".to_string(),
                }),
            },
            Action::SelectComponent {
                component_id,
                editing: true,
            },
            Action::SelectLayer {
                layer_id: Some(root_id),
            },
            // No media query selected: this edits the base style
            Action::UpdateLayerStyle {
                style: LayerStyle {
                    color: Some(StyleRef::new(red)),
                    ..LayerStyle::default()
                },
            },
            // Adding a media query selects it, so this edits the override
            Action::AddMediaQuery {
                component_id,
                layer_id: root_id,
                breakpoint_id: tablet,
            },
            Action::UpdateLayerStyle {
                style: LayerStyle {
                    color: Some(StyleRef::new(blue)),
                    ..LayerStyle::default()
                },
            },
        ],
    );

    let root = layout(&refs, component_id);
    assert_eq!(root.style().color, Some(StyleRef::new(red)));
    assert_eq!(root.media_queries().len(), 1);
    assert_eq!(
        root.media_queries()[0].style.color,
        Some(StyleRef::new(blue))
    );

    let narrow = resolve::resolve_responsive_style(root, 500, &refs).unwrap();
    let narrow = resolve::resolve_style(&narrow, &refs).unwrap();
    assert_eq!(narrow.color.as_deref(), Some("red"));

    let wide = resolve::resolve_responsive_style(root, 900, &refs).unwrap();
    let wide = resolve::resolve_style(&wide, &refs).unwrap();
    assert_eq!(wide.color.as_deref(), Some("blue"));
}

#[test]
fn move_layer_round_trips() {
    let refs = factory::default_project();
    let component_id = first_component(&refs);
    let root_id = layout(&refs, component_id).id();
    let refs = apply(
        &refs,
        &[
            Action::AddLayer {
                component_id,
                layer: NewLayer::Container,
                parent_layer_id: Some(root_id),
            },
            Action::AddLayer {
                component_id,
                layer: NewLayer::Text,
                parent_layer_id: Some(root_id),
            },
        ],
    );
    let children = layout(&refs, component_id).children().unwrap();
    let inner_id = children[1].id();
    let text_id = children[2].id();
    let original_text = children[2].clone();

    // Move the text into the inner container and back
    let moved = apply_action(
        &Action::MoveLayer {
            component_id,
            layer_id: text_id,
            parent_id: inner_id,
            position: 0,
        },
        &refs,
    )
    .unwrap();
    let back = apply_action(
        &Action::MoveLayer {
            component_id,
            layer_id: text_id,
            parent_id: root_id,
            position: 2,
        },
        &moved,
    )
    .unwrap();

    let recovered = uidoc::tree::find_layer(layout(&back, component_id), text_id).unwrap();
    assert_eq!(recovered, &original_text);
    assert_eq!(layout(&back, component_id), layout(&refs, component_id));
}

#[test]
fn actions_round_trip_through_json() {
    let action = Action::AddLayer {
        component_id: Id::from_u128(1),
        layer: NewLayer::Text,
        parent_layer_id: None,
    };
    let json = serde_json::to_string(&action).unwrap();
    let back: Action = serde_json::from_str(&json).unwrap();
    assert_eq!(back, action);

    let refs = factory::default_project();
    let json = serde_json::to_string(&refs).unwrap();
    let back: Refs = serde_json::from_str(&json).unwrap();
    assert_eq!(back, refs);
}

#[test]
fn document_wire_shape_inlines_ids() {
    let refs = factory::default_project();
    let json = serde_json::to_value(&refs).unwrap();

    // Entity collections are ordered arrays of id-tagged objects
    let color = &json["colors"][0];
    assert_eq!(color["id"], refs.colors.first_key().unwrap().to_string());
    assert_eq!(color["name"], "black");
    assert_eq!(color["value"], "#000000");
    assert_eq!(json["breakpoints"][0]["name"], "tablet");
    assert_eq!(json["breakpoints"][0]["minWidthPx"], 768);

    // Name-keyed prop values are plain objects; bindings stay entry arrays
    let (refs, _, hello_id, instance_id) = document_with_instance();
    let inst = serde_json::to_value(instance(&refs, hello_id, instance_id)).unwrap();
    assert_eq!(inst["props"]["title"], "Hello from the instance");
    assert!(inst["bindings"].is_array());
}

mod props {
    use proptest::prelude::*;
    use uidoc::model::component::ComponentProp;
    use uidoc::model::layer::{Binding, LayerKind};
    use uidoc::tree;

    use super::*;

    fn layer_tree() -> impl Strategy<Value = Layer> {
        let leaf = prop_oneof![
            Just(NewLayer::Text),
            Just(NewLayer::Image),
            Just(NewLayer::Link),
        ]
        .prop_map(|kind| factory::new_layer(&kind));
        leaf.prop_recursive(3, 24, 4, |inner| {
            proptest::collection::vec(inner, 0..4).prop_map(|children| {
                let mut node = factory::new_layer(&NewLayer::Container);
                *node.children_mut().unwrap() = children;
                node
            })
        })
    }

    /// Wraps `tree` in a container root and mounts it as the only component
    /// of an otherwise empty document.
    fn mounted(tree: Layer) -> (Refs, Id, Layer) {
        let mut root = factory::new_layer(&NewLayer::Container);
        *root.children_mut().unwrap() = vec![tree];

        let component_id = Id::generate();
        let mut component = factory::new_component("canvas");
        component.layout = Some(root.clone());
        let mut refs = Refs::empty();
        refs.components = refs.components.set(component_id, component);
        (refs, component_id, root)
    }

    /// Like [`mounted`], additionally declaring a `title` prop and binding
    /// every layer's `text` prop to it.
    fn bound_document(tree: Layer) -> (Refs, Id) {
        let (mut refs, component_id, root) = mounted(tree);
        let root = tree::map_layers(root, &mut |mut layer| {
            let bound = layer.bindings().set(
                "text".to_string(),
                Binding {
                    prop_name: "title".to_string(),
                },
            );
            *layer.bindings_mut() = bound;
            layer
        });

        let mut component = refs.components.get(&component_id).unwrap().clone();
        component.props.push(ComponentProp {
            name: "title".to_string(),
            default_value: None,
        });
        component.layout = Some(root);
        refs.components = refs.components.set(component_id, component);
        (refs, component_id)
    }

    proptest! {
        #[test]
        fn prop_move_layer_round_trips(
            tree in layer_tree(),
            pick in any::<prop::sample::Index>(),
        ) {
            let (refs, component_id, root) = mounted(tree);
            let root_id = root.id();
            let all = tree::descendants(&root);
            let layer_id = all[1 + pick.index(all.len() - 1)].id();

            let found = tree::find_layer_with_parent(&root, layer_id).unwrap();
            let parent = found.parent.unwrap();
            let parent_id = parent.id();
            let position = parent
                .children()
                .unwrap()
                .iter()
                .position(|c| c.id() == layer_id)
                .unwrap();

            let moved = apply_action(
                &Action::MoveLayer {
                    component_id,
                    layer_id,
                    parent_id: root_id,
                    position: 0,
                },
                &refs,
            )
            .unwrap();
            let back = apply_action(
                &Action::MoveLayer {
                    component_id,
                    layer_id,
                    parent_id,
                    position,
                },
                &moved,
            )
            .unwrap();
            prop_assert_eq!(layout(&back, component_id), &root);
        }

        #[test]
        fn prop_delete_prop_scrubs_every_binding(tree in layer_tree()) {
            let (refs, component_id) = bound_document(tree);
            let next = apply_action(
                &Action::DeleteComponentProp {
                    component_id,
                    name: "title".to_string(),
                },
                &refs,
            )
            .unwrap();
            for layer in tree::descendants(layout(&next, component_id)) {
                prop_assert!(layer.bindings().is_empty());
            }
        }

        #[test]
        fn prop_rename_prop_retargets_every_binding(tree in layer_tree()) {
            let (refs, component_id) = bound_document(tree);
            let next = apply_action(
                &Action::EditComponentProp {
                    component_id,
                    old_name: "title".to_string(),
                    new_name: "heading".to_string(),
                },
                &refs,
            )
            .unwrap();
            for layer in tree::descendants(layout(&next, component_id)) {
                let binding = layer.bindings().get(&"text".to_string()).unwrap();
                prop_assert_eq!(binding.prop_name.as_str(), "heading");
            }
        }

        #[test]
        fn prop_generated_name_is_unused(
            tree in layer_tree(),
            kind in prop_oneof![
                Just(LayerKind::Container),
                Just(LayerKind::Text),
                Just(LayerKind::Image),
                Just(LayerKind::Link),
                Just(LayerKind::Component),
            ],
        ) {
            let name = tree::generate_layer_name(Some(&tree), kind);
            prop_assert!(tree::descendants(&tree).iter().all(|l| l.name() != name));
        }
    }
}
