//! Entity factories.
//!
//! Every entity enters the document through one of these constructors, so a
//! freshly created layer, component, or example always satisfies the
//! data-model invariants: a generated unique id and every required field
//! populated with a valid default.

use serde::{Deserialize, Serialize};

use crate::model::component::{Component, ComponentExample};
use crate::model::id::Id;
use crate::model::layer::{
    ComponentLayer, ContainerLayer, ImageLayer, Layer, LayerKind, LayerStyle, LinkLayer,
    MediaQuery, StyleRef, TextLayer,
};
use crate::model::length::Length;
use crate::model::refs::{Breakpoint, ColorDef, FontFamilyDef, FontSizeDef, Refs, UiState};
use crate::ordmap::OrderedMap;

/// What kind of layer to create.
///
/// A component layer cannot exist without its target, so the variant carries
/// the referenced component's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NewLayer {
    Container,
    Text,
    Image,
    Link,
    Component { component_id: Id },
}

impl NewLayer {
    /// The [`LayerKind`] this request produces.
    pub fn kind(&self) -> LayerKind {
        match self {
            NewLayer::Container => LayerKind::Container,
            NewLayer::Text => LayerKind::Text,
            NewLayer::Image => LayerKind::Image,
            NewLayer::Link => LayerKind::Link,
            NewLayer::Component { .. } => LayerKind::Component,
        }
    }
}

/// Creates a layer of the given kind with a fresh id and default fields.
///
/// The name is the kind's display name; callers inserting into an existing
/// tree re-name it via [`crate::tree::generate_layer_name`] first.
pub fn new_layer(request: &NewLayer) -> Layer {
    let id = Id::generate();
    let name = request.kind().display_name().to_string();
    let style = LayerStyle::default();
    let media_queries = Vec::new();
    let bindings = OrderedMap::new();
    match request {
        NewLayer::Container => Layer::Container(ContainerLayer {
            id,
            name,
            style,
            media_queries,
            bindings,
            children: Vec::new(),
        }),
        NewLayer::Text => Layer::Text(TextLayer {
            id,
            name,
            style,
            media_queries,
            bindings,
            text: String::new(),
        }),
        NewLayer::Image => Layer::Image(ImageLayer {
            id,
            name,
            style,
            media_queries,
            bindings,
            src: String::new(),
            alt: String::new(),
        }),
        NewLayer::Link => Layer::Link(LinkLayer {
            id,
            name,
            style,
            media_queries,
            bindings,
            href: String::new(),
            children: Vec::new(),
        }),
        NewLayer::Component { component_id } => Layer::Component(ComponentLayer {
            id,
            name,
            style,
            media_queries,
            bindings,
            component_id: *component_id,
            props: OrderedMap::new(),
        }),
    }
}

/// Creates an empty component: no props, no examples, no layout.
pub fn new_component(name: &str) -> Component {
    Component {
        name: name.to_string(),
        props: Vec::new(),
        examples: Vec::new(),
        layout: None,
    }
}

/// Creates an empty example preset.
pub fn new_example(name: &str) -> ComponentExample {
    ComponentExample {
        id: Id::generate(),
        name: name.to_string(),
        props: OrderedMap::new(),
    }
}

/// Creates a media-query override for `breakpoint_id`.
///
/// The initial style is a copy of the layer's current base style, so the
/// override starts as a visual no-op until edited.
pub fn new_media_query(breakpoint_id: Id, base_style: &LayerStyle) -> MediaQuery {
    MediaQuery {
        id: Id::generate(),
        min_width: StyleRef::new(breakpoint_id),
        style: base_style.clone(),
    }
}

/// Builds the default project: a `hello-world` component whose layout is a
/// container holding one text layer, plus seed colors, fonts, and the usual
/// breakpoint ladder.
pub fn default_project() -> Refs {
    let text = Layer::Text(TextLayer {
        id: Id::generate(),
        name: "Hello World".to_string(),
        style: LayerStyle::default(),
        media_queries: Vec::new(),
        bindings: OrderedMap::new(),
        text: "Hello World".to_string(),
    });
    let root = Layer::Container(ContainerLayer {
        id: Id::generate(),
        name: "Container".to_string(),
        style: LayerStyle::default(),
        media_queries: Vec::new(),
        bindings: OrderedMap::new(),
        children: vec![text],
    });

    let mut component = new_component("hello-world");
    component.layout = Some(root);

    let mut refs = Refs::empty();
    refs.components = refs.components.set(Id::generate(), component);
    refs.colors = [
        ("black", "#000000"),
        ("white", "#ffffff"),
        ("primary", "#0b5fff"),
    ]
    .into_iter()
    .map(|(name, value)| {
        (
            Id::generate(),
            ColorDef {
                name: name.to_string(),
                value: value.to_string(),
            },
        )
    })
    .collect();
    refs.font_families = refs.font_families.set(
        Id::generate(),
        FontFamilyDef {
            name: "sans".to_string(),
            value: "Helvetica, Arial, sans-serif".to_string(),
        },
    );
    refs.font_sizes = [("small", 12.0), ("body", 16.0), ("heading", 24.0)]
        .into_iter()
        .map(|(name, px)| {
            (
                Id::generate(),
                FontSizeDef {
                    name: name.to_string(),
                    value: Length::Px(px),
                },
            )
        })
        .collect();
    refs.breakpoints = [("tablet", 768), ("desktop", 1024), ("wide", 1440)]
        .into_iter()
        .map(|(name, min_width_px)| {
            (
                Id::generate(),
                Breakpoint {
                    name: name.to_string(),
                    min_width_px,
                },
            )
        })
        .collect();
    refs.ui_state = UiState::Home;
    refs
}
