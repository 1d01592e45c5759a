//! Reference resolution and responsive style computation.
//!
//! Everything in the model that crosses an entity boundary is a weak by-id
//! reference: styles point at colors and fonts, media queries point at
//! breakpoints, `Component` layers point at other components. This module
//! turns those references into concrete values at render time. Editing never
//! cascades into referencing sites, so a lookup here is the first place a
//! dangling id surfaces.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::ResolveError;
use crate::model::component::Component;
use crate::model::id::Id;
use crate::model::layer::{
    AlignItems, Bindings, Display, FlexDirection, JustifyContent, Layer, LayerStyle, MediaQuery,
    StyleRef,
};
use crate::model::length::Length;
use crate::model::refs::{RefKind, Refs};
use crate::ordmap::OrderedMap;

/// Prop name → value environment for component substitution.
///
/// Assembled from a component's prop defaults, optionally overlaid with an
/// example's values, and threaded through [`resolve_layer`] so bindings can
/// look up what the surrounding instance passed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropContext {
    values: FxHashMap<String, String>,
}

impl PropContext {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The context a component's layout sees on its own: every declared prop
    /// at its default value.
    pub fn for_component(component: &Component) -> Self {
        let values = component
            .props
            .iter()
            .map(|p| (p.name.clone(), p.default_value.clone().unwrap_or_default()))
            .collect();
        Self { values }
    }

    /// Prop defaults overlaid with one example's values.
    ///
    /// Example entries for props the component no longer declares are
    /// ignored rather than surfaced.
    pub fn for_example(component: &Component, example_id: Id) -> Self {
        let mut ctx = Self::for_component(component);
        if let Some(example) = component.example(example_id) {
            for (name, value) in example.props.iter() {
                if component.has_prop(name) {
                    ctx.values.insert(name.clone(), value.clone());
                }
            }
        }
        ctx
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// A [`LayerStyle`] with every weak reference replaced by the value it
/// pointed at. Layout fields pass through untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedStyle {
    pub display: Option<Display>,
    pub flex_direction: Option<FlexDirection>,
    pub justify_content: Option<JustifyContent>,
    pub align_items: Option<AlignItems>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub padding: Option<Length>,
    pub margin: Option<Length>,
    pub gap: Option<Length>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<Length>,
    pub font_weight: Option<String>,
    pub text_align: Option<String>,
}

/// A layer tree with every `Component` layer substituted away.
///
/// `id` and `name` are those of the layer the node came from (for a
/// substituted instance, the instance layer), so resolved nodes can be
/// mapped back to the edited tree. Styles stay unresolved here; callers
/// fold and resolve them per viewport with [`resolve_responsive_style`]
/// and [`resolve_style`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayer {
    pub id: Id,
    pub name: String,
    pub style: LayerStyle,
    pub media_queries: Vec<MediaQuery>,
    pub content: ResolvedContent,
}

/// The variant-specific payload of a [`ResolvedLayer`], with binding
/// substitution already applied to text/src/alt/href.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedContent {
    Container { children: Vec<ResolvedLayer> },
    Text { text: String },
    Image { src: String, alt: String },
    Link { href: String, children: Vec<ResolvedLayer> },
}

/// Folds a layer's applicable media queries onto its base style for a given
/// viewport width.
///
/// Queries whose breakpoint `min_width_px` exceeds the width are skipped;
/// the rest are merged in ascending breakpoint order, so wider breakpoints
/// win on conflicting fields. A query referencing a missing breakpoint is a
/// hard error even when it would not have applied.
pub fn resolve_responsive_style(
    layer: &Layer,
    viewport_width: u32,
    refs: &Refs,
) -> Result<LayerStyle, ResolveError> {
    let mut applicable: Vec<(u32, &LayerStyle)> = Vec::new();
    for query in layer.media_queries() {
        let breakpoint =
            refs.breakpoints
                .get(&query.min_width.id)
                .ok_or(ResolveError::DanglingRef {
                    kind: RefKind::Breakpoint,
                    id: query.min_width.id,
                })?;
        if breakpoint.min_width_px <= viewport_width {
            applicable.push((breakpoint.min_width_px, &query.style));
        }
    }
    // Stable sort: equal widths keep declaration order
    applicable.sort_by_key(|(width, _)| *width);
    Ok(applicable
        .iter()
        .fold(layer.style().clone(), |acc, (_, style)| acc.merge(style)))
}

/// Replaces the weak color/font references in a style with the values they
/// point at.
pub fn resolve_style(style: &LayerStyle, refs: &Refs) -> Result<ResolvedStyle, ResolveError> {
    Ok(ResolvedStyle {
        display: style.display,
        flex_direction: style.flex_direction,
        justify_content: style.justify_content,
        align_items: style.align_items,
        width: style.width,
        height: style.height,
        padding: style.padding,
        margin: style.margin,
        gap: style.gap,
        color: style.color.map(|r| color_value(refs, r)).transpose()?,
        background_color: style
            .background_color
            .map(|r| color_value(refs, r))
            .transpose()?,
        font_family: style
            .font_family
            .map(|r| font_family_value(refs, r))
            .transpose()?,
        font_size: style
            .font_size
            .map(|r| font_size_value(refs, r))
            .transpose()?,
        font_weight: style.font_weight.clone(),
        text_align: style.text_align.clone(),
    })
}

fn color_value(refs: &Refs, r: StyleRef) -> Result<String, ResolveError> {
    refs.colors
        .get(&r.id)
        .map(|def| def.value.clone())
        .ok_or(ResolveError::DanglingRef {
            kind: RefKind::Color,
            id: r.id,
        })
}

fn font_family_value(refs: &Refs, r: StyleRef) -> Result<String, ResolveError> {
    refs.font_families
        .get(&r.id)
        .map(|def| def.value.clone())
        .ok_or(ResolveError::DanglingRef {
            kind: RefKind::FontFamily,
            id: r.id,
        })
}

fn font_size_value(refs: &Refs, r: StyleRef) -> Result<Length, ResolveError> {
    refs.font_sizes
        .get(&r.id)
        .map(|def| def.value)
        .ok_or(ResolveError::DanglingRef {
            kind: RefKind::FontSize,
            id: r.id,
        })
}

/// Resolves a layer tree by substituting every `Component` layer with the
/// referenced component's layout.
///
/// The instance's `props` and `bindings` become the prop context for the
/// nested layout; a binding wins over the literal when the surrounding
/// context supplies a non-empty value for the bound prop. A `Component`
/// layer whose target has no layout resolves to `None` and disappears from
/// its parent's children. Revisiting a component already on the substitution
/// path is a [`ResolveError::ComponentCycle`].
pub fn resolve_layer(
    refs: &Refs,
    layer: &Layer,
    ctx: &PropContext,
) -> Result<Option<ResolvedLayer>, ResolveError> {
    let mut visiting = FxHashSet::default();
    resolve_rec(refs, layer, ctx, &mut visiting)
}

fn resolve_rec(
    refs: &Refs,
    layer: &Layer,
    ctx: &PropContext,
    visiting: &mut FxHashSet<Id>,
) -> Result<Option<ResolvedLayer>, ResolveError> {
    let content = match layer {
        Layer::Container(l) => ResolvedContent::Container {
            children: resolve_children(refs, &l.children, ctx, visiting)?,
        },
        Layer::Text(l) => ResolvedContent::Text {
            text: bound_value(ctx, &l.bindings, "text", &l.text),
        },
        Layer::Image(l) => ResolvedContent::Image {
            src: bound_value(ctx, &l.bindings, "src", &l.src),
            alt: bound_value(ctx, &l.bindings, "alt", &l.alt),
        },
        Layer::Link(l) => ResolvedContent::Link {
            href: bound_value(ctx, &l.bindings, "href", &l.href),
            children: resolve_children(refs, &l.children, ctx, visiting)?,
        },
        Layer::Component(l) => {
            let component = refs
                .components
                .get(&l.component_id)
                .ok_or(ResolveError::ComponentNotFound { id: l.component_id })?;
            if !visiting.insert(l.component_id) {
                return Err(ResolveError::ComponentCycle { id: l.component_id });
            }
            let Some(layout) = component.layout.as_ref() else {
                visiting.remove(&l.component_id);
                return Ok(None);
            };

            let nested = instance_context(component, &l.props, &l.bindings, ctx);
            let resolved = resolve_rec(refs, layout, &nested, visiting)?;
            visiting.remove(&l.component_id);

            return Ok(resolved.map(|root| ResolvedLayer {
                id: l.id,
                name: l.name.clone(),
                // Instance-level overrides win over the substituted root
                style: root.style.merge(&l.style),
                media_queries: [root.media_queries.as_slice(), l.media_queries.as_slice()]
                    .concat(),
                content: root.content,
            }));
        }
    };
    Ok(Some(ResolvedLayer {
        id: layer.id(),
        name: layer.name().to_string(),
        style: layer.style().clone(),
        media_queries: layer.media_queries().to_vec(),
        content,
    }))
}

fn resolve_children(
    refs: &Refs,
    children: &[Layer],
    ctx: &PropContext,
    visiting: &mut FxHashSet<Id>,
) -> Result<Vec<ResolvedLayer>, ResolveError> {
    let mut resolved = Vec::with_capacity(children.len());
    for child in children {
        if let Some(layer) = resolve_rec(refs, child, ctx, visiting)? {
            resolved.push(layer);
        }
    }
    Ok(resolved)
}

/// The prop context a substituted layout sees: for every prop the target
/// component declares, a forwarded non-empty context value wins, then the
/// instance's literal, then the declared default.
fn instance_context(
    component: &Component,
    props: &OrderedMap<String, String>,
    bindings: &Bindings,
    outer: &PropContext,
) -> PropContext {
    let mut ctx = PropContext::empty();
    for prop in &component.props {
        let forwarded = bindings
            .get(&prop.name)
            .and_then(|b| outer.get(&b.prop_name))
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let value = forwarded
            .or_else(|| props.get(&prop.name).cloned())
            .or_else(|| prop.default_value.clone())
            .unwrap_or_default();
        ctx.values.insert(prop.name.clone(), value);
    }
    ctx
}

/// Resolves a bindable string prop against the context, falling back to the
/// literal when unbound or when the context value is empty.
fn bound_value(ctx: &PropContext, bindings: &Bindings, prop: &str, literal: &str) -> String {
    bindings
        .get(&prop.to_string())
        .and_then(|b| ctx.get(&b.prop_name))
        .filter(|v| !v.is_empty())
        .map_or_else(|| literal.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;
    use crate::model::component::ComponentProp;
    use crate::model::layer::{Binding, ComponentLayer, ContainerLayer, TextLayer};
    use crate::ordmap::OrderedMap;

    fn text_layer(text: &str) -> TextLayer {
        TextLayer {
            id: Id::generate(),
            name: "Text".to_string(),
            style: LayerStyle::default(),
            media_queries: Vec::new(),
            bindings: OrderedMap::new(),
            text: text.to_string(),
        }
    }

    /// A "card" component with a `title` prop whose text layer binds to it.
    fn card_component() -> Component {
        let mut text = text_layer("Untitled");
        text.bindings = text.bindings.set(
            "text".to_string(),
            Binding {
                prop_name: "title".to_string(),
            },
        );
        Component {
            name: "card".to_string(),
            props: vec![ComponentProp {
                name: "title".to_string(),
                default_value: Some("Default title".to_string()),
            }],
            examples: Vec::new(),
            layout: Some(Layer::Text(text)),
        }
    }

    fn instance_of(component_id: Id, props: &[(&str, &str)]) -> ComponentLayer {
        ComponentLayer {
            id: Id::generate(),
            name: "Card".to_string(),
            style: LayerStyle::default(),
            media_queries: Vec::new(),
            bindings: OrderedMap::new(),
            component_id,
            props: props
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn resolved_text(layer: &ResolvedLayer) -> &str {
        match &layer.content {
            ResolvedContent::Text { text } => text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_responsive_fold_merges_ascending() {
        let refs = factory::default_project();
        let tablet = *refs.breakpoints.first_key().unwrap();
        let desktop = *refs.breakpoints.key_at(1).unwrap();

        let mut layer = text_layer("hi");
        layer.style.width = Some(Length::Px(100.0));
        // Declared wider-first to prove order comes from the breakpoint
        layer.media_queries = vec![
            MediaQuery {
                id: Id::generate(),
                min_width: StyleRef::new(desktop),
                style: LayerStyle {
                    width: Some(Length::Px(300.0)),
                    ..LayerStyle::default()
                },
            },
            MediaQuery {
                id: Id::generate(),
                min_width: StyleRef::new(tablet),
                style: LayerStyle {
                    width: Some(Length::Px(200.0)),
                    height: Some(Length::Px(50.0)),
                    ..LayerStyle::default()
                },
            },
        ];
        let layer = Layer::Text(layer);

        let narrow = resolve_responsive_style(&layer, 500, &refs).unwrap();
        assert_eq!(narrow.width, Some(Length::Px(100.0)));
        assert_eq!(narrow.height, None);

        let tablet_style = resolve_responsive_style(&layer, 800, &refs).unwrap();
        assert_eq!(tablet_style.width, Some(Length::Px(200.0)));

        // Desktop wins on width, tablet's height survives
        let wide = resolve_responsive_style(&layer, 1200, &refs).unwrap();
        assert_eq!(wide.width, Some(Length::Px(300.0)));
        assert_eq!(wide.height, Some(Length::Px(50.0)));
    }

    #[test]
    fn test_responsive_fold_rejects_dangling_breakpoint() {
        let refs = factory::default_project();
        let missing = Id::from_u128(404);
        let mut layer = text_layer("hi");
        layer.media_queries = vec![MediaQuery {
            id: Id::generate(),
            min_width: StyleRef::new(missing),
            style: LayerStyle::default(),
        }];
        let err = resolve_responsive_style(&Layer::Text(layer), 100, &refs).unwrap_err();
        assert_eq!(
            err,
            ResolveError::DanglingRef {
                kind: RefKind::Breakpoint,
                id: missing,
            }
        );
    }

    #[test]
    fn test_resolve_style_looks_up_refs() {
        let refs = factory::default_project();
        let color_id = *refs.colors.first_key().unwrap();
        let font_id = *refs.font_families.first_key().unwrap();

        let style = LayerStyle {
            color: Some(StyleRef::new(color_id)),
            font_family: Some(StyleRef::new(font_id)),
            width: Some(Length::Percent(50.0)),
            ..LayerStyle::default()
        };
        let resolved = resolve_style(&style, &refs).unwrap();
        assert_eq!(
            resolved.color.as_deref(),
            Some(refs.colors.get(&color_id).unwrap().value.as_str())
        );
        assert_eq!(resolved.width, Some(Length::Percent(50.0)));
    }

    #[test]
    fn test_resolve_style_rejects_dangling_color() {
        let refs = Refs::empty();
        let missing = Id::from_u128(9);
        let style = LayerStyle {
            color: Some(StyleRef::new(missing)),
            ..LayerStyle::default()
        };
        let err = resolve_style(&style, &refs).unwrap_err();
        assert_eq!(
            err,
            ResolveError::DanglingRef {
                kind: RefKind::Color,
                id: missing,
            }
        );
    }

    #[test]
    fn test_substitution_uses_instance_props() {
        let card_id = Id::from_u128(1);
        let refs = Refs::empty().with_component(card_id, card_component());

        let instance = instance_of(card_id, &[("title", "Hello")]);
        let resolved = resolve_layer(&refs, &Layer::Component(instance), &PropContext::empty())
            .unwrap()
            .unwrap();
        assert_eq!(resolved_text(&resolved), "Hello");
    }

    #[test]
    fn test_empty_instance_value_falls_back_to_literal() {
        let card_id = Id::from_u128(1);
        let refs = Refs::empty().with_component(card_id, card_component());

        let instance = instance_of(card_id, &[("title", "")]);
        let resolved = resolve_layer(&refs, &Layer::Component(instance), &PropContext::empty())
            .unwrap()
            .unwrap();
        // Empty prop value: the bound text layer keeps its literal
        assert_eq!(resolved_text(&resolved), "Untitled");
    }

    #[test]
    fn test_missing_prop_falls_back_to_default() {
        let card_id = Id::from_u128(1);
        let refs = Refs::empty().with_component(card_id, card_component());

        let instance = instance_of(card_id, &[]);
        let resolved = resolve_layer(&refs, &Layer::Component(instance), &PropContext::empty())
            .unwrap()
            .unwrap();
        assert_eq!(resolved_text(&resolved), "Default title");
    }

    #[test]
    fn test_forwarding_binding_threads_outer_context() {
        let card_id = Id::from_u128(1);
        // A "page" with a `heading` prop that forwards it into the card's `title`
        let mut instance = instance_of(card_id, &[("title", "literal")]);
        instance.bindings = instance.bindings.set(
            "title".to_string(),
            Binding {
                prop_name: "heading".to_string(),
            },
        );
        let page = Component {
            name: "page".to_string(),
            props: vec![ComponentProp {
                name: "heading".to_string(),
                default_value: Some("From the page".to_string()),
            }],
            examples: Vec::new(),
            layout: Some(Layer::Component(instance)),
        };
        let page_id = Id::from_u128(2);
        let refs = Refs::empty()
            .with_component(card_id, card_component())
            .with_component(page_id, page.clone());

        let resolved = resolve_layer(
            &refs,
            page.layout.as_ref().unwrap(),
            &PropContext::for_component(&page),
        )
        .unwrap()
        .unwrap();
        assert_eq!(resolved_text(&resolved), "From the page");
    }

    #[test]
    fn test_component_without_layout_resolves_to_none() {
        let empty_id = Id::from_u128(1);
        let refs = Refs::empty().with_component(empty_id, factory::new_component("empty"));

        let instance = instance_of(empty_id, &[]);
        let resolved =
            resolve_layer(&refs, &Layer::Component(instance), &PropContext::empty()).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn test_cycle_is_detected() {
        let a_id = Id::from_u128(1);
        let b_id = Id::from_u128(2);
        let a = Component {
            layout: Some(Layer::Component(instance_of(b_id, &[]))),
            ..factory::new_component("a")
        };
        let b = Component {
            layout: Some(Layer::Component(instance_of(a_id, &[]))),
            ..factory::new_component("b")
        };
        let refs = Refs::empty()
            .with_component(a_id, a.clone())
            .with_component(b_id, b);

        let err = resolve_layer(&refs, a.layout.as_ref().unwrap(), &PropContext::empty())
            .unwrap_err();
        assert_eq!(err, ResolveError::ComponentCycle { id: b_id });
    }

    #[test]
    fn test_sibling_instances_are_not_a_cycle() {
        let card_id = Id::from_u128(1);
        let refs = Refs::empty().with_component(card_id, card_component());

        let root = ContainerLayer {
            id: Id::generate(),
            name: "Container".to_string(),
            style: LayerStyle::default(),
            media_queries: Vec::new(),
            bindings: OrderedMap::new(),
            children: vec![
                Layer::Component(instance_of(card_id, &[("title", "one")])),
                Layer::Component(instance_of(card_id, &[("title", "two")])),
            ],
        };
        let resolved = resolve_layer(&refs, &Layer::Container(root), &PropContext::empty())
            .unwrap()
            .unwrap();
        let ResolvedContent::Container { children } = &resolved.content else {
            panic!("expected container content");
        };
        assert_eq!(children.len(), 2);
        assert_eq!(resolved_text(&children[0]), "one");
        assert_eq!(resolved_text(&children[1]), "two");
    }

    #[test]
    fn test_instance_style_wins_over_substituted_root() {
        let card_id = Id::from_u128(1);
        let mut card = card_component();
        if let Some(layout) = card.layout.as_mut() {
            layout.style_mut().width = Some(Length::Px(100.0));
            layout.style_mut().height = Some(Length::Px(40.0));
        }
        let refs = Refs::empty().with_component(card_id, card);

        let mut instance = instance_of(card_id, &[]);
        instance.style.width = Some(Length::Px(250.0));
        let instance_id = instance.id;
        let resolved = resolve_layer(&refs, &Layer::Component(instance), &PropContext::empty())
            .unwrap()
            .unwrap();
        assert_eq!(resolved.id, instance_id);
        assert_eq!(resolved.style.width, Some(Length::Px(250.0)));
        assert_eq!(resolved.style.height, Some(Length::Px(40.0)));
    }

    #[test]
    fn test_for_example_overlays_defaults() {
        let mut card = card_component();
        let example_id = Id::from_u128(5);
        card.examples.push(crate::model::component::ComponentExample {
            id: example_id,
            name: "greeting".to_string(),
            props: [("title".to_string(), "Hi there".to_string())]
                .into_iter()
                .collect(),
        });

        let ctx = PropContext::for_example(&card, example_id);
        assert_eq!(ctx.get("title"), Some("Hi there"));

        // Unknown example id: defaults only
        let ctx = PropContext::for_example(&card, Id::from_u128(99));
        assert_eq!(ctx.get("title"), Some("Default title"));
    }
}
