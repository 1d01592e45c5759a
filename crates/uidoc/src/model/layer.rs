//! Layer types: the nodes of a component's render tree.
//!
//! A layer is one of five variants. `Container` and `Link` are the only two
//! container-capable variants; a `Component` layer is a by-id reference to
//! another component whose rendered content is produced by substitution
//! (see [`crate::resolve`]).
//!
//! The enum is closed on purpose: every consumption site matches
//! exhaustively, so adding a variant without handling it everywhere is a
//! compile error.

use serde::{Deserialize, Serialize};

use crate::model::id::Id;
use crate::model::length::Length;
use crate::ordmap::OrderedMap;

/// Discriminant for [`Layer`], used by factories and name generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerKind {
    Container,
    Text,
    Image,
    Link,
    Component,
}

impl LayerKind {
    /// Human-readable base name for freshly created layers of this kind.
    pub fn display_name(self) -> &'static str {
        match self {
            LayerKind::Container => "Container",
            LayerKind::Text => "Text",
            LayerKind::Image => "Image",
            LayerKind::Link => "Link",
            LayerKind::Component => "Component",
        }
    }
}

/// A weak, by-id reference into one of the document's top-level collections
/// (colors, font families, font sizes, breakpoints).
///
/// Resolution is a lookup that fails loudly when the id is absent; deleting
/// the target does not scan for usages, so a `StyleRef` may dangle until
/// resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRef {
    pub id: Id,
}

impl StyleRef {
    pub fn new(id: Id) -> Self {
        Self { id }
    }
}

/// CSS `display` keyword subset carried by layer styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Flex,
    Block,
    InlineBlock,
    None,
}

/// CSS `flex-direction` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    /// True for `column` / `column-reverse`.
    pub fn is_vertical(self) -> bool {
        matches!(self, FlexDirection::Column | FlexDirection::ColumnReverse)
    }

    /// True for the `-reverse` variants.
    pub fn is_reversed(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

/// CSS `justify-content` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
}

/// CSS `align-items` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
    Baseline,
}

/// A layer's styling, every field optional.
///
/// Unset fields inherit whatever the rendering layer decides; the model only
/// records what the user set. Color and font fields are weak references into
/// the document's top-level collections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayerStyle {
    pub display: Option<Display>,
    pub flex_direction: Option<FlexDirection>,
    pub justify_content: Option<JustifyContent>,
    pub align_items: Option<AlignItems>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub padding: Option<Length>,
    pub margin: Option<Length>,
    pub gap: Option<Length>,
    pub color: Option<StyleRef>,
    pub background_color: Option<StyleRef>,
    pub font_family: Option<StyleRef>,
    pub font_size: Option<StyleRef>,
    pub font_weight: Option<String>,
    pub text_align: Option<String>,
}

impl LayerStyle {
    /// Returns a style where fields set in `patch` win over `self`.
    ///
    /// This is the single merge primitive behind both style editing and the
    /// responsive media-query fold.
    pub fn merge(&self, patch: &LayerStyle) -> LayerStyle {
        LayerStyle {
            display: patch.display.or(self.display),
            flex_direction: patch.flex_direction.or(self.flex_direction),
            justify_content: patch.justify_content.or(self.justify_content),
            align_items: patch.align_items.or(self.align_items),
            width: patch.width.or(self.width),
            height: patch.height.or(self.height),
            padding: patch.padding.or(self.padding),
            margin: patch.margin.or(self.margin),
            gap: patch.gap.or(self.gap),
            color: patch.color.or(self.color),
            background_color: patch.background_color.or(self.background_color),
            font_family: patch.font_family.or(self.font_family),
            font_size: patch.font_size.or(self.font_size),
            font_weight: patch.font_weight.clone().or_else(|| self.font_weight.clone()),
            text_align: patch.text_align.clone().or_else(|| self.text_align.clone()),
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == LayerStyle::default()
    }
}

/// A conditional style override applied when the render viewport width is at
/// least the referenced breakpoint's pixel value.
///
/// Multiple media queries on one layer may apply simultaneously; they are
/// merged by ascending breakpoint width (larger wins on conflicts).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaQuery {
    pub id: Id,
    pub min_width: StyleRef,
    pub style: LayerStyle,
}

/// Declares that a layer-local prop is overridden by the named prop of the
/// owning component at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub prop_name: String,
}

/// Prop-name → binding table carried by every layer.
pub type Bindings = OrderedMap<String, Binding>;

/// One visual node in a component's render tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Layer {
    Container(ContainerLayer),
    Text(TextLayer),
    Image(ImageLayer),
    Link(LinkLayer),
    Component(ComponentLayer),
}

/// A plain box holding an ordered list of child layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerLayer {
    pub id: Id,
    pub name: String,
    pub style: LayerStyle,
    pub media_queries: Vec<MediaQuery>,
    pub bindings: Bindings,
    pub children: Vec<Layer>,
}

/// A text node. Its `text` prop is bindable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    pub id: Id,
    pub name: String,
    pub style: LayerStyle,
    pub media_queries: Vec<MediaQuery>,
    pub bindings: Bindings,
    pub text: String,
}

/// An image node. `src` and `alt` are bindable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLayer {
    pub id: Id,
    pub name: String,
    pub style: LayerStyle,
    pub media_queries: Vec<MediaQuery>,
    pub bindings: Bindings,
    pub src: String,
    pub alt: String,
}

/// An anchor node: container-capable, with a bindable `href`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkLayer {
    pub id: Id,
    pub name: String,
    pub style: LayerStyle,
    pub media_queries: Vec<MediaQuery>,
    pub bindings: Bindings,
    pub href: String,
    pub children: Vec<Layer>,
}

/// An embedded instance of another component.
///
/// `props` holds literal values and `bindings` forwarding entries, both
/// keyed by the *referenced* component's prop names. Rendered content is
/// produced by substituting the referenced component's layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentLayer {
    pub id: Id,
    pub name: String,
    pub style: LayerStyle,
    pub media_queries: Vec<MediaQuery>,
    pub bindings: Bindings,
    pub component_id: Id,
    #[serde(with = "crate::ordmap::as_object")]
    pub props: OrderedMap<String, String>,
}

impl Layer {
    /// The layer's id, unique within the owning component's tree.
    pub fn id(&self) -> Id {
        match self {
            Layer::Container(l) => l.id,
            Layer::Text(l) => l.id,
            Layer::Image(l) => l.id,
            Layer::Link(l) => l.id,
            Layer::Component(l) => l.id,
        }
    }

    /// The layer's user-facing name.
    pub fn name(&self) -> &str {
        match self {
            Layer::Container(l) => &l.name,
            Layer::Text(l) => &l.name,
            Layer::Image(l) => &l.name,
            Layer::Link(l) => &l.name,
            Layer::Component(l) => &l.name,
        }
    }

    /// Sets the layer's name.
    pub fn set_name(&mut self, name: String) {
        match self {
            Layer::Container(l) => l.name = name,
            Layer::Text(l) => l.name = name,
            Layer::Image(l) => l.name = name,
            Layer::Link(l) => l.name = name,
            Layer::Component(l) => l.name = name,
        }
    }

    /// The variant discriminant.
    pub fn kind(&self) -> LayerKind {
        match self {
            Layer::Container(_) => LayerKind::Container,
            Layer::Text(_) => LayerKind::Text,
            Layer::Image(_) => LayerKind::Image,
            Layer::Link(_) => LayerKind::Link,
            Layer::Component(_) => LayerKind::Component,
        }
    }

    /// The layer's base style.
    pub fn style(&self) -> &LayerStyle {
        match self {
            Layer::Container(l) => &l.style,
            Layer::Text(l) => &l.style,
            Layer::Image(l) => &l.style,
            Layer::Link(l) => &l.style,
            Layer::Component(l) => &l.style,
        }
    }

    /// Mutable access to the base style.
    pub fn style_mut(&mut self) -> &mut LayerStyle {
        match self {
            Layer::Container(l) => &mut l.style,
            Layer::Text(l) => &mut l.style,
            Layer::Image(l) => &mut l.style,
            Layer::Link(l) => &mut l.style,
            Layer::Component(l) => &mut l.style,
        }
    }

    /// The layer's responsive overrides.
    pub fn media_queries(&self) -> &[MediaQuery] {
        match self {
            Layer::Container(l) => &l.media_queries,
            Layer::Text(l) => &l.media_queries,
            Layer::Image(l) => &l.media_queries,
            Layer::Link(l) => &l.media_queries,
            Layer::Component(l) => &l.media_queries,
        }
    }

    /// Mutable access to the responsive overrides.
    pub fn media_queries_mut(&mut self) -> &mut Vec<MediaQuery> {
        match self {
            Layer::Container(l) => &mut l.media_queries,
            Layer::Text(l) => &mut l.media_queries,
            Layer::Image(l) => &mut l.media_queries,
            Layer::Link(l) => &mut l.media_queries,
            Layer::Component(l) => &mut l.media_queries,
        }
    }

    /// The layer's prop bindings.
    pub fn bindings(&self) -> &Bindings {
        match self {
            Layer::Container(l) => &l.bindings,
            Layer::Text(l) => &l.bindings,
            Layer::Image(l) => &l.bindings,
            Layer::Link(l) => &l.bindings,
            Layer::Component(l) => &l.bindings,
        }
    }

    /// Mutable access to the prop bindings.
    pub fn bindings_mut(&mut self) -> &mut Bindings {
        match self {
            Layer::Container(l) => &mut l.bindings,
            Layer::Text(l) => &mut l.bindings,
            Layer::Image(l) => &mut l.bindings,
            Layer::Link(l) => &mut l.bindings,
            Layer::Component(l) => &mut l.bindings,
        }
    }

    /// Children, for the container-capable variants only.
    pub fn children(&self) -> Option<&Vec<Layer>> {
        match self {
            Layer::Container(l) => Some(&l.children),
            Layer::Link(l) => Some(&l.children),
            Layer::Text(_) | Layer::Image(_) | Layer::Component(_) => None,
        }
    }

    /// Mutable children, for the container-capable variants only.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Layer>> {
        match self {
            Layer::Container(l) => Some(&mut l.children),
            Layer::Link(l) => Some(&mut l.children),
            Layer::Text(_) | Layer::Image(_) | Layer::Component(_) => None,
        }
    }

    /// The effective `display` value used by flex-aware logic.
    ///
    /// A container with no explicit `display` defaults to flex; every other
    /// variant only counts as flex when set explicitly.
    pub fn effective_display(&self) -> Option<Display> {
        match self {
            Layer::Container(l) => Some(l.style.display.unwrap_or(Display::Flex)),
            Layer::Text(l) => l.style.display,
            Layer::Image(l) => l.style.display,
            Layer::Link(l) => l.style.display,
            Layer::Component(l) => l.style.display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;

    #[test]
    fn test_merge_patch_wins() {
        let base = LayerStyle {
            display: Some(Display::Flex),
            color: Some(StyleRef::new(Id::from_u128(1))),
            font_weight: Some("400".to_string()),
            ..LayerStyle::default()
        };
        let patch = LayerStyle {
            color: Some(StyleRef::new(Id::from_u128(2))),
            ..LayerStyle::default()
        };
        let merged = base.merge(&patch);
        assert_eq!(merged.color, Some(StyleRef::new(Id::from_u128(2))));
        assert_eq!(merged.display, Some(Display::Flex));
        assert_eq!(merged.font_weight.as_deref(), Some("400"));
    }

    #[test]
    fn test_merge_empty_patch_is_identity() {
        let base = LayerStyle {
            width: Some(Length::Px(100.0)),
            ..LayerStyle::default()
        };
        assert_eq!(base.merge(&LayerStyle::default()), base);
    }

    #[test]
    fn test_effective_display_defaults() {
        let container = factory::new_layer(&factory::NewLayer::Container);
        assert_eq!(container.effective_display(), Some(Display::Flex));

        // Links do not default to flex
        let link = factory::new_layer(&factory::NewLayer::Link);
        assert_eq!(link.effective_display(), None);
    }

    #[test]
    fn test_children_only_for_container_capable() {
        use factory::{new_layer, NewLayer};
        assert!(new_layer(&NewLayer::Container).children().is_some());
        assert!(new_layer(&NewLayer::Link).children().is_some());
        assert!(new_layer(&NewLayer::Text).children().is_none());
        assert!(new_layer(&NewLayer::Image).children().is_none());
    }

    #[test]
    fn test_layer_serde_tagged() {
        let layer = factory::new_layer(&factory::NewLayer::Text);
        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["type"], "text");
        let back: Layer = serde_json::from_value(json).unwrap();
        assert_eq!(back, layer);
    }
}
