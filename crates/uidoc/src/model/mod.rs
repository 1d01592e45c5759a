//! Data model types for design documents.
//!
//! This module contains all the core types for representing a document:
//! - Identifiers
//! - Length values
//! - Layers (the render-tree nodes) and their styles
//! - Components (reusable layer trees with a prop interface)
//! - The document root (`Refs`) and UI state

pub mod component;
pub mod id;
pub mod layer;
pub mod length;
pub mod refs;

pub use component::{Component, ComponentExample, ComponentProp};
pub use id::Id;
pub use layer::{
    AlignItems, Binding, Bindings, ComponentLayer, ContainerLayer, Display, FlexDirection,
    ImageLayer, JustifyContent, Layer, LayerKind, LayerStyle, LinkLayer, MediaQuery, StyleRef,
    TextLayer,
};
pub use length::{Length, LengthParseError};
pub use refs::{
    Artboard, Breakpoint, ColorDef, ComponentView, EditorMode, FontFamilyDef, FontSizeDef,
    RefKind, RefValue, Refs, UiState,
};
