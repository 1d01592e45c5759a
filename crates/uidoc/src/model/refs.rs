//! The document root (`Refs`) and the UI state it carries.

use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::model::component::Component;
use crate::model::id::Id;
use crate::model::layer::Layer;
use crate::model::length::Length;
use crate::ordmap::OrderedMap;

/// A named color definition (CSS color string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDef {
    pub name: String,
    pub value: String,
}

/// A named font-family definition (CSS font-family string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFamilyDef {
    pub name: String,
    pub value: String,
}

/// A named font-size definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSizeDef {
    pub name: String,
    pub value: Length,
}

/// A named responsive breakpoint (`min-width` in pixels).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    pub name: String,
    pub min_width_px: u32,
}

/// A named preview artboard size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artboard {
    pub name: String,
    pub width_px: u32,
    pub height_px: u32,
}

/// Which top-level collection a generic ref action addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefKind {
    Color,
    FontFamily,
    FontSize,
    Breakpoint,
}

/// Payload for the generic `UpdateRef` action; the variant must match the
/// action's [`RefKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RefValue {
    Color(ColorDef),
    FontFamily(FontFamilyDef),
    FontSize(FontSizeDef),
    Breakpoint(Breakpoint),
}

/// The layer-editor sub-mode inside a component view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorMode {
    Html,
    Css,
}

/// The state of an active component view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentView {
    pub component_id: Id,
    pub is_editing: bool,
    pub layer_id: Option<Id>,
    pub hovered_layer_id: Option<Id>,
    pub media_query_id: Option<Id>,
    pub editor_mode: EditorMode,
}

impl ComponentView {
    /// A fresh view of `component_id` with nothing selected.
    pub fn new(component_id: Id, is_editing: bool) -> Self {
        Self {
            component_id,
            is_editing,
            layer_id: None,
            hovered_layer_id: None,
            media_query_id: None,
            editor_mode: EditorMode::Html,
        }
    }
}

/// Which part of the document the UI is showing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum UiState {
    Typography,
    Home,
    Colors,
    Breakpoints,
    Component(ComponentView),
}

impl UiState {
    /// The active component view, if any.
    pub fn component_view(&self) -> Option<&ComponentView> {
        match self {
            UiState::Component(view) => Some(view),
            UiState::Typography | UiState::Home | UiState::Colors | UiState::Breakpoints => None,
        }
    }
}

/// The document root: a fully-formed, self-consistent snapshot.
///
/// Never mutated in place. Every reducer transition produces a new `Refs`
/// value; unchanged collections share their entries structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refs {
    pub components: OrderedMap<Id, Component>,
    pub colors: OrderedMap<Id, ColorDef>,
    pub font_families: OrderedMap<Id, FontFamilyDef>,
    pub font_sizes: OrderedMap<Id, FontSizeDef>,
    pub breakpoints: OrderedMap<Id, Breakpoint>,
    pub artboards: OrderedMap<Id, Artboard>,
    pub ui_state: UiState,
    pub file_name: Option<String>,
    pub is_saved: bool,
}

impl Refs {
    /// An empty document showing the home view.
    pub fn empty() -> Self {
        Self {
            components: OrderedMap::new(),
            colors: OrderedMap::new(),
            font_families: OrderedMap::new(),
            font_sizes: OrderedMap::new(),
            breakpoints: OrderedMap::new(),
            artboards: OrderedMap::new(),
            ui_state: UiState::Home,
            file_name: None,
            is_saved: true,
        }
    }

    /// Looks up a component, failing fast when absent.
    pub fn component(&self, id: Id) -> Result<&Component, ActionError> {
        self.components
            .get(&id)
            .ok_or(ActionError::ComponentNotFound { id })
    }

    /// Looks up a breakpoint, failing fast when absent.
    pub fn breakpoint(&self, id: Id) -> Result<&Breakpoint, ActionError> {
        self.breakpoints
            .get(&id)
            .ok_or(ActionError::BreakpointNotFound { id })
    }

    /// Finds a layer in a component's tree, failing fast when absent.
    pub fn layer(&self, component_id: Id, layer_id: Id) -> Result<&Layer, ActionError> {
        let not_found = ActionError::LayerNotFound { id: layer_id };
        let component = self.component(component_id)?;
        let layout = component.layout.as_ref().ok_or(not_found.clone())?;
        crate::tree::find_layer(layout, layer_id).ok_or(not_found)
    }

    /// The active component view, if the UI is showing one.
    pub fn component_view(&self) -> Option<&ComponentView> {
        self.ui_state.component_view()
    }

    /// Returns a snapshot with `component_id` rebound.
    pub fn with_component(&self, component_id: Id, component: Component) -> Self {
        let mut next = self.clone();
        next.components = self.components.set(component_id, component);
        next
    }

    /// Returns a snapshot with a new UI state.
    pub fn with_ui_state(&self, ui_state: UiState) -> Self {
        let mut next = self.clone();
        next.ui_state = ui_state;
        next
    }

    /// Marks the snapshot as diverged from its persisted form.
    ///
    /// Document-mutating handlers call this; pure selection changes do not.
    pub fn mark_unsaved(mut self) -> Self {
        self.is_saved = false;
        self
    }
}
