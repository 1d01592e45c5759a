//! uidoc: the document model and pure reducer behind a visual UI designer.
//!
//! The crate owns everything about a design document except rendering and
//! persistence: the immutable snapshot type ([`Refs`]), the action
//! vocabulary and reducer that advance it, and the resolution pass that
//! turns weak style references and component instances into concrete
//! render trees.
//!
//! # Overview
//!
//! The model is built around three ideas:
//! - **Snapshots, not mutation**: every edit produces a new [`Refs`] value;
//!   unchanged collections are shared structurally, so snapshots are cheap
//!   to keep for undo or diffing.
//! - **A closed action vocabulary**: [`Action`] is a tagged enum and
//!   [`apply_action`] dispatches exhaustively, so a new action kind without
//!   a handler is a compile error.
//! - **Weak references everywhere**: styles point at colors, fonts, and
//!   breakpoints by id; component layers point at components by id.
//!   Deletion never cascades into referencing sites; lookups fail at
//!   resolution time instead.
//!
//! # Quick Start
//!
//! ```rust
//! use uidoc::action::{apply_action, Action};
//! use uidoc::factory;
//!
//! // A starter document with one component and seed refs
//! let refs = factory::default_project();
//!
//! // Apply an edit: rename the first component
//! let id = *refs.components.first_key().unwrap();
//! let next = apply_action(
//!     &Action::RenameComponent {
//!         component_id: id,
//!         name: "hero".to_string(),
//!     },
//!     &refs,
//! )
//! .unwrap();
//!
//! assert_eq!(next.components.get(&id).unwrap().name, "hero");
//! assert!(!next.is_saved);
//! // The original snapshot is untouched
//! assert_ne!(refs, next);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Refs, Component, Layer, styles, refs)
//! - [`action`]: The action vocabulary and pure reducer
//! - [`resolve`]: Reference resolution and responsive style computation
//! - [`tree`]: Immutable layer-tree algorithms
//! - [`factory`]: Constructors for fresh entities and the starter document
//! - [`select`]: UI-state derivation helpers
//! - [`validate`]: Advisory whole-document validation
//! - [`ordmap`]: The persistent insertion-ordered map under every collection
//! - [`error`]: Error types

pub mod action;
pub mod error;
pub mod factory;
pub mod model;
pub mod ordmap;
pub mod resolve;
pub mod select;
pub mod tree;
pub mod validate;

// Re-export commonly used types at crate root
pub use action::{apply_action, Action, ShortcutKey};
pub use error::{ActionError, ResolveError, ValidationError};
pub use model::{
    Artboard, Binding, Bindings, Breakpoint, ColorDef, Component, ComponentExample,
    ComponentProp, ComponentView, EditorMode, FontFamilyDef, FontSizeDef, Id, Layer, LayerKind,
    LayerStyle, Length, MediaQuery, RefKind, RefValue, Refs, StyleRef, UiState,
};
pub use resolve::{
    resolve_layer, resolve_responsive_style, resolve_style, PropContext, ResolvedContent,
    ResolvedLayer, ResolvedStyle,
};
pub use validate::validate_refs;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
