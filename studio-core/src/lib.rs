//! # Thumb Studio Core
//!
//! Core thumbnail document model: canvas elements, value-semantics edit
//! operations, the single-user editor session, templates, media wire
//! types, and the persistence store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               studio-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Element Model   │  Editor Session          │
//! │  - Kinds/styles  │  - Selection             │
//! │  - Patches       │  - Undo/redo history     │
//! ├─────────────────────────────────────────────┤
//! │  Document        │  Collaborator seams      │
//! │  - Edit ops      │  - Export snapshots      │
//! │  - Paint order   │  - Store / templates     │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod element;
pub mod error;
pub mod media;
pub mod session;
pub mod store;
pub mod template;

pub use document::{Canvas, Metadata, ThumbnailDocument};
pub use element::{
    Element, ElementId, ElementKind, ElementPatch, ElementStyle, ShapeKind, TextAlign,
};
pub use error::{StudioError, StudioResult};
pub use media::{ThumbnailFormat, ThumbnailQuality, VideoFormat, VideoInfo};
pub use session::{EditorSession, ExportRequest};
pub use store::{StoreError, ThumbnailRecord, ThumbnailStore};
pub use template::{Template, TemplateSummary, TemplateVariable, VariableKind};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
