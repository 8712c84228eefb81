//! # Thumb Studio Export
//!
//! The export collaborator: turns a thumbnail document value into PNG,
//! JPEG, or SVG bytes. Rendering goes through an SVG intermediate
//! representation rasterized with resvg/tiny-skia, so the output matches
//! what the editor composes without a GPU in the loop.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;

pub use error::{ExportError, ExportResult};
pub use export::{ExportConfig, ExportFormat, ThumbnailExporter};
