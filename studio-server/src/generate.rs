//! Thumbnail generation behind an asynchronous seam.
//!
//! The [`ThumbnailGenerator`] trait is the contract the API depends on:
//! eventually resolve with a set of style variants, or fail. The built-in
//! [`StylePresetGenerator`] composes complete documents from the six style
//! presets; a model-backed implementation can replace it behind the same
//! trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use studio_core::{
    Canvas, Element, ElementStyle, Metadata, TextAlign, ThumbnailDocument,
};

/// Number of variants one generation request produces.
const VARIANTS_PER_REQUEST: usize = 3;

/// Errors from a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The generator could not produce variants.
    #[error("Generation failed: {0}")]
    Failed(String),
}

/// A generation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Video title or description to build the headline from.
    #[serde(default)]
    pub title: Option<String>,
    /// Requested style preset; unknown or absent falls back to "minimal".
    #[serde(default)]
    pub style: Option<String>,
    /// Source video URL, kept as provenance on the variants.
    #[serde(default)]
    pub video_url: Option<String>,
}

/// One generated variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedVariant {
    /// Variant identifier.
    pub id: String,
    /// The style preset used.
    pub style: String,
    /// A complete, editable document.
    pub document: ThumbnailDocument,
}

/// Asynchronous thumbnail generation seam.
#[async_trait]
pub trait ThumbnailGenerator: Send + Sync {
    /// Produce style variants for the request.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if no variants could be produced.
    async fn generate(&self, request: GenerateRequest)
        -> Result<Vec<GeneratedVariant>, GenerateError>;
}

/// One style preset: palette and typography defaults.
#[derive(Debug, Clone, Copy)]
struct StylePreset {
    id: &'static str,
    background: &'static str,
    text_color: &'static str,
    accent: &'static str,
    font_family: &'static str,
}

/// The six presets offered by the creation flow.
const PRESETS: [StylePreset; 6] = [
    StylePreset {
        id: "minimal",
        background: "#f5f5f5",
        text_color: "#1a1a1a",
        accent: "#6366f1",
        font_family: "Inter",
    },
    StylePreset {
        id: "bold",
        background: "#1a1a1a",
        text_color: "#ffffff",
        accent: "#ff0000",
        font_family: "Impact",
    },
    StylePreset {
        id: "professional",
        background: "#f9fafb",
        text_color: "#374151",
        accent: "#3b82f6",
        font_family: "Helvetica",
    },
    StylePreset {
        id: "gaming",
        background: "#7c3aed",
        text_color: "#ffffff",
        accent: "#06b6d4",
        font_family: "Impact",
    },
    StylePreset {
        id: "educational",
        background: "#f9fafb",
        text_color: "#1a1a1a",
        accent: "#059669",
        font_family: "Georgia",
    },
    StylePreset {
        id: "lifestyle",
        background: "#fef3c7",
        text_color: "#374151",
        accent: "#f59e0b",
        font_family: "Verdana",
    },
];

fn preset_for(style: Option<&str>) -> StylePreset {
    style
        .and_then(|s| PRESETS.iter().find(|p| p.id == s))
        .copied()
        .unwrap_or(PRESETS[0])
}

/// Deterministic generator composing documents from style presets.
#[derive(Debug, Clone, Copy, Default)]
pub struct StylePresetGenerator;

impl StylePresetGenerator {
    fn variant(preset: StylePreset, headline: &str, layout: usize) -> ThumbnailDocument {
        let canvas = Canvas {
            background_color: preset.background.to_string(),
            ..Canvas::default()
        };
        let mut document = ThumbnailDocument {
            canvas,
            elements: Vec::new(),
            metadata: Metadata {
                title: headline.to_string(),
                style: preset.id.to_string(),
                ai_generated: Some(true),
                source_video_id: None,
            },
        };

        let headline_style = ElementStyle {
            font_size: Some(72.0),
            font_family: Some(preset.font_family.to_string()),
            font_weight: Some("bold".to_string()),
            color: Some(preset.text_color.to_string()),
            text_align: Some(TextAlign::Center),
            ..ElementStyle::default()
        };

        // Layouts: centered headline, top-left headline, banner over accent
        let headline_element = match layout {
            1 => Element::text(document.next_z_index())
                .with_position(60.0, 60.0)
                .with_size(800.0, 120.0)
                .with_style(ElementStyle {
                    text_align: Some(TextAlign::Left),
                    ..headline_style
                }),
            2 => {
                let banner = Element::new(studio_core::ElementKind::Shape {
                    shape: studio_core::ShapeKind::Rectangle,
                })
                .with_position(0.0, 500.0)
                .with_size(1280.0, 160.0)
                .with_z_index(document.next_z_index())
                .with_style(ElementStyle {
                    color: Some(preset.accent.to_string()),
                    ..ElementStyle::default()
                });
                document = document.add_element(banner);
                Element::text(document.next_z_index())
                    .with_position(140.0, 520.0)
                    .with_size(1000.0, 120.0)
                    .with_style(headline_style)
            }
            _ => Element::text(document.next_z_index())
                .with_position(140.0, 280.0)
                .with_size(1000.0, 160.0)
                .with_style(headline_style),
        };

        let mut element = headline_element;
        element.kind = studio_core::ElementKind::Text {
            content: headline.to_string(),
        };
        document.add_element(element)
    }
}

#[async_trait]
impl ThumbnailGenerator for StylePresetGenerator {
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<Vec<GeneratedVariant>, GenerateError> {
        let preset = preset_for(request.style.as_deref());
        let headline = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("Generated Thumbnail");

        tracing::info!(
            "Generating {VARIANTS_PER_REQUEST} '{}' variants for \"{headline}\"",
            preset.id
        );

        let variants = (0..VARIANTS_PER_REQUEST)
            .map(|layout| GeneratedVariant {
                id: Uuid::new_v4().to_string(),
                style: preset.id.to_string(),
                document: Self::variant(preset, headline, layout),
            })
            .collect();
        Ok(variants)
    }
}
