//! Built-in template catalog.
//!
//! A read-only set of templates served to the browsing UI. Each entry
//! carries a real parameterized document; preview images are SVG data URIs
//! rendered from that document at construction time.

use std::collections::BTreeMap;

use base64::Engine;

use studio_core::{
    Element, ElementStyle, Template, TemplateSummary, TemplateVariable, TextAlign,
    ThumbnailDocument, VariableKind,
};
use studio_export::ThumbnailExporter;

/// The read-only template catalog.
#[derive(Debug)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Build the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = [
            (
                "bold-gaming",
                "Bold Gaming Thumbnail",
                "gaming",
                false,
                1250,
                4.8,
                "#7c3aed",
                "#ffffff",
                "EPIC WIN",
            ),
            (
                "professional-business",
                "Professional Business",
                "professional",
                true,
                890,
                4.9,
                "#f9fafb",
                "#374151",
                "Quarterly Results",
            ),
            (
                "minimal-clean",
                "Minimal Clean Design",
                "minimal",
                false,
                2100,
                4.7,
                "#f5f5f5",
                "#1a1a1a",
                "Less Is More",
            ),
            (
                "educational-tutorial",
                "Educational Tutorial",
                "educational",
                false,
                675,
                4.6,
                "#ecfdf5",
                "#059669",
                "How It Works",
            ),
            (
                "lifestyle-vlog",
                "Lifestyle Vlog Style",
                "lifestyle",
                true,
                430,
                4.8,
                "#fef3c7",
                "#92400e",
                "A Day With Me",
            ),
            (
                "tech-review",
                "Tech Review Template",
                "professional",
                false,
                980,
                4.5,
                "#1a1a1a",
                "#06b6d4",
                "Worth It?",
            ),
        ];

        let templates = entries
            .into_iter()
            .map(
                |(id, name, category, is_premium, downloads, rating, background, color, headline)| {
                    build_template(
                        id, name, category, is_premium, downloads, rating, background, color,
                        headline,
                    )
                },
            )
            .collect();
        Self { templates }
    }

    /// Listing view, optionally filtered by category.
    #[must_use]
    pub fn list(&self, category: Option<&str>) -> Vec<TemplateSummary> {
        self.templates
            .iter()
            .filter(|t| category.is_none_or(|c| t.category == c))
            .map(Template::summary)
            .collect()
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Number of templates in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn build_template(
    id: &str,
    name: &str,
    category: &str,
    is_premium: bool,
    downloads: u64,
    rating: f32,
    background: &str,
    color: &str,
    headline: &str,
) -> Template {
    let mut data = ThumbnailDocument::new();
    data.canvas.background_color = background.to_string();
    data.metadata.title = name.to_string();
    data.metadata.style = category.to_string();

    let mut headline_element = Element::text(data.next_z_index())
        .with_position(140.0, 260.0)
        .with_size(1000.0, 200.0)
        .with_style(ElementStyle {
            font_size: Some(96.0),
            font_family: Some("Inter".to_string()),
            font_weight: Some("bold".to_string()),
            color: Some(color.to_string()),
            text_align: Some(TextAlign::Center),
            ..ElementStyle::default()
        });
    headline_element.kind = studio_core::ElementKind::Text {
        content: headline.to_string(),
    };
    let data = data.add_element(headline_element);

    let variables = BTreeMap::from([
        (
            "title".to_string(),
            TemplateVariable {
                kind: VariableKind::Text,
                default_value: serde_json::json!(headline),
                label: "Headline".to_string(),
            },
        ),
        (
            "background".to_string(),
            TemplateVariable {
                kind: VariableKind::Color,
                default_value: serde_json::json!(background),
                label: "Background color".to_string(),
            },
        ),
    ]);

    Template {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        preview_url: preview_data_uri(&data),
        is_premium,
        downloads,
        rating,
        data,
        variables,
    }
}

/// Render a template document to an SVG data URI for catalog previews.
fn preview_data_uri(document: &ThumbnailDocument) -> String {
    let svg = ThumbnailExporter::with_defaults().render_to_svg(document);
    let encoded = base64::engine::general_purpose::STANDARD.encode(svg);
    format!("data:image/svg+xml;base64,{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_six_templates() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(catalog.len(), 6);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_list_all_and_by_category() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(catalog.list(None).len(), 6);

        let professional = catalog.list(Some("professional"));
        assert_eq!(professional.len(), 2);
        assert!(professional.iter().all(|t| t.category == "professional"));

        assert!(catalog.list(Some("no-such-category")).is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = TemplateCatalog::builtin();
        let template = catalog.get("minimal-clean").expect("template exists");
        assert_eq!(template.name, "Minimal Clean Design");
        assert!(!template.is_premium);
        assert_eq!(template.downloads, 2100);
        assert!(catalog.get("nonexistent").is_none());
    }

    #[test]
    fn test_templates_carry_documents_and_variables() {
        let catalog = TemplateCatalog::builtin();
        for summary in catalog.list(None) {
            let template = catalog.get(&summary.id).expect("exists");
            assert!(!template.data.is_empty(), "{} has elements", template.id);
            assert!(
                template.variables.contains_key("title"),
                "{} has a title variable",
                template.id
            );
            assert!(template.preview_url.starts_with("data:image/svg+xml;base64,"));
        }
    }

    #[test]
    fn test_instantiation_from_catalog() {
        let catalog = TemplateCatalog::builtin();
        let template = catalog.get("bold-gaming").expect("exists");
        let doc = template.instantiate();
        assert_eq!(doc.canvas.background_color, "#7c3aed");
        assert!(doc.elements.iter().any(|e| e.content() == Some("EPIC WIN")));
    }
}
