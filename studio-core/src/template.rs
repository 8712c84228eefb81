//! Reusable thumbnail templates.
//!
//! A template is a thumbnail document plus a map of named fill-in
//! variables, supplied by an external catalog and read-only from the
//! editor's perspective.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ElementId, ThumbnailDocument};

/// The kind of value a template variable accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    /// A text payload, e.g. the headline.
    Text,
    /// An image reference.
    Image,
    /// A CSS color string.
    Color,
}

/// One named fill-in slot of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateVariable {
    /// The kind of value this variable accepts.
    #[serde(rename = "type")]
    pub kind: VariableKind,
    /// Default value used when the caller supplies nothing.
    pub default_value: serde_json::Value,
    /// Human-readable label shown by pickers.
    pub label: String,
}

/// A reusable thumbnail document with named variables and catalog metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category tag, e.g. "gaming" or "minimal".
    pub category: String,
    /// Preview image reference.
    pub preview_url: String,
    /// Whether the template is premium-gated.
    pub is_premium: bool,
    /// Times this template has been used.
    pub downloads: u64,
    /// Average user rating.
    pub rating: f32,
    /// The underlying document.
    pub data: ThumbnailDocument,
    /// Named fill-in variables.
    #[serde(default)]
    pub variables: BTreeMap<String, TemplateVariable>,
}

impl Template {
    /// Create a fresh document from this template.
    ///
    /// Elements receive newly generated IDs: instantiation creates new
    /// elements, never shares them between documents.
    #[must_use]
    pub fn instantiate(&self) -> ThumbnailDocument {
        let mut document = self.data.clone();
        for element in &mut document.elements {
            element.id = ElementId::new();
        }
        document
    }

    /// Catalog-listing view of this template, without the document body.
    #[must_use]
    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            preview_url: self.preview_url.clone(),
            is_premium: self.is_premium,
            downloads: self.downloads,
            rating: self.rating,
        }
    }
}

/// Catalog-listing metadata for a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category tag.
    pub category: String,
    /// Preview image reference.
    pub preview_url: String,
    /// Whether the template is premium-gated.
    pub is_premium: bool,
    /// Times this template has been used.
    pub downloads: u64,
    /// Average user rating.
    pub rating: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Element;

    fn sample_template() -> Template {
        let data = ThumbnailDocument::new()
            .add_element(Element::text(1))
            .add_element(Element::sticker("🔥", 2));
        Template {
            id: "bold-gaming".to_string(),
            name: "Bold Gaming Thumbnail".to_string(),
            category: "gaming".to_string(),
            preview_url: "/previews/bold-gaming.svg".to_string(),
            is_premium: false,
            downloads: 1250,
            rating: 4.8,
            data,
            variables: BTreeMap::from([(
                "title".to_string(),
                TemplateVariable {
                    kind: VariableKind::Text,
                    default_value: serde_json::json!("Your Text Here"),
                    label: "Headline".to_string(),
                },
            )]),
        }
    }

    #[test]
    fn test_instantiate_generates_fresh_ids() {
        let template = sample_template();
        let doc = template.instantiate();

        assert_eq!(doc.element_count(), template.data.element_count());
        for (instantiated, original) in doc.elements.iter().zip(&template.data.elements) {
            assert_ne!(instantiated.id, original.id);
            assert_eq!(instantiated.kind, original.kind);
            assert_eq!(instantiated.z_index, original.z_index);
        }
    }

    #[test]
    fn test_instantiations_are_independent() {
        let template = sample_template();
        let a = template.instantiate();
        let b = template.instantiate();
        assert_ne!(a.elements[0].id, b.elements[0].id);
    }

    #[test]
    fn test_summary_drops_document_body() {
        let template = sample_template();
        let summary = template.summary();
        assert_eq!(summary.id, "bold-gaming");
        assert_eq!(summary.category, "gaming");
        assert_eq!(summary.downloads, 1250);

        let json = serde_json::to_value(&summary).expect("serialize");
        assert!(json.get("data").is_none());
        assert!(json.get("variables").is_none());
    }

    #[test]
    fn test_variable_wire_shape() {
        let template = sample_template();
        let json = serde_json::to_value(&template).expect("serialize");
        assert_eq!(json["variables"]["title"]["type"], "text");
        assert_eq!(json["variables"]["title"]["label"], "Headline");
    }
}
