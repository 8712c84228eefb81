//! The thumbnail document and its edit operations.
//!
//! A [`ThumbnailDocument`] is an immutable value: every edit operation
//! returns a new document and leaves the receiver untouched. Retaining the
//! prior values is what makes session undo/redo a plain stack of documents.

use serde::{Deserialize, Serialize};

use crate::error::{StudioError, StudioResult};
use crate::{Element, ElementId, ElementPatch};

/// Default canvas width in pixels (standard video thumbnail size).
pub const DEFAULT_CANVAS_WIDTH: u32 = 1280;
/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 720;

/// Canvas dimensions and background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Background fill as a CSS color string.
    pub background_color: String,
    /// Optional background image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            background_color: "#ffffff".to_string(),
            background_image: None,
        }
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Human-readable title.
    pub title: String,
    /// Style tag, e.g. "minimal" or "gaming".
    pub style: String,
    /// Whether this document came out of the generation pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_generated: Option<bool>,
    /// The video this thumbnail was created for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_video_id: Option<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: "Untitled Thumbnail".to_string(),
            style: "minimal".to_string(),
            ai_generated: None,
            source_video_id: None,
        }
    }
}

/// The full editable state of one thumbnail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailDocument {
    /// Canvas dimensions and background.
    pub canvas: Canvas,
    /// Elements in insertion order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Document metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl ThumbnailDocument {
    /// Create an empty 1280x720 document with a white background.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an element by ID.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Whether the document contains an element with this ID.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Number of elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The z-index a newly created element receives: element count + 1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn next_z_index(&self) -> i32 {
        self.elements.len() as i32 + 1
    }

    /// Return a new document with the element appended.
    ///
    /// # Panics
    ///
    /// Panics if an element with the same ID already exists; duplicate IDs
    /// are a programming error, not a recoverable condition.
    #[must_use]
    pub fn add_element(&self, element: Element) -> Self {
        assert!(
            !self.contains(element.id),
            "duplicate element id: {}",
            element.id
        );
        let mut next = self.clone();
        next.elements.push(element);
        next
    }

    /// Return a new document with the patch applied to the matching element.
    ///
    /// Returns the document unchanged if no element has this ID.
    #[must_use]
    pub fn update_element(&self, id: ElementId, patch: &ElementPatch) -> Self {
        let mut next = self.clone();
        if let Some(element) = next.elements.iter_mut().find(|e| e.id == id) {
            *element = element.patched(patch);
        }
        next
    }

    /// Return a new document with the matching element removed.
    ///
    /// Returns the document unchanged if no element has this ID.
    #[must_use]
    pub fn delete_element(&self, id: ElementId) -> Self {
        let mut next = self.clone();
        next.elements.retain(|e| e.id != id);
        next
    }

    /// Return a new document with the element painted above all others.
    ///
    /// Returns the document unchanged if no element has this ID.
    #[must_use]
    pub fn bring_to_front(&self, id: ElementId) -> Self {
        let Some(top) = self.elements.iter().map(|e| e.z_index).max() else {
            return self.clone();
        };
        self.update_element(
            id,
            &ElementPatch {
                z_index: Some(top + 1),
                ..ElementPatch::default()
            },
        )
    }

    /// Return a new document with the element painted below all others.
    ///
    /// Returns the document unchanged if no element has this ID.
    #[must_use]
    pub fn send_to_back(&self, id: ElementId) -> Self {
        let Some(bottom) = self.elements.iter().map(|e| e.z_index).min() else {
            return self.clone();
        };
        self.update_element(
            id,
            &ElementPatch {
                z_index: Some(bottom - 1),
                ..ElementPatch::default()
            },
        )
    }

    /// Elements in paint order: ascending z-index, ties by insertion order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> StudioResult<String> {
        serde_json::to_string(self).map_err(StudioError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> StudioResult<Self> {
        serde_json::from_str(json).map_err(StudioError::Serialization)
    }
}
