//! Canvas elements - the building blocks of a thumbnail document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of content an element carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// A text label.
    Text {
        /// Text content.
        content: String,
    },

    /// An emoji/glyph sticker.
    Sticker {
        /// Sticker glyph, e.g. "🔥".
        content: String,
    },

    /// A placed image.
    Image {
        /// Image source URI.
        src: String,
    },

    /// A geometric shape.
    Shape {
        /// Which shape primitive to draw.
        shape: ShapeKind,
    },
}

/// Shape primitives available on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rectangle,
    /// Circle inscribed in the element box.
    Circle,
    /// Upward-pointing triangle.
    Triangle,
    /// Rightward-pointing arrow.
    Arrow,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the left edge of the element box.
    Left,
    /// Center within the element box.
    Center,
    /// Align to the right edge of the element box.
    Right,
}

/// Optional per-element styling.
///
/// Interpretation depends on the element kind; renderers ignore fields that
/// do not apply. The whole record is replaced on update, never merged field
/// by field (see [`ElementPatch`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Font family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font weight, e.g. "bold" or "400".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// Foreground color as a CSS color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Background fill behind the element box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Corner radius of the background box in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    /// CSS-style border shorthand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    /// Horizontal text alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// CSS-style text shadow shorthand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<String>,
    /// CSS-style filter shorthand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Default placement of a new text element.
const TEXT_DEFAULT_BOX: (f32, f32, f32, f32) = (100.0, 100.0, 300.0, 80.0);
/// Default placement of a new sticker element.
const STICKER_DEFAULT_BOX: (f32, f32, f32, f32) = (200.0, 200.0, 80.0, 80.0);
/// Content of a freshly added text element.
pub const DEFAULT_TEXT_CONTENT: &str = "Your Text Here";

fn default_opacity() -> f32 {
    1.0
}

/// One positioned, styled object placed on a thumbnail document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, generated at creation, immutable.
    pub id: ElementId,
    /// Element content.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// X position in canvas pixels from the left.
    pub x: f32,
    /// Y position in canvas pixels from the top.
    pub y: f32,
    /// Width in canvas pixels.
    pub width: f32,
    /// Height in canvas pixels.
    pub height: f32,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f32,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Paint order; ascending sort, ties broken by insertion order.
    pub z_index: i32,
    /// Optional styling record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

impl Element {
    /// Create a new element with the given kind at the origin.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            opacity: 1.0,
            z_index: 0,
            style: None,
        }
    }

    /// Create a text element with the default content, box, and style.
    #[must_use]
    pub fn text(z_index: i32) -> Self {
        let (x, y, width, height) = TEXT_DEFAULT_BOX;
        Self {
            id: ElementId::new(),
            kind: ElementKind::Text {
                content: DEFAULT_TEXT_CONTENT.to_string(),
            },
            x,
            y,
            width,
            height,
            rotation: 0.0,
            opacity: 1.0,
            z_index,
            style: Some(ElementStyle {
                font_size: Some(48.0),
                font_family: Some("Inter".to_string()),
                font_weight: Some("bold".to_string()),
                color: Some("#000000".to_string()),
                text_align: Some(TextAlign::Center),
                ..ElementStyle::default()
            }),
        }
    }

    /// Create a sticker element with the default box and no style.
    #[must_use]
    pub fn sticker(symbol: impl Into<String>, z_index: i32) -> Self {
        let (x, y, width, height) = STICKER_DEFAULT_BOX;
        Self {
            id: ElementId::new(),
            kind: ElementKind::Sticker {
                content: symbol.into(),
            },
            x,
            y,
            width,
            height,
            rotation: 0.0,
            opacity: 1.0,
            z_index,
            style: None,
        }
    }

    /// Set the position.
    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the style record.
    #[must_use]
    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Text payload, present for text and sticker elements.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { content } | ElementKind::Sticker { content } => Some(content),
            ElementKind::Image { .. } | ElementKind::Shape { .. } => None,
        }
    }

    /// Resource reference, present for image elements.
    #[must_use]
    pub fn src(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Image { src } => Some(src),
            _ => None,
        }
    }

    /// Return a copy of this element with the patch applied.
    ///
    /// Geometric and paint fields are merged field by field. `content`
    /// applies only to text/sticker kinds and `src` only to image kinds;
    /// a `style` in the patch replaces the whole style record.
    #[must_use]
    pub fn patched(&self, patch: &ElementPatch) -> Self {
        let mut next = self.clone();
        if let Some(x) = patch.x {
            next.x = x;
        }
        if let Some(y) = patch.y {
            next.y = y;
        }
        if let Some(width) = patch.width {
            next.width = width;
        }
        if let Some(height) = patch.height {
            next.height = height;
        }
        if let Some(rotation) = patch.rotation {
            next.rotation = rotation;
        }
        if let Some(opacity) = patch.opacity {
            next.opacity = opacity;
        }
        if let Some(z_index) = patch.z_index {
            next.z_index = z_index;
        }
        if let Some(content) = &patch.content {
            match &mut next.kind {
                ElementKind::Text { content: c } | ElementKind::Sticker { content: c } => {
                    c.clone_from(content);
                }
                ElementKind::Image { .. } | ElementKind::Shape { .. } => {}
            }
        }
        if let Some(src) = &patch.src {
            if let ElementKind::Image { src: s } = &mut next.kind {
                s.clone_from(src);
            }
        }
        if let Some(style) = &patch.style {
            next.style = Some(style.clone());
        }
        next
    }
}

/// A partial set of element attributes for update operations.
///
/// Absent fields leave the element untouched. A present `style` replaces
/// the element's entire style record; callers wanting a field-level style
/// change merge the current style into the patch themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    /// New X position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// New Y position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// New width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// New height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// New rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    /// New opacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// New z-index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// New text payload (text/sticker kinds only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New resource reference (image kinds only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Replacement style record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

impl ElementPatch {
    /// A patch that only changes the text payload.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// A patch that only moves the element.
    #[must_use]
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    /// A patch that only replaces the style record.
    #[must_use]
    pub fn style(style: ElementStyle) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_defaults() {
        let element = Element::text(1);
        assert_eq!(element.content(), Some(DEFAULT_TEXT_CONTENT));
        assert!((element.x - 100.0).abs() < f32::EPSILON);
        assert!((element.y - 100.0).abs() < f32::EPSILON);
        assert!((element.width - 300.0).abs() < f32::EPSILON);
        assert!((element.height - 80.0).abs() < f32::EPSILON);
        assert_eq!(element.z_index, 1);

        let style = element.style.expect("text elements carry a style");
        assert_eq!(style.font_size, Some(48.0));
        assert_eq!(style.font_family.as_deref(), Some("Inter"));
        assert_eq!(style.font_weight.as_deref(), Some("bold"));
        assert_eq!(style.color.as_deref(), Some("#000000"));
        assert_eq!(style.text_align, Some(TextAlign::Center));
    }

    #[test]
    fn test_sticker_defaults() {
        let element = Element::sticker("🔥", 2);
        assert_eq!(element.content(), Some("🔥"));
        assert!((element.x - 200.0).abs() < f32::EPSILON);
        assert!((element.width - 80.0).abs() < f32::EPSILON);
        assert!((element.height - 80.0).abs() < f32::EPSILON);
        assert!(element.style.is_none());
        assert_eq!(element.z_index, 2);
    }

    #[test]
    fn test_patch_merges_geometry_only() {
        let element = Element::text(1);
        let patched = element.patched(&ElementPatch::position(10.0, 20.0));
        assert!((patched.x - 10.0).abs() < f32::EPSILON);
        assert!((patched.y - 20.0).abs() < f32::EPSILON);
        // Everything else untouched
        assert_eq!(patched.kind, element.kind);
        assert_eq!(patched.style, element.style);
        assert_eq!(patched.id, element.id);
    }

    #[test]
    fn test_patch_style_replaces_whole_record() {
        let element = Element::text(1);
        let patched = element.patched(&ElementPatch::style(ElementStyle {
            font_size: Some(72.0),
            ..ElementStyle::default()
        }));

        let style = patched.style.expect("style present");
        assert_eq!(style.font_size, Some(72.0));
        // Shallow replace: the old family/weight/color are gone
        assert!(style.font_family.is_none());
        assert!(style.color.is_none());
    }

    #[test]
    fn test_patch_content_ignored_for_image() {
        let element = Element::new(ElementKind::Image {
            src: "https://example.com/a.png".to_string(),
        });
        let patched = element.patched(&ElementPatch::content("ignored"));
        assert_eq!(patched.kind, element.kind);
    }

    #[test]
    fn test_element_id_roundtrip() {
        let id = ElementId::new();
        let parsed = ElementId::parse(&id.to_string()).expect("valid uuid");
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_serde_wire_shape() {
        let element = Element::text(1);
        let value = serde_json::to_value(&element).expect("serialize");
        // Kind is flattened: "type" and "content" sit at the top level
        assert_eq!(value["type"], "text");
        assert_eq!(value["content"], DEFAULT_TEXT_CONTENT);
        assert_eq!(value["z_index"], 1);

        let back: Element = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, element);
    }
}
