//! Document export to image formats.
//!
//! Renders a [`ThumbnailDocument`] to PNG, JPEG, or SVG using an SVG
//! intermediate representation and the resvg/tiny-skia rasterization
//! pipeline.

use std::fmt::Write;

use studio_core::{Element, ElementKind, ShapeKind, TextAlign, ThumbnailDocument};

use crate::error::{ExportError, ExportResult};

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector graphics (returns the SVG XML string as UTF-8 bytes).
    Svg,
}

impl ExportFormat {
    /// Parse a caller-supplied format string.
    ///
    /// Format validation belongs to this collaborator, not to its callers.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UnsupportedFormat`] for anything other than
    /// `png`, `jpeg`/`jpg`, or `svg`.
    pub fn parse(s: &str) -> ExportResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }

    /// MIME type of the produced bytes.
    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
        }
    }
}

/// Configuration for document export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Scale factor (e.g. 2.0 for retina output).
    pub scale: f32,
    /// JPEG quality 1-100.
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            jpeg_quality: 85,
        }
    }
}

/// Exports a [`ThumbnailDocument`] to image formats.
pub struct ThumbnailExporter {
    config: ExportConfig,
}

impl ThumbnailExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Export a document to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be rendered or encoded.
    pub fn export(&self, doc: &ThumbnailDocument, format: ExportFormat) -> ExportResult<Vec<u8>> {
        tracing::debug!(
            "Exporting {}x{} document with {} elements as {format:?}",
            doc.canvas.width,
            doc.canvas.height,
            doc.element_count()
        );
        match format {
            ExportFormat::Png => self.render_to_png(doc),
            ExportFormat::Jpeg => self.render_to_jpeg(doc),
            ExportFormat::Svg => Ok(self.render_to_svg(doc).into_bytes()),
        }
    }

    /// Export the document to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn render_to_png(&self, doc: &ThumbnailDocument) -> ExportResult<Vec<u8>> {
        let svg_string = self.render_to_svg(doc);
        let pixmap = rasterize_svg(&svg_string)?;

        pixmap
            .encode_png()
            .map_err(|e| ExportError::Encode(format!("PNG encoding failed: {e}")))
    }

    /// Export the document to JPEG bytes.
    ///
    /// The alpha channel is composited onto a white matte since JPEG has no
    /// transparency.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_to_jpeg(&self, doc: &ThumbnailDocument) -> ExportResult<Vec<u8>> {
        let svg_string = self.render_to_svg(doc);
        let pixmap = rasterize_svg(&svg_string)?;

        let (width, height) = (pixmap.width(), pixmap.height());
        let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in pixmap.data().chunks_exact(4) {
            let alpha = f32::from(pixel[3]) / 255.0;
            let inv = 1.0 - alpha;
            rgb_data.push((f32::from(pixel[0]).mul_add(alpha, 255.0 * inv)) as u8);
            rgb_data.push((f32::from(pixel[1]).mul_add(alpha, 255.0 * inv)) as u8);
            rgb_data.push((f32::from(pixel[2]).mul_add(alpha, 255.0 * inv)) as u8);
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.config.jpeg_quality);
        image::ImageEncoder::write_image(
            encoder,
            &rgb_data,
            width,
            height,
            image::ColorType::Rgb8.into(),
        )
        .map_err(|e| ExportError::Encode(format!("JPEG encoding failed: {e}")))?;

        Ok(buf.into_inner())
    }

    /// Render the document to an SVG string.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_to_svg(&self, doc: &ThumbnailDocument) -> String {
        let scale = self.config.scale;
        let view_w = doc.canvas.width.max(1);
        let view_h = doc.canvas.height.max(1);
        let out_w = ((view_w as f32) * scale).max(1.0) as u32;
        let out_h = ((view_h as f32) * scale).max(1.0) as u32;

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {view_w} {view_h}\">",
        );

        // Background fill, then optional background image
        let bg = escape_xml(&doc.canvas.background_color);
        let _ = write!(svg, "<rect width=\"100%\" height=\"100%\" fill=\"{bg}\"/>");
        if let Some(image) = &doc.canvas.background_image {
            let href = escape_xml(image);
            let _ = write!(
                svg,
                "<image x=\"0\" y=\"0\" width=\"{view_w}\" height=\"{view_h}\" href=\"{href}\" preserveAspectRatio=\"xMidYMid slice\"/>",
            );
        }

        for element in doc.paint_order() {
            render_element_svg(&mut svg, element);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Rasterize an SVG string to a tiny-skia Pixmap.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rasterize_svg(svg_string: &str) -> ExportResult<tiny_skia::Pixmap> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_string, &opt)
        .map_err(|e| ExportError::Svg(format!("SVG parsing failed: {e}")))?;

    let px_w = tree.size().width() as u32;
    let px_h = tree.size().height() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
        .ok_or_else(|| ExportError::Svg("Failed to create pixmap".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Render a single element to SVG, honoring opacity and rotation.
fn render_element_svg(svg: &mut String, element: &Element) {
    let mut open = String::new();
    if element.opacity < 1.0 {
        let _ = write!(open, " opacity=\"{}\"", element.opacity);
    }
    if element.rotation.abs() > f32::EPSILON {
        let cx = element.x + element.width / 2.0;
        let cy = element.y + element.height / 2.0;
        let _ = write!(open, " transform=\"rotate({} {cx} {cy})\"", element.rotation);
    }
    let _ = write!(svg, "<g{open}>");

    render_backing_rect(svg, element);

    match &element.kind {
        ElementKind::Text { content } => render_text_svg(svg, element, content, None),
        ElementKind::Sticker { content } => {
            // Stickers scale their glyph to the element box
            let glyph_size = element.width.min(element.height) * 0.8;
            render_text_svg(svg, element, content, Some(glyph_size));
        }
        ElementKind::Image { src } => {
            let href = escape_xml(src);
            let _ = write!(
                svg,
                "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" href=\"{href}\"/>",
                element.x, element.y, element.width, element.height,
            );
        }
        ElementKind::Shape { shape } => render_shape_svg(svg, element, *shape),
    }

    svg.push_str("</g>");
}

/// Render the background box drawn behind an element, if styled.
fn render_backing_rect(svg: &mut String, element: &Element) {
    let Some(style) = &element.style else {
        return;
    };
    let Some(fill) = &style.background_color else {
        return;
    };
    let fill = escape_xml(fill);
    let radius = style.border_radius.unwrap_or(0.0);
    let _ = write!(
        svg,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{radius}\" fill=\"{fill}\"/>",
        element.x, element.y, element.width, element.height,
    );
}

/// Render a text or sticker payload.
///
/// `size_override` wins over the style's font size; the baseline is
/// approximated so the line sits vertically centered in the element box.
fn render_text_svg(svg: &mut String, element: &Element, content: &str, size_override: Option<f32>) {
    let style = element.style.as_ref();
    let font_size = size_override
        .or(style.and_then(|s| s.font_size))
        .unwrap_or(48.0);
    let color = style
        .and_then(|s| s.color.as_deref())
        .unwrap_or("#000000");
    let family = style
        .and_then(|s| s.font_family.as_deref())
        .unwrap_or("sans-serif");
    let align = style
        .and_then(|s| s.text_align)
        .unwrap_or(TextAlign::Center);

    let (text_x, anchor) = match align {
        TextAlign::Left => (element.x, "start"),
        TextAlign::Center => (element.x + element.width / 2.0, "middle"),
        TextAlign::Right => (element.x + element.width, "end"),
    };
    let baseline = element.y + (element.height + font_size * 0.7) / 2.0;

    let mut attrs = String::new();
    if let Some(weight) = style.and_then(|s| s.font_weight.as_deref()) {
        let _ = write!(attrs, " font-weight=\"{}\"", escape_xml(weight));
    }

    let escaped = escape_xml(content);
    let escaped_color = escape_xml(color);
    let escaped_family = escape_xml(family);
    let _ = write!(
        svg,
        "<text x=\"{text_x}\" y=\"{baseline}\" font-size=\"{font_size}\" fill=\"{escaped_color}\" font-family=\"{escaped_family}\" text-anchor=\"{anchor}\"{attrs}>{escaped}</text>",
    );
}

/// Render a shape primitive filling the element box.
fn render_shape_svg(svg: &mut String, element: &Element, shape: ShapeKind) {
    let style = element.style.as_ref();
    let fill = style
        .and_then(|s| s.color.as_deref())
        .unwrap_or("#cccccc");
    let fill = escape_xml(fill);
    let (x, y, w, h) = (element.x, element.y, element.width, element.height);

    match shape {
        ShapeKind::Rectangle => {
            let radius = style.and_then(|s| s.border_radius).unwrap_or(0.0);
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" rx=\"{radius}\" fill=\"{fill}\"/>",
            );
        }
        ShapeKind::Circle => {
            let cx = x + w / 2.0;
            let cy = y + h / 2.0;
            let r = w.min(h) / 2.0;
            let _ = write!(svg, "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{fill}\"/>");
        }
        ShapeKind::Triangle => {
            let _ = write!(
                svg,
                "<polygon points=\"{},{} {},{} {},{}\" fill=\"{fill}\"/>",
                x + w / 2.0,
                y,
                x + w,
                y + h,
                x,
                y + h,
            );
        }
        ShapeKind::Arrow => {
            // Rightward arrow: shaft plus head, proportional to the box
            let shaft_top = y + h * 0.33;
            let shaft_bottom = y + h * 0.67;
            let head_x = x + w * 0.6;
            let mid_y = y + h / 2.0;
            let _ = write!(
                svg,
                "<polygon points=\"{x},{shaft_top} {head_x},{shaft_top} {head_x},{y} {},{mid_y} {head_x},{} {head_x},{shaft_bottom} {x},{shaft_bottom}\" fill=\"{fill}\"/>",
                x + w,
                y + h,
            );
        }
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_core::{Element, ElementPatch, ElementStyle};

    fn doc_with_text(content: &str) -> ThumbnailDocument {
        let doc = ThumbnailDocument::new();
        doc.add_element(Element::text(doc.next_z_index()).patched(&ElementPatch::content(content)))
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(ExportFormat::parse("png").expect("png"), ExportFormat::Png);
        assert_eq!(ExportFormat::parse("PNG").expect("png"), ExportFormat::Png);
        assert_eq!(ExportFormat::parse("jpg").expect("jpg"), ExportFormat::Jpeg);
        assert_eq!(
            ExportFormat::parse("jpeg").expect("jpeg"),
            ExportFormat::Jpeg
        );
        assert_eq!(ExportFormat::parse("svg").expect("svg"), ExportFormat::Svg);
        assert!(matches!(
            ExportFormat::parse("webm"),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(ExportFormat::Png.mime_type(), "image/png");
        assert_eq!(ExportFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ExportFormat::Svg.mime_type(), "image/svg+xml");
    }

    #[test]
    fn test_svg_export_empty_document() {
        let doc = ThumbnailDocument::new();
        let exporter = ThumbnailExporter::with_defaults();
        let svg = exporter.render_to_svg(&doc);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"1280\""));
        assert!(svg.contains("height=\"720\""));
        assert!(svg.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn test_svg_export_with_text() {
        let doc = doc_with_text("Hello World");
        let exporter = ThumbnailExporter::with_defaults();
        let svg = exporter.render_to_svg(&doc);
        assert!(svg.contains("Hello World"));
        assert!(svg.contains("font-size=\"48\""));
        assert!(svg.contains("font-family=\"Inter\""));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_svg_paint_order_follows_z_index() {
        let doc = ThumbnailDocument::new();
        let back = Element::text(2).patched(&ElementPatch::content("BACK"));
        let front = Element::sticker("🔥", 1);
        let doc = doc.add_element(back).add_element(front);

        let exporter = ThumbnailExporter::with_defaults();
        let svg = exporter.render_to_svg(&doc);
        let fire = svg.find("🔥").expect("sticker rendered");
        let text = svg.find("BACK").expect("text rendered");
        assert!(fire < text, "lower z-index paints first");
    }

    #[test]
    fn test_xml_escaping() {
        let doc = doc_with_text("A < B & C > D");
        let exporter = ThumbnailExporter::with_defaults();
        let svg = exporter.render_to_svg(&doc);
        assert!(svg.contains("A &lt; B &amp; C &gt; D"));
        assert!(!svg.contains("A < B"));
    }

    #[test]
    fn test_shape_markup() {
        use studio_core::ElementKind;

        let mut doc = ThumbnailDocument::new();
        for shape in [
            ShapeKind::Rectangle,
            ShapeKind::Circle,
            ShapeKind::Triangle,
            ShapeKind::Arrow,
        ] {
            doc = doc.add_element(
                Element::new(ElementKind::Shape { shape })
                    .with_position(10.0, 10.0)
                    .with_size(100.0, 50.0)
                    .with_z_index(doc.next_z_index()),
            );
        }

        let exporter = ThumbnailExporter::with_defaults();
        let svg = exporter.render_to_svg(&doc);
        assert!(svg.contains("<rect x=\"10\""));
        assert!(svg.contains("<circle"));
        assert_eq!(svg.matches("<polygon").count(), 2);
    }

    #[test]
    fn test_backing_rect_and_opacity() {
        let style = ElementStyle {
            background_color: Some("#ff0000".to_string()),
            border_radius: Some(8.0),
            ..ElementStyle::default()
        };
        let doc = ThumbnailDocument::new();
        let element = Element::text(1)
            .with_style(style)
            .with_opacity(0.5);
        let doc = doc.add_element(element);

        let exporter = ThumbnailExporter::with_defaults();
        let svg = exporter.render_to_svg(&doc);
        assert!(svg.contains("rx=\"8\""));
        assert!(svg.contains("fill=\"#ff0000\""));
        assert!(svg.contains("opacity=\"0.5\""));
    }

    #[test]
    fn test_scale_factor() {
        let doc = ThumbnailDocument::new();
        let exporter = ThumbnailExporter::new(ExportConfig {
            scale: 2.0,
            ..ExportConfig::default()
        });
        let svg = exporter.render_to_svg(&doc);
        assert!(svg.contains("width=\"2560\""));
        assert!(svg.contains("height=\"1440\""));
        assert!(svg.contains("viewBox=\"0 0 1280 720\""));
    }

    #[test]
    fn test_png_export_produces_valid_bytes() {
        let doc = doc_with_text("Test");
        let exporter = ThumbnailExporter::with_defaults();
        let png = exporter.render_to_png(&doc).expect("png export");

        // PNG magic bytes: \x89PNG
        assert!(png.len() > 8);
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_jpeg_export_produces_valid_bytes() {
        let doc = doc_with_text("Test");
        let exporter = ThumbnailExporter::with_defaults();
        let jpeg = exporter.render_to_jpeg(&doc).expect("jpeg export");

        // JPEG magic bytes: FFD8
        assert!(jpeg.len() > 2);
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[test]
    fn test_export_dispatch() {
        let doc = doc_with_text("Dispatch");
        let exporter = ThumbnailExporter::with_defaults();

        let png = exporter.export(&doc, ExportFormat::Png).expect("png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);

        let jpeg = exporter.export(&doc, ExportFormat::Jpeg).expect("jpeg");
        assert_eq!(jpeg[0], 0xFF);

        let svg = exporter.export(&doc, ExportFormat::Svg).expect("svg");
        let svg_str = String::from_utf8(svg).expect("utf8");
        assert!(svg_str.starts_with("<svg"));
    }
}
