//! Layout rendering
//!
//! Places template elements on the design-pixel canvas. Percentage
//! coordinates anchor the *center* of each box; the box is shifted back
//! by half its own size, so dragging keeps the cursor under the same
//! relative point of the box.

use crate::resolver::{Resolved, Resolver};
use cert_model::{BorderStyle, CertificateData, Element, TextAlign, Template};

/// Line height multiplier for text boxes
pub const TEXT_LINE_HEIGHT: f64 = 1.3;

/// Divider line thickness in design pixels
pub const LINE_THICKNESS: f64 = 2.0;

/// Preview text renders at 90% of the literal font size to visually
/// compensate for the lack of supersampling on screen. Deliberate:
/// export uses the literal size, so unifying the two would change
/// exported output pixel-for-pixel.
pub const PREVIEW_TEXT_SCALE: f64 = 0.9;

/// Corner decoration inset from the canvas edge, design pixels
pub const CORNER_INSET: f64 = 16.0;
/// Corner decoration arm length, design pixels
pub const CORNER_SIZE: f64 = 48.0;
/// Corner decoration stroke width, design pixels
pub const CORNER_STROKE: f64 = 2.0;

/// Default font size when a text element does not set one
const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Rendering context: which affordances and text compensation apply.
/// Never changes element positions or visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Editor canvas: selection overlay allowed, literal text size
    Edit,
    /// Read-only on-screen preview: text at [`PREVIEW_TEXT_SCALE`]
    Preview,
    /// Export: literal text size, rasterized with supersampling
    Export,
}

/// Axis-aligned box in design pixels, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Border line kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Double,
}

/// Concrete border rendering rule for a template style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderTreatment {
    /// Total border width in design pixels
    pub width: f64,
    pub kind: LineKind,
}

/// Fixed border table keyed by template style
pub fn border_treatment(style: BorderStyle) -> Option<BorderTreatment> {
    match style {
        BorderStyle::None => None,
        BorderStyle::Classic => Some(BorderTreatment {
            width: 12.0,
            kind: LineKind::Double,
        }),
        BorderStyle::Modern => Some(BorderTreatment {
            width: 4.0,
            kind: LineKind::Solid,
        }),
        BorderStyle::Minimal => Some(BorderTreatment {
            width: 1.0,
            kind: LineKind::Solid,
        }),
        BorderStyle::Ornate => Some(BorderTreatment {
            width: 16.0,
            kind: LineKind::Double,
        }),
    }
}

/// L-shaped corner decorations are drawn for classic and ornate only
pub fn has_corner_decorations(style: BorderStyle) -> bool {
    matches!(style, BorderStyle::Classic | BorderStyle::Ornate)
}

/// Resolved font family stack for a text element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontStack {
    /// First family in the stack, used by the rasterizer's font catalog
    pub primary: String,
    /// Full CSS-style stack string
    pub css: String,
}

/// Family mapping: `monospace` passes through, Playfair gets a serif
/// display stack, everything else the default sans stack
pub fn font_stack(family: Option<&str>) -> FontStack {
    match family {
        Some("monospace") => FontStack {
            primary: "monospace".to_string(),
            css: "monospace".to_string(),
        },
        Some("Playfair Display") => FontStack {
            primary: "Playfair Display".to_string(),
            css: "'Playfair Display', serif".to_string(),
        },
        _ => FontStack {
            primary: "Inter".to_string(),
            css: "'Inter', sans-serif".to_string(),
        },
    }
}

/// Concrete text styling for a placed text box
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Mode-compensated size in design pixels
    pub font_size: f64,
    pub font: FontStack,
    /// Numeric weight (400/600/700)
    pub weight: u16,
    pub italic: bool,
    pub align: TextAlign,
    pub color: String,
    /// Fixed at [`TEXT_LINE_HEIGHT`]
    pub line_height: f64,
}

/// Visual payload of a placed box
#[derive(Debug, Clone, PartialEq)]
pub enum BoxContent {
    Text { value: String, style: TextStyle },
    /// `framed` photos carry a 3px accent border; logos do not
    Image { url: String, framed: bool },
    QrCode { payload: String },
    Seal,
    Line { color: String },
}

/// One absolutely positioned box in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBox {
    pub id: String,
    pub rect: Rect,
    pub content: BoxContent,
    /// Edit-mode selection ring; overlay affordance only
    pub selected: bool,
}

/// The rendered visual tree for one canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    pub background_image: Option<String>,
    pub accent_color: String,
    pub border: Option<BorderTreatment>,
    pub corner_decorations: bool,
    /// Paint order follows the template element order
    pub boxes: Vec<PlacedBox>,
    pub mode: RenderMode,
}

/// Maps template elements into placed boxes via the resolver
pub struct LayoutRenderer<'a> {
    resolver: &'a Resolver,
    mode: RenderMode,
    selected: Option<&'a str>,
}

impl<'a> LayoutRenderer<'a> {
    pub fn new(resolver: &'a Resolver, mode: RenderMode) -> Self {
        Self {
            resolver,
            mode,
            selected: None,
        }
    }

    /// Mark one element as selected (edit-mode ring)
    pub fn with_selected(mut self, id: Option<&'a str>) -> Self {
        self.selected = id;
        self
    }

    /// Render a template against certificate data
    ///
    /// Template-level seal/QR defaults apply when the certificate does
    /// not carry its own flag.
    pub fn render(&self, template: &Template, data: &CertificateData) -> Scene {
        let mut effective = data.clone();
        effective.show_seal = Some(data.show_seal.unwrap_or(template.show_seal));
        effective.show_qr_code = Some(data.show_qr_code.unwrap_or(template.show_qr_code));

        let mut boxes = Vec::with_capacity(template.elements.len());
        for element in &template.elements {
            if !element.visible() {
                continue;
            }
            let Some(resolved) = self.resolver.resolve(element, &effective) else {
                continue;
            };
            boxes.push(self.place(element, resolved, template));
        }

        Scene {
            width: template.width,
            height: template.height,
            background_color: template.background_color.clone(),
            background_image: template.background_image.clone(),
            accent_color: template.accent_color.clone(),
            border: border_treatment(template.border_style),
            corner_decorations: has_corner_decorations(template.border_style),
            boxes,
            mode: self.mode,
        }
    }

    fn place(&self, element: &Element, resolved: Resolved, template: &Template) -> PlacedBox {
        let (cx_pct, cy_pct) = element.position();
        let width = element.width() / 100.0 * template.width;
        let height = self.box_height(element, template);

        // Center-anchored placement
        let rect = Rect {
            x: cx_pct / 100.0 * template.width - width / 2.0,
            y: cy_pct / 100.0 * template.height - height / 2.0,
            width,
            height,
        };

        let content = match (element, resolved) {
            (Element::Text(e), Resolved::Text(value)) => BoxContent::Text {
                value,
                style: TextStyle {
                    font_size: self.effective_font_size(e.font_size),
                    font: font_stack(e.font_family.as_deref()),
                    weight: e.font_weight.numeric(),
                    italic: e.font_style == cert_model::FontStyle::Italic,
                    align: e.text_align,
                    color: e.color.clone().unwrap_or_else(|| "#000000".to_string()),
                    line_height: TEXT_LINE_HEIGHT,
                },
            },
            (Element::Image(_), Resolved::Image(url)) => BoxContent::Image { url, framed: true },
            (Element::Logo(_), Resolved::Image(url)) => BoxContent::Image { url, framed: false },
            (_, Resolved::QrCode(payload)) => BoxContent::QrCode { payload },
            (_, Resolved::Seal) => BoxContent::Seal,
            (element, Resolved::Line) => BoxContent::Line {
                color: match element {
                    Element::Line(e) => e
                        .color
                        .clone()
                        .unwrap_or_else(|| template.accent_color.clone()),
                    _ => template.accent_color.clone(),
                },
            },
            // Resolver kind and element kind always agree; keep the
            // fallback total rather than panicking on a bad pairing
            (_, Resolved::Text(value)) => BoxContent::Text {
                value,
                style: TextStyle {
                    font_size: self.effective_font_size(None),
                    font: font_stack(None),
                    weight: 400,
                    italic: false,
                    align: TextAlign::Center,
                    color: "#000000".to_string(),
                    line_height: TEXT_LINE_HEIGHT,
                },
            },
            (_, Resolved::Image(url)) => BoxContent::Image { url, framed: false },
        };

        PlacedBox {
            id: element.id().to_string(),
            rect,
            content,
            selected: self.mode == RenderMode::Edit && self.selected == Some(element.id()),
        }
    }

    /// Box height in design pixels: explicit percentage where the kind
    /// carries one, line thickness for dividers, single-line intrinsic
    /// height for text
    fn box_height(&self, element: &Element, template: &Template) -> f64 {
        match element {
            Element::Line(_) => LINE_THICKNESS,
            Element::Text(e) => self.effective_font_size(e.font_size) * TEXT_LINE_HEIGHT,
            _ => element.height().unwrap_or(0.0) / 100.0 * template.height,
        }
    }

    fn effective_font_size(&self, font_size: Option<f64>) -> f64 {
        let base = font_size.unwrap_or(DEFAULT_FONT_SIZE);
        match self.mode {
            RenderMode::Preview => base * PREVIEW_TEXT_SCALE,
            RenderMode::Edit | RenderMode::Export => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cert_model::{system_templates, CertificateData};
    use pretty_assertions::assert_eq;

    fn resolver() -> Resolver {
        Resolver::new("https://example.org")
    }

    fn image_template() -> Template {
        let mut template = system_templates().remove(0);
        template.elements = vec![serde_json::from_str(
            r#"{ "type": "image", "id": "photo", "x": 50, "y": 50,
                 "width": 20, "height": 10, "placeholder": "traineePhoto" }"#,
        )
        .unwrap()];
        template
    }

    #[test]
    fn center_anchored_placement() {
        // x=50,y=50,w=20,h=10 on 800x566 -> top-left (320, 254.7)
        let template = image_template();
        let data = CertificateData {
            trainee_photo: Some("https://cdn.example.org/p.jpg".into()),
            ..CertificateData::default()
        };

        let resolver = resolver();
        let scene = LayoutRenderer::new(&resolver, RenderMode::Export).render(&template, &data);

        assert_eq!(scene.boxes.len(), 1);
        let rect = scene.boxes[0].rect;
        assert!((rect.x - 320.0).abs() < 1e-9);
        assert!((rect.y - 254.7).abs() < 1e-9);
        assert!((rect.width - 160.0).abs() < 1e-9);
        assert!((rect.height - 56.6).abs() < 1e-9);
    }

    #[test]
    fn suppressed_elements_contribute_no_boxes() {
        let template = system_templates().remove(0);
        let data = CertificateData {
            show_qr_code: Some(false),
            show_seal: Some(false),
            ..CertificateData::default()
        };

        let resolver = resolver();
        let scene = LayoutRenderer::new(&resolver, RenderMode::Preview).render(&template, &data);
        assert!(scene.boxes.iter().all(|b| b.id != "qrcode"));
        assert!(scene.boxes.iter().all(|b| b.id != "seal"));

        let shown = LayoutRenderer::new(&resolver, RenderMode::Preview)
            .render(&template, &CertificateData::default());
        assert!(shown.boxes.iter().any(|b| b.id == "qrcode"));
        assert!(shown.boxes.iter().any(|b| b.id == "seal"));
    }

    #[test]
    fn template_seal_default_applies_when_certificate_is_silent() {
        // minimal-elegant ships with show_seal = false
        let minimal = system_templates().remove(2);
        let resolver = resolver();

        let scene = LayoutRenderer::new(&resolver, RenderMode::Preview)
            .render(&minimal, &CertificateData::default());
        assert!(scene.boxes.iter().all(|b| b.id != "seal"));

        // An explicit certificate flag overrides the template default
        let override_on = CertificateData {
            show_seal: Some(true),
            ..CertificateData::default()
        };
        let scene = LayoutRenderer::new(&resolver, RenderMode::Preview)
            .render(&minimal, &override_on);
        assert!(scene.boxes.iter().any(|b| b.id == "seal"));
    }

    #[test]
    fn invisible_elements_are_skipped() {
        let mut template = image_template();
        if let Element::Image(e) = &mut template.elements[0] {
            e.visible = false;
        }
        let data = CertificateData {
            trainee_photo: Some("https://cdn.example.org/p.jpg".into()),
            ..CertificateData::default()
        };

        let resolver = resolver();
        let scene = LayoutRenderer::new(&resolver, RenderMode::Edit).render(&template, &data);
        assert!(scene.boxes.is_empty());
    }

    #[test]
    fn missing_image_source_renders_nothing_without_reflow() {
        let mut template = image_template();
        template.elements.push(serde_json::from_str(
            r#"{ "type": "text", "id": "after", "x": 50, "y": 80, "width": 30,
                 "content": "below" }"#,
        ).unwrap());

        // No photo set: image box disappears, the text box keeps its rect
        let resolver = resolver();
        let scene = LayoutRenderer::new(&resolver, RenderMode::Preview)
            .render(&template, &CertificateData::default());

        assert_eq!(scene.boxes.len(), 1);
        assert_eq!(scene.boxes[0].id, "after");
        assert!((scene.boxes[0].rect.y - (0.8 * 566.0 - scene.boxes[0].rect.height / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn mode_only_affects_text_scale_and_selection() {
        let template = system_templates().remove(0);
        let data = CertificateData::default();
        let resolver = resolver();

        let edit = LayoutRenderer::new(&resolver, RenderMode::Edit).render(&template, &data);
        let preview = LayoutRenderer::new(&resolver, RenderMode::Preview).render(&template, &data);
        let export = LayoutRenderer::new(&resolver, RenderMode::Export).render(&template, &data);

        assert_eq!(edit.boxes.len(), preview.boxes.len());
        assert_eq!(edit.boxes.len(), export.boxes.len());

        for (e, x) in edit.boxes.iter().zip(export.boxes.iter()) {
            // Edit and export share the literal font size, so geometry matches
            assert_eq!(e.rect, x.rect);
        }

        for (p, x) in preview.boxes.iter().zip(export.boxes.iter()) {
            if let (
                BoxContent::Text { style: ps, .. },
                BoxContent::Text { style: xs, .. },
            ) = (&p.content, &x.content)
            {
                assert!((ps.font_size - xs.font_size * PREVIEW_TEXT_SCALE).abs() < 1e-9);
            }
            // Horizontal placement is identical in every mode
            assert_eq!(p.rect.x, x.rect.x);
            assert_eq!(p.rect.width, x.rect.width);
        }
    }

    #[test]
    fn selection_ring_applies_only_in_edit_mode() {
        let template = system_templates().remove(0);
        let data = CertificateData::default();
        let resolver = resolver();

        let edit = LayoutRenderer::new(&resolver, RenderMode::Edit)
            .with_selected(Some("trainee-name"))
            .render(&template, &data);
        assert!(edit
            .boxes
            .iter()
            .any(|b| b.id == "trainee-name" && b.selected));

        let preview = LayoutRenderer::new(&resolver, RenderMode::Preview)
            .with_selected(Some("trainee-name"))
            .render(&template, &data);
        assert!(preview.boxes.iter().all(|b| !b.selected));
    }

    #[test]
    fn border_table() {
        assert_eq!(border_treatment(BorderStyle::None), None);
        assert_eq!(
            border_treatment(BorderStyle::Classic),
            Some(BorderTreatment {
                width: 12.0,
                kind: LineKind::Double
            })
        );
        assert_eq!(
            border_treatment(BorderStyle::Modern),
            Some(BorderTreatment {
                width: 4.0,
                kind: LineKind::Solid
            })
        );
        assert_eq!(
            border_treatment(BorderStyle::Minimal),
            Some(BorderTreatment {
                width: 1.0,
                kind: LineKind::Solid
            })
        );
        assert_eq!(
            border_treatment(BorderStyle::Ornate),
            Some(BorderTreatment {
                width: 16.0,
                kind: LineKind::Double
            })
        );

        assert!(has_corner_decorations(BorderStyle::Classic));
        assert!(has_corner_decorations(BorderStyle::Ornate));
        assert!(!has_corner_decorations(BorderStyle::Modern));
        assert!(!has_corner_decorations(BorderStyle::Minimal));
        assert!(!has_corner_decorations(BorderStyle::None));
    }

    #[test]
    fn font_stack_mapping() {
        assert_eq!(font_stack(Some("monospace")).css, "monospace");
        assert_eq!(
            font_stack(Some("Playfair Display")).css,
            "'Playfair Display', serif"
        );
        assert_eq!(font_stack(Some("Comic Sans")).css, "'Inter', sans-serif");
        assert_eq!(font_stack(None).primary, "Inter");
    }

    #[test]
    fn line_uses_accent_color_fallback() {
        let mut template = system_templates().remove(0);
        template.elements = vec![serde_json::from_str(
            r#"{ "type": "line", "id": "l", "x": 50, "y": 40, "width": 30 }"#,
        )
        .unwrap()];

        let resolver = resolver();
        let scene = LayoutRenderer::new(&resolver, RenderMode::Preview)
            .render(&template, &CertificateData::default());

        assert_eq!(scene.boxes.len(), 1);
        assert_eq!(scene.boxes[0].rect.height, LINE_THICKNESS);
        assert_eq!(
            scene.boxes[0].content,
            BoxContent::Line {
                color: template.accent_color.clone()
            }
        );
    }
}
