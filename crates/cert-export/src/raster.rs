//! Scene rasterization
//!
//! Paints a rendered scene into an RGBA bitmap at a fixed supersampling
//! factor. The bitmap is the 1:1 design-pixel canvas multiplied by the
//! factor; any on-screen display scale never enters here.

use crate::{ExportError, Result};
use ab_glyph::{Font, FontArc, ScaleFont};
use cert_layout::{
    BoxContent, LineKind, PlacedBox, Rect, Scene, TextStyle, CORNER_INSET, CORNER_SIZE,
    CORNER_STROKE,
};
use cert_model::TextAlign;
use image::{DynamicImage, Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};
use std::collections::HashMap;

/// Fixed supersampling factor for export rasterization
pub const SUPERSAMPLE: u32 = 3;

/// Parse a color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA` or a small named
/// set. Unknown strings return None.
pub fn parse_color(s: &str) -> Option<Rgba<u8>> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        let digit = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        let nibble = |i: usize| {
            let d = u8::from_str_radix(hex.get(i..i + 1)?, 16).ok()?;
            Some(d * 17)
        };
        return match hex.len() {
            3 => Some(Rgba([nibble(0)?, nibble(1)?, nibble(2)?, 255])),
            6 => Some(Rgba([digit(0)?, digit(2)?, digit(4)?, 255])),
            8 => Some(Rgba([digit(0)?, digit(2)?, digit(4)?, digit(6)?])),
            _ => None,
        };
    }

    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Rgba([0, 0, 0, 255])),
        "white" => Some(Rgba([255, 255, 255, 255])),
        "red" => Some(Rgba([255, 0, 0, 255])),
        "green" => Some(Rgba([0, 128, 0, 255])),
        "blue" => Some(Rgba([0, 0, 255, 255])),
        "gray" | "grey" => Some(Rgba([128, 128, 128, 255])),
        "silver" => Some(Rgba([192, 192, 192, 255])),
        "gold" => Some(Rgba([255, 215, 0, 255])),
        "navy" => Some(Rgba([0, 0, 128, 255])),
        "maroon" => Some(Rgba([128, 0, 0, 255])),
        "transparent" => Some(Rgba([0, 0, 0, 0])),
        _ => None,
    }
}

/// Builder for a font family's variants (TTF bytes)
#[derive(Default)]
pub struct FontFamilyBuilder {
    regular: Option<Vec<u8>>,
    bold: Option<Vec<u8>>,
}

impl FontFamilyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regular(mut self, data: Vec<u8>) -> Self {
        self.regular = Some(data);
        self
    }

    pub fn bold(mut self, data: Vec<u8>) -> Self {
        self.bold = Some(data);
        self
    }
}

struct FontVariants {
    regular: FontArc,
    bold: Option<FontArc>,
}

/// Registered fonts, keyed by family name
///
/// Glyph rasterization needs real font data, which is an asset decision
/// for the embedding application; the catalog only requires that every
/// family a template uses (or one fallback family) is registered. Italic
/// is drawn with the upright variant.
#[derive(Default)]
pub struct FontCatalog {
    families: HashMap<String, FontVariants>,
    /// Family used when a requested one is missing; first registered
    fallback: Option<String>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font family from TTF bytes
    pub fn register_family(&mut self, name: &str, builder: FontFamilyBuilder) -> Result<()> {
        let regular = builder
            .regular
            .ok_or_else(|| ExportError::FontIncomplete(name.to_string()))?;
        let regular =
            FontArc::try_from_vec(regular).map_err(|e| ExportError::FontParse(e.to_string()))?;
        let bold = builder
            .bold
            .map(FontArc::try_from_vec)
            .transpose()
            .map_err(|e| ExportError::FontParse(e.to_string()))?;

        if self.fallback.is_none() {
            self.fallback = Some(name.to_string());
        }
        self.families
            .insert(name.to_string(), FontVariants { regular, bold });
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Select a font for a family and numeric weight
    fn select(&self, family: &str, weight: u16) -> Result<&FontArc> {
        let variants = self
            .families
            .get(family)
            .or_else(|| self.fallback.as_ref().and_then(|f| self.families.get(f)))
            .ok_or_else(|| ExportError::FontNotFound(family.to_string()))?;

        if weight >= 600 {
            if let Some(bold) = &variants.bold {
                return Ok(bold);
            }
        }
        Ok(&variants.regular)
    }
}

/// Source of pixel data for image/logo boxes and background images
///
/// The pipeline treats a load failure as fatal for the export; sources
/// must therefore be reachable without tainting (CORS-clean in browser
/// deployments, readable paths elsewhere).
pub trait ImageLoader {
    fn load(&self, url: &str) -> Result<DynamicImage>;
}

/// Loader that fails every request; for templates without image content
pub struct NoImageLoader;

impl ImageLoader for NoImageLoader {
    fn load(&self, url: &str) -> Result<DynamicImage> {
        Err(ExportError::ImageLoad {
            url: url.to_string(),
            reason: "no image loader configured".to_string(),
        })
    }
}

/// Paints scenes into supersampled RGBA bitmaps
pub struct Rasterizer<'a> {
    fonts: &'a FontCatalog,
    images: &'a dyn ImageLoader,
    factor: u32,
}

impl<'a> Rasterizer<'a> {
    pub fn new(fonts: &'a FontCatalog, images: &'a dyn ImageLoader) -> Self {
        Self {
            fonts,
            images,
            factor: SUPERSAMPLE,
        }
    }

    /// Override the supersampling factor (clamped to at least 1)
    pub fn with_factor(mut self, factor: u32) -> Self {
        self.factor = factor.max(1);
        self
    }

    /// Rasterize a scene at `scene size x factor`
    ///
    /// Transparency is preserved: when the background color does not
    /// parse, pixels stay fully transparent.
    pub fn rasterize(&self, scene: &Scene) -> Result<RgbaImage> {
        let s = self.factor as f64;
        let width = (scene.width * s).round().max(1.0) as u32;
        let height = (scene.height * s).round().max(1.0) as u32;
        let mut img = RgbaImage::new(width, height);

        if let Some(color) = parse_color(&scene.background_color) {
            fill_rect(&mut img, 0.0, 0.0, width as f64, height as f64, color);
        }

        if let Some(url) = &scene.background_image {
            let bg = self.images.load(url)?;
            let cover = bg.resize_to_fill(width, height, image::imageops::FilterType::Triangle);
            image::imageops::overlay(&mut img, &cover.to_rgba8(), 0, 0);
        }

        let accent = parse_color(&scene.accent_color).unwrap_or(Rgba([0, 0, 0, 255]));
        if let Some(border) = &scene.border {
            self.draw_border(&mut img, border.width * s, border.kind, accent);
        }
        if scene.corner_decorations {
            self.draw_corners(&mut img, accent);
        }

        for placed in &scene.boxes {
            self.draw_box(&mut img, placed, accent)?;
        }

        Ok(img)
    }

    fn draw_border(&self, img: &mut RgbaImage, width: f64, kind: LineKind, color: Rgba<u8>) {
        match kind {
            LineKind::Solid => draw_border_ring(img, 0.0, width, color),
            LineKind::Double => {
                // Two strokes of a third each, a gap between
                let stroke = width / 3.0;
                draw_border_ring(img, 0.0, stroke, color);
                draw_border_ring(img, 2.0 * stroke, stroke, color);
            }
        }
    }

    fn draw_corners(&self, img: &mut RgbaImage, color: Rgba<u8>) {
        let s = self.factor as f64;
        let inset = CORNER_INSET * s;
        let size = CORNER_SIZE * s;
        let stroke = CORNER_STROKE * s;
        let (w, h) = (img.width() as f64, img.height() as f64);

        // L-shapes opening toward the canvas center
        for (x, y, dx, dy) in [
            (inset, inset, 1.0, 1.0),
            (w - inset - size, inset, -1.0, 1.0),
            (inset, h - inset - size, 1.0, -1.0),
            (w - inset - size, h - inset - size, -1.0, -1.0),
        ] {
            // Horizontal arm hugs the top or bottom edge of the corner
            let hy = if dy > 0.0 { y } else { y + size - stroke };
            fill_rect(img, x, hy, size, stroke, color);

            // Vertical arm hugs the left or right edge
            let vx = if dx > 0.0 { x } else { x + size - stroke };
            fill_rect(img, vx, y, stroke, size, color);
        }
    }

    fn draw_box(&self, img: &mut RgbaImage, placed: &PlacedBox, accent: Rgba<u8>) -> Result<()> {
        let s = self.factor as f64;
        let rect = Rect {
            x: placed.rect.x * s,
            y: placed.rect.y * s,
            width: placed.rect.width * s,
            height: placed.rect.height * s,
        };

        match &placed.content {
            BoxContent::Text { value, style } => self.draw_text(img, &rect, value, style),
            BoxContent::Image { url, framed } => self.draw_image(img, &rect, url, *framed, accent),
            BoxContent::QrCode { payload } => self.draw_qr(img, &rect, payload),
            BoxContent::Seal => {
                self.draw_seal(img, &rect, accent);
                Ok(())
            }
            BoxContent::Line { color } => {
                let color = parse_color(color).unwrap_or(accent);
                fill_rect(img, rect.x, rect.y, rect.width, rect.height, color);
                Ok(())
            }
        }
    }

    fn draw_text(&self, img: &mut RgbaImage, rect: &Rect, value: &str, style: &TextStyle) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }

        let font = self.fonts.select(&style.font.primary, style.weight)?;
        let px = (style.font_size * self.factor as f64) as f32;
        let scaled = font.as_scaled(px);
        let color = parse_color(&style.color).unwrap_or(Rgba([0, 0, 0, 255]));

        let lines = wrap_text(value, rect.width as f32, |line| measure(font, px, line));
        let line_height = (style.font_size * style.line_height * self.factor as f64) as f32;
        let total_height = line_height * lines.len() as f32;

        // Lines center vertically around the box anchor, mirroring the
        // auto-height centering of the on-screen renderer
        let mut baseline_y =
            (rect.y + rect.height / 2.0) as f32 - total_height / 2.0 + scaled.ascent()
                + (line_height - (scaled.ascent() - scaled.descent())) / 2.0;

        for line in &lines {
            let line_width = measure(font, px, line);
            let start_x = match style.align {
                TextAlign::Left => rect.x as f32,
                TextAlign::Center => (rect.x + rect.width / 2.0) as f32 - line_width / 2.0,
                TextAlign::Right => (rect.x + rect.width) as f32 - line_width,
            };

            let mut caret = start_x;
            for ch in line.chars() {
                let glyph_id = font.glyph_id(ch);
                let glyph =
                    glyph_id.with_scale_and_position(px, ab_glyph::point(caret, baseline_y));
                if let Some(outlined) = font.outline_glyph(glyph) {
                    let bounds = outlined.px_bounds();
                    outlined.draw(|gx, gy, coverage| {
                        let x = gx as i64 + bounds.min.x as i64;
                        let y = gy as i64 + bounds.min.y as i64;
                        blend_coverage(img, x, y, color, coverage);
                    });
                }
                caret += scaled.h_advance(glyph_id);
            }
            baseline_y += line_height;
        }
        Ok(())
    }

    fn draw_image(
        &self,
        img: &mut RgbaImage,
        rect: &Rect,
        url: &str,
        framed: bool,
        accent: Rgba<u8>,
    ) -> Result<()> {
        let loaded = self.images.load(url)?;
        let (bw, bh) = (rect.width.max(1.0) as u32, rect.height.max(1.0) as u32);

        // Contain within the box, centered, aspect preserved
        let fitted = loaded.resize(bw, bh, image::imageops::FilterType::Triangle);
        let x = rect.x + (rect.width - fitted.width() as f64) / 2.0;
        let y = rect.y + (rect.height - fitted.height() as f64) / 2.0;
        image::imageops::overlay(img, &fitted.to_rgba8(), x as i64, y as i64);

        if framed {
            let stroke = 3.0 * self.factor as f64;
            draw_rect_outline(
                img,
                x,
                y,
                fitted.width() as f64,
                fitted.height() as f64,
                stroke,
                accent,
            );
        }
        Ok(())
    }

    fn draw_qr(&self, img: &mut RgbaImage, rect: &Rect, payload: &str) -> Result<()> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
            .map_err(|e| ExportError::QrEncode(e.to_string()))?;

        let caption_px = 8.0 * self.factor as f64;
        let side = rect
            .width
            .min(rect.height - caption_px * 1.5)
            .max(1.0) as u32;
        let qr_image = code
            .render::<image::Luma<u8>>()
            .max_dimensions(side, side)
            .build();

        let x = rect.x + (rect.width - qr_image.width() as f64) / 2.0;
        let y = rect.y;
        image::imageops::overlay(
            img,
            &DynamicImage::ImageLuma8(qr_image.clone()).to_rgba8(),
            x as i64,
            y as i64,
        );

        // Caption is decoration: skipped when no font is registered
        if !self.fonts.is_empty() {
            let style = caption_style(caption_px / self.factor as f64, "#888888");
            let caption_rect = Rect {
                x: rect.x,
                y: y + qr_image.height() as f64,
                width: rect.width,
                height: caption_px * 1.5,
            };
            self.draw_text(img, &caption_rect, "Scan to verify", &style)?;
        }
        Ok(())
    }

    fn draw_seal(&self, img: &mut RgbaImage, rect: &Rect, accent: Rgba<u8>) {
        let s = self.factor as f64;
        // Ring diameter caps at 80 design pixels
        let diameter = rect.width.min(rect.height).min(80.0 * s);
        let radius = diameter / 2.0;
        let cx = rect.x + rect.width / 2.0;
        let cy = rect.y + rect.height / 2.0;
        let stroke = 4.0 * s;

        let tint = Rgba([accent[0], accent[1], accent[2], 0x10]);
        fill_circle(img, cx, cy, radius, tint);
        draw_ring(img, cx, cy, radius, stroke, accent);

        if !self.fonts.is_empty() {
            let style = caption_style(7.0, &format!(
                "#{:02X}{:02X}{:02X}",
                accent[0], accent[1], accent[2]
            ));
            let caption_rect = Rect {
                x: cx - radius,
                y: cy - 7.0 * s,
                width: diameter,
                height: 14.0 * s,
            };
            // Caption failures are not worth failing an export over
            let _ = self.draw_text(img, &caption_rect, "OFFICIAL", &style);
        }
    }
}

fn caption_style(font_size: f64, color: &str) -> TextStyle {
    TextStyle {
        font_size,
        font: cert_layout::font_stack(None),
        weight: 700,
        italic: false,
        align: TextAlign::Center,
        color: color.to_string(),
        line_height: 1.0,
    }
}

/// Measure a line's advance width at the given pixel size
fn measure(font: &FontArc, px: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(px);
    text.chars()
        .map(|ch| scaled.h_advance(font.glyph_id(ch)))
        .sum()
}

/// Greedy word wrap with per-character breaking of overlong words
///
/// `measure` yields a candidate line's advance width, so wrapping stays
/// independent of any particular font.
fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if measure(&candidate) <= max_width || current.is_empty() {
                if measure(word) > max_width && current.is_empty() {
                    // Break the word itself
                    let mut chunk = String::new();
                    for ch in word.chars() {
                        chunk.push(ch);
                        if measure(&chunk) > max_width && chunk.chars().count() > 1 {
                            chunk.pop();
                            lines.push(std::mem::take(&mut chunk));
                            chunk.push(ch);
                        }
                    }
                    current = chunk;
                } else {
                    current = candidate;
                }
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() || paragraph.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn blend_pixel(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, alpha: f32) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let alpha = (alpha * color[3] as f32 / 255.0).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let pixel = img.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        pixel[c] = (color[c] as f32 * alpha + pixel[c] as f32 * (1.0 - alpha)) as u8;
    }
    pixel[3] = ((alpha + pixel[3] as f32 / 255.0 * (1.0 - alpha)) * 255.0) as u8;
}

fn blend_coverage(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    blend_pixel(img, x, y, color, coverage);
}

fn fill_rect(img: &mut RgbaImage, x: f64, y: f64, width: f64, height: f64, color: Rgba<u8>) {
    let x0 = x.max(0.0) as i64;
    let y0 = y.max(0.0) as i64;
    let x1 = ((x + width).ceil() as i64).min(img.width() as i64);
    let y1 = ((y + height).ceil() as i64).min(img.height() as i64);
    for py in y0..y1 {
        for px in x0..x1 {
            blend_pixel(img, px, py, color, 1.0);
        }
    }
}

/// Four bands at `inset` from the bitmap edge, `thickness` wide
fn draw_border_ring(img: &mut RgbaImage, inset: f64, thickness: f64, color: Rgba<u8>) {
    let (w, h) = (img.width() as f64, img.height() as f64);
    fill_rect(img, inset, inset, w - 2.0 * inset, thickness, color);
    fill_rect(img, inset, h - inset - thickness, w - 2.0 * inset, thickness, color);
    fill_rect(img, inset, inset, thickness, h - 2.0 * inset, color);
    fill_rect(img, w - inset - thickness, inset, thickness, h - 2.0 * inset, color);
}

fn draw_rect_outline(
    img: &mut RgbaImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    stroke: f64,
    color: Rgba<u8>,
) {
    fill_rect(img, x, y, width, stroke, color);
    fill_rect(img, x, y + height - stroke, width, stroke, color);
    fill_rect(img, x, y, stroke, height, color);
    fill_rect(img, x + width - stroke, y, stroke, height, color);
}

fn fill_circle(img: &mut RgbaImage, cx: f64, cy: f64, radius: f64, color: Rgba<u8>) {
    let x0 = (cx - radius).floor() as i64;
    let y0 = (cy - radius).floor() as i64;
    let x1 = (cx + radius).ceil() as i64;
    let y1 = (cy + radius).ceil() as i64;
    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= radius * radius {
                blend_pixel(img, px, py, color, 1.0);
            }
        }
    }
}

fn draw_ring(img: &mut RgbaImage, cx: f64, cy: f64, radius: f64, stroke: f64, color: Rgba<u8>) {
    let inner = (radius - stroke).max(0.0);
    let x0 = (cx - radius).floor() as i64;
    let y0 = (cy - radius).floor() as i64;
    let x1 = (cx + radius).ceil() as i64;
    let y1 = (cy + radius).ceil() as i64;
    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            let d2 = dx * dx + dy * dy;
            if d2 <= radius * radius && d2 >= inner * inner {
                blend_pixel(img, px, py, color, 1.0);
            }
        }
    }
}
