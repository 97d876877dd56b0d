//! Template schema and the system template seed set

use crate::element::{
    Element, FontStyle, FontWeight, ImageElement, LineElement, LogoElement, QrCodeElement,
    SealElement, TextAlign, TextElement,
};
use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canvas design width in pixels; percentages resolve against this
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
/// Canvas design height in pixels
pub const DEFAULT_CANVAS_HEIGHT: f64 = 566.0;

/// Border treatment keyed by template style
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    None,
    Classic,
    Modern,
    Minimal,
    Ornate,
}

fn default_canvas_width() -> f64 {
    DEFAULT_CANVAS_WIDTH
}

fn default_canvas_height() -> f64 {
    DEFAULT_CANVAS_HEIGHT
}

fn default_true() -> bool {
    true
}

/// A named, reusable visual design
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,

    pub background_color: String,
    pub accent_color: String,

    /// Optional URL, stretched to cover the canvas
    #[serde(default)]
    pub background_image: Option<String>,

    #[serde(default)]
    pub border_style: BorderStyle,

    /// Canvas design dimensions in absolute pixels
    #[serde(default = "default_canvas_width")]
    pub width: f64,
    #[serde(default = "default_canvas_height")]
    pub height: f64,

    /// Template-level defaults; certificates may override
    #[serde(default = "default_true")]
    pub show_seal: bool,
    #[serde(default = "default_true")]
    pub show_qr_code: bool,

    /// Paint order: later elements draw on top
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Template {
    /// Parse a template from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the template to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check coordinate ranges and element id uniqueness
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for element in &self.elements {
            let id = element.id();
            if !seen.insert(id.to_string()) {
                return Err(ModelError::DuplicateElementId(id.to_string()));
            }

            let (x, y) = element.position();
            for (field, value) in [("x", x), ("y", y), ("width", element.width())] {
                if !(0.0..=100.0).contains(&value) {
                    return Err(ModelError::CoordinateOutOfRange {
                        id: id.to_string(),
                        field,
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    /// Find an element by id
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Find an element by id, mutably
    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }
}

/// Ids of the fixed, non-deletable seed templates
const SYSTEM_TEMPLATE_IDS: &[&str] = &[
    "classic-gold",
    "modern-navy",
    "minimal-elegant",
    "ornate-traditional",
];

/// Whether the id names a system template
pub fn is_system_template(id: &str) -> bool {
    SYSTEM_TEMPLATE_IDS.contains(&id)
}

/// Generate an id for a user-created template, `custom-<millis>`
pub fn new_template_id() -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("custom-{millis}")
}

/// The fixed seed set shipped with the application
pub fn system_templates() -> Vec<Template> {
    let seed = |id: &str, name: &str, background: &str, border: BorderStyle, accent: &str| {
        Template {
            id: id.to_string(),
            name: name.to_string(),
            background_color: background.to_string(),
            accent_color: accent.to_string(),
            background_image: None,
            border_style: border,
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            show_seal: true,
            show_qr_code: true,
            elements: default_elements(),
        }
    };

    let mut templates = vec![
        seed(
            "classic-gold",
            "Classic Gold",
            "#FFFEF7",
            BorderStyle::Classic,
            "#C9A227",
        ),
        seed(
            "modern-navy",
            "Modern Navy",
            "#F8FAFC",
            BorderStyle::Modern,
            "#1E3A5F",
        ),
        seed(
            "minimal-elegant",
            "Minimal Elegant",
            "#FFFFFF",
            BorderStyle::Minimal,
            "#2D3748",
        ),
        seed(
            "ornate-traditional",
            "Ornate Traditional",
            "#FDF8F3",
            BorderStyle::Ornate,
            "#8B4513",
        ),
    ];

    templates[2].show_seal = false;
    templates
}

/// The starter element layout new templates copy
pub fn default_elements() -> Vec<Element> {
    let text = |id: &str,
                placeholder: Option<&str>,
                content: Option<&str>,
                x: f64,
                y: f64,
                width: f64,
                font_size: f64,
                family: &str,
                weight: FontWeight,
                color: &str| {
        Element::Text(TextElement {
            id: id.to_string(),
            x,
            y,
            width,
            height: None,
            content: content.map(str::to_string),
            placeholder: placeholder.map(str::to_string),
            font_size: Some(font_size),
            font_family: Some(family.to_string()),
            font_weight: weight,
            font_style: FontStyle::Normal,
            text_align: TextAlign::Center,
            color: Some(color.to_string()),
            visible: true,
        })
    };

    vec![
        text(
            "type-label",
            Some("certificateTypeLabel"),
            None,
            50.0,
            10.0,
            60.0,
            14.0,
            "Inter",
            FontWeight::Semibold,
            "#8A7320",
        ),
        text(
            "title",
            Some("certificateTitle"),
            None,
            50.0,
            19.0,
            70.0,
            13.0,
            "Inter",
            FontWeight::Normal,
            "#555555",
        ),
        Element::Image(ImageElement {
            id: "trainee-photo".to_string(),
            x: 13.0,
            y: 22.0,
            width: 12.0,
            height: 18.0,
            placeholder: Some("traineePhoto".to_string()),
            visible: true,
        }),
        Element::Logo(LogoElement {
            id: "center-logo".to_string(),
            x: 87.0,
            y: 15.0,
            width: 10.0,
            height: 12.0,
            visible: true,
        }),
        text(
            "trainee-name",
            Some("traineeName"),
            None,
            50.0,
            32.0,
            80.0,
            34.0,
            "Playfair Display",
            FontWeight::Bold,
            "#222222",
        ),
        Element::Line(LineElement {
            id: "name-divider".to_string(),
            x: 50.0,
            y: 39.0,
            width: 30.0,
            height: None,
            color: None,
            visible: true,
        }),
        text(
            "program-name",
            Some("trainingProgramName"),
            None,
            50.0,
            47.0,
            70.0,
            18.0,
            "Inter",
            FontWeight::Semibold,
            "#333333",
        ),
        text(
            "date-of-issue",
            Some("dateOfIssue"),
            None,
            30.0,
            60.0,
            25.0,
            12.0,
            "Inter",
            FontWeight::Normal,
            "#444444",
        ),
        text(
            "place-of-issue",
            Some("placeOfIssue"),
            None,
            70.0,
            60.0,
            25.0,
            12.0,
            "Inter",
            FontWeight::Normal,
            "#444444",
        ),
        text(
            "certificate-number",
            Some("certificateNumber"),
            None,
            30.0,
            68.0,
            25.0,
            11.0,
            "monospace",
            FontWeight::Normal,
            "#444444",
        ),
        text(
            "atc-code",
            Some("atcCode"),
            None,
            70.0,
            68.0,
            25.0,
            11.0,
            "monospace",
            FontWeight::Normal,
            "#444444",
        ),
        text(
            "chairperson-name",
            Some("chairpersonName"),
            None,
            50.0,
            80.0,
            40.0,
            13.0,
            "Inter",
            FontWeight::Semibold,
            "#333333",
        ),
        text(
            "chairperson-title",
            Some("chairpersonTitle"),
            None,
            50.0,
            84.5,
            40.0,
            10.0,
            "Inter",
            FontWeight::Normal,
            "#666666",
        ),
        Element::Seal(SealElement {
            id: "seal".to_string(),
            x: 14.0,
            y: 82.0,
            width: 12.0,
            height: 16.0,
            visible: true,
        }),
        Element::Qrcode(QrCodeElement {
            id: "qrcode".to_string(),
            x: 86.0,
            y: 82.0,
            width: 12.0,
            height: 16.0,
            visible: true,
        }),
        text(
            "legal-disclaimer",
            Some("legalDisclaimer"),
            None,
            50.0,
            94.0,
            80.0,
            7.0,
            "Inter",
            FontWeight::Normal,
            "#777777",
        ),
    ]
}
