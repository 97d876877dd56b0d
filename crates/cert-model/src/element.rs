//! Template element schema types

use serde::{Deserialize, Serialize};

/// Font weight for text elements
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Semibold,
    Bold,
}

impl FontWeight {
    /// Numeric CSS-style weight (bold 700, semibold 600, else 400)
    pub fn numeric(self) -> u16 {
        match self {
            FontWeight::Bold => 700,
            FontWeight::Semibold => 600,
            FontWeight::Normal => 400,
        }
    }
}

/// Font style for text elements
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

fn default_visible() -> bool {
    true
}

/// Text element: static content or a named placeholder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: String,

    /// Center-anchor position, percent of canvas width/height
    pub x: f64,
    pub y: f64,

    /// Percent of canvas width
    pub width: f64,

    /// Kept for round-tripping; text boxes size themselves from the font
    #[serde(default)]
    pub height: Option<f64>,

    /// Literal text, used when no placeholder is set
    #[serde(default)]
    pub content: Option<String>,

    /// Data field name; takes precedence over `content`
    #[serde(default)]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub font_size: Option<f64>,

    #[serde(default)]
    pub font_family: Option<String>,

    #[serde(default)]
    pub font_weight: FontWeight,

    #[serde(default)]
    pub font_style: FontStyle,

    #[serde(default)]
    pub text_align: TextAlign,

    /// Hex or named color string
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// Image element bound to an image placeholder (photo)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    #[serde(default)]
    pub placeholder: Option<String>,

    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// QR code element; payload is the verification URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeElement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// Official seal element drawn in the template accent color
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SealElement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// Horizontal divider line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineElement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,

    #[serde(default)]
    pub height: Option<f64>,

    /// Line color; falls back to the template accent color
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// Center logo element; source is always the centerLogo field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogoElement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,

    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// One visual unit on a template canvas (tagged union)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
    Qrcode(QrCodeElement),
    Seal(SealElement),
    Line(LineElement),
    Logo(LogoElement),
}

/// Element kind discriminant, used by the editor toolbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Image,
    QrCode,
    Seal,
    Line,
    Logo,
}

impl Element {
    /// Get the element id
    pub fn id(&self) -> &str {
        match self {
            Element::Text(e) => &e.id,
            Element::Image(e) => &e.id,
            Element::Qrcode(e) => &e.id,
            Element::Seal(e) => &e.id,
            Element::Line(e) => &e.id,
            Element::Logo(e) => &e.id,
        }
    }

    /// Get the element kind
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(_) => ElementKind::Text,
            Element::Image(_) => ElementKind::Image,
            Element::Qrcode(_) => ElementKind::QrCode,
            Element::Seal(_) => ElementKind::Seal,
            Element::Line(_) => ElementKind::Line,
            Element::Logo(_) => ElementKind::Logo,
        }
    }

    /// Get the center-anchor position in canvas percent
    pub fn position(&self) -> (f64, f64) {
        match self {
            Element::Text(e) => (e.x, e.y),
            Element::Image(e) => (e.x, e.y),
            Element::Qrcode(e) => (e.x, e.y),
            Element::Seal(e) => (e.x, e.y),
            Element::Line(e) => (e.x, e.y),
            Element::Logo(e) => (e.x, e.y),
        }
    }

    /// Set the center-anchor position in canvas percent
    pub fn set_position(&mut self, x: f64, y: f64) {
        match self {
            Element::Text(e) => {
                e.x = x;
                e.y = y;
            }
            Element::Image(e) => {
                e.x = x;
                e.y = y;
            }
            Element::Qrcode(e) => {
                e.x = x;
                e.y = y;
            }
            Element::Seal(e) => {
                e.x = x;
                e.y = y;
            }
            Element::Line(e) => {
                e.x = x;
                e.y = y;
            }
            Element::Logo(e) => {
                e.x = x;
                e.y = y;
            }
        }
    }

    /// Get the width in canvas percent
    pub fn width(&self) -> f64 {
        match self {
            Element::Text(e) => e.width,
            Element::Image(e) => e.width,
            Element::Qrcode(e) => e.width,
            Element::Seal(e) => e.width,
            Element::Line(e) => e.width,
            Element::Logo(e) => e.width,
        }
    }

    /// Get the height in canvas percent, where the kind carries one
    pub fn height(&self) -> Option<f64> {
        match self {
            Element::Text(e) => e.height,
            Element::Image(e) => Some(e.height),
            Element::Qrcode(e) => Some(e.height),
            Element::Seal(e) => Some(e.height),
            Element::Line(e) => e.height,
            Element::Logo(e) => Some(e.height),
        }
    }

    /// Get the placeholder name, for kinds that resolve one
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Element::Text(e) => e.placeholder.as_deref(),
            Element::Image(e) => e.placeholder.as_deref(),
            _ => None,
        }
    }

    /// Soft-hide flag
    pub fn visible(&self) -> bool {
        match self {
            Element::Text(e) => e.visible,
            Element::Image(e) => e.visible,
            Element::Qrcode(e) => e.visible,
            Element::Seal(e) => e.visible,
            Element::Line(e) => e.visible,
            Element::Logo(e) => e.visible,
        }
    }

    /// Replace the element id (used when duplicating)
    pub fn set_id(&mut self, id: String) {
        match self {
            Element::Text(e) => e.id = id,
            Element::Image(e) => e.id = id,
            Element::Qrcode(e) => e.id = id,
            Element::Seal(e) => e.id = id,
            Element::Line(e) => e.id = id,
            Element::Logo(e) => e.id = id,
        }
    }
}
