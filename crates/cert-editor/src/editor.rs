//! Interactive editor state
//!
//! Owns a working copy of one template plus the transient UI state:
//! the selected element and an in-progress drag. All coordinates are
//! center-anchor percentages; pointer input arrives in screen pixels
//! and is converted through the display scale.

use cert_model::{
    Element, ElementKind, FontStyle, FontWeight, ImageElement, LineElement, LogoElement,
    QrCodeElement, SealElement, Template, TextAlign, TextElement,
};

/// Canvas display scale applied by the host UI; pointer deltas are
/// divided by this before any percentage math
pub const DEFAULT_DISPLAY_SCALE: f64 = 0.7;

/// An in-progress drag, captured at pointer-down
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub element_id: String,
    /// Pointer position at drag start, screen pixels
    pub start_pointer: (f64, f64),
    /// Element position at drag start, canvas percent
    pub start_position: (f64, f64),
}

/// Partial element update, merged field-by-field
///
/// Fields that do not apply to the target element's kind are ignored,
/// so one patch type serves every property-panel control. `content` and
/// `placeholder` are doubly optional: the outer `None` leaves the field
/// alone, `Some(None)` clears it (the property panel's "none" choice).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub content: Option<Option<String>>,
    pub placeholder: Option<Option<String>>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_align: Option<TextAlign>,
    pub color: Option<String>,
    pub visible: Option<bool>,
}

pub struct Editor {
    template: Template,
    selected: Option<String>,
    drag: Option<DragState>,
    display_scale: f64,
    id_seq: u64,
}

impl Editor {
    pub fn new(template: Template) -> Self {
        // Seed the id sequence past any existing element-<n> ids
        let id_seq = template
            .elements
            .iter()
            .filter_map(|e| e.id().strip_prefix("element-")?.parse::<u64>().ok())
            .max()
            .map_or(0, |n| n + 1);

        Self {
            template,
            selected: None,
            drag: None,
            display_scale: DEFAULT_DISPLAY_SCALE,
            id_seq,
        }
    }

    /// Override the display scale (the host's CSS transform factor)
    pub fn with_display_scale(mut self, scale: f64) -> Self {
        if scale > 0.0 {
            self.display_scale = scale;
        }
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn into_template(self) -> Template {
        self.template
    }

    pub fn selected_element_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Select an element by clicking its box; unknown ids are ignored
    pub fn select(&mut self, id: &str) {
        if self.template.element(id).is_some() {
            self.selected = Some(id.to_string());
        }
    }

    /// Clicking empty canvas clears the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Append a new element of the given kind at the canvas center and
    /// select it. Returns the new element's id.
    pub fn add_element(&mut self, kind: ElementKind) -> String {
        let id = self.next_id();
        let accent = self.template.accent_color.clone();

        let element = match kind {
            ElementKind::Text => Element::Text(TextElement {
                id: id.clone(),
                x: 50.0,
                y: 50.0,
                width: 30.0,
                height: Some(5.0),
                content: Some("New Text".to_string()),
                placeholder: None,
                font_size: Some(16.0),
                font_family: Some("Inter".to_string()),
                font_weight: FontWeight::Normal,
                font_style: FontStyle::Normal,
                text_align: TextAlign::Center,
                color: Some(accent),
                visible: true,
            }),
            ElementKind::Line => Element::Line(LineElement {
                id: id.clone(),
                x: 50.0,
                y: 50.0,
                width: 20.0,
                height: Some(1.0),
                color: Some(accent),
                visible: true,
            }),
            ElementKind::Image => Element::Image(ImageElement {
                id: id.clone(),
                x: 50.0,
                y: 50.0,
                width: 10.0,
                height: 10.0,
                placeholder: None,
                visible: true,
            }),
            ElementKind::QrCode => Element::Qrcode(QrCodeElement {
                id: id.clone(),
                x: 50.0,
                y: 50.0,
                width: 10.0,
                height: 10.0,
                visible: true,
            }),
            ElementKind::Seal => Element::Seal(SealElement {
                id: id.clone(),
                x: 50.0,
                y: 50.0,
                width: 10.0,
                height: 10.0,
                visible: true,
            }),
            ElementKind::Logo => Element::Logo(LogoElement {
                id: id.clone(),
                x: 50.0,
                y: 50.0,
                width: 10.0,
                height: 10.0,
                visible: true,
            }),
        };

        self.template.elements.push(element);
        self.selected = Some(id.clone());
        id
    }

    /// Clone an element with a fresh id, offset by +5% on both axes
    /// (clamped to the canvas), and select the clone. Unknown ids are a
    /// no-op.
    pub fn duplicate_element(&mut self, id: &str) -> Option<String> {
        let source = self.template.element(id)?.clone();
        let new_id = self.next_id();

        let mut clone = source;
        clone.set_id(new_id.clone());
        let (x, y) = clone.position();
        clone.set_position((x + 5.0).clamp(0.0, 100.0), (y + 5.0).clamp(0.0, 100.0));

        self.template.elements.push(clone);
        self.selected = Some(new_id.clone());
        Some(new_id)
    }

    /// Remove an element and clear the selection
    pub fn delete_element(&mut self, id: &str) {
        self.template.elements.retain(|e| e.id() != id);
        self.selected = None;
    }

    /// Merge a partial update into an element; unknown ids are a no-op
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) {
        let Some(element) = self.template.element_mut(id) else {
            return;
        };

        let (x, y) = element.position();
        element.set_position(patch.x.unwrap_or(x), patch.y.unwrap_or(y));

        match element {
            Element::Text(e) => {
                if let Some(width) = patch.width {
                    e.width = width;
                }
                if let Some(height) = patch.height {
                    e.height = Some(height);
                }
                if let Some(content) = &patch.content {
                    e.content = content.clone();
                }
                if let Some(placeholder) = &patch.placeholder {
                    e.placeholder = placeholder.clone();
                }
                if let Some(font_size) = patch.font_size {
                    e.font_size = Some(font_size);
                }
                if let Some(font_family) = &patch.font_family {
                    e.font_family = Some(font_family.clone());
                }
                if let Some(font_weight) = patch.font_weight {
                    e.font_weight = font_weight;
                }
                if let Some(font_style) = patch.font_style {
                    e.font_style = font_style;
                }
                if let Some(text_align) = patch.text_align {
                    e.text_align = text_align;
                }
                if let Some(color) = &patch.color {
                    e.color = Some(color.clone());
                }
                if let Some(visible) = patch.visible {
                    e.visible = visible;
                }
            }
            Element::Image(e) => {
                if let Some(width) = patch.width {
                    e.width = width;
                }
                if let Some(height) = patch.height {
                    e.height = height;
                }
                if let Some(placeholder) = &patch.placeholder {
                    e.placeholder = placeholder.clone();
                }
                if let Some(visible) = patch.visible {
                    e.visible = visible;
                }
            }
            Element::Line(e) => {
                if let Some(width) = patch.width {
                    e.width = width;
                }
                if let Some(height) = patch.height {
                    e.height = Some(height);
                }
                if let Some(color) = &patch.color {
                    e.color = Some(color.clone());
                }
                if let Some(visible) = patch.visible {
                    e.visible = visible;
                }
            }
            Element::Qrcode(e) => {
                if let Some(width) = patch.width {
                    e.width = width;
                }
                if let Some(height) = patch.height {
                    e.height = height;
                }
                if let Some(visible) = patch.visible {
                    e.visible = visible;
                }
            }
            Element::Seal(e) => {
                if let Some(width) = patch.width {
                    e.width = width;
                }
                if let Some(height) = patch.height {
                    e.height = height;
                }
                if let Some(visible) = patch.visible {
                    e.visible = visible;
                }
            }
            Element::Logo(e) => {
                if let Some(width) = patch.width {
                    e.width = width;
                }
                if let Some(height) = patch.height {
                    e.height = height;
                }
                if let Some(visible) = patch.visible {
                    e.visible = visible;
                }
            }
        }
    }

    /// Start dragging an element from a pointer-down position (screen
    /// pixels). Selects the element; unknown ids are a no-op.
    pub fn begin_drag(&mut self, id: &str, pointer_x: f64, pointer_y: f64) {
        let Some(element) = self.template.element(id) else {
            return;
        };
        self.drag = Some(DragState {
            element_id: id.to_string(),
            start_pointer: (pointer_x, pointer_y),
            start_position: element.position(),
        });
        self.selected = Some(id.to_string());
    }

    /// Apply a pointer-move to the dragged element
    ///
    /// Deltas are divided by the display scale to reach design pixels,
    /// then converted to canvas percent and clamped to [0,100]. The
    /// conversion always uses the unscaled canvas dimensions.
    pub fn drag_to(&mut self, pointer_x: f64, pointer_y: f64) {
        let Some(drag) = &self.drag else {
            return;
        };

        let dx = (pointer_x - drag.start_pointer.0) / self.display_scale;
        let dy = (pointer_y - drag.start_pointer.1) / self.display_scale;
        let x = drag.start_position.0 + dx / self.template.width * 100.0;
        let y = drag.start_position.1 + dy / self.template.height * 100.0;

        let id = drag.element_id.clone();
        if let Some(element) = self.template.element_mut(&id) {
            element.set_position(x.clamp(0.0, 100.0), y.clamp(0.0, 100.0));
        }
    }

    /// Pointer-up ends the drag; the last applied position sticks
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    fn next_id(&mut self) -> String {
        let id = format!("element-{}", self.id_seq);
        self.id_seq += 1;
        id
    }
}
