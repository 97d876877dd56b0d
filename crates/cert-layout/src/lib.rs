//! Placeholder resolution and layout rendering
//!
//! This crate provides:
//! - The placeholder resolver: (element, certificate data) -> displayed value
//! - The layout renderer: (template, data, mode) -> a scene of absolutely
//!   placed boxes in design-pixel space
//!
//! The same resolver and placement math back the editor canvas, the public
//! preview and the export pipeline; `RenderMode` only toggles overlay
//! affordances and the preview text-scale compensation. Nothing here can
//! fail: resolution falls back to documented literals or "render nothing".
//!
//! # Example
//!
//! ```ignore
//! use cert_layout::{LayoutRenderer, RenderMode, Resolver};
//!
//! let resolver = Resolver::new("https://certificates.example.org");
//! let scene = LayoutRenderer::new(&resolver, RenderMode::Preview)
//!     .render(&template, &data);
//! ```

mod layout;
mod resolver;

pub use layout::{
    border_treatment, font_stack, has_corner_decorations, BorderTreatment, BoxContent, FontStack,
    LayoutRenderer, LineKind, PlacedBox, Rect, RenderMode, Scene, TextStyle, CORNER_INSET,
    CORNER_SIZE, CORNER_STROKE, LINE_THICKNESS, PREVIEW_TEXT_SCALE, TEXT_LINE_HEIGHT,
};
pub use resolver::{Resolved, Resolver, PREVIEW_NUMBER};
