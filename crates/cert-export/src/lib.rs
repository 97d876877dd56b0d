//! Export pipeline - rasterization and document embedding
//!
//! This crate provides:
//! - A rasterizer that paints a rendered scene into a supersampled RGBA
//!   bitmap (text via ab_glyph, QR codes via qrcode, images via a
//!   pluggable loader)
//! - A PDF writer that embeds the bitmap centered on a landscape A4 page
//! - The `Exporter` front end with an in-flight guard and all-or-nothing
//!   file output
//!
//! # Example
//!
//! ```ignore
//! use cert_export::{Exporter, FontCatalog, FontFamilyBuilder, NoImageLoader};
//!
//! let mut fonts = FontCatalog::new();
//! fonts.register_family("Inter", FontFamilyBuilder::new().regular(inter_ttf))?;
//! let exporter = Exporter::new(&fonts, &NoImageLoader);
//! exporter.export_pdf(&scene, out_dir, "certificate")?;
//! ```

mod pdf;
mod pipeline;
mod raster;

pub use pdf::{fit_on_page, write_pdf, PagePlacement, PAGE_HEIGHT_MM, PAGE_MARGIN_FACTOR,
    PAGE_WIDTH_MM};
pub use pipeline::Exporter;
pub use raster::{
    parse_color, FontCatalog, FontFamilyBuilder, ImageLoader, NoImageLoader, Rasterizer,
    SUPERSAMPLE,
};

use thiserror::Error;

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,

    #[error("font family not found: {0}")]
    FontNotFound(String),

    #[error("font family '{0}' has no regular variant")]
    FontIncomplete(String),

    #[error("failed to parse font: {0}")]
    FontParse(String),

    /// External image sources must allow cross-origin fetching; a source
    /// the loader cannot fetch fails the whole export
    #[error("failed to load image {url}: {reason}")]
    ImageLoad { url: String, reason: String },

    #[error("QR encode error: {0}")]
    QrEncode(String),

    #[error("image error: {0}")]
    Image(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Image(err.to_string())
    }
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;
