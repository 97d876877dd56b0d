//! Certificate data model - templates, elements and certificate records
//!
//! This crate provides:
//! - The `Template` / `Element` schema (tagged union over element kinds)
//! - The placeholder vocabulary used by the resolver and editor pickers
//! - `CertificateData` records that placeholders resolve against
//! - Certificate and ATC number generation/validation
//!
//! # Example
//!
//! ```ignore
//! use cert_model::{Template, system_templates};
//!
//! let template = Template::from_json(json)?;
//! template.validate()?;
//! let seeds = system_templates();
//! ```

mod certificate;
mod element;
mod number;
mod placeholder;
mod template;

pub use certificate::{
    default_certificate_data, CertificateData, CertificateStatus, CertificateType,
};
pub use element::{
    Element, ElementKind, FontStyle, FontWeight, ImageElement, LineElement, LogoElement,
    QrCodeElement, SealElement, TextAlign, TextElement,
};
pub use number::{
    generate_atc_code, generate_certificate_number, is_valid_atc_code,
    is_valid_certificate_number,
};
pub use placeholder::{
    ImagePlaceholder, PlaceholderInfo, PlaceholderKind, TextPlaceholder, PLACEHOLDERS,
};
pub use template::{
    default_elements, is_system_template, new_template_id, system_templates, BorderStyle,
    Template, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
};

use thiserror::Error;

/// Errors that can occur during model validation and parsing
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("element '{id}': {field} out of range: {value} (expected 0-100)")]
    CoordinateOutOfRange {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("duplicate element id: {0}")]
    DuplicateElementId(String),

    #[error("invalid certificate number: {0}")]
    InvalidCertificateNumber(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
