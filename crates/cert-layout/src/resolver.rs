//! Placeholder resolution
//!
//! Maps an element plus a certificate record to the concrete value it
//! displays. Fallback chains are ordered source lists evaluated by one
//! generic first-non-empty routine, so adding a source to a field never
//! touches control flow.

use cert_model::{CertificateData, Element, TextPlaceholder};
use chrono::NaiveDate;

/// Certificate number substituted into QR payloads when none is set yet
pub const PREVIEW_NUMBER: &str = "PREVIEW";

/// What an element displays once certificate data is applied
///
/// `None` from [`Resolver::resolve`] means "render nothing": the element
/// contributes no box and no layout side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Text value for a text element
    Text(String),
    /// Image source URL for image/logo elements
    Image(String),
    /// QR payload (the verification URL)
    QrCode(String),
    /// Official seal, drawn in the template accent color
    Seal,
    /// Divider line
    Line,
}

/// The placeholder resolver
///
/// Carries the site origin for QR payloads so resolution never reads
/// ambient state. Identical in edit, preview and export.
#[derive(Debug, Clone)]
pub struct Resolver {
    origin: String,
}

impl Resolver {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// The shareable verification link for a certificate number
    ///
    /// `<origin>/verify?number=<number>` is a compatibility surface:
    /// printed QR codes encode it.
    pub fn verification_url(&self, number: Option<&str>) -> String {
        let number = number
            .filter(|n| !n.is_empty())
            .unwrap_or(PREVIEW_NUMBER);
        format!("{}/verify?number={}", self.origin, number)
    }

    /// Resolve one element against certificate data
    pub fn resolve(&self, element: &Element, data: &CertificateData) -> Option<Resolved> {
        match element {
            Element::Text(e) => {
                let value = match e.placeholder.as_deref() {
                    Some(placeholder) => resolve_text_placeholder(placeholder, data),
                    None => e.content.clone().unwrap_or_default(),
                };
                Some(Resolved::Text(value))
            }
            Element::Image(e) => {
                resolve_image_placeholder(e.placeholder.as_deref(), data).map(Resolved::Image)
            }
            Element::Qrcode(_) => {
                if data.show_qr_code == Some(false) {
                    return None;
                }
                Some(Resolved::QrCode(
                    self.verification_url(data.certificate_number.as_deref()),
                ))
            }
            Element::Seal(_) => {
                if data.show_seal == Some(false) {
                    return None;
                }
                Some(Resolved::Seal)
            }
            Element::Logo(_) => non_empty(data.center_logo.as_deref())
                .map(|url| Resolved::Image(url.to_string())),
            Element::Line(_) => Some(Resolved::Line),
        }
    }
}

/// Resolve a text placeholder by name
///
/// Unknown names come back verbatim; this never fails.
pub fn resolve_text_placeholder(placeholder: &str, data: &CertificateData) -> String {
    let Some(known) = TextPlaceholder::from_key(placeholder) else {
        return placeholder.to_string();
    };

    match known {
        TextPlaceholder::TraineeName => first_non_empty(
            &[
                data.trainee_name.as_deref(),
                data.trainer_name.as_deref(),
                data.center_name.as_deref(),
            ],
            "Name",
        ),
        TextPlaceholder::CertificateTitle => first_non_empty(
            &[data.certificate_title.as_deref()],
            "Certificate Title",
        ),
        TextPlaceholder::TrainingProgramName => first_non_empty(
            &[data.training_program_name.as_deref()],
            "Training Program",
        ),
        TextPlaceholder::CertificateNumber => first_non_empty(
            &[data.certificate_number.as_deref()],
            "FIBQ-XXXX-XXXX",
        ),
        TextPlaceholder::AtcCode => first_non_empty(&[data.atc_code.as_deref()], "ATC-XXXX"),
        TextPlaceholder::DateOfIssue => format_issue_date(data.date_of_issue.as_deref()),
        TextPlaceholder::PlaceOfIssue => {
            first_non_empty(&[data.place_of_issue.as_deref()], "Place of Issue")
        }
        TextPlaceholder::ChairpersonName => {
            first_non_empty(&[data.chairperson_name.as_deref()], "Chairperson Name")
        }
        TextPlaceholder::ChairpersonTitle => {
            first_non_empty(&[data.chairperson_title.as_deref()], "Chairperson Title")
        }
        TextPlaceholder::LegalDisclaimer => {
            first_non_empty(&[data.legal_disclaimer.as_deref()], "Legal Disclaimer")
        }
        TextPlaceholder::CenterName => {
            first_non_empty(&[data.center_name.as_deref()], "Center Name")
        }
        TextPlaceholder::CertificateTypeLabel => data
            .certificate_type
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| "Certificate".to_string()),
    }
}

/// Resolve an image placeholder to a source URL, if any
pub fn resolve_image_placeholder(
    placeholder: Option<&str>,
    data: &CertificateData,
) -> Option<String> {
    match placeholder {
        Some("traineePhoto") => non_empty(data.trainee_photo.as_deref())
            .or_else(|| non_empty(data.trainer_photo.as_deref()))
            .map(str::to_string),
        Some("centerLogo") => non_empty(data.center_logo.as_deref()).map(str::to_string),
        _ => None,
    }
}

/// First non-empty source wins; the literal fallback otherwise
fn first_non_empty(sources: &[Option<&str>], fallback: &str) -> String {
    sources
        .iter()
        .filter_map(|s| non_empty(*s))
        .next()
        .unwrap_or(fallback)
        .to_string()
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Format an ISO date as `DD / MM / YYYY`; the literal pattern when
/// absent or unparseable
fn format_issue_date(date: Option<&str>) -> String {
    date.and_then(|d| NaiveDate::parse_from_str(d.get(..10).unwrap_or(d), "%Y-%m-%d").ok())
        .map(|d| d.format("%d / %m / %Y").to_string())
        .unwrap_or_else(|| "DD / MM / YYYY".to_string())
}
