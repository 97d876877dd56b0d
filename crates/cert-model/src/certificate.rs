//! Certificate record types

use serde::{Deserialize, Serialize};

/// Display-only certificate status, set by the issuing side
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    #[default]
    Valid,
    Revoked,
    Expired,
}

/// Certificate category, used only to pick a human-readable label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CertificateType {
    Trainee,
    AccreditedCenter,
    Trainer,
}

impl CertificateType {
    pub fn label(self) -> &'static str {
        match self {
            CertificateType::Trainee => "Trainee Certificate",
            CertificateType::AccreditedCenter => "Accredited Center Certificate",
            CertificateType::Trainer => "Trainer Certificate",
        }
    }
}

/// The record whose fields placeholders resolve against
///
/// Every field is optional: previews run against partially filled
/// records and the resolver supplies fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateData {
    pub id: Option<String>,

    /// `FIBQ-XXXX-XXXX` when generated here; external input is not
    /// required to match
    pub certificate_number: Option<String>,

    pub trainee_name: Option<String>,
    pub trainee_photo: Option<String>,
    pub trainer_name: Option<String>,
    pub trainer_photo: Option<String>,
    pub center_name: Option<String>,
    pub center_logo: Option<String>,

    pub certificate_title: Option<String>,
    pub training_program_name: Option<String>,
    pub atc_code: Option<String>,
    /// ISO date (YYYY-MM-DD)
    pub date_of_issue: Option<String>,
    pub place_of_issue: Option<String>,

    pub chairperson_name: Option<String>,
    pub chairperson_title: Option<String>,
    pub legal_disclaimer: Option<String>,

    /// Certificate-level overrides of the template defaults; absent
    /// means "use the template"
    pub show_seal: Option<bool>,
    pub show_qr_code: Option<bool>,

    pub template_id: Option<String>,
    pub status: Option<CertificateStatus>,
    pub certificate_type: Option<CertificateType>,
    pub created_at: Option<String>,
}

/// Issuer presets applied to newly created certificates
pub fn default_certificate_data() -> CertificateData {
    CertificateData {
        certificate_title: Some(
            "This certificate is proudly presented for successfully completing \
             the accredited training program"
                .to_string(),
        ),
        chairperson_name: Some("Dr. Marie Laurent".to_string()),
        chairperson_title: Some("Chairperson of the Accreditation Board".to_string()),
        legal_disclaimer: Some(
            "Issued by a private accreditation body. Validity subject to official verification."
                .to_string(),
        ),
        place_of_issue: Some("French Republic".to_string()),
        show_seal: Some(true),
        show_qr_code: Some(true),
        template_id: Some("classic-gold".to_string()),
        status: Some(CertificateStatus::Valid),
        ..CertificateData::default()
    }
}
