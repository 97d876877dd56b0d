//! The placeholder vocabulary
//!
//! A fixed table of data field names that template elements can bind to.
//! Adding a placeholder means adding one entry here and one branch in the
//! resolver; nothing else changes.

/// Whether a placeholder produces text or an image source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Text,
    Image,
}

/// One entry of the placeholder table
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderInfo {
    pub key: &'static str,
    /// Human-readable label for editor pickers
    pub label: &'static str,
    pub kind: PlaceholderKind,
}

/// The canonical placeholder table
pub const PLACEHOLDERS: &[PlaceholderInfo] = &[
    PlaceholderInfo {
        key: "traineeName",
        label: "Trainee Name",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "certificateTitle",
        label: "Certificate Title",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "trainingProgramName",
        label: "Training Program",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "certificateNumber",
        label: "Certificate Number",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "atcCode",
        label: "ATC Code",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "dateOfIssue",
        label: "Date of Issue",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "placeOfIssue",
        label: "Place of Issue",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "chairpersonName",
        label: "Chairperson Name",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "chairpersonTitle",
        label: "Chairperson Title",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "legalDisclaimer",
        label: "Legal Disclaimer",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "centerName",
        label: "Center Name",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "certificateTypeLabel",
        label: "Certificate Type",
        kind: PlaceholderKind::Text,
    },
    PlaceholderInfo {
        key: "traineePhoto",
        label: "Trainee/Trainer Photo",
        kind: PlaceholderKind::Image,
    },
    PlaceholderInfo {
        key: "centerLogo",
        label: "Center Logo",
        kind: PlaceholderKind::Image,
    },
];

/// Text placeholders, one variant per table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPlaceholder {
    TraineeName,
    CertificateTitle,
    TrainingProgramName,
    CertificateNumber,
    AtcCode,
    DateOfIssue,
    PlaceOfIssue,
    ChairpersonName,
    ChairpersonTitle,
    LegalDisclaimer,
    CenterName,
    CertificateTypeLabel,
}

impl TextPlaceholder {
    /// Look up a placeholder by its table key; unknown names return None
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "traineeName" => Some(Self::TraineeName),
            "certificateTitle" => Some(Self::CertificateTitle),
            "trainingProgramName" => Some(Self::TrainingProgramName),
            "certificateNumber" => Some(Self::CertificateNumber),
            "atcCode" => Some(Self::AtcCode),
            "dateOfIssue" => Some(Self::DateOfIssue),
            "placeOfIssue" => Some(Self::PlaceOfIssue),
            "chairpersonName" => Some(Self::ChairpersonName),
            "chairpersonTitle" => Some(Self::ChairpersonTitle),
            "legalDisclaimer" => Some(Self::LegalDisclaimer),
            "centerName" => Some(Self::CenterName),
            "certificateTypeLabel" => Some(Self::CertificateTypeLabel),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::TraineeName => "traineeName",
            Self::CertificateTitle => "certificateTitle",
            Self::TrainingProgramName => "trainingProgramName",
            Self::CertificateNumber => "certificateNumber",
            Self::AtcCode => "atcCode",
            Self::DateOfIssue => "dateOfIssue",
            Self::PlaceOfIssue => "placeOfIssue",
            Self::ChairpersonName => "chairpersonName",
            Self::ChairpersonTitle => "chairpersonTitle",
            Self::LegalDisclaimer => "legalDisclaimer",
            Self::CenterName => "centerName",
            Self::CertificateTypeLabel => "certificateTypeLabel",
        }
    }
}

/// Image placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePlaceholder {
    TraineePhoto,
    CenterLogo,
}

impl ImagePlaceholder {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "traineePhoto" => Some(Self::TraineePhoto),
            "centerLogo" => Some(Self::CenterLogo),
            _ => None,
        }
    }
}
