//! Storage collaborator interfaces
//!
//! The core only assumes CRUD-shaped calls; the backing store may be a
//! remote API, a local database or the in-memory implementation used by
//! tests and demos.

use cert_model::{CertificateData, CertificateStatus, Template};
use thiserror::Error;

/// Failure reported by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Template persistence
pub trait TemplateStore {
    fn get_template(&self, id: &str) -> StoreResult<Option<Template>>;
    fn list_templates(&self) -> StoreResult<Vec<Template>>;
    /// Whole-template replacement; returns the stored record
    fn save_template(&mut self, template: &Template) -> StoreResult<Template>;
    /// Returns whether a record was removed
    fn delete_template(&mut self, id: &str) -> StoreResult<bool>;
}

/// Certificate record persistence
pub trait CertificateStore {
    /// Lookup by certificate number (case-insensitive) or record id
    fn get_certificate(&self, key: &str) -> StoreResult<Option<CertificateData>>;
    fn list_certificates(&self) -> StoreResult<Vec<CertificateData>>;
    fn save_certificate(&mut self, data: &CertificateData) -> StoreResult<CertificateData>;
    fn delete_certificate(&mut self, id: &str) -> StoreResult<bool>;
    fn update_certificate_status(
        &mut self,
        number: &str,
        status: CertificateStatus,
    ) -> StoreResult<bool>;
}

/// In-memory store for tests and demos
///
/// `set_failing(true)` makes every subsequent call report a backend
/// error, for exercising failure paths.
#[derive(Default)]
pub struct MemoryStore {
    templates: Vec<Template>,
    certificates: Vec<CertificateData>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: Vec<Template>) -> Self {
        Self {
            templates,
            ..Self::default()
        }
    }

    pub fn with_certificates(certificates: Vec<CertificateData>) -> Self {
        Self {
            certificates,
            ..Self::default()
        }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing {
            return Err(StoreError::Backend("simulated failure".to_string()));
        }
        Ok(())
    }
}

impl TemplateStore for MemoryStore {
    fn get_template(&self, id: &str) -> StoreResult<Option<Template>> {
        self.check()?;
        Ok(self.templates.iter().find(|t| t.id == id).cloned())
    }

    fn list_templates(&self) -> StoreResult<Vec<Template>> {
        self.check()?;
        Ok(self.templates.clone())
    }

    fn save_template(&mut self, template: &Template) -> StoreResult<Template> {
        self.check()?;
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template.clone(),
            None => self.templates.push(template.clone()),
        }
        Ok(template.clone())
    }

    fn delete_template(&mut self, id: &str) -> StoreResult<bool> {
        self.check()?;
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        Ok(self.templates.len() < before)
    }
}

impl CertificateStore for MemoryStore {
    fn get_certificate(&self, key: &str) -> StoreResult<Option<CertificateData>> {
        self.check()?;
        let by_number = self.certificates.iter().find(|c| {
            c.certificate_number
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(key))
        });
        let found = by_number
            .or_else(|| self.certificates.iter().find(|c| c.id.as_deref() == Some(key)));
        Ok(found.cloned())
    }

    fn list_certificates(&self) -> StoreResult<Vec<CertificateData>> {
        self.check()?;
        Ok(self.certificates.clone())
    }

    fn save_certificate(&mut self, data: &CertificateData) -> StoreResult<CertificateData> {
        self.check()?;
        let slot = data
            .id
            .as_deref()
            .and_then(|id| self.certificates.iter_mut().find(|c| c.id.as_deref() == Some(id)));
        match slot {
            Some(existing) => *existing = data.clone(),
            None => self.certificates.push(data.clone()),
        }
        Ok(data.clone())
    }

    fn delete_certificate(&mut self, id: &str) -> StoreResult<bool> {
        self.check()?;
        let before = self.certificates.len();
        self.certificates.retain(|c| c.id.as_deref() != Some(id));
        Ok(self.certificates.len() < before)
    }

    fn update_certificate_status(
        &mut self,
        number: &str,
        status: CertificateStatus,
    ) -> StoreResult<bool> {
        self.check()?;
        let found = self.certificates.iter_mut().find(|c| {
            c.certificate_number
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(number))
        });
        match found {
            Some(record) => {
                record.status = Some(status);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
