//! Public verification lookup
//!
//! Any pasted input is tried as a certificate number first (trimmed and
//! uppercased, since numbers are case-insensitive on input) and then as
//! a raw record id. Format validation gates the generator only; lookup
//! accepts anything and simply finds nothing.

use crate::store::{CertificateStore, StoreResult};
use cert_model::CertificateData;

/// Look up a certificate by number or record id
///
/// Returns the record as stored; status is never recomputed here.
pub fn verify_certificate<S: CertificateStore>(
    store: &S,
    input: &str,
) -> StoreResult<Option<CertificateData>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let normalized = trimmed.to_uppercase();
    if let Some(found) = store.get_certificate(&normalized)? {
        return Ok(Some(found));
    }

    // Record ids are case-sensitive, so retry with the raw input
    if normalized != trimmed {
        return store.get_certificate(trimmed);
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use cert_model::CertificateStatus;
    use pretty_assertions::assert_eq;

    fn store() -> MemoryStore {
        MemoryStore::with_certificates(vec![CertificateData {
            id: Some("rec-7f3a".to_string()),
            certificate_number: Some("FIBQ-A1B2-C3D4".to_string()),
            trainee_name: Some("John Smith".to_string()),
            status: Some(CertificateStatus::Revoked),
            ..CertificateData::default()
        }])
    }

    #[test]
    fn finds_by_number_with_whitespace_and_case_noise() {
        let store = store();
        let found = verify_certificate(&store, "  fibq-a1b2-c3d4  ").unwrap();
        assert_eq!(found.unwrap().trainee_name.as_deref(), Some("John Smith"));
    }

    #[test]
    fn finds_by_record_id() {
        let store = store();
        let found = verify_certificate(&store, "rec-7f3a").unwrap();
        assert!(found.is_some());
    }

    #[test]
    fn returns_status_as_stored() {
        let store = store();
        let found = verify_certificate(&store, "FIBQ-A1B2-C3D4").unwrap().unwrap();
        assert_eq!(found.status, Some(CertificateStatus::Revoked));
    }

    #[test]
    fn unknown_and_empty_inputs_find_nothing() {
        let store = store();
        assert!(verify_certificate(&store, "FIBQ-0000-0000").unwrap().is_none());
        assert!(verify_certificate(&store, "   ").unwrap().is_none());
        assert!(verify_certificate(&store, "not-a-number-at-all").unwrap().is_none());
    }
}
