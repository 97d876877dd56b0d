//! Integration tests for cert-editor
//!
//! These tests run full editing sessions against the in-memory store.

use cert_editor::{
    verify_certificate, Editor, ElementPatch, MemoryStore, TemplateManager,
};
use cert_model::{
    generate_certificate_number, new_template_id, CertificateData, CertificateStatus,
    ElementKind,
};

#[test]
fn full_editing_session_round_trips_through_the_store() {
    let mut manager = TemplateManager::new(MemoryStore::new());
    manager.load().unwrap();

    // Start editing a copy of the selected system template
    let mut template = manager.selected().unwrap().clone();
    template.id = new_template_id();
    template.name = "Workshop Certificate".to_string();
    let template_id = template.id.clone();

    let mut editor = Editor::new(template);
    let caption_id = editor.add_element(ElementKind::Text);
    editor.update_element(
        &caption_id,
        &ElementPatch {
            content: Some(Some("Issued at the annual workshop".to_string())),
            y: Some(72.0),
            ..ElementPatch::default()
        },
    );

    // Drag the caption; default 0.7 display scale applies
    editor.begin_drag(&caption_id, 300.0, 200.0);
    editor.drag_to(300.0 + 56.0, 200.0);
    editor.end_drag();
    let (x, _) = editor.template().element(&caption_id).unwrap().position();
    assert!((x - 60.0).abs() < 1e-9, "56px at 0.7 scale is 10% of 800px");

    manager.save_template(editor.into_template()).unwrap();
    assert_eq!(manager.templates().len(), 5);

    let saved = manager
        .templates()
        .iter()
        .find(|t| t.id == template_id)
        .unwrap();
    assert!(saved.element(&caption_id).is_some());
    assert!(saved.validate().is_ok());
}

#[test]
fn issued_certificate_is_verifiable_until_deleted() {
    let mut store = MemoryStore::new();

    let number = generate_certificate_number();
    let record = CertificateData {
        id: Some("rec-1".to_string()),
        certificate_number: Some(number.clone()),
        trainee_name: Some("Jane Doe".to_string()),
        status: Some(CertificateStatus::Valid),
        ..CertificateData::default()
    };
    cert_editor::CertificateStore::save_certificate(&mut store, &record).unwrap();

    let found = verify_certificate(&store, &number.to_lowercase()).unwrap();
    assert_eq!(
        found.and_then(|c| c.trainee_name),
        Some("Jane Doe".to_string())
    );

    cert_editor::CertificateStore::update_certificate_status(
        &mut store,
        &number,
        CertificateStatus::Revoked,
    )
    .unwrap();
    let revoked = verify_certificate(&store, &number).unwrap().unwrap();
    assert_eq!(revoked.status, Some(CertificateStatus::Revoked));

    cert_editor::CertificateStore::delete_certificate(&mut store, "rec-1").unwrap();
    assert!(verify_certificate(&store, &number).unwrap().is_none());
}
