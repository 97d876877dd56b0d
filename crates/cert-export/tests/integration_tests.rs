//! Integration tests for cert-export
//!
//! These tests run the full pipeline from template to on-disk files.

use cert_export::{
    fit_on_page, Exporter, FontCatalog, ImageLoader, NoImageLoader, PagePlacement,
    PAGE_HEIGHT_MM, PAGE_MARGIN_FACTOR, PAGE_WIDTH_MM,
};
use cert_layout::{LayoutRenderer, RenderMode, Resolver};
use cert_model::{system_templates, CertificateData, ElementKind};
use std::path::PathBuf;

/// Template reduced to elements that rasterize without registered fonts
fn fontless_scene() -> cert_layout::Scene {
    let mut template = system_templates().remove(0);
    template.elements.retain(|e| {
        matches!(
            e.kind(),
            ElementKind::QrCode | ElementKind::Seal | ElementKind::Line
        )
    });
    let resolver = Resolver::new("https://example.org");
    LayoutRenderer::new(&resolver, RenderMode::Export)
        .render(&template, &CertificateData::default())
}

fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cert-export-test-{label}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn exports_png_and_pdf_files() {
    let scene = fontless_scene();
    let fonts = FontCatalog::new();
    let exporter = Exporter::new(&fonts, &NoImageLoader);
    let dir = scratch_dir("ok");

    let png_path = exporter.export_image(&scene, &dir, "certificate").unwrap();
    let pdf_path = exporter.export_pdf(&scene, &dir, "certificate").unwrap();

    let png = std::fs::read(&png_path).unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));

    let pdf = std::fs::read(&pdf_path).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}

struct FailingLoader;

impl ImageLoader for FailingLoader {
    fn load(&self, url: &str) -> cert_export::Result<image::DynamicImage> {
        Err(cert_export::ExportError::ImageLoad {
            url: url.to_string(),
            reason: "simulated network failure".to_string(),
        })
    }
}

#[test]
fn failed_image_load_writes_no_file_and_releases_the_exporter() {
    let mut template = system_templates().remove(0);
    template.elements.retain(|e| e.id() == "trainee-photo");
    let data = CertificateData {
        trainee_photo: Some("https://cdn.example.org/p.jpg".into()),
        show_seal: Some(false),
        show_qr_code: Some(false),
        ..CertificateData::default()
    };
    let resolver = Resolver::new("https://example.org");
    let scene = LayoutRenderer::new(&resolver, RenderMode::Export).render(&template, &data);

    let fonts = FontCatalog::new();
    let exporter = Exporter::new(&fonts, &FailingLoader).with_factor(1);
    let dir = scratch_dir("fail");

    let result = exporter.export_image(&scene, &dir, "certificate");
    assert!(matches!(
        result,
        Err(cert_export::ExportError::ImageLoad { .. })
    ));

    // All-or-nothing: the failed export must not leave a partial file
    assert!(!dir.join("certificate.png").exists());
    assert!(!exporter.is_busy());

    // The exporter accepts the next request
    assert!(exporter.export_image(&fontless_scene(), &dir, "retry").is_ok());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn page_placement_fits_the_supersampled_bitmap() {
    let scene = fontless_scene();
    let fonts = FontCatalog::new();
    let exporter = Exporter::new(&fonts, &NoImageLoader);
    let pdf = exporter.pdf_bytes(&scene).unwrap();
    assert!(lopdf::Document::load_mem(&pdf).is_ok());

    // 800x566 at 3x still lands inside the margins
    let PagePlacement { x, y, width, height } = fit_on_page(2400, 1698);
    assert!(x >= 0.0 && y >= 0.0);
    assert!(x + width <= PAGE_WIDTH_MM);
    assert!(y + height <= PAGE_HEIGHT_MM);
    assert!(width <= PAGE_WIDTH_MM * PAGE_MARGIN_FACTOR + 1e-9);
}
