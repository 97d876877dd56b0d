//! Export front end
//!
//! Drives rasterization and document encoding for a rendered scene and
//! writes the result to disk. A single exporter instance refuses
//! overlapping exports, and output files only appear once the full
//! byte stream has been produced.

use crate::pdf::write_pdf;
use crate::raster::{FontCatalog, ImageLoader, Rasterizer, SUPERSAMPLE};
use crate::{ExportError, Result};
use cert_layout::Scene;
use image::RgbaImage;
use std::cell::Cell;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// One-shot export driver over a font catalog and image loader
pub struct Exporter<'a> {
    fonts: &'a FontCatalog,
    images: &'a dyn ImageLoader,
    factor: u32,
    in_flight: Cell<bool>,
}

/// Releases the in-flight flag when an export ends, on any path
struct ExportGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> ExportGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Result<Self> {
        if flag.replace(true) {
            return Err(ExportError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl<'a> Exporter<'a> {
    pub fn new(fonts: &'a FontCatalog, images: &'a dyn ImageLoader) -> Self {
        Self {
            fonts,
            images,
            factor: SUPERSAMPLE,
            in_flight: Cell::new(false),
        }
    }

    /// Override the rasterization factor; exports default to
    /// [`SUPERSAMPLE`]
    pub fn with_factor(mut self, factor: u32) -> Self {
        self.factor = factor.max(1);
        self
    }

    /// Whether an export is currently running on this instance
    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Encode the scene as PNG bytes
    pub fn png_bytes(&self, scene: &Scene) -> Result<Vec<u8>> {
        let _guard = ExportGuard::acquire(&self.in_flight)?;
        let bitmap = self.rasterize(scene)?;
        encode_png(&bitmap)
    }

    /// Encode the scene as single-page PDF bytes
    pub fn pdf_bytes(&self, scene: &Scene) -> Result<Vec<u8>> {
        let _guard = ExportGuard::acquire(&self.in_flight)?;
        let bitmap = self.rasterize(scene)?;
        write_pdf(&bitmap)
    }

    /// Export the scene to `<dir>/<name>.png`
    ///
    /// The file is written only after encoding succeeds; a failed
    /// export leaves no partial file behind.
    pub fn export_image(&self, scene: &Scene, dir: &Path, name: &str) -> Result<PathBuf> {
        let bytes = self.png_bytes(scene)?;
        let path = dir.join(format!("{name}.png"));
        std::fs::write(&path, &bytes)?;
        log::info!("exported {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    /// Export the scene to `<dir>/<name>.pdf`
    pub fn export_pdf(&self, scene: &Scene, dir: &Path, name: &str) -> Result<PathBuf> {
        let bytes = self.pdf_bytes(scene)?;
        let path = dir.join(format!("{name}.pdf"));
        std::fs::write(&path, &bytes)?;
        log::info!("exported {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    fn rasterize(&self, scene: &Scene) -> Result<RgbaImage> {
        Rasterizer::new(self.fonts, self.images)
            .with_factor(self.factor)
            .rasterize(scene)
    }
}

fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    bitmap.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::NoImageLoader;
    use cert_layout::{LayoutRenderer, RenderMode, Resolver};
    use cert_model::{system_templates, CertificateData};

    fn fontless_scene() -> Scene {
        let mut template = system_templates().remove(0);
        template.elements.retain(|e| {
            matches!(
                e.kind(),
                cert_model::ElementKind::QrCode
                    | cert_model::ElementKind::Seal
                    | cert_model::ElementKind::Line
            )
        });
        let resolver = Resolver::new("https://example.org");
        LayoutRenderer::new(&resolver, RenderMode::Export)
            .render(&template, &CertificateData::default())
    }

    #[test]
    fn busy_flag_is_released_after_success() {
        let fonts = FontCatalog::new();
        let exporter = Exporter::new(&fonts, &NoImageLoader).with_factor(1);
        let scene = fontless_scene();

        assert!(!exporter.is_busy());
        let bytes = exporter.png_bytes(&scene).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
        assert!(!exporter.is_busy());

        // Reusable after completion
        exporter.pdf_bytes(&scene).unwrap();
        assert!(!exporter.is_busy());
    }

    #[test]
    fn busy_flag_is_released_after_failure() {
        let mut template = system_templates().remove(0);
        template.elements.retain(|e| e.id() == "trainee-name");
        let resolver = Resolver::new("https://example.org");
        let scene = LayoutRenderer::new(&resolver, RenderMode::Export)
            .render(&template, &CertificateData::default());

        // No fonts registered, so the text box fails rasterization
        let fonts = FontCatalog::new();
        let exporter = Exporter::new(&fonts, &NoImageLoader).with_factor(1);
        assert!(exporter.png_bytes(&scene).is_err());
        assert!(!exporter.is_busy());

        // Next export is not blocked by the failed one
        assert!(exporter.png_bytes(&fontless_scene()).is_ok());
    }
}
