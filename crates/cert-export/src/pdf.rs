//! PDF document generation
//!
//! Embeds a rasterized certificate bitmap centered on a landscape A4
//! page. The bitmap is flattened to RGB over white, Flate-compressed
//! and placed as a single image XObject.

use crate::Result;
use image::RgbaImage;
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

/// Landscape A4 width in millimeters
pub const PAGE_WIDTH_MM: f64 = 297.0;
/// Landscape A4 height in millimeters
pub const PAGE_HEIGHT_MM: f64 = 210.0;
/// The image fills at most 90% of the page in each direction
pub const PAGE_MARGIN_FACTOR: f64 = 0.9;

const MM_TO_PT: f64 = 72.0 / 25.4;

/// Placement of the certificate image on the page, in millimeters
/// measured from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale an image of the given pixel dimensions to fit the page
///
/// Aspect ratio is preserved; the result is centered with the margin
/// factor applied to whichever axis binds first.
pub fn fit_on_page(pixel_width: u32, pixel_height: u32) -> PagePlacement {
    let (w, h) = (pixel_width.max(1) as f64, pixel_height.max(1) as f64);
    let scale = (PAGE_WIDTH_MM / w).min(PAGE_HEIGHT_MM / h) * PAGE_MARGIN_FACTOR;
    let width = w * scale;
    let height = h * scale;
    PagePlacement {
        x: (PAGE_WIDTH_MM - width) / 2.0,
        y: (PAGE_HEIGHT_MM - height) / 2.0,
        width,
        height,
    }
}

/// Serialize a single-page landscape A4 PDF containing the bitmap
pub fn write_pdf(bitmap: &RgbaImage) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Object::Stream(image_xobject(bitmap)?));

    let resources = dictionary! {
        "XObject" => dictionary! {
            "Im1" => Object::Reference(image_id),
        },
    };

    let placement = fit_on_page(bitmap.width(), bitmap.height());
    // PDF origin is bottom-left; placement is measured from the top
    let x = placement.x * MM_TO_PT;
    let y = (PAGE_HEIGHT_MM - placement.y - placement.height) * MM_TO_PT;
    let width = placement.width * MM_TO_PT;
    let height = placement.height * MM_TO_PT;
    let operators = format!("q\n{width} 0 0 {height} {x} {y} cm\n/Im1 Do\nQ\n").into_bytes();
    let contents_id = doc.add_object(Object::Stream(Stream::new(Dictionary::new(), operators)));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![
            0.into(),
            0.into(),
            (PAGE_WIDTH_MM * MM_TO_PT).into(),
            (PAGE_HEIGHT_MM * MM_TO_PT).into(),
        ],
        "Resources" => resources,
        "Contents" => Object::Reference(contents_id),
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Flatten RGBA over white, compress with FlateDecode, wrap as an
/// image XObject stream
fn image_xobject(bitmap: &RgbaImage) -> Result<Stream> {
    let mut rgb = Vec::with_capacity((bitmap.width() * bitmap.height() * 3) as usize);
    for pixel in bitmap.pixels() {
        let alpha = pixel[3] as f32 / 255.0;
        for c in 0..3 {
            rgb.push((pixel[c] as f32 * alpha + 255.0 * (1.0 - alpha)) as u8);
        }
    }

    let mut encoder =
        flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    std::io::Write::write_all(&mut encoder, &rgb)?;
    let data = encoder.finish()?;

    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => bitmap.width() as i64,
            "Height" => bitmap.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        data,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wide_canvas_binds_on_width() {
        // 800x566 is wider than A4's aspect ratio, so width binds
        let p = fit_on_page(800, 566);
        assert!((p.width - PAGE_WIDTH_MM * PAGE_MARGIN_FACTOR).abs() < 1e-9);
        assert!((p.x - PAGE_WIDTH_MM * 0.05).abs() < 1e-9);

        // Centered vertically
        assert!((p.y - (PAGE_HEIGHT_MM - p.height) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn tall_canvas_binds_on_height() {
        let p = fit_on_page(500, 1000);
        assert!((p.height - PAGE_HEIGHT_MM * PAGE_MARGIN_FACTOR).abs() < 1e-9);
        assert!((p.y - PAGE_HEIGHT_MM * 0.05).abs() < 1e-9);
    }

    #[test]
    fn placement_stays_within_page() {
        for (w, h) in [(800, 566), (1, 1), (10_000, 3), (3, 10_000)] {
            let p = fit_on_page(w, h);
            assert!(p.x >= 0.0 && p.y >= 0.0);
            assert!(p.x + p.width <= PAGE_WIDTH_MM + 1e-9);
            assert!(p.y + p.height <= PAGE_HEIGHT_MM + 1e-9);
        }
    }

    #[test]
    fn aspect_ratio_is_preserved() {
        let p = fit_on_page(800, 566);
        assert!((p.width / p.height - 800.0 / 566.0).abs() < 1e-9);
    }

    #[test]
    fn supersampling_does_not_change_placement() {
        // Physical size depends only on the aspect ratio
        let base = fit_on_page(800, 566);
        let supersampled = fit_on_page(2400, 1698);
        assert!((base.width - supersampled.width).abs() < 1e-9);
        assert!((base.height - supersampled.height).abs() < 1e-9);
    }

    #[test]
    fn writes_a_parseable_single_page_document() {
        let bitmap = RgbaImage::from_pixel(40, 30, image::Rgba([200, 200, 200, 255]));
        let bytes = write_pdf(&bitmap).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
