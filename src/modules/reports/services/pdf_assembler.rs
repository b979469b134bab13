use image::{DynamicImage, GenericImageView};
use printpdf::{Image, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::core::{AppError, Result};

const MM_PER_INCH: f64 = 25.4;

/// Combines chart images into a PDF, one page per image
#[derive(Debug, Clone, Copy)]
pub struct PdfAssembler {
    dpi: f64,
}

impl PdfAssembler {
    pub fn new(dpi: f64) -> Self {
        Self { dpi }
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Write `images` to `output` in the given order.
    ///
    /// Each page takes the size of its image at the configured DPI. Images
    /// with an alpha channel are flattened to RGB. An existing `output` is
    /// overwritten.
    pub fn assemble(&self, title: &str, images: &[PathBuf], output: &Path) -> Result<()> {
        let (first, rest) = images
            .split_first()
            .ok_or_else(|| AppError::artifact("no chart images to assemble"))?;

        let first_image = load_rgb(first)?;
        let (width, height) = self.page_size(&first_image);
        let (doc, page, layer) = PdfDocument::new(title, width, height, "Page 1");
        self.place(first_image, doc.get_page(page).get_layer(layer));

        for (index, path) in rest.iter().enumerate() {
            let image = load_rgb(path)?;
            let (width, height) = self.page_size(&image);
            let (page, layer) = doc.add_page(width, height, format!("Page {}", index + 2));
            self.place(image, doc.get_page(page).get_layer(layer));
        }

        let file = File::create(output).map_err(|e| {
            AppError::artifact(format!("cannot create {}: {}", output.display(), e))
        })?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| AppError::artifact(format!("cannot write {}: {:?}", output.display(), e)))?;

        tracing::debug!(pages = images.len(), path = %output.display(), "PDF assembled");
        Ok(())
    }

    fn page_size(&self, image: &DynamicImage) -> (Mm, Mm) {
        let (width, height) = image.dimensions();
        (self.px_to_mm(width), self.px_to_mm(height))
    }

    fn px_to_mm(&self, pixels: u32) -> Mm {
        Mm(pixels as f64 / self.dpi * MM_PER_INCH)
    }

    fn place(&self, image: DynamicImage, layer: printpdf::PdfLayerReference) {
        Image::from_dynamic_image(&image).add_to_layer(
            layer,
            Some(Mm(0.0)),
            Some(Mm(0.0)),
            None,
            None,
            None,
            Some(self.dpi),
        );
    }
}

fn load_rgb(path: &Path) -> Result<DynamicImage> {
    if !path.is_file() {
        return Err(AppError::artifact(format!(
            "chart image {} does not exist",
            path.display()
        )));
    }

    let image = image::open(path).map_err(|e| {
        AppError::artifact(format!("cannot decode chart image {}: {}", path.display(), e))
    })?;

    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}
