use image::{Rgb, RgbImage, Rgba, RgbaImage};
use merchant_report::reports::services::PdfAssembler;
use merchant_report::AppError;
use std::path::{Path, PathBuf};

/// PDF assembly from chart images
///
/// Validates:
/// - one page per image, in input order
/// - RGBA input is accepted
/// - missing, corrupt or absent input is an artifact error

fn write_rgb(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([20, 120, 220]))
        .save(&path)
        .unwrap();
    path
}

fn pages(path: &Path) -> usize {
    lopdf::Document::load(path).unwrap().get_pages().len()
}

#[cfg(test)]
mod pdf_assembly_tests {
    use super::*;

    #[test]
    fn test_two_images_make_two_pages() {
        let dir = tempfile::tempdir().unwrap();
        let images = vec![
            write_rgb(dir.path(), "a.png", 124, 175),
            write_rgb(dir.path(), "b.png", 200, 100),
        ];
        let output = dir.path().join("out.pdf");

        PdfAssembler::new(150.0)
            .assemble("Merchant Report", &images, &output)
            .unwrap();

        assert_eq!(pages(&output), 2);
    }

    #[test]
    fn test_alpha_channel_is_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 128]))
            .save(&path)
            .unwrap();
        let output = dir.path().join("out.pdf");

        PdfAssembler::new(150.0)
            .assemble("Merchant Report", &[path], &output)
            .unwrap();

        assert_eq!(pages(&output), 1);
    }

    #[test]
    fn test_existing_output_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.pdf");
        std::fs::write(&output, b"stale").unwrap();
        let images = vec![write_rgb(dir.path(), "a.png", 50, 50)];

        PdfAssembler::new(150.0)
            .assemble("Merchant Report", &images, &output)
            .unwrap();

        assert!(std::fs::read(&output).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdfAssembler::new(150.0)
            .assemble("Merchant Report", &[], &dir.path().join("out.pdf"))
            .unwrap_err();

        assert!(matches!(err, AppError::Artifact(_)));
    }

    #[test]
    fn test_missing_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let images = vec![
            write_rgb(dir.path(), "a.png", 50, 50),
            dir.path().join("missing.png"),
        ];
        let output = dir.path().join("out.pdf");

        let err = PdfAssembler::new(150.0)
            .assemble("Merchant Report", &images, &output)
            .unwrap_err();

        assert!(matches!(err, AppError::Artifact(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_corrupt_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let corrupt = dir.path().join("corrupt.png");
        std::fs::write(&corrupt, b"not a png").unwrap();

        let err = PdfAssembler::new(150.0)
            .assemble("Merchant Report", &[corrupt], &dir.path().join("out.pdf"))
            .unwrap_err();

        assert!(matches!(err, AppError::Artifact(_)));
    }
}
