use img2text::image2text::{OcrConfig, OcrModel, RecognitionLevel};
use img2text::process::{extract_text, load_image_from_path, render_outcome, ExtractError, OcrReport, OutputOptions};
use image::{DynamicImage, Rgb, RgbImage};

#[cfg(test)]
mod load_tests {
    use super::*;

    fn write_png(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
        let mut img = RgbImage::from_pixel(64, 32, Rgb([255, 255, 255]));
        for x in 8..56 {
            img.put_pixel(x, 16, Rgb([0, 0, 0]));
        }
        let path = dir.join(name);
        DynamicImage::ImageRgb8(img).save(&path).expect("Failed to write test image");
        path
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "line.png");

        let image = load_image_from_path(&path);
        assert!(image.is_ok(), "PNG should decode");
        let image = image.unwrap();
        assert_eq!((image.width(), image.height()), (64, 32));
    }

    #[tokio::test]
    async fn test_missing_image_never_reaches_engine() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");

        let outcome = extract_text(&missing, &OcrConfig::default()).await;
        match &outcome {
            Err(ExtractError::Path(msg)) => assert!(msg.contains("does not exist")),
            other => panic!("expected a path error, got {:?}", other),
        }

        let out = render_outcome(&outcome, &OutputOptions::default());
        assert!(out.starts_with("Failed to load image: "));
        assert_eq!(outcome.unwrap_err().exit_code(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"plain text, not pixels").unwrap();

        let outcome = extract_text(&path, &OcrConfig::default()).await;
        assert!(matches!(outcome, Err(ExtractError::Load { .. })));

        let report = OcrReport::new(&path, &OcrConfig::default(), &outcome);
        assert!(report.lines.is_empty());
        assert!(report.error.unwrap().starts_with("failed to decode"));
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocr.json");
        std::fs::write(
            &path,
            r#"{"ocr_model": "tesseract", "recognition_level": "fast", "languages": ["eng", "deu"]}"#,
        )
        .unwrap();

        let config = OcrConfig::from_json_file(&path).expect("config should parse");
        assert_eq!(config.ocr_model, OcrModel::Tesseract);
        assert_eq!(config.recognition_level, RecognitionLevel::Fast);
        assert_eq!(config.languages, vec!["eng", "deu"]);
        assert_eq!(config.dpi, None);
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocr.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = OcrConfig::from_json_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
