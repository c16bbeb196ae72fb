// OCR module structure
#[cfg(target_os = "macos")]
mod ocr_mac;
#[cfg(target_os = "windows")]
mod ocr_win;

mod ocr_tesseract;

mod error;
mod types;
pub use error::RecognitionError;
pub use types::{BoundingBox, OcrConfig, OcrModel, Recognition, RecognitionLevel, TextObservation};

use image::DynamicImage;

/// Runs one recognition request against the engine selected by `config`.
///
/// The returned future resolves once the engine has produced every
/// observation; nothing is retried.
pub async fn process_ocr(img: &DynamicImage, config: &OcrConfig) -> Result<Recognition, RecognitionError> {
    log::debug!(
        "Running {} OCR ({} level) on {}x{} image",
        config.ocr_model,
        config.recognition_level,
        img.width(),
        img.height()
    );

    match config.ocr_model {
        OcrModel::Tesseract => {
            use self::ocr_tesseract::perform_ocr_tesseract;
            perform_ocr_tesseract(img, config)
        },
        OcrModel::Default | OcrModel::Native => {
            #[cfg(target_os = "macos")]
            {
                use self::ocr_mac::process_ocr_macosx;
                process_ocr_macosx(img, config).await
            }
            #[cfg(target_os = "windows")]
            {
                use self::ocr_win::process_ocr_windows;
                process_ocr_windows(img, config).await
            }
            #[cfg(not(any(target_os = "macos", target_os = "windows")))]
            {
                // no native engine here, tesseract stands in when installed
                use self::ocr_tesseract::{perform_ocr_tesseract, tesseract_available};
                let version = tesseract_available()?;
                log::debug!("Using tesseract {} as native engine", version.trim());
                perform_ocr_tesseract(img, config)
            }
        }
    }
}
