use image::DynamicImage;
use std::path::Path;
use std::time::Instant;

use super::types::ExtractError;
use crate::common::to_verified_path;
use crate::image2text::{process_ocr, OcrConfig, Recognition};

pub fn load_image_from_path(path: &Path) -> Result<DynamicImage, ExtractError> {
    image::open(path).map_err(|source| ExtractError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Verifies `path`, decodes the image and runs one recognition request on it.
/// The engine is never invoked for a path that cannot be read as an image.
pub async fn extract_text(path: &Path, config: &OcrConfig) -> Result<Recognition, ExtractError> {
    let path_buf = to_verified_path(path).map_err(|e| ExtractError::Path(e.to_string()))?;
    let image = load_image_from_path(&path_buf)?;
    log::debug!("Loaded {} ({}x{})", path_buf.display(), image.width(), image.height());

    let ocr_start = Instant::now();
    let recognition = process_ocr(&image, config).await?;
    log::info!("OCR took {:?}, {} lines", ocr_start.elapsed(), recognition.len());

    Ok(recognition)
}
