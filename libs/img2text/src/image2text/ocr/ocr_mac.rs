use cidre::{
    cv::{PixelBuf, PixelFormat},
    ns,
    vn::{self, ImageRequestHandler, RecognizeTextRequest},
};
use image::{DynamicImage, GenericImageView};
use std::{ffi::c_void, ptr::null_mut};

use super::error::RecognitionError;
use super::types::{BoundingBox, OcrConfig, Recognition, RecognitionLevel, TextObservation};

#[no_mangle]
extern "C" fn release_callback(_refcon: *mut c_void, _data_ptr: *const *const c_void) {
    // buffer is owned by the luma image, which outlives the request
}

fn vision_level(level: RecognitionLevel) -> vn::RequestTextRecognitionLevel {
    match level {
        RecognitionLevel::Accurate => vn::RequestTextRecognitionLevel::Accurate,
        RecognitionLevel::Fast => vn::RequestTextRecognitionLevel::Fast,
    }
}

pub async fn process_ocr_macosx(image: &DynamicImage, config: &OcrConfig) -> Result<Recognition, RecognitionError> {
    if !config.languages.is_empty() {
        log::warn!(
            "Vision uses its default recognition languages, ignoring {:?}",
            config.languages
        );
    }

    cidre::objc::ar_pool(|| {
        let (width, height) = image.dimensions();
        let luma = image.grayscale().to_luma8();
        let raw_data = luma.as_raw();

        let width = width as usize;
        let height = height as usize;

        let mut pixel_buf_out = None;

        let pixel_buf = unsafe {
            PixelBuf::create_with_bytes_in(
                width,
                height,
                PixelFormat::ONE_COMPONENT_8,
                raw_data.as_ptr() as *mut c_void,
                width,
                release_callback,
                null_mut(),
                None,
                &mut pixel_buf_out,
                None,
            )
            .to_result_unchecked(pixel_buf_out)
        }
        .map_err(|status| RecognitionError::Image(format!("pixel buffer creation failed: {:?}", status)))?;

        let handler = ImageRequestHandler::with_cv_pixel_buf(&pixel_buf, None)
            .ok_or_else(|| RecognitionError::Image("could not create image request handler".to_string()))?;

        let mut request = RecognizeTextRequest::new();
        request.set_recognition_level(vision_level(config.recognition_level));
        if let Some(correction) = config.language_correction {
            request.set_uses_lang_correction(correction);
        }

        let requests = ns::Array::<vn::Request>::from_slice(&[&request]);
        handler.perform(&requests).map_err(|err| {
            RecognitionError::from_vision(&err.domain().to_string(), format!("{:?}", err))
        })?;

        let mut recognition = Recognition::new();
        let Some(results) = request.results() else {
            log::warn!("No results");
            return Ok(recognition);
        };

        for observation in results.iter() {
            let candidates = observation.top_candidates(1);
            let Ok(candidate) = candidates.get(0) else {
                continue;
            };
            let bounds = observation.bounding_box();
            recognition.push(
                TextObservation::new(candidate.string().to_string())
                    .with_confidence(candidate.confidence())
                    .with_bounds(BoundingBox::from_bottom_left(
                        bounds.origin.x as f32,
                        bounds.origin.y as f32,
                        bounds.size.width as f32,
                        bounds.size.height as f32,
                    )),
            );
        }

        Ok(recognition)
    })
}
