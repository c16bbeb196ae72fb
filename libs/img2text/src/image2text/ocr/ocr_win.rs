use image::DynamicImage;
use std::io::Cursor;
use windows::{
    core::HSTRING,
    Globalization::Language,
    Graphics::Imaging::BitmapDecoder,
    Media::Ocr::OcrEngine,
    Storage::Streams::{DataWriter, InMemoryRandomAccessStream},
};

use super::error::RecognitionError;
use super::types::{BoundingBox, OcrConfig, Recognition, RecognitionLevel, TextObservation};

fn create_engine(config: &OcrConfig) -> Result<OcrEngine, RecognitionError> {
    match config.languages.first() {
        Some(tag) => {
            if config.languages.len() > 1 {
                log::warn!("Windows OCR uses a single language, using {}", tag);
            }
            let lang = Language::CreateLanguage(&HSTRING::from(tag.as_str()))
                .map_err(|e| RecognitionError::Engine(format!("invalid language tag '{}': {}", tag, e)))?;
            OcrEngine::TryCreateFromLanguage(&lang)
                .map_err(|e| RecognitionError::Engine(format!("no OCR engine for language '{}': {}", tag, e)))
        }
        None => OcrEngine::TryCreateFromUserProfileLanguages()
            .map_err(|e| RecognitionError::Engine(format!("no OCR engine for user profile languages: {}", e))),
    }
}

pub async fn process_ocr_windows(img: &DynamicImage, config: &OcrConfig) -> Result<Recognition, RecognitionError> {
    if config.recognition_level == RecognitionLevel::Fast || config.language_correction.is_some() {
        log::warn!("Windows OCR has no recognition level or language correction settings, ignoring");
    }

    let mut img_buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut img_buffer), image::ImageFormat::Png)
        .map_err(|err| RecognitionError::Image(err.to_string()))?;

    let inmem_stream = InMemoryRandomAccessStream::new()?;
    let data_handler = DataWriter::CreateDataWriter(&inmem_stream)?;
    data_handler.WriteBytes(&img_buffer)?;
    data_handler.StoreAsync()?.get()?;
    data_handler.FlushAsync()?.get()?;
    inmem_stream.Seek(0)?;

    let img_decoder =
        BitmapDecoder::CreateWithIdAsync(BitmapDecoder::PngDecoderId()?, &inmem_stream)?.get()?;
    let soft_bitmap = img_decoder.GetSoftwareBitmapAsync()?.get()?;
    let (bitmap_width, bitmap_height) = (soft_bitmap.PixelWidth()? as u32, soft_bitmap.PixelHeight()? as u32);

    let text_engine = create_engine(config)?;
    let extracted = text_engine.RecognizeAsync(&soft_bitmap)?.get()?;

    let mut recognition = Recognition::new();
    for line in extracted.Lines()? {
        let text = line.Text()?.to_string();

        let mut rect: Option<(f32, f32, f32, f32)> = None;
        for word in line.Words()? {
            let r = word.BoundingRect()?;
            rect = Some(match rect {
                None => (r.X, r.Y, r.X + r.Width, r.Y + r.Height),
                Some((l, t, rt, b)) => (l.min(r.X), t.min(r.Y), rt.max(r.X + r.Width), b.max(r.Y + r.Height)),
            });
        }

        let observation = TextObservation::new(text);
        let bounds = rect.and_then(|(l, t, r, b)| {
            BoundingBox::from_pixels(l, t, r - l, b - t, bitmap_width, bitmap_height)
        });
        recognition.push(match bounds {
            Some(bounds) => observation.with_bounds(bounds),
            None => observation,
        });
    }

    Ok(recognition)
}
