use image::DynamicImage;
use rusty_tesseract::{Args, DataOutput, Image, TessError};
use std::collections::HashMap;

use super::error::RecognitionError;
use super::types::{BoundingBox, OcrConfig, Recognition, TextObservation};

const DEFAULT_LANGUAGE: &str = "eng";

pub fn perform_ocr_tesseract(
    image: &DynamicImage,
    config: &OcrConfig
) -> Result<Recognition, RecognitionError> {
    if config.language_correction == Some(true) {
        log::warn!("Language correction is not supported by tesseract, ignoring");
    }

    let args = Args {
        lang: tesseract_language(&config.languages),
        config_variables: HashMap::from([("tessedit_create_tsv".into(), "1".into())]),
        dpi: Some(config.dpi.unwrap_or(OcrConfig::get_default_dpi()) as i32),
        psm: Some(config.psm.unwrap_or(OcrConfig::get_default_psm()) as i32),
        oem: Some(config.oem.unwrap_or(OcrConfig::get_default_oem()) as i32)
    };

    let ocr_image = Image::from_dynamic_image(image)
        .map_err(|e| RecognitionError::Image(e.to_string()))?;

    let data_output = rusty_tesseract::image_to_data(&ocr_image, &args)
        .map_err(|e| recognition_error(&e))?;

    let words = words_from_data_output(&data_output);
    log::debug!("tesseract returned {} words", words.len());

    Ok(group_words_into_lines(&words, image.width(), image.height()))
}

/// Version of the installed tesseract binary, used where it is the only engine.
#[cfg_attr(any(target_os = "macos", target_os = "windows"), allow(dead_code))]
pub fn tesseract_available() -> Result<String, RecognitionError> {
    rusty_tesseract::get_tesseract_version().map_err(|e| {
        RecognitionError::Unsupported(format!(
            "{} has no native engine and tesseract cannot be run: {}",
            std::env::consts::OS,
            e
        ))
    })
}

/// A tesseract run that exited non-zero is the engine rejecting the request;
/// everything else means it could not be run.
fn recognition_error(err: &TessError) -> RecognitionError {
    match err {
        TessError::CommandExitStatusError(..) => RecognitionError::Engine(err.to_string()),
        _ => RecognitionError::Perform(err.to_string()),
    }
}

fn tesseract_language(languages: &[String]) -> String {
    let languages: Vec<&str> = languages
        .iter()
        .map(|lang| lang.trim())
        .filter(|lang| !lang.is_empty())
        .collect();

    if languages.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        languages.join("+")
    }
}

/// One word row of tesseract's TSV output.
#[derive(Clone, Debug, PartialEq)]
struct TsvWord {
    block: i32,
    paragraph: i32,
    line: i32,
    left: i32,
    top: i32,
    width: i32,
    height: i32,
    conf: f32,
    text: String,
}

fn words_from_data_output(data_output: &DataOutput) -> Vec<TsvWord> {
    data_output.data.iter()
        .map(|row| TsvWord {
            block: row.block_num,
            paragraph: row.par_num,
            line: row.line_num,
            left: row.left,
            top: row.top,
            width: row.width,
            height: row.height,
            conf: row.conf,
            text: row.text.clone(),
        })
        .collect()
}

/// Joins words sharing (block, paragraph, line) into one observation per line.
/// Rows with a negative confidence are layout rows, not words.
fn group_words_into_lines(words: &[TsvWord], image_width: u32, image_height: u32) -> Recognition {
    let mut lines: Vec<((i32, i32, i32), Vec<&TsvWord>)> = Vec::new();

    for word in words.iter().filter(|w| w.conf >= 0.0 && !w.text.trim().is_empty()) {
        let key = (word.block, word.paragraph, word.line);
        match lines.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(word),
            None => lines.push((key, vec![word])),
        }
    }

    lines
        .into_iter()
        .map(|(_, members)| line_observation(&members, image_width, image_height))
        .collect()
}

fn line_observation(words: &[&TsvWord], image_width: u32, image_height: u32) -> TextObservation {
    let text = words.iter().map(|w| w.text.trim()).collect::<Vec<_>>().join(" ");
    let confidence = words.iter().map(|w| w.conf).sum::<f32>() / words.len() as f32 / 100.0;

    let left = words.iter().map(|w| w.left).min().unwrap_or(0);
    let top = words.iter().map(|w| w.top).min().unwrap_or(0);
    let right = words.iter().map(|w| w.left + w.width).max().unwrap_or(0);
    let bottom = words.iter().map(|w| w.top + w.height).max().unwrap_or(0);

    let observation = TextObservation::new(text).with_confidence(confidence);
    match BoundingBox::from_pixels(
        left as f32,
        top as f32,
        (right - left) as f32,
        (bottom - top) as f32,
        image_width,
        image_height,
    ) {
        Some(bounds) => observation.with_bounds(bounds),
        None => observation,
    }
}
