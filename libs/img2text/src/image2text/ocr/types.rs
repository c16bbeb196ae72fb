use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrModel {
    Tesseract,
    Native,
    #[default]
    Default,
}

impl std::fmt::Display for OcrModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OcrModel::Tesseract => write!(f, "tesseract"),
            OcrModel::Native => write!(f, "native"),
            OcrModel::Default => write!(f, "default")
        }
    }
}

impl From<&str> for OcrModel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "tesseract" => OcrModel::Tesseract,
            "native" => OcrModel::Native,
            "default" => OcrModel::Default,
            _ => OcrModel::Default,
        }
    }
}

impl From<String> for OcrModel {
    fn from(s: String) -> Self {
        OcrModel::from(s.as_str())
    }
}

/// Speed/accuracy trade-off requested from the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionLevel {
    #[default]
    Accurate,
    Fast,
}

impl std::fmt::Display for RecognitionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognitionLevel::Accurate => write!(f, "accurate"),
            RecognitionLevel::Fast => write!(f, "fast"),
        }
    }
}

impl From<&str> for RecognitionLevel {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fast" => RecognitionLevel::Fast,
            _ => RecognitionLevel::Accurate,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub ocr_model: OcrModel,
    pub recognition_level: RecognitionLevel,
    pub languages: Vec<String>, // BCP-47 for native engines, tesseract codes otherwise
    pub language_correction: Option<bool>, // None leaves the engine default
    pub bounding_boxes: Option<bool>, // add normalized coordinates of the text
    pub dpi: Option<u32>, // dots per inch
    pub psm: Option<u32>, // Page segmentation mode
    pub oem: Option<u32>, // OCR Engine Mode
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            ocr_model: OcrModel::Default,
            recognition_level: RecognitionLevel::Accurate,
            languages: Vec::new(),
            language_correction: None,
            bounding_boxes: None,
            dpi: None,
            psm: None,
            oem: None,
        }
    }
}

impl OcrConfig {
    /// Reads a JSON config; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn get_default_bounding_boxes() -> bool {
        false
    }

    pub fn get_default_dpi() -> u32 {
        600
    }

    pub fn get_default_psm() -> u32 {
        1
    }

    pub fn get_default_oem() -> u32 {
        1
    }
}

/// Normalized rectangle, origin at the top-left of the image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Converts a normalized rectangle whose origin is the bottom-left corner
    /// (Vision's convention) into a top-left one.
    pub fn from_bottom_left(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, 1.0 - (y + height), width, height)
    }

    /// Normalizes a pixel rectangle against the image size.
    pub fn from_pixels(left: f32, top: f32, width: f32, height: f32, image_width: u32, image_height: u32) -> Option<Self> {
        if image_width == 0 || image_height == 0 {
            return None;
        }
        let (w, h) = (image_width as f32, image_height as f32);
        Some(Self::new(left / w, top / h, width / w, height / h))
    }
}

/// Top-ranked candidate for one piece of text found by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextObservation {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
}

impl TextObservation {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
            bounds: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Everything one request recognized, in engine order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    observations: Vec<TextObservation>,
}

impl Recognition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty candidates are dropped.
    pub fn push(&mut self, observation: TextObservation) {
        if observation.text.is_empty() {
            return;
        }
        self.observations.push(observation);
    }

    pub fn observations(&self) -> &[TextObservation] {
        &self.observations
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.observations.iter().map(|o| o.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn to_text(&self, add_bounding_boxes: bool) -> String {
        self.observations
            .iter()
            .map(|observation| match (add_bounding_boxes, observation.bounds) {
                (true, Some(bounds)) => format!("({:.2}, {:.2}) {}", bounds.x, bounds.y, observation.text),
                _ => observation.text.clone(),
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl FromIterator<TextObservation> for Recognition {
    fn from_iter<I: IntoIterator<Item = TextObservation>>(iter: I) -> Self {
        let mut recognition = Recognition::new();
        for observation in iter {
            recognition.push(observation);
        }
        recognition
    }
}
