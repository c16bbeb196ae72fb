use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::common::get_current_timestamp_str;
use crate::image2text::{OcrConfig, Recognition, RecognitionError, TextObservation};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{0}")]
    Path(String),

    #[error("failed to decode {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Recognition(#[from] RecognitionError),
}

impl ExtractError {
    /// Recognition failures are reported on stdout only; an unusable input
    /// file or a missing engine fails the process.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExtractError::Recognition(RecognitionError::Unsupported(_)) => 1,
            ExtractError::Recognition(_) => 0,
            ExtractError::Path(_) | ExtractError::Load { .. } => 1,
        }
    }
}

/// Machine-readable summary of one run, emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct OcrReport {
    pub timestamp: String,
    pub path: String,
    pub model: String,
    pub recognition_level: String,
    pub lines: Vec<TextObservation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OcrReport {
    pub fn new(path: &Path, config: &OcrConfig, outcome: &Result<Recognition, ExtractError>) -> Self {
        let (lines, error) = match outcome {
            Ok(recognition) => (recognition.observations().to_vec(), None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };

        Self {
            timestamp: get_current_timestamp_str(),
            path: path.display().to_string(),
            model: config.ocr_model.to_string(),
            recognition_level: config.recognition_level.to_string(),
            lines,
            error,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
