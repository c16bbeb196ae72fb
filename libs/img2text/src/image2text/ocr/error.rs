use thiserror::Error;

/// NSError domain Vision uses for failures of the request itself.
pub const VISION_ERROR_DOMAIN: &str = "com.apple.Vision";

/// Failures of a single recognition request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecognitionError {
    /// The engine ran and reported an error for the whole request.
    #[error("recognition engine reported an error: {0}")]
    Engine(String),

    /// The request could not be performed.
    #[error("failed to perform recognition request: {0}")]
    Perform(String),

    /// The decoded image could not be handed to the engine.
    #[error("failed to prepare image for recognition: {0}")]
    Image(String),

    /// No engine can run on this platform.
    #[error("no OCR engine available: {0}")]
    Unsupported(String),
}

impl RecognitionError {
    /// Errors in Vision's own domain come from the request; anything else
    /// (Core Video, Foundation, ...) means it never ran.
    pub fn from_vision(domain: &str, description: String) -> Self {
        if domain == VISION_ERROR_DOMAIN {
            RecognitionError::Engine(description)
        } else {
            RecognitionError::Perform(description)
        }
    }
}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for RecognitionError {
    fn from(err: windows::core::Error) -> Self {
        RecognitionError::Perform(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vision_domain_is_engine_error() {
        let err = RecognitionError::from_vision(VISION_ERROR_DOMAIN, "revision unsupported".to_string());
        assert_eq!(err, RecognitionError::Engine("revision unsupported".to_string()));
    }

    #[test]
    fn test_other_domains_are_perform_errors() {
        let err = RecognitionError::from_vision("NSCocoaErrorDomain", "file unreadable".to_string());
        assert_eq!(err, RecognitionError::Perform("file unreadable".to_string()));
    }
}
