use super::types::ExtractError;
use crate::image2text::{Recognition, RecognitionError};

pub const FRAME_HEADER: &str = "--- OCR RESULTS ---";
pub const FRAME_FOOTER: &str = "-------------------";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub bounding_boxes: bool,
    pub framed: bool,
}

/// Text written to stdout for one run. Errors print a single message and
/// nothing else.
pub fn render_outcome(outcome: &Result<Recognition, ExtractError>, options: &OutputOptions) -> String {
    match outcome {
        Ok(recognition) => {
            let text = recognition.to_text(options.bounding_boxes);
            if options.framed {
                format!("{}\n{}\n{}", FRAME_HEADER, text, FRAME_FOOTER)
            } else {
                text
            }
        }
        Err(ExtractError::Recognition(RecognitionError::Engine(msg))) => format!("Error: {}", msg),
        Err(ExtractError::Recognition(RecognitionError::Perform(msg))) => {
            format!("Failed to perform request: {}", msg)
        }
        Err(ExtractError::Recognition(RecognitionError::Image(msg))) => format!("Failed to load image: {}", msg),
        Err(ExtractError::Recognition(RecognitionError::Unsupported(msg))) => {
            format!("Failed to perform request: {}", msg)
        }
        Err(e) => format!("Failed to load image: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image2text::{BoundingBox, TextObservation};

    fn sample() -> Recognition {
        vec![
            TextObservation::new("Invoice #42").with_bounds(BoundingBox::new(0.1, 0.2, 0.3, 0.05)),
            TextObservation::new("Total: 10.00"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lines_joined_by_newline() {
        let out = render_outcome(&Ok(sample()), &OutputOptions::default());
        assert_eq!(out, "Invoice #42\nTotal: 10.00");
    }

    #[test]
    fn test_empty_recognition_prints_nothing() {
        let out = render_outcome(&Ok(Recognition::new()), &OutputOptions::default());
        assert_eq!(out, "");
    }

    #[test]
    fn test_framed_output() {
        let options = OutputOptions { framed: true, ..Default::default() };
        let out = render_outcome(&Ok(sample()), &options);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.first(), Some(&FRAME_HEADER));
        assert_eq!(lines.last(), Some(&FRAME_FOOTER));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_bounding_boxes_prefix() {
        let options = OutputOptions { bounding_boxes: true, ..Default::default() };
        let out = render_outcome(&Ok(sample()), &options);
        assert_eq!(out, "(0.10, 0.20) Invoice #42\nTotal: 10.00");
    }

    #[test]
    fn test_engine_error_is_single_message() {
        let outcome = Err(ExtractError::Recognition(RecognitionError::Engine("unsupported revision".into())));
        let out = render_outcome(&outcome, &OutputOptions { framed: true, bounding_boxes: true });
        assert_eq!(out, "Error: unsupported revision");
    }

    #[test]
    fn test_perform_error_message() {
        let outcome = Err(ExtractError::Recognition(RecognitionError::Perform("timed out".into())));
        assert_eq!(
            render_outcome(&outcome, &OutputOptions::default()),
            "Failed to perform request: timed out"
        );
    }

    #[test]
    fn test_unsupported_platform_message() {
        let outcome = Err(ExtractError::Recognition(RecognitionError::Unsupported("no engine".into())));
        assert_eq!(
            render_outcome(&outcome, &OutputOptions::default()),
            "Failed to perform request: no engine"
        );
    }

    #[test]
    fn test_missing_file_message() {
        let outcome = Err(ExtractError::Path("Path does not exist: /x.png".into()));
        assert_eq!(
            render_outcome(&outcome, &OutputOptions::default()),
            "Failed to load image: Path does not exist: /x.png"
        );
    }
}
