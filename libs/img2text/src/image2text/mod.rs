mod ocr;
pub use ocr::{process_ocr, OcrConfig, OcrModel, RecognitionLevel};
pub use ocr::{BoundingBox, Recognition, RecognitionError, TextObservation};
