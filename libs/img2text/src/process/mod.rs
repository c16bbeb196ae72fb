mod render;
mod types;
mod utils;

pub use render::{render_outcome, OutputOptions, FRAME_FOOTER, FRAME_HEADER};
pub use types::{ExtractError, OcrReport};
pub use utils::{extract_text, load_image_from_path};
