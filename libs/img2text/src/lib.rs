pub mod common;
pub mod image2text;
pub mod process;
