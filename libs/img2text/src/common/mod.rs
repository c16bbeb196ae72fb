mod utils;
mod path_utils;

pub use utils::get_current_timestamp_str;
pub use utils::init_logger;
pub use path_utils::to_verified_path;
