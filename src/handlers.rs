pub mod export;
pub mod info;
pub mod key;
pub mod photo;
pub mod text;

pub use export::{callback_handler, export_storyboard, send_export};
pub use info::show_system_info;
pub use key::{forget_key, set_key};
pub use photo::{analyze_upload, image_file, present_storyboard};
pub use text::{help, send_image_hint};
