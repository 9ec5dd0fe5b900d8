pub mod files;
pub mod settings;

pub use files::{config_dir, ensure_dir, log_file, settings_file};
pub use settings::{load_settings, save_settings, Settings};
