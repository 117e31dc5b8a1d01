use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".image_wizard";
const CONFIG_FILE: &str = "config.json";
const REQUESTS_DIR: &str = "requests";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "IMAGE_WIZARD_HOME";

/// Returns the application-specific data directory, defaulting to `~/.image_wizard`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Configuration file inside the given base directory.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Default destination for submitted image requests.
pub fn requests_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(REQUESTS_DIR)
}
