use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// How long a fetched rate table stays fresh before a refresh is attempted.
pub const CACHE_DURATION: Duration = Duration::from_secs(3600); // 1 hour

/// Bumped whenever the on-disk cache record layout changes.
pub const CACHE_VERSION: u32 = 1;

pub const DEFAULT_API_URL: &str = "https://api.exchangerate-api.com/v4/latest";

const CACHE_FILE_NAME: &str = "rates.json";
const PREFS_FILE_NAME: &str = "currency";

pub fn api_url() -> String {
    env::var("CAMBIO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

pub fn api_key() -> Option<String> {
    env::var("API_KEY").ok().filter(|k| !k.is_empty())
}

pub fn cache_file() -> PathBuf {
    dirs::cache_dir()
        .map(|d| d.join("cambio"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_FILE_NAME)
}

pub fn prefs_file() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("cambio"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(PREFS_FILE_NAME)
}
