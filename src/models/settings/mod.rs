// Settings module
// Optional user configuration read from config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_HOLIDAYS_URL: &str = "https://holidays-jp.github.io/api/v1/date.json";
pub const DEFAULT_FONT_FAMILY: &str =
    "'Noto Sans CJK JP', 'Noto Sans JP', 'Hiragino Sans', 'Yu Gothic', 'IPAexGothic', sans-serif";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Endpoint returning a JSON object of ISO date to holiday name
    pub holidays_url: String,
    /// Where the PNG is written; `None` means the user's download directory
    pub output_dir: Option<PathBuf>,
    /// CSS font-family list used for the day labels
    pub font_family: String,
    pub http_timeout_secs: u64,
    /// Extra fetch attempts after the first failure
    pub fetch_retries: usize,
    /// Upper bound on rasterization attempts before giving up
    pub raster_attempts: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            holidays_url: DEFAULT_HOLIDAYS_URL.to_string(),
            output_dir: None,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            http_timeout_secs: 20,
            fetch_retries: 2,
            raster_attempts: 3,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        let url = self.holidays_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err("Holidays URL must use http or https".to_string());
        }

        if self.font_family.trim().is_empty() {
            return Err("Font family cannot be empty".to_string());
        }

        if self.http_timeout_secs == 0 {
            return Err("HTTP timeout must be greater than 0 seconds".to_string());
        }

        if self.raster_attempts == 0 {
            return Err("Raster attempts must be at least 1".to_string());
        }

        Ok(())
    }
}
