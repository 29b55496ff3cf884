use crate::models::settings::Settings;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

pub struct SettingsService;

impl SettingsService {
    /// Platform config location, e.g. `~/.config/fortnight-calendar/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "Ken24T", "fortnight-calendar")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load_default() -> Result<Settings> {
        match Self::default_config_path() {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("No config directory available, using default settings");
                Ok(Settings::default())
            }
        }
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Settings> {
        if !path.exists() {
            log::debug!("No config file at {:?}, using default settings", path);
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let settings = Self::parse(&content)
            .with_context(|| format!("Invalid config file {:?}", path))?;

        log::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Settings> {
        let settings: Settings =
            toml::from_str(content).context("Failed to parse settings TOML")?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;
        Ok(settings)
    }
}
