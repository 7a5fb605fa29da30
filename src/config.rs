use crate::template::TemplateFormats;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "SNIPSNAP_CONFIG";
pub const DATA_DIR_ENV: &str = "SNIPSNAP_DATA_DIR";

/// User settings read from `config.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where `storage.json` and the log file live
    pub data_dir: Option<PathBuf>,
    /// How long a copied row stays highlighted
    pub copy_flash_ms: u64,
    /// strftime pattern for `{{date}}`
    pub date_format: String,
    /// strftime pattern for `{{time}}`
    pub time_format: String,
}

impl Default for Config {
    fn default() -> Self {
        let formats = TemplateFormats::default();
        Self {
            data_dir: None,
            copy_flash_ms: 300,
            date_format: formats.date,
            time_format: formats.time,
        }
    }
}

impl Config {
    /// Loads from `$SNIPSNAP_CONFIG` or the default location, falling back
    /// to defaults when no file exists. `$SNIPSNAP_DATA_DIR` wins over the
    /// file's `data_dir`.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => default_config_path()?,
        };

        let mut config = Self::load_from(&path)?;
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;
        config.template_formats().check().map_err(|e| anyhow!(e))?;
        Ok(config)
    }

    /// Data directory, defaulting to the platform data dir
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(dirs::data_dir()
                .context("Failed to get data directory")?
                .join("snipsnap")),
        }
    }

    pub fn copy_flash(&self) -> Duration {
        Duration::from_millis(self.copy_flash_ms)
    }

    pub fn template_formats(&self) -> TemplateFormats {
        TemplateFormats {
            date: self.date_format.clone(),
            time: self.time_format.clone(),
        }
    }
}

fn default_config_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Failed to get config directory")?
        .join("snipsnap")
        .join("config.toml"))
}
