#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};
use toml_config::{TomlConfig, MAX_POOL_SIZE};

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Effective settings after layering command line overrides on the file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_path: String,
    pub pool_size: u32,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            data_path: config.storage.data_path.clone(),
            pool_size: config.pool.size,
            log_level: config.logging.level.clone(),
            json_logs: config.json_logs(),
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                config
            }
            None => TomlConfig::default(),
        };

        let mut settings = Self::from_toml(&file);
        if let Some(data) = &cli.data {
            settings.data_path = data.clone();
        }
        if let Some(size) = cli.pool_size {
            settings.pool_size = size;
        }
        settings.json_logs |= cli.json_logs;

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("data_path", &self.data_path)?;
        validate_range("pool_size", self.pool_size, 1, MAX_POOL_SIZE)
    }
}

impl ConfigProvider for Settings {
    fn data_path(&self) -> &str {
        &self.data_path
    }

    fn pool_size(&self) -> u32 {
        self.pool_size
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }
}
