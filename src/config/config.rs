//! TOML configuration parsing.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::environment::EnvironmentLoader;
use crate::registry::{RegistryConfig, StoreRegistry};

/// Path tried when no configuration file is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/dsk.toml";

/// Loads and validates a [`RegistryConfig`].
#[derive(Debug, Clone)]
pub struct ConfigurationLoader {
    /// Path the configuration was read from, or would have been.
    pub config_path: PathBuf,
    /// Loaded configuration.
    pub config: RegistryConfig,
}

impl ConfigurationLoader {
    /// Initialize configuration loader.
    ///
    /// # Arguments
    /// * `config_path` - Path to TOML config file. If None, uses
    ///   [`DEFAULT_CONFIG_PATH`]; defaults apply when that file is missing.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let config = if config_path.exists() {
            Self::load_config(&config_path)?
        } else {
            debug!(path = %config_path.display(), "Config file not found, using defaults");
            RegistryConfig::default()
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", config_path.display()))?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration using the paths and overrides of `env`.
    ///
    /// `DSK_CONFIG` selects the file and `DSK_NAMESPACE` replaces the
    /// configured namespace.
    pub fn from_env(env: &EnvironmentLoader) -> Result<Self> {
        let path = env.config_path();
        let mut loader = Self::new(path.as_deref())?;
        if let Some(namespace) = env.namespace() {
            loader.config.namespace = namespace;
            loader
                .config
                .validate()
                .context("Invalid namespace from environment")?;
        }
        Ok(loader)
    }

    /// Create a loader from an already built configuration.
    pub fn from_config(config: RegistryConfig) -> Result<Self> {
        config.validate().context("Invalid config")?;
        Ok(Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            config,
        })
    }

    /// Build a registry from the loaded configuration.
    pub fn build_registry(&self) -> Result<StoreRegistry> {
        StoreRegistry::init(&self.config).with_context(|| {
            format!(
                "Failed to initialize registry from {}",
                self.config_path.display()
            )
        })
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(&self.config).context("Failed to serialize config")
    }

    fn load_config(path: &Path) -> Result<RegistryConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }
}
