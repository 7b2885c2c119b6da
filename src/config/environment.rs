//! Environment variable loading.

use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Variable overriding the configured namespace.
pub const NAMESPACE_VAR: &str = "DSK_NAMESPACE";

/// Variable pointing at the configuration file.
pub const CONFIG_PATH_VAR: &str = "DSK_CONFIG";

/// Loads environment variables from a .env file and the process environment.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    env_file: Option<PathBuf>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to a .env file. Nothing is loaded when None, so
    ///   stray .env files never leak into tests.
    pub fn new(env_file: Option<&Path>) -> Self {
        if let Some(path) = env_file.filter(|p| p.exists()) {
            if let Err(e) = dotenv::from_path(path) {
                warn!(path = %path.display(), error = %e, "Failed to load .env file");
            }
        }

        Self {
            env_file: env_file.map(|p| p.to_path_buf()),
        }
    }

    /// The .env file this loader was created with.
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Namespace override from `DSK_NAMESPACE`.
    pub fn namespace(&self) -> Option<String> {
        non_empty_var(NAMESPACE_VAR)
    }

    /// Configuration file from `DSK_CONFIG`.
    pub fn config_path(&self) -> Option<PathBuf> {
        non_empty_var(CONFIG_PATH_VAR).map(PathBuf::from)
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
