//! Configuration management.
//!
//! Registry settings come from a TOML file; `.env` files and environment
//! variables select that file and can override the namespace.
//!
//! # Example
//!
//! ```no_run
//! use dsk::config::{ConfigurationLoader, EnvironmentLoader};
//! use std::path::Path;
//!
//! let env = EnvironmentLoader::new(Some(Path::new(".env")));
//! let loader = ConfigurationLoader::from_env(&env).unwrap();
//! println!("Namespace: {}", loader.config.namespace);
//!
//! let registry = loader.build_registry().unwrap();
//! ```

pub mod config;
pub mod environment;

pub use self::config::{ConfigurationLoader, DEFAULT_CONFIG_PATH};
pub use self::environment::{EnvironmentLoader, CONFIG_PATH_VAR, NAMESPACE_VAR};

/// Serializes tests that touch the process environment.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
