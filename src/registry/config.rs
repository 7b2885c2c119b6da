//! Registry settings: namespace, fallback separator and default mapping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{RegistryError, RegistryResult};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "dsk";

/// Separator used for parent-type fallback when none is configured.
pub const DEFAULT_SEPARATOR: char = '-';

/// Default mapping of object types to store class names.
pub const DEFAULT_STORES: &[(&str, &str)] = &[
    ("bookmark", "BookmarkDataStore"),
    ("bookmark_list", "BookmarkListDataStore"),
];

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_stores() -> BTreeMap<String, String> {
    DEFAULT_STORES
        .iter()
        .map(|(ty, class)| (ty.to_string(), class.to_string()))
        .collect()
}

/// Settings a [`StoreRegistry`] is initialized from.
///
/// [`StoreRegistry`]: super::StoreRegistry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Prefix of every hook name.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Character splitting a child object type from its parent type.
    #[serde(default = "default_separator")]
    pub fallback_separator: String,

    /// Object type to store class name.
    #[serde(default = "default_stores")]
    pub stores: BTreeMap<String, String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            fallback_separator: default_separator(),
            stores: default_stores(),
        }
    }
}

impl RegistryConfig {
    /// The fallback separator as a character.
    pub fn separator(&self) -> RegistryResult<char> {
        let mut chars = self.fallback_separator.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(RegistryError::InvalidSeparator(
                self.fallback_separator.clone(),
            )),
        }
    }

    /// Check every setting.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.namespace.trim().is_empty() {
            return Err(RegistryError::EmptyNamespace);
        }
        super::registry::validate_name(&self.namespace)?;
        self.separator()?;
        for (object_type, class_name) in &self.stores {
            super::registry::validate_name(object_type)?;
            super::registry::validate_name(class_name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.namespace, "dsk");
        assert_eq!(config.separator().unwrap(), '-');
        assert_eq!(
            config.stores.get("bookmark").map(String::as_str),
            Some("BookmarkDataStore")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: RegistryConfig = serde_json::from_str(r#"{"namespace": "shop"}"#).unwrap();
        assert_eq!(config.namespace, "shop");
        assert_eq!(config.fallback_separator, "-");
        assert_eq!(config.stores.len(), 2);
    }

    #[test]
    fn test_invalid_separator() {
        let config = RegistryConfig {
            fallback_separator: "::".to_string(),
            ..RegistryConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RegistryError::InvalidSeparator(_))
        ));

        let config = RegistryConfig {
            fallback_separator: String::new(),
            ..RegistryConfig::default()
        };
        assert!(config.separator().is_err());
    }

    #[test]
    fn test_invalid_store_names() {
        let mut config = RegistryConfig::default();
        config.stores.insert("".to_string(), "SomeStore".to_string());
        assert!(matches!(
            config.validate(),
            Err(RegistryError::InvalidName(_))
        ));

        let mut config = RegistryConfig::default();
        config.namespace = "  ".to_string();
        assert!(matches!(config.validate(), Err(RegistryError::EmptyNamespace)));

        config.namespace = "my shop".to_string();
        assert!(matches!(config.validate(), Err(RegistryError::InvalidName(_))));
    }
}
