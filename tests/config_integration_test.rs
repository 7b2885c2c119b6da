//! Configuration integration tests
//!
//! These tests load registry settings from TOML files and build registries
//! from them.

use dsk::config::ConfigurationLoader;
use dsk::resolver::DataStore;
use tempfile::TempDir;

#[test]
fn test_registry_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dsk.toml");
    std::fs::write(
        &config_path,
        r#"
namespace = "reader"
fallback_separator = ":"

[stores]
bookmark = "BookmarkDataStore"
reading_list = "BookmarkListDataStore"
"#,
    )
    .unwrap();

    let loader = ConfigurationLoader::new(Some(config_path.as_path())).unwrap();
    let registry = loader.build_registry().unwrap();

    assert_eq!(registry.namespace(), "reader");
    assert_eq!(registry.mapping_hook_name(), "reader_data_stores");
    assert_eq!(registry.type_hook_name("bookmark"), "reader_bookmark_data_store");

    let store = DataStore::load(&registry, "reading_list").unwrap();
    assert_eq!(store.get_current_class_name(), "BookmarkListDataStore");

    // The configured separator drives fallback
    let store = DataStore::load(&registry, "bookmark:starred").unwrap();
    assert_eq!(store.get_current_class_name(), "BookmarkDataStore");
    assert!(DataStore::load(&registry, "bookmark-starred").is_err());

    // Not in this file's mapping
    assert!(DataStore::load(&registry, "bookmark_list").is_err());
}

#[test]
fn test_unknown_class_in_config_fails_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dsk.toml");
    std::fs::write(
        &config_path,
        r#"
[stores]
product = "ProductDataStore"
"#,
    )
    .unwrap();

    let registry = ConfigurationLoader::new(Some(config_path.as_path()))
        .unwrap()
        .build_registry()
        .unwrap();

    let err = DataStore::load(&registry, "product").unwrap_err();
    assert!(err.is_invalid_data_store());
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dsk.toml");
    std::fs::write(&config_path, "namespace = \"\"\n").unwrap();

    assert!(ConfigurationLoader::new(Some(config_path.as_path())).is_err());
}

#[test]
fn test_default_config_without_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.toml");
    let loader = ConfigurationLoader::new(Some(missing.as_path())).unwrap();
    let registry = loader.build_registry().unwrap();

    assert_eq!(registry.namespace(), "dsk");
    assert_eq!(
        DataStore::load(&registry, "bookmark_list")
            .unwrap()
            .get_current_class_name(),
        "BookmarkListDataStore"
    );
}
