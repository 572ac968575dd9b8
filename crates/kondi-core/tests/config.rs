use kondi_core::config::{GlobalConfig, ResolutionMode};
use kondi_util::errors::KondiError;
use tempfile::TempDir;

#[test]
fn default_mode_is_prod() {
    assert_eq!(GlobalConfig::default().mode(), ResolutionMode::Prod);
}

#[test]
fn empty_toml_uses_defaults() {
    let config: GlobalConfig = toml::from_str("").unwrap();
    assert!(config.resolve.mode.is_none());
    assert_eq!(config.mode(), ResolutionMode::Prod);
}

#[test]
fn load_from_missing_file_is_default() {
    let tmp = TempDir::new().unwrap();
    let config = GlobalConfig::load_from(&tmp.path().join("config.toml")).unwrap();
    assert_eq!(config.mode(), ResolutionMode::Prod);
}

#[test]
fn load_from_file_reads_mode() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[resolve]\nmode = \"test\"\n").unwrap();
    let config = GlobalConfig::load_from(&path).unwrap();
    assert_eq!(config.mode(), ResolutionMode::Test);
}

#[test]
fn load_from_invalid_file_is_config_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("config.toml");
    std::fs::write(&path, "[resolve]\nmode = \"staging\"\n").unwrap();
    let err = GlobalConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, KondiError::Config { .. }));
}

#[test]
fn mode_from_str() {
    assert_eq!("DEV".parse::<ResolutionMode>().unwrap(), ResolutionMode::Dev);
    assert!("staging".parse::<ResolutionMode>().is_err());
}

#[test]
fn mode_capabilities() {
    assert!(ResolutionMode::Test.includes_test_scope());
    assert!(!ResolutionMode::Prod.includes_test_scope());
    assert!(ResolutionMode::Dev.activates_dev_dependencies());
    assert!(!ResolutionMode::Test.activates_dev_dependencies());
}
