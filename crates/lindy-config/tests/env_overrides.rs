//! Environment layering through the public loader API.
//!
//! Each test uses its own prefix since the process environment is shared.

use lindy_config::{ConfigLoader, LogFormat};
use std::io::Write;

#[test]
fn test_env_overrides_file_values() {
    let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
    writeln!(file, "[docs]\ntitle = \"From file\"\n[logging]\nlevel = \"warn\"").unwrap();

    std::env::set_var("LINDYENVA__DOCS__TITLE", "From env");
    std::env::set_var("LINDYENVA__LOGGING__FORMAT", "pretty");

    let config = ConfigLoader::new()
        .with_file(file.path())
        .unwrap()
        .with_env_prefix("lindyenva")
        .load()
        .unwrap();

    assert_eq!(config.docs.title, "From env");
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_env_override_is_validated() {
    std::env::set_var("LINDYENVB__LOGGING__LEVEL", "chatty");

    let result = ConfigLoader::new().with_env_prefix("LINDYENVB").load();
    assert!(result.is_err());
}

#[test]
fn test_prefix_without_separator_is_ignored() {
    std::env::set_var("LINDYENVCX__DOCS__TITLE", "Other service");

    let config = ConfigLoader::new().with_env_prefix("LINDYENVC").load().unwrap();
    assert_eq!(config.docs.title, "API");
}
