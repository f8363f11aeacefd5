//! Tests for config discovery and layered loading.
//!
//! Environment layering lives in `environment.rs`, in its own test binary,
//! so the variables it sets never leak into these tests.

use std::fs;
use std::path::PathBuf;

use modgen_config::{ConfigDiscovery, ConfigError, ConfigOverrides, ModgenConfig};
use tempfile::TempDir;

#[test]
fn loads_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let discovery = ConfigDiscovery::new(dir.path());

    assert!(discovery.find().is_none());
    let config = discovery.load(None, &ConfigOverrides::default()).unwrap();
    assert_eq!(config, ModgenConfig::default());
}

#[test]
fn discovers_modgen_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("modgen.toml"),
        r#"
output_dir = "generated"
base_module = "java.core"
trace_missing = true
"#,
    )
    .unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    assert_eq!(discovery.find().unwrap().file_name().unwrap(), "modgen.toml");

    let config = discovery.load(None, &ConfigOverrides::default()).unwrap();
    assert_eq!(config.output_dir, PathBuf::from("generated"));
    assert_eq!(config.base_module, "java.core");
    assert_eq!(config.file_name, "module-info.java");
    assert!(config.trace_missing);
}

#[test]
fn explicit_file_must_exist() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("custom.toml");

    let err = ConfigDiscovery::new(dir.path())
        .load(Some(&missing), &ConfigOverrides::default())
        .unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(path) if path == missing));
}

#[test]
fn explicit_file_replaces_discovery() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("modgen.toml"), "output_dir = \"conventional\"\n").unwrap();
    let custom = dir.path().join("custom.toml");
    fs::write(&custom, "output_dir = \"custom\"\n").unwrap();

    let config = ConfigDiscovery::new(dir.path())
        .load(Some(&custom), &ConfigOverrides::default())
        .unwrap();
    assert_eq!(config.output_dir, PathBuf::from("custom"));
}

#[test]
fn unknown_field_is_invalid() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("modgen.toml"), "outputdir = \"x\"\n").unwrap();

    let err = ConfigDiscovery::new(dir.path())
        .load(None, &ConfigOverrides::default())
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue(_)));
}

#[test]
fn invalid_file_name_is_rejected_after_merge() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("modgen.toml"), "file_name = \"a/b.java\"\n").unwrap();

    let err = ConfigDiscovery::new(dir.path())
        .load(None, &ConfigOverrides::default())
        .unwrap_err();
    assert!(err.to_string().contains("file_name"));
}

#[test]
fn converts_to_builder_options() {
    let config = ModgenConfig {
        output_dir: PathBuf::from("out"),
        base_module: "java.core".to_string(),
        trace_missing: true,
        ..ModgenConfig::default()
    };

    let options = config.builder_options();
    assert_eq!(options.output_dir, PathBuf::from("out"));
    assert_eq!(options.emit.base_module, "java.core");
    assert_eq!(options.emit.file_name, "module-info.java");
    assert!(options.trace_missing);
}
