//! Layered configuration loading.

use std::fs;
use std::path::PathBuf;

use prefgen::config::Config;
use serial_test::serial;
use tempfile::TempDir;

fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("PREFGEN_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn test_defaults_without_files() {
    clear_env();
    let dir = TempDir::new().unwrap();

    let config = Config::load_from(&dir.path().join("missing.toml"), &dir.path().join("prefgen.toml"))
        .unwrap();

    assert_eq!(config.input.dir, PathBuf::from("prefs"));
    assert_eq!(config.input.extension, "prefs");
    assert_eq!(config.output.dir, PathBuf::from("generated"));
    assert_eq!(config.java.non_null_annotation, "android.support.annotation.NonNull");
    assert_eq!(config.java.indent, "  ");
}

#[test]
#[serial]
fn test_project_overrides_user() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let user = dir.path().join("user.toml");
    let project = dir.path().join("prefgen.toml");

    fs::write(&user, "[output]\ndir = \"user-out\"\n\n[java]\nindent = \"\\t\"\n").unwrap();
    fs::write(&project, "[output]\ndir = \"project-out\"\n").unwrap();

    let config = Config::load_from(&user, &project).unwrap();

    assert_eq!(config.output.dir, PathBuf::from("project-out"));
    assert_eq!(config.java.indent, "\t");
    assert_eq!(config.input.extension, "prefs");
}

#[test]
#[serial]
fn test_env_overrides_files() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("prefgen.toml");
    fs::write(&project, "[output]\ndir = \"project-out\"\n").unwrap();

    std::env::set_var("PREFGEN_OUTPUT__DIR", "env-out");
    std::env::set_var("PREFGEN_JAVA__NON_NULL_ANNOTATION", "androidx.annotation.NonNull");
    let config = Config::load_from(&dir.path().join("missing.toml"), &project);
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.output.dir, PathBuf::from("env-out"));
    assert_eq!(config.java.non_null_annotation, "androidx.annotation.NonNull");
}

#[test]
#[serial]
fn test_invalid_value_is_reported() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("prefgen.toml");
    fs::write(&project, "[input]\nextension = 42\n").unwrap();

    let err = Config::load_from(&dir.path().join("missing.toml"), &project).unwrap_err();
    assert!(err.to_string().contains("extension"));
}
