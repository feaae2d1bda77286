use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use crate::config::{AppOptions, ConfigError, ConfigFormat};

#[test]
fn test_format_from_path() {
    assert_eq!(ConfigFormat::from_path(Path::new("xublit.json")), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_path(Path::new("XUBLIT.JSON")), Some(ConfigFormat::Json));
    #[cfg(feature = "yaml-config")]
    assert_eq!(ConfigFormat::from_path(Path::new("app.yml")), Some(ConfigFormat::Yaml));
    #[cfg(feature = "toml-config")]
    assert_eq!(ConfigFormat::from_path(Path::new("app.toml")), Some(ConfigFormat::Toml));
    assert_eq!(ConfigFormat::from_path(Path::new("app.ini")), None);
    assert_eq!(ConfigFormat::from_path(Path::new("app")), None);
}

#[test]
fn test_builder_sets_options() {
    let options = AppOptions::new()
        .with_base_dir("/app")
        .with_src_dir("lib")
        .with_etc_dir("conf")
        .with_include_npm_xublits(false)
        .with_include_dir("/extra")
        .with_include_dir("/more");

    assert_eq!(options.base_dir, Some(PathBuf::from("/app")));
    assert_eq!(options.src_dir, Some(PathBuf::from("lib")));
    assert_eq!(options.etc_dir, Some(PathBuf::from("conf")));
    assert_eq!(options.include_npm_xublits, Some(false));
    assert_eq!(
        options.include_dirs,
        Some(vec![PathBuf::from("/extra"), PathBuf::from("/more")])
    );
}

#[test]
fn test_parse_json_ignores_unknown_keys() {
    let options = AppOptions::parse(
        r#"{
            "baseDir": "/app",
            "includeNpmXublits": false,
            "includeDirs": ["/extra"],
            "port": 8080
        }"#,
        ConfigFormat::Json,
    )
    .unwrap();

    assert_eq!(
        options,
        AppOptions::new()
            .with_base_dir("/app")
            .with_include_npm_xublits(false)
            .with_include_dirs(["/extra"])
    );
}

#[test]
fn test_parse_json_rejects_wrong_types() {
    let err = AppOptions::parse(r#"{ "includeNpmXublits": "yes" }"#, ConfigFormat::Json).unwrap_err();
    match err {
        ConfigError::Parse { format, .. } => assert_eq!(format, "JSON"),
        other => panic!("Expected Parse error, got {:?}", other),
    }
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_parse_yaml() {
    let options = AppOptions::parse("baseDir: /srv/app\nsrcDir: lib\n", ConfigFormat::Yaml).unwrap();
    assert_eq!(options.base_dir, Some(PathBuf::from("/srv/app")));
    assert_eq!(options.src_dir, Some(PathBuf::from("lib")));
    assert_eq!(options.include_dirs, None);
}

#[cfg(feature = "toml-config")]
#[test]
fn test_from_file_toml() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("xublit.toml");
    fs::write(&path, "baseDir = \"/srv/app\"\nincludeDirs = [\"/a\", \"/b\"]\n").unwrap();

    let options = AppOptions::from_file(&path).unwrap();
    assert_eq!(options.base_dir, Some(PathBuf::from("/srv/app")));
    assert_eq!(
        options.include_dirs,
        Some(vec![PathBuf::from("/a"), PathBuf::from("/b")])
    );
}

#[test]
fn test_from_file_errors() {
    let dir = tempdir().unwrap();

    let unsupported = dir.path().join("xublit.ini");
    fs::write(&unsupported, "baseDir=/app").unwrap();
    assert!(matches!(
        AppOptions::from_file(&unsupported),
        Err(ConfigError::UnsupportedFormat(_))
    ));

    let missing = dir.path().join("missing.json");
    match AppOptions::from_file(&missing) {
        Err(ConfigError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_merge_overlays_only_set_options() {
    let mut base = AppOptions::new()
        .with_base_dir("/from-file")
        .with_src_dir("lib")
        .with_include_dirs(["/file-extra"]);
    let overrides = AppOptions::new()
        .with_base_dir("/from-flags")
        .with_include_npm_xublits(false);

    base.merge(&overrides);

    assert_eq!(base.base_dir, Some(PathBuf::from("/from-flags")));
    assert_eq!(base.src_dir, Some(PathBuf::from("lib")));
    assert_eq!(base.include_npm_xublits, Some(false));
    assert_eq!(base.include_dirs, Some(vec![PathBuf::from("/file-extra")]));
}
