use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::tempdir;

use crate::config::{AppOptions, Configuration};
use crate::event::emitter::SharedEmitter;
use crate::event::LifecycleEvent;
use crate::injector::{AppHandle, BootstrapScope, DirectoryInjector, Injector, InjectorError, InjectorOptions};

fn write_module(dir: &Path, name: &str, requires: &[&str]) {
    fs::create_dir_all(dir).unwrap();
    let manifest = serde_json::json!({
        "name": name,
        "version": "1.0.0",
        "requires": requires,
    });
    fs::write(dir.join("xublit.json"), manifest.to_string()).unwrap();
}

fn injector_for(base_dir: &Path, include_dirs: Vec<PathBuf>) -> (DirectoryInjector, SharedEmitter) {
    let options = AppOptions::new().with_base_dir(base_dir);
    let config = Configuration::resolve::<DirectoryInjector>(&options).unwrap();
    let events = SharedEmitter::new();
    let handle = AppHandle::new(Arc::new(config), events.clone());

    let injector = DirectoryInjector::new(InjectorOptions {
        base_dir: base_dir.to_path_buf(),
        include_dirs,
        bootstrap_scope: BootstrapScope::new(handle),
    })
    .unwrap();
    (injector, events)
}

fn module_names(injector: &DirectoryInjector) -> Vec<&str> {
    injector.modules().iter().map(|m| m.name()).collect()
}

#[test]
fn test_validator_accepts_plain_paths_and_patterns() {
    let dirs = vec![
        PathBuf::from("/extra"),
        PathBuf::from("relative/dir"),
        PathBuf::from("/app/node_modules/xublit-*"),
    ];
    assert!(DirectoryInjector::assert_valid_include_dirs(&dirs).is_ok());
    assert!(DirectoryInjector::assert_valid_include_dirs(&[]).is_ok());
}

#[test]
fn test_validator_rejects_empty_entry() {
    let dirs = vec![PathBuf::from("/ok"), PathBuf::new()];
    match DirectoryInjector::assert_valid_include_dirs(&dirs) {
        Err(InjectorError::InvalidIncludeDir { path, reason }) => {
            assert_eq!(path, PathBuf::new());
            assert_eq!(reason, "path is empty");
        }
        other => panic!("Expected InvalidIncludeDir, got {:?}", other),
    }
}

#[test]
fn test_validator_rejects_nul_and_bad_patterns() {
    let nul = vec![PathBuf::from("/bad\0dir")];
    assert!(matches!(
        DirectoryInjector::assert_valid_include_dirs(&nul),
        Err(InjectorError::InvalidIncludeDir { .. })
    ));

    let unclosed = vec![PathBuf::from("/app/[abc")];
    match DirectoryInjector::assert_valid_include_dirs(&unclosed) {
        Err(InjectorError::InvalidIncludeDir { reason, .. }) => {
            assert!(reason.starts_with("invalid glob pattern"), "reason was: {}", reason);
        }
        other => panic!("Expected InvalidIncludeDir, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bootstrap_discovers_and_orders_modules() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    write_module(&src.join("http"), "http", &["db"]);
    write_module(&src.join("nested").join("db"), "db", &[]);
    write_module(&src.join("cache"), "cache", &[]);

    let (mut injector, _events) = injector_for(temp.path(), vec![src.clone()]);
    injector.bootstrap().await.unwrap();

    // Sorted scan yields cache, http, nested/db; db must precede http.
    assert_eq!(module_names(&injector), vec!["cache", "db", "http"]);
    let db = injector.module("db").unwrap();
    assert_eq!(db.dir, src.join("nested").join("db"));
    assert_eq!(db.include_dir, src);
}

#[tokio::test]
async fn test_module_directories_are_not_searched_deeper() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    write_module(&src.join("outer"), "outer", &[]);
    write_module(&src.join("outer").join("inner"), "inner", &[]);

    let (mut injector, _events) = injector_for(temp.path(), vec![src]);
    injector.bootstrap().await.unwrap();

    assert_eq!(module_names(&injector), vec!["outer"]);
}

#[tokio::test]
async fn test_higher_priority_include_dir_wins() {
    let temp = tempdir().unwrap();
    let extra = temp.path().join("extra");
    let src = temp.path().join("src");
    write_module(&extra.join("db"), "db", &[]);
    write_module(&src.join("db"), "db", &[]);

    let (mut injector, _events) = injector_for(temp.path(), vec![extra.clone(), src]);
    injector.bootstrap().await.unwrap();

    assert_eq!(injector.modules().len(), 1);
    assert_eq!(injector.modules()[0].dir, extra.join("db"));
}

#[tokio::test]
async fn test_glob_include_dir_is_expanded() {
    let temp = tempdir().unwrap();
    let node_modules = temp.path().join("node_modules");
    write_module(&node_modules.join("xublit-auth"), "auth", &[]);
    write_module(&node_modules.join("xublit-mail"), "mail", &["auth"]);
    write_module(&node_modules.join("left-pad"), "left-pad", &[]);

    let pattern = node_modules.join("xublit-*");
    let (mut injector, _events) = injector_for(temp.path(), vec![pattern]);
    injector.bootstrap().await.unwrap();

    assert_eq!(module_names(&injector), vec!["auth", "mail"]);
    assert_eq!(
        injector.module("mail").unwrap().include_dir,
        node_modules.join("xublit-mail")
    );
}

#[tokio::test]
async fn test_missing_include_dirs_are_skipped() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("does-not-exist");
    let no_matches = temp.path().join("node_modules").join("xublit-*");

    let (mut injector, _events) = injector_for(temp.path(), vec![missing, no_matches]);
    injector.bootstrap().await.unwrap();

    assert!(injector.modules().is_empty());
}

#[tokio::test]
async fn test_bootstrap_fails_on_malformed_manifest() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("broken")).unwrap();
    fs::write(src.join("broken").join("xublit.json"), "{ \"name\": ").unwrap();

    let (mut injector, _events) = injector_for(temp.path(), vec![src]);
    let err = injector.bootstrap().await.unwrap_err();

    assert!(matches!(err, InjectorError::Manifest { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_bootstrap_fails_on_missing_dependency() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    write_module(&src.join("http"), "http", &["db"]);

    let (mut injector, _events) = injector_for(temp.path(), vec![src]);
    let err = injector.bootstrap().await.unwrap_err();

    assert!(matches!(err, InjectorError::MissingDependency { .. }), "got {:?}", err);
    assert!(injector.modules().is_empty());
}

#[tokio::test]
async fn test_bootstrap_subscribes_through_scope() {
    let temp = tempdir().unwrap();
    let (mut injector, events) = injector_for(temp.path(), vec![temp.path().join("src")]);
    assert_eq!(events.listener_count(&LifecycleEvent::Started), 0);

    injector.bootstrap().await.unwrap();

    assert_eq!(events.listener_count(&LifecycleEvent::Started), 1);
    assert_eq!(events.emit(&LifecycleEvent::Started).unwrap(), 1);
    assert_eq!(events.listener_count(&LifecycleEvent::Started), 0);
}

#[tokio::test]
async fn test_duplicate_module_in_one_include_dir_fails() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("src");
    write_module(&src.join("a"), "db", &[]);
    write_module(&src.join("b"), "db", &[]);

    let (mut injector, _events) = injector_for(temp.path(), vec![src.clone()]);
    match injector.bootstrap().await {
        Err(InjectorError::Manifest { path, message, .. }) => {
            assert_eq!(path, src.join("b").join("xublit.json"));
            assert!(message.contains("already defined"), "message was: {}", message);
        }
        other => panic!("Expected Manifest error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_glob_characters_in_base_dir_are_literal() {
    let temp = tempdir().unwrap();
    let base = temp.path().join("app[1]");
    write_module(&base.join("src").join("greeter"), "greeter", &[]);
    write_module(&base.join("node_modules").join("xublit-auth"), "auth", &[]);
    // Would match `app[1]` read as a pattern.
    write_module(&temp.path().join("app1").join("src").join("decoy"), "decoy", &[]);

    let options = AppOptions::new().with_base_dir(&base);
    let config = Configuration::resolve::<DirectoryInjector>(&options).unwrap();
    let (mut injector, _events) = injector_for(&base, config.derived_include_dirs());
    injector.bootstrap().await.unwrap();

    assert_eq!(module_names(&injector), vec!["greeter", "auth"]);
}

#[tokio::test]
async fn test_unclosed_bracket_in_base_dir_is_not_a_pattern() {
    let temp = tempdir().unwrap();
    let base = temp.path().join("app[");
    write_module(&base.join("src").join("greeter"), "greeter", &[]);

    let options = AppOptions::new().with_base_dir(&base);
    let config = Configuration::resolve::<DirectoryInjector>(&options).unwrap();
    let (mut injector, _events) = injector_for(&base, config.derived_include_dirs());
    injector.bootstrap().await.unwrap();

    assert_eq!(module_names(&injector), vec!["greeter"]);
}
