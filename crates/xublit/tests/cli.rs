use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_dirs_prints_derived_include_dirs() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("xublit")?;

    cmd.args(["--base-dir", "/app", "dirs"]);

    cmd.assert()
        .success()
        .stdout(predicate::eq("/app/src\n/app/node_modules/xublit-*\n"));

    Ok(())
}

#[test]
fn test_dirs_respects_flags() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("xublit")?;

    cmd.args([
        "--base-dir",
        "/app",
        "--src-dir",
        "./lib",
        "--include-dir",
        "/extra",
        "--no-npm-xublits",
        "dirs",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::eq("/extra\n/app/lib\n"));

    Ok(())
}

#[test]
fn test_flags_override_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let config = temp.path().join("xublit.config.json");
    fs::write(
        &config,
        r#"{ "baseDir": "/from-file", "srcDir": "./source", "includeNpmXublits": false }"#,
    )?;

    let mut cmd = Command::cargo_bin("xublit")?;
    cmd.arg("--config").arg(&config).args(["--base-dir", "/app", "dirs"]);

    cmd.assert()
        .success()
        .stdout(predicate::eq("/app/source\n"));

    Ok(())
}

#[test]
fn test_missing_base_dir_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("xublit")?;

    cmd.arg("dirs");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Missing \"baseDir\" option"));

    Ok(())
}

#[test]
fn test_run_once_starts_and_stops() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let module = temp.path().join("src").join("greeter");
    fs::create_dir_all(&module)?;
    fs::write(
        module.join("xublit.json"),
        r#"{ "name": "greeter", "version": "1.2.0" }"#,
    )?;

    let mut cmd = Command::cargo_bin("xublit")?;
    cmd.arg("--base-dir").arg(temp.path()).args(["run", "--once"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Modules:"))
        .stdout(predicate::str::contains("greeter v1.2.0"));

    Ok(())
}

#[test]
fn test_run_once_fails_on_missing_dependency() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempfile::tempdir()?;
    let module = temp.path().join("src").join("http");
    fs::create_dir_all(&module)?;
    fs::write(
        module.join("xublit.json"),
        r#"{ "name": "http", "version": "1.0.0", "requires": ["db"] }"#,
    )?;

    let mut cmd = Command::cargo_bin("xublit")?;
    cmd.arg("--base-dir").arg(temp.path()).args(["run", "--once"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stdout(predicate::str::contains("Modules:").not());

    Ok(())
}
