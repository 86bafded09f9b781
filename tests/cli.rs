use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".analytics-dashboard").join("config.json")
}

const BINARY_NAME: &str = "analytics-dashboard";

/// Nothing listens on port 1, so every request fails to connect.
const UNREACHABLE_API: &str = "http://127.0.0.1:1/api/v1";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("analytics dashboard"))
        .stdout(contains("snapshot"));
}

#[test]
/// An unreachable API still yields a complete page with every panel in its error state.
fn snapshot_renders_error_states_when_api_is_down() {
    let tmp = temp_home();
    let output = tmp.path().join("page.html");

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["snapshot", "--api-url", UNREACHABLE_API, "--output"])
        .arg(&output)
        .env("HOME", tmp.path())
        .assert()
        .success()
        .stderr(contains("Snapshot written"));

    let page = fs::read_to_string(&output).unwrap();
    assert!(page.contains("No se puede establecer conexión con la API"));
    assert!(page.contains("Error al cargar los datos"));
    assert!(page.contains(r#"<option value="Canada">Canadá</option>"#));
}

#[test]
/// Without --output the page goes to stdout.
fn snapshot_prints_page_to_stdout() {
    let tmp = temp_home();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["snapshot", "--api-url", UNREACHABLE_API])
        .env("HOME", tmp.path())
        .assert()
        .success()
        .stdout(contains("<!DOCTYPE html>"))
        .stdout(contains("Dashboard de Análisis en Tiempo Real"));
}

#[test]
/// Filter values outside the dropdown options are rejected before any request.
fn snapshot_rejects_unknown_category() {
    let tmp = temp_home();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["snapshot", "--api-url", UNREACHABLE_API, "--category", "9"])
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("category-select"));
}

#[test]
fn snapshot_rejects_zero_interval() {
    let tmp = temp_home();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["snapshot", "--interval-ms", "0"])
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("refresh_interval_ms"));
}

#[test]
/// init-config should write the default configuration under $HOME.
fn init_config_creates_config_file() {
    let tmp = temp_home();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("init-config")
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stderr(contains("Config written"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("\"refresh_interval_ms\": 30000"));
}

#[test]
/// init-config refuses to clobber an existing file unless forced.
fn init_config_keeps_existing_file() {
    let tmp = temp_home();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("init-config")
        .env("HOME", tmp.path())
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "{}");

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["init-config", "--force"])
        .env("HOME", tmp.path())
        .assert()
        .success();
    assert!(fs::read_to_string(&config_path).unwrap().contains("api_base_url"));
}

#[test]
fn snapshot_rejects_zero_timeout() {
    let tmp = temp_home();

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["snapshot", "--timeout-secs", "0"])
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stderr(contains("request_timeout_secs"));
}
