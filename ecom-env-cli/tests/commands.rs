use std::fs;

use ecom_env_cli::commands::{check, keys, render, show};
use serial_test::serial;
use tempfile::TempDir;

const BOUND_VARS: [&str; 7] = [
    "KINDE_AUTHORITY",
    "KINDE_REDIRECT_URL",
    "KINDE_POST_LOGOUT_REDIRECT_URI",
    "KINDE_CLIENT_ID",
    "KINDE_AUDIENCE",
    "API_URL",
    "ECOM_PROFILE",
];

fn clear_env() {
    for var in BOUND_VARS {
        unsafe { std::env::remove_var(var) };
    }
}

#[test]
#[serial]
fn check_passes_for_dev() {
    clear_env();
    let tmp = TempDir::new().unwrap();
    check::run(tmp.path(), "dev").unwrap();
}

#[test]
#[serial]
fn check_fails_for_empty_prod() {
    clear_env();
    let tmp = TempDir::new().unwrap();
    let err = check::run(tmp.path(), "prod").unwrap_err();
    assert_eq!(err.to_string(), "6 configuration problems");
}

#[test]
#[serial]
fn check_reports_invalid_url() {
    clear_env();
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("application.yaml"), "apiUrl: \"localhost-8080\"\n").unwrap();
    let err = check::run(tmp.path(), "dev").unwrap_err();
    assert_eq!(err.to_string(), "1 configuration problem");
}

#[test]
#[serial]
fn render_typescript_to_file() {
    clear_env();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("environment.ts");

    render::run(tmp.path(), "dev", "ts", Some(&out)).unwrap();

    let ts = fs::read_to_string(&out).unwrap();
    assert!(ts.starts_with("export const environment = {"));
    assert!(ts.contains("clientId: '79d811f5d44847c8a05abd1317ee54c7',"));
    assert!(ts.contains("apiUrl: 'http://localhost:8080/api'"));
}

#[test]
#[serial]
fn render_json_to_file() {
    clear_env();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("environment.json");

    render::run(tmp.path(), "dev", "json", Some(&out)).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["kinde"]["authority"], "https://shopecom.kinde.com");
    assert_eq!(value["apiUrl"], "http://localhost:8080/api");
}

#[test]
#[serial]
fn render_rejects_unknown_format() {
    clear_env();
    let tmp = TempDir::new().unwrap();
    assert!(render::run(tmp.path(), "dev", "xml", None).is_err());
}

#[test]
#[serial]
fn show_fails_without_values() {
    clear_env();
    let tmp = TempDir::new().unwrap();
    assert!(show::run(tmp.path(), "prod").is_err());
    show::run(tmp.path(), "dev").unwrap();
}

#[test]
fn keys_lists_every_property() {
    let lines = keys::lines();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("kinde.authority"));
    assert!(lines[0].contains("KINDE_AUTHORITY"));
    assert!(lines[5].starts_with("apiUrl"));
}

#[test]
#[serial]
fn check_counts_missing_and_invalid_together() {
    clear_env();
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("application.yaml"), "apiUrl: \"localhost-8080\"\n").unwrap();
    let err = check::run(tmp.path(), "prod").unwrap_err();
    assert_eq!(err.to_string(), "6 configuration problems");
}

#[test]
fn summary_is_a_single_line() {
    assert_eq!(check::summary(1), "1 configuration problem");
    assert_eq!(check::summary(3), "3 configuration problems");
    assert!(!check::summary(3).contains('\n'));
}
