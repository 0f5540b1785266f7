//! End-to-end CLI tests for the vplan binary.

mod support;

use assert_cmd::Command;
use assert_cmd::assert::{Assert, OutputAssertExt};
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::socket_guard::start_mock_server_or_skip;

/// A command isolated from the user's config, with logs kept quiet.
fn vplan(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vplan").expect("binary builds");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

async fn mount_school_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/vertretungsplan"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body>
                <table><tr><td>7a</td><td>Mathe</td></tr></table>
                <a href="/files/plan_mo.pdf">Mo</a>
                <a href="/files/plan_di.pdf">Di</a>
            </body></html>"#,
        ))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/plan_mo.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 mo".to_vec()))
        .mount(server)
        .await;
}

/// Runs the blocking assert_cmd call off the runtime that drives the mock server.
async fn run_blocking(mut cmd: Command) -> Assert {
    tokio::task::spawn_blocking(move || cmd.output())
        .await
        .expect("command thread")
        .expect("binary runs")
        .assert()
}

#[test]
fn test_binary_help_displays_usage() {
    let home = TempDir::new().expect("temp dir");
    vplan(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("substitution plan"));
}

#[test]
fn test_binary_version_displays_version() {
    let home = TempDir::new().expect("temp dir");
    vplan(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vplan"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let home = TempDir::new().expect("temp dir");
    vplan(&home)
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_binary_unreachable_page_exits_with_failure() {
    let home = TempDir::new().expect("temp dir");
    let out = TempDir::new().expect("temp dir");
    vplan(&home)
        .args(["--url", "http://127.0.0.1:9/vertretungsplan", "--output-dir"])
        .arg(out.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Searching PDFs..."))
        .stdout(predicate::str::contains("Could not load page"));
}

#[test]
fn test_binary_unreachable_page_with_table_prints_fetch_error() {
    let home = TempDir::new().expect("temp dir");
    let out = TempDir::new().expect("temp dir");
    vplan(&home)
        .args(["--url", "http://127.0.0.1:9/vertretungsplan", "--table", "--output-dir"])
        .arg(out.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Error fetching table data"));
}

#[test]
fn test_binary_rejects_unknown_config_key() {
    let home = TempDir::new().expect("temp dir");
    let config_dir = home.path().join("vplan");
    std::fs::create_dir_all(&config_dir).expect("config dir");
    std::fs::write(config_dir.join("config.toml"), "colour = \"blue\"\n").expect("config");

    vplan(&home)
        .args(["--output-dir", "/tmp"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_partial_failure_exit_code_and_files() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_school_site(&server).await;
    let home = TempDir::new().expect("temp dir");
    let out = TempDir::new().expect("temp dir");

    let page_url = format!("{}/vertretungsplan", server.uri());

    let mut cmd = vplan(&home);
    cmd.args(["--url", page_url.as_str(), "-r", "1", "--output-dir"])
        .arg(out.path());

    run_blocking(cmd)
        .await
        .code(1)
        .stdout(predicate::str::contains("PDFs found, downloading..."))
        .stdout(predicate::str::contains("PDF downloaded successfully: plan_mo.pdf"))
        .stdout(predicate::str::contains("PDF download failed:"))
        .stdout(predicate::str::contains("Finished: 1 downloaded, 1 failed"));

    let saved = out.path().join("SiemensGymPDFs").join("plan_mo.pdf");
    assert_eq!(std::fs::read(saved).expect("downloaded file"), b"%PDF-1.4 mo");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_config_file_and_table_output() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_school_site(&server).await;
    let home = TempDir::new().expect("temp dir");
    let out = TempDir::new().expect("temp dir");
    let config_dir = home.path().join("vplan");
    std::fs::create_dir_all(&config_dir).expect("config dir");
    std::fs::write(
        config_dir.join("config.toml"),
        format!(
            "source_url = \"{}/vertretungsplan\"\nsubdirectory = \"Plans\"\nmode = \"first-match\"\n",
            server.uri()
        ),
    )
    .expect("config");

    let mut cmd = vplan(&home);
    cmd.args(["--table", "--output-dir"]).arg(out.path());

    run_blocking(cmd)
        .await
        .code(0)
        .stdout(predicate::str::contains("<td>Mathe</td>"))
        .stdout(predicate::str::contains("Finished: 1 downloaded, 0 failed"));

    assert!(out.path().join("Plans").join("plan_mo.pdf").is_file());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_json_report() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_school_site(&server).await;
    let home = TempDir::new().expect("temp dir");
    let out = TempDir::new().expect("temp dir");

    let page_url = format!("{}/vertretungsplan", server.uri());

    let mut cmd = vplan(&home);
    cmd.args([
        "--url",
        page_url.as_str(),
        "--mode",
        "first-match",
        "--json",
        "--output-dir",
    ])
    .arg(out.path());

    let assert = run_blocking(cmd).await.code(0);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");

    assert_eq!(report["outcome"]["kind"], "finished");
    assert_eq!(report["results"][0]["succeeded"], true);
    assert!(
        report["results"][0]["source_url"]
            .as_str()
            .expect("string")
            .ends_with("/files/plan_mo.pdf")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_no_pdfs_exits_zero() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/leer"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>nichts</p>"))
        .mount(&server)
        .await;
    let home = TempDir::new().expect("temp dir");
    let out = TempDir::new().expect("temp dir");

    let page_url = format!("{}/leer", server.uri());

    let mut cmd = vplan(&home);
    cmd.args(["--url", page_url.as_str(), "--output-dir"])
        .arg(out.path());

    run_blocking(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("No PDFs found"));
}
