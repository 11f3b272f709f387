//! Integration tests for the `shopfront` CLI binary.
//!
//! Argument parsing, help output, completions and error exits run with no
//! backend at all. The rest drive the binary against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `shopfront` binary with env isolation.
///
/// Clears all `SHOPFRONT_*` env vars and points the config file at
/// `config` so tests never touch the user's real configuration.
fn shopfront_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shopfront");
    cmd.env("HOME", "/tmp/shopfront-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/shopfront-cli-test-nonexistent")
        .env("SHOPFRONT_CONFIG", config)
        .env_remove("SHOPFRONT_PROFILE")
        .env_remove("SHOPFRONT_API_URL")
        .env_remove("SHOPFRONT_TOKEN")
        .env_remove("SHOPFRONT_OUTPUT")
        .env_remove("SHOPFRONT_INSECURE")
        .env_remove("SHOPFRONT_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn isolated() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    (dir, config)
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let (_dir, config) = isolated();
    let output = shopfront_cmd(&config).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config).arg("--help").assert().success().stdout(
        predicate::str::contains("storefront")
            .and(predicate::str::contains("banners"))
            .and(predicate::str::contains("publish"))
            .and(predicate::str::contains("domains")),
    );
}

#[test]
fn test_version_flag() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shopfront"));
}

#[test]
fn test_completions_zsh() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error exits ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let (_dir, config) = isolated();
    let output = shopfront_cmd(&config).arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_draft_show_without_config() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["draft", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No CMS backend configured"));
}

#[test]
fn test_unknown_profile() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["--profile", "staging", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn test_missing_token_is_auth_error() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["--api-url", "http://127.0.0.1:9", "status"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No token configured"));
}

#[test]
fn test_position_zero_rejected() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["--api-url", "http://127.0.0.1:9", "--token", "t"])
        .args(["banners", "move", "0", "up"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("positions start at 1"));
}

#[test]
fn test_remove_needs_yes_when_not_interactive() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["--api-url", "http://127.0.0.1:9", "--token", "t"])
        .args(["banners", "remove", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires confirmation"));
}

#[test]
fn test_config_show_without_file() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_show_redacts_token() {
    let (_dir, config) = isolated();
    std::fs::write(
        &config,
        "[profiles.default]\napi_url = \"https://cms.example.com\"\ntoken = \"hunter2\"\n",
    )
    .unwrap();
    shopfront_cmd(&config)
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****").and(predicate::str::contains("hunter2").not()));
}

#[test]
fn test_config_set_and_use() {
    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["--profile", "shop", "config", "set", "api_url", "https://cms.example.com"])
        .assert()
        .success();
    shopfront_cmd(&config)
        .args(["config", "use", "shop"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("default_profile = \"shop\""), "{written}");
    assert!(written.contains("https://cms.example.com"), "{written}");

    shopfront_cmd(&config)
        .args(["config", "set", "timeout", "soon"])
        .assert()
        .code(2);
}

// ── Against a backend ───────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/business/cms/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "has_unpublished_changes": true, "last_published_version": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["--api-url", &server.uri(), "--token", "t", "-o", "json", "status"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"has_unpublished_changes\": true")
                .and(predicate::str::contains("\"last_published_version\": 3")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_token_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/business/cms/status"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (_dir, config) = isolated();
    shopfront_cmd(&config)
        .args(["--api-url", &server.uri(), "--token", "t", "status"])
        .assert()
        .code(3);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_plaintext_token_is_removed_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/business/cms/status"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, config) = isolated();
    std::fs::write(
        &config,
        format!(
            "default_profile = \"cli-test-plaintext\"\n\n\
             [profiles.cli-test-plaintext]\napi_url = \"{}\"\ntoken = \"stale-token\"\n",
            server.uri()
        ),
    )
    .unwrap();

    shopfront_cmd(&config).arg("status").assert().code(3);

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(!written.contains("stale-token"), "{written}");
    assert!(written.contains(&server.uri()), "{written}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_flag_token_leaves_config_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/business/cms/status"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (_dir, config) = isolated();
    let original = format!(
        "[profiles.default]\napi_url = \"{}\"\ntoken = \"kept-token\"\n",
        server.uri()
    );
    std::fs::write(&config, &original).unwrap();

    shopfront_cmd(&config)
        .args(["--token", "bad", "status"])
        .assert()
        .code(3);

    assert_eq!(std::fs::read_to_string(&config).unwrap(), original);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_draft_show_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/business/cms/draft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "banners": [
                    { "id": "b2", "url": "https://cdn/b2.png", "is_active": true, "sequence": 2 },
                    { "id": "b1", "url": "https://cdn/b1.png", "is_active": false, "sequence": 1 }
                ],
                "subdomain": { "subdomain": "acme" }
            }
        })))
        .mount(&server)
        .await;

    let (_dir, config) = isolated();
    let output = shopfront_cmd(&config)
        .args(["--api-url", &server.uri(), "--token", "t", "-o", "json", "draft", "show"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["subdomain"], "acme");
    assert_eq!(view["banners"][0]["id"], "b1");
    assert_eq!(view["banners"][0]["position"], 1);
    assert_eq!(view["banners"][1]["id"], "b2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_dry_run_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/business/cms/draft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "seo": { "title": "Acme", "description": "" } }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/business/cms/draft"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let (dir, config) = isolated();
    let script = dir.path().join("edits.json");
    std::fs::write(&script, r#"[{"op": "update_seo", "title": "Acme Updated"}]"#).unwrap();

    shopfront_cmd(&config)
        .args(["--api-url", &server.uri(), "--token", "t", "-o", "plain"])
        .args(["draft", "apply", "--dry-run"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("seo"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_storefront_remembers_domain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/public/storefront"))
        .and(query_param("domain", "acme.nerdplatform.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "logo": { "image_url": "https://cdn/logo.png", "company_name": "Acme" },
                "banners": [{ "desktop_image_url": "https://cdn/b1.png" }]
            }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let (_dir, config) = isolated();
    std::fs::write(
        &config,
        format!("[profiles.default]\napi_url = \"{}\"\n", server.uri()),
    )
    .unwrap();

    shopfront_cmd(&config)
        .args(["storefront", "Acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme.nerdplatform.com"));

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(
        written.contains("preview_domain = \"acme.nerdplatform.com\""),
        "{written}"
    );

    // No argument: falls back to the remembered domain
    shopfront_cmd(&config)
        .args(["storefront", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme.nerdplatform.com"));
}
