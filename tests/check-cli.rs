use assert_cmd::{assert::Assert, Command};
use mockito::{Matcher, Server};
use once_cell::sync::Lazy;
use predicates::prelude::*;
use serde_json::json;

const TOKEN_PATH: &str = "/api/token/";
const DEVICES_PATH: &str = "/api/v1.0/devices/";
const HOOK_PATH: &str = "/services/T0/B0/X";

static SAMPLE_DEVICES: Lazy<String> = Lazy::new(|| {
    json!({
        "count": 3,
        "next": null,
        "results": [
            {"uuid": "a1", "battery": 19, "roomResources": [{"name": "Israel Office – Allison"}]},
            {"uuid": "b2", "battery": 13, "roomResources": [{"name": "US – Huron"}]},
            {"uuid": "c3", "battery": 45, "roomResources": [{"name": "US – Denver"}]},
        ]
    })
    .to_string()
});

fn cmd(server_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("battery-alert").unwrap();
    cmd.env_clear()
        .env("JOAN_CLIENT_ID", "id")
        .env("JOAN_CLIENT_SECRET", "secret")
        .env("JOAN_TOKEN_URL", format!("{server_url}{TOKEN_PATH}"))
        .env("JOAN_DEVICES_URL", format!("{server_url}{DEVICES_PATH}"))
        .env("SLACK_WEBHOOK", format!("{server_url}{HOOK_PATH}"));
    cmd
}

fn cmd_check_assert(mut cmd: Command, args: &[&str]) -> Assert {
    cmd.arg("check").args(args).assert()
}

#[test]
fn check_posts_alert() {
    let mut server = Server::new();
    let _m_token = server
        .mock("POST", TOKEN_PATH)
        .with_body(r#"{"access_token": "tok"}"#)
        .create();
    let _m_devices = server
        .mock("GET", DEVICES_PATH)
        .match_header("authorization", "Bearer tok")
        .with_body(SAMPLE_DEVICES.as_str())
        .create();
    let m_hook = server
        .mock("POST", HOOK_PATH)
        .match_body(Matcher::PartialJson(json!({
            "text": ":flag-il: *Israel devices below 20%* :alert:\n- Israel Office – Allison: 19%\n\n:us: *US devices below 20%* :alert:\n- US – Huron: 13%"
        })))
        .with_body("ok")
        .expect(1)
        .create();

    cmd_check_assert(cmd(&server.url()), &[])
        .success()
        .stdout(predicate::str::contains("- US – Huron: 13%"))
        .stdout(predicate::str::contains("Denver").not());
    m_hook.assert();
}

#[test]
fn check_dry_run_does_not_post() {
    let mut server = Server::new();
    let _m_token = server
        .mock("POST", TOKEN_PATH)
        .with_body(r#"{"access_token": "tok"}"#)
        .create();
    let _m_devices = server
        .mock("GET", DEVICES_PATH)
        .with_body(SAMPLE_DEVICES.as_str())
        .create();
    let m_hook = server.mock("POST", HOOK_PATH).expect(0).create();

    let mut cmd = cmd(&server.url());
    cmd.env("BATTERY_THRESHOLD", "50");
    cmd_check_assert(cmd, &["--dry-run"])
        .success()
        .stdout(predicate::str::contains("US devices below 50%"))
        .stdout(predicate::str::contains("- US – Denver: 45%"));
    m_hook.assert();
}

#[test]
fn check_fails_on_rejected_credentials() {
    let mut server = Server::new();
    let _m_token = server.mock("POST", TOKEN_PATH).with_status(401).create();
    let m_devices = server.mock("GET", DEVICES_PATH).expect(0).create();
    let m_hook = server.mock("POST", HOOK_PATH).expect(0).create();

    cmd_check_assert(cmd(&server.url()), &[])
        .failure()
        .stderr(predicate::str::contains("authentication failed"));
    m_devices.assert();
    m_hook.assert();
}

#[test]
fn missing_credentials_fail_startup() {
    let mut cmd = Command::cargo_bin("battery-alert").unwrap();
    cmd.env_clear()
        .env("SLACK_WEBHOOK", "https://hooks.slack.com/services/T0/B0/X")
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JOAN_CLIENT_ID must be set"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let mut cmd = Command::cargo_bin("battery-alert").unwrap();
    cmd.env_clear()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown subcommand 'frobnicate'"));
}
